//! Encoder Settings Domain Model
//!
//! Defines how multipart entities are framed.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Longest boundary allowed by RFC 2046.
pub const MAX_BOUNDARY_LENGTH: usize = 70;

/// Which part headers are written for `multipart/form-data` bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MultipartMode {
    /// Every part carries `Content-Type` and `Content-Transfer-Encoding`.
    #[default]
    Strict,
    /// Only `Content-Disposition`, plus `Content-Type` for file parts.
    BrowserCompatible,
}

impl MultipartMode {
    /// Parses the configuration spelling of a mode, ignoring case and
    /// accepting `-` for `_`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "strict" => Some(Self::Strict),
            "browser_compatible" | "browser" => Some(Self::BrowserCompatible),
            _ => None,
        }
    }

    /// Returns true if part content types are always written.
    #[must_use]
    pub const fn is_strict(self) -> bool {
        matches!(self, Self::Strict)
    }
}

/// Settings used when building entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncoderSettings {
    /// Header style for form-data parts.
    #[serde(default)]
    pub multipart_mode: MultipartMode,

    /// Number of characters in generated multipart boundaries.
    #[serde(default = "default_boundary_length")]
    pub boundary_length: usize,
}

const fn default_boundary_length() -> usize {
    32
}

impl EncoderSettings {
    /// Checks that the settings can produce valid entities.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidSettings` if the boundary length is
    /// zero or longer than [`MAX_BOUNDARY_LENGTH`].
    pub fn validate(&self) -> DomainResult<()> {
        if self.boundary_length == 0 || self.boundary_length > MAX_BOUNDARY_LENGTH {
            return Err(DomainError::InvalidSettings(format!(
                "boundary_length must be between 1 and {MAX_BOUNDARY_LENGTH}, got {}",
                self.boundary_length
            )));
        }
        Ok(())
    }
}

impl Default for EncoderSettings {
    fn default() -> Self {
        Self {
            multipart_mode: MultipartMode::default(),
            boundary_length: default_boundary_length(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_settings() {
        let settings = EncoderSettings::default();
        assert_eq!(settings.multipart_mode, MultipartMode::Strict);
        assert_eq!(settings.boundary_length, 32);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn boundary_length_limits() {
        let zero = EncoderSettings {
            boundary_length: 0,
            ..EncoderSettings::default()
        };
        assert!(zero.validate().is_err());

        let too_long = EncoderSettings {
            boundary_length: MAX_BOUNDARY_LENGTH + 1,
            ..EncoderSettings::default()
        };
        assert!(matches!(
            too_long.validate(),
            Err(DomainError::InvalidSettings(_))
        ));
    }

    #[test]
    fn mode_names() {
        assert_eq!(MultipartMode::from_name("STRICT"), Some(MultipartMode::Strict));
        assert_eq!(
            MultipartMode::from_name("browser-compatible"),
            Some(MultipartMode::BrowserCompatible)
        );
        assert_eq!(MultipartMode::from_name("lenient"), None);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let settings: EncoderSettings =
            serde_json::from_str(r#"{"multipart_mode": "browser_compatible"}"#)
                .unwrap_or_default();
        assert_eq!(settings.multipart_mode, MultipartMode::BrowserCompatible);
        assert_eq!(settings.boundary_length, 32);
    }
}
