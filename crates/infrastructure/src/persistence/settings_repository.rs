//! Encoder settings persistence.
//!
//! Stores settings in the platform-specific config directory:
//! - Linux/macOS: ~/.config/wirebody/settings.json
//! - Windows: %APPDATA%/wirebody/settings.json
//!
//! Values read from disk can be overridden by `WIREBODY_MULTIPART_MODE`
//! and `WIREBODY_BOUNDARY_LENGTH`.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::debug;
use wirebody_domain::{DomainError, EncoderSettings, MultipartMode};

use crate::serialization::{SerializationError, from_json_bytes, to_json_stable};

/// Environment variable overriding the multipart mode.
pub const MULTIPART_MODE_VAR: &str = "WIREBODY_MULTIPART_MODE";
/// Environment variable overriding the boundary length.
pub const BOUNDARY_LENGTH_VAR: &str = "WIREBODY_BOUNDARY_LENGTH";

/// Error type for settings operations.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),

    /// The loaded settings failed validation.
    #[error(transparent)]
    Invalid(#[from] DomainError),

    /// An environment override could not be parsed.
    #[error("invalid value for {variable}: {value}")]
    InvalidOverride {
        /// Name of the variable.
        variable: &'static str,
        /// The rejected value.
        value: String,
    },

    /// Could not determine config directory.
    #[error("Could not determine config directory")]
    NoConfigDir,
}

/// Repository for encoder settings persistence.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    path: Option<PathBuf>,
}

impl SettingsRepository {
    /// Creates a repository backed by the default settings file.
    #[must_use]
    pub fn new() -> Self {
        Self {
            path: Self::default_path(),
        }
    }

    /// Creates a repository backed by an explicit file.
    #[must_use]
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Returns the default settings file location, if a config directory
    /// exists on this platform.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("wirebody").join("settings.json"))
    }

    /// Returns the file this repository reads and writes.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Loads settings from disk, then applies environment overrides and
    /// validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, an override
    /// is malformed, or the final settings are invalid.
    pub async fn load(&self) -> Result<EncoderSettings, SettingsError> {
        let settings = self.load_file().await?;
        let settings = apply_overrides(settings, |name| std::env::var(name).ok())?;
        settings.validate()?;
        Ok(settings)
    }

    /// Loads settings from disk only.
    ///
    /// Returns default settings if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load_file(&self) -> Result<EncoderSettings, SettingsError> {
        let Some(path) = &self.path else {
            return Ok(EncoderSettings::default());
        };

        if !fs::try_exists(path).await? {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(EncoderSettings::default());
        }

        let content = fs::read(path).await?;
        let settings = from_json_bytes(&content)?;
        debug!(path = %path.display(), "loaded encoder settings");
        Ok(settings)
    }

    /// Validates and saves settings to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are invalid, no path is known, or
    /// the file cannot be written.
    pub async fn save(&self, settings: &EncoderSettings) -> Result<(), SettingsError> {
        settings.validate()?;
        let Some(path) = &self.path else {
            return Err(SettingsError::NoConfigDir);
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = to_json_stable(settings)?;
        fs::write(path, content).await?;

        Ok(())
    }
}

impl Default for SettingsRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies overrides looked up by variable name.
///
/// # Errors
///
/// Returns `SettingsError::InvalidOverride` if a variable is set to a value
/// that cannot be parsed.
pub fn apply_overrides(
    mut settings: EncoderSettings,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<EncoderSettings, SettingsError> {
    if let Some(value) = lookup(MULTIPART_MODE_VAR) {
        settings.multipart_mode =
            MultipartMode::from_name(&value).ok_or_else(|| SettingsError::InvalidOverride {
                variable: MULTIPART_MODE_VAR,
                value: value.clone(),
            })?;
    }

    if let Some(value) = lookup(BOUNDARY_LENGTH_VAR) {
        settings.boundary_length =
            value
                .trim()
                .parse()
                .map_err(|_| SettingsError::InvalidOverride {
                    variable: BOUNDARY_LENGTH_VAR,
                    value: value.clone(),
                })?;
    }

    Ok(settings)
}
