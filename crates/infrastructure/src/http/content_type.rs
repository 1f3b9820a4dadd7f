//! Structured content types.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use mime::Mime;

use super::error::{EntityError, EntityResult};

const CHARSET: &str = "charset";

/// A parsed media type with its charset and remaining parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentType {
    mime_type: String,
    charset: Option<String>,
    parameters: Vec<(String, String)>,
}

impl ContentType {
    /// Parses a media type such as `text/plain; charset=UTF-8`.
    ///
    /// The `type/subtype` essence is lower-cased. A `charset` parameter is
    /// lifted into [`ContentType::charset`] keeping the caller's spelling;
    /// other parameters keep their order. Quoted values are unescaped.
    ///
    /// # Errors
    ///
    /// Returns `EntityError::InvalidContentType` if the input is not a
    /// valid media type.
    pub fn parse(media_type: &str) -> EntityResult<Self> {
        let parsed: Mime = media_type
            .trim()
            .parse()
            .map_err(|e: mime::FromStrError| EntityError::InvalidContentType {
                value: media_type.to_string(),
                message: e.to_string(),
            })?;

        let mut charset = None;
        let mut parameters = Vec::new();
        for (name, value) in parsed.params() {
            // mime strips the quotes but leaves backslash escapes in place
            let value = unescape(value.as_str());
            if name.as_str().eq_ignore_ascii_case(CHARSET) {
                charset = Some(match raw_charset(media_type) {
                    Some(raw) if raw.eq_ignore_ascii_case(&value) => raw,
                    _ => value,
                });
            } else {
                parameters.push((name.as_str().to_ascii_lowercase(), value));
            }
        }

        Ok(Self {
            mime_type: parsed.essence_str().to_ascii_lowercase(),
            charset,
            parameters,
        })
    }

    /// Returns the lower-cased `type/subtype`.
    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Returns the charset, if any.
    #[must_use]
    pub fn charset(&self) -> Option<&str> {
        self.charset.as_deref()
    }

    /// Returns a parameter other than the charset.
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Iterates over parameters other than the charset, in order.
    pub fn parameters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.parameters
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Returns a copy with the given charset.
    #[must_use]
    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = Some(charset.into());
        self
    }

    /// Returns a copy with the parameter set, replacing any existing one
    /// of the same name.
    #[must_use]
    pub fn with_parameter(mut self, name: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        if name.eq_ignore_ascii_case(CHARSET) {
            self.charset = Some(value);
            return self;
        }
        match self
            .parameters
            .iter_mut()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
        {
            Some((_, existing)) => *existing = value,
            None => self.parameters.push((name.to_ascii_lowercase(), value)),
        }
        self
    }
}

/// Parses a caller-supplied media type into a [`ContentType`].
///
/// # Errors
///
/// Returns `EntityError::InvalidContentType` for malformed input.
pub fn create_content_type(media_type: &str) -> EntityResult<ContentType> {
    ContentType::parse(media_type)
}

impl FromStr for ContentType {
    type Err = EntityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.mime_type)?;
        if let Some(charset) = &self.charset {
            write!(f, "; {CHARSET}={}", quote_if_needed(charset))?;
        }
        for (name, value) in &self.parameters {
            write!(f, "; {name}={}", quote_if_needed(value))?;
        }
        Ok(())
    }
}

/// Finds the charset value as written, since mime lower-cases it.
fn raw_charset(media_type: &str) -> Option<String> {
    split_parameters(media_type)
        .skip(1)
        .filter_map(|param| param.split_once('='))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case(CHARSET))
        .map(|(_, value)| {
            let value = value.trim();
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .unwrap_or(value);
            unescape(value)
        })
}

/// Splits on `;` outside quoted strings.
fn split_parameters(media_type: &str) -> impl Iterator<Item = &str> {
    let mut quoted = false;
    let mut escaped = false;
    media_type.split(move |c| {
        if escaped {
            escaped = false;
        } else if quoted && c == '\\' {
            escaped = true;
        } else if c == '"' {
            quoted = !quoted;
        } else if c == ';' && !quoted {
            return true;
        }
        false
    })
}

/// Removes quoted-pair backslashes.
fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.extend(chars.next()),
            other => out.push(other),
        }
    }
    out
}

/// Quotes a parameter value unless it is a plain RFC 2045 token.
fn quote_if_needed(value: &str) -> Cow<'_, str> {
    let is_token = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_graphic() && !"()<>@,;:\\\"/[]?=".contains(c));
    if is_token {
        Cow::Borrowed(value)
    } else {
        let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
        Cow::Owned(format!("\"{escaped}\""))
    }
}
