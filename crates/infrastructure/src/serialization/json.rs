//! JSON helpers for settings files and CLI output.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Error type for serialization operations.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// JSON deserialization failed.
    #[error("JSON deserialization failed: {0}")]
    Deserialize(serde_json::Error),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Serializes a value to pretty JSON with 2-space indentation and a
/// trailing newline.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_stable<T: Serialize>(value: &T) -> Result<String, SerializationError> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;

    let mut json = String::from_utf8(buffer)?;
    json.push('\n');
    Ok(json)
}

/// Deserializes JSON from bytes.
///
/// # Errors
///
/// Returns an error if the JSON is invalid or doesn't match the expected type.
pub fn from_json_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SerializationError> {
    serde_json::from_slice(bytes).map_err(SerializationError::Deserialize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wirebody_domain::{EncoderSettings, MultipartMode};

    #[test]
    fn settings_serialize_with_two_space_indent_and_newline() {
        let json = to_json_stable(&EncoderSettings::default()).expect("serialization should work");
        assert_eq!(
            json,
            "{\n  \"multipart_mode\": \"strict\",\n  \"boundary_length\": 32\n}\n"
        );
    }

    #[test]
    fn settings_read_back() {
        let json = br#"{"multipart_mode": "browser_compatible", "boundary_length": 40}"#;
        let settings: EncoderSettings = from_json_bytes(json).expect("deserialization should work");
        assert_eq!(settings.multipart_mode, MultipartMode::BrowserCompatible);
        assert_eq!(settings.boundary_length, 40);
    }

    #[test]
    fn invalid_json_is_a_deserialize_error() {
        let result: Result<EncoderSettings, _> = from_json_bytes(b"{\"boundary_length\": }");
        assert!(matches!(result, Err(SerializationError::Deserialize(_))));
    }
}
