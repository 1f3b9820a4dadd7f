//! Script values carried by request bodies.

use std::fmt;
use std::io::{self, Read};

use serde_json::Value as JsonValue;

/// Media type used for JSON values.
pub const APPLICATION_JSON: &str = "application/json";
/// Media type used for XML values.
pub const APPLICATION_XML: &str = "application/xml";
/// Media type used for raw bytes and streams.
pub const APPLICATION_OCTET_STREAM: &str = "application/octet-stream";
/// Media type used for plain strings.
pub const TEXT_PLAIN: &str = "text/plain";

/// A one-shot readable byte source.
///
/// Streams can only be consumed once, so this type is neither `Clone`
/// nor comparable.
pub struct ByteStream(Box<dyn Read + Send>);

impl ByteStream {
    /// Wraps a reader.
    #[must_use]
    pub fn new(reader: impl Read + Send + 'static) -> Self {
        Self(Box::new(reader))
    }

    /// Reads the stream to its end.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the read fails.
    pub fn read_all(mut self) -> io::Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.0.read_to_end(&mut buffer)?;
        Ok(buffer)
    }
}

impl Read for ByteStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0.read(buf)
    }
}

impl fmt::Debug for ByteStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ByteStream(..)")
    }
}

/// A value produced by a test script.
#[derive(Debug)]
pub enum ScriptValue {
    /// No value.
    Null,
    /// Plain text.
    String(String),
    /// A JSON document, list or primitive.
    Json(JsonValue),
    /// A serialized XML document.
    Xml(String),
    /// Raw bytes.
    Bytes(Vec<u8>),
    /// A readable stream.
    Stream(ByteStream),
}

impl ScriptValue {
    /// Wraps a reader as a stream value.
    #[must_use]
    pub fn stream(reader: impl Read + Send + 'static) -> Self {
        Self::Stream(ByteStream::new(reader))
    }

    /// Returns true for `Null` and for a JSON `null`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null | Self::Json(JsonValue::Null))
    }

    /// Returns true if the value is a stream.
    #[must_use]
    pub const fn is_stream(&self) -> bool {
        matches!(self, Self::Stream(_))
    }

    /// Returns the textual form of the value.
    ///
    /// Null values, including a JSON `null`, render as an empty string.
    /// Streams cannot be read through a shared reference and render as
    /// `<stream>`; use [`ScriptValue::into_bytes`] to consume them.
    #[must_use]
    pub fn as_string(&self) -> String {
        match self {
            Self::Null | Self::Json(JsonValue::Null) => String::new(),
            Self::String(text) | Self::Xml(text) => text.clone(),
            Self::Json(json) => json.to_string(),
            Self::Bytes(bytes) => String::from_utf8_lossy(bytes).into_owned(),
            Self::Stream(_) => "<stream>".to_string(),
        }
    }

    /// Consumes the value and returns its bytes, draining streams.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if a stream cannot be read.
    pub fn into_bytes(self) -> io::Result<Vec<u8>> {
        match self {
            Self::Null | Self::Json(JsonValue::Null) => Ok(Vec::new()),
            Self::String(text) | Self::Xml(text) => Ok(text.into_bytes()),
            Self::Json(json) => Ok(json.to_string().into_bytes()),
            Self::Bytes(bytes) => Ok(bytes),
            Self::Stream(stream) => stream.read_all(),
        }
    }

    /// Returns the media type inferred from the kind of value.
    ///
    /// A JSON `null` is treated like `Null`.
    #[must_use]
    pub const fn content_type(&self) -> &'static str {
        match self {
            Self::String(_) | Self::Null | Self::Json(JsonValue::Null) => TEXT_PLAIN,
            Self::Json(_) => APPLICATION_JSON,
            Self::Xml(_) => APPLICATION_XML,
            Self::Bytes(_) | Self::Stream(_) => APPLICATION_OCTET_STREAM,
        }
    }
}

impl From<&str> for ScriptValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ScriptValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<JsonValue> for ScriptValue {
    fn from(value: JsonValue) -> Self {
        Self::Json(value)
    }
}

impl From<Vec<u8>> for ScriptValue {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}
