//! HTTP body representation used by test scripts.

use std::io::Read;

use super::{MultiPartItem, MultiValuedMap};
use crate::value::ByteStream;

/// Media type of URL-encoded form bodies.
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
/// Media type of multipart form bodies.
pub const MULTIPART_FORM_DATA: &str = "multipart/form-data";

/// What an [`HttpBody`] carries.
#[derive(Debug)]
pub enum BodyContent {
    /// Raw bytes.
    Bytes(Vec<u8>),
    /// A one-shot stream.
    Stream(ByteStream),
    /// Form fields to be URL-encoded.
    Fields(MultiValuedMap),
    /// Multipart items.
    Parts(Vec<MultiPartItem>),
}

/// HTTP body with its content and optional content type.
#[derive(Debug)]
pub struct HttpBody {
    content: BodyContent,
    content_type: Option<String>,
}

impl HttpBody {
    /// Creates a body from raw bytes.
    #[must_use]
    pub const fn bytes(bytes: Vec<u8>, content_type: Option<String>) -> Self {
        Self {
            content: BodyContent::Bytes(bytes),
            content_type,
        }
    }

    /// Creates a body from text.
    #[must_use]
    pub fn string(text: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self {
            content: BodyContent::Bytes(text.into().into_bytes()),
            content_type: Some(content_type.into()),
        }
    }

    /// Creates a body backed by a reader.
    #[must_use]
    pub fn stream(reader: impl Read + Send + 'static, content_type: Option<String>) -> Self {
        Self {
            content: BodyContent::Stream(ByteStream::new(reader)),
            content_type,
        }
    }

    /// Creates a URL-encoded form body.
    #[must_use]
    pub const fn form_fields(fields: MultiValuedMap, content_type: Option<String>) -> Self {
        Self {
            content: BodyContent::Fields(fields),
            content_type,
        }
    }

    /// Creates a multipart body.
    #[must_use]
    pub const fn multi_part(items: Vec<MultiPartItem>, content_type: Option<String>) -> Self {
        Self {
            content: BodyContent::Parts(items),
            content_type,
        }
    }

    /// Returns the content type, if known.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Returns the body content.
    #[must_use]
    pub const fn content(&self) -> &BodyContent {
        &self.content
    }

    /// Returns true if the body holds multipart items.
    #[must_use]
    pub const fn is_multi_part(&self) -> bool {
        matches!(self.content, BodyContent::Parts(_))
    }

    /// Returns true if the body holds form fields.
    #[must_use]
    pub const fn is_url_encoded(&self) -> bool {
        matches!(self.content, BodyContent::Fields(_))
    }

    /// Returns true if the body is a stream.
    #[must_use]
    pub const fn is_stream(&self) -> bool {
        matches!(self.content, BodyContent::Stream(_))
    }

    /// Returns the raw bytes for byte bodies.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match &self.content {
            BodyContent::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Returns byte bodies as text, replacing invalid UTF-8.
    #[must_use]
    pub fn as_text(&self) -> Option<String> {
        self.as_bytes()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// Splits the body into its content and content type.
    #[must_use]
    pub fn into_content(self) -> (BodyContent, Option<String>) {
        (self.content, self.content_type)
    }
}
