//! Wire-ready entities.

use reqwest::RequestBuilder;
use reqwest::header::CONTENT_TYPE;
use wirebody_domain::HttpBody;

/// A wire-ready HTTP message body: encoded bytes plus the value of the
/// `Content-Type` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    content: Vec<u8>,
    content_type: Option<String>,
}

impl Entity {
    /// Creates an entity from encoded bytes.
    #[must_use]
    pub fn new(content: impl Into<Vec<u8>>, content_type: Option<String>) -> Self {
        Self {
            content: content.into(),
            content_type,
        }
    }

    /// Returns the encoded bytes.
    #[must_use]
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Returns the `Content-Type` header value.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Returns the content length in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.content.len()
    }

    /// Returns true if the entity has no content.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Splits the entity into bytes and content type.
    #[must_use]
    pub fn into_parts(self) -> (Vec<u8>, Option<String>) {
        (self.content, self.content_type)
    }

    /// Copies the entity into a byte body.
    #[must_use]
    pub fn to_body(&self) -> HttpBody {
        HttpBody::bytes(self.content.clone(), self.content_type.clone())
    }

    /// Converts the entity into a byte body without copying.
    #[must_use]
    pub fn into_body(self) -> HttpBody {
        HttpBody::bytes(self.content, self.content_type)
    }

    /// Attaches the entity to a request, setting `Content-Type` when known.
    #[must_use]
    pub fn apply(self, builder: RequestBuilder) -> RequestBuilder {
        let builder = match &self.content_type {
            Some(content_type) => builder.header(CONTENT_TYPE, content_type.as_str()),
            None => builder,
        };
        builder.body(reqwest::Body::from(self))
    }
}

impl From<Entity> for reqwest::Body {
    fn from(entity: Entity) -> Self {
        Self::from(entity.content)
    }
}

/// Reads an entity back into the body representation.
#[must_use]
pub fn to_body(entity: &Entity) -> HttpBody {
    entity.to_body()
}
