//! Multipart body items.

use crate::value::ScriptValue;

/// One part of a multipart body.
///
/// Items without a name cannot be expressed as `multipart/form-data`
/// and switch the whole body to `multipart/related`.
#[derive(Debug)]
pub struct MultiPartItem {
    name: Option<String>,
    value: ScriptValue,
    filename: Option<String>,
    content_type: Option<String>,
}

impl MultiPartItem {
    /// Creates a named part.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<ScriptValue>) -> Self {
        Self {
            name: Some(name.into()),
            value: value.into(),
            filename: None,
            content_type: None,
        }
    }

    /// Creates a part without a name.
    #[must_use]
    pub fn unnamed(value: impl Into<ScriptValue>) -> Self {
        Self {
            name: None,
            value: value.into(),
            filename: None,
            content_type: None,
        }
    }

    /// Sets the filename reported in the part's disposition.
    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Sets an explicit content type, overriding the inferred one.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Returns the part name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the part value.
    #[must_use]
    pub const fn value(&self) -> &ScriptValue {
        &self.value
    }

    /// Returns the filename, if set.
    #[must_use]
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// Returns the explicit content type, if set.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Returns the explicit content type or the one inferred from the value.
    #[must_use]
    pub fn effective_content_type(&self) -> &str {
        self.content_type
            .as_deref()
            .unwrap_or_else(|| self.value.content_type())
    }

    /// Consumes the item and returns its value.
    #[must_use]
    pub fn into_value(self) -> ScriptValue {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn explicit_content_type_wins() {
        let item = MultiPartItem::new("doc", "<a/>").with_content_type("application/xml");
        assert_eq!(item.effective_content_type(), "application/xml");
    }

    #[test]
    fn inferred_content_type() {
        let item = MultiPartItem::new("doc", serde_json::json!([1, 2]));
        assert_eq!(item.content_type(), None);
        assert_eq!(item.effective_content_type(), "application/json");
    }

    #[test]
    fn unnamed_item() {
        let item = MultiPartItem::unnamed("hello").with_filename("hello.txt");
        assert_eq!(item.name(), None);
        assert_eq!(item.filename(), Some("hello.txt"));
    }
}
