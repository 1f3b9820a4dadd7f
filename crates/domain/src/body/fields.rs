//! Multi-valued form fields.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Insertion-ordered map from field name to a list of values.
///
/// A `None` list means the field is present but carries no value at all,
/// which is distinct from an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MultiValuedMap {
    entries: IndexMap<String, Option<Vec<JsonValue>>>,
}

impl MultiValuedMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value to the field, creating the list if needed.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<JsonValue>) {
        self.entries
            .entry(key.into())
            .or_insert(None)
            .get_or_insert_with(Vec::new)
            .push(value.into());
    }

    /// Replaces the values of a field.
    pub fn put(&mut self, key: impl Into<String>, values: Vec<JsonValue>) {
        self.entries.insert(key.into(), Some(values));
    }

    /// Sets a field with no value list.
    pub fn put_null(&mut self, key: impl Into<String>) {
        self.entries.insert(key.into(), None);
    }

    /// Returns the values of a field.
    ///
    /// The outer `Option` is `None` when the key is missing; the inner one
    /// is `None` when the field has a null value list.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Option<&[JsonValue]>> {
        self.entries.get(key).map(Option::as_deref)
    }

    /// Returns the first value of a field, if any.
    #[must_use]
    pub fn first(&self, key: &str) -> Option<&JsonValue> {
        self.entries.get(key)?.as_ref()?.first()
    }

    /// Removes a field, keeping the order of the remaining ones.
    pub fn remove(&mut self, key: &str) -> Option<Option<Vec<JsonValue>>> {
        self.entries.shift_remove(key)
    }

    /// Returns true if the field is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&[JsonValue]>)> {
        self.entries
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_deref()))
    }
}

impl<K: Into<String>, V: Into<JsonValue>> FromIterator<(K, V)> for MultiValuedMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.add(key, value);
        }
        map
    }
}
