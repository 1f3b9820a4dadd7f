//! URL-encoded form entities.

use serde_json::Value as JsonValue;
use tracing::debug;
use url::form_urlencoded::byte_serialize;
use wirebody_domain::MultiValuedMap;

use super::entity::Entity;

/// Builds an `application/x-www-form-urlencoded` entity from form fields.
///
/// Fields keep their insertion order. A field with a null value list (or a
/// single null value) is written as a bare name without `=`; several values
/// are joined with `,`. The entity carries `media_type` verbatim as its
/// content type.
///
/// Names and values are always percent-encoded as UTF-8, whatever charset
/// `media_type` names. Servers expecting ISO-8859-1 form data will see
/// multi-byte sequences for non-ASCII characters.
#[must_use]
pub fn form_entity(fields: &MultiValuedMap, media_type: &str) -> Entity {
    let mut encoded = String::new();
    for (index, (name, values)) in fields.iter().enumerate() {
        if index > 0 {
            encoded.push('&');
        }
        encoded.extend(byte_serialize(name.as_bytes()));
        if let Some(value) = field_value(values) {
            encoded.push('=');
            encoded.extend(byte_serialize(value.as_bytes()));
        }
    }

    debug!(
        fields = fields.len(),
        length = encoded.len(),
        "built url-encoded entity"
    );
    Entity::new(encoded, Some(media_type.to_string()))
}

fn field_value(values: Option<&[JsonValue]>) -> Option<String> {
    match values? {
        [single] => scalar_text(single),
        many => Some(
            many.iter()
                .map(|value| scalar_text(value).unwrap_or_default())
                .collect::<Vec<_>>()
                .join(","),
        ),
    }
}

fn scalar_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::Null => None,
        JsonValue::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn encode(fields: &MultiValuedMap) -> String {
        let entity = form_entity(fields, "application/x-www-form-urlencoded");
        String::from_utf8_lossy(entity.content()).into_owned()
    }

    #[test]
    fn encodes_single_values_in_order() {
        let fields: MultiValuedMap = [("username", "john"), ("password", "s3cret")]
            .into_iter()
            .collect();
        assert_eq!(encode(&fields), "username=john&password=s3cret");
    }

    #[test]
    fn escapes_reserved_characters() {
        let fields: MultiValuedMap = [("q", "a b&c=d"), ("name", "jöhn")].into_iter().collect();
        assert_eq!(encode(&fields), "q=a+b%26c%3Dd&name=j%C3%B6hn");
    }

    #[test]
    fn encodes_utf8_regardless_of_declared_charset() {
        let fields: MultiValuedMap = [("city", "Zürich")].into_iter().collect();
        let entity = form_entity(
            &fields,
            "application/x-www-form-urlencoded; charset=ISO-8859-1",
        );
        assert_eq!(entity.content(), b"city=Z%C3%BCrich");
    }

    #[test]
    fn joins_multiple_values_with_commas() {
        let mut fields = MultiValuedMap::new();
        fields.put("ids", vec![json!(1), json!("two"), json!(null)]);
        assert_eq!(encode(&fields), "ids=1%2Ctwo%2C");
    }

    #[test]
    fn null_values_become_bare_names() {
        let mut fields = MultiValuedMap::new();
        fields.put_null("flag");
        fields.put("other", vec![json!(null)]);
        fields.put("empty", Vec::new());
        assert_eq!(encode(&fields), "flag&other&empty=");
    }

    #[test]
    fn non_string_scalars_use_json_text() {
        let mut fields = MultiValuedMap::new();
        fields.add("count", 3);
        fields.add("active", true);
        assert_eq!(encode(&fields), "count=3&active=true");
    }

    #[test]
    fn media_type_is_passed_through() {
        let entity = form_entity(
            &MultiValuedMap::new(),
            "application/x-www-form-urlencoded; charset=UTF-8",
        );
        assert!(entity.is_empty());
        assert_eq!(
            entity.content_type(),
            Some("application/x-www-form-urlencoded; charset=UTF-8")
        );
    }
}
