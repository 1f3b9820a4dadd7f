//! Multipart entities.
//!
//! Items that all carry a name become `multipart/form-data`. A single
//! unnamed item switches the whole body to `multipart/related`, where parts
//! are framed by content type alone.

use std::borrow::Cow;
use std::io::Write;

use tracing::debug;
use wirebody_domain::{EncoderSettings, MultiPartItem, MultipartMode};

use super::boundary::generate_boundary;
use super::content_type::create_content_type;
use super::entity::Entity;
use super::error::EntityResult;

const CRLF: &[u8] = b"\r\n";

/// Builds a multipart entity with default settings.
///
/// # Errors
///
/// Returns an error if `media_type` or an item content type is malformed,
/// or if a stream part cannot be read.
pub fn multipart_entity(items: Vec<MultiPartItem>, media_type: &str) -> EntityResult<Entity> {
    multipart_entity_with(items, media_type, &EncoderSettings::default())
}

/// Builds a multipart entity.
///
/// The entity content type is `media_type` with a freshly generated
/// `boundary` parameter.
///
/// # Errors
///
/// Returns an error if the settings are invalid, if `media_type` or an item
/// content type is malformed, or if a stream part cannot be read.
pub fn multipart_entity_with(
    items: Vec<MultiPartItem>,
    media_type: &str,
    settings: &EncoderSettings,
) -> EntityResult<Entity> {
    settings.validate()?;
    let boundary = generate_boundary(settings.boundary_length);
    let content_type = create_content_type(media_type)?.with_parameter("boundary", &boundary);

    let content = if items.iter().any(|item| item.name().is_none()) {
        debug!(parts = items.len(), "building multipart/related entity");
        related_content(items, &boundary)?
    } else {
        debug!(
            parts = items.len(),
            mode = ?settings.multipart_mode,
            "building multipart/form-data entity"
        );
        form_data_content(items, &boundary, settings.multipart_mode)?
    };

    Ok(Entity::new(content, Some(content_type.to_string())))
}

/// Frames items as `multipart/related`, keeping null values as empty parts.
fn related_content(items: Vec<MultiPartItem>, boundary: &str) -> EntityResult<Vec<u8>> {
    let mut out = Vec::new();
    for (index, item) in items.into_iter().enumerate() {
        if index > 0 {
            out.extend_from_slice(CRLF);
        }
        write!(out, "--{boundary}\r\n")?;
        write!(out, "Content-Type: {}\r\n", item.effective_content_type())?;
        if let Some(name) = item.name() {
            out.extend_from_slice(b"Content-Disposition: form-data");
            if let Some(filename) = item.filename() {
                write!(out, "; filename=\"{}\"", escape_quoted(filename))?;
            }
            write!(out, "; name=\"{}\"\r\n", escape_quoted(name))?;
        }
        out.extend_from_slice(CRLF);
        out.extend(item.into_value().into_bytes()?);
    }
    write!(out, "\r\n--{boundary}--\r\n")?;
    Ok(out)
}

/// Frames named items as `multipart/form-data`, skipping null values.
fn form_data_content(
    items: Vec<MultiPartItem>,
    boundary: &str,
    mode: MultipartMode,
) -> EntityResult<Vec<u8>> {
    let mut out = Vec::new();
    for item in items {
        let Some(name) = item.name() else {
            continue;
        };
        if item.value().is_null() {
            debug!(part = name, "skipping multipart item with null value");
            continue;
        }

        let binary = item.filename().is_some() || item.value().is_stream();
        let content_type = create_content_type(item.effective_content_type())?;

        write!(out, "--{boundary}\r\n")?;
        write!(
            out,
            "Content-Disposition: form-data; name=\"{}\"",
            escape_quoted(name)
        )?;
        if let Some(filename) = item.filename() {
            write!(out, "; filename=\"{}\"", escape_quoted(filename))?;
        }
        out.extend_from_slice(CRLF);
        if mode.is_strict() || item.filename().is_some() {
            write!(out, "Content-Type: {content_type}\r\n")?;
        }
        if mode.is_strict() {
            let encoding = if binary { "binary" } else { "8bit" };
            write!(out, "Content-Transfer-Encoding: {encoding}\r\n")?;
        }
        out.extend_from_slice(CRLF);
        out.extend(item.into_value().into_bytes()?);
        out.extend_from_slice(CRLF);
    }
    write!(out, "--{boundary}--\r\n")?;
    Ok(out)
}

/// Percent-escapes characters that would break a quoted disposition value.
fn escape_quoted(value: &str) -> Cow<'_, str> {
    if value.contains(['"', '\r', '\n']) {
        Cow::Owned(
            value
                .replace('"', "%22")
                .replace('\r', "%0D")
                .replace('\n', "%0A"),
        )
    } else {
        Cow::Borrowed(value)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::http::content_type::ContentType;
    use crate::http::error::EntityError;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;
    use wirebody_domain::ScriptValue;

    fn boundary_of(entity: &Entity) -> String {
        let ct = ContentType::parse(entity.content_type().unwrap()).unwrap();
        ct.parameter("boundary").unwrap().to_string()
    }

    fn text_of(entity: &Entity) -> String {
        String::from_utf8(entity.content().to_vec()).unwrap()
    }

    #[test]
    fn form_data_strict_layout() {
        let items = vec![
            MultiPartItem::new("greeting", "hello"),
            MultiPartItem::new("doc", serde_json::json!({"a": 1})),
        ];
        let entity = multipart_entity(items, "multipart/form-data").unwrap();
        let b = boundary_of(&entity);

        assert_eq!(
            entity.content_type().unwrap(),
            format!("multipart/form-data; boundary={b}")
        );
        let expected = format!(
            "--{b}\r\n\
             Content-Disposition: form-data; name=\"greeting\"\r\n\
             Content-Type: text/plain\r\n\
             Content-Transfer-Encoding: 8bit\r\n\
             \r\n\
             hello\r\n\
             --{b}\r\n\
             Content-Disposition: form-data; name=\"doc\"\r\n\
             Content-Type: application/json\r\n\
             Content-Transfer-Encoding: 8bit\r\n\
             \r\n\
             {{\"a\":1}}\r\n\
             --{b}--\r\n"
        );
        assert_eq!(text_of(&entity), expected);
    }

    #[test]
    fn form_data_file_part() {
        let items = vec![
            MultiPartItem::new("upload", ScriptValue::stream(Cursor::new(b"abc".to_vec())))
                .with_filename("a.bin"),
        ];
        let entity = multipart_entity(items, "multipart/form-data").unwrap();
        let b = boundary_of(&entity);
        let expected = format!(
            "--{b}\r\n\
             Content-Disposition: form-data; name=\"upload\"; filename=\"a.bin\"\r\n\
             Content-Type: application/octet-stream\r\n\
             Content-Transfer-Encoding: binary\r\n\
             \r\n\
             abc\r\n\
             --{b}--\r\n"
        );
        assert_eq!(text_of(&entity), expected);
    }

    #[test]
    fn browser_compatible_omits_headers_for_text_parts() {
        let settings = EncoderSettings {
            multipart_mode: MultipartMode::BrowserCompatible,
            ..EncoderSettings::default()
        };
        let items = vec![
            MultiPartItem::new("note", "hi"),
            MultiPartItem::new("file", "data")
                .with_filename("n.txt")
                .with_content_type("text/plain"),
        ];
        let entity = multipart_entity_with(items, "multipart/form-data", &settings).unwrap();
        let b = boundary_of(&entity);
        let expected = format!(
            "--{b}\r\n\
             Content-Disposition: form-data; name=\"note\"\r\n\
             \r\n\
             hi\r\n\
             --{b}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"n.txt\"\r\n\
             Content-Type: text/plain\r\n\
             \r\n\
             data\r\n\
             --{b}--\r\n"
        );
        assert_eq!(text_of(&entity), expected);
    }

    #[test]
    fn null_items_are_skipped() {
        let items = vec![
            MultiPartItem::new("gone", ScriptValue::Null),
            MultiPartItem::new("also_gone", serde_json::Value::Null),
        ];
        let entity = multipart_entity(items, "multipart/form-data").unwrap();
        let b = boundary_of(&entity);
        assert_eq!(text_of(&entity), format!("--{b}--\r\n"));
    }

    #[test]
    fn unnamed_item_switches_to_related() {
        let items = vec![
            MultiPartItem::unnamed(serde_json::json!({"id": 7})),
            MultiPartItem::new("meta", "<m/>")
                .with_content_type("application/xml")
                .with_filename("m.xml"),
        ];
        let entity = multipart_entity(items, "multipart/related").unwrap();
        let b = boundary_of(&entity);
        assert_eq!(
            entity.content_type().unwrap(),
            format!("multipart/related; boundary={b}")
        );
        let expected = format!(
            "--{b}\r\n\
             Content-Type: application/json\r\n\
             \r\n\
             {{\"id\":7}}\r\n\
             --{b}\r\n\
             Content-Type: application/xml\r\n\
             Content-Disposition: form-data; filename=\"m.xml\"; name=\"meta\"\r\n\
             \r\n\
             <m/>\r\n\
             --{b}--\r\n"
        );
        assert_eq!(text_of(&entity), expected);
    }

    #[test]
    fn related_null_items_are_empty_parts() {
        let items = vec![
            MultiPartItem::unnamed(serde_json::Value::Null),
            MultiPartItem::unnamed(ScriptValue::Null),
        ];
        let entity = multipart_entity(items, "multipart/related").unwrap();
        let b = boundary_of(&entity);
        let expected = format!(
            "--{b}\r\n\
             Content-Type: text/plain\r\n\
             \r\n\
             \r\n\
             --{b}\r\n\
             Content-Type: text/plain\r\n\
             \r\n\
             \r\n\
             --{b}--\r\n"
        );
        assert_eq!(text_of(&entity), expected);
    }

    #[test]
    fn related_keeps_charset_and_parameters() {
        let items = vec![MultiPartItem::unnamed("x")];
        let entity = multipart_entity(
            items,
            r#"multipart/related; type="text/plain"; charset=UTF-8"#,
        )
        .unwrap();
        let ct = ContentType::parse(entity.content_type().unwrap()).unwrap();
        assert_eq!(ct.mime_type(), "multipart/related");
        assert_eq!(ct.parameter("type"), Some("text/plain"));
        assert_eq!(ct.charset(), Some("UTF-8"));
        assert!(ct.parameter("boundary").is_some());
    }

    #[test]
    fn boundary_length_follows_settings() {
        let settings = EncoderSettings {
            boundary_length: 50,
            ..EncoderSettings::default()
        };
        let entity = multipart_entity_with(
            vec![MultiPartItem::new("a", "b")],
            "multipart/form-data",
            &settings,
        )
        .unwrap();
        assert_eq!(boundary_of(&entity).len(), 50);
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let settings = EncoderSettings {
            boundary_length: 0,
            ..EncoderSettings::default()
        };
        let result = multipart_entity_with(Vec::new(), "multipart/form-data", &settings);
        assert!(matches!(result, Err(EntityError::Settings(_))));
    }

    #[test]
    fn malformed_media_types_are_rejected() {
        let result = multipart_entity(Vec::new(), "multipart");
        assert!(matches!(result, Err(EntityError::InvalidContentType { .. })));

        let items = vec![MultiPartItem::new("a", "b").with_content_type("bogus")];
        let result = multipart_entity(items, "multipart/form-data");
        assert!(matches!(result, Err(EntityError::InvalidContentType { .. })));
    }

    #[test]
    fn names_are_escaped() {
        assert_eq!(escape_quoted("plain"), "plain");
        assert_eq!(escape_quoted("a\"b\r\nc"), "a%22b%0D%0Ac");
    }
}
