//! HTTP request entity builder.
//!
//! This module turns the script-level `HttpBody` into a wire-ready `Entity`,
//! picking the encoder that matches what the body carries.

use tracing::debug;
use wirebody_domain::body::{FORM_URLENCODED, MULTIPART_FORM_DATA};
use wirebody_domain::{BodyContent, EncoderSettings, HttpBody};

use super::entity::Entity;
use super::error::EntityResult;
use super::form::form_entity;
use super::multipart::multipart_entity_with;

/// Build an entity from a request body.
///
/// Form fields default to `application/x-www-form-urlencoded` and multipart
/// items to `multipart/form-data` when the body has no content type.
///
/// # Errors
///
/// Returns an error if a stream cannot be read or a multipart body cannot
/// be framed.
pub fn build_entity(body: HttpBody, settings: &EncoderSettings) -> EntityResult<Entity> {
    let (content, content_type) = body.into_content();
    match content {
        BodyContent::Bytes(bytes) => Ok(Entity::new(bytes, content_type)),

        BodyContent::Stream(stream) => {
            let bytes = stream.read_all()?;
            debug!(length = bytes.len(), "drained stream body");
            Ok(Entity::new(bytes, content_type))
        }

        BodyContent::Fields(fields) => Ok(form_entity(
            &fields,
            content_type.as_deref().unwrap_or(FORM_URLENCODED),
        )),

        BodyContent::Parts(items) => multipart_entity_with(
            items,
            content_type.as_deref().unwrap_or(MULTIPART_FORM_DATA),
            settings,
        ),
    }
}
