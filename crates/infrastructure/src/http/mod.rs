//! HTTP entity adapters.
//!
//! This module provides:
//! - URL-encoded and multipart entity construction
//! - Content-type parsing
//! - Conversion of request and response entities back into bodies

mod body_builder;
mod boundary;
mod content_type;
mod entity;
mod error;
mod form;
mod multipart;
mod response;

pub use body_builder::build_entity;
pub use boundary::generate_boundary;
pub use content_type::{ContentType, create_content_type};
pub use entity::{Entity, to_body};
pub use error::{EntityError, EntityResult};
pub use form::form_entity;
pub use multipart::{multipart_entity, multipart_entity_with};
pub use response::body_from_response;
