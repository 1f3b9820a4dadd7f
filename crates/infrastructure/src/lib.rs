//! Wirebody Infrastructure - Adapters and implementations
//!
//! This crate turns script-level bodies into wire-ready entities for
//! `reqwest`, reads response entities back, and persists encoder settings.

pub mod http;
pub mod persistence;
pub mod serialization;

pub use http::{
    ContentType, Entity, EntityError, EntityResult, body_from_response, build_entity,
    create_content_type, form_entity, multipart_entity, multipart_entity_with, to_body,
};
pub use persistence::{SettingsError, SettingsRepository};
pub use serialization::{SerializationError, from_json_bytes, to_json_stable};
