//! Wirebody Domain - Body value types
//!
//! This crate defines the values test scripts attach to requests and
//! receive from responses. All types here are pure Rust with no network
//! dependencies.

pub mod body;
pub mod error;
pub mod settings;
pub mod value;

pub use body::{BodyContent, HttpBody, MultiPartItem, MultiValuedMap};
pub use error::{DomainError, DomainResult};
pub use settings::{EncoderSettings, MultipartMode};
pub use value::{ByteStream, ScriptValue};
