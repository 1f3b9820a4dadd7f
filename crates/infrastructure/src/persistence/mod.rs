//! Persistence implementations for file-based storage.

mod settings_repository;

pub use settings_repository::*;
