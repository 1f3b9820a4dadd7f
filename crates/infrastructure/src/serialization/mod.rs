//! Deterministic JSON serialization.

mod json;

pub use json::*;
