//! Multipart boundary generation.

use rand::Rng;
use rand::distr::Alphanumeric;

/// Generates a random boundary of `length` alphanumeric characters.
#[must_use]
pub fn generate_boundary(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}
