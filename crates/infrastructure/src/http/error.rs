//! Entity construction errors.

use wirebody_domain::DomainError;

/// Error type for entity construction and conversion.
#[derive(Debug, thiserror::Error)]
pub enum EntityError {
    /// A media type could not be parsed.
    #[error("invalid content type '{value}': {message}")]
    InvalidContentType {
        /// The rejected input.
        value: String,
        /// Parser message.
        message: String,
    },

    /// Reading a stream or file part failed.
    #[error("failed to read stream: {0}")]
    Stream(#[from] std::io::Error),

    /// Reading a response entity failed.
    #[error("failed to read response body: {0}")]
    Response(String),

    /// Encoder settings were rejected.
    #[error(transparent)]
    Settings(#[from] DomainError),
}

/// Result type alias for entity operations.
pub type EntityResult<T> = Result<T, EntityError>;
