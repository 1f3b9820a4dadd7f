//! Response entity conversion.

use reqwest::Response;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;
use wirebody_domain::HttpBody;

use super::error::{EntityError, EntityResult};

/// Reads a response entity fully into a byte body.
///
/// The body takes the response's `Content-Type` header, or none when the
/// header is missing or not valid text.
///
/// # Errors
///
/// Returns `EntityError::Response` if the body cannot be read.
pub async fn body_from_response(response: Response) -> EntityResult<HttpBody> {
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let status = response.status().as_u16();

    let bytes = response
        .bytes()
        .await
        .map_err(|e| EntityError::Response(e.to_string()))?;

    debug!(status, length = bytes.len(), "read response entity");
    Ok(HttpBody::bytes(bytes.to_vec(), content_type))
}
