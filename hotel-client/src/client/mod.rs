//! Transport layer
//!
//! [`HttpClient`] is the seam every higher-level component talks through.
//! [`NetworkHttpClient`] goes over the network with reqwest;
//! [`OneshotHttpClient`] (feature `in-process`) calls an axum `Router`
//! directly, which is how the integration tests drive the stub API.

pub mod http;
#[cfg(feature = "in-process")]
pub mod http_oneshot;

pub use http::{HttpClient, NetworkHttpClient};
#[cfg(feature = "in-process")]
pub use http_oneshot::OneshotHttpClient;

use ::http::StatusCode;
use serde::de::DeserializeOwned;
use shared::ApiErrorBody;

use crate::error::{ClientError, ClientResult};

/// Turn a status and a raw body into the typed result.
///
/// Non-2xx bodies of the form `{ "error": "..." }` become
/// [`ClientError::Api`] with the message untouched. An empty 2xx body
/// decodes as JSON `null`, so `()` works for endpoints that return nothing.
pub(crate) fn decode_response<T: DeserializeOwned>(
    status: StatusCode,
    body: &[u8],
) -> ClientResult<T> {
    if !status.is_success() {
        if let Ok(api_err) = serde_json::from_slice::<ApiErrorBody>(body) {
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: api_err.error,
            });
        }
        let text = String::from_utf8_lossy(body).to_string();
        return match status {
            StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
            StatusCode::NOT_FOUND => Err(ClientError::NotFound(text)),
            StatusCode::BAD_REQUEST => Err(ClientError::Validation(text)),
            _ => Err(ClientError::Internal(format!("{}: {}", status, text))),
        };
    }

    let body = if body.iter().all(u8::is_ascii_whitespace) {
        b"null".as_slice()
    } else {
        body
    };
    serde_json::from_slice(body)
        .map_err(|e| ClientError::InvalidResponse(format!("JSON parse error: {}", e)))
}
