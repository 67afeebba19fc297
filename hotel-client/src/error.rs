//! Client error types
//!
//! Three kinds of failure reach the caller: payloads rejected locally
//! before any request ([`ClientError::Validation`]), transport failures
//! ([`ClientError::Http`]) and errors reported by the server in the
//! `{ "error": "..." }` body ([`ClientError::Api`]).

use shared::SharedError;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a response was received
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered non-2xx with an `error` message
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rejected locally, no request was made
    #[error("{0}")]
    Validation(String),

    /// Another action on the same record has not finished yet
    #[error("Action already in progress for {0}")]
    Busy(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<SharedError> for ClientError {
    fn from(err: SharedError) -> Self {
        match err {
            SharedError::Validation(msg) | SharedError::UploadRejected(msg) => {
                ClientError::Validation(msg)
            }
        }
    }
}

impl ClientError {
    /// Text shown to the user in a toast.
    ///
    /// Server messages and validation messages pass through verbatim;
    /// transport failures get a generic message (details go to the log).
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Api { message, .. } => message.clone(),
            ClientError::Validation(msg) => msg.clone(),
            ClientError::Busy(_) => "Please wait for the previous action to finish".to_string(),
            ClientError::Unauthorized => "Your session has expired, please sign in again".to_string(),
            ClientError::NotFound(_) => "The item no longer exists".to_string(),
            ClientError::Http(_)
            | ClientError::InvalidResponse(_)
            | ClientError::Internal(_)
            | ClientError::Serialization(_) => {
                "Something went wrong, please try again".to_string()
            }
        }
    }

    /// Whether the failure happened before any request was sent
    pub fn is_local(&self) -> bool {
        matches!(self, ClientError::Validation(_) | ClientError::Busy(_))
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
