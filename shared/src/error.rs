//! Error types for the shared crate
//!
//! The site API reports failures as a non-2xx status with a JSON body of the
//! shape `{ "error": "..." }`. Client-side validation failures are reported
//! through [`SharedError`] before any request is made.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body returned by the site API on non-2xx responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}

impl ApiErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Errors raised while checking payloads locally
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SharedError {
    /// One or more fields failed validation
    #[error("{0}")]
    Validation(String),

    /// Upload rejected before it left the client
    #[error("{0}")]
    UploadRejected(String),
}

impl From<validator::ValidationErrors> for SharedError {
    fn from(errors: validator::ValidationErrors) -> Self {
        SharedError::Validation(crate::validation::describe(&errors))
    }
}
