//! Shared types for the hotel site
//!
//! Wire models, create/update payloads, validation rules and list ordering
//! used by the client crate and by anything that stubs the site API.

pub mod error;
pub mod models;
pub mod ordering;
pub mod resource;
pub mod upload;
pub mod validation;

// Re-exports
pub use error::{ApiErrorBody, SharedError};
pub use ordering::{Direction, ListSort};
pub use resource::{Orderable, Resource};
pub use serde::{Deserialize, Serialize};
