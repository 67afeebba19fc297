//! Hotel Client - typed client for the hotel site API
//!
//! Admin list controllers for the orderable collections (banners, banquet
//! gallery, testimonials), the image upload helper, the public site facade
//! and the modal scroll lock.

pub mod client;
pub mod config;
pub mod error;
pub mod list;
pub mod logger;
pub mod notify;
pub mod resource;
pub mod scroll_lock;
pub mod site;
pub mod upload;

pub use client::{HttpClient, NetworkHttpClient};
#[cfg(feature = "in-process")]
pub use client::OneshotHttpClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use list::{ActionPhase, DeleteOutcome, MoveOutcome, OrderedList};
pub use notify::{Confirm, FixedAnswer, Notifier, RecordingNotifier, Toast, ToastLevel, TracingNotifier};
pub use resource::ResourceApi;
pub use scroll_lock::{ScrollLock, ScrollLockManager, ScrollSurface};
pub use site::SiteClient;
pub use upload::{UploadBatch, UploadFile, UploadPolicy, UploadProgress, Uploader};

// Re-export shared types for convenience
pub use shared::models;
pub use shared::upload::AssetKind;
pub use shared::{Direction, ListSort};
