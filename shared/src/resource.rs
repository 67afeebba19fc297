//! Resource traits
//!
//! Every site collection is served at `/api/{COLLECTION}` and
//! `/api/{COLLECTION}/{id}`. The traits here tie a model to its collection
//! path and its create/update payloads so the client can stay generic.

use serde::Serialize;
use serde::de::DeserializeOwned;
use validator::Validate;

/// A top-level collection of the site API
pub trait Resource: DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection path segment, e.g. `"banners"`
    const COLLECTION: &'static str;
    /// Singular name used in log lines and user messages
    const LABEL: &'static str;

    /// POST body
    type Create: Serialize + Validate + Send + Sync;
    /// PUT body; `None` fields are left out of the request
    type Update: Serialize + Validate + Default + Send + Sync;

    /// Server-assigned id
    fn id(&self) -> &str;
}

/// A collection whose records carry a display `order` and an `isActive` flag
pub trait Orderable: Resource {
    fn order(&self) -> i64;
    fn is_active(&self) -> bool;

    /// Patch that only sets `order`
    fn order_patch(order: i64) -> Self::Update;
    /// Patch that only sets `isActive`
    fn active_patch(is_active: bool) -> Self::Update;
}

/// Path of the collection endpoint
pub fn collection_path<T: Resource>() -> String {
    format!("/api/{}", T::COLLECTION)
}

/// Path of a single record. Ids are opaque, so they are percent-encoded.
pub fn record_path<T: Resource>(id: &str) -> String {
    format!("/api/{}/{}", T::COLLECTION, urlencoding::encode(id))
}
