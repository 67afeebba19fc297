//! Room Model
//!
//! Older room documents were written with `title` instead of `name` and
//! `gallery` instead of `images`. [`RoomRecord`] accepts both shapes and
//! [`Room`] only ever exposes the canonical names.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::default_true;
use crate::resource::Resource;
use crate::validation::{no_blank_urls, not_blank};

/// Schema version detected on a stored room document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomSchema {
    /// `title` / `gallery`
    V1,
    /// `name` / `images`
    V2,
}

/// Hotel room type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RoomRecord")]
pub struct Room {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    /// Nightly rate
    pub price: f64,
    pub capacity: Option<u32>,
    pub size: Option<String>,
    pub bed_type: Option<String>,
    pub amenities: Vec<String>,
    pub images: Vec<String>,
    pub is_active: bool,
    /// Schema the record was stored with; never sent back
    #[serde(skip_serializing)]
    pub schema: RoomSchema,
}

/// Raw room document as stored, before migration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomRecord {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub bed_type: Option<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub gallery: Option<Vec<String>>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl RoomRecord {
    /// Schema the document was written with. Any canonical field marks V2.
    pub fn schema(&self) -> RoomSchema {
        if self.name.is_some() || self.images.is_some() {
            RoomSchema::V2
        } else {
            RoomSchema::V1
        }
    }
}

impl From<RoomRecord> for Room {
    fn from(raw: RoomRecord) -> Self {
        let schema = raw.schema();
        if schema == RoomSchema::V1 {
            tracing::debug!(room_id = %raw.id, "Migrating legacy room fields");
        }

        let name = raw
            .name
            .filter(|n| !n.trim().is_empty())
            .or(raw.title)
            .unwrap_or_default();
        let images = raw
            .images
            .filter(|imgs| !imgs.is_empty())
            .or(raw.gallery)
            .unwrap_or_default();

        Room {
            id: raw.id,
            name,
            description: raw.description,
            price: raw.price,
            capacity: raw.capacity,
            size: raw.size,
            bed_type: raw.bed_type,
            amenities: raw.amenities,
            images,
            is_active: raw.is_active,
            schema,
        }
    }
}

fn non_negative_price(price: f64) -> Result<(), validator::ValidationError> {
    if price.is_finite() && price >= 0.0 {
        Ok(())
    } else {
        Err(validator::ValidationError::new("price")
            .with_message(std::borrow::Cow::Borrowed("must be zero or more")))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RoomCreate {
    #[validate(
        custom(function = "not_blank"),
        length(max = 200, message = "is too long")
    )]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[validate(custom(function = "non_negative_price"))]
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bed_type: Option<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    #[validate(custom(function = "no_blank_urls"))]
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RoomUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "not_blank"))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "non_negative_price"))]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bed_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amenities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "no_blank_urls"))]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl Resource for Room {
    const COLLECTION: &'static str = "rooms";
    const LABEL: &'static str = "room";

    type Create = RoomCreate;
    type Update = RoomUpdate;

    fn id(&self) -> &str {
        &self.id
    }
}
