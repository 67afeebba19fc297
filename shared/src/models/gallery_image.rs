//! Banquet Gallery Image Model

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::default_true;
use crate::resource::{Orderable, Resource};
use crate::validation::not_blank;

/// Image shown in the banquet hall gallery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BanquetGalleryImage {
    #[serde(alias = "_id")]
    pub id: String,
    pub image: String,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub order: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BanquetGalleryImageCreate {
    #[validate(
        custom(function = "not_blank"),
        length(max = 2048, message = "is too long")
    )]
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 200, message = "is too long"))]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BanquetGalleryImageUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "not_blank"))]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl Resource for BanquetGalleryImage {
    const COLLECTION: &'static str = "banquet-gallery";
    const LABEL: &'static str = "gallery image";

    type Create = BanquetGalleryImageCreate;
    type Update = BanquetGalleryImageUpdate;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Orderable for BanquetGalleryImage {
    fn order(&self) -> i64 {
        self.order
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn order_patch(order: i64) -> Self::Update {
        BanquetGalleryImageUpdate {
            order: Some(order),
            ..Default::default()
        }
    }

    fn active_patch(is_active: bool) -> Self::Update {
        BanquetGalleryImageUpdate {
            is_active: Some(is_active),
            ..Default::default()
        }
    }
}
