//! Banner Model

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::default_true;
use crate::resource::{Orderable, Resource};
use crate::validation::{no_blank_urls, not_blank};

/// Home page hero banner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    /// Call-to-action target
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub order: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Create banner payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BannerCreate {
    #[validate(
        custom(function = "not_blank"),
        length(max = 200, message = "is too long")
    )]
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[validate(
        length(min = 1, message = "at least one image is required"),
        custom(function = "no_blank_urls")
    )]
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Update banner payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BannerUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "not_blank"))]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(
        length(min = 1, message = "at least one image is required"),
        custom(function = "no_blank_urls")
    )]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl Resource for Banner {
    const COLLECTION: &'static str = "banners";
    const LABEL: &'static str = "banner";

    type Create = BannerCreate;
    type Update = BannerUpdate;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Orderable for Banner {
    fn order(&self) -> i64 {
        self.order
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn order_patch(order: i64) -> BannerUpdate {
        BannerUpdate {
            order: Some(order),
            ..Default::default()
        }
    }

    fn active_patch(is_active: bool) -> BannerUpdate {
        BannerUpdate {
            is_active: Some(is_active),
            ..Default::default()
        }
    }
}
