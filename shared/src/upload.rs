//! Upload policy
//!
//! Size ceilings and storage folders per asset kind. The ceilings differ
//! between kinds (5MB vs 10MB) and are kept that way.

use serde::{Deserialize, Serialize};

const MB: usize = 1024 * 1024;

/// Response of `POST /api/upload`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub url: String,
}

/// Kind of image being uploaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Banner,
    BanquetGallery,
    Room,
    Testimonial,
    BlogCover,
    Restaurant,
}

impl AssetKind {
    /// Maximum accepted file size in bytes
    pub fn max_bytes(&self) -> usize {
        match self {
            AssetKind::Banner | AssetKind::BanquetGallery | AssetKind::Room => 10 * MB,
            AssetKind::Testimonial | AssetKind::BlogCover | AssetKind::Restaurant => 5 * MB,
        }
    }

    /// Storage folder passed as `?folder=`
    pub fn folder(&self) -> &'static str {
        match self {
            AssetKind::Banner => "hotel/banners",
            AssetKind::BanquetGallery => "hotel/banquet",
            AssetKind::Room => "hotel/rooms",
            AssetKind::Testimonial => "hotel/testimonials",
            AssetKind::BlogCover => "hotel/blogs",
            AssetKind::Restaurant => "hotel/restaurants",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Banner => "banner",
            AssetKind::BanquetGallery => "banquet_gallery",
            AssetKind::Room => "room",
            AssetKind::Testimonial => "testimonial",
            AssetKind::BlogCover => "blog_cover",
            AssetKind::Restaurant => "restaurant",
        }
    }
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
