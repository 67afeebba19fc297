//! Testimonial Model
//!
//! Testimonials submitted from the public form start inactive and only show
//! on the site once an admin activates them.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::resource::{Orderable, Resource};
use crate::validation::not_blank;

/// Guest testimonial
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub quote: String,
    /// 1-5 stars
    pub rating: u8,
    /// e.g. "Business traveller"
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub is_active: bool,
}

/// Create testimonial payload (admin form)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialCreate {
    #[validate(
        custom(function = "not_blank"),
        length(max = 200, message = "is too long")
    )]
    pub name: String,
    #[validate(
        custom(function = "not_blank"),
        length(max = 2000, message = "is too long")
    )]
    pub quote: String,
    #[validate(range(min = 1, max = 5, message = "must be between 1 and 5"))]
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl Default for TestimonialCreate {
    fn default() -> Self {
        Self {
            name: String::new(),
            quote: String::new(),
            rating: 5,
            role: None,
            avatar: None,
            order: None,
            is_active: None,
        }
    }
}

/// Update testimonial payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "not_blank"))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "not_blank"))]
    pub quote: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 5, message = "must be between 1 and 5"))]
    pub rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Testimonial sent from the public site
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialSubmission {
    pub name: String,
    pub quote: String,
    pub rating: u8,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

impl TestimonialSubmission {
    /// Build the create payload. Public submissions are always created
    /// inactive, pending moderation.
    pub fn into_create(self) -> TestimonialCreate {
        TestimonialCreate {
            name: self.name,
            quote: self.quote,
            rating: self.rating,
            role: self.role,
            avatar: self.avatar,
            order: None,
            is_active: Some(false),
        }
    }
}

impl Resource for Testimonial {
    const COLLECTION: &'static str = "testimonials";
    const LABEL: &'static str = "testimonial";

    type Create = TestimonialCreate;
    type Update = TestimonialUpdate;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Orderable for Testimonial {
    fn order(&self) -> i64 {
        self.order
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn order_patch(order: i64) -> Self::Update {
        TestimonialUpdate {
            order: Some(order),
            ..Default::default()
        }
    }

    fn active_patch(is_active: bool) -> Self::Update {
        TestimonialUpdate {
            is_active: Some(is_active),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::check;

    #[test]
    fn test_submission_is_inactive() {
        let create = TestimonialSubmission {
            name: "Ana".into(),
            quote: "Great breakfast".into(),
            rating: 5,
            role: None,
            avatar: None,
        }
        .into_create();
        assert_eq!(create.is_active, Some(false));
    }

    #[test]
    fn test_rating_range() {
        let mut create = TestimonialCreate {
            name: "Ana".into(),
            quote: "Great breakfast".into(),
            ..Default::default()
        };
        assert!(check(&create).is_ok());

        create.rating = 0;
        assert!(check(&create).is_err());
        create.rating = 6;
        assert!(check(&create).is_err());
    }

    #[test]
    fn test_missing_quote() {
        let create = TestimonialCreate {
            name: "Ana".into(),
            ..Default::default()
        };
        let err = check(&create).unwrap_err().to_string();
        assert_eq!(err, "quote: must not be empty");
    }
}
