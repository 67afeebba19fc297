//! Proposal Model
//!
//! Event / banquet enquiries sent from the contact and banquet pages.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::resource::Resource;
use crate::validation::not_blank;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalStatus {
    #[default]
    New,
    Contacted,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    /// e.g. "wedding", "conference"
    #[serde(default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub event_date: Option<NaiveDate>,
    #[serde(default)]
    pub guests: Option<u32>,
    pub message: String,
    #[serde(default)]
    pub status: ProposalStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProposalCreate {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, message = "at least one guest is required"))]
    pub guests: Option<u32>,
    #[validate(
        custom(function = "not_blank"),
        length(max = 5000, message = "is too long")
    )]
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProposalUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProposalStatus>,
}

impl Resource for Proposal {
    const COLLECTION: &'static str = "proposals";
    const LABEL: &'static str = "proposal";

    type Create = ProposalCreate;
    type Update = ProposalUpdate;

    fn id(&self) -> &str {
        &self.id
    }
}
