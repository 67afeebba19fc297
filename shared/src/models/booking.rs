//! Booking Models
//!
//! Room bookings and restaurant table bookings. Rooms and restaurants are
//! referenced by id only; nothing here checks that the target exists.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::resource::Resource;
use crate::validation::not_blank;

/// Booking status, shared by room and restaurant bookings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

// =============================================================================
// Room booking
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(alias = "_id")]
    pub id: String,
    pub room_id: String,
    #[serde(default)]
    pub room_name: Option<String>,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u32,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub status: BookingStatus,
}

impl Booking {
    /// Number of nights booked
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_stay"))]
pub struct BookingCreate {
    #[validate(custom(function = "not_blank"))]
    pub room_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_name: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[validate(range(min = 1, message = "at least one guest is required"))]
    pub guests: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 2000, message = "is too long"))]
    pub notes: Option<String>,
}

fn validate_stay(booking: &BookingCreate) -> Result<(), ValidationError> {
    if booking.check_out <= booking.check_in {
        return Err(ValidationError::new("stay")
            .with_message("check-out must be after check-in".into()));
    }
    Ok(())
}

/// Admin-side booking changes
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookingUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BookingStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_in: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_out: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, message = "at least one guest is required"))]
    pub guests: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Resource for Booking {
    const COLLECTION: &'static str = "bookings";
    const LABEL: &'static str = "booking";

    type Create = BookingCreate;
    type Update = BookingUpdate;

    fn id(&self) -> &str {
        &self.id
    }
}

// =============================================================================
// Restaurant booking
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantBooking {
    #[serde(alias = "_id")]
    pub id: String,
    pub restaurant_id: String,
    #[serde(default)]
    pub restaurant_name: Option<String>,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub date: NaiveDate,
    /// "HH:MM"
    pub time: String,
    pub guests: u32,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub status: BookingStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantBookingCreate {
    #[validate(custom(function = "not_blank"))]
    pub restaurant_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restaurant_name: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub date: NaiveDate,
    #[validate(custom(function = "valid_time"))]
    pub time: String,
    #[validate(range(min = 1, message = "at least one guest is required"))]
    pub guests: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

fn valid_time(value: &str) -> Result<(), ValidationError> {
    chrono::NaiveTime::parse_from_str(value, "%H:%M")
        .map(|_| ())
        .map_err(|_| ValidationError::new("time").with_message("must be HH:MM".into()))
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantBookingUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BookingStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "valid_time"))]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, message = "at least one guest is required"))]
    pub guests: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Resource for RestaurantBooking {
    const COLLECTION: &'static str = "restaurant-bookings";
    const LABEL: &'static str = "restaurant booking";

    type Create = RestaurantBookingCreate;
    type Update = RestaurantBookingUpdate;

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::check;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn booking() -> BookingCreate {
        BookingCreate {
            room_id: "r1".into(),
            room_name: None,
            name: "Lena".into(),
            email: "lena@example.com".into(),
            phone: None,
            check_in: date("2026-11-02"),
            check_out: date("2026-11-05"),
            guests: 2,
            notes: None,
        }
    }

    #[test]
    fn test_valid_booking() {
        assert!(check(&booking()).is_ok());
    }

    #[test]
    fn test_check_out_must_follow_check_in() {
        let mut b = booking();
        b.check_out = b.check_in;
        let err = check(&b).unwrap_err().to_string();
        assert_eq!(err, "check-out must be after check-in");
    }

    #[test]
    fn test_bad_email_and_no_guests() {
        let mut b = booking();
        b.email = "lena".into();
        b.guests = 0;
        let err = check(&b).unwrap_err().to_string();
        assert!(err.contains("email: must be a valid email address"));
        assert!(err.contains("guests: at least one guest is required"));
    }

    #[test]
    fn test_restaurant_time_format() {
        let mut b = RestaurantBookingCreate {
            restaurant_id: "terrace".into(),
            restaurant_name: None,
            name: "Lena".into(),
            email: "lena@example.com".into(),
            phone: None,
            date: date("2026-11-02"),
            time: "19:30".into(),
            guests: 4,
            notes: None,
        };
        assert!(check(&b).is_ok());
        b.time = "7pm".into();
        assert!(check(&b).is_err());
    }

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_value(BookingStatus::Confirmed).unwrap();
        assert_eq!(json, "confirmed");
    }
}
