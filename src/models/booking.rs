use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Type tag the backend puts on every confirmation record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingType {
    Course,
    Package,
    PackageRenewal,
}

/// The confirmation record for a paid booking. Created server-side at
/// checkout, finalized by the payment webhook, and read-only from here.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    pub booking_id: String,
    /// Human-readable reference shown to the customer (and in the receipt
    /// email).
    pub reference: String,
    pub booking_type: BookingType,
    pub participants: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub final_amount: Decimal,
    pub currency: String,
    pub details: ConfirmationDetails,
}

/// Fields that differ per booking type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ConfirmationDetails {
    #[serde(rename_all = "camelCase")]
    Course {
        course_name: String,
        booked_dates: Vec<NaiveDate>,
    },
    /// Used by both `Package` and `PackageRenewal` bookings.
    #[serde(rename_all = "camelCase")]
    Package {
        package_name: String,
        included_courses: Vec<String>,
    },
}

/// One row of the admin booking calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSummary {
    pub id: i64,
    pub reference: String,
    pub course_name: String,
    pub date: NaiveDate,
    pub start_time: Option<String>,
    pub participant_name: String,
    pub status: String,
}

/// What the checkout form submits to create a pending booking. Validated
/// locally before anything is sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub course_id: i64,
    pub dates: Vec<NaiveDate>,
    pub participants: u32,
    pub customer: CustomerDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetails {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl BookingRequest {
    /// Required-field checks, mirroring the checkout form. A failing request
    /// is surfaced to the user and never reaches the backend.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.dates.is_empty() {
            return Err(ApiError::Validation("select at least one date".to_string()));
        }
        if self.participants == 0 {
            return Err(ApiError::Validation(
                "participant count must be at least 1".to_string(),
            ));
        }
        if self.customer.full_name.trim().is_empty() {
            return Err(ApiError::Validation("full name is required".to_string()));
        }
        let email = self.customer.email.trim();
        if email.is_empty() {
            return Err(ApiError::Validation("email is required".to_string()));
        }
        if !email.contains('@') {
            return Err(ApiError::Validation(format!(
                "'{}' is not a valid email address",
                email
            )));
        }
        Ok(())
    }
}

/// What the backend hands back for the payment SDK handoff. The client
/// secret is shown to the SDK only; it is never logged here.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutSession {
    pub booking_id: String,
    pub client_secret: String,
    pub publishable_key: Option<String>,
}
