use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A holiday/school camp listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Camp {
    pub id: i64,
    pub name: String,
    pub sport: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub age_min: Option<u8>,
    pub age_max: Option<u8>,
    /// Display string, like `Course::base_price`.
    pub price: String,
    pub capacity: Option<u32>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// Payload of the admin camps form, used for both create and full update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampDraft {
    pub name: String,
    pub sport: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub age_min: Option<u8>,
    pub age_max: Option<u8>,
    pub price: String,
    pub capacity: Option<u32>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}
