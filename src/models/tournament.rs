use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A public tournament listing. Read-only from this side; the admin
/// dashboards manage camps, not tournaments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub id: i64,
    pub name: String,
    pub sport: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Display string, like `Course::base_price`.
    pub entry_fee: String,
    pub registration_deadline: Option<NaiveDate>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}
