use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry of the admin media library. The file itself lives behind `url`;
/// only metadata travels through this API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub id: i64,
    pub file_name: String,
    pub url: String,
    pub content_type: String,
    pub size_bytes: u64,
    pub uploaded_at: DateTime<Utc>,
}
