use serde::{Deserialize, Serialize};

/// A bookable program (tennis or pickleball). Sourced wholesale from the
/// backend on every page load; never mutated on this side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub sport: String,
    pub location: Option<String>,
    pub short_description: Option<String>,
    pub long_description: Option<String>,
    /// Display string, e.g. "from $35 / session". Pricing itself is computed
    /// by the backend at checkout.
    pub base_price: String,
    pub image_urls: Vec<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub is_publicly_visible: bool,
    /// Ascending sort key for the grouped catalog.
    pub display_order: i32,
}

/// Many-to-many join record between courses and categories. May reference
/// ids that no longer resolve; such rows are skipped during grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseCategoryMapping {
    pub course_id: i64,
    pub category_id: i64,
}

/// One entry of the grouped catalog: a visible category and the courses
/// mapped into it, already deduplicated and ordered for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryGroup {
    pub name: String,
    pub display_order: i32,
    pub courses: Vec<Course>,
}
