//! Assembles the public course catalog out of the three flat lists the
//! backend exposes: courses, categories, and the mapping rows that join them.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::api::BackendClient;
use crate::error::ApiError;
use crate::models::{Category, CategoryGroup, Course, CourseCategoryMapping};

/// Joins the raw lists into category groups ready for display.
///
/// Only publicly visible categories and active courses participate. When
/// `sport` is given, courses of other sports are left out and categories
/// whose courses all fall away disappear with them. Mapping rows pointing at
/// unknown or filtered-out ids are skipped, and a course mapped into the
/// same category twice shows up there once. Groups come back sorted by
/// `display_order`, courses within a group in mapping order.
pub fn group_courses(
    courses: &[Course],
    categories: &[Category],
    mappings: &[CourseCategoryMapping],
    sport: Option<&str>,
) -> Vec<CategoryGroup> {
    let visible: HashMap<i64, &Category> = categories
        .iter()
        .filter(|c| c.is_publicly_visible)
        .map(|c| (c.id, c))
        .collect();

    // Last write wins if the backend ever hands out duplicate course ids.
    let bookable: HashMap<i64, &Course> = courses
        .iter()
        .filter(|c| c.is_active)
        .filter(|c| sport.is_none_or(|s| c.sport.eq_ignore_ascii_case(s)))
        .map(|c| (c.id, c))
        .collect();

    let mut groups: Vec<CategoryGroup> = Vec::new();
    let mut slot_by_category: HashMap<i64, usize> = HashMap::new();

    for mapping in mappings {
        let (Some(category), Some(course)) = (
            visible.get(&mapping.category_id),
            bookable.get(&mapping.course_id),
        ) else {
            // Dangling or filtered-out reference; the row carries no data of
            // its own, so there is nothing to surface.
            continue;
        };

        let slot = *slot_by_category.entry(category.id).or_insert_with(|| {
            groups.push(CategoryGroup {
                name: category.name.clone(),
                display_order: category.display_order,
                courses: Vec::new(),
            });
            groups.len() - 1
        });

        let bucket = &mut groups[slot];
        if bucket.courses.iter().any(|c| c.id == course.id) {
            continue;
        }
        bucket.courses.push((*course).clone());
    }

    // Stable, so categories sharing a display_order keep first-mapped order.
    groups.sort_by_key(|g| g.display_order);
    groups
}

/// Fetches and assembles the grouped catalog for a landing page.
pub struct CatalogService {
    client: Arc<dyn BackendClient>,
}

impl CatalogService {
    pub fn new(client: Arc<dyn BackendClient>) -> Self {
        Self { client }
    }

    /// Loads the three lists concurrently and groups them. An empty result is
    /// a normal outcome, not an error.
    pub async fn grouped_catalog(
        &self,
        sport: Option<&str>,
    ) -> Result<Vec<CategoryGroup>, ApiError> {
        let (courses, categories, mappings) = tokio::try_join!(
            self.client.fetch_courses(),
            self.client.fetch_categories(),
            self.client.fetch_course_category_mappings(),
        )?;

        debug!(
            "assembling catalog from {} courses, {} categories, {} mappings",
            courses.len(),
            categories.len(),
            mappings.len()
        );

        Ok(group_courses(&courses, &categories, &mappings, sport))
    }
}
