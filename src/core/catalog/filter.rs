//! Catalog filtering and display ordering

use crate::core::models::Course;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;

/// Catalog browsing filter, persisted alongside the plan
///
/// Empty fields do not filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogFilter {
    /// Department prefix the course code must start with (e.g., "CSC")
    #[serde(default)]
    pub department: String,
    /// Case-insensitive substring of the course code or name
    #[serde(default)]
    pub search: String,
    /// Exact credit value, kept as text so an unset filter round-trips as `""`
    #[serde(default)]
    pub credit_hours: String,
}

impl CatalogFilter {
    /// Whether a course passes every active criterion
    #[must_use]
    pub fn matches(&self, course: &Course) -> bool {
        let search = self.search.trim().to_lowercase();
        let matches_search = search.is_empty()
            || course.course_code.to_lowercase().contains(&search)
            || course.course_name.to_lowercase().contains(&search);

        let matches_department =
            self.department.is_empty() || course.course_code.starts_with(&self.department);

        let matches_credits = match self.credit_hours.trim() {
            "" => true,
            value => value
                .parse::<f32>()
                .map_or(true, |credits| (course.credits - credits).abs() < f32::EPSILON),
        };

        matches_search && matches_department && matches_credits
    }

    /// Courses passing the filter, sorted by department then course number
    #[must_use]
    pub fn apply<'a>(&self, courses: &'a [Course]) -> Vec<&'a Course> {
        let mut filtered: Vec<&Course> = courses.iter().filter(|c| self.matches(c)).collect();
        sort_courses(&mut filtered);
        filtered
    }
}

/// Sort courses by department prefix, then numerically by course number
///
/// Ties (same department and number) fall back to the full code so the order is total.
pub fn sort_courses<C: Borrow<Course>>(courses: &mut [C]) {
    courses.sort_by(|a, b| {
        let (a, b) = (a.borrow(), b.borrow());
        a.department_and_number()
            .cmp(&b.department_and_number())
            .then_with(|| a.course_code.cmp(&b.course_code))
    });
}
