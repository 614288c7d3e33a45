//! Course model

use serde::{Deserialize, Serialize};

/// Represents a course in a catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Course code, the natural key within a catalog (e.g., "CSC 1051")
    pub course_code: String,

    /// Course name (e.g., "Algorithms and Data Structures I")
    pub course_name: String,

    /// Catalog description
    #[serde(default)]
    pub course_description: String,

    /// Credit hours (can be fractional, 0 when the source does not say)
    #[serde(default)]
    pub credits: f32,

    /// Human-readable statement of the admission requirements, if the source has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prerequisite_logic: Option<String>,
}

impl Course {
    /// Create a new course
    ///
    /// # Arguments
    /// * `course_code` - Unique course code
    /// * `course_name` - Full course name
    /// * `credits` - Credit hours (can be fractional)
    #[must_use]
    pub const fn new(course_code: String, course_name: String, credits: f32) -> Self {
        Self {
            course_code,
            course_name,
            course_description: String::new(),
            credits,
            prerequisite_logic: None,
        }
    }

    /// Get the course key for lookups
    #[must_use]
    pub fn key(&self) -> &str {
        &self.course_code
    }

    /// Set the catalog description
    pub fn set_description(&mut self, description: String) {
        self.course_description = description;
    }

    /// Set the prerequisite logic text
    pub fn set_prerequisite_logic(&mut self, logic: String) {
        self.prerequisite_logic = Some(logic);
    }

    /// Split the course code into its department prefix and numeric part
    ///
    /// # Returns
    /// `("CSC", 1051)` for `"CSC 1051"` or `"CSC1051"`. Codes that do not start with
    /// uppercase letters followed by digits yield the whole code and `0`.
    #[must_use]
    pub fn department_and_number(&self) -> (&str, u32) {
        split_course_code(&self.course_code)
    }
}

/// Split a course code such as `"MAT 1500"` into `("MAT", 1500)`
#[must_use]
pub fn split_course_code(code: &str) -> (&str, u32) {
    let dept_len = code
        .chars()
        .take_while(char::is_ascii_uppercase)
        .count();
    if dept_len == 0 {
        return (code, 0);
    }

    let rest = code[dept_len..].trim_start();
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    match digits.parse::<u32>() {
        Ok(number) => (&code[..dept_len], number),
        Err(_) => (code, 0),
    }
}
