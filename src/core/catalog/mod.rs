//! Course catalog and the read-only data contract consumed by the planner core
//!
//! The core never talks to a transport directly. Everything it needs about
//! courses comes through [`CourseSource`]; [`Catalog`] is the in-memory
//! implementation used by the CLI and the tests.

pub mod csv_parser;
pub mod filter;
pub mod graph;
pub mod json;

pub use filter::{sort_courses, CatalogFilter};
pub use graph::{build_relationship_graph, fetch_relationships, PrerequisiteGraph};

use crate::core::error::{CatalogError, FetchError};
use crate::core::models::{Course, PrerequisiteNode};
use std::collections::HashMap;
use std::path::Path;

/// Read-only source of catalog and prerequisite data
///
/// Implementations must be shareable across threads: per-course lookups are
/// fanned out concurrently.
pub trait CourseSource: Sync {
    /// Every course in the catalog
    ///
    /// # Errors
    /// Returns [`FetchError`] if the catalog cannot be read
    fn all_courses(&self) -> Result<Vec<Course>, FetchError>;

    /// Flat list of direct prerequisites for a course (empty when it has none)
    ///
    /// # Errors
    /// Returns [`FetchError`] if the lookup fails
    fn direct_prerequisites(&self, course_code: &str) -> Result<Vec<String>, FetchError>;

    /// Boolean prerequisite tree for a course, `None` when it has no requirements
    ///
    /// # Errors
    /// Returns [`FetchError`] if the lookup fails
    fn prerequisite_tree(&self, course_code: &str)
        -> Result<Option<PrerequisiteNode>, FetchError>;

    /// Direct prerequisites for every course that has any
    ///
    /// # Errors
    /// Returns [`FetchError`] if the relationship data cannot be read
    fn prerequisite_relationships(&self) -> Result<HashMap<String, Vec<String>>, FetchError>;
}

/// In-memory course catalog
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Catalog name (institution or curriculum)
    pub name: String,

    /// Courses indexed by course code
    courses: HashMap<String, Course>,

    /// Direct prerequisites by course code
    prerequisites: HashMap<String, Vec<String>>,

    /// Boolean prerequisite trees by course code
    trees: HashMap<String, PrerequisiteNode>,
}

impl Catalog {
    /// Create an empty catalog
    #[must_use]
    pub fn new(name: String) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    /// Add a course to the catalog
    ///
    /// # Returns
    /// `true` if the course was added, `false` if a course with that code already exists
    pub fn add_course(&mut self, course: Course) -> bool {
        if self.courses.contains_key(course.key()) {
            return false;
        }
        self.courses.insert(course.course_code.clone(), course);
        true
    }

    /// Get a course by its code
    #[must_use]
    pub fn get_course(&self, course_code: &str) -> Option<&Course> {
        self.courses.get(course_code)
    }

    /// Get all courses (unordered)
    #[must_use]
    pub fn courses(&self) -> Vec<&Course> {
        self.courses.values().collect()
    }

    /// Get the number of courses in the catalog
    #[must_use]
    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    /// Add a direct prerequisite edge
    ///
    /// # Arguments
    /// * `course_code` - Course that requires the prerequisite
    /// * `prerequisite_code` - Course that must be taken first
    pub fn add_prerequisite(&mut self, course_code: &str, prerequisite_code: String) {
        let prereqs = self.prerequisites.entry(course_code.to_string()).or_default();
        if !prereqs.contains(&prerequisite_code) {
            prereqs.push(prerequisite_code);
        }
    }

    /// Set the boolean prerequisite tree for a course
    pub fn set_prerequisite_tree(&mut self, course_code: &str, tree: PrerequisiteNode) {
        self.trees.insert(course_code.to_string(), tree);
    }

    /// Direct prerequisites recorded for a course
    #[must_use]
    pub fn prerequisites_of(&self, course_code: &str) -> &[String] {
        self.prerequisites
            .get(course_code)
            .map_or(&[], Vec::as_slice)
    }

    /// Validate that every prerequisite reference names a catalog course
    ///
    /// # Errors
    /// Returns `Err` with one message per dangling reference
    pub fn validate_references(&self) -> Result<(), Vec<String>> {
        let mut dangling = Vec::new();

        for (course_code, prereqs) in &self.prerequisites {
            for prereq in prereqs {
                if !self.courses.contains_key(prereq) {
                    dangling.push(format!(
                        "Course '{course_code}': prerequisite '{prereq}' not found"
                    ));
                }
            }
        }

        for (course_code, tree) in &self.trees {
            for code in tree.course_codes() {
                if !self.courses.contains_key(code) {
                    dangling.push(format!(
                        "Course '{course_code}': requirement '{code}' not found"
                    ));
                }
            }
        }

        dangling.sort();
        if dangling.is_empty() {
            Ok(())
        } else {
            Err(dangling)
        }
    }
}

impl CourseSource for Catalog {
    fn all_courses(&self) -> Result<Vec<Course>, FetchError> {
        Ok(self.courses.values().cloned().collect())
    }

    fn direct_prerequisites(&self, course_code: &str) -> Result<Vec<String>, FetchError> {
        Ok(self.prerequisites_of(course_code).to_vec())
    }

    fn prerequisite_tree(
        &self,
        course_code: &str,
    ) -> Result<Option<PrerequisiteNode>, FetchError> {
        Ok(self.trees.get(course_code).cloned())
    }

    fn prerequisite_relationships(&self) -> Result<HashMap<String, Vec<String>>, FetchError> {
        Ok(self
            .prerequisites
            .iter()
            .filter(|(_, prereqs)| !prereqs.is_empty())
            .map(|(code, prereqs)| (code.clone(), prereqs.clone()))
            .collect())
    }
}

/// Load a catalog file, choosing the parser by extension (`.csv` or JSON otherwise)
///
/// # Errors
/// Returns [`CatalogError`] if the file cannot be read or parsed
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog, CatalogError> {
    let path = path.as_ref();
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    if is_csv {
        csv_parser::parse_catalog_csv(path)
    } else {
        json::load_catalog_json(path)
    }
}
