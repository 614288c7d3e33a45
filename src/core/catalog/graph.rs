//! Prerequisite relationship graph over a catalog

use super::CourseSource;
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};

/// Directed graph of direct prerequisite edges
///
/// Two association lists are kept so the graph can be walked both ways:
/// - `dependencies`: course -> its direct prerequisites
/// - `dependents`: course -> courses that list it as a prerequisite
///
/// Both endpoints of every edge are catalog courses; the graph is not required
/// to be acyclic.
#[derive(Debug, Clone, Default)]
pub struct PrerequisiteGraph {
    /// Maps course code -> list of prerequisite course codes
    pub dependencies: HashMap<String, Vec<String>>,

    /// Maps course code -> list of courses that depend on it
    pub dependents: HashMap<String, Vec<String>>,

    /// All course codes in the graph, in insertion order
    pub courses: Vec<String>,
}

impl PrerequisiteGraph {
    /// Create a new empty graph
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph over `course_codes`, keeping only edges whose endpoints are both known
    ///
    /// # Arguments
    /// * `course_codes` - Every course in the catalog
    /// * `relationships` - Direct prerequisites by course code
    #[must_use]
    pub fn from_relationships(
        course_codes: &[String],
        relationships: &HashMap<String, Vec<String>>,
    ) -> Self {
        let mut graph = Self::new();
        for code in course_codes {
            graph.add_course(code.clone());
        }

        let known: HashSet<&str> = course_codes.iter().map(String::as_str).collect();
        for (course_code, prereqs) in relationships {
            if !known.contains(course_code.as_str()) {
                crate::debug!("Dropping prerequisites of unknown course {course_code}");
                continue;
            }
            for prereq in prereqs {
                if known.contains(prereq.as_str()) {
                    graph.add_prerequisite(course_code, prereq);
                } else {
                    crate::debug!("Dropping dangling edge {prereq} -> {course_code}");
                }
            }
        }

        graph
    }

    /// Add a course node
    pub fn add_course(&mut self, course_code: String) {
        if !self.dependencies.contains_key(&course_code) {
            self.dependencies.insert(course_code.clone(), Vec::new());
            self.dependents.insert(course_code.clone(), Vec::new());
            self.courses.push(course_code);
        }
    }

    /// Add a prerequisite edge, creating either node if needed
    ///
    /// # Arguments
    /// * `course_code` - Course that requires the prerequisite
    /// * `prerequisite_code` - Course that must be taken first
    pub fn add_prerequisite(&mut self, course_code: &str, prerequisite_code: &str) {
        self.add_course(course_code.to_string());
        self.add_course(prerequisite_code.to_string());

        if let Some(deps) = self.dependencies.get_mut(course_code) {
            if !deps.iter().any(|d| d == prerequisite_code) {
                deps.push(prerequisite_code.to_string());
            }
        }

        if let Some(deps) = self.dependents.get_mut(prerequisite_code) {
            if !deps.iter().any(|d| d == course_code) {
                deps.push(course_code.to_string());
            }
        }
    }

    /// Direct prerequisites of a course, `None` if the course is not in the graph
    #[must_use]
    pub fn get_prerequisites(&self, course_code: &str) -> Option<&Vec<String>> {
        self.dependencies.get(course_code)
    }

    /// Courses that list `course_code` as a direct prerequisite
    #[must_use]
    pub fn get_dependents(&self, course_code: &str) -> Option<&Vec<String>> {
        self.dependents.get(course_code)
    }

    /// Get the number of courses in the graph
    #[must_use]
    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    /// Get the number of prerequisite edges
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.dependencies.values().map(Vec::len).sum()
    }

    /// Check if a course exists in the graph
    #[must_use]
    pub fn contains_course(&self, course_code: &str) -> bool {
        self.dependencies.contains_key(course_code)
    }

    /// Every edge as `(prerequisite, course)`, sorted
    #[must_use]
    pub fn edges(&self) -> Vec<(String, String)> {
        let mut edges: Vec<(String, String)> = self
            .dependencies
            .iter()
            .flat_map(|(course, prereqs)| {
                prereqs
                    .iter()
                    .map(move |prereq| (prereq.clone(), course.clone()))
            })
            .collect();
        edges.sort();
        edges
    }
}

impl std::fmt::Display for PrerequisiteGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Prerequisite graph ({} courses):", self.courses.len())?;
        writeln!(f)?;

        let mut sorted_courses = self.courses.clone();
        sorted_courses.sort();

        for course_code in sorted_courses {
            if let Some(deps) = self.dependencies.get(&course_code) {
                if deps.is_empty() {
                    writeln!(f, "  {course_code} → (no prerequisites)")?;
                } else {
                    writeln!(f, "  {course_code} → {}", deps.join(", "))?;
                }
            }
        }

        Ok(())
    }
}

/// Fetch direct prerequisites for each course concurrently
///
/// A failed lookup is logged and the course is left out of the result. Courses
/// with no prerequisites are also left out.
#[must_use]
pub fn fetch_relationships<S: CourseSource + ?Sized>(
    source: &S,
    course_codes: &[String],
) -> HashMap<String, Vec<String>> {
    course_codes
        .par_iter()
        .filter_map(|code| match source.direct_prerequisites(code) {
            Ok(prereqs) if prereqs.is_empty() => None,
            Ok(prereqs) => Some((code.clone(), prereqs)),
            Err(e) => {
                crate::warn!("Failed to fetch prerequisites for {code}: {e}");
                None
            }
        })
        .collect()
}

/// Build the relationship graph for every course in `source`
///
/// Uses the bulk relationship lookup and falls back to per-course lookups when
/// it fails. If the catalog itself cannot be read the graph is empty.
#[must_use]
pub fn build_relationship_graph<S: CourseSource + ?Sized>(source: &S) -> PrerequisiteGraph {
    let courses = match source.all_courses() {
        Ok(courses) => courses,
        Err(e) => {
            crate::warn!("Failed to fetch catalog: {e}");
            return PrerequisiteGraph::new();
        }
    };
    let codes: Vec<String> = courses.into_iter().map(|c| c.course_code).collect();

    let relationships = source.prerequisite_relationships().unwrap_or_else(|e| {
        crate::warn!("Bulk relationship lookup failed, fetching per course: {e}");
        fetch_relationships(source, &codes)
    });

    PrerequisiteGraph::from_relationships(&codes, &relationships)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::Catalog;
    use crate::core::error::FetchError;
    use crate::core::models::{Course, PrerequisiteNode};

    fn codes(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_add_prerequisite() {
        let mut graph = PrerequisiteGraph::new();
        graph.add_prerequisite("CSC 1052", "CSC 1051");

        assert_eq!(graph.course_count(), 2);
        assert!(graph
            .get_prerequisites("CSC 1052")
            .unwrap()
            .contains(&"CSC 1051".to_string()));
        assert!(graph
            .get_dependents("CSC 1051")
            .unwrap()
            .contains(&"CSC 1052".to_string()));
    }

    #[test]
    fn test_duplicate_edge() {
        let mut graph = PrerequisiteGraph::new();
        graph.add_prerequisite("CSC 1052", "CSC 1051");
        graph.add_prerequisite("CSC 1052", "CSC 1051");
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_dangling_edges_dropped() {
        let mut relationships = HashMap::new();
        relationships.insert(
            "CSC 1052".to_string(),
            codes(&["CSC 1051", "CSC 0000"]),
        );
        relationships.insert("GHOST 1000".to_string(), codes(&["CSC 1051"]));

        let graph =
            PrerequisiteGraph::from_relationships(&codes(&["CSC 1051", "CSC 1052"]), &relationships);

        assert_eq!(graph.course_count(), 2);
        assert!(!graph.contains_course("CSC 0000"));
        assert!(!graph.contains_course("GHOST 1000"));
        assert_eq!(
            graph.edges(),
            vec![("CSC 1051".to_string(), "CSC 1052".to_string())]
        );
    }

    #[test]
    fn test_cycles_are_representable() {
        let mut relationships = HashMap::new();
        relationships.insert("A 1000".to_string(), codes(&["B 1000"]));
        relationships.insert("B 1000".to_string(), codes(&["A 1000"]));

        let graph =
            PrerequisiteGraph::from_relationships(&codes(&["A 1000", "B 1000"]), &relationships);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_graph_display() {
        let mut graph = PrerequisiteGraph::new();
        graph.add_prerequisite("CSC 1052", "CSC 1051");
        graph.add_course("MAT 1500".to_string());

        let display = format!("{graph}");
        assert!(display.contains("Prerequisite graph (3 courses)"));
        assert!(display.contains("CSC 1052 → CSC 1051"));
        assert!(display.contains("MAT 1500 → (no prerequisites)"));
    }

    /// Catalog whose bulk lookup always fails and whose per-course lookup fails for one code
    struct PartialSource {
        inner: Catalog,
        broken: &'static str,
    }

    impl CourseSource for PartialSource {
        fn all_courses(&self) -> Result<Vec<Course>, FetchError> {
            self.inner.all_courses()
        }

        fn direct_prerequisites(&self, course_code: &str) -> Result<Vec<String>, FetchError> {
            if course_code == self.broken {
                return Err(FetchError::Unavailable(course_code.to_string()));
            }
            self.inner.direct_prerequisites(course_code)
        }

        fn prerequisite_tree(
            &self,
            course_code: &str,
        ) -> Result<Option<PrerequisiteNode>, FetchError> {
            self.inner.prerequisite_tree(course_code)
        }

        fn prerequisite_relationships(
            &self,
        ) -> Result<HashMap<String, Vec<String>>, FetchError> {
            Err(FetchError::Unavailable("relationships".to_string()))
        }
    }

    #[test]
    fn test_build_graph_falls_back_per_course() {
        let mut catalog = Catalog::new("Test".to_string());
        for code in ["CSC 1051", "CSC 1052", "CSC 2053"] {
            catalog.add_course(Course::new(code.to_string(), code.to_string(), 3.0));
        }
        catalog.add_prerequisite("CSC 1052", "CSC 1051".to_string());
        catalog.add_prerequisite("CSC 2053", "CSC 1052".to_string());

        let source = PartialSource {
            inner: catalog,
            broken: "CSC 2053",
        };
        let graph = build_relationship_graph(&source);

        assert_eq!(graph.course_count(), 3);
        assert_eq!(
            graph.edges(),
            vec![("CSC 1051".to_string(), "CSC 1052".to_string())]
        );
    }
}
