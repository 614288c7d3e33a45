//! Eligible-course computation and stale result handling

use super::evaluator::is_satisfied_for;
use super::inference::infer_completed_from;
use crate::core::catalog::CourseSource;
use crate::core::models::Course;
use rayon::prelude::*;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

/// Courses a student may take next given explicitly completed courses
///
/// Completed courses are first expanded by one-hop inference. Courses in the
/// expanded set are never eligible. A course whose tree cannot be fetched is
/// treated as eligible. Output order is unspecified.
#[must_use]
pub fn eligible_courses<S: CourseSource + ?Sized>(
    source: &S,
    explicit: &HashSet<String>,
) -> Vec<Course> {
    let implied = infer_completed_from(source, explicit);
    eligible_given_implied(source, &implied)
}

/// Courses whose prerequisites are met by an already expanded completed set
#[must_use]
pub fn eligible_given_implied<S: CourseSource + ?Sized>(
    source: &S,
    implied: &HashSet<String>,
) -> Vec<Course> {
    let courses = match source.all_courses() {
        Ok(courses) => courses,
        Err(e) => {
            crate::warn!("Failed to fetch catalog, no courses are eligible: {e}");
            return Vec::new();
        }
    };

    courses
        .into_par_iter()
        .filter(|course| !implied.contains(&course.course_code))
        .filter(|course| match source.prerequisite_tree(&course.course_code) {
            Ok(tree) => is_satisfied_for(&course.course_code, tree.as_ref(), implied),
            Err(e) => {
                crate::warn!(
                    "Failed to fetch prerequisites for {}, treating as eligible: {e}",
                    course.course_code
                );
                true
            }
        })
        .collect()
}

/// Identifier of one eligibility request
pub type RequestId = u64;

/// Issues increasing request ids and rejects results that arrive out of order
///
/// A result may be applied only if its id is newer than the last applied one,
/// so a slow response for an older completed set cannot overwrite a newer one.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    issued: AtomicU64,
    applied: AtomicU64,
}

impl RequestSequencer {
    /// Create a sequencer with nothing issued
    #[must_use]
    pub const fn new() -> Self {
        Self {
            issued: AtomicU64::new(0),
            applied: AtomicU64::new(0),
        }
    }

    /// Start a new request and return its id
    pub fn begin(&self) -> RequestId {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether `id` is the most recently issued request
    #[must_use]
    pub fn is_latest(&self, id: RequestId) -> bool {
        self.issued.load(Ordering::SeqCst) == id
    }

    /// Record `id` as applied if it is newer than every previously applied id
    ///
    /// # Returns
    /// `true` if the caller should apply the result, `false` if it is stale
    pub fn try_apply(&self, id: RequestId) -> bool {
        let previous = self.applied.fetch_max(id, Ordering::SeqCst);
        if previous >= id {
            crate::debug!("Discarding stale eligibility result {id} (last applied {previous})");
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::Catalog;
    use crate::core::models::PrerequisiteNode;

    fn codes(courses: &[Course]) -> Vec<String> {
        let mut codes: Vec<String> = courses.iter().map(|c| c.course_code.clone()).collect();
        codes.sort();
        codes
    }

    fn set(list: &[&str]) -> HashSet<String> {
        list.iter().map(ToString::to_string).collect()
    }

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new("Test".to_string());
        for code in ["CSC 1051", "CSC 1052", "CSC 2053", "MAT 1500"] {
            catalog.add_course(Course::new(code.to_string(), code.to_string(), 3.0));
        }
        catalog.add_prerequisite("CSC 1052", "CSC 1051".to_string());
        catalog.set_prerequisite_tree("CSC 1052", PrerequisiteNode::leaf("CSC 1051"));
        catalog.add_prerequisite("CSC 2053", "CSC 1052".to_string());
        catalog.add_prerequisite("CSC 2053", "MAT 1500".to_string());
        catalog.set_prerequisite_tree(
            "CSC 2053",
            PrerequisiteNode::all(vec![
                PrerequisiteNode::leaf("CSC 1052"),
                PrerequisiteNode::leaf("MAT 1500"),
            ]),
        );
        catalog
    }

    #[test]
    fn test_nothing_completed() {
        let eligible = eligible_courses(&catalog(), &HashSet::new());
        assert_eq!(codes(&eligible), vec!["CSC 1051", "MAT 1500"]);
    }

    #[test]
    fn test_completed_courses_excluded() {
        let eligible = eligible_courses(&catalog(), &set(&["CSC 1051"]));
        assert_eq!(codes(&eligible), vec!["CSC 1052", "MAT 1500"]);
    }

    #[test]
    fn test_inferred_prerequisite_excluded() {
        // CSC 1052 implies CSC 1051
        let eligible = eligible_courses(&catalog(), &set(&["CSC 1052"]));
        assert_eq!(codes(&eligible), vec!["MAT 1500"]);
    }

    #[test]
    fn test_idempotent() {
        let source = catalog();
        let done = set(&["CSC 1052", "MAT 1500"]);
        assert_eq!(
            codes(&eligible_courses(&source, &done)),
            codes(&eligible_courses(&source, &done))
        );
    }

    #[test]
    fn test_sequencer_discards_stale_results() {
        let sequencer = RequestSequencer::new();
        let first = sequencer.begin();
        let second = sequencer.begin();

        assert!(sequencer.is_latest(second));
        assert!(!sequencer.is_latest(first));

        assert!(sequencer.try_apply(second));
        assert!(!sequencer.try_apply(first));
        assert!(!sequencer.try_apply(second));
    }

    #[test]
    fn test_sequencer_in_order() {
        let sequencer = RequestSequencer::new();
        let first = sequencer.begin();
        assert!(sequencer.try_apply(first));
        let second = sequencer.begin();
        assert!(sequencer.try_apply(second));
    }
}
