//! Credit-load and prerequisite-ordering checks
//!
//! Both checks are computed on demand from the current semesters and never cached.

use crate::core::catalog::CourseSource;
use crate::core::models::Semester;
use rayon::prelude::*;
use std::collections::HashSet;
use std::fmt;

/// Credit load of one semester relative to its bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreditLoad {
    /// Some credits, but fewer than the minimum
    Underloaded,
    /// Within bounds, or empty
    Normal,
    /// More than the maximum
    Overloaded,
}

impl fmt::Display for CreditLoad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Underloaded => write!(f, "underloaded"),
            Self::Normal => write!(f, "normal"),
            Self::Overloaded => write!(f, "overloaded"),
        }
    }
}

/// Classify a semester's credit load
///
/// An empty semester is `Normal`.
#[must_use]
pub fn classify_load(semester: &Semester) -> CreditLoad {
    let total = semester.total_credits();
    if total > semester.max_credits {
        CreditLoad::Overloaded
    } else if total > 0.0 && total < semester.min_credits {
        CreditLoad::Underloaded
    } else {
        CreditLoad::Normal
    }
}

/// Outcome of checking one placement against earlier semesters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementValidation {
    /// Whether every direct prerequisite is placed in an earlier semester
    pub is_valid: bool,
    /// Direct prerequisites not placed in an earlier semester
    pub missing: Vec<String>,
}

impl PlacementValidation {
    /// A passing result with nothing missing
    #[must_use]
    pub const fn valid() -> Self {
        Self {
            is_valid: true,
            missing: Vec::new(),
        }
    }
}

/// Check that every direct prerequisite of `course_code` is placed before `semester_id`
///
/// "Before" means in a semester at a lower index in `semesters`. An unknown
/// `semester_id` has no earlier semesters. Only the flat direct prerequisite
/// list is consulted, not the boolean tree. A failed lookup is treated as valid.
pub fn validate_placement<S: CourseSource + ?Sized>(
    course_code: &str,
    semester_id: &str,
    semesters: &[Semester],
    source: &S,
) -> PlacementValidation {
    let prerequisites = match source.direct_prerequisites(course_code) {
        Ok(prereqs) => prereqs,
        Err(e) => {
            crate::warn!("Failed to fetch prerequisites for {course_code}, assuming valid: {e}");
            return PlacementValidation::valid();
        }
    };

    let earlier = semesters
        .iter()
        .position(|s| s.id == semester_id)
        .unwrap_or(0);
    let earlier_courses: HashSet<&str> = semesters[..earlier]
        .iter()
        .flat_map(|s| s.courses.iter().map(|c| c.course_code.as_str()))
        .collect();

    let missing: Vec<String> = prerequisites
        .into_iter()
        .filter(|p| !earlier_courses.contains(p.as_str()))
        .collect();

    PlacementValidation {
        is_valid: missing.is_empty(),
        missing,
    }
}

/// A placement whose prerequisites are not all placed earlier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementIssue {
    /// Semester holding the placement
    pub semester_id: String,
    /// Placement instance
    pub instance_id: String,
    /// Placed course
    pub course_code: String,
    /// Prerequisites not placed earlier
    pub missing: Vec<String>,
}

/// Validate every placement in the plan concurrently
///
/// # Returns
/// Issues in plan order (semester, then position)
pub fn validate_plan<S: CourseSource + ?Sized>(
    semesters: &[Semester],
    source: &S,
) -> Vec<PlacementIssue> {
    let placements: Vec<(&Semester, usize)> = semesters
        .iter()
        .flat_map(|s| (0..s.courses.len()).map(move |i| (s, i)))
        .collect();

    placements
        .par_iter()
        .filter_map(|&(semester, index)| {
            let placed = &semester.courses[index];
            let result = validate_placement(&placed.course_code, &semester.id, semesters, source);
            (!result.is_valid).then(|| PlacementIssue {
                semester_id: semester.id.clone(),
                instance_id: placed.instance_id.clone(),
                course_code: placed.course_code.clone(),
                missing: result.missing,
            })
        })
        .collect()
}
