//! Degree plan model

use super::{Semester, TermDate};
use crate::core::catalog::CatalogFilter;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Start and graduation dates chosen during plan setup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupDates {
    /// First term of study
    pub start_date: TermDate,
    /// Graduation term
    pub grad_date: TermDate,
}

impl SetupDates {
    /// Create setup dates
    #[must_use]
    pub const fn new(start_date: TermDate, grad_date: TermDate) -> Self {
        Self {
            start_date,
            grad_date,
        }
    }
}

/// Represents a multi-term degree plan
///
/// A plan without setup dates is uninitialized and has no semesters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DegreePlan {
    /// Semesters in chronological order
    pub semesters: Vec<Semester>,
    /// Dates the semesters were generated from
    pub setup_dates: Option<SetupDates>,
    /// Active catalog filter
    pub filter: CatalogFilter,
}

impl DegreePlan {
    /// Whether setup dates have been supplied
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.setup_dates.is_some()
    }

    /// Index of a semester in plan order
    #[must_use]
    pub fn semester_index(&self, semester_id: &str) -> Option<usize> {
        self.semesters.iter().position(|s| s.id == semester_id)
    }

    /// Look up a semester by id
    #[must_use]
    pub fn semester(&self, semester_id: &str) -> Option<&Semester> {
        self.semesters.iter().find(|s| s.id == semester_id)
    }

    /// Codes of every course placed anywhere in the plan
    #[must_use]
    pub fn placed_course_codes(&self) -> HashSet<String> {
        self.semesters
            .iter()
            .flat_map(|s| s.courses.iter().map(|c| c.course_code.clone()))
            .collect()
    }

    /// Total credit hours across every semester
    #[must_use]
    pub fn total_credits(&self) -> f32 {
        self.semesters.iter().map(Semester::total_credits).sum()
    }

    /// Get total number of placed courses
    #[must_use]
    pub fn course_count(&self) -> usize {
        self.semesters.iter().map(|s| s.courses.len()).sum()
    }
}

/// On-disk shape of a plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedPlan {
    /// Semesters in chronological order
    #[serde(default)]
    pub semesters: Vec<Semester>,
    /// Active catalog filter
    #[serde(default)]
    pub filter: CatalogFilter,
    /// Setup dates, `null` when the plan was never set up
    #[serde(default)]
    pub setup_dates: Option<SetupDates>,
    /// Mirrors `setup_dates.is_some()`
    #[serde(default)]
    pub is_setup_complete: bool,
}

impl From<&DegreePlan> for PersistedPlan {
    fn from(plan: &DegreePlan) -> Self {
        Self {
            semesters: plan.semesters.clone(),
            filter: plan.filter.clone(),
            setup_dates: plan.setup_dates,
            is_setup_complete: plan.is_initialized(),
        }
    }
}

impl From<PersistedPlan> for DegreePlan {
    /// Restore a plan; without setup dates the plan is uninitialized and its semesters are dropped
    fn from(stored: PersistedPlan) -> Self {
        let semesters = if stored.setup_dates.is_some() {
            stored.semesters
        } else {
            Vec::new()
        };
        Self {
            semesters,
            setup_dates: stored.setup_dates,
            filter: stored.filter,
        }
    }
}
