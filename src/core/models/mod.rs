//! Data models for `NuPlanner`

pub mod course;
pub mod plan;
pub mod prerequisite;
pub mod semester;

pub use course::Course;
pub use plan::{DegreePlan, PersistedPlan, SetupDates};
pub use prerequisite::PrerequisiteNode;
pub use semester::{PlacedCourse, Season, Semester, Term, TermDate};
