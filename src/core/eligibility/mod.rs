//! Prerequisite satisfaction engine
//!
//! Everything here is a pure function of the catalog, its relationship data and
//! the completed set. Data lookups that fail make the affected course eligible.

pub mod calculator;
pub mod evaluator;
pub mod inference;

pub use calculator::{eligible_courses, eligible_given_implied, RequestId, RequestSequencer};
pub use evaluator::{is_satisfied, is_satisfied_for};
pub use inference::{infer_completed, infer_completed_from};
