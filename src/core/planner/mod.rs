//! Degree plan state machine, term generation, history and validation

pub mod history;
pub mod sequence;
pub mod storage;
pub mod store;
pub mod validation;

pub use history::{HistoryEntry, HistoryManager, HISTORY_LIMIT};
pub use sequence::{
    default_setup_dates, generate_default_semesters, generate_default_semesters_for_year,
    generate_semesters, suggest_graduation,
};
pub use storage::{InMemoryStorage, JsonFileStorage, PlanStorage};
pub use store::{PlanProgress, PlanStore, DEFAULT_GRADUATION_CREDITS};
pub use validation::{
    classify_load, validate_placement, validate_plan, CreditLoad, PlacementIssue,
    PlacementValidation,
};
