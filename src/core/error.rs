//! Error types for the planner core
//!
//! None of these are fatal. Fetch failures degrade to permissive results,
//! malformed persisted state is discarded, and catalog and config errors only
//! surface to the command-line front end.

use thiserror::Error;

/// Failure while reading catalog or relationship data from a [`CourseSource`].
///
/// [`CourseSource`]: crate::core::catalog::CourseSource
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The data source could not be reached or answered with an error
    #[error("Course source unavailable: {0}")]
    Unavailable(String),
}

/// Failure while reading or writing the persisted plan.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Filesystem failure
    #[error("Failed to access plan storage: {0}")]
    Io(#[from] std::io::Error),

    /// Stored plan could not be deserialized
    #[error("Malformed persisted plan: {0}")]
    Malformed(String),

    /// Plan could not be serialized
    #[error("Failed to encode plan: {0}")]
    Encode(String),

    /// Storage backend is in an unusable state
    #[error("Plan storage error: {0}")]
    Internal(String),
}

/// Rejected plan mutation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// Setup dates have not been supplied yet
    #[error("Plan has not been set up; supply a start and graduation date first")]
    NotInitialized,

    /// No semester with the given id exists in the plan
    #[error("Unknown semester: '{0}'")]
    UnknownSemester(String),
}

/// Failure while loading a catalog file.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Filesystem failure
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    /// JSON catalog did not match the expected schema
    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV catalog is missing a required section or field
    #[error("Invalid catalog format: {0}")]
    Format(String),

    /// Two catalog entries share a course code
    #[error("Duplicate course code in catalog: '{0}'")]
    DuplicateCourse(String),
}

/// Failure while reading, writing or editing the CLI configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Filesystem failure
    #[error("Failed to access config file: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for the expected schema
    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config could not be serialized
    #[error("Failed to encode config: {0}")]
    Encode(#[from] toml::ser::Error),

    /// Key does not name a config field
    #[error("Unknown config key: '{0}'")]
    UnknownKey(String),

    /// Value cannot be converted to the field's type
    #[error("Invalid value for '{key}': '{value}'")]
    InvalidValue {
        /// Config key being set
        key: String,
        /// Rejected value
        value: String,
    },
}
