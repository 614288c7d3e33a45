//! Core module for common functionality across all targets

pub mod catalog;
pub mod config;
pub mod eligibility;
pub mod error;
pub mod models;
pub mod planner;

/// Returns the current version of the `NuPlanner` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
