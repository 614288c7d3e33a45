//! Shared library for `NuPlanner`
//! Contains the prerequisite engine and degree-plan state machine used by the CLI
//! and by embedding front ends.

pub mod core;
pub mod logger;

pub use core::config;
pub use core::get_version;
