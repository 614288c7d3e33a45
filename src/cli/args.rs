//! CLI argument definitions for `NuPlanner`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use nu_planner::config::ConfigOverrides;
use nu_planner::core::models::TermDate;
use nu_planner::logger::Level;

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to `logger::Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `plan_file`, `max_credits`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum PlanSubcommand {
    /// Set start and graduation dates and regenerate every semester.
    ///
    /// Without --start the plan runs from Fall of this year to Spring four
    /// years later. Without --grad the graduation date is suggested from --start.
    Setup {
        /// First month of study
        #[arg(long, value_name = "M/YYYY")]
        start: Option<TermDate>,
        /// Graduation month
        #[arg(long, value_name = "M/YYYY")]
        grad: Option<TermDate>,
    },
    /// Show semesters, placements, credit loads and progress.
    Show,
    /// Append the next Spring or Fall semester.
    AddSemester,
    /// Remove a semester and everything placed in it.
    RemoveSemester {
        /// Semester id (e.g., `fall-2025`)
        #[arg(value_name = "SEMESTER")]
        semester: String,
    },
    /// Place a catalog course in a semester.
    Place {
        /// Course code (e.g., "CSC 1051")
        #[arg(value_name = "CODE")]
        code: String,
        /// Semester id
        #[arg(value_name = "SEMESTER")]
        semester: String,
    },
    /// Remove one placed course.
    Remove {
        /// Instance id shown by `plan show`
        #[arg(value_name = "INSTANCE")]
        instance: String,
        /// Semester id holding the placement
        #[arg(value_name = "SEMESTER")]
        semester: String,
    },
    /// Move a placed course to another semester (or position).
    Move {
        /// Instance id shown by `plan show`
        #[arg(value_name = "INSTANCE")]
        instance: String,
        /// Source semester id
        #[arg(value_name = "FROM")]
        from: String,
        /// Destination semester id
        #[arg(value_name = "TO")]
        to: String,
        /// Position in the destination (appends when omitted)
        #[arg(long, value_name = "N")]
        index: Option<usize>,
    },
    /// Check prerequisite ordering and credit loads for the whole plan.
    Check,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// List courses whose prerequisites are satisfied.
    ///
    /// A completed course with exactly one prerequisite also counts that
    /// prerequisite as completed.
    Eligible {
        /// Completed course codes (repeat or separate with commas)
        #[arg(short, long, value_name = "CODE", num_args = 1.., value_delimiter = ',')]
        completed: Vec<String>,

        /// Also print the completed set after inference
        #[arg(long)]
        show_implied: bool,

        /// Only list courses whose code starts with this department prefix
        #[arg(long, value_name = "DEPT")]
        department: Option<String>,

        /// Only list courses whose code or name contains this text
        #[arg(long, value_name = "TEXT")]
        search: Option<String>,
    },
    /// Build and edit the degree plan.
    Plan {
        #[command(subcommand)]
        subcommand: PlanSubcommand,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "nuplanner",
    about = "NuPlanner course eligibility and degree planning",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Course catalog file for this run (`.json` or `.csv`)
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Plan file for this run
    #[arg(long = "plan-file", value_name = "FILE")]
    pub plan_file: Option<PathBuf>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// # Returns
    /// A `ConfigOverrides` struct with values from CLI flags, where `None` means no override.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self
                .config_log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.config_verbose,
            catalog_file: self
                .catalog
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            plan_file: self
                .plan_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
        }
    }
}
