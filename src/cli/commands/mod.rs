//! CLI command handlers for `NuPlanner`.
//!
//! Each subcommand is implemented in its own submodule.

pub mod config;
pub mod eligible;
pub mod plan;

use nu_planner::config::Config;
use nu_planner::core::catalog::{load_catalog, Catalog};
use nu_planner::error;
use std::path::PathBuf;

/// Load the catalog named by `paths.catalog_file`
///
/// # Errors
/// Returns a printable `✗` message if no catalog is configured or it cannot be loaded
pub fn load_configured_catalog(config: &Config) -> Result<Catalog, String> {
    if config.paths.catalog_file.is_empty() {
        return Err("✗ No catalog configured. Pass --catalog or set `catalog_file`.".to_string());
    }

    let path = PathBuf::from(&config.paths.catalog_file);
    load_catalog(&path).map_err(|e| {
        error!("Failed to load catalog {}: {e}", path.display());
        format!("✗ Failed to load catalog {}: {e}", path.display())
    })
}
