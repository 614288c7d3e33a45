//! Config command handler

use crate::args::ConfigSubcommand;
use nu_planner::config::Config;
use nu_planner::info;
use std::io::{self, Write};

/// Dispatch config subcommands
///
/// # Errors
/// Returns a printable `✗` message when a key is unknown or the config file cannot be written
pub fn run(
    subcommand: Option<ConfigSubcommand>,
    config: &mut Config,
    defaults: &Config,
) -> Result<(), String> {
    match subcommand {
        None => {
            print_config(config);
            Ok(())
        }
        Some(ConfigSubcommand::Get { key: None }) => {
            print_config(config);
            Ok(())
        }
        Some(ConfigSubcommand::Get { key: Some(key) }) => config
            .get(&key)
            .map(|value| println!("{value}"))
            .ok_or_else(|| format!("✗ Unknown config key: '{key}'")),
        Some(ConfigSubcommand::Set { key, value }) => {
            config.set(&key, &value).map_err(|e| format!("✗ {e}"))?;
            save(config)?;
            println!("✓ Set {key} = {}", config.get(&key).unwrap_or(value));
            Ok(())
        }
        Some(ConfigSubcommand::Unset { key }) => {
            config.unset(&key, defaults).map_err(|e| format!("✗ {e}"))?;
            save(config)?;
            println!("✓ Reset {key} to default");
            Ok(())
        }
        Some(ConfigSubcommand::Reset) => handle_reset(),
    }
}

fn print_config(config: &Config) {
    println!("\n=== Configuration ===\n");
    print!("{config}");
}

fn save(config: &Config) -> Result<(), String> {
    let path = Config::get_config_file_path();
    config
        .save_to(&path)
        .map_err(|e| format!("✗ Failed to save config to {}: {e}", path.display()))?;
    info!("Config saved to {}", path.display());
    Ok(())
}

fn handle_reset() -> Result<(), String> {
    if !Config::get_config_file_path().exists() {
        println!("✓ Config is already at defaults");
        return Ok(());
    }

    print!("Reset config to defaults? Planner paths and credit limits will be restored. (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    io::stdin().read_line(&mut response).ok();

    let response = response.trim();
    if response.eq_ignore_ascii_case("y") || response.eq_ignore_ascii_case("yes") {
        Config::reset().map_err(|e| format!("✗ Failed to remove config file: {e}"))?;
        println!("✓ Config reset to defaults");
    } else {
        println!("✗ Reset cancelled");
    }
    Ok(())
}
