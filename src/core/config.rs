//! Configuration module for `NuPlanner`

use crate::core::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Variable expanded to the config directory in path values
const DIR_VARIABLE: &str = "$NU_PLANNER";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Course catalog file (`.json` or `.csv`)
    #[serde(default)]
    pub catalog_file: String,
    /// Persisted degree plan (JSON)
    #[serde(default)]
    pub plan_file: String,
}

/// Planner limits. A value of `0` means "not set" and is filled from defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Minimum credits for a normal semester load
    #[serde(default)]
    pub min_credits: f32,
    /// Maximum credits for a normal semester load
    #[serde(default)]
    pub max_credits: f32,
    /// Credits required to graduate
    #[serde(default)]
    pub graduation_credits: f32,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
    /// Planner settings
    #[serde(default)]
    pub planner: PlannerConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override catalog file
    pub catalog_file: Option<String>,
    /// Override plan file
    pub plan_file: Option<String>,
}

fn merge_string(target: &mut String, default: &str) -> bool {
    if target.is_empty() && !default.is_empty() {
        default.clone_into(target);
        return true;
    }
    false
}

fn merge_number(target: &mut f32, default: f32) -> bool {
    if *target <= 0.0 && default > 0.0 {
        *target = default;
        return true;
    }
    false
}

fn parse_number(key: &str, value: &str) -> Result<f32, ConfigError> {
    value
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .ok_or_else(|| ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        })
}

impl Config {
    /// Get the `$NU_PLANNER` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/nuplanner`
    /// - macOS: `~/Library/Application Support/nuplanner`
    /// - Windows: `%APPDATA%\nuplanner`
    #[must_use]
    pub fn get_nuplanner_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("nuplanner")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Only fields that are empty (or zero) here and set in `defaults` are updated,
    /// so upgrading picks up new fields without touching user settings.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let merged = [
            merge_string(&mut self.logging.level, &defaults.logging.level),
            merge_string(&mut self.logging.file, &defaults.logging.file),
            merge_string(&mut self.paths.catalog_file, &defaults.paths.catalog_file),
            merge_string(&mut self.paths.plan_file, &defaults.paths.plan_file),
            merge_number(&mut self.planner.min_credits, defaults.planner.min_credits),
            merge_number(&mut self.planner.max_credits, defaults.planner.max_credits),
            merge_number(
                &mut self.planner.graduation_credits,
                defaults.planner.graduation_credits,
            ),
        ];
        merged.contains(&true)
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Overrides last for this run only; the config file is not modified.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let mut config = Config::load();
    /// let overrides = ConfigOverrides {
    ///     plan_file: Some("/tmp/plan.json".to_string()),
    ///     ..Default::default()
    /// };
    /// config.apply_overrides(&overrides);
    /// ```
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file = Self::expand_variables(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
        if let Some(catalog_file) = &overrides.catalog_file {
            self.paths.catalog_file = Self::expand_variables(catalog_file);
        }
        if let Some(plan_file) = &overrides.plan_file {
            self.paths.plan_file = Self::expand_variables(plan_file);
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds, inside
    /// [`get_nuplanner_dir`](Self::get_nuplanner_dir).
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_nuplanner_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$NU_PLANNER` to the config directory
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_nuplanner_dir();
            value.replace(DIR_VARIABLE, dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// `$NU_PLANNER` is expanded in path values. Missing fields use serde defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.catalog_file = Self::expand_variables(&config.paths.catalog_file);
        config.paths.plan_file = Self::expand_variables(&config.paths.plan_file);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// # Panics
    /// Panics if the compiled-in default configuration is invalid TOML.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from the user config file, or create it from defaults
    ///
    /// Falls back to defaults if the file cannot be read or parsed.
    #[must_use]
    pub fn load() -> Self {
        Self::load_from(&Self::get_config_file_path())
    }

    /// Load configuration from `path`, creating it from defaults on first run
    ///
    /// Missing fields are merged from defaults and written back.
    #[must_use]
    pub fn load_from(path: &Path) -> Self {
        let defaults = Self::from_defaults();

        if !path.exists() {
            if let Err(e) = defaults.save_to(path) {
                crate::debug!("Could not write default config to {}: {e}", path.display());
            }
            return defaults;
        }

        let parsed = fs::read_to_string(path)
            .map_err(ConfigError::from)
            .and_then(|content| Self::from_toml(&content));

        match parsed {
            Ok(mut config) => {
                if config.merge_defaults(&defaults) {
                    if let Err(e) = config.save_to(path) {
                        crate::debug!("Could not update config {}: {e}", path.display());
                    }
                }
                config
            }
            Err(e) => {
                crate::warn!("Ignoring config {}: {e}", path.display());
                defaults
            }
        }
    }

    /// Save configuration to the user config file
    ///
    /// # Errors
    /// Returns an error if the config cannot be encoded or written
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::get_config_file_path())
    }

    /// Save configuration to `path`, creating parent directories
    ///
    /// # Errors
    /// Returns an error if the config cannot be encoded or written
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(path, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `catalog_file`, `plan_file`,
    /// `min_credits`, `max_credits`, `graduation_credits` (dashes are accepted
    /// in place of underscores).
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key.replace('-', "_").as_str() {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "catalog_file" => Some(self.paths.catalog_file.clone()),
            "plan_file" => Some(self.paths.plan_file.clone()),
            "min_credits" => Some(self.planner.min_credits.to_string()),
            "max_credits" => Some(self.planner.max_credits.to_string()),
            "graduation_credits" => Some(self.planner.graduation_credits.to_string()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Updates the in-memory config only. Call [`save()`](Config::save) to persist.
    ///
    /// # Errors
    /// Returns an error if the key is unknown or the value cannot be parsed
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key.replace('-', "_").as_str() {
            "level" => value.clone_into(&mut self.logging.level),
            "file" => self.logging.file = Self::expand_variables(value),
            "verbose" => {
                self.logging.verbose =
                    value
                        .parse::<bool>()
                        .map_err(|_| ConfigError::InvalidValue {
                            key: key.to_string(),
                            value: value.to_string(),
                        })?;
            }
            "catalog_file" => self.paths.catalog_file = Self::expand_variables(value),
            "plan_file" => self.paths.plan_file = Self::expand_variables(value),
            "min_credits" => self.planner.min_credits = parse_number(key, value)?,
            "max_credits" => self.planner.max_credits = parse_number(key, value)?,
            "graduation_credits" => self.planner.graduation_credits = parse_number(key, value)?,
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    /// Reset a single configuration value to its default
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), ConfigError> {
        match key.replace('-', "_").as_str() {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "catalog_file" => self
                .paths
                .catalog_file
                .clone_from(&defaults.paths.catalog_file),
            "plan_file" => self.paths.plan_file.clone_from(&defaults.paths.plan_file),
            "min_credits" => self.planner.min_credits = defaults.planner.min_credits,
            "max_credits" => self.planner.max_credits = defaults.planner.max_credits,
            "graduation_credits" => {
                self.planner.graduation_credits = defaults.planner.graduation_credits;
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    /// Reset all configuration to defaults by deleting the config file
    ///
    /// The next [`load()`](Config::load) recreates it. Succeeds if there is no file.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be deleted
    pub fn reset() -> Result<(), ConfigError> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  catalog_file = \"{}\"", self.paths.catalog_file)?;
        writeln!(f, "  plan_file = \"{}\"", self.paths.plan_file)?;

        writeln!(f, "\n[planner]")?;
        writeln!(f, "  min_credits = {}", self.planner.min_credits)?;
        writeln!(f, "  max_credits = {}", self.planner.max_credits)?;
        writeln!(f, "  graduation_credits = {}", self.planner.graduation_credits)?;

        Ok(())
    }
}
