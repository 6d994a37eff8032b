//! Configuration management for periodseries
//!
//! This module handles loading, validating, and providing access to the
//! crate configuration: the calendar used for millisecond conversions, default
//! series limits, the dataset x-anchor and logging. It supports loading from
//! TOML files and environment variable overrides.

#![deny(missing_docs)]
#![forbid(unsafe_code)]

mod error;
pub mod validation;

#[cfg(test)]
#[path = "tests/validation_tests.rs"]
mod validation_tests;

#[cfg(test)]
#[path = "tests/config_mod_tests.rs"]
mod config_mod_tests;

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::time::CalendarContext;
use crate::types::{LogLevel, TimePeriodAnchor};

/// Re-export the error type
pub use error::ConfigError;

/// The environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "PERIODSERIES_";

/// The application name used for finding config directories
const APP_NAME: &str = "periodseries";

/// Main configuration structure for periodseries.
///
/// Every section has defaults, so a file only needs the values it changes.
///
/// # Example
///
/// ```no_run
/// use periodseries::config::Config;
///
/// // A missing file falls back to defaults.
/// let config = Config::load("path/that/hopefully/does/not/exist.toml").unwrap();
/// assert_eq!(config.calendar.time_zone, "UTC");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    /// Calendar used to convert periods to milliseconds
    pub calendar: CalendarConfig,

    /// Defaults applied to series built from configuration
    pub series: SeriesConfig,

    /// Dataset projection settings
    pub dataset: DatasetConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Calendar configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct CalendarConfig {
    /// `UTC`, a fixed offset such as `+05:30`, or an IANA zone name
    pub time_zone: String,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            time_zone: "UTC".to_string(),
        }
    }
}

impl CalendarConfig {
    /// Builds the calendar context named by `time_zone`.
    pub fn context(&self) -> crate::error::Result<CalendarContext> {
        self.time_zone.parse()
    }
}

/// Series limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct SeriesConfig {
    /// Maximum number of items retained per series. `None` means no limit.
    pub maximum_item_count: Option<i64>,
    /// Maximum item age in periods, measured from the newest item. `None` means no limit.
    pub maximum_item_age: Option<i64>,
}

/// Dataset configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct DatasetConfig {
    /// Point of each period used as its x-coordinate
    pub x_position: TimePeriodAnchor,
}

/// Logging configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct LoggingConfig {
    /// Log level
    pub level: LogLevel,
    /// Whether to prefix log lines with timestamps
    pub timestamps: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            timestamps: true,
        }
    }
}

impl Config {
    /// Loads the configuration from the specified path.
    ///
    /// Environment variable overrides with the `PERIODSERIES_` prefix are applied on
    /// top of the file, and the result is validated. A missing file falls back to
    /// the built-in defaults with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read or parsed,
    /// or if the result fails validation.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        match fs::read_to_string(path) {
            Ok(config_str) => {
                let mut config = Self::from_toml_str(&config_str)?;
                config.apply_env_vars()?;
                config.validate()?;
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!("Config file not found at {}, using defaults", path.display());
                let mut config = Self::default();
                config.apply_env_vars()?;
                config.validate()?;
                Ok(config)
            }
            Err(e) => Err(ConfigError::io(path, e)),
        }
    }

    /// Parses a TOML document without applying overrides or validation.
    pub fn from_toml_str(config_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(config_str)?)
    }

    /// Serialises the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    /// Applies environment variable overrides to the configuration.
    ///
    /// Environment variables should be prefixed with `PERIODSERIES_` and use `_` as a
    /// separator. For example, to set the log level, use `PERIODSERIES_LOGGING_LEVEL=debug`.
    ///
    /// # Errors
    ///
    /// Returns an error if any environment variable cannot be parsed.
    pub fn apply_env_vars(&mut self) -> Result<(), ConfigError> {
        for (key, value) in env::vars() {
            let Some(stripped) = key.strip_prefix(ENV_PREFIX) else {
                continue;
            };
            let value = value.trim();
            if value.is_empty() {
                continue;
            }

            match stripped.to_lowercase().as_str() {
                "logging_level" => {
                    self.logging.level = value.parse().map_err(|_| {
                        ConfigError::invalid_value("logging.level", value, "Invalid log level")
                    })?;
                }
                "logging_timestamps" => {
                    self.logging.timestamps = value.parse().map_err(|_| {
                        ConfigError::invalid_value(
                            "logging.timestamps",
                            value,
                            "Expected true or false",
                        )
                    })?;
                }
                "calendar_time_zone" => {
                    self.calendar.time_zone = value.to_string();
                }
                "dataset_x_position" => {
                    self.dataset.x_position = value.parse().map_err(|_| {
                        ConfigError::invalid_value(
                            "dataset.x_position",
                            value,
                            "Expected start, middle or end",
                        )
                    })?;
                }
                "series_maximum_item_count" => {
                    self.series.maximum_item_count = Some(parse_limit(
                        "series.maximum_item_count",
                        value,
                    )?);
                }
                "series_maximum_item_age" => {
                    self.series.maximum_item_age =
                        Some(parse_limit("series.maximum_item_age", value)?);
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validation::validate_config(self)
    }

    /// Returns the path to the directory where configuration files should be stored.
    ///
    /// This is OS-specific:
    /// - Linux: `$HOME/.config/periodseries`
    /// - macOS: `$HOME/Library/Application Support/org.periodseries.periodseries`
    /// - Windows: `%APPDATA%\\periodseries\\periodseries`
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("org", "periodseries", APP_NAME)
            .map(|proj_dirs| proj_dirs.config_dir().to_path_buf())
    }
}

fn parse_limit(field: &str, value: &str) -> Result<i64, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::invalid_value(field, value, "Expected an integer"))
}
