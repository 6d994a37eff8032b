//! Configuration validation for periodseries
//!
//! This module contains functions for validating the configuration to ensure
//! all values are within acceptable ranges before they reach the data model.

use super::error::ConfigError;
use super::{CalendarConfig, Config, LoggingConfig, SeriesConfig};
use crate::types::LogLevel;

/// Validates the configuration.
///
/// # Errors
///
/// Returns a `ConfigError` describing the first invalid value found.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    validate_calendar_config(&config.calendar)?;
    validate_series_config(&config.series)?;
    validate_logging_config(&config.logging)?;
    Ok(())
}

/// Validates the calendar configuration.
fn validate_calendar_config(config: &CalendarConfig) -> Result<(), ConfigError> {
    if config.time_zone.trim().is_empty() {
        return Err(ConfigError::missing_value("calendar.time_zone"));
    }
    config.context().map_err(|e| {
        ConfigError::invalid_value("calendar.time_zone", &config.time_zone, e.to_string())
    })?;
    Ok(())
}

/// Validates the series limits. Negative limits are rejected here because the
/// series API only accepts unsigned limits.
fn validate_series_config(config: &SeriesConfig) -> Result<(), ConfigError> {
    if let Some(count) = config.maximum_item_count {
        if count < 0 {
            return Err(ConfigError::invalid_value(
                "series.maximum_item_count",
                count,
                "maximum_item_count must not be negative",
            ));
        }
    }
    if let Some(age) = config.maximum_item_age {
        if age < 0 {
            return Err(ConfigError::invalid_value(
                "series.maximum_item_age",
                age,
                "maximum_item_age must not be negative",
            ));
        }
    }
    Ok(())
}

/// Validates the logging configuration.
fn validate_logging_config(config: &LoggingConfig) -> Result<(), ConfigError> {
    if config.level == LogLevel::Off && config.timestamps {
        log::warn!("Logging is off; logging.timestamps has no effect.");
    }
    Ok(())
}
