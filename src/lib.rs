// src/lib.rs

//! # periodseries
//!
//! Calendar time periods (years down to milliseconds) and time series keyed by them.
//!
//! Periods are ordered, navigable with `previous`/`next`, and convert to absolute
//! milliseconds through an explicit [`CalendarContext`]. A [`TimeSeries`] holds one
//! observation per period, and a [`TimeSeriesCollection`] projects several series
//! onto an x/y dataset view for charting code.
//!
//! ```
//! use periodseries::{CalendarContext, Month, TimeSeries, TimeSeriesCollection, XyDataset};
//!
//! let mut sales = TimeSeries::new("sales");
//! sales.add(Month::new(1, 2024)?, 10.0)?;
//! sales.add(Month::new(2, 2024)?, 12.5)?;
//!
//! let collection = TimeSeriesCollection::with_series(sales, CalendarContext::utc());
//! assert_eq!(collection.item_count(0)?, 2);
//! assert_eq!(collection.y(0, 1)?, Some(12.5));
//! # Ok::<(), periodseries::SeriesError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod series;
pub mod time;
pub mod types;

#[cfg(test)]
mod test_utils;

pub use config::Config;
pub use error::{Result, SeriesError};
pub use series::{
    DataPoint, DomainInfo, IntervalXyDataset, SimpleTimePeriod, TimePeriodValue,
    TimePeriodValues, TimePeriodValuesCollection, TimeSeries, TimeSeriesCollection,
    TimeSeriesDataItem, XyDataset,
};
pub use time::{
    CalendarContext, CalendarUnit, Day, FixedMillisecond, Granularity, Hour, Millisecond,
    Minute, Month, Period, Quarter, RegularTimePeriod, Second, TimePeriodFormatError, Week,
    Year,
};
pub use types::{LogLevel, Range, TimePeriodAnchor};

/// Name of the configuration file looked up in [`Config::config_dir`].
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Loads the configuration and installs the global logger.
///
/// With `config_path` set, that file is loaded; otherwise `config.toml` in the
/// platform config directory is used when present. Missing files fall back to
/// defaults. The logger level and timestamp format come from the `[logging]`
/// section.
///
/// # Errors
///
/// Returns `SeriesError::Config` if the configuration is invalid and
/// `SeriesError::Logger` if a global logger is already installed.
#[cfg(feature = "logging")]
pub fn init(config_path: Option<&str>) -> Result<Config> {
    let config = match config_path {
        Some(path) => Config::load(path)?,
        None => match Config::config_dir() {
            Some(dir) => Config::load(dir.join(CONFIG_FILE_NAME))?,
            None => {
                let mut config = Config::default();
                config.apply_env_vars()?;
                config.validate()?;
                config
            }
        },
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(config.logging.level.into());
    if !config.logging.timestamps {
        builder.format_timestamp(None);
    }
    builder
        .try_init()
        .map_err(|e| SeriesError::Logger(e.to_string()))?;

    log::info!(
        "periodseries initialised (calendar {}, x position {})",
        config.calendar.time_zone,
        config.dataset.x_position
    );
    Ok(config)
}
