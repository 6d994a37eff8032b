// src/test_utils.rs

#![cfg(test)] // Ensure this module is only compiled for tests

use crate::config::Config;
use crate::series::TimeSeries;
use crate::time::Day;
use crate::types::TimePeriodAnchor;
use std::sync::OnceLock;

/// Provides a common test configuration.
/// Evaluates periods one hour east of UTC, keeps at most 10 items and
/// anchors x-values at the middle of each period.
pub fn get_test_config() -> &'static Config {
    static TEST_CONFIG: OnceLock<Config> = OnceLock::new();
    TEST_CONFIG.get_or_init(|| {
        let mut config = Config::default();
        config.calendar.time_zone = "+01:00".to_string();
        config.series.maximum_item_count = Some(10);
        config.dataset.x_position = TimePeriodAnchor::Middle;
        config
    })
}

/// Builds a daily series over January 2024 from `(day_of_month, value)` pairs.
pub fn january_series(key: &'static str, days: &[(u32, f64)]) -> TimeSeries<&'static str> {
    let mut series = TimeSeries::new(key);
    for (day, value) in days {
        series
            .add(Day::new(*day, 1, 2024).expect("valid day"), *value)
            .expect("distinct days");
    }
    series
}
