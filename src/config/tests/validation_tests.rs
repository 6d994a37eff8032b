use crate::config::validation::validate_config;
use crate::config::{
    CalendarConfig, Config, ConfigError, DatasetConfig, LoggingConfig, SeriesConfig,
};
use crate::types::{LogLevel, TimePeriodAnchor};

fn create_test_config() -> Config {
    Config {
        calendar: CalendarConfig {
            time_zone: "+01:00".to_string(),
        },
        series: SeriesConfig {
            maximum_item_count: Some(1_000),
            maximum_item_age: Some(365),
        },
        dataset: DatasetConfig {
            x_position: TimePeriodAnchor::Middle,
        },
        logging: LoggingConfig {
            level: LogLevel::Warn,
            timestamps: false,
        },
    }
}

#[test]
fn test_valid_config() -> Result<(), ConfigError> {
    let config = create_test_config();
    validate_config(&config)?;
    Ok(())
}

#[test]
fn test_invalid_time_zone() {
    let mut config = create_test_config();
    config.calendar.time_zone = "+25:00".to_string();
    match validate_config(&config) {
        Err(ConfigError::InvalidValue { field, .. }) => assert_eq!(field, "calendar.time_zone"),
        other => panic!("expected InvalidValue, got {:?}", other),
    }
}

#[test]
fn test_non_ascii_offset_is_rejected() {
    let mut config = create_test_config();
    for zone in ["+1é1", "-é"] {
        config.calendar.time_zone = zone.to_string();
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "calendar.time_zone"
        ));
    }
}

#[test]
fn test_negative_maximum_item_age() {
    let mut config = create_test_config();
    config.series.maximum_item_age = Some(-1);
    match validate_config(&config) {
        Err(ConfigError::InvalidValue { field, value, .. }) => {
            assert_eq!(field, "series.maximum_item_age");
            assert_eq!(value, "-1");
        }
        other => panic!("expected InvalidValue, got {:?}", other),
    }
}

#[test]
fn test_logging_off_is_valid() {
    let mut config = create_test_config();
    config.logging.level = LogLevel::Off;
    config.logging.timestamps = true;
    assert!(validate_config(&config).is_ok());
}

#[cfg(feature = "timezones")]
#[test]
fn test_named_time_zone() {
    let mut config = create_test_config();
    config.calendar.time_zone = "Europe/Paris".to_string();
    assert!(validate_config(&config).is_ok());
}
