use super::*;
use serial_test::serial;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

#[test]
fn test_config_default_values() {
    let cfg = Config::default();
    assert_eq!(cfg.calendar.time_zone, "UTC");
    assert_eq!(cfg.series.maximum_item_count, None);
    assert_eq!(cfg.series.maximum_item_age, None);
    assert_eq!(cfg.dataset.x_position, TimePeriodAnchor::Start);
    assert_eq!(cfg.logging.level, LogLevel::Info);
    assert!(cfg.logging.timestamps);
    assert_eq!(cfg.calendar.context().unwrap(), CalendarContext::utc());
}

#[test]
#[serial]
fn test_load_existing_file_and_missing_file() {
    let dir = tempdir().expect("create temp dir");
    let mut cfg = Config::default();
    cfg.calendar.time_zone = "+02:00".to_string();
    cfg.series.maximum_item_count = Some(24);
    cfg.dataset.x_position = TimePeriodAnchor::Middle;
    cfg.logging.level = LogLevel::Debug;

    let toml_string = toml::to_string(&cfg).expect("serialize config");
    let config_path = dir.path().join("cfg.toml");
    fs::write(&config_path, toml_string).unwrap();

    let loaded = Config::load(&config_path).expect("load existing config");
    assert_eq!(loaded, cfg);

    // Nonexistent file should fall back to defaults
    let missing_path = dir.path().join("missing.toml");
    let default_loaded = Config::load(&missing_path).expect("load missing");
    assert_eq!(default_loaded, Config::default());
}

#[test]
#[serial]
fn test_partial_file_keeps_defaults() {
    let dir = tempdir().expect("create temp dir");
    let config_path = dir.path().join("partial.toml");
    fs::write(&config_path, "[series]\nmaximum_item_age = 12\n").unwrap();

    let loaded = Config::load(&config_path).expect("load partial config");
    assert_eq!(loaded.series.maximum_item_age, Some(12));
    assert_eq!(loaded.calendar.time_zone, "UTC");
    assert_eq!(loaded.logging, LoggingConfig::default());
}

#[test]
#[serial]
fn test_load_invalid_toml_fails() {
    let dir = tempdir().expect("create temp dir");
    let invalid_path = dir.path().join("bad.toml");
    fs::write(&invalid_path, "not = [valid\n").unwrap();

    let err = Config::load(&invalid_path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError(_)));
    assert!(err.to_string().starts_with("malformed configuration"));
}

#[test]
fn test_unreadable_config_is_io_error() {
    let dir = tempdir().expect("create temp dir");
    match Config::load(dir.path()) {
        Err(ConfigError::Io { path, .. }) => assert_eq!(path, dir.path()),
        other => panic!("expected Io, got {:?}", other),
    }
}

#[test]
fn test_unknown_field_is_rejected() {
    let err = Config::from_toml_str("[calendar]\ntime_zone = \"UTC\"\nlocale = \"fr\"\n");
    assert!(err.is_err());
}

#[test]
#[serial]
fn test_load_rejects_negative_limit() {
    let dir = tempdir().expect("create temp dir");
    let config_path = dir.path().join("negative.toml");
    fs::write(&config_path, "[series]\nmaximum_item_count = -3\n").unwrap();

    let err = Config::load(&config_path).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "series.maximum_item_count"));
}

#[test]
#[serial]
fn test_apply_env_vars() {
    std::env::set_var("PERIODSERIES_LOGGING_LEVEL", "debug");
    std::env::set_var("PERIODSERIES_CALENDAR_TIME_ZONE", "-05:00");
    std::env::set_var("PERIODSERIES_DATASET_X_POSITION", "end");
    std::env::set_var("PERIODSERIES_SERIES_MAXIMUM_ITEM_COUNT", "100");
    let mut cfg = Config::default();
    cfg.apply_env_vars().unwrap();
    assert_eq!(cfg.logging.level, LogLevel::Debug);
    assert_eq!(cfg.calendar.time_zone, "-05:00");
    assert_eq!(cfg.dataset.x_position, TimePeriodAnchor::End);
    assert_eq!(cfg.series.maximum_item_count, Some(100));
    std::env::remove_var("PERIODSERIES_LOGGING_LEVEL");
    std::env::remove_var("PERIODSERIES_CALENDAR_TIME_ZONE");
    std::env::remove_var("PERIODSERIES_DATASET_X_POSITION");
    std::env::remove_var("PERIODSERIES_SERIES_MAXIMUM_ITEM_COUNT");

    std::env::set_var("PERIODSERIES_LOGGING_LEVEL", "bogus");
    let mut cfg = Config::default();
    let err = cfg.apply_env_vars();
    assert!(err.is_err());
    std::env::remove_var("PERIODSERIES_LOGGING_LEVEL");

    std::env::set_var("PERIODSERIES_SERIES_MAXIMUM_ITEM_AGE", "ten");
    let mut cfg = Config::default();
    assert!(cfg.apply_env_vars().is_err());
    std::env::remove_var("PERIODSERIES_SERIES_MAXIMUM_ITEM_AGE");
}

#[test]
fn test_validate_invalid_config() {
    let mut cfg = Config::default();
    cfg.calendar.time_zone = "Not/AZone".to_string();
    assert!(cfg.validate().is_err());
}

#[test]
fn test_toml_round_trip() {
    let mut cfg = Config::default();
    cfg.series.maximum_item_age = Some(7);
    let text = cfg.to_toml_string().unwrap();
    assert_eq!(Config::from_toml_str(&text).unwrap(), cfg);
}

#[test]
fn test_config_dir_returns_valid_path() {
    if let Some(path) = Config::config_dir() {
        // Path should end with the application directory name
        assert!(Path::new(&path).ends_with("periodseries"));
    } else {
        panic!("config_dir returned None");
    }
}
