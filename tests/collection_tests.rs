use assert_matches::assert_matches;
use periodseries::{
    CalendarContext, CalendarUnit, Config, DomainInfo, Hour, IntervalXyDataset, Month,
    SeriesError, SimpleTimePeriod, TimePeriodAnchor, TimePeriodValues,
    TimePeriodValuesCollection, TimeSeries, TimeSeriesCollection, XyDataset,
};

fn hourly(key: &'static str, values: &[f64]) -> TimeSeries<&'static str> {
    let mut series = TimeSeries::new(key);
    let mut hour = Hour::from_fields(0, 1, 1, 2024).unwrap();
    for value in values {
        series.add(hour, *value).unwrap();
        hour = hour.next().unwrap();
    }
    series
}

#[test]
fn test_collection_projects_items_in_its_context() {
    let mut config = Config::default();
    config.calendar.time_zone = "-02:00".to_string();
    config.dataset.x_position = TimePeriodAnchor::End;
    let mut collection = TimeSeriesCollection::from_config(&config).unwrap();
    collection.add_series(hourly("temp", &[1.0, 2.0])).unwrap();

    let ctx = CalendarContext::fixed(-7200).unwrap();
    let first = Hour::from_fields(0, 1, 1, 2024).unwrap();
    assert_eq!(collection.x(0, 0).unwrap(), first.last_millisecond(&ctx));
    assert_eq!(collection.start_x(0, 1).unwrap(), first.next().unwrap().first_millisecond(&ctx));
    assert_eq!(collection.y(0, 1).unwrap(), Some(2.0));

    collection.set_context(CalendarContext::utc());
    let utc = CalendarContext::utc();
    assert_eq!(collection.x(0, 0).unwrap(), first.last_millisecond(&utc));
    assert_eq!(
        collection.series(0).unwrap().time_period(0).unwrap().context(),
        utc
    );
}

#[test]
fn test_from_config_rejects_bad_zone() {
    let mut config = Config::default();
    config.calendar.time_zone = "+1:2:3".to_string();
    assert!(TimeSeriesCollection::<String>::from_config(&config).is_err());
}

#[test]
fn test_membership() {
    let mut collection = TimeSeriesCollection::new(CalendarContext::utc());
    collection.add_series(hourly("a", &[1.0])).unwrap();
    collection.add_series(hourly("b", &[2.0])).unwrap();
    assert_matches!(collection.add_series(hourly("a", &[])), Err(SeriesError::DuplicateKey(_)));
    assert_eq!(collection.series_count(), 2);
    assert_eq!(*collection.series_key(1).unwrap(), "b");
    assert_matches!(collection.series_key(2), Err(SeriesError::IndexOutOfBounds { .. }));

    let removed = collection.remove_series_by_key(&"a").unwrap();
    assert_eq!(*removed.key(), "a");
    assert_eq!(collection.series_index(&"b"), Some(0));
    assert_eq!((&collection).into_iter().count(), 1);

    collection.remove_all_series();
    assert_eq!(collection.series_count(), 0);
    assert_eq!(collection.domain_bounds(true), None);
    assert_eq!(collection.range_bounds(), None);
}

#[test]
fn test_domain_and_range_bounds() {
    let mut collection = TimeSeriesCollection::new(CalendarContext::utc());
    collection.add_series(hourly("a", &[3.0, -1.0, 4.0])).unwrap();
    collection.add_series(hourly("b", &[f64::NAN, 9.0])).unwrap();

    let utc = CalendarContext::utc();
    let first = Hour::from_fields(0, 1, 1, 2024).unwrap();
    let third = Hour::from_fields(2, 1, 1, 2024).unwrap();

    let domain = collection.domain_bounds(true).unwrap();
    assert_eq!(domain.lower(), first.first_millisecond(&utc) as f64);
    assert_eq!(domain.upper(), third.last_millisecond(&utc) as f64);
    assert_eq!(
        collection.domain_upper_bound(false),
        Some(third.first_millisecond(&utc) as f64)
    );

    let range = collection.range_bounds().unwrap();
    assert_eq!((range.lower(), range.upper()), (-1.0, 9.0));
    let only_a = collection.range_bounds_for(&["a", "missing"], &domain).unwrap();
    assert_eq!((only_a.lower(), only_a.upper()), (-1.0, 4.0));
}

#[test]
fn test_update_series_refreshes_pegging() {
    let ctx = CalendarContext::fixed(5400).unwrap();
    let mut collection = TimeSeriesCollection::new(ctx);
    collection.add_series(TimeSeries::new("m")).unwrap();
    let month = Month::new(2, 2024).unwrap();
    collection
        .update_series(0, |series| series.add(month, 1.0))
        .unwrap()
        .unwrap();
    assert_eq!(collection.x(0, 0).unwrap(), month.first_millisecond(&ctx));
}

#[test]
fn test_time_period_values_collection() {
    let mut values = TimePeriodValues::new("spans");
    values.add(SimpleTimePeriod::new(100, 199).unwrap(), 1.0);
    values.add(SimpleTimePeriod::new(0, 999).unwrap(), 2.0);
    values.add(SimpleTimePeriod::new(300, 300).unwrap(), None);
    assert_eq!(values.min_start_index(), Some(1));
    assert_eq!(values.max_end_index(), Some(1));
    assert_eq!(values.max_start_index(), Some(2));

    let mut collection = TimePeriodValuesCollection::with_series(values);
    assert_eq!(collection.x_position(), TimePeriodAnchor::Middle);
    assert_eq!(collection.x(0, 0).unwrap(), 149);
    assert_eq!(collection.start_x(0, 1).unwrap(), 0);
    assert_eq!(collection.end_x(0, 1).unwrap(), 999);
    assert_eq!(collection.y(0, 2).unwrap(), None);

    let domain = collection.domain_bounds(true).unwrap();
    assert_eq!((domain.lower(), domain.upper()), (0.0, 999.0));
    collection.set_x_position(TimePeriodAnchor::Start);
    let starts = collection.domain_bounds(false).unwrap();
    assert_eq!((starts.lower(), starts.upper()), (0.0, 300.0));

    assert_matches!(
        collection.add_series(TimePeriodValues::new("spans")),
        Err(SeriesError::DuplicateKey(_))
    );
    assert!(SimpleTimePeriod::new(5, 4).is_err());
}
