use criterion::{black_box, criterion_group, criterion_main, Criterion};
use periodseries::{
    CalendarContext, CalendarUnit, Day, DomainInfo, Granularity, Hour, RegularTimePeriod,
    TimeSeries, TimeSeriesCollection,
};

fn hourly_series(key: &'static str, len: usize) -> TimeSeries<&'static str> {
    let mut series = TimeSeries::new(key);
    let mut hour = Hour::from_fields(0, 1, 1, 2024).unwrap();
    for i in 0..len {
        series.add(hour, i as f64).unwrap();
        hour = hour.next().unwrap();
    }
    series
}

fn bench_append(c: &mut Criterion) {
    c.bench_function("append_10k_hours", |b| {
        b.iter(|| black_box(hourly_series("bench", 10_000)));
    });
}

fn bench_add_or_update(c: &mut Criterion) {
    let series = hourly_series("bench", 10_000);
    let periods = series.time_periods();
    c.bench_function("add_or_update_existing", |b| {
        b.iter(|| {
            let mut series = series.clone();
            for period in periods.iter().rev().step_by(7) {
                series.add_or_update(*period, black_box(1.0)).unwrap();
            }
            series
        });
    });
}

fn bench_bounds_in_zone(c: &mut Criterion) {
    #[cfg(feature = "timezones")]
    let ctx = CalendarContext::named("America/New_York").unwrap();
    #[cfg(not(feature = "timezones"))]
    let ctx = CalendarContext::fixed(-5 * 3600).unwrap();
    let day = Day::new(10, 3, 2024).unwrap();
    c.bench_function("day_bounds_named_zone", |b| {
        b.iter(|| {
            let d = black_box(day);
            (d.first_millisecond(&ctx), d.last_millisecond(&ctx))
        });
    });
    c.bench_function("hour_containing_instant", |b| {
        b.iter(|| {
            RegularTimePeriod::containing(Granularity::Hour, black_box(1_710_000_000_000), ctx)
                .unwrap()
        });
    });
}

fn bench_domain_bounds(c: &mut Criterion) {
    let mut collection = TimeSeriesCollection::new(CalendarContext::utc());
    collection.add_series(hourly_series("a", 5_000)).unwrap();
    collection.add_series(hourly_series("b", 5_000)).unwrap();
    c.bench_function("collection_domain_bounds", |b| {
        b.iter(|| black_box(&collection).domain_bounds(true));
    });
}

criterion_group!(
    benches,
    bench_append,
    bench_add_or_update,
    bench_bounds_in_zone,
    bench_domain_bounds
);
criterion_main!(benches);
