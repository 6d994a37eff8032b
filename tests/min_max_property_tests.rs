//! Randomised checks that the cached value bounds of a series always match a
//! full scan of its items.

use periodseries::{Day, RegularTimePeriod, TimeSeries};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn scan(series: &TimeSeries<&str>) -> (Option<f64>, Option<f64>) {
    let values: Vec<f64> = series
        .items()
        .iter()
        .filter_map(|item| item.value())
        .filter(|v| !v.is_nan())
        .collect();
    let min = values.iter().copied().reduce(f64::min);
    let max = values.iter().copied().reduce(f64::max);
    (min, max)
}

fn random_value(rng: &mut StdRng) -> Option<f64> {
    match rng.gen_range(0..10) {
        0 => None,
        1 => Some(f64::NAN),
        _ => Some(rng.gen_range(-1_000.0..1_000.0)),
    }
}

#[test]
fn cached_bounds_match_full_scan() {
    let base = Day::new(1, 1, 2000).unwrap();
    for seed in 0..20u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut series = TimeSeries::new("random");
        if seed % 2 == 0 {
            series.set_maximum_item_count(25);
        }
        for _ in 0..300 {
            let offset = rng.gen_range(0..60i64);
            let mut day = RegularTimePeriod::utc(base);
            for _ in 0..offset {
                day = day.next().unwrap();
            }
            match rng.gen_range(0..5) {
                0 | 1 => {
                    series.add_or_update(day, random_value(&mut rng)).unwrap();
                }
                2 => {
                    let _ = series.add(day, random_value(&mut rng));
                }
                3 => {
                    series.delete(&day);
                }
                _ => {
                    if !series.is_empty() {
                        let index = rng.gen_range(0..series.item_count());
                        series.update_by_index(index, random_value(&mut rng)).unwrap();
                    }
                }
            }
            assert_eq!(
                (series.min_y(), series.max_y()),
                scan(&series),
                "seed {seed}"
            );
            let periods = series.time_periods();
            assert!(periods.windows(2).all(|w| w[0] < w[1]), "seed {seed}");
        }
    }
}
