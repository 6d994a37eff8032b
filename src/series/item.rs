// src/series/item.rs

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use crate::time::RegularTimePeriod;

/// One observation of a time series: a period and an optional value.
///
/// `None` marks an absent observation, which is distinct from zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeSeriesDataItem {
    period: RegularTimePeriod,
    value: Option<f64>,
}

impl TimeSeriesDataItem {
    /// Creates a data item.
    pub fn new(period: impl Into<RegularTimePeriod>, value: impl Into<Option<f64>>) -> Self {
        Self {
            period: period.into(),
            value: value.into(),
        }
    }

    /// The time period of the observation.
    pub fn period(&self) -> &RegularTimePeriod {
        &self.period
    }

    /// The observed value, if present.
    pub fn value(&self) -> Option<f64> {
        self.value
    }

    /// Replaces the observed value.
    pub fn set_value(&mut self, value: Option<f64>) {
        self.value = value;
    }

    pub(crate) fn period_mut(&mut self) -> &mut RegularTimePeriod {
        &mut self.period
    }
}

impl PartialOrd for TimeSeriesDataItem {
    /// Items order by period. Two items for the same period only compare equal
    /// when their values are equal too.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.period.cmp(&other.period) {
            Ordering::Equal if self.value == other.value => Some(Ordering::Equal),
            Ordering::Equal => None,
            ord => Some(ord),
        }
    }
}

impl fmt::Display for TimeSeriesDataItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(v) => write!(f, "{}: {}", self.period, v),
            None => write!(f, "{}: -", self.period),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::Day;

    #[test]
    fn ordering_follows_period() {
        let a = TimeSeriesDataItem::new(Day::new(1, 1, 2024).unwrap(), 5.0);
        let b = TimeSeriesDataItem::new(Day::new(2, 1, 2024).unwrap(), 1.0);
        assert!(a < b);
        let c = TimeSeriesDataItem::new(Day::new(1, 1, 2024).unwrap(), None);
        assert_eq!(a.partial_cmp(&c), None);
        assert_eq!(c.to_string(), "2024-01-01: -");
    }
}
