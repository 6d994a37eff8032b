// src/series/dataset.rs

//! Read-only views a rendering layer uses to walk a dataset.

use crate::error::Result;
use crate::types::Range;

/// A collection of series whose items have an x-coordinate in milliseconds and an
/// optional y-value.
pub trait XyDataset {
    /// The series key type.
    type Key;

    /// Number of series.
    fn series_count(&self) -> usize;

    /// Key of the series at `series`.
    fn series_key(&self, series: usize) -> Result<&Self::Key>;

    /// Number of items in the series at `series`.
    fn item_count(&self, series: usize) -> Result<usize>;

    /// The x-coordinate of an item, in milliseconds since the epoch.
    fn x(&self, series: usize, item: usize) -> Result<i64>;

    /// The y-value of an item.
    fn y(&self, series: usize, item: usize) -> Result<Option<f64>>;
}

/// An [`XyDataset`] whose items span an interval on each axis.
pub trait IntervalXyDataset: XyDataset {
    /// First millisecond of the item's period.
    fn start_x(&self, series: usize, item: usize) -> Result<i64>;

    /// Last millisecond of the item's period.
    fn end_x(&self, series: usize, item: usize) -> Result<i64>;

    /// Lower y-value of the item.
    fn start_y(&self, series: usize, item: usize) -> Result<Option<f64>> {
        self.y(series, item)
    }

    /// Upper y-value of the item.
    fn end_y(&self, series: usize, item: usize) -> Result<Option<f64>> {
        self.y(series, item)
    }
}

/// Bounds of the x-values of a dataset.
pub trait DomainInfo {
    /// The range of x-values, or `None` for an empty dataset. With `include_interval`
    /// the range covers whole periods rather than their anchor points.
    fn domain_bounds(&self, include_interval: bool) -> Option<Range>;

    /// Lower bound of [`DomainInfo::domain_bounds`].
    fn domain_lower_bound(&self, include_interval: bool) -> Option<f64> {
        self.domain_bounds(include_interval).map(|r| r.lower())
    }

    /// Upper bound of [`DomainInfo::domain_bounds`].
    fn domain_upper_bound(&self, include_interval: bool) -> Option<f64> {
        self.domain_bounds(include_interval).map(|r| r.upper())
    }
}
