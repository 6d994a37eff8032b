// src/series/timeseries.rs

use std::fmt;

use log::{debug, trace};
use serde::Serialize;

use crate::config::SeriesConfig;
use crate::error::{Result, SeriesError};
use crate::series::item::TimeSeriesDataItem;
use crate::time::{CalendarContext, Granularity, RegularTimePeriod};
use crate::types::{Range, TimePeriodAnchor};

/// An ordered, duplicate-free sequence of observations indexed by time period.
///
/// The first insertion fixes the granularity of the series; periods of any other
/// granularity are rejected until the series is empty again. The smallest and
/// largest values are cached and kept equal to a full scan after every mutation.
///
/// Two limits bound the series. `maximum_item_count` drops the oldest items once
/// the series grows past it. `maximum_item_age` drops items whose serial index
/// lags the newest item by more than that many periods.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries<S> {
    key: S,
    description: Option<String>,
    granularity: Option<Granularity>,
    data: Vec<TimeSeriesDataItem>,
    maximum_item_count: usize,
    maximum_item_age: u64,
    #[serde(skip)]
    min_y: Option<f64>,
    #[serde(skip)]
    max_y: Option<f64>,
}

impl<S> TimeSeries<S>
where
    S: Clone + PartialEq + fmt::Debug + fmt::Display,
{
    /// Creates an empty, unbounded series.
    pub fn new(key: S) -> Self {
        Self {
            key,
            description: None,
            granularity: None,
            data: Vec::new(),
            maximum_item_count: usize::MAX,
            maximum_item_age: u64::MAX,
            min_y: None,
            max_y: None,
        }
    }

    /// Creates an empty series with the limits from `config`.
    ///
    /// # Errors
    ///
    /// Returns `SeriesError::InvalidArgument` for a negative limit.
    pub fn from_config(key: S, config: &SeriesConfig) -> Result<Self> {
        let mut series = Self::new(key);
        if let Some(count) = config.maximum_item_count {
            let count = usize::try_from(count).map_err(|_| {
                SeriesError::invalid_argument(format!("maximum_item_count must be >= 0, got {count}"))
            })?;
            series.set_maximum_item_count(count);
        }
        if let Some(age) = config.maximum_item_age {
            let age = u64::try_from(age).map_err(|_| {
                SeriesError::invalid_argument(format!("maximum_item_age must be >= 0, got {age}"))
            })?;
            series.set_maximum_item_age(age);
        }
        Ok(series)
    }

    /// The series key.
    pub fn key(&self) -> &S {
        &self.key
    }

    /// Renames the series.
    ///
    /// A series held by a [`crate::series::TimeSeriesCollection`] should be renamed
    /// through the collection, which rejects keys already in use.
    pub fn set_key(&mut self, key: S) {
        self.key = key;
    }

    /// Free-text description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Sets the free-text description.
    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    /// The granularity fixed by the first insertion, or `None` while empty.
    pub fn granularity(&self) -> Option<Granularity> {
        self.granularity
    }

    /// Number of items.
    pub fn item_count(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the series has no items.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The items in period order.
    pub fn items(&self) -> &[TimeSeriesDataItem] {
        &self.data
    }

    /// The maximum number of items retained.
    pub fn maximum_item_count(&self) -> usize {
        self.maximum_item_count
    }

    /// Sets the maximum number of items, dropping the oldest items beyond it.
    pub fn set_maximum_item_count(&mut self, maximum: usize) {
        self.maximum_item_count = maximum;
        if self.data.len() > maximum {
            let excess = self.data.len() - maximum;
            self.data.drain(..excess);
            debug!("series {}: dropped {} items over the count limit", self.key, excess);
            self.update_min_max_by_iteration();
            self.release_granularity_if_empty();
        }
    }

    /// The maximum age of items, in periods.
    pub fn maximum_item_age(&self) -> u64 {
        self.maximum_item_age
    }

    /// Sets the maximum age of items, in periods, and drops items older than that.
    pub fn set_maximum_item_age(&mut self, periods: u64) {
        self.maximum_item_age = periods;
        self.remove_aged_items();
    }

    /// Smallest value, ignoring absent and NaN values.
    pub fn min_y(&self) -> Option<f64> {
        self.min_y
    }

    /// Largest value, ignoring absent and NaN values.
    pub fn max_y(&self) -> Option<f64> {
        self.max_y
    }

    /// The range of all values, or `None` if no item has a value.
    pub fn find_value_range(&self) -> Option<Range> {
        match (self.min_y, self.max_y) {
            (Some(lower), Some(upper)) => Range::new(lower, upper).ok(),
            _ => None,
        }
    }

    /// The range of values of the items whose x-coordinate falls in `x_range`.
    ///
    /// The x-coordinate of an item is the millisecond selected by `anchor` in `ctx`.
    /// Returns `None` when no item in the range has a value.
    pub fn find_value_range_in(
        &self,
        x_range: &Range,
        anchor: TimePeriodAnchor,
        ctx: &CalendarContext,
    ) -> Option<Range> {
        self.data
            .iter()
            .filter(|item| x_range.contains(item.period().millisecond_in(anchor, ctx) as f64))
            .filter_map(|item| item.value())
            .filter(|v| !v.is_nan())
            .fold(None, |acc: Option<Range>, v| {
                Some(acc.map_or_else(|| Range::point(v), |r| r.include(v)))
            })
    }

    /// The item at `index`.
    pub fn data_item(&self, index: usize) -> Result<&TimeSeriesDataItem> {
        self.data
            .get(index)
            .ok_or_else(|| SeriesError::index_out_of_bounds(index, self.data.len()))
    }

    /// The item for `period`, if present.
    pub fn data_item_for(&self, period: &RegularTimePeriod) -> Option<&TimeSeriesDataItem> {
        self.binary_search(period).ok().map(|i| &self.data[i])
    }

    /// The period at `index`.
    pub fn time_period(&self, index: usize) -> Result<&RegularTimePeriod> {
        self.data_item(index).map(TimeSeriesDataItem::period)
    }

    /// All periods in order.
    pub fn time_periods(&self) -> Vec<RegularTimePeriod> {
        self.data.iter().map(|item| *item.period()).collect()
    }

    /// The period following the newest item, if any.
    pub fn next_time_period(&self) -> Option<RegularTimePeriod> {
        self.data.last().and_then(|item| item.period().next())
    }

    /// Periods present in `other` but not in this series.
    pub fn time_periods_unique_to_other_series<K>(
        &self,
        other: &TimeSeries<K>,
    ) -> Vec<RegularTimePeriod>
    where
        K: Clone + PartialEq + fmt::Debug + fmt::Display,
    {
        other
            .data
            .iter()
            .map(|item| *item.period())
            .filter(|period| self.binary_search(period).is_err())
            .collect()
    }

    /// The value at `index`.
    pub fn value_at(&self, index: usize) -> Result<Option<f64>> {
        self.data_item(index).map(TimeSeriesDataItem::value)
    }

    /// The value for `period`; `None` if the period is absent or its value is.
    pub fn value(&self, period: &RegularTimePeriod) -> Option<f64> {
        self.data_item_for(period).and_then(TimeSeriesDataItem::value)
    }

    /// Binary search by period: `Ok(index)` if present, else `Err(insertion_point)`.
    pub fn binary_search(&self, period: &RegularTimePeriod) -> std::result::Result<usize, usize> {
        self.data.binary_search_by(|item| item.period().cmp(period))
    }

    /// Index of `period`, or `-(insertion_point) - 1` if absent.
    pub fn get_index(&self, period: &RegularTimePeriod) -> isize {
        match self.binary_search(period) {
            Ok(i) => i as isize,
            Err(ip) => -(ip as isize) - 1,
        }
    }

    /// Adds an observation.
    ///
    /// # Errors
    ///
    /// `SeriesError::DuplicatePeriod` if the period is already present and
    /// `SeriesError::GranularityMismatch` if its granularity differs from the series.
    /// The series is left unchanged on error.
    pub fn add(
        &mut self,
        period: impl Into<RegularTimePeriod>,
        value: impl Into<Option<f64>>,
    ) -> Result<()> {
        self.add_item(TimeSeriesDataItem::new(period, value))
    }

    /// Adds a data item. See [`TimeSeries::add`].
    pub fn add_item(&mut self, item: TimeSeriesDataItem) -> Result<()> {
        self.check_granularity(item.period().granularity())?;
        let appends = self
            .data
            .last()
            .map_or(true, |last| item.period() > last.period());
        if appends {
            self.data.push(item);
        } else {
            match self.binary_search(item.period()) {
                Ok(_) => return Err(SeriesError::duplicate_period(item.period())),
                Err(ip) => self.data.insert(ip, item),
            }
        }
        self.lock_granularity(item.period().granularity());
        trace!("series {}: added {}", self.key, item);
        self.update_bounds_for_added(item.value());
        self.enforce_count_limit();
        self.remove_aged_items();
        Ok(())
    }

    /// Adds or replaces the observation for `period`.
    ///
    /// Returns the item that was overwritten, if any.
    ///
    /// # Errors
    ///
    /// `SeriesError::GranularityMismatch` if the granularity differs from the series.
    pub fn add_or_update(
        &mut self,
        period: impl Into<RegularTimePeriod>,
        value: impl Into<Option<f64>>,
    ) -> Result<Option<TimeSeriesDataItem>> {
        self.add_or_update_item(TimeSeriesDataItem::new(period, value))
    }

    /// Adds or replaces a data item. See [`TimeSeries::add_or_update`].
    pub fn add_or_update_item(
        &mut self,
        item: TimeSeriesDataItem,
    ) -> Result<Option<TimeSeriesDataItem>> {
        self.check_granularity(item.period().granularity())?;
        let overwritten = match self.binary_search(item.period()) {
            Ok(index) => {
                let previous = self.data[index];
                self.replace_value(index, item.value());
                Some(previous)
            }
            Err(ip) => {
                self.data.insert(ip, item);
                self.lock_granularity(item.period().granularity());
                self.update_bounds_for_added(item.value());
                self.enforce_count_limit();
                None
            }
        };
        self.remove_aged_items();
        Ok(overwritten)
    }

    /// Adds or updates every item of `other` in this series.
    ///
    /// Returns a series with this series' key holding the overwritten items.
    pub fn add_and_or_update<K>(&mut self, other: &TimeSeries<K>) -> Result<TimeSeries<S>>
    where
        K: Clone + PartialEq + fmt::Debug + fmt::Display,
    {
        let mut overwritten = TimeSeries::new(self.key.clone());
        for item in &other.data {
            if let Some(old) = self.add_or_update_item(*item)? {
                overwritten.add_item(old)?;
            }
        }
        Ok(overwritten)
    }

    /// Replaces the value for an existing period.
    ///
    /// # Errors
    ///
    /// `SeriesError::NoSuchPeriod` if the period is not in the series.
    pub fn update(
        &mut self,
        period: &RegularTimePeriod,
        value: impl Into<Option<f64>>,
    ) -> Result<()> {
        let index = self
            .binary_search(period)
            .map_err(|_| SeriesError::no_such_period(period))?;
        self.replace_value(index, value.into());
        Ok(())
    }

    /// Replaces the value at `index`.
    ///
    /// # Errors
    ///
    /// `SeriesError::IndexOutOfBounds` if `index >= item_count()`.
    pub fn update_by_index(&mut self, index: usize, value: impl Into<Option<f64>>) -> Result<()> {
        if index >= self.data.len() {
            return Err(SeriesError::index_out_of_bounds(index, self.data.len()));
        }
        self.replace_value(index, value.into());
        Ok(())
    }

    /// Removes the observation for `period`, returning it if it was present.
    pub fn delete(&mut self, period: &RegularTimePeriod) -> Option<TimeSeriesDataItem> {
        let index = self.binary_search(period).ok()?;
        let removed = self.data.remove(index);
        self.update_bounds_for_removed(removed.value());
        self.release_granularity_if_empty();
        Some(removed)
    }

    /// Removes the items from `start` to `end`, both inclusive.
    ///
    /// # Errors
    ///
    /// `SeriesError::InvalidArgument` if `end < start` and
    /// `SeriesError::IndexOutOfBounds` if `end` is past the last item.
    pub fn delete_range(&mut self, start: usize, end: usize) -> Result<()> {
        if end < start {
            return Err(SeriesError::invalid_argument(format!(
                "end index {end} is before start index {start}"
            )));
        }
        if end >= self.data.len() {
            return Err(SeriesError::index_out_of_bounds(end, self.data.len()));
        }
        self.data.drain(start..=end);
        self.update_min_max_by_iteration();
        self.release_granularity_if_empty();
        Ok(())
    }

    /// Removes all items and releases the granularity lock.
    pub fn clear(&mut self) {
        if !self.data.is_empty() {
            self.data.clear();
            self.min_y = None;
            self.max_y = None;
            self.release_granularity_if_empty();
        }
    }

    /// Drops items older than `maximum_item_age` periods, measured from the newest item.
    pub fn remove_aged_items(&mut self) {
        if self.data.len() < 2 {
            return;
        }
        let latest = self.data[self.data.len() - 1].period().serial_index();
        self.remove_older_than(latest);
    }

    /// Drops items older than `maximum_item_age` periods, measured from the period of
    /// the series' granularity containing the instant `millis` in `ctx`.
    pub fn remove_aged_items_at(&mut self, millis: i64, ctx: &CalendarContext) -> Result<()> {
        let Some(granularity) = self.granularity else {
            return Ok(());
        };
        let latest = granularity.period_containing(millis, ctx)?.serial_index();
        self.remove_older_than(latest);
        Ok(())
    }

    /// Copies the items from `start` to `end`, both inclusive.
    ///
    /// The copy keeps the key, description and limits. An `end` past the last item is
    /// clamped; `start > end` or a `start` past the last item gives an empty copy.
    pub fn create_copy(&self, start: usize, end: usize) -> Self {
        let mut copy = self.empty_copy();
        if start <= end && start < self.data.len() {
            let end = end.min(self.data.len() - 1);
            copy.data = self.data[start..=end].to_vec();
            copy.granularity = self.granularity;
            copy.update_min_max_by_iteration();
        }
        copy
    }

    /// Copies the items whose periods lie between `start` and `end`, both inclusive.
    ///
    /// Neither bound needs to be present in the series. Inverted bounds or a range
    /// containing no items give an empty copy.
    pub fn create_copy_by_period(&self, start: &RegularTimePeriod, end: &RegularTimePeriod) -> Self {
        if start > end {
            return self.empty_copy();
        }
        let first = self.binary_search(start).unwrap_or_else(|ip| ip);
        let last = match self.binary_search(end) {
            Ok(i) => i,
            Err(0) => return self.empty_copy(),
            Err(ip) => ip - 1,
        };
        if first >= self.data.len() || last < first {
            return self.empty_copy();
        }
        self.create_copy(first, last)
    }

    /// Re-pegs every period to `ctx`, refreshing their cached bounds.
    pub fn peg(&mut self, ctx: &CalendarContext) {
        for item in &mut self.data {
            item.period_mut().peg(ctx);
        }
    }

    fn empty_copy(&self) -> Self {
        Self {
            key: self.key.clone(),
            description: self.description.clone(),
            granularity: None,
            data: Vec::new(),
            maximum_item_count: self.maximum_item_count,
            maximum_item_age: self.maximum_item_age,
            min_y: None,
            max_y: None,
        }
    }

    fn check_granularity(&self, found: Granularity) -> Result<()> {
        match self.granularity {
            Some(expected) if expected != found => {
                Err(SeriesError::GranularityMismatch { expected, found })
            }
            _ => Ok(()),
        }
    }

    fn lock_granularity(&mut self, granularity: Granularity) {
        if self.granularity.is_none() {
            debug!("series {}: locked to {} periods", self.key, granularity);
            self.granularity = Some(granularity);
        }
    }

    fn release_granularity_if_empty(&mut self) {
        if self.data.is_empty() && self.granularity.is_some() {
            debug!("series {}: empty, granularity released", self.key);
            self.granularity = None;
        }
    }

    fn enforce_count_limit(&mut self) {
        if self.data.len() > self.maximum_item_count {
            let removed = self.data.remove(0);
            debug!("series {}: count limit reached, dropped {}", self.key, removed.period());
            self.update_bounds_for_removed(removed.value());
            self.release_granularity_if_empty();
        }
    }

    fn remove_older_than(&mut self, latest: i64) {
        let limit = i128::from(self.maximum_item_age);
        let keep_from = self
            .data
            .iter()
            .position(|item| i128::from(latest) - i128::from(item.period().serial_index()) <= limit)
            .unwrap_or(self.data.len());
        if keep_from > 0 {
            self.data.drain(..keep_from);
            debug!("series {}: dropped {} aged items", self.key, keep_from);
            self.update_min_max_by_iteration();
            self.release_granularity_if_empty();
        }
    }

    fn replace_value(&mut self, index: usize, value: Option<f64>) {
        let old = self.data[index].value();
        self.data[index].set_value(value);
        if self.touches_bounds(old) {
            self.update_min_max_by_iteration();
        } else {
            self.update_bounds_for_added(value);
        }
    }

    fn touches_bounds(&self, value: Option<f64>) -> bool {
        match (value, self.min_y, self.max_y) {
            (Some(v), Some(min), Some(max)) if !v.is_nan() => v <= min || v >= max,
            _ => false,
        }
    }

    fn update_bounds_for_added(&mut self, value: Option<f64>) {
        if let Some(v) = value.filter(|v| !v.is_nan()) {
            self.min_y = Some(self.min_y.map_or(v, |min| min.min(v)));
            self.max_y = Some(self.max_y.map_or(v, |max| max.max(v)));
        }
    }

    fn update_bounds_for_removed(&mut self, value: Option<f64>) {
        if self.touches_bounds(value) {
            self.update_min_max_by_iteration();
        }
    }

    fn update_min_max_by_iteration(&mut self) {
        let (min_y, max_y) = self
            .data
            .iter()
            .filter_map(TimeSeriesDataItem::value)
            .filter(|v| !v.is_nan())
            .fold((None, None), |(min, max): (Option<f64>, Option<f64>), v| {
                (
                    Some(min.map_or(v, |m| m.min(v))),
                    Some(max.map_or(v, |m| m.max(v))),
                )
            });
        self.min_y = min_y;
        self.max_y = max_y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::{Day, Month};
    use assert_matches::assert_matches;

    fn day(d: u32) -> RegularTimePeriod {
        Day::new(d, 1, 2024).unwrap().into()
    }

    #[test]
    fn out_of_order_insertion_is_sorted() {
        let mut s = TimeSeries::new("s");
        s.add(day(3), 3.0).unwrap();
        s.add(day(1), 1.0).unwrap();
        s.add(day(2), 2.0).unwrap();
        let periods: Vec<_> = s.time_periods().iter().map(|p| p.to_string()).collect();
        assert_eq!(periods, ["2024-01-01", "2024-01-02", "2024-01-03"]);
        assert_eq!(s.get_index(&day(2)), 1);
        assert_eq!(s.get_index(&day(9)), -4);
    }

    #[test]
    fn duplicates_and_mismatches_leave_series_unchanged() {
        let mut s = TimeSeries::new("s");
        s.add(day(1), 1.0).unwrap();
        assert_matches!(s.add(day(1), 2.0), Err(SeriesError::DuplicatePeriod { .. }));
        assert_matches!(
            s.add(Month::new(1, 2024).unwrap(), 2.0),
            Err(SeriesError::GranularityMismatch {
                expected: Granularity::Day,
                found: Granularity::Month
            })
        );
        assert_eq!(s.item_count(), 1);
        assert_eq!(s.value(&day(1)), Some(1.0));
    }

    #[test]
    fn granularity_lock_released_when_empty() {
        let mut s = TimeSeries::new("s");
        s.add(day(1), 1.0).unwrap();
        s.delete(&day(1));
        assert_eq!(s.granularity(), None);
        s.add(Month::new(1, 2024).unwrap(), 2.0).unwrap();
        assert_eq!(s.granularity(), Some(Granularity::Month));
    }

    #[test]
    fn min_max_tracks_updates_and_deletes() {
        let mut s = TimeSeries::new("s");
        s.add(day(1), 5.0).unwrap();
        s.add(day(2), f64::NAN).unwrap();
        s.add(day(3), None).unwrap();
        s.add(day(4), -2.0).unwrap();
        assert_eq!((s.min_y(), s.max_y()), (Some(-2.0), Some(5.0)));
        s.update(&day(1), 1.0).unwrap();
        assert_eq!(s.max_y(), Some(1.0));
        s.delete(&day(4));
        assert_eq!((s.min_y(), s.max_y()), (Some(1.0), Some(1.0)));
        s.update_by_index(0, None).unwrap();
        assert_eq!(s.find_value_range(), None);
    }

    #[test]
    fn update_requires_existing_period() {
        let mut s = TimeSeries::new("s");
        assert_matches!(s.update(&day(1), 1.0), Err(SeriesError::NoSuchPeriod(_)));
        assert_matches!(s.update_by_index(0, 1.0), Err(SeriesError::IndexOutOfBounds { index: 0, len: 0 }));
    }

    #[test]
    fn add_or_update_returns_previous() {
        let mut s = TimeSeries::new("s");
        assert_eq!(s.add_or_update(day(1), 1.0).unwrap(), None);
        let old = s.add_or_update(day(1), 2.0).unwrap().unwrap();
        assert_eq!(old.value(), Some(1.0));
        assert_eq!(s.value(&day(1)), Some(2.0));
        assert_eq!(s.item_count(), 1);
    }

    #[test]
    fn count_limit_evicts_oldest() {
        let mut s = TimeSeries::new("s");
        s.set_maximum_item_count(2);
        for d in 1..=3 {
            s.add(day(d), f64::from(d)).unwrap();
        }
        assert_eq!(s.item_count(), 2);
        assert_eq!(*s.time_period(0).unwrap(), day(2));
        assert_eq!(s.min_y(), Some(2.0));
    }

    #[test]
    fn age_limit_evicts_by_serial_distance() {
        let mut s = TimeSeries::new("s");
        for d in 1..=4 {
            s.add(day(d), f64::from(d)).unwrap();
        }
        s.set_maximum_item_age(2);
        assert_eq!(s.time_periods(), vec![day(2), day(3), day(4)]);
        s.add(day(5), 5.0).unwrap();
        assert_eq!(s.time_periods(), vec![day(3), day(4), day(5)]);
    }

    #[test]
    fn aged_relative_to_instant() {
        let mut s = TimeSeries::new("s");
        for d in 1..=4 {
            s.add(day(d), f64::from(d)).unwrap();
        }
        s.set_maximum_item_age(1);
        // Already trimmed relative to the newest item.
        assert_eq!(s.item_count(), 2);
        let ctx = CalendarContext::utc();
        let jan_5 = day(5).first_millisecond();
        s.remove_aged_items_at(jan_5, &ctx).unwrap();
        assert_eq!(s.time_periods(), vec![day(4)]);
    }

    #[test]
    fn delete_range_validates_bounds() {
        let mut s = TimeSeries::new("s");
        for d in 1..=4 {
            s.add(day(d), f64::from(d)).unwrap();
        }
        assert_matches!(s.delete_range(2, 1), Err(SeriesError::InvalidArgument(_)));
        assert_matches!(s.delete_range(1, 9), Err(SeriesError::IndexOutOfBounds { .. }));
        s.delete_range(1, 2).unwrap();
        assert_eq!(s.time_periods(), vec![day(1), day(4)]);
        assert_eq!((s.min_y(), s.max_y()), (Some(1.0), Some(4.0)));
    }

    #[test]
    fn copies() {
        let mut s = TimeSeries::new("s");
        s.set_description(Some("daily".into()));
        for d in 1..=5 {
            s.add(day(d), f64::from(d)).unwrap();
        }
        let c = s.create_copy(1, 99);
        assert_eq!(c.item_count(), 4);
        assert_eq!(c.description(), Some("daily"));
        assert_eq!(c.min_y(), Some(2.0));
        assert!(s.create_copy(3, 1).is_empty());
        assert!(s.create_copy(7, 9).is_empty());

        let p = s.create_copy_by_period(&day(2), &day(4));
        assert_eq!(p.time_periods(), vec![day(2), day(3), day(4)]);
        assert!(s.create_copy_by_period(&day(4), &day(2)).is_empty());
        let before: RegularTimePeriod = Day::new(1, 12, 2023).unwrap().into();
        let also_before: RegularTimePeriod = Day::new(2, 12, 2023).unwrap().into();
        assert!(s.create_copy_by_period(&before, &also_before).is_empty());
    }

    #[test]
    fn merge_reports_overwritten_items() {
        let mut a = TimeSeries::new("a");
        a.add(day(1), 1.0).unwrap();
        a.add(day(2), 2.0).unwrap();
        let mut b = TimeSeries::new("b");
        b.add(day(2), 20.0).unwrap();
        b.add(day(3), 30.0).unwrap();
        assert_eq!(a.time_periods_unique_to_other_series(&b), vec![day(3)]);
        let overwritten = a.add_and_or_update(&b).unwrap();
        assert_eq!(*overwritten.key(), "a");
        assert_eq!(overwritten.value(&day(2)), Some(2.0));
        assert_eq!(a.value(&day(2)), Some(20.0));
        assert_eq!(a.item_count(), 3);
        assert_eq!(a.next_time_period(), Some(day(4)));
    }

    #[test]
    fn value_range_in_window() {
        let mut s = TimeSeries::new("s");
        for d in 1..=4 {
            s.add(day(d), f64::from(d * 10)).unwrap();
        }
        let ctx = CalendarContext::utc();
        let window = Range::new(
            day(2).first_millisecond() as f64,
            day(3).first_millisecond() as f64,
        )
        .unwrap();
        let r = s.find_value_range_in(&window, TimePeriodAnchor::Start, &ctx).unwrap();
        assert_eq!((r.lower(), r.upper()), (20.0, 30.0));
        let empty = Range::new(0.0, 1.0).unwrap();
        assert_eq!(s.find_value_range_in(&empty, TimePeriodAnchor::Start, &ctx), None);
    }
}
