// src/series/collection.rs

use std::fmt;

use log::debug;
use serde::Serialize;

use crate::config::Config;
use crate::error::{Result, SeriesError};
use crate::series::dataset::{DomainInfo, IntervalXyDataset, XyDataset};
use crate::series::item::TimeSeriesDataItem;
use crate::series::timeseries::TimeSeries;
use crate::time::{CalendarContext, RegularTimePeriod};
use crate::types::{Range, TimePeriodAnchor};

/// One exported observation of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DataPoint<'a, S> {
    /// Key of the owning series.
    pub series: &'a S,
    /// The observation's period.
    pub period: &'a RegularTimePeriod,
    /// The anchor-projected x-coordinate in milliseconds.
    pub x: i64,
    /// The observed value.
    pub y: Option<f64>,
}

/// A set of uniquely keyed time series sharing one calendar context.
///
/// Every item is projected to a single x-coordinate: the millisecond of its period
/// selected by the collection's `x_position`, evaluated in the collection's context.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesCollection<S> {
    data: Vec<TimeSeries<S>>,
    context: CalendarContext,
    x_position: TimePeriodAnchor,
}

impl<S> Default for TimeSeriesCollection<S> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            context: CalendarContext::utc(),
            x_position: TimePeriodAnchor::Start,
        }
    }
}

impl<S> TimeSeriesCollection<S>
where
    S: Clone + PartialEq + fmt::Debug + fmt::Display,
{
    /// Creates an empty collection evaluated in `context`.
    pub fn new(context: CalendarContext) -> Self {
        Self {
            data: Vec::new(),
            context,
            x_position: TimePeriodAnchor::Start,
        }
    }

    /// Creates an empty collection with the calendar and anchor from `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut collection = Self::new(config.calendar.context()?);
        collection.x_position = config.dataset.x_position;
        Ok(collection)
    }

    /// Creates a collection holding one series.
    pub fn with_series(series: TimeSeries<S>, context: CalendarContext) -> Self {
        let mut collection = Self::new(context);
        collection.push_pegged(series);
        collection
    }

    /// The anchor used to project periods to x-coordinates.
    pub fn x_position(&self) -> TimePeriodAnchor {
        self.x_position
    }

    /// Sets the anchor used to project periods to x-coordinates.
    pub fn set_x_position(&mut self, anchor: TimePeriodAnchor) {
        self.x_position = anchor;
    }

    /// The calendar context x-coordinates are evaluated in.
    pub fn context(&self) -> CalendarContext {
        self.context
    }

    /// Changes the calendar context and re-pegs every member.
    pub fn set_context(&mut self, context: CalendarContext) {
        self.context = context;
        for series in &mut self.data {
            series.peg(&context);
        }
    }

    /// The series at `index`.
    pub fn series(&self, index: usize) -> Result<&TimeSeries<S>> {
        self.data
            .get(index)
            .ok_or_else(|| SeriesError::index_out_of_bounds(index, self.data.len()))
    }

    /// The series with `key`, if present.
    pub fn series_by_key(&self, key: &S) -> Option<&TimeSeries<S>> {
        self.data.iter().find(|s| s.key() == key)
    }

    /// Index of the series with `key`, if present.
    pub fn series_index(&self, key: &S) -> Option<usize> {
        self.data.iter().position(|s| s.key() == key)
    }

    /// Iterates over the member series.
    pub fn iter(&self) -> std::slice::Iter<'_, TimeSeries<S>> {
        self.data.iter()
    }

    /// Adds a series.
    ///
    /// # Errors
    ///
    /// `SeriesError::DuplicateKey` if a member already has the series' key.
    pub fn add_series(&mut self, series: TimeSeries<S>) -> Result<()> {
        if self.series_index(series.key()).is_some() {
            return Err(SeriesError::duplicate_key(series.key()));
        }
        debug!("collection: added series {}", series.key());
        self.push_pegged(series);
        Ok(())
    }

    /// Removes and returns the series at `index`.
    pub fn remove_series(&mut self, index: usize) -> Result<TimeSeries<S>> {
        if index >= self.data.len() {
            return Err(SeriesError::index_out_of_bounds(index, self.data.len()));
        }
        Ok(self.data.remove(index))
    }

    /// Removes and returns the series with `key`, if present.
    pub fn remove_series_by_key(&mut self, key: &S) -> Option<TimeSeries<S>> {
        let index = self.series_index(key)?;
        Some(self.data.remove(index))
    }

    /// Removes every series.
    pub fn remove_all_series(&mut self) {
        self.data.clear();
    }

    /// Mutates the series at `index` through `f`.
    ///
    /// If `f` renames the series to a key held by another member, the rename is
    /// undone and `SeriesError::DuplicateKey` is returned; other changes made by `f`
    /// are kept. Items added by `f` are pegged to the collection's context.
    pub fn update_series<F, R>(&mut self, index: usize, f: F) -> Result<R>
    where
        F: FnOnce(&mut TimeSeries<S>) -> R,
    {
        let len = self.data.len();
        let series = self
            .data
            .get_mut(index)
            .ok_or_else(|| SeriesError::index_out_of_bounds(index, len))?;
        let old_key = series.key().clone();
        let result = f(series);
        series.peg(&self.context);
        let new_key = series.key().clone();
        if new_key != old_key
            && self
                .data
                .iter()
                .enumerate()
                .any(|(i, s)| i != index && *s.key() == new_key)
        {
            debug!("collection: vetoed rename of {} to {}", old_key, new_key);
            self.data[index].set_key(old_key);
            return Err(SeriesError::duplicate_key(new_key));
        }
        Ok(result)
    }

    /// Renames the series at `index`, rejecting keys already in use.
    pub fn rename_series(&mut self, index: usize, key: S) -> Result<()> {
        self.update_series(index, |series| series.set_key(key))
    }

    /// Indices of the items at or before and at or after `millis` in a series.
    pub fn surrounding_items(
        &self,
        series: usize,
        millis: i64,
    ) -> Result<(Option<usize>, Option<usize>)> {
        let mut before = None;
        let mut after = None;
        for (i, item) in self.series(series)?.items().iter().enumerate() {
            let x = self.x_of(item);
            if x <= millis {
                before = Some(i);
            }
            if x >= millis {
                after = Some(i);
                break;
            }
        }
        Ok((before, after))
    }

    /// Domain bounds over the series with the given keys; unknown keys are skipped.
    pub fn domain_bounds_for(&self, keys: &[S], include_interval: bool) -> Option<Range> {
        keys.iter()
            .filter_map(|key| self.series_by_key(key))
            .fold(None, |acc, series| {
                Range::combine(acc, self.series_domain(series, include_interval))
            })
    }

    /// The range of all values in the collection.
    pub fn range_bounds(&self) -> Option<Range> {
        self.data.iter().fold(None, |acc, series| {
            Range::combine_ignoring_nan(acc, series.find_value_range())
        })
    }

    /// The range of values of the given series whose x-coordinates fall in `x_range`.
    pub fn range_bounds_for(&self, keys: &[S], x_range: &Range) -> Option<Range> {
        keys.iter()
            .filter_map(|key| self.series_by_key(key))
            .fold(None, |acc, series| {
                Range::combine_ignoring_nan(
                    acc,
                    series.find_value_range_in(x_range, self.x_position, &self.context),
                )
            })
    }

    /// Every observation, series by series, in period order.
    pub fn points(&self) -> impl Iterator<Item = DataPoint<'_, S>> + '_ {
        self.data.iter().flat_map(move |series| {
            series.items().iter().map(move |item| DataPoint {
                series: series.key(),
                period: item.period(),
                x: self.x_of(item),
                y: item.value(),
            })
        })
    }

    fn push_pegged(&mut self, mut series: TimeSeries<S>) {
        series.peg(&self.context);
        self.data.push(series);
    }

    fn x_of(&self, item: &TimeSeriesDataItem) -> i64 {
        item.period().millisecond_in(self.x_position, &self.context)
    }

    fn item(&self, series: usize, item: usize) -> Result<&TimeSeriesDataItem> {
        self.series(series)?.data_item(item)
    }

    fn series_domain(&self, series: &TimeSeries<S>, include_interval: bool) -> Option<Range> {
        let first = series.items().first()?;
        let last = series.items().last()?;
        let (lower, upper) = if include_interval {
            (
                first.period().first_millisecond_in(&self.context),
                last.period().last_millisecond_in(&self.context),
            )
        } else {
            (self.x_of(first), self.x_of(last))
        };
        Range::new(lower as f64, upper as f64).ok()
    }
}

impl<'a, S> IntoIterator for &'a TimeSeriesCollection<S> {
    type Item = &'a TimeSeries<S>;
    type IntoIter = std::slice::Iter<'a, TimeSeries<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<S> XyDataset for TimeSeriesCollection<S>
where
    S: Clone + PartialEq + fmt::Debug + fmt::Display,
{
    type Key = S;

    fn series_count(&self) -> usize {
        self.data.len()
    }

    fn series_key(&self, series: usize) -> Result<&S> {
        self.series(series).map(TimeSeries::key)
    }

    fn item_count(&self, series: usize) -> Result<usize> {
        self.series(series).map(TimeSeries::item_count)
    }

    fn x(&self, series: usize, item: usize) -> Result<i64> {
        Ok(self.x_of(self.item(series, item)?))
    }

    fn y(&self, series: usize, item: usize) -> Result<Option<f64>> {
        Ok(self.item(series, item)?.value())
    }
}

impl<S> IntervalXyDataset for TimeSeriesCollection<S>
where
    S: Clone + PartialEq + fmt::Debug + fmt::Display,
{
    fn start_x(&self, series: usize, item: usize) -> Result<i64> {
        Ok(self
            .item(series, item)?
            .period()
            .first_millisecond_in(&self.context))
    }

    fn end_x(&self, series: usize, item: usize) -> Result<i64> {
        Ok(self
            .item(series, item)?
            .period()
            .last_millisecond_in(&self.context))
    }
}

impl<S> DomainInfo for TimeSeriesCollection<S>
where
    S: Clone + PartialEq + fmt::Debug + fmt::Display,
{
    fn domain_bounds(&self, include_interval: bool) -> Option<Range> {
        self.data.iter().fold(None, |acc, series| {
            Range::combine(acc, self.series_domain(series, include_interval))
        })
    }
}
