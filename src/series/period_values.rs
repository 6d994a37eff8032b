// src/series/period_values.rs

//! Series of arbitrary, possibly overlapping time spans.

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SeriesError};
use crate::series::dataset::{DomainInfo, IntervalXyDataset, XyDataset};
use crate::types::{Range, TimePeriodAnchor};

/// A span of time between two instants, both inclusive, in milliseconds since the epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SimpleTimePeriod {
    start: i64,
    end: i64,
}

impl SimpleTimePeriod {
    /// Creates a span.
    ///
    /// # Errors
    ///
    /// `SeriesError::InvalidArgument` if `start > end`.
    pub fn new(start: i64, end: i64) -> Result<Self> {
        if start > end {
            return Err(SeriesError::invalid_argument(format!(
                "period start {start} is after its end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// The first millisecond.
    pub fn start(&self) -> i64 {
        self.start
    }

    /// The last millisecond.
    pub fn end(&self) -> i64 {
        self.end
    }

    /// The midpoint as `start / 2 + end / 2`, which cannot overflow.
    pub fn middle(&self) -> i64 {
        self.start / 2 + self.end / 2
    }

    /// The millisecond selected by `anchor`.
    pub fn millisecond(&self, anchor: TimePeriodAnchor) -> i64 {
        match anchor {
            TimePeriodAnchor::Start => self.start,
            TimePeriodAnchor::Middle => self.middle(),
            TimePeriodAnchor::End => self.end,
        }
    }
}

impl fmt::Display for SimpleTimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// A span and its optional value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimePeriodValue {
    period: SimpleTimePeriod,
    value: Option<f64>,
}

impl TimePeriodValue {
    /// Creates an observation.
    pub fn new(period: SimpleTimePeriod, value: impl Into<Option<f64>>) -> Self {
        Self {
            period,
            value: value.into(),
        }
    }

    /// The observed span.
    pub fn period(&self) -> &SimpleTimePeriod {
        &self.period
    }

    /// The observed value.
    pub fn value(&self) -> Option<f64> {
        self.value
    }
}

/// Indices of the items with extreme start, middle and end instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Extremes {
    min_start: usize,
    max_start: usize,
    min_middle: usize,
    max_middle: usize,
    min_end: usize,
    max_end: usize,
}

/// A series of possibly overlapping spans, kept in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimePeriodValues<S> {
    key: S,
    description: Option<String>,
    data: Vec<TimePeriodValue>,
    #[serde(skip)]
    extremes: Option<Extremes>,
}

impl<S> TimePeriodValues<S>
where
    S: Clone + PartialEq + fmt::Debug + fmt::Display,
{
    /// Creates an empty series.
    pub fn new(key: S) -> Self {
        Self {
            key,
            description: None,
            data: Vec::new(),
            extremes: None,
        }
    }

    /// The series key.
    pub fn key(&self) -> &S {
        &self.key
    }

    /// Renames the series.
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

    /// Number of items.
    pub fn item_count(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the series has no items.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The items in insertion order.
    pub fn items(&self) -> &[TimePeriodValue] {
        &self.data
    }

    /// The item at `index`.
    pub fn data_item(&self, index: usize) -> Result<&TimePeriodValue> {
        self.data
            .get(index)
            .ok_or_else(|| SeriesError::index_out_of_bounds(index, self.data.len()))
    }

    /// The span at `index`.
    pub fn time_period(&self, index: usize) -> Result<&SimpleTimePeriod> {
        self.data_item(index).map(TimePeriodValue::period)
    }

    /// The value at `index`.
    pub fn value(&self, index: usize) -> Result<Option<f64>> {
        self.data_item(index).map(TimePeriodValue::value)
    }

    /// Appends an observation.
    pub fn add(&mut self, period: SimpleTimePeriod, value: impl Into<Option<f64>>) {
        self.data.push(TimePeriodValue::new(period, value));
        self.update_extremes_for_added(self.data.len() - 1);
    }

    /// Replaces the value at `index`.
    pub fn update(&mut self, index: usize, value: impl Into<Option<f64>>) -> Result<()> {
        let len = self.data.len();
        let item = self
            .data
            .get_mut(index)
            .ok_or_else(|| SeriesError::index_out_of_bounds(index, len))?;
        item.value = value.into();
        Ok(())
    }

    /// Removes the items from `start` to `end`, both inclusive.
    pub fn delete(&mut self, start: usize, end: usize) -> Result<()> {
        if end < start {
            return Err(SeriesError::invalid_argument(format!(
                "end index {end} is before start index {start}"
            )));
        }
        if end >= self.data.len() {
            return Err(SeriesError::index_out_of_bounds(end, self.data.len()));
        }
        self.data.drain(start..=end);
        self.recalculate_extremes();
        Ok(())
    }

    /// Index of the item with the earliest start.
    pub fn min_start_index(&self) -> Option<usize> {
        self.extremes.map(|e| e.min_start)
    }

    /// Index of the item with the latest start.
    pub fn max_start_index(&self) -> Option<usize> {
        self.extremes.map(|e| e.max_start)
    }

    /// Index of the item with the earliest midpoint.
    pub fn min_middle_index(&self) -> Option<usize> {
        self.extremes.map(|e| e.min_middle)
    }

    /// Index of the item with the latest midpoint.
    pub fn max_middle_index(&self) -> Option<usize> {
        self.extremes.map(|e| e.max_middle)
    }

    /// Index of the item with the earliest end.
    pub fn min_end_index(&self) -> Option<usize> {
        self.extremes.map(|e| e.min_end)
    }

    /// Index of the item with the latest end.
    pub fn max_end_index(&self) -> Option<usize> {
        self.extremes.map(|e| e.max_end)
    }

    fn update_extremes_for_added(&mut self, index: usize) {
        let p = self.data[index].period;
        let Some(mut e) = self.extremes else {
            self.extremes = Some(Extremes {
                min_start: index,
                max_start: index,
                min_middle: index,
                max_middle: index,
                min_end: index,
                max_end: index,
            });
            return;
        };
        let at = |i: usize| self.data[i].period;
        if p.start < at(e.min_start).start {
            e.min_start = index;
        }
        if p.start > at(e.max_start).start {
            e.max_start = index;
        }
        if p.middle() < at(e.min_middle).middle() {
            e.min_middle = index;
        }
        if p.middle() > at(e.max_middle).middle() {
            e.max_middle = index;
        }
        if p.end < at(e.min_end).end {
            e.min_end = index;
        }
        if p.end > at(e.max_end).end {
            e.max_end = index;
        }
        self.extremes = Some(e);
    }

    fn recalculate_extremes(&mut self) {
        self.extremes = None;
        for i in 0..self.data.len() {
            self.update_extremes_for_added(i);
        }
    }

    fn domain(&self, anchor: TimePeriodAnchor, include_interval: bool) -> Option<Range> {
        let e = self.extremes?;
        let at = |i: usize| self.data[i].period;
        let (lower, upper) = if include_interval {
            (at(e.min_start).start as f64, at(e.max_end).end as f64)
        } else {
            match anchor {
                TimePeriodAnchor::Start => {
                    (at(e.min_start).start as f64, at(e.max_start).start as f64)
                }
                TimePeriodAnchor::Middle => (
                    at(e.min_middle).middle() as f64,
                    at(e.max_middle).middle() as f64,
                ),
                TimePeriodAnchor::End => (at(e.min_end).end as f64, at(e.max_end).end as f64),
            }
        };
        Range::new(lower, upper).ok()
    }
}

/// A set of [`TimePeriodValues`] series projected to x-coordinates by one anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct TimePeriodValuesCollection<S> {
    data: Vec<TimePeriodValues<S>>,
    x_position: TimePeriodAnchor,
}

impl<S> Default for TimePeriodValuesCollection<S> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            x_position: TimePeriodAnchor::Middle,
        }
    }
}

impl<S> TimePeriodValuesCollection<S>
where
    S: Clone + PartialEq + fmt::Debug + fmt::Display,
{
    /// Creates an empty collection anchored at the middle of each span.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a collection holding one series.
    pub fn with_series(series: TimePeriodValues<S>) -> Self {
        let mut collection = Self::new();
        collection.data.push(series);
        collection
    }

    /// The anchor used to project spans to x-coordinates.
    pub fn x_position(&self) -> TimePeriodAnchor {
        self.x_position
    }

    /// Sets the anchor used to project spans to x-coordinates.
    pub fn set_x_position(&mut self, anchor: TimePeriodAnchor) {
        self.x_position = anchor;
    }

    /// The series at `index`.
    pub fn series(&self, index: usize) -> Result<&TimePeriodValues<S>> {
        self.data
            .get(index)
            .ok_or_else(|| SeriesError::index_out_of_bounds(index, self.data.len()))
    }

    /// Adds a series.
    ///
    /// # Errors
    ///
    /// `SeriesError::DuplicateKey` if a member already has the series' key.
    pub fn add_series(&mut self, series: TimePeriodValues<S>) -> Result<()> {
        if self.data.iter().any(|s| s.key() == series.key()) {
            return Err(SeriesError::duplicate_key(series.key()));
        }
        self.data.push(series);
        Ok(())
    }

    /// Mutates the series at `index` through `f`.
    ///
    /// # Errors
    ///
    /// `SeriesError::IndexOutOfBounds` for a bad index. `SeriesError::DuplicateKey` if `f`
    /// renamed the series to a key held by another member; the old key is restored and
    /// every other change made by `f` is kept.
    pub fn update_series<F, R>(&mut self, index: usize, f: F) -> Result<R>
    where
        F: FnOnce(&mut TimePeriodValues<S>) -> R,
    {
        let len = self.data.len();
        let series = self
            .data
            .get_mut(index)
            .ok_or_else(|| SeriesError::index_out_of_bounds(index, len))?;
        let old_key = series.key().clone();
        let result = f(series);
        let new_key = series.key().clone();
        if new_key != old_key
            && self
                .data
                .iter()
                .enumerate()
                .any(|(i, s)| i != index && *s.key() == new_key)
        {
            debug!("values collection: vetoed rename of {} to {}", old_key, new_key);
            self.data[index].set_key(old_key);
            return Err(SeriesError::duplicate_key(new_key));
        }
        Ok(result)
    }

    /// Renames the series at `index`. See [`TimePeriodValuesCollection::update_series`].
    pub fn rename_series(&mut self, index: usize, key: S) -> Result<()> {
        self.update_series(index, |series| series.set_key(key))
    }

    /// Removes and returns the series at `index`.
    pub fn remove_series(&mut self, index: usize) -> Result<TimePeriodValues<S>> {
        if index >= self.data.len() {
            return Err(SeriesError::index_out_of_bounds(index, self.data.len()));
        }
        Ok(self.data.remove(index))
    }

    /// Removes and returns the series with `key`, if present.
    pub fn remove_series_by_key(&mut self, key: &S) -> Option<TimePeriodValues<S>> {
        let index = self.data.iter().position(|s| s.key() == key)?;
        Some(self.data.remove(index))
    }

    fn item(&self, series: usize, item: usize) -> Result<&TimePeriodValue> {
        self.series(series)?.data_item(item)
    }
}

impl<S> XyDataset for TimePeriodValuesCollection<S>
where
    S: Clone + PartialEq + fmt::Debug + fmt::Display,
{
    type Key = S;

    fn series_count(&self) -> usize {
        self.data.len()
    }

    fn series_key(&self, series: usize) -> Result<&S> {
        self.series(series).map(TimePeriodValues::key)
    }

    fn item_count(&self, series: usize) -> Result<usize> {
        self.series(series).map(TimePeriodValues::item_count)
    }

    fn x(&self, series: usize, item: usize) -> Result<i64> {
        Ok(self.item(series, item)?.period().millisecond(self.x_position))
    }

    fn y(&self, series: usize, item: usize) -> Result<Option<f64>> {
        Ok(self.item(series, item)?.value())
    }
}

impl<S> IntervalXyDataset for TimePeriodValuesCollection<S>
where
    S: Clone + PartialEq + fmt::Debug + fmt::Display,
{
    fn start_x(&self, series: usize, item: usize) -> Result<i64> {
        Ok(self.item(series, item)?.period().start())
    }

    fn end_x(&self, series: usize, item: usize) -> Result<i64> {
        Ok(self.item(series, item)?.period().end())
    }
}

impl<S> DomainInfo for TimePeriodValuesCollection<S>
where
    S: Clone + PartialEq + fmt::Debug + fmt::Display,
{
    fn domain_bounds(&self, include_interval: bool) -> Option<Range> {
        self.data.iter().fold(None, |acc, series| {
            Range::combine(acc, series.domain(self.x_position, include_interval))
        })
    }
}
