// src/time/period.rs

//! The closed set of calendar units and the context-pegged period built on it.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::Result;
use crate::time::context::CalendarContext;
use crate::time::granularity::Granularity;
use crate::time::unit::CalendarUnit;
use crate::time::{
    Day, FixedMillisecond, Hour, Millisecond, Minute, Month, Quarter, Second, Week, Year,
};
use crate::types::TimePeriodAnchor;

/// Any calendar unit, tagged with its granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "granularity", content = "period", rename_all = "kebab-case")]
pub enum Period {
    /// A calendar year.
    Year(Year),
    /// A calendar quarter.
    Quarter(Quarter),
    /// A calendar month.
    Month(Month),
    /// An ISO week.
    Week(Week),
    /// A day.
    Day(Day),
    /// An hour of a day.
    Hour(Hour),
    /// A minute of an hour.
    Minute(Minute),
    /// A second of a minute.
    Second(Second),
    /// A millisecond of a wall-clock second.
    Millisecond(Millisecond),
    /// An absolute millisecond.
    FixedMillisecond(FixedMillisecond),
}

macro_rules! dispatch {
    ($period:expr, $unit:ident => $body:expr) => {
        match $period {
            Period::Year($unit) => $body,
            Period::Quarter($unit) => $body,
            Period::Month($unit) => $body,
            Period::Week($unit) => $body,
            Period::Day($unit) => $body,
            Period::Hour($unit) => $body,
            Period::Minute($unit) => $body,
            Period::Second($unit) => $body,
            Period::Millisecond($unit) => $body,
            Period::FixedMillisecond($unit) => $body,
        }
    };
}

impl Period {
    /// The granularity of the wrapped unit.
    pub fn granularity(&self) -> Granularity {
        fn of<U: CalendarUnit>(_: &U) -> Granularity {
            U::GRANULARITY
        }
        dispatch!(self, u => of(u))
    }

    /// The preceding period of the same granularity, if any.
    pub fn previous(&self) -> Option<Period> {
        dispatch!(self, u => u.previous().map(Period::from))
    }

    /// The following period of the same granularity, if any.
    pub fn next(&self) -> Option<Period> {
        dispatch!(self, u => u.next().map(Period::from))
    }

    /// The dense serial index of the wrapped unit.
    pub fn serial_index(&self) -> i64 {
        dispatch!(self, u => u.serial_index())
    }

    /// First millisecond in `ctx`.
    pub fn first_millisecond(&self, ctx: &CalendarContext) -> i64 {
        dispatch!(self, u => u.first_millisecond(ctx))
    }

    /// Last millisecond in `ctx`.
    pub fn last_millisecond(&self, ctx: &CalendarContext) -> i64 {
        dispatch!(self, u => u.last_millisecond(ctx))
    }

    /// Middle millisecond in `ctx`.
    pub fn middle_millisecond(&self, ctx: &CalendarContext) -> i64 {
        dispatch!(self, u => u.middle_millisecond(ctx))
    }

    /// The millisecond selected by `anchor` in `ctx`.
    pub fn millisecond(&self, anchor: TimePeriodAnchor, ctx: &CalendarContext) -> i64 {
        dispatch!(self, u => CalendarUnit::millisecond(u, anchor, ctx))
    }

    /// Pegs this period to a calendar context, caching its bounds.
    pub fn peg(self, ctx: &CalendarContext) -> RegularTimePeriod {
        RegularTimePeriod::new(self, *ctx)
    }
}

impl PartialOrd for Period {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Period {
    /// Periods of one granularity order by their calendar fields. Periods of different
    /// granularities order by their middle millisecond in UTC, then coarse before fine.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Period::Year(a), Period::Year(b)) => a.cmp(b),
            (Period::Quarter(a), Period::Quarter(b)) => a.cmp(b),
            (Period::Month(a), Period::Month(b)) => a.cmp(b),
            (Period::Week(a), Period::Week(b)) => a.cmp(b),
            (Period::Day(a), Period::Day(b)) => a.cmp(b),
            (Period::Hour(a), Period::Hour(b)) => a.cmp(b),
            (Period::Minute(a), Period::Minute(b)) => a.cmp(b),
            (Period::Second(a), Period::Second(b)) => a.cmp(b),
            (Period::Millisecond(a), Period::Millisecond(b)) => a.cmp(b),
            (Period::FixedMillisecond(a), Period::FixedMillisecond(b)) => a.cmp(b),
            _ => {
                let utc = CalendarContext::utc();
                self.middle_millisecond(&utc)
                    .cmp(&other.middle_millisecond(&utc))
                    .then_with(|| self.granularity().cmp(&other.granularity()))
            }
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        dispatch!(self, u => fmt::Display::fmt(u, f))
    }
}

macro_rules! impl_from_unit {
    ($($unit:ident),* $(,)?) => {
        $(
            impl From<$unit> for Period {
                fn from(unit: $unit) -> Self {
                    Period::$unit(unit)
                }
            }

            impl From<$unit> for RegularTimePeriod {
                fn from(unit: $unit) -> Self {
                    RegularTimePeriod::utc(unit)
                }
            }
        )*
    };
}

impl_from_unit!(
    Year,
    Quarter,
    Month,
    Week,
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
    FixedMillisecond,
);

/// A period pegged to a calendar context, with its millisecond bounds cached.
///
/// Equality, hashing and ordering only look at the period; two pegged periods
/// for the same day in different zones are equal.
#[derive(Debug, Clone, Copy)]
pub struct RegularTimePeriod {
    period: Period,
    context: CalendarContext,
    first: i64,
    last: i64,
}

impl RegularTimePeriod {
    /// Pegs `period` to `context`.
    pub fn new(period: impl Into<Period>, context: CalendarContext) -> Self {
        let period = period.into();
        Self {
            period,
            context,
            first: period.first_millisecond(&context),
            last: period.last_millisecond(&context),
        }
    }

    /// Pegs `period` to UTC.
    pub fn utc(period: impl Into<Period>) -> Self {
        Self::new(period, CalendarContext::utc())
    }

    /// Parses `text` as a period of `granularity` and pegs it to `context`.
    pub fn parse(granularity: Granularity, text: &str, context: CalendarContext) -> Result<Self> {
        Ok(Self::new(granularity.parse_period(text)?, context))
    }

    /// The period of `granularity` containing the instant `millis` in `context`.
    pub fn containing(
        granularity: Granularity,
        millis: i64,
        context: CalendarContext,
    ) -> Result<Self> {
        Ok(Self::new(granularity.period_containing(millis, &context)?, context))
    }

    /// The underlying unit.
    pub fn period(&self) -> Period {
        self.period
    }

    /// The granularity of the underlying unit.
    pub fn granularity(&self) -> Granularity {
        self.period.granularity()
    }

    /// The context the cached bounds were computed in.
    pub fn context(&self) -> CalendarContext {
        self.context
    }

    /// Recomputes the cached bounds in `ctx`.
    pub fn peg(&mut self, ctx: &CalendarContext) {
        *self = Self::new(self.period, *ctx);
    }

    /// Cached first millisecond.
    pub fn first_millisecond(&self) -> i64 {
        self.first
    }

    /// Cached last millisecond.
    pub fn last_millisecond(&self) -> i64 {
        self.last
    }

    /// Middle of the cached bounds.
    pub fn middle_millisecond(&self) -> i64 {
        self.first + (self.last - self.first) / 2
    }

    /// First millisecond in `ctx`, using the cache when `ctx` is the pegged context.
    pub fn first_millisecond_in(&self, ctx: &CalendarContext) -> i64 {
        if *ctx == self.context {
            self.first
        } else {
            self.period.first_millisecond(ctx)
        }
    }

    /// Last millisecond in `ctx`, using the cache when `ctx` is the pegged context.
    pub fn last_millisecond_in(&self, ctx: &CalendarContext) -> i64 {
        if *ctx == self.context {
            self.last
        } else {
            self.period.last_millisecond(ctx)
        }
    }

    /// Middle millisecond in `ctx`.
    pub fn middle_millisecond_in(&self, ctx: &CalendarContext) -> i64 {
        let first = self.first_millisecond_in(ctx);
        first + (self.last_millisecond_in(ctx) - first) / 2
    }

    /// Cached millisecond selected by `anchor`.
    pub fn millisecond(&self, anchor: TimePeriodAnchor) -> i64 {
        self.millisecond_in(anchor, &self.context)
    }

    /// The millisecond selected by `anchor` in `ctx`.
    pub fn millisecond_in(&self, anchor: TimePeriodAnchor, ctx: &CalendarContext) -> i64 {
        match anchor {
            TimePeriodAnchor::Start => self.first_millisecond_in(ctx),
            TimePeriodAnchor::Middle => self.middle_millisecond_in(ctx),
            TimePeriodAnchor::End => self.last_millisecond_in(ctx),
        }
    }

    /// Dense serial index of the underlying unit.
    pub fn serial_index(&self) -> i64 {
        self.period.serial_index()
    }

    /// The preceding period, pegged to the same context.
    pub fn previous(&self) -> Option<Self> {
        self.period.previous().map(|p| Self::new(p, self.context))
    }

    /// The following period, pegged to the same context.
    pub fn next(&self) -> Option<Self> {
        self.period.next().map(|p| Self::new(p, self.context))
    }
}

impl From<Period> for RegularTimePeriod {
    fn from(period: Period) -> Self {
        Self::utc(period)
    }
}

impl PartialEq for RegularTimePeriod {
    fn eq(&self, other: &Self) -> bool {
        self.period == other.period
    }
}

impl Eq for RegularTimePeriod {}

impl Hash for RegularTimePeriod {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.period.hash(state);
    }
}

impl PartialOrd for RegularTimePeriod {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RegularTimePeriod {
    fn cmp(&self, other: &Self) -> Ordering {
        self.period.cmp(&other.period)
    }
}

impl fmt::Display for RegularTimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.period, f)
    }
}

impl Serialize for RegularTimePeriod {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("RegularTimePeriod", 4)?;
        state.serialize_field("granularity", &self.granularity())?;
        state.serialize_field("period", &self.period.to_string())?;
        state.serialize_field("start", &self.first)?;
        state.serialize_field("end", &self.last)?;
        state.end()
    }
}
