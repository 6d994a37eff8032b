// src/time/unit.rs

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::Result;
use crate::time::context::CalendarContext;
use crate::time::granularity::Granularity;
use crate::time::parse::TimePeriodFormatError;
use crate::time::period::Period;
use crate::types::TimePeriodAnchor;

/// The contract every concrete calendar unit satisfies.
///
/// Units are immutable values whose identity is their calendar fields. Their
/// millisecond bounds depend on a [`CalendarContext`] and are computed on demand.
/// Ordering between two values of the same unit follows their serial index.
pub trait CalendarUnit:
    Copy
    + Ord
    + Hash
    + fmt::Debug
    + fmt::Display
    + FromStr<Err = TimePeriodFormatError>
    + Into<Period>
{
    /// The granularity tag of this unit.
    const GRANULARITY: Granularity;

    /// The unit immediately before this one, or `None` at the lower range limit.
    fn previous(&self) -> Option<Self>;

    /// The unit immediately after this one, or `None` at the upper range limit.
    fn next(&self) -> Option<Self>;

    /// A dense index: `next().serial_index() == serial_index() + 1`.
    fn serial_index(&self) -> i64;

    /// Local wall-clock time of the first millisecond.
    fn local_start(&self) -> NaiveDateTime;

    /// Local wall-clock time of the last millisecond.
    fn local_end(&self) -> NaiveDateTime;

    /// The unit containing the instant `millis` in the given context.
    fn from_instant(millis: i64, ctx: &CalendarContext) -> Result<Self>;

    /// First millisecond of the unit, evaluated in `ctx`.
    fn first_millisecond(&self, ctx: &CalendarContext) -> i64 {
        ctx.earliest_millis(&self.local_start())
    }

    /// Last millisecond of the unit, evaluated in `ctx`.
    fn last_millisecond(&self, ctx: &CalendarContext) -> i64 {
        ctx.latest_millis(&self.local_end())
    }

    /// The millisecond closest to the middle of the unit, evaluated in `ctx`.
    fn middle_millisecond(&self, ctx: &CalendarContext) -> i64 {
        let first = self.first_millisecond(ctx);
        let last = self.last_millisecond(ctx);
        first + (last - first) / 2
    }

    /// The millisecond selected by `anchor`, evaluated in `ctx`.
    fn millisecond(&self, anchor: TimePeriodAnchor, ctx: &CalendarContext) -> i64 {
        match anchor {
            TimePeriodAnchor::Start => self.first_millisecond(ctx),
            TimePeriodAnchor::Middle => self.middle_millisecond(ctx),
            TimePeriodAnchor::End => self.last_millisecond(ctx),
        }
    }
}

/// Last representable millisecond of a wall-clock second.
pub(crate) const LAST_MILLI: u32 = 999;

/// Local time at `h:m:s.ms` on `date`. Fields are validated by the unit constructors.
pub(crate) fn at(date: NaiveDate, h: u32, m: u32, s: u32, ms: u32) -> NaiveDateTime {
    date.and_hms_milli_opt(h, m, s, ms)
        .unwrap_or_else(|| date.and_time(NaiveTime::MIN))
}

/// Local time of the last millisecond of the second `h:m:s` on `date`.
pub(crate) fn end_of(date: NaiveDate, h: u32, m: u32, s: u32) -> NaiveDateTime {
    at(date, h, m, s, LAST_MILLI)
}

/// Serialises a unit as its canonical text and deserialises through `FromStr`,
/// so deserialised values are always validated.
macro_rules! serde_via_display {
    ($unit:ty) => {
        impl serde::Serialize for $unit {
            fn serialize<S: serde::Serializer>(
                &self,
                serializer: S,
            ) -> std::result::Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> serde::Deserialize<'de> for $unit {
            fn deserialize<D: serde::Deserializer<'de>>(
                deserializer: D,
            ) -> std::result::Result<Self, D::Error> {
                let text = String::deserialize(deserializer)?;
                text.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

pub(crate) use serde_via_display;
