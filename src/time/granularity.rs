// src/time/granularity.rs

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::error::{Result, SeriesError};
use crate::time::context::CalendarContext;
use crate::time::period::Period;
use crate::time::unit::CalendarUnit;
use crate::time::{
    Day, FixedMillisecond, Hour, Millisecond, Minute, Month, Quarter, Second, Week, Year,
};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
/// The calendar granularity of a time period, ordered from coarsest to finest.
///
/// Each granularity corresponds to one concrete unit type in [`crate::time`].
pub enum Granularity {
    /// Rank 0: calendar years.
    Year,
    /// Rank 1: calendar quarters.
    Quarter,
    /// Rank 2: calendar months.
    Month,
    /// Rank 3: ISO-8601 weeks.
    Week,
    /// Rank 4: days.
    Day,
    /// Rank 5: hours.
    Hour,
    /// Rank 6: minutes.
    Minute,
    /// Rank 7: seconds.
    Second,
    /// Rank 8: milliseconds on the calendar.
    Millisecond,
    /// Rank 9: a single absolute millisecond, independent of any calendar.
    FixedMillisecond,
}

impl Granularity {
    /// Converts a rank (0-9) to a `Granularity` variant.
    ///
    /// # Errors
    ///
    /// Returns `SeriesError::InvalidArgument` if `rank` is greater than 9.
    pub fn from_rank(rank: u8) -> Result<Self> {
        match rank {
            0 => Ok(Granularity::Year),
            1 => Ok(Granularity::Quarter),
            2 => Ok(Granularity::Month),
            3 => Ok(Granularity::Week),
            4 => Ok(Granularity::Day),
            5 => Ok(Granularity::Hour),
            6 => Ok(Granularity::Minute),
            7 => Ok(Granularity::Second),
            8 => Ok(Granularity::Millisecond),
            9 => Ok(Granularity::FixedMillisecond),
            _ => Err(SeriesError::invalid_argument(format!(
                "Invalid granularity rank: {}",
                rank
            ))),
        }
    }

    /// Converts a `Granularity` variant to its rank (0-9).
    pub fn rank(&self) -> u8 {
        match self {
            Granularity::Year => 0,
            Granularity::Quarter => 1,
            Granularity::Month => 2,
            Granularity::Week => 3,
            Granularity::Day => 4,
            Granularity::Hour => 5,
            Granularity::Minute => 6,
            Granularity::Second => 7,
            Granularity::Millisecond => 8,
            Granularity::FixedMillisecond => 9,
        }
    }

    /// Returns the next finer calendar granularity.
    ///
    /// Millisecond and fixed-millisecond periods have nothing finer and map to themselves.
    pub fn downsize(&self) -> Granularity {
        match self {
            Granularity::Year => Granularity::Quarter,
            Granularity::Quarter => Granularity::Month,
            Granularity::Month | Granularity::Week => Granularity::Day,
            Granularity::Day => Granularity::Hour,
            Granularity::Hour => Granularity::Minute,
            Granularity::Minute => Granularity::Second,
            Granularity::Second | Granularity::Millisecond => Granularity::Millisecond,
            Granularity::FixedMillisecond => Granularity::FixedMillisecond,
        }
    }

    /// Returns the approximate duration of one period in milliseconds.
    pub fn nominal_millis(&self) -> i64 {
        match self {
            Granularity::Year => 31_556_952_000,   // 365.2425 days
            Granularity::Quarter => 7_889_238_000, // a quarter of that
            Granularity::Month => 2_629_746_000,   // a twelfth of that
            Granularity::Week => 604_800_000,
            Granularity::Day => 86_400_000,
            Granularity::Hour => 3_600_000,
            Granularity::Minute => 60_000,
            Granularity::Second => 1_000,
            Granularity::Millisecond | Granularity::FixedMillisecond => 1,
        }
    }

    /// Returns the period of this granularity containing the instant `millis`
    /// (milliseconds since the epoch) in the given calendar context.
    pub fn period_containing(&self, millis: i64, ctx: &CalendarContext) -> Result<Period> {
        Ok(match self {
            Granularity::Year => Year::from_instant(millis, ctx)?.into(),
            Granularity::Quarter => Quarter::from_instant(millis, ctx)?.into(),
            Granularity::Month => Month::from_instant(millis, ctx)?.into(),
            Granularity::Week => Week::from_instant(millis, ctx)?.into(),
            Granularity::Day => Day::from_instant(millis, ctx)?.into(),
            Granularity::Hour => Hour::from_instant(millis, ctx)?.into(),
            Granularity::Minute => Minute::from_instant(millis, ctx)?.into(),
            Granularity::Second => Second::from_instant(millis, ctx)?.into(),
            Granularity::Millisecond => Millisecond::from_instant(millis, ctx)?.into(),
            Granularity::FixedMillisecond => FixedMillisecond::from_instant(millis, ctx)?.into(),
        })
    }

    /// Parses `text` in the canonical form of this granularity.
    pub fn parse_period(&self, text: &str) -> Result<Period> {
        Ok(match self {
            Granularity::Year => text.parse::<Year>()?.into(),
            Granularity::Quarter => text.parse::<Quarter>()?.into(),
            Granularity::Month => text.parse::<Month>()?.into(),
            Granularity::Week => text.parse::<Week>()?.into(),
            Granularity::Day => text.parse::<Day>()?.into(),
            Granularity::Hour => text.parse::<Hour>()?.into(),
            Granularity::Minute => text.parse::<Minute>()?.into(),
            Granularity::Second => text.parse::<Second>()?.into(),
            Granularity::Millisecond => text.parse::<Millisecond>()?.into(),
            Granularity::FixedMillisecond => text.parse::<FixedMillisecond>()?.into(),
        })
    }
}
