// src/time/year.rs

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDateTime};

use crate::error::{Result, SeriesError};
use crate::time::calendar::ymd;
use crate::time::context::CalendarContext;
use crate::time::granularity::Granularity;
use crate::time::parse::{parse_int, TimePeriodFormatError};
use crate::time::unit::{at, end_of, serde_via_display, CalendarUnit};

/// A calendar year in the range -9999 to 9999.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Year {
    year: i16,
}

impl Year {
    /// The earliest supported year.
    pub const MINIMUM: i32 = -9999;
    /// The latest supported year.
    pub const MAXIMUM: i32 = 9999;

    /// Creates a year.
    ///
    /// # Errors
    ///
    /// Returns `SeriesError::PeriodOutOfRange` outside -9999..=9999.
    pub fn new(year: i32) -> Result<Self> {
        if !(Self::MINIMUM..=Self::MAXIMUM).contains(&year) {
            return Err(SeriesError::out_of_range(
                Granularity::Year,
                format!("year {year} is outside {}..={}", Self::MINIMUM, Self::MAXIMUM),
            ));
        }
        Ok(Self { year: year as i16 })
    }

    /// Wraps a year already checked by a finer unit's constructor.
    pub(crate) const fn from_validated(year: i16) -> Self {
        Self { year }
    }

    /// The year number.
    pub fn year(&self) -> i32 {
        i32::from(self.year)
    }
}

impl CalendarUnit for Year {
    const GRANULARITY: Granularity = Granularity::Year;

    fn previous(&self) -> Option<Self> {
        Self::new(self.year() - 1).ok()
    }

    fn next(&self) -> Option<Self> {
        Self::new(self.year() + 1).ok()
    }

    fn serial_index(&self) -> i64 {
        i64::from(self.year)
    }

    fn local_start(&self) -> NaiveDateTime {
        at(ymd(self.year(), 1, 1), 0, 0, 0, 0)
    }

    fn local_end(&self) -> NaiveDateTime {
        end_of(ymd(self.year(), 12, 31), 23, 59, 59)
    }

    fn from_instant(millis: i64, ctx: &CalendarContext) -> Result<Self> {
        Self::new(ctx.local_datetime(millis)?.year())
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.year)
    }
}

impl FromStr for Year {
    type Err = TimePeriodFormatError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let year = parse_int::<i32>("year", s, s)?;
        Self::new(year).map_err(|e| TimePeriodFormatError::new("year", s, e.to_string()))
    }
}

serde_via_display!(Year);
