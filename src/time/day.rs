// src/time/day.rs

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::error::{Result, SeriesError};
use crate::time::calendar::check_serial_year;
use crate::time::context::CalendarContext;
use crate::time::granularity::Granularity;
use crate::time::parse::TimePeriodFormatError;
use crate::time::unit::{at, end_of, serde_via_display, CalendarUnit};
use crate::time::{Month, Week, Year};

/// A single calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Day {
    date: NaiveDate,
}

impl Day {
    /// Creates a day from its day-of-month, month and year.
    pub fn new(day: u32, month: u32, year: i32) -> Result<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            SeriesError::out_of_range(
                Granularity::Day,
                format!("{year:04}-{month:02}-{day:02} is not a valid date"),
            )
        })?;
        Self::from_date(date)
    }

    /// Wraps a date, checking the supported year range.
    pub fn from_date(date: NaiveDate) -> Result<Self> {
        check_serial_year(Granularity::Day, date.year())?;
        Ok(Self { date })
    }

    /// The underlying date.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Day of the month (1-31).
    pub fn day_of_month(&self) -> u32 {
        self.date.day()
    }

    /// Month number (1-12).
    pub fn month_value(&self) -> u32 {
        self.date.month()
    }

    /// The year number.
    pub fn year_value(&self) -> i32 {
        self.date.year()
    }

    /// The year this day falls in.
    pub fn year(&self) -> Year {
        Year::from_validated(self.date.year() as i16)
    }

    /// The month containing this day.
    pub fn month(&self) -> Result<Month> {
        Month::new(self.date.month(), self.date.year())
    }

    /// The ISO week containing this day.
    pub fn week(&self) -> Result<Week> {
        Week::containing(self.date)
    }
}

impl CalendarUnit for Day {
    const GRANULARITY: Granularity = Granularity::Day;

    fn previous(&self) -> Option<Self> {
        Self::from_date(self.date.pred_opt()?).ok()
    }

    fn next(&self) -> Option<Self> {
        Self::from_date(self.date.succ_opt()?).ok()
    }

    fn serial_index(&self) -> i64 {
        i64::from(self.date.num_days_from_ce())
    }

    fn local_start(&self) -> NaiveDateTime {
        at(self.date, 0, 0, 0, 0)
    }

    fn local_end(&self) -> NaiveDateTime {
        end_of(self.date, 23, 59, 59)
    }

    fn from_instant(millis: i64, ctx: &CalendarContext) -> Result<Self> {
        Self::from_date(ctx.local_datetime(millis)?.date())
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.date.format("%Y-%m-%d"))
    }
}

impl FromStr for Day {
    type Err = TimePeriodFormatError;

    /// Accepts an ISO `YYYY-MM-DD` date.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let date = NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map_err(|e| TimePeriodFormatError::new("day", s, e.to_string()))?;
        Self::from_date(date).map_err(|e| TimePeriodFormatError::new("day", s, e.to_string()))
    }
}

serde_via_display!(Day);
