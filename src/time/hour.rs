// src/time/hour.rs

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDateTime, Timelike};

use crate::error::{Result, SeriesError};
use crate::time::context::CalendarContext;
use crate::time::granularity::Granularity;
use crate::time::parse::{clock_fields, split_day_prefix, TimePeriodFormatError};
use crate::time::unit::{at, end_of, serde_via_display, CalendarUnit};
use crate::time::Day;

/// One hour of a specific day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Hour {
    day: Day,
    hour: u8,
}

impl Hour {
    /// Creates hour `hour` (0-23) of `day`.
    pub fn new(hour: u32, day: Day) -> Result<Self> {
        if hour > 23 {
            return Err(SeriesError::out_of_range(
                Granularity::Hour,
                format!("hour {hour} is outside 0..=23"),
            ));
        }
        Ok(Self {
            day,
            hour: hour as u8,
        })
    }

    /// Creates an hour from its calendar fields.
    pub fn from_fields(hour: u32, day: u32, month: u32, year: i32) -> Result<Self> {
        Self::new(hour, Day::new(day, month, year)?)
    }

    /// The day this hour belongs to.
    pub fn day(&self) -> Day {
        self.day
    }

    /// The hour of the day (0-23).
    pub fn hour(&self) -> u32 {
        u32::from(self.hour)
    }
}

impl CalendarUnit for Hour {
    const GRANULARITY: Granularity = Granularity::Hour;

    fn previous(&self) -> Option<Self> {
        match self.hour {
            0 => Some(Self {
                day: self.day.previous()?,
                hour: 23,
            }),
            h => Some(Self {
                day: self.day,
                hour: h - 1,
            }),
        }
    }

    fn next(&self) -> Option<Self> {
        match self.hour {
            23 => Some(Self {
                day: self.day.next()?,
                hour: 0,
            }),
            h => Some(Self {
                day: self.day,
                hour: h + 1,
            }),
        }
    }

    fn serial_index(&self) -> i64 {
        self.day.serial_index() * 24 + i64::from(self.hour)
    }

    fn local_start(&self) -> NaiveDateTime {
        at(self.day.date(), self.hour(), 0, 0, 0)
    }

    fn local_end(&self) -> NaiveDateTime {
        end_of(self.day.date(), self.hour(), 59, 59)
    }

    fn from_instant(millis: i64, ctx: &CalendarContext) -> Result<Self> {
        let local = ctx.local_datetime(millis)?;
        Self::new(local.hour(), Day::from_date(local.date())?)
    }
}

impl fmt::Display for Hour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:02}", self.day, self.hour)
    }
}

impl FromStr for Hour {
    type Err = TimePeriodFormatError;

    /// Accepts `YYYY-MM-DD HH`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (day, clock) = split_day_prefix("hour", s.trim())?;
        let day: Day = day.parse()?;
        match clock_fields("hour", s, clock)?.as_slice() {
            [hour] => Self::new(*hour, day)
                .map_err(|e| TimePeriodFormatError::new("hour", s, e.to_string())),
            _ => Err(TimePeriodFormatError::new("hour", s, "expected HH after the date")),
        }
    }
}

serde_via_display!(Hour);
