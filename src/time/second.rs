// src/time/second.rs

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDateTime, Timelike};

use crate::error::{Result, SeriesError};
use crate::time::context::CalendarContext;
use crate::time::granularity::Granularity;
use crate::time::parse::{clock_fields, split_day_prefix, TimePeriodFormatError};
use crate::time::unit::{at, end_of, serde_via_display, CalendarUnit};
use crate::time::{Day, Hour, Minute};

/// One second of a specific minute. Leap seconds are not represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Second {
    minute: Minute,
    second: u8,
}

impl Second {
    /// Creates second `second` (0-59) of `minute`.
    pub fn new(second: u32, minute: Minute) -> Result<Self> {
        if second > 59 {
            return Err(SeriesError::out_of_range(
                Granularity::Second,
                format!("second {second} is outside 0..=59"),
            ));
        }
        Ok(Self {
            minute,
            second: second as u8,
        })
    }

    /// Creates a second from its calendar fields.
    pub fn from_fields(
        second: u32,
        minute: u32,
        hour: u32,
        day: u32,
        month: u32,
        year: i32,
    ) -> Result<Self> {
        Self::new(second, Minute::from_fields(minute, hour, day, month, year)?)
    }

    /// The minute this second belongs to.
    pub fn minute(&self) -> Minute {
        self.minute
    }

    /// The second of the minute (0-59).
    pub fn second(&self) -> u32 {
        u32::from(self.second)
    }

    pub(crate) fn clock(&self) -> (Day, u32, u32, u32) {
        (
            self.minute.day(),
            self.minute.hour().hour(),
            self.minute.minute(),
            self.second(),
        )
    }
}

impl CalendarUnit for Second {
    const GRANULARITY: Granularity = Granularity::Second;

    fn previous(&self) -> Option<Self> {
        match self.second {
            0 => Some(Self {
                minute: self.minute.previous()?,
                second: 59,
            }),
            s => Some(Self {
                minute: self.minute,
                second: s - 1,
            }),
        }
    }

    fn next(&self) -> Option<Self> {
        match self.second {
            59 => Some(Self {
                minute: self.minute.next()?,
                second: 0,
            }),
            s => Some(Self {
                minute: self.minute,
                second: s + 1,
            }),
        }
    }

    fn serial_index(&self) -> i64 {
        self.minute.serial_index() * 60 + i64::from(self.second)
    }

    fn local_start(&self) -> NaiveDateTime {
        let (day, h, m, s) = self.clock();
        at(day.date(), h, m, s, 0)
    }

    fn local_end(&self) -> NaiveDateTime {
        let (day, h, m, s) = self.clock();
        end_of(day.date(), h, m, s)
    }

    fn from_instant(millis: i64, ctx: &CalendarContext) -> Result<Self> {
        let local = ctx.local_datetime(millis)?;
        let hour = Hour::new(local.hour(), Day::from_date(local.date())?)?;
        Self::new(local.second(), Minute::new(local.minute(), hour)?)
    }
}

impl fmt::Display for Second {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.minute, self.second)
    }
}

impl FromStr for Second {
    type Err = TimePeriodFormatError;

    /// Accepts `YYYY-MM-DD HH:MM:SS`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (day, clock) = split_day_prefix("second", s.trim())?;
        let day: Day = day.parse()?;
        match clock_fields("second", s, clock)?.as_slice() {
            [hour, minute, second] => Hour::new(*hour, day)
                .and_then(|hour| Minute::new(*minute, hour))
                .and_then(|minute| Self::new(*second, minute))
                .map_err(|e| TimePeriodFormatError::new("second", s, e.to_string())),
            _ => Err(TimePeriodFormatError::new(
                "second",
                s,
                "expected HH:MM:SS after the date",
            )),
        }
    }
}

serde_via_display!(Second);
