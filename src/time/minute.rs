// src/time/minute.rs

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDateTime, Timelike};

use crate::error::{Result, SeriesError};
use crate::time::context::CalendarContext;
use crate::time::granularity::Granularity;
use crate::time::parse::{clock_fields, split_day_prefix, TimePeriodFormatError};
use crate::time::unit::{at, end_of, serde_via_display, CalendarUnit};
use crate::time::{Day, Hour};

/// One minute of a specific hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Minute {
    hour: Hour,
    minute: u8,
}

impl Minute {
    /// Creates minute `minute` (0-59) of `hour`.
    pub fn new(minute: u32, hour: Hour) -> Result<Self> {
        if minute > 59 {
            return Err(SeriesError::out_of_range(
                Granularity::Minute,
                format!("minute {minute} is outside 0..=59"),
            ));
        }
        Ok(Self {
            hour,
            minute: minute as u8,
        })
    }

    /// Creates a minute from its calendar fields.
    pub fn from_fields(minute: u32, hour: u32, day: u32, month: u32, year: i32) -> Result<Self> {
        Self::new(minute, Hour::from_fields(hour, day, month, year)?)
    }

    /// The hour this minute belongs to.
    pub fn hour(&self) -> Hour {
        self.hour
    }

    /// The day this minute belongs to.
    pub fn day(&self) -> Day {
        self.hour.day()
    }

    /// The minute of the hour (0-59).
    pub fn minute(&self) -> u32 {
        u32::from(self.minute)
    }
}

impl CalendarUnit for Minute {
    const GRANULARITY: Granularity = Granularity::Minute;

    fn previous(&self) -> Option<Self> {
        match self.minute {
            0 => Some(Self {
                hour: self.hour.previous()?,
                minute: 59,
            }),
            m => Some(Self {
                hour: self.hour,
                minute: m - 1,
            }),
        }
    }

    fn next(&self) -> Option<Self> {
        match self.minute {
            59 => Some(Self {
                hour: self.hour.next()?,
                minute: 0,
            }),
            m => Some(Self {
                hour: self.hour,
                minute: m + 1,
            }),
        }
    }

    fn serial_index(&self) -> i64 {
        self.hour.serial_index() * 60 + i64::from(self.minute)
    }

    fn local_start(&self) -> NaiveDateTime {
        at(self.day().date(), self.hour.hour(), self.minute(), 0, 0)
    }

    fn local_end(&self) -> NaiveDateTime {
        end_of(self.day().date(), self.hour.hour(), self.minute(), 59)
    }

    fn from_instant(millis: i64, ctx: &CalendarContext) -> Result<Self> {
        let local = ctx.local_datetime(millis)?;
        let hour = Hour::new(local.hour(), Day::from_date(local.date())?)?;
        Self::new(local.minute(), hour)
    }
}

impl fmt::Display for Minute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for Minute {
    type Err = TimePeriodFormatError;

    /// Accepts `YYYY-MM-DD HH:MM`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (day, clock) = split_day_prefix("minute", s.trim())?;
        let day: Day = day.parse()?;
        match clock_fields("minute", s, clock)?.as_slice() {
            [hour, minute] => Hour::new(*hour, day)
                .and_then(|hour| Self::new(*minute, hour))
                .map_err(|e| TimePeriodFormatError::new("minute", s, e.to_string())),
            _ => Err(TimePeriodFormatError::new("minute", s, "expected HH:MM after the date")),
        }
    }
}

serde_via_display!(Minute);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cascades_through_hour_and_day() {
        let m = Minute::from_fields(59, 23, 31, 12, 2023).unwrap();
        assert_eq!(m.next(), Some(Minute::from_fields(0, 0, 1, 1, 2024).unwrap()));
        assert_eq!(m.next().unwrap().previous(), Some(m));
        assert_eq!(m.next().unwrap().serial_index(), m.serial_index() + 1);
    }

    #[test]
    fn bounds() {
        let ctx = CalendarContext::utc();
        let m = Minute::from_fields(30, 10, 15, 5, 2024).unwrap();
        assert_eq!(m.first_millisecond(&ctx), 1_715_769_000_000);
        assert_eq!(m.last_millisecond(&ctx), 1_715_769_059_999);
        assert_eq!(Minute::from_instant(1_715_769_045_000, &ctx).unwrap(), m);
    }

    #[test]
    fn parse_and_display() {
        let m = Minute::from_fields(5, 7, 31, 1, 2024).unwrap();
        assert_eq!(m.to_string(), "2024-01-31 07:05");
        assert_eq!("2024-01-31 07:05".parse::<Minute>().unwrap(), m);
        assert!("2024-01-31 07:60".parse::<Minute>().is_err());
        assert!("2024-01-31 07".parse::<Minute>().is_err());
    }
}
