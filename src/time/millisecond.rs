// src/time/millisecond.rs

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDateTime, Timelike};

use crate::error::{Result, SeriesError};
use crate::time::context::CalendarContext;
use crate::time::granularity::Granularity;
use crate::time::parse::{clock_fields, split_day_prefix, TimePeriodFormatError};
use crate::time::unit::{at, serde_via_display, CalendarUnit};
use crate::time::{Day, Hour, Minute, Second};

/// One millisecond of a specific wall-clock second.
///
/// Unlike [`crate::time::FixedMillisecond`], the absolute instant depends on the
/// calendar context the period is evaluated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Millisecond {
    second: Second,
    millisecond: u16,
}

impl Millisecond {
    /// Creates millisecond `millisecond` (0-999) of `second`.
    pub fn new(millisecond: u32, second: Second) -> Result<Self> {
        if millisecond > 999 {
            return Err(SeriesError::out_of_range(
                Granularity::Millisecond,
                format!("millisecond {millisecond} is outside 0..=999"),
            ));
        }
        Ok(Self {
            second,
            millisecond: millisecond as u16,
        })
    }

    /// The second this millisecond belongs to.
    pub fn second(&self) -> Second {
        self.second
    }

    /// The millisecond of the second (0-999).
    pub fn millisecond(&self) -> u32 {
        u32::from(self.millisecond)
    }

    fn local(&self) -> NaiveDateTime {
        let (day, h, m, s) = self.second.clock();
        at(day.date(), h, m, s, self.millisecond())
    }
}

impl CalendarUnit for Millisecond {
    const GRANULARITY: Granularity = Granularity::Millisecond;

    fn previous(&self) -> Option<Self> {
        match self.millisecond {
            0 => Some(Self {
                second: self.second.previous()?,
                millisecond: 999,
            }),
            ms => Some(Self {
                second: self.second,
                millisecond: ms - 1,
            }),
        }
    }

    fn next(&self) -> Option<Self> {
        match self.millisecond {
            999 => Some(Self {
                second: self.second.next()?,
                millisecond: 0,
            }),
            ms => Some(Self {
                second: self.second,
                millisecond: ms + 1,
            }),
        }
    }

    fn serial_index(&self) -> i64 {
        self.second.serial_index() * 1000 + i64::from(self.millisecond)
    }

    fn local_start(&self) -> NaiveDateTime {
        self.local()
    }

    fn local_end(&self) -> NaiveDateTime {
        self.local()
    }

    fn from_instant(millis: i64, ctx: &CalendarContext) -> Result<Self> {
        let local = ctx.local_datetime(millis)?;
        let hour = Hour::new(local.hour(), Day::from_date(local.date())?)?;
        let second = Second::new(local.second(), Minute::new(local.minute(), hour)?)?;
        Self::new((local.nanosecond() / 1_000_000).min(999), second)
    }
}

impl fmt::Display for Millisecond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:03}", self.second, self.millisecond)
    }
}

impl FromStr for Millisecond {
    type Err = TimePeriodFormatError;

    /// Accepts `YYYY-MM-DD HH:MM:SS.mmm`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (day, clock) = split_day_prefix("millisecond", s.trim())?;
        let day: Day = day.parse()?;
        match clock_fields("millisecond", s, clock)?.as_slice() {
            [hour, minute, second, ms] => Hour::new(*hour, day)
                .and_then(|hour| Minute::new(*minute, hour))
                .and_then(|minute| Second::new(*second, minute))
                .and_then(|second| Self::new(*ms, second))
                .map_err(|e| TimePeriodFormatError::new("millisecond", s, e.to_string())),
            _ => Err(TimePeriodFormatError::new(
                "millisecond",
                s,
                "expected HH:MM:SS.mmm after the date",
            )),
        }
    }
}

serde_via_display!(Millisecond);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_instant() {
        let ctx = CalendarContext::utc();
        let ms = Millisecond::from_instant(1_715_769_045_123, &ctx).unwrap();
        assert_eq!(ms.millisecond(), 123);
        assert_eq!(ms.first_millisecond(&ctx), 1_715_769_045_123);
        assert_eq!(ms.last_millisecond(&ctx), 1_715_769_045_123);
        assert_eq!(ms.to_string(), "2024-05-15 10:30:45.123");
    }

    #[test]
    fn cascades() {
        let second = Second::from_fields(59, 59, 23, 31, 12, 2023).unwrap();
        let ms = Millisecond::new(999, second).unwrap();
        let next = ms.next().unwrap();
        assert_eq!(next.to_string(), "2024-01-01 00:00:00.000");
        assert_eq!(next.previous(), Some(ms));
        assert_eq!(next.serial_index(), ms.serial_index() + 1);
        assert!(Millisecond::new(1000, second).is_err());
    }

    #[test]
    fn parse() {
        let text = "2024-01-31 07:05:09.123";
        assert_eq!(text.parse::<Millisecond>().unwrap().to_string(), text);
        assert!("2024-01-31 07:05:09".parse::<Millisecond>().is_err());
    }
}
