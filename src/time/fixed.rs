// src/time/fixed.rs

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDateTime, TimeZone, Utc};

use crate::error::Result;
use crate::time::context::CalendarContext;
use crate::time::granularity::Granularity;
use crate::time::parse::{parse_int, TimePeriodFormatError};
use crate::time::unit::{serde_via_display, CalendarUnit};

/// A single absolute millisecond since the epoch, independent of any calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FixedMillisecond {
    millis: i64,
}

impl FixedMillisecond {
    /// Wraps a millisecond instant.
    pub fn new(millis: i64) -> Self {
        Self { millis }
    }

    /// The instant in milliseconds since the epoch.
    pub fn millis(&self) -> i64 {
        self.millis
    }

    fn utc(&self) -> NaiveDateTime {
        Utc.timestamp_millis_opt(self.millis)
            .single()
            .map(|dt| dt.naive_utc())
            .unwrap_or(NaiveDateTime::MIN)
    }
}

impl CalendarUnit for FixedMillisecond {
    const GRANULARITY: Granularity = Granularity::FixedMillisecond;

    fn previous(&self) -> Option<Self> {
        self.millis.checked_sub(1).map(Self::new)
    }

    fn next(&self) -> Option<Self> {
        self.millis.checked_add(1).map(Self::new)
    }

    fn serial_index(&self) -> i64 {
        self.millis
    }

    /// UTC wall-clock reading of the instant.
    fn local_start(&self) -> NaiveDateTime {
        self.utc()
    }

    fn local_end(&self) -> NaiveDateTime {
        self.utc()
    }

    fn from_instant(millis: i64, _ctx: &CalendarContext) -> Result<Self> {
        Ok(Self::new(millis))
    }

    fn first_millisecond(&self, _ctx: &CalendarContext) -> i64 {
        self.millis
    }

    fn last_millisecond(&self, _ctx: &CalendarContext) -> i64 {
        self.millis
    }

    fn middle_millisecond(&self, _ctx: &CalendarContext) -> i64 {
        self.millis
    }
}

impl From<i64> for FixedMillisecond {
    fn from(millis: i64) -> Self {
        Self::new(millis)
    }
}

impl fmt::Display for FixedMillisecond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.millis)
    }
}

impl FromStr for FixedMillisecond {
    type Err = TimePeriodFormatError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        parse_int::<i64>("fixed millisecond", s, s).map(Self::new)
    }
}

serde_via_display!(FixedMillisecond);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_independent() {
        let fm = FixedMillisecond::new(1_700_000_000_000);
        let tokyo = CalendarContext::fixed(9 * 3600).unwrap();
        assert_eq!(fm.first_millisecond(&tokyo), 1_700_000_000_000);
        assert_eq!(fm.last_millisecond(&CalendarContext::utc()), 1_700_000_000_000);
        assert_eq!(FixedMillisecond::from_instant(42, &tokyo).unwrap(), FixedMillisecond::new(42));
    }

    #[test]
    fn extremes() {
        assert_eq!(FixedMillisecond::new(i64::MAX).next(), None);
        assert_eq!(FixedMillisecond::new(i64::MIN).previous(), None);
        assert_eq!(FixedMillisecond::new(0).next(), Some(FixedMillisecond::new(1)));
    }

    #[test]
    fn parse_and_display() {
        assert_eq!("1700000000000".parse::<FixedMillisecond>().unwrap().to_string(), "1700000000000");
        assert_eq!(" -5 ".parse::<FixedMillisecond>().unwrap(), FixedMillisecond::new(-5));
        assert!("1.5".parse::<FixedMillisecond>().is_err());
    }
}
