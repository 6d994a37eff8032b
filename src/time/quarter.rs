// src/time/quarter.rs

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDateTime};

use crate::error::{Result, SeriesError};
use crate::time::calendar::{
    check_serial_year, first_month_in_quarter, last_day_of_month, last_month_in_quarter,
    month_to_quarter, ymd, FIRST_SERIAL_YEAR, LAST_SERIAL_YEAR,
};
use crate::time::context::CalendarContext;
use crate::time::granularity::Granularity;
use crate::time::parse::{parse_int, split_marked_number, TimePeriodFormatError};
use crate::time::unit::{at, end_of, serde_via_display, CalendarUnit};
use crate::time::Year;

/// A calendar quarter: three consecutive months starting in January, April, July or October.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Quarter {
    year: i16,
    quarter: u8,
}

impl Quarter {
    /// Creates a quarter (1-4) of `year`.
    pub fn new(quarter: u32, year: i32) -> Result<Self> {
        check_serial_year(Granularity::Quarter, year)?;
        if !(1..=4).contains(&quarter) {
            return Err(SeriesError::out_of_range(
                Granularity::Quarter,
                format!("quarter {quarter} is outside 1..=4"),
            ));
        }
        Ok(Self {
            year: year as i16,
            quarter: quarter as u8,
        })
    }

    /// The quarter number (1-4).
    pub fn quarter(&self) -> u32 {
        u32::from(self.quarter)
    }

    /// The year the quarter falls in.
    pub fn year(&self) -> Year {
        Year::from_validated(self.year)
    }

    /// The year number.
    pub fn year_value(&self) -> i32 {
        i32::from(self.year)
    }
}

impl CalendarUnit for Quarter {
    const GRANULARITY: Granularity = Granularity::Quarter;

    fn previous(&self) -> Option<Self> {
        match self.quarter {
            1 if self.year_value() > FIRST_SERIAL_YEAR => Self::new(4, self.year_value() - 1).ok(),
            1 => None,
            q => Self::new(u32::from(q) - 1, self.year_value()).ok(),
        }
    }

    fn next(&self) -> Option<Self> {
        match self.quarter {
            4 if self.year_value() < LAST_SERIAL_YEAR => Self::new(1, self.year_value() + 1).ok(),
            4 => None,
            q => Self::new(u32::from(q) + 1, self.year_value()).ok(),
        }
    }

    fn serial_index(&self) -> i64 {
        i64::from(self.year) * 4 + i64::from(self.quarter)
    }

    fn local_start(&self) -> NaiveDateTime {
        at(ymd(self.year_value(), first_month_in_quarter(self.quarter()), 1), 0, 0, 0, 0)
    }

    fn local_end(&self) -> NaiveDateTime {
        let month = last_month_in_quarter(self.quarter());
        let day = last_day_of_month(month, self.year_value());
        end_of(ymd(self.year_value(), month, day), 23, 59, 59)
    }

    fn from_instant(millis: i64, ctx: &CalendarContext) -> Result<Self> {
        let local = ctx.local_datetime(millis)?;
        Self::new(month_to_quarter(local.month()), local.year())
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{} {}", self.quarter, self.year)
    }
}

impl FromStr for Quarter {
    type Err = TimePeriodFormatError;

    /// Accepts a `Q` followed by one digit anywhere in the text; the remainder is the year.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (quarter, rest) = split_marked_number("quarter", s, 'Q', 1)?;
        let year = parse_int::<i32>("quarter", s, &rest)?;
        Self::new(quarter, year).map_err(|e| TimePeriodFormatError::new("quarter", s, e.to_string()))
    }
}

serde_via_display!(Quarter);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacency() {
        let q4 = Quarter::new(4, 2023).unwrap();
        assert_eq!(q4.next(), Some(Quarter::new(1, 2024).unwrap()));
        assert_eq!(Quarter::new(1, 2024).unwrap().previous(), Some(q4));
        assert_eq!(Quarter::new(1, 1900).unwrap().previous(), None);
        assert_eq!(Quarter::new(4, 9999).unwrap().next(), None);
        assert_eq!(q4.next().unwrap().serial_index(), q4.serial_index() + 1);
    }

    #[test]
    fn validation() {
        assert!(Quarter::new(0, 2024).is_err());
        assert!(Quarter::new(5, 2024).is_err());
        assert!(Quarter::new(1, 1899).is_err());
    }

    #[test]
    fn utc_bounds() {
        let ctx = CalendarContext::utc();
        let q = Quarter::new(1, 2024).unwrap();
        assert_eq!(q.first_millisecond(&ctx), 1_704_067_200_000);
        // 2024-03-31T23:59:59.999Z
        assert_eq!(q.last_millisecond(&ctx), 1_711_929_599_999);
    }

    #[test]
    fn parse_forms() {
        let q = Quarter::new(1, 2024).unwrap();
        assert_eq!("Q1 2024".parse::<Quarter>().unwrap(), q);
        assert_eq!("Q1/2024".parse::<Quarter>().unwrap(), q);
        assert_eq!("2024-Q1".parse::<Quarter>().unwrap(), q);
        assert_eq!(q.to_string(), "Q1 2024");
        assert!("Q5 2024".parse::<Quarter>().is_err());
        assert!("2024".parse::<Quarter>().is_err());
    }
}
