// src/time/month.rs

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDateTime};

use crate::error::{Result, SeriesError};
use crate::time::calendar::{
    check_serial_year, last_day_of_month, month_from_str, month_to_quarter, ymd,
    FIRST_SERIAL_YEAR, LAST_SERIAL_YEAR, MONTH_NAMES,
};
use crate::time::context::CalendarContext;
use crate::time::granularity::Granularity;
use crate::time::parse::TimePeriodFormatError;
use crate::time::unit::{at, end_of, serde_via_display, CalendarUnit};
use crate::time::{Quarter, Year};

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Month {
    year: i16,
    month: u8,
}

impl Month {
    /// Creates a month (1-12) of `year`.
    pub fn new(month: u32, year: i32) -> Result<Self> {
        check_serial_year(Granularity::Month, year)?;
        if !(1..=12).contains(&month) {
            return Err(SeriesError::out_of_range(
                Granularity::Month,
                format!("month {month} is outside 1..=12"),
            ));
        }
        Ok(Self {
            year: year as i16,
            month: month as u8,
        })
    }

    /// The month number (1-12).
    pub fn month(&self) -> u32 {
        u32::from(self.month)
    }

    /// The year the month falls in.
    pub fn year(&self) -> Year {
        Year::from_validated(self.year)
    }

    /// The year number.
    pub fn year_value(&self) -> i32 {
        i32::from(self.year)
    }

    /// The quarter containing this month.
    pub fn quarter(&self) -> Result<Quarter> {
        Quarter::new(month_to_quarter(self.month()), self.year_value())
    }

    /// English name of the month.
    pub fn name(&self) -> &'static str {
        MONTH_NAMES[usize::from(self.month) - 1]
    }
}

impl CalendarUnit for Month {
    const GRANULARITY: Granularity = Granularity::Month;

    fn previous(&self) -> Option<Self> {
        match self.month {
            1 if self.year_value() > FIRST_SERIAL_YEAR => Self::new(12, self.year_value() - 1).ok(),
            1 => None,
            m => Self::new(u32::from(m) - 1, self.year_value()).ok(),
        }
    }

    fn next(&self) -> Option<Self> {
        match self.month {
            12 if self.year_value() < LAST_SERIAL_YEAR => Self::new(1, self.year_value() + 1).ok(),
            12 => None,
            m => Self::new(u32::from(m) + 1, self.year_value()).ok(),
        }
    }

    fn serial_index(&self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month)
    }

    fn local_start(&self) -> NaiveDateTime {
        at(ymd(self.year_value(), self.month(), 1), 0, 0, 0, 0)
    }

    fn local_end(&self) -> NaiveDateTime {
        let day = last_day_of_month(self.month(), self.year_value());
        end_of(ymd(self.year_value(), self.month(), day), 23, 59, 59)
    }

    fn from_instant(millis: i64, ctx: &CalendarContext) -> Result<Self> {
        let local = ctx.local_datetime(millis)?;
        Self::new(local.month(), local.year())
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// The separator splitting a month string: the first `-`, else `,`, else space, else `.`.
fn find_separator(s: &str) -> Option<usize> {
    ['-', ',', ' ', '.'].iter().find_map(|c| s.find(*c))
}

fn evaluate_as_year(s: &str) -> Option<i32> {
    s.trim().parse::<Year>().ok().map(|y| y.year())
}

impl FromStr for Month {
    type Err = TimePeriodFormatError;

    /// Accepts a year and a month (number, English name or abbreviation) in either order.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let text = s.trim();
        let (first, second, year_is_first) = match find_separator(text) {
            Some(i) => {
                let first = text[..i].trim();
                let second = text[i + 1..].trim();
                let year_is_first = match (evaluate_as_year(first), evaluate_as_year(second)) {
                    (None, _) => false,
                    (Some(_), None) => true,
                    (Some(_), Some(_)) => first.len() > second.len(),
                };
                (first, second, year_is_first)
            }
            None => {
                let split = text
                    .char_indices()
                    .nth(4)
                    .map(|(i, _)| i)
                    .ok_or_else(|| TimePeriodFormatError::new("month", s, "too short"))?;
                (&text[..split], &text[split..], true)
            }
        };
        let (year_text, month_text) = if year_is_first {
            (first, second)
        } else {
            (second, first)
        };
        let month = month_from_str(month_text)
            .ok_or_else(|| TimePeriodFormatError::new("month", s, "can't evaluate the month"))?;
        let year = evaluate_as_year(year_text)
            .ok_or_else(|| TimePeriodFormatError::new("month", s, "can't evaluate the year"))?;
        Self::new(month, year).map_err(|e| TimePeriodFormatError::new("month", s, e.to_string()))
    }
}

serde_via_display!(Month);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacency() {
        let dec = Month::new(12, 2023).unwrap();
        assert_eq!(dec.next(), Some(Month::new(1, 2024).unwrap()));
        assert_eq!(Month::new(1, 2024).unwrap().previous(), Some(dec));
        assert_eq!(Month::new(1, 1900).unwrap().previous(), None);
        assert_eq!(Month::new(12, 9999).unwrap().next(), None);
        assert_eq!(dec.next().unwrap().serial_index(), dec.serial_index() + 1);
    }

    #[test]
    fn leap_february() {
        let ctx = CalendarContext::utc();
        let feb = Month::new(2, 2024).unwrap();
        let span = feb.last_millisecond(&ctx) - feb.first_millisecond(&ctx) + 1;
        assert_eq!(span, 29 * 86_400_000);
        assert_eq!(feb.quarter().unwrap(), Quarter::new(1, 2024).unwrap());
        assert_eq!(feb.name(), "February");
    }

    #[test]
    fn parse_forms() {
        let jan = Month::new(1, 2024).unwrap();
        assert_eq!("2024-01".parse::<Month>().unwrap(), jan);
        assert_eq!("01-2024".parse::<Month>().unwrap(), jan);
        assert_eq!("January 2024".parse::<Month>().unwrap(), jan);
        assert_eq!("Jan, 2024".parse::<Month>().unwrap(), jan);
        assert_eq!("2024.1".parse::<Month>().unwrap(), jan);
        assert_eq!("202401".parse::<Month>().unwrap(), jan);
        assert_eq!(jan.to_string(), "2024-01");
        assert!("2024-13".parse::<Month>().is_err());
        assert!("Smarch 2024".parse::<Month>().is_err());
        assert!("Jan".parse::<Month>().is_err());
    }
}
