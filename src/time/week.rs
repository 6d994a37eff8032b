// src/time/week.rs

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};

use crate::error::{Result, SeriesError};
use crate::time::calendar::check_serial_year;
use crate::time::context::CalendarContext;
use crate::time::granularity::Granularity;
use crate::time::parse::{parse_int, split_marked_number, TimePeriodFormatError};
use crate::time::unit::{at, end_of, serde_via_display, CalendarUnit};

/// An ISO-8601 week: Monday to Sunday, numbered within its week-based year.
///
/// Week 1 is the week containing the first Thursday of the year, so the first
/// days of January can belong to the last week of the previous year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Week {
    year: i16,
    week: u8,
}

impl Week {
    /// Creates week `week` (1-53) of the ISO week-based `year`.
    ///
    /// # Errors
    ///
    /// Returns `SeriesError::PeriodOutOfRange` if the year is outside the supported
    /// range or the year has no such week (week 53 exists only in long years).
    pub fn new(week: u32, year: i32) -> Result<Self> {
        check_serial_year(Granularity::Week, year)?;
        if NaiveDate::from_isoywd_opt(year, week, Weekday::Mon).is_none() {
            return Err(SeriesError::out_of_range(
                Granularity::Week,
                format!("{year} has no week {week}"),
            ));
        }
        Ok(Self {
            year: year as i16,
            week: week as u8,
        })
    }

    /// Returns the week containing `date`.
    pub fn containing(date: NaiveDate) -> Result<Self> {
        let iso = date.iso_week();
        Self::new(iso.week(), iso.year())
    }

    /// The week number (1-53).
    pub fn week(&self) -> u32 {
        u32::from(self.week)
    }

    /// The ISO week-based year.
    pub fn year_value(&self) -> i32 {
        i32::from(self.year)
    }

    /// The Monday starting this week.
    pub fn monday(&self) -> NaiveDate {
        NaiveDate::from_isoywd_opt(self.year_value(), self.week(), Weekday::Mon)
            .unwrap_or(NaiveDate::MIN)
    }
}

impl CalendarUnit for Week {
    const GRANULARITY: Granularity = Granularity::Week;

    fn previous(&self) -> Option<Self> {
        let date = self.monday().checked_sub_signed(Duration::days(7))?;
        Self::containing(date).ok()
    }

    fn next(&self) -> Option<Self> {
        let date = self.monday().checked_add_signed(Duration::days(7))?;
        Self::containing(date).ok()
    }

    /// Whole weeks since the Monday 0001-01-01.
    fn serial_index(&self) -> i64 {
        i64::from(self.monday().num_days_from_ce() - 1).div_euclid(7)
    }

    fn local_start(&self) -> NaiveDateTime {
        at(self.monday(), 0, 0, 0, 0)
    }

    fn local_end(&self) -> NaiveDateTime {
        end_of(self.monday() + Duration::days(6), 23, 59, 59)
    }

    fn from_instant(millis: i64, ctx: &CalendarContext) -> Result<Self> {
        Self::containing(ctx.local_datetime(millis)?.date())
    }
}

impl fmt::Display for Week {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-W{:02}", self.year, self.week)
    }
}

impl FromStr for Week {
    type Err = TimePeriodFormatError;

    /// Accepts a `W` followed by one or two digits; the remainder is the year.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (week, rest) = split_marked_number("week", s, 'W', 2)?;
        let year = parse_int::<i32>("week", s, &rest)?;
        Self::new(week, year).map_err(|e| TimePeriodFormatError::new("week", s, e.to_string()))
    }
}

serde_via_display!(Week);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iso_numbering() {
        // 2021-01-03 (a Sunday) is in week 53 of 2020.
        let date = NaiveDate::from_ymd_opt(2021, 1, 3).unwrap();
        assert_eq!(Week::containing(date).unwrap(), Week::new(53, 2020).unwrap());
        assert!(Week::new(53, 2021).is_err());
        assert!(Week::new(0, 2021).is_err());
    }

    #[test]
    fn adjacency_across_years() {
        let w = Week::new(53, 2020).unwrap();
        assert_eq!(w.next(), Some(Week::new(1, 2021).unwrap()));
        assert_eq!(Week::new(1, 2021).unwrap().previous(), Some(w));
        assert_eq!(w.next().unwrap().serial_index(), w.serial_index() + 1);
        assert_eq!(Week::new(1, 1900).unwrap().previous(), None);
    }

    #[test]
    fn seven_day_span() {
        let ctx = CalendarContext::utc();
        let w = Week::new(5, 2024).unwrap();
        assert_eq!(w.monday(), NaiveDate::from_ymd_opt(2024, 1, 29).unwrap());
        assert_eq!(
            w.last_millisecond(&ctx) - w.first_millisecond(&ctx) + 1,
            7 * 86_400_000
        );
    }

    #[test]
    fn parse_forms() {
        let w = Week::new(5, 2024).unwrap();
        assert_eq!("2024-W05".parse::<Week>().unwrap(), w);
        assert_eq!("W5/2024".parse::<Week>().unwrap(), w);
        assert_eq!("w05 2024".parse::<Week>().unwrap(), w);
        assert_eq!(w.to_string(), "2024-W05");
        assert!("2024-05".parse::<Week>().is_err());
    }
}
