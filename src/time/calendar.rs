// src/time/calendar.rs

//! Gregorian calendar tables shared by the month-based units.

use chrono::NaiveDate;

use crate::error::{Result, SeriesError};
use crate::time::granularity::Granularity;

/// First year supported by the day-based units and everything finer.
pub const FIRST_SERIAL_YEAR: i32 = 1900;

/// Last year supported by every calendar unit.
pub const LAST_SERIAL_YEAR: i32 = 9999;

/// Days in each month of a common year, indexed by month number (index 0 unused).
const DAYS_IN_MONTH: [u8; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// English month names, indexed by month number minus one.
pub(crate) const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Returns true if `year` is a leap year in the proleptic Gregorian calendar.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Returns the number of the last day of `month` (1-12) in `year`.
///
/// Months outside 1-12 yield 0.
pub fn last_day_of_month(month: u32, year: i32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        1..=12 => u32::from(DAYS_IN_MONTH[month as usize]),
        _ => 0,
    }
}

/// Maps a month number (1-12) to its quarter (1-4).
pub fn month_to_quarter(month: u32) -> u32 {
    (month.saturating_sub(1)) / 3 + 1
}

/// First month (1-12) of a quarter (1-4).
pub fn first_month_in_quarter(quarter: u32) -> u32 {
    (quarter - 1) * 3 + 1
}

/// Last month (1-12) of a quarter (1-4).
pub fn last_month_in_quarter(quarter: u32) -> u32 {
    quarter * 3
}

/// Resolves a month from its number, full English name or three-letter abbreviation.
pub fn month_from_str(s: &str) -> Option<u32> {
    let s = s.trim();
    if let Ok(n) = s.parse::<u32>() {
        return (1..=12).contains(&n).then_some(n);
    }
    let lower = s.to_ascii_lowercase();
    MONTH_NAMES
        .iter()
        .position(|name| {
            let name = name.to_ascii_lowercase();
            name == lower || (lower.len() == 3 && name.starts_with(&lower))
        })
        .map(|i| i as u32 + 1)
}

/// Checks that `year` lies in the serial-date range for the given granularity.
pub(crate) fn check_serial_year(granularity: Granularity, year: i32) -> Result<()> {
    if (FIRST_SERIAL_YEAR..=LAST_SERIAL_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(SeriesError::out_of_range(
            granularity,
            format!("year {year} is outside {FIRST_SERIAL_YEAR}..={LAST_SERIAL_YEAR}"),
        ))
    }
}

/// The date for fields already validated by a unit constructor.
pub(crate) fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}
