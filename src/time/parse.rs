// src/time/parse.rs

//! Parse failures and the small text helpers shared by the unit parsers.

use thiserror::Error;

/// Raised when text cannot be interpreted as a time period.
///
/// Malformed input is an expected, recoverable condition, so it is kept apart
/// from the domain-consistency errors in [`crate::error::SeriesError`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot parse {input:?} as a {unit}: {reason}")]
pub struct TimePeriodFormatError {
    /// Name of the unit being parsed.
    pub unit: &'static str,
    /// The rejected input.
    pub input: String,
    /// What went wrong.
    pub reason: String,
}

impl TimePeriodFormatError {
    /// Creates a new format error.
    pub fn new(unit: &'static str, input: &str, reason: impl Into<String>) -> Self {
        Self {
            unit,
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Parses a trimmed integer, mapping failures to a format error.
pub(crate) fn parse_int<T: std::str::FromStr>(
    unit: &'static str,
    input: &str,
    part: &str,
) -> Result<T, TimePeriodFormatError> {
    part.trim()
        .parse::<T>()
        .map_err(|_| TimePeriodFormatError::new(unit, input, format!("{:?} is not a number", part.trim())))
}

/// Splits `s` around a marker letter followed by up to `max_digits` digits, as in
/// `Q3 2024` or `2024-W07`. Returns the number after the marker and the rest
/// of the text with `/`, `,` and `-` turned into spaces.
pub(crate) fn split_marked_number(
    unit: &'static str,
    s: &str,
    marker: char,
    max_digits: usize,
) -> Result<(u32, String), TimePeriodFormatError> {
    let upper = marker.to_ascii_uppercase();
    let lower = marker.to_ascii_lowercase();
    let i = s
        .find(|c| c == upper || c == lower)
        .ok_or_else(|| TimePeriodFormatError::new(unit, s, format!("missing {upper}")))?;
    let after = &s[i + 1..];
    let digits: String = after.chars().take_while(|c| c.is_ascii_digit()).take(max_digits).collect();
    if digits.is_empty() {
        return Err(TimePeriodFormatError::new(
            unit,
            s,
            format!("{upper} is not followed by a number"),
        ));
    }
    let number = parse_int::<u32>(unit, s, &digits)?;
    let remaining = format!("{}{}", &s[..i], &after[digits.len()..]);
    let remaining = remaining.replace(['/', ',', '-'], " ");
    Ok((number, remaining.trim().to_string()))
}

/// Splits a clock reading such as `07:05:09.123` into its numeric fields.
pub(crate) fn clock_fields(
    unit: &'static str,
    input: &str,
    clock: &str,
) -> Result<Vec<u32>, TimePeriodFormatError> {
    if clock.is_empty() {
        return Err(TimePeriodFormatError::new(unit, input, "missing time of day"));
    }
    clock
        .split([':', '.'])
        .map(|part| parse_int::<u32>(unit, input, part))
        .collect()
}

/// Splits a timestamp-like string into its leading `YYYY-MM-DD` part and the trimmed rest.
pub(crate) fn split_day_prefix<'a>(
    unit: &'static str,
    s: &'a str,
) -> Result<(&'a str, &'a str), TimePeriodFormatError> {
    let day = s
        .get(..10)
        .ok_or_else(|| TimePeriodFormatError::new(unit, s, "missing YYYY-MM-DD date"))?;
    Ok((day, s[10..].trim()))
}
