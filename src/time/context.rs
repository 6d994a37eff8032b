// src/time/context.rs

//! Calendar contexts used to convert wall-clock periods to absolute milliseconds.
//!
//! A [`CalendarContext`] is a small `Copy` value passed explicitly to every
//! conversion; there is no process-wide default calendar.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, FixedOffset, LocalResult, NaiveDateTime, Offset, TimeZone, Utc};
#[cfg(feature = "timezones")]
use chrono_tz::Tz;

use crate::error::{Result, SeriesError};

/// The time zone a context resolves local times in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    /// Coordinated Universal Time.
    Utc,
    /// A fixed offset from UTC.
    Fixed(FixedOffset),
    /// A named IANA zone with daylight-saving rules.
    #[cfg(feature = "timezones")]
    Named(Tz),
}

/// Calendar context for millisecond conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarContext {
    zone: Zone,
}

impl Default for CalendarContext {
    fn default() -> Self {
        Self::utc()
    }
}

impl CalendarContext {
    /// A context evaluating everything in UTC.
    pub fn utc() -> Self {
        Self { zone: Zone::Utc }
    }

    /// A context with a fixed offset east of UTC, in seconds.
    ///
    /// # Errors
    ///
    /// Returns `SeriesError::InvalidArgument` if the offset is not strictly within ±24h.
    pub fn fixed(offset_seconds: i32) -> Result<Self> {
        let offset = FixedOffset::east_opt(offset_seconds).ok_or_else(|| {
            SeriesError::invalid_argument(format!("offset {offset_seconds}s is out of range"))
        })?;
        Ok(Self {
            zone: Zone::Fixed(offset),
        })
    }

    /// A context for a named IANA time zone such as `Europe/London`.
    #[cfg(feature = "timezones")]
    pub fn named(name: &str) -> Result<Self> {
        let tz: Tz = name
            .parse()
            .map_err(|_| SeriesError::invalid_argument(format!("unknown time zone {name:?}")))?;
        Ok(Self {
            zone: Zone::Named(tz),
        })
    }

    /// Returns the zone of this context.
    pub fn zone(&self) -> Zone {
        self.zone
    }

    /// Converts an absolute instant to local wall-clock time.
    pub fn local_datetime(&self, millis: i64) -> Result<NaiveDateTime> {
        let instant = Utc.timestamp_millis_opt(millis).single().ok_or_else(|| {
            SeriesError::invalid_argument(format!("instant {millis}ms is out of range"))
        })?;
        Ok(match self.zone {
            Zone::Utc => instant.naive_utc(),
            Zone::Fixed(offset) => instant.with_timezone(&offset).naive_local(),
            #[cfg(feature = "timezones")]
            Zone::Named(tz) => instant.with_timezone(&tz).naive_local(),
        })
    }

    /// The earliest instant (ms since epoch) a local time maps to.
    pub fn earliest_millis(&self, local: &NaiveDateTime) -> i64 {
        self.resolve(local, false)
    }

    /// The latest instant (ms since epoch) a local time maps to.
    pub fn latest_millis(&self, local: &NaiveDateTime) -> i64 {
        self.resolve(local, true)
    }

    fn resolve(&self, local: &NaiveDateTime, latest: bool) -> i64 {
        match self.zone {
            Zone::Utc => resolve_in(&Utc, local, latest),
            Zone::Fixed(offset) => resolve_in(&offset, local, latest),
            #[cfg(feature = "timezones")]
            Zone::Named(tz) => resolve_in(&tz, local, latest),
        }
    }
}

/// Ambiguous local times take the earliest or latest candidate; local times inside
/// a daylight-saving gap are read with the offset in force before the gap.
fn resolve_in<Z: TimeZone>(zone: &Z, local: &NaiveDateTime, latest: bool) -> i64 {
    match zone.from_local_datetime(local) {
        LocalResult::Single(dt) => dt.timestamp_millis(),
        LocalResult::Ambiguous(a, b) => {
            let (a, b) = (a.timestamp_millis(), b.timestamp_millis());
            if latest {
                a.max(b)
            } else {
                a.min(b)
            }
        }
        LocalResult::None => {
            let before = zone
                .offset_from_utc_datetime(&(*local - Duration::days(1)))
                .fix()
                .local_minus_utc();
            let utc = *local - Duration::seconds(i64::from(before));
            Utc.from_utc_datetime(&utc).timestamp_millis()
        }
    }
}

impl fmt::Display for CalendarContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.zone {
            Zone::Utc => write!(f, "UTC"),
            Zone::Fixed(offset) => write!(f, "{offset}"),
            #[cfg(feature = "timezones")]
            Zone::Named(tz) => write!(f, "{}", tz.name()),
        }
    }
}

impl FromStr for CalendarContext {
    type Err = SeriesError;

    /// Accepts `UTC`/`Z`, a fixed offset such as `+05:30` or `-0800`, or (with the
    /// `timezones` feature) an IANA zone name.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("utc") || s.eq_ignore_ascii_case("z") || s.eq_ignore_ascii_case("gmt") {
            return Ok(Self::utc());
        }
        if s.starts_with('+') || s.starts_with('-') {
            return parse_offset(s).and_then(Self::fixed);
        }
        #[cfg(feature = "timezones")]
        {
            Self::named(s)
        }
        #[cfg(not(feature = "timezones"))]
        {
            Err(SeriesError::invalid_argument(format!(
                "named time zone {s:?} requires the `timezones` feature"
            )))
        }
    }
}

fn parse_offset(s: &str) -> Result<i32> {
    let invalid = || SeriesError::invalid_argument(format!("invalid UTC offset {s:?}"));
    let sign = if s.starts_with('-') { -1 } else { 1 };
    let digits: String = s[1..].chars().filter(|c| *c != ':').collect();
    if !digits.bytes().all(|b| b.is_ascii_digit()) || (digits.len() != 2 && digits.len() != 4) {
        return Err(invalid());
    }
    let hours: i32 = digits[..2].parse().map_err(|_| invalid())?;
    let minutes: i32 = if digits.len() == 4 {
        digits[2..].parse().map_err(|_| invalid())?
    } else {
        0
    };
    if minutes >= 60 {
        return Err(invalid());
    }
    Ok(sign * (hours * 3600 + minutes * 60))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn utc_round_trip() {
        let ctx = CalendarContext::utc();
        let t = local(2024, 5, 15, 10, 30);
        let ms = ctx.earliest_millis(&t);
        assert_eq!(ms, 1_715_769_000_000);
        assert_eq!(ctx.local_datetime(ms).unwrap(), t);
    }

    #[test]
    fn fixed_offsets() {
        let ctx: CalendarContext = "+05:30".parse().unwrap();
        let t = local(2024, 1, 1, 5, 30);
        assert_eq!(ctx.earliest_millis(&t), 1_704_067_200_000);
        assert_eq!(ctx.to_string(), "+05:30");
        assert!("+25:00".parse::<CalendarContext>().is_err());
        assert!("+5".parse::<CalendarContext>().is_err());
        assert_eq!("-0800".parse::<CalendarContext>().unwrap(), CalendarContext::fixed(-8 * 3600).unwrap());
    }

    #[test]
    fn malformed_offsets_are_errors() {
        for text in ["+1é1", "-é", "+0-30", "+-1", "+ 1:00", "+١٢"] {
            assert!(
                matches!(text.parse::<CalendarContext>(), Err(SeriesError::InvalidArgument(_))),
                "{text}"
            );
        }
    }

    #[cfg(feature = "timezones")]
    #[test]
    fn daylight_saving_transitions() {
        let ctx = CalendarContext::named("Europe/London").unwrap();
        // 2024-10-27 01:30 happens twice in London.
        let ambiguous = local(2024, 10, 27, 1, 30);
        assert_eq!(
            ctx.latest_millis(&ambiguous) - ctx.earliest_millis(&ambiguous),
            3_600_000
        );
        // 2024-03-31 01:30 does not exist; it is read as GMT.
        let gap = local(2024, 3, 31, 1, 30);
        assert_eq!(ctx.earliest_millis(&gap), CalendarContext::utc().earliest_millis(&gap));
        assert!(CalendarContext::named("Mars/Olympus").is_err());
    }
}
