// src/time/mod.rs

//! Calendar units, the tagged [`Period`] over them, and the context-pegged
//! [`RegularTimePeriod`] used as the x-index of a time series.

pub mod calendar;
pub mod context;
pub mod granularity;
pub mod parse;
pub mod period;
pub mod unit;

mod day;
mod fixed;
mod hour;
mod millisecond;
mod minute;
mod month;
mod quarter;
mod second;
mod week;
mod year;

pub use context::{CalendarContext, Zone};
pub use day::Day;
pub use fixed::FixedMillisecond;
pub use granularity::Granularity;
pub use hour::Hour;
pub use millisecond::Millisecond;
pub use minute::Minute;
pub use month::Month;
pub use parse::TimePeriodFormatError;
pub use period::{Period, RegularTimePeriod};
pub use quarter::Quarter;
pub use second::Second;
pub use unit::CalendarUnit;
pub use week::Week;
pub use year::Year;
