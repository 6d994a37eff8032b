//! Small value types shared across the crate

mod anchor;
mod log_level;
mod range;

pub use anchor::TimePeriodAnchor;
pub use log_level::LogLevel;
pub use range::Range;
