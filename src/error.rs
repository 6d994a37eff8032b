//! Error types for the periodseries crate
//!
//! This module defines the error types used throughout the crate.
//! The main error type is `SeriesError`, which covers configuration mistakes,
//! domain-consistency violations (duplicate periods, granularity mismatches,
//! duplicate series keys), index range errors and parse failures.

use thiserror::Error;

use crate::time::granularity::Granularity;
use crate::time::parse::TimePeriodFormatError;

/// Main error type for the periodseries crate
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeriesError {
    /// An argument was rejected at the call boundary
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration could not be loaded or validated
    #[error("Configuration error: {0}")]
    Config(String),

    /// The series already holds an observation for the period
    #[error("The series already contains an observation for the time period {period}; duplicates are not permitted, use add_or_update instead")]
    DuplicatePeriod {
        /// Display form of the rejected period.
        period: String,
    },

    /// The period granularity differs from the one the series is locked to
    #[error("Granularity mismatch: the series holds {expected} periods but a {found} period was supplied")]
    GranularityMismatch {
        /// Granularity fixed by the first insertion.
        expected: Granularity,
        /// Granularity of the rejected period.
        found: Granularity,
    },

    /// No observation exists for the period
    #[error("There is no existing value for the time period {0}")]
    NoSuchPeriod(String),

    /// A collection already holds a series with this key
    #[error("Duplicate series key: {0}")]
    DuplicateKey(String),

    /// Index outside `0..len`
    #[error("Index {index} out of bounds (length {len})")]
    IndexOutOfBounds {
        /// The rejected index.
        index: usize,
        /// Length of the indexed sequence.
        len: usize,
    },

    /// Calendar fields outside the supported range
    #[error("{granularity} out of supported range: {detail}")]
    PeriodOutOfRange {
        /// Granularity being constructed.
        granularity: Granularity,
        /// What was out of range.
        detail: String,
    },

    /// Text could not be parsed as a time period
    #[error("Parse error: {0}")]
    Parse(#[from] TimePeriodFormatError),

    /// The global logger could not be installed
    #[error("Logger error: {0}")]
    Logger(String),
}

/// Result type alias for operations that can fail with a [SeriesError]
pub type Result<T> = std::result::Result<T, SeriesError>;

impl SeriesError {
    /// Create a new invalid argument error
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        SeriesError::InvalidArgument(msg.into())
    }

    /// Create a new duplicate period error
    pub fn duplicate_period(period: impl std::fmt::Display) -> Self {
        SeriesError::DuplicatePeriod {
            period: period.to_string(),
        }
    }

    /// Create a new no-such-period error
    pub fn no_such_period(period: impl std::fmt::Display) -> Self {
        SeriesError::NoSuchPeriod(period.to_string())
    }

    /// Create a new duplicate key error
    pub fn duplicate_key(key: impl std::fmt::Display) -> Self {
        SeriesError::DuplicateKey(key.to_string())
    }

    /// Create a new index out of bounds error
    pub fn index_out_of_bounds(index: usize, len: usize) -> Self {
        SeriesError::IndexOutOfBounds { index, len }
    }

    /// Create a new out-of-range error for a granularity
    pub fn out_of_range<S: Into<String>>(granularity: Granularity, detail: S) -> Self {
        SeriesError::PeriodOutOfRange {
            granularity,
            detail: detail.into(),
        }
    }

    /// Returns true for errors caused by malformed period text.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, SeriesError::Parse(_))
    }
}

impl From<crate::config::ConfigError> for SeriesError {
    fn from(err: crate::config::ConfigError) -> Self {
        SeriesError::Config(err.to_string())
    }
}
