use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SeriesError};

/// A closed numeric interval `[lower, upper]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    lower: f64,
    upper: f64,
}

impl Range {
    /// Creates a range.
    ///
    /// # Errors
    ///
    /// Returns `SeriesError::InvalidArgument` if `lower > upper`.
    pub fn new(lower: f64, upper: f64) -> Result<Self> {
        if lower > upper {
            return Err(SeriesError::invalid_argument(format!(
                "range lower bound {lower} is greater than upper bound {upper}"
            )));
        }
        Ok(Self { lower, upper })
    }

    /// A range covering exactly one value.
    pub fn point(value: f64) -> Self {
        Self {
            lower: value,
            upper: value,
        }
    }

    /// Lower bound.
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Upper bound.
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// `upper - lower`.
    pub fn length(&self) -> f64 {
        self.upper - self.lower
    }

    /// Midpoint of the range.
    pub fn central_value(&self) -> f64 {
        self.lower / 2.0 + self.upper / 2.0
    }

    /// Returns true if `value` lies within the closed range.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }

    /// Widens the range to include `value`; NaN is ignored.
    pub fn include(self, value: f64) -> Self {
        if value.is_nan() {
            return self;
        }
        Self {
            lower: self.lower.min(value),
            upper: self.upper.max(value),
        }
    }

    /// The smallest range containing both, treating `None` as empty.
    pub fn combine(a: Option<Range>, b: Option<Range>) -> Option<Range> {
        match (a, b) {
            (None, b) => b,
            (a, None) => a,
            (Some(a), Some(b)) => Some(Range {
                lower: a.lower.min(b.lower),
                upper: a.upper.max(b.upper),
            }),
        }
    }

    /// Like [`Range::combine`], but a NaN bound on either side defers to the other range.
    pub fn combine_ignoring_nan(a: Option<Range>, b: Option<Range>) -> Option<Range> {
        let a = a.filter(|r| !r.is_nan_range());
        let b = b.filter(|r| !r.is_nan_range());
        Self::combine(a, b)
    }

    /// Returns true if both bounds are NaN.
    pub fn is_nan_range(&self) -> bool {
        self.lower.is_nan() && self.upper.is_nan()
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lower, self.upper)
    }
}
