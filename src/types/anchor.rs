use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The point within a time period used as its x-coordinate.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum TimePeriodAnchor {
    /// The first millisecond of the period.
    #[default]
    Start,
    /// The millisecond halfway between the first and the last.
    Middle,
    /// The last millisecond of the period.
    End,
}
