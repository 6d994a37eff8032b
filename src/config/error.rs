//! Failures raised while reading, parsing or checking a periodseries configuration.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Why a configuration could not be produced.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The text is not a valid periodseries TOML document.
    #[error("malformed configuration: {0}")]
    ParseError(#[from] toml::de::Error),

    /// The configuration could not be written back as TOML.
    #[error("cannot serialise configuration: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// A required setting is empty.
    #[error("{0} must be set")]
    MissingValue(String),

    /// A setting holds a value the data model cannot use.
    #[error("{field} = '{value}' rejected: {reason}")]
    InvalidValue {
        /// Dotted setting name, e.g. `calendar.time_zone`.
        field: String,
        /// Offending value as text.
        value: String,
        /// What is wrong with it.
        reason: String,
    },
}

impl ConfigError {
    /// Wraps a read failure for `path`.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ConfigError::Io {
            path: path.into(),
            source,
        }
    }

    /// Builds an [`ConfigError::InvalidValue`].
    pub fn invalid_value<S1, S2, S3>(field: S1, value: S2, reason: S3) -> Self
    where
        S1: Into<String>,
        S2: std::fmt::Display,
        S3: Into<String>,
    {
        ConfigError::InvalidValue {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Builds a [`ConfigError::MissingValue`] for `field`.
    pub fn missing_value<S: Into<String>>(field: S) -> Self {
        ConfigError::MissingValue(field.into())
    }
}
