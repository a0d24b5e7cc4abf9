//! Error types.
//!
//! Redaction itself never fails. Errors come from logger construction,
//! configuration parsing, and from sinks while writing a record.

use std::io;

use thiserror::Error;

/// A logger could not be constructed.
///
/// Construction is all-or-nothing: no logger is returned when an option fails.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("failed to apply logger option `{option}`")]
    InvalidOption {
        option: &'static str,
        #[source]
        source: OptionError,
    },
}

impl BuildError {
    pub(crate) fn option(option: &'static str, source: OptionError) -> Self {
        Self::InvalidOption { option, source }
    }
}

/// Why a single construction option was rejected.
#[derive(Debug, Error)]
pub enum OptionError {
    #[error("redaction marker must not be empty")]
    EmptyRedactionMarker,
    #[error("sensitive key {0:?} normalizes to an empty name")]
    EmptySensitiveKey(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown log level `{0}`")]
pub struct ParseLevelError(pub String);

/// Configuration text could not be parsed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid logger configuration")]
    Toml(#[from] toml::de::Error),
}

/// A sink failed to deliver a record.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("failed to encode log record")]
    Encode(#[from] serde_json::Error),
    #[error("failed to write log record")]
    Io(#[from] io::Error),
}
