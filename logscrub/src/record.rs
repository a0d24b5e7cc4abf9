//! Log records and their attributes.

use std::{error::Error as StdError, fmt, panic::Location, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::ParseLevelError,
    value::{ToValue, Value},
};

/// Severity of a record. Ordered from least to most severe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    #[default]
    Debug,
    Info,
    #[serde(alias = "warning")]
    Warn,
    Error,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }

    /// Picks a level for an HTTP response status: 5xx is an error, 4xx a
    /// warning, everything else informational.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            500.. => Self::Error,
            400..=499 => Self::Warn,
            _ => Self::Info,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(ParseLevelError(s.to_owned())),
        }
    }
}

/// A key/value pair attached to a record.
#[derive(Clone, Debug, PartialEq)]
pub struct Attr {
    pub key: String,
    pub value: Value,
}

impl Attr {
    pub fn new<V>(key: impl Into<String>, value: &V) -> Self
    where
        V: ToValue + ?Sized,
    {
        Self {
            key: key.into(),
            value: value.to_value(),
        }
    }

    pub fn from_value(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    /// Groups `attrs` under `key`. Each member is still matched by its own key.
    pub fn group(key: impl Into<String>, attrs: Vec<Attr>) -> Self {
        Self::from_value(key, Value::Group(attrs))
    }

    /// Logs an error message together with its source chain.
    pub fn error(key: impl Into<String>, err: &(dyn StdError + 'static)) -> Self {
        Self::from_value(key, Value::error(err))
    }

    /// Logs the `Debug` rendering of a value that has no [`ToValue`] impl.
    pub fn debug<T: fmt::Debug + ?Sized>(key: impl Into<String>, value: &T) -> Self {
        Self::from_value(key, Value::opaque(value))
    }
}

/// Builds a `Vec<Attr>` from `key => value` pairs.
///
/// ```rust
/// use logscrub::attrs;
///
/// let attrs = attrs!["user_id" => 42_u64, "password" => "hunter2"];
/// assert_eq!(attrs.len(), 2);
/// assert_eq!(attrs[0].key, "user_id");
/// ```
#[macro_export]
macro_rules! attrs {
    () => {
        ::std::vec::Vec::<$crate::Attr>::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        ::std::vec![$($crate::Attr::new($key, &$value)),+]
    };
}

/// A single log event.
#[derive(Clone, Debug)]
pub struct Record {
    pub time: DateTime<Utc>,
    pub level: Level,
    pub message: String,
    pub attrs: Vec<Attr>,
    /// Call site, captured when the logger is configured to add the source.
    pub location: Option<&'static Location<'static>>,
}

impl Record {
    /// Creates a record stamped with the current time.
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            time: Utc::now(),
            level,
            message: message.into(),
            attrs: Vec::new(),
            location: None,
        }
    }

    #[must_use]
    pub fn with_attrs(mut self, attrs: Vec<Attr>) -> Self {
        self.attrs.extend(attrs);
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: &'static Location<'static>) -> Self {
        self.location = Some(location);
        self
    }

    /// Copies time, level, message and location, replacing the attributes.
    #[must_use]
    pub fn with_replaced_attrs(&self, attrs: Vec<Attr>) -> Self {
        Self {
            time: self.time,
            level: self.level,
            message: self.message.clone(),
            attrs,
            location: self.location,
        }
    }
}
