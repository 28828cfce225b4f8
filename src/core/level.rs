//! Log level definitions

use crate::core::error::LogError;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Severity of a log record.
///
/// The numeric rank runs from the most severe to the most suppressible: a
/// record is emitted iff its rank is less than or equal to the configured
/// threshold rank. `Ignored` is a configuration-only sentinel ranking below
/// every record, so a logger thresholded at `Ignored` emits nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Ignored = 0,
    Critical = 1,
    Error = 2,
    Warning = 3,
    Info = 4,
    Debug = 5,
    Log = 6,
    Trace = 7,
    None = 8,
}

/// Width of the longest canonical level name (`CRITICAL`).
const MAX_NAME_WIDTH: usize = 8;

impl Level {
    pub const ALL: [Level; 9] = [
        Level::Ignored,
        Level::Critical,
        Level::Error,
        Level::Warning,
        Level::Info,
        Level::Debug,
        Level::Log,
        Level::Trace,
        Level::None,
    ];

    /// Canonical upper-case name. `None` renders as the empty string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Ignored => "IGNORED",
            Level::Critical => "CRITICAL",
            Level::Error => "ERROR",
            Level::Warning => "WARNING",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Log => "LOG",
            Level::Trace => "TRACE",
            Level::None => "",
        }
    }

    /// Fixed-width rendering: right-pads the canonical name with spaces, or
    /// truncates it when `width` is smaller than the name. Width 0 pads to
    /// the longest known name.
    pub fn padded(&self, width: usize) -> String {
        let name = self.as_str();
        let width = if width == 0 { MAX_NAME_WIDTH } else { width };
        if name.len() >= width {
            name[..width].to_string()
        } else {
            format!("{name:<width$}")
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Level {
    type Err = LogError;

    /// The empty string decodes to `None`; the literal text `"NONE"` does
    /// not decode at all.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(Level::None),
            "IGNORED" => Ok(Level::Ignored),
            "CRITICAL" => Ok(Level::Critical),
            "ERROR" => Ok(Level::Error),
            "WARNING" => Ok(Level::Warning),
            "INFO" => Ok(Level::Info),
            "DEBUG" => Ok(Level::Debug),
            "LOG" => Ok(Level::Log),
            "TRACE" => Ok(Level::Trace),
            other => Err(LogError::UnknownLevel(other.to_string())),
        }
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LevelVisitor;

        impl Visitor<'_> for LevelVisitor {
            type Value = Level;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a log level string")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Level, E> {
                value.parse::<Level>().map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, _value: u64) -> Result<Level, E> {
                Err(E::custom(LogError::LevelFromNumber))
            }

            fn visit_i64<E: de::Error>(self, _value: i64) -> Result<Level, E> {
                Err(E::custom(LogError::LevelFromNumber))
            }

            fn visit_f64<E: de::Error>(self, _value: f64) -> Result<Level, E> {
                Err(E::custom(LogError::LevelFromNumber))
            }
        }

        deserializer.deserialize_any(LevelVisitor)
    }
}
