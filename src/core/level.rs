//! Log level definitions and the level registry
//!
//! Levels are ranked by their numeric value. A message is emitted when its
//! rank is greater than or equal to the logger's configured rank, so
//! [`Level::Notset`] lets everything through.

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
#[repr(u8)]
pub enum Level {
    #[default]
    Notset = 0,
    Debug = 10,
    Info = 20,
    Warning = 30,
    Error = 40,
    Critical = 50,
}

/// Canonical level names, ordered by rank
const LEVEL_NAMES: [(Level, &str); 6] = [
    (Level::Notset, "NOTSET"),
    (Level::Debug, "DEBUG"),
    (Level::Info, "INFO"),
    (Level::Warning, "WARNING"),
    (Level::Error, "ERROR"),
    (Level::Critical, "CRITICAL"),
];

impl Level {
    /// All levels in ascending rank order
    pub const ALL: [Level; 6] = [
        Level::Notset,
        Level::Debug,
        Level::Info,
        Level::Warning,
        Level::Error,
        Level::Critical,
    ];

    #[inline]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Canonical name, read from the level registry
    pub const fn name(self) -> &'static str {
        let mut i = 0;
        while i < LEVEL_NAMES.len() {
            if LEVEL_NAMES[i].0 as u8 == self as u8 {
                return LEVEL_NAMES[i].1;
            }
            i += 1;
        }
        ""
    }

    pub fn from_value(value: u8) -> Option<Self> {
        LEVEL_NAMES
            .iter()
            .find(|(level, _)| level.value() == value)
            .map(|(level, _)| *level)
    }

    /// Whether a message at `self` passes a filter configured at `threshold`
    #[inline]
    pub fn is_enabled_for(self, threshold: Level) -> bool {
        self >= threshold
    }
}

/// Name of the level with the given numeric value
///
/// Returns an empty string for values outside the defined set.
pub fn level_name(value: u8) -> &'static str {
    Level::from_value(value).map(Level::name).unwrap_or("")
}

/// Exact, case-sensitive lookup of a canonical level name
///
/// ```
/// use seqlog::{level_of, Level};
///
/// assert_eq!(level_of("ERROR"), Some(Level::Error));
/// assert_eq!(level_of("error"), None);
/// ```
pub fn level_of(name: &str) -> Option<Level> {
    LEVEL_NAMES
        .iter()
        .find(|(_, candidate)| *candidate == name)
        .map(|(level, _)| *level)
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Level {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        level_of(s).ok_or_else(|| LoggerError::unknown_level(s))
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        level.value()
    }
}
