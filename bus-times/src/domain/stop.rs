//! Stop identifier and stop types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid stop identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid stop ID: {reason}")]
pub struct InvalidStopId {
    reason: &'static str,
}

/// A GTFS `stop_id`.
///
/// GTFS leaves the format of stop identifiers to the agency, so the only
/// guarantees are that the identifier is non-empty, has no surrounding
/// whitespace and contains no control characters.
///
/// # Examples
///
/// ```
/// use bus_times::domain::StopId;
///
/// let stop = StopId::parse("101").unwrap();
/// assert_eq!(stop.as_str(), "101");
///
/// assert!(StopId::parse("").is_err());
/// assert!(StopId::parse(" 101").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StopId(String);

impl StopId {
    /// Parse a stop identifier from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidStopId> {
        if s.is_empty() {
            return Err(InvalidStopId {
                reason: "must not be empty",
            });
        }

        if s.trim() != s {
            return Err(InvalidStopId {
                reason: "must not have surrounding whitespace",
            });
        }

        if s.chars().any(char::is_control) {
            return Err(InvalidStopId {
                reason: "must not contain control characters",
            });
        }

        Ok(StopId(s.to_string()))
    }

    /// Returns the stop identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StopId {
    type Error = InvalidStopId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<StopId> for String {
    fn from(id: StopId) -> Self {
        id.0
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.0)
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A transit boarding location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stop {
    #[serde(rename = "stop_id")]
    pub id: StopId,
    #[serde(rename = "stop_name")]
    pub name: String,
}

impl Stop {
    /// Create a new stop.
    pub fn new(id: StopId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
