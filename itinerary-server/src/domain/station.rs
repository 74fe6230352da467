//! Station identity types.

use std::fmt;

/// Error returned when a station name is unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station name: {reason}")]
pub struct InvalidStationName {
    reason: &'static str,
}

/// Database identifier of a station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StationId(pub i64);

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A trimmed, non-empty station name.
///
/// Station names are unique across the network, and two references that
/// differ only in surrounding whitespace name the same station.
///
/// # Examples
///
/// ```
/// use itinerary_server::domain::StationName;
///
/// let name = StationName::parse("  Chennai ").unwrap();
/// assert_eq!(name.as_str(), "Chennai");
///
/// assert!(StationName::parse("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StationName(String);

impl StationName {
    /// Trim and validate a station name.
    pub fn parse(s: &str) -> Result<Self, InvalidStationName> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InvalidStationName {
                reason: "must not be blank",
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A station in the network.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Station {
    pub id: StationId,
    pub name: StationName,
}

impl Station {
    pub fn new(id: StationId, name: StationName) -> Self {
        Self { id, name }
    }
}
