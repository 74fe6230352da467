//! Itinerary ranking for search results.

use std::fmt;
use std::str::FromStr;

use crate::domain::Itinerary;

/// Sort key for search results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortBy {
    /// Cheapest first.
    #[default]
    Price,
    /// Shortest first.
    Duration,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Price => "price",
            SortBy::Duration => "duration",
        }
    }
}

/// Error returned for an unrecognised sort key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort key {0:?}: expected \"price\" or \"duration\"")]
pub struct UnknownSortKey(pub String);

impl FromStr for SortBy {
    type Err = UnknownSortKey;

    /// Parse a sort key, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        if key.eq_ignore_ascii_case("price") {
            Ok(SortBy::Price)
        } else if key.eq_ignore_ascii_case("duration") {
            Ok(SortBy::Duration)
        } else {
            Err(UnknownSortKey(s.to_string()))
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rank itineraries ascending by the chosen key.
///
/// The sort is stable, so ties keep the order the finders produced them in:
/// direct before transfer, then by train and stop order.
pub fn rank_itineraries(mut itineraries: Vec<Itinerary>, sort_by: SortBy) -> Vec<Itinerary> {
    match sort_by {
        SortBy::Price => itineraries.sort_by_key(|i| i.total_price()),
        SortBy::Duration => itineraries.sort_by_key(|i| i.total_duration_min()),
    }
    itineraries
}
