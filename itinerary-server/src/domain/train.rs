//! Train and stop records.

use std::fmt;

use super::{ClockTime, StationId};

/// Database identifier of a train.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TrainId(pub i64);

impl fmt::Display for TrainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 0-based position of a stop along a train's path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StopIndex(pub u32);

impl StopIndex {
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// A named train.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Train {
    pub id: TrainId,
    pub name: String,
}

impl Train {
    pub fn new(id: TrainId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// One scheduled visit of a train to a station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stop {
    pub train_id: TrainId,
    pub station_id: StationId,
    pub index: StopIndex,
    /// Distance from the previous stop on the same train; zero at index 0.
    pub distance_from_prev_km: u32,
    pub departure: ClockTime,
}
