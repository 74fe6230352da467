//! Schedule store error types.

use crate::domain::{InvalidStationName, StationId, TrainId};

/// Errors that can occur when reading or writing the schedule.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// SQLite operation failed
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A station name was blank
    #[error(transparent)]
    InvalidStation(#[from] InvalidStationName),

    /// A new train failed validation
    #[error("invalid train: {0}")]
    InvalidTrain(&'static str),

    /// A stop refers to a station that does not exist
    #[error("unknown station id {0}")]
    UnknownStation(StationId),

    /// Stored stops for a train break the contiguous-index invariant
    #[error("corrupt stops for train {train}: {message}")]
    CorruptStops { train: TrainId, message: String },

    /// A writer panicked while holding the schedule lock
    #[error("schedule lock poisoned")]
    Poisoned,
}
