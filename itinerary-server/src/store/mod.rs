//! Schedule storage.
//!
//! The search core only ever reads the schedule through [`ScheduleStore`].
//! [`Timetable`] is the in-memory implementation searches run against;
//! [`SqliteStore`] persists stations, trains and stops, and [`Schedule`]
//! ties the two together so that every write publishes a fresh snapshot.

mod error;
mod schedule;
pub mod seed;
mod sqlite;
mod timetable;

pub use error::StoreError;
pub use schedule::Schedule;
pub use sqlite::SqliteStore;
pub use timetable::Timetable;

use crate::domain::{ClockTime, LegCandidate, Station, StationId, StopIndex, Train, TrainId};

/// Read-only queries over stations, trains and their ordered stops.
///
/// This abstraction allows the planner to be tested against hand-built
/// timetables.
pub trait ScheduleStore {
    /// Find a station by exact (trimmed) name, or by numeric id.
    fn resolve_station(&self, reference: &str) -> Option<Station>;

    /// Every station with at least one recorded stop, in id order.
    fn stations_with_stops(&self) -> Vec<Station>;

    /// Every forward-ordered pair of stops from `from` to `to` on a single
    /// train, ordered by train id, then boarding index, then alighting index.
    fn leg_candidates(&self, from: StationId, to: StationId) -> Vec<LegCandidate>;

    /// Sum of `distance_from_prev_km` over stops with index in
    /// `(from, to]` on `train`. Zero when no such stops exist.
    fn sum_distance(&self, train: TrainId, from: StopIndex, to: StopIndex) -> u32;

    /// Distinct trains that stop at both stations, in any order.
    fn trains_serving(&self, a: StationId, b: StationId) -> Vec<Train>;
}

/// Longest route a train may cover end to end.
///
/// Two legs of this length still sum within a `u32`.
pub const MAX_ROUTE_DISTANCE_KM: u32 = 1_000_000;

/// A stop in a train to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewStop {
    /// Station name; created on first reference.
    pub station: String,
    pub distance_from_prev_km: u32,
    pub departure: ClockTime,
}

/// A train to be inserted, with its stops in travel order.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTrain {
    pub name: String,
    pub stops: Vec<NewStop>,
}

impl NewTrain {
    pub fn new(name: impl Into<String>, stops: Vec<NewStop>) -> Self {
        Self {
            name: name.into(),
            stops,
        }
    }

    /// Check the train before anything is written.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.name.trim().is_empty() {
            return Err(StoreError::InvalidTrain("name must not be blank"));
        }
        let Some(first) = self.stops.first() else {
            return Err(StoreError::InvalidTrain("stops must not be empty"));
        };
        if first.distance_from_prev_km != 0 {
            return Err(StoreError::InvalidTrain(
                "first stop must have zero distance from previous",
            ));
        }
        let route_km: u64 = self
            .stops
            .iter()
            .map(|s| u64::from(s.distance_from_prev_km))
            .sum();
        if route_km > u64::from(MAX_ROUTE_DISTANCE_KM) {
            return Err(StoreError::InvalidTrain(
                "total distance must not exceed 1000000 km",
            ));
        }
        for stop in &self.stops {
            crate::domain::StationName::parse(&stop.station)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(station: &str, km: u32, time: &str) -> NewStop {
        NewStop {
            station: station.into(),
            distance_from_prev_km: km,
            departure: ClockTime::parse_hhmm(time).unwrap(),
        }
    }

    #[test]
    fn valid_train() {
        let train = NewTrain::new(
            "Train A",
            vec![stop("Chennai", 0, "09:00"), stop("Vellore", 170, "11:00")],
        );
        assert!(train.validate().is_ok());
    }

    #[test]
    fn rejects_blank_name() {
        let train = NewTrain::new("  ", vec![stop("Chennai", 0, "09:00")]);
        assert!(matches!(
            train.validate(),
            Err(StoreError::InvalidTrain("name must not be blank"))
        ));
    }

    #[test]
    fn rejects_no_stops() {
        let train = NewTrain::new("Empty", vec![]);
        assert!(matches!(
            train.validate(),
            Err(StoreError::InvalidTrain("stops must not be empty"))
        ));
    }

    #[test]
    fn rejects_distance_on_first_stop() {
        let train = NewTrain::new("Bad", vec![stop("Chennai", 5, "09:00")]);
        assert!(matches!(train.validate(), Err(StoreError::InvalidTrain(_))));
    }

    #[test]
    fn route_distance_is_capped() {
        let at_cap = NewTrain::new(
            "Long",
            vec![
                stop("A", 0, "09:00"),
                stop("B", MAX_ROUTE_DISTANCE_KM - 1, "10:00"),
                stop("C", 1, "11:00"),
            ],
        );
        assert!(at_cap.validate().is_ok());

        // Each stop fits in a u32 but the route does not fit under the cap
        let too_long = NewTrain::new(
            "Too long",
            vec![
                stop("A", 0, "09:00"),
                stop("B", 3_000_000_000, "10:00"),
                stop("C", 3_000_000_000, "11:00"),
            ],
        );
        assert!(matches!(
            too_long.validate(),
            Err(StoreError::InvalidTrain("total distance must not exceed 1000000 km"))
        ));
    }

    #[test]
    fn rejects_blank_station() {
        let train = NewTrain::new("Bad", vec![stop("Chennai", 0, "09:00"), stop(" ", 4, "10:00")]);
        assert!(matches!(
            train.validate(),
            Err(StoreError::InvalidStation(_))
        ));
    }
}
