//! In-memory timetable.
//!
//! Holds every station, train and stop, indexed for the queries the
//! planner makes. Per-train cumulative distances make distance aggregation
//! a subtraction rather than a scan.

use std::collections::{BTreeMap, HashMap};

use crate::domain::{
    LegCandidate, Station, StationId, StationName, Stop, StopIndex, Train, TrainId,
};

use super::{MAX_ROUTE_DISTANCE_KM, NewTrain, ScheduleStore, StoreError};

/// A train together with its ordered stops.
#[derive(Debug, Clone)]
struct Route {
    train: Train,
    /// Stops sorted by index; `stops[i].index == i`.
    stops: Vec<Stop>,
    /// `cumulative_km[i]` is the distance from the first stop to stop `i`,
    /// never above [`MAX_ROUTE_DISTANCE_KM`].
    cumulative_km: Vec<u32>,
}

impl Route {
    fn distance_between(&self, from: StopIndex, to: StopIndex) -> u32 {
        if from >= to || self.stops.is_empty() {
            return 0;
        }
        let last = self.stops.len() - 1;
        let from = from.as_usize().min(last);
        let to = to.as_usize().min(last);
        self.cumulative_km[to] - self.cumulative_km[from]
    }
}

/// An immutable-once-built view of the whole schedule.
///
/// Built either from the database ([`super::SqliteStore::load_timetable`]) or
/// directly with [`Timetable::add_train`].
#[derive(Debug, Clone, Default)]
pub struct Timetable {
    stations: BTreeMap<StationId, Station>,
    by_name: HashMap<StationName, StationId>,
    routes: BTreeMap<TrainId, Route>,
    /// Every (train, stop index) visiting a station, sorted.
    visits: HashMap<StationId, Vec<(TrainId, StopIndex)>>,
}

impl Timetable {
    /// Create an empty timetable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stations, including those without stops.
    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// Number of trains.
    pub fn train_count(&self) -> usize {
        self.routes.len()
    }

    /// Add a station record.
    pub fn insert_station(&mut self, station: Station) {
        self.by_name.insert(station.name.clone(), station.id);
        self.stations.insert(station.id, station);
    }

    /// Add a train record and its stops.
    ///
    /// Stops may arrive in any order but must cover indices `0..n` exactly
    /// once and refer to known stations.
    pub fn insert_train(&mut self, train: Train, mut stops: Vec<Stop>) -> Result<(), StoreError> {
        stops.sort_by_key(|s| s.index);

        for (position, stop) in stops.iter().enumerate() {
            if stop.train_id != train.id {
                return Err(StoreError::CorruptStops {
                    train: train.id,
                    message: format!("stop belongs to train {}", stop.train_id),
                });
            }
            if stop.index.as_usize() != position {
                return Err(StoreError::CorruptStops {
                    train: train.id,
                    message: format!("expected stop index {position}, found {}", stop.index.0),
                });
            }
            if !self.stations.contains_key(&stop.station_id) {
                return Err(StoreError::UnknownStation(stop.station_id));
            }
        }

        let mut cumulative_km = Vec::with_capacity(stops.len());
        let mut running = 0u32;
        for (position, stop) in stops.iter().enumerate() {
            // The first stop has no predecessor
            if position > 0 {
                running = running
                    .checked_add(stop.distance_from_prev_km)
                    .filter(|km| *km <= MAX_ROUTE_DISTANCE_KM)
                    .ok_or_else(|| StoreError::CorruptStops {
                        train: train.id,
                        message: format!("route longer than {MAX_ROUTE_DISTANCE_KM} km"),
                    })?;
            }
            cumulative_km.push(running);
        }

        for stop in &stops {
            let visits = self.visits.entry(stop.station_id).or_default();
            visits.push((train.id, stop.index));
            visits.sort_unstable();
        }

        self.routes.insert(
            train.id,
            Route {
                train,
                stops,
                cumulative_km,
            },
        );
        Ok(())
    }

    /// Get or create a station by name, assigning the next free id.
    pub fn add_station(&mut self, name: &str) -> Result<Station, StoreError> {
        let name = StationName::parse(name)?;
        if let Some(id) = self.by_name.get(&name) {
            return Ok(self.stations[id].clone());
        }
        let id = StationId(self.stations.keys().next_back().map_or(1, |id| id.0 + 1));
        let station = Station::new(id, name);
        self.insert_station(station.clone());
        Ok(station)
    }

    /// Add a train from travel-ordered stops, creating stations on first
    /// reference and assigning the next free train id.
    pub fn add_train(&mut self, new: &NewTrain) -> Result<TrainId, StoreError> {
        new.validate()?;

        let id = TrainId(self.routes.keys().next_back().map_or(1, |id| id.0 + 1));
        let mut stops = Vec::with_capacity(new.stops.len());
        for (position, stop) in new.stops.iter().enumerate() {
            let station = self.add_station(&stop.station)?;
            stops.push(Stop {
                train_id: id,
                station_id: station.id,
                index: StopIndex(position as u32),
                distance_from_prev_km: stop.distance_from_prev_km,
                departure: stop.departure,
            });
        }

        self.insert_train(Train::new(id, new.name.trim()), stops)?;
        Ok(id)
    }
}

impl ScheduleStore for Timetable {
    fn resolve_station(&self, reference: &str) -> Option<Station> {
        if let Ok(name) = StationName::parse(reference)
            && let Some(id) = self.by_name.get(&name)
        {
            return self.stations.get(id).cloned();
        }

        let id = reference.trim().parse::<i64>().ok()?;
        self.stations.get(&StationId(id)).cloned()
    }

    fn stations_with_stops(&self) -> Vec<Station> {
        self.stations
            .values()
            .filter(|s| self.visits.get(&s.id).is_some_and(|v| !v.is_empty()))
            .cloned()
            .collect()
    }

    fn leg_candidates(&self, from: StationId, to: StationId) -> Vec<LegCandidate> {
        let Some(boardings) = self.visits.get(&from) else {
            return Vec::new();
        };

        let mut candidates = Vec::new();
        for &(train_id, board_idx) in boardings {
            let Some(route) = self.routes.get(&train_id) else {
                continue;
            };
            let board = &route.stops[board_idx.as_usize()];

            for alight in &route.stops[board_idx.as_usize() + 1..] {
                if alight.station_id != to {
                    continue;
                }
                candidates.push(LegCandidate {
                    train_id,
                    train_name: route.train.name.clone(),
                    depart: board.departure,
                    arrive: alight.departure,
                    from_index: board.index,
                    to_index: alight.index,
                });
            }
        }

        candidates
    }

    fn sum_distance(&self, train: TrainId, from: StopIndex, to: StopIndex) -> u32 {
        self.routes
            .get(&train)
            .map_or(0, |route| route.distance_between(from, to))
    }

    fn trains_serving(&self, a: StationId, b: StationId) -> Vec<Train> {
        let (Some(at_a), Some(at_b)) = (self.visits.get(&a), self.visits.get(&b)) else {
            return Vec::new();
        };

        let mut trains: Vec<TrainId> = at_a
            .iter()
            .map(|(train, _)| *train)
            .filter(|train| at_b.iter().any(|(other, _)| other == train))
            .collect();
        trains.dedup();

        trains
            .into_iter()
            .filter_map(|id| self.routes.get(&id).map(|r| r.train.clone()))
            .collect()
    }
}
