//! SQLite persistence for the schedule.

use std::collections::BTreeMap;
use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};
use tracing::{debug, info};

use crate::domain::{
    ClockTime, Station, StationId, StationName, Stop, StopIndex, Train, TrainId,
};

use super::{NewTrain, StoreError, Timetable};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS stations (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS trains (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS train_stops (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  train_id INTEGER NOT NULL,
  station_id INTEGER NOT NULL,
  stop_index INTEGER NOT NULL,
  distance_from_prev_km INTEGER NOT NULL,
  departure_time TEXT NOT NULL,
  FOREIGN KEY (train_id) REFERENCES trains(id) ON DELETE CASCADE,
  FOREIGN KEY (station_id) REFERENCES stations(id) ON DELETE CASCADE
);
CREATE INDEX IF NOT EXISTS idx_train_stops_train ON train_stops(train_id, stop_index);
CREATE INDEX IF NOT EXISTS idx_train_stops_station ON train_stops(station_id);
";

/// SQLite-backed schedule storage.
///
/// Owns the connection. All writes go through here; reads for searching go
/// through a [`Timetable`] loaded from it.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) a database file and ensure the schema exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        let mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        debug!(path = %path.display(), journal_mode = %mode, "Opened schedule database");
        Self::init(conn)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Get or create a station by (trimmed) name.
    pub fn get_or_create_station(&self, name: &str) -> Result<Station, StoreError> {
        get_or_create_station(&self.conn, &StationName::parse(name)?)
    }

    /// Insert a train and its stops in one transaction.
    ///
    /// Stop indices follow the order of `train.stops`. Stations are created
    /// by name on first reference.
    pub fn insert_train(&mut self, train: &NewTrain) -> Result<TrainId, StoreError> {
        train.validate()?;

        let tx = self.conn.transaction()?;
        tx.execute("INSERT INTO trains(name) VALUES (?1)", params![train.name.trim()])?;
        let train_id = tx.last_insert_rowid();

        {
            let mut insert_stop = tx.prepare(
                "INSERT INTO train_stops(train_id, station_id, stop_index, distance_from_prev_km, departure_time)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for (position, stop) in train.stops.iter().enumerate() {
                let station = get_or_create_station(&tx, &StationName::parse(&stop.station)?)?;
                insert_stop.execute(params![
                    train_id,
                    station.id.0,
                    position as i64,
                    i64::from(stop.distance_from_prev_km),
                    stop.departure.to_string(),
                ])?;
            }
        }

        tx.commit()?;
        debug!(train_id, name = %train.name, stops = train.stops.len(), "Inserted train");
        Ok(TrainId(train_id))
    }

    /// Delete every station, train and stop.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.conn
            .execute_batch("DELETE FROM train_stops; DELETE FROM trains; DELETE FROM stations;")?;
        info!("Schedule database cleared");
        Ok(())
    }

    /// Read the whole schedule into memory.
    pub fn load_timetable(&self) -> Result<Timetable, StoreError> {
        let mut timetable = Timetable::new();

        let mut stmt = self.conn.prepare("SELECT id, name FROM stations ORDER BY id")?;
        let rows = stmt.query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))?;
        for row in rows {
            let (id, name) = row?;
            timetable.insert_station(Station::new(StationId(id), StationName::parse(&name)?));
        }

        let mut trains: BTreeMap<i64, (Train, Vec<Stop>)> = BTreeMap::new();
        let mut stmt = self.conn.prepare("SELECT id, name FROM trains ORDER BY id")?;
        let rows = stmt.query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))?;
        for row in rows {
            let (id, name) = row?;
            trains.insert(id, (Train::new(TrainId(id), name), Vec::new()));
        }

        let mut stmt = self.conn.prepare(
            "SELECT train_id, station_id, stop_index, distance_from_prev_km, departure_time
             FROM train_stops ORDER BY train_id, stop_index",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, i64>(3)?,
                row.get::<_, String>(4)?,
            ))
        })?;
        for row in rows {
            let (train_id, station_id, index, distance, time) = row?;
            let train = TrainId(train_id);
            let corrupt = |message: String| StoreError::CorruptStops { train, message };

            let stop = Stop {
                train_id: train,
                station_id: StationId(station_id),
                index: StopIndex(
                    u32::try_from(index).map_err(|_| corrupt(format!("bad stop index {index}")))?,
                ),
                distance_from_prev_km: u32::try_from(distance)
                    .map_err(|_| corrupt(format!("bad distance {distance}")))?,
                departure: ClockTime::parse_hhmm(&time)
                    .map_err(|e| corrupt(format!("bad departure time {time:?}: {e}")))?,
            };

            trains
                .get_mut(&train_id)
                .ok_or_else(|| corrupt("stop for missing train".to_string()))?
                .1
                .push(stop);
        }

        for (train, stops) in trains.into_values() {
            timetable.insert_train(train, stops)?;
        }

        debug!(
            stations = timetable.station_count(),
            trains = timetable.train_count(),
            "Loaded timetable"
        );
        Ok(timetable)
    }
}

fn get_or_create_station(conn: &Connection, name: &StationName) -> Result<Station, StoreError> {
    let existing: Option<i64> = conn
        .query_row(
            "SELECT id FROM stations WHERE name = ?1",
            params![name.as_str()],
            |row| row.get(0),
        )
        .optional()?;

    let id = match existing {
        Some(id) => id,
        None => {
            conn.execute("INSERT INTO stations(name) VALUES (?1)", params![name.as_str()])?;
            conn.last_insert_rowid()
        }
    };

    Ok(Station::new(StationId(id), name.clone()))
}
