//! Persistent schedule with a published in-memory snapshot.

use std::sync::{Arc, Mutex, RwLock};

use tracing::info;

use crate::domain::{Station, TrainId};

use super::{NewTrain, SqliteStore, StoreError, Timetable};

/// The live schedule.
///
/// Searches take a [`Timetable`] snapshot and never see a write half-way
/// through. Writers serialize on the database, then publish a freshly
/// loaded snapshot before releasing it.
pub struct Schedule {
    db: Mutex<SqliteStore>,
    snapshot: RwLock<Arc<Timetable>>,
}

impl Schedule {
    /// Wrap a store, loading the initial snapshot.
    pub fn new(db: SqliteStore) -> Result<Self, StoreError> {
        let timetable = db.load_timetable()?;
        info!(
            stations = timetable.station_count(),
            trains = timetable.train_count(),
            "Schedule loaded"
        );
        Ok(Self {
            db: Mutex::new(db),
            snapshot: RwLock::new(Arc::new(timetable)),
        })
    }

    /// The current timetable.
    pub fn snapshot(&self) -> Result<Arc<Timetable>, StoreError> {
        let guard = self.snapshot.read().map_err(|_| StoreError::Poisoned)?;
        Ok(Arc::clone(&guard))
    }

    /// Get or create a station by name.
    pub fn add_station(&self, name: &str) -> Result<Station, StoreError> {
        let db = self.db.lock().map_err(|_| StoreError::Poisoned)?;
        let station = db.get_or_create_station(name)?;
        self.publish(&db)?;
        Ok(station)
    }

    /// Insert a train with its stops.
    pub fn add_train(&self, train: &NewTrain) -> Result<TrainId, StoreError> {
        let mut db = self.db.lock().map_err(|_| StoreError::Poisoned)?;
        let id = db.insert_train(train)?;
        self.publish(&db)?;
        info!(train_id = %id, name = %train.name, "Train added");
        Ok(id)
    }

    fn publish(&self, db: &SqliteStore) -> Result<(), StoreError> {
        let timetable = Arc::new(db.load_timetable()?);
        let mut guard = self.snapshot.write().map_err(|_| StoreError::Poisoned)?;
        *guard = timetable;
        Ok(())
    }
}
