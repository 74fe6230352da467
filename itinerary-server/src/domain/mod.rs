//! Domain types for the itinerary search server.
//!
//! This module contains the core domain model types that represent
//! validated timetable data and search answers. Types enforce their
//! invariants at construction time, so code that receives them can trust
//! their validity.

mod error;
mod fare;
mod itinerary;
mod leg;
mod station;
mod time;
mod train;

pub use error::DomainError;
pub use fare::{DEFAULT_PRICE_PER_KM, Fare, Tariff};
pub use itinerary::{AVAILABLE_NOTE, Itinerary, ItineraryKind, connects};
pub use leg::{Leg, LegCandidate, LegTimes};
pub use station::{InvalidStationName, Station, StationId, StationName};
pub use time::{ClockTime, MINUTES_PER_DAY, TimeError};
pub use train::{Stop, StopIndex, Train, TrainId};
