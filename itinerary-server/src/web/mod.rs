//! Web layer for the itinerary planner.
//!
//! Provides HTTP endpoints for listing stations, searching itineraries and
//! adding stations and trains.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
