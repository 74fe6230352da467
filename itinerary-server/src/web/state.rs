//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::SearchCache;
use crate::planner::SearchConfig;
use crate::store::Schedule;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Persistent schedule and its current snapshot
    pub schedule: Arc<Schedule>,

    /// Ranked results of recent searches
    pub cache: Arc<SearchCache>,

    /// Itinerary planner configuration
    pub config: Arc<SearchConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(schedule: Schedule, cache: SearchCache, config: SearchConfig) -> Self {
        Self {
            schedule: Arc::new(schedule),
            cache: Arc::new(cache),
            config: Arc::new(config),
        }
    }
}
