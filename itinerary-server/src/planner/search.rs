//! Itinerary search.
//!
//! A search resolves both endpoints, collects direct and one-change
//! itineraries, falls back to placeholder itineraries when neither exists,
//! and ranks whatever it found.

use tracing::debug;

use crate::domain::{Itinerary, Station};
use crate::store::ScheduleStore;

use super::config::SearchConfig;
use super::direct::find_direct;
use super::fallback::find_available;
use super::rank::{SortBy, rank_itineraries};
use super::transfer::find_transfers;

/// Error from itinerary search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// A required argument is missing or malformed
    #[error("{0}")]
    InvalidArgument(String),

    /// A station reference matched nothing
    #[error("{0}")]
    NotFound(String),
}

/// Request for itinerary search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Origin station name or numeric id.
    pub from: String,

    /// Destination station name or numeric id.
    pub to: String,

    pub sort_by: SortBy,
}

impl SearchRequest {
    /// Create a new search request.
    pub fn new(from: impl Into<String>, to: impl Into<String>, sort_by: SortBy) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            sort_by,
        }
    }

    /// Build a request from optional query parameters.
    ///
    /// Both endpoints are required and must not be blank. A missing sort key
    /// or an unrecognised one means [`SortBy::Price`].
    pub fn from_params(
        from: Option<&str>,
        to: Option<&str>,
        sort_by: Option<&str>,
    ) -> Result<Self, SearchError> {
        let (Some(from), Some(to)) = (
            from.filter(|s| !s.trim().is_empty()),
            to.filter(|s| !s.trim().is_empty()),
        ) else {
            return Err(SearchError::InvalidArgument(
                "from and to are required".to_string(),
            ));
        };

        let sort_by = match sort_by.map(str::parse::<SortBy>) {
            None => SortBy::default(),
            Some(Ok(sort_by)) => sort_by,
            Some(Err(e)) => {
                debug!(error = %e, "Falling back to price ordering");
                SortBy::default()
            }
        };

        Ok(Self::new(from, to, sort_by))
    }
}

/// A request whose endpoints have been resolved to stations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSearch {
    pub from: Station,
    pub to: Station,
    pub sort_by: SortBy,
}

/// Result of itinerary search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Found itineraries, ranked best-first.
    pub itineraries: Vec<Itinerary>,

    /// Number of interchange stations examined.
    pub transfer_stations_scanned: usize,
}

/// Itinerary planner over a read-only schedule.
pub struct Planner<'a, S: ScheduleStore> {
    store: &'a S,
    config: &'a SearchConfig,
}

impl<'a, S: ScheduleStore + Sync> Planner<'a, S> {
    /// Create a new planner.
    pub fn new(store: &'a S, config: &'a SearchConfig) -> Self {
        Self { store, config }
    }

    /// Resolve both endpoints of a request.
    pub fn resolve(&self, request: &SearchRequest) -> Result<ResolvedSearch, SearchError> {
        let from = self.resolve_station(&request.from)?;
        let to = self.resolve_station(&request.to)?;
        Ok(ResolvedSearch {
            from,
            to,
            sort_by: request.sort_by,
        })
    }

    /// Search for itineraries.
    pub fn search(&self, request: &SearchRequest) -> Result<SearchResult, SearchError> {
        let resolved = self.resolve(request)?;
        Ok(self.search_resolved(&resolved))
    }

    /// Search between already resolved stations.
    ///
    /// Placeholder itineraries appear only when there is neither a direct
    /// nor a one-change itinerary.
    pub fn search_resolved(&self, search: &ResolvedSearch) -> SearchResult {
        let ResolvedSearch { from, to, sort_by } = search;
        let tariff = self.config.tariff();

        let mut itineraries = find_direct(self.store, from, to, &tariff);
        let direct_count = itineraries.len();

        let transfers = find_transfers(self.store, from, to, self.config);
        itineraries.extend(transfers.itineraries);

        let fallback = itineraries.is_empty();
        if fallback {
            itineraries = find_available(self.store, from, to);
        }

        debug!(
            from = %from.name,
            to = %to.name,
            sort_by = %sort_by,
            direct = direct_count,
            total = itineraries.len(),
            fallback,
            "Search complete"
        );

        SearchResult {
            itineraries: rank_itineraries(itineraries, *sort_by),
            transfer_stations_scanned: transfers.stations_scanned,
        }
    }

    fn resolve_station(&self, reference: &str) -> Result<Station, SearchError> {
        self.store
            .resolve_station(reference)
            .ok_or_else(|| SearchError::NotFound("Station not found".to_string()))
    }
}
