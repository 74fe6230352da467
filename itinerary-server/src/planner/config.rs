//! Search configuration for the itinerary planner.

use crate::domain::{DEFAULT_PRICE_PER_KM, Tariff};

/// Default cap on intermediate stations examined for one-change itineraries.
pub const DEFAULT_MAX_TRANSFER_STATIONS: usize = 10_000;

/// Configuration parameters for itinerary search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Price per kilometre, in currency units.
    pub price_per_km: f64,

    /// Maximum number of intermediate stations to examine per search.
    /// Networks with more candidate stations are truncated (in id order).
    pub max_transfer_stations: usize,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(price_per_km: f64, max_transfer_stations: usize) -> Self {
        Self {
            price_per_km,
            max_transfer_stations,
        }
    }

    /// Returns the pricing rule.
    pub fn tariff(&self) -> Tariff {
        Tariff::new(self.price_per_km)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            price_per_km: DEFAULT_PRICE_PER_KM,
            max_transfer_stations: DEFAULT_MAX_TRANSFER_STATIONS,
        }
    }
}
