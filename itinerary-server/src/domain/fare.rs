//! Distance-based fares.

use std::fmt;

/// Default price per kilometre, in currency units.
pub const DEFAULT_PRICE_PER_KM: f64 = 1.25;

/// A monetary amount rounded to whole cents.
///
/// Fares are always derived from a distance by a [`Tariff`]; keeping them as
/// integer cents makes comparisons exact when ranking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fare {
    cents: i64,
}

impl Fare {
    pub const ZERO: Fare = Fare { cents: 0 };

    pub fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    pub fn cents(&self) -> i64 {
        self.cents
    }

    /// The amount in currency units, e.g. `462.5`.
    pub fn as_f64(&self) -> f64 {
        self.cents as f64 / 100.0
    }
}

impl fmt::Display for Fare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

/// Linear distance pricing.
///
/// # Examples
///
/// ```
/// use itinerary_server::domain::Tariff;
///
/// let tariff = Tariff::default();
/// assert_eq!(tariff.fare_for(370).to_string(), "462.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tariff {
    price_per_km: f64,
}

impl Tariff {
    pub fn new(price_per_km: f64) -> Self {
        Self { price_per_km }
    }

    /// Price a distance, rounding once to two decimal places.
    ///
    /// Totals must be priced from the summed distance rather than by adding
    /// rounded leg fares; the two disagree whenever rounding kicks in.
    pub fn fare_for(&self, distance_km: u32) -> Fare {
        let cents = (f64::from(distance_km) * self.price_per_km * 100.0).round();
        Fare::from_cents(cents as i64)
    }
}

impl Default for Tariff {
    fn default() -> Self {
        Self::new(DEFAULT_PRICE_PER_KM)
    }
}
