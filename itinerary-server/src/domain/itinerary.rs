//! Itinerary types.
//!
//! An `Itinerary` is a complete origin-to-destination answer: one leg for a
//! same-train journey, two for a single change, or a single placeholder leg
//! when a train is known to serve both stations but no schedule resolved.

use super::{ClockTime, DomainError, Fare, Leg, Tariff};

/// Note attached to placeholder itineraries.
pub const AVAILABLE_NOTE: &str = "Trains available on this route - check detailed schedule";

/// What kind of answer an itinerary is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItineraryKind {
    /// One train from origin to destination
    Direct,
    /// Two trains with one change
    Transfer,
    /// A train serves both stations, but not in a resolvable order
    Available { note: String },
}

impl ItineraryKind {
    /// Short lowercase label, as used on the wire.
    pub fn label(&self) -> &'static str {
        match self {
            ItineraryKind::Direct => "direct",
            ItineraryKind::Transfer => "transfer",
            ItineraryKind::Available { .. } => "available",
        }
    }
}

/// A ranked search answer.
///
/// # Invariants
///
/// - `Direct` and `Available` itineraries have exactly one leg
/// - `Transfer` itineraries have two legs meeting at the same station, and
///   the second departs strictly later (same-day) than the first arrives
/// - Totals are fixed at construction; the total price is the tariff applied
///   once to the total distance
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    kind: ItineraryKind,
    legs: Vec<Leg>,
    total_distance_km: u32,
    total_price: Fare,
    total_duration_min: u16,
}

impl Itinerary {
    /// A same-train itinerary. Totals are those of the leg.
    pub fn direct(leg: Leg) -> Self {
        Self {
            kind: ItineraryKind::Direct,
            total_distance_km: leg.distance_km(),
            total_price: leg.price(),
            total_duration_min: leg.duration_min(),
            legs: vec![leg],
        }
    }

    /// A one-change itinerary.
    ///
    /// The connection rule compares times of day only: a second train that
    /// leaves at 09:00 never connects with a first that arrives at 15:30,
    /// even though the next morning's departure would in reality.
    ///
    /// # Errors
    ///
    /// Returns `Err` if either leg is a placeholder, if the legs do not
    /// meet at the same station, or if the second leg does not depart
    /// strictly after the first arrives, or if the summed distance does not
    /// fit in a `u32`.
    pub fn transfer(first: Leg, second: Leg, tariff: &Tariff) -> Result<Self, DomainError> {
        let first_times = first
            .times()
            .ok_or_else(|| DomainError::UnscheduledLeg(first.train_name().to_string()))?;
        let second_times = second
            .times()
            .ok_or_else(|| DomainError::UnscheduledLeg(second.train_name().to_string()))?;

        if first.destination().id != second.origin().id {
            return Err(DomainError::LegsNotConnected(
                first.destination().name.clone(),
                second.origin().name.clone(),
            ));
        }

        if !connects(first_times.arrive, second_times.depart) {
            return Err(DomainError::MissedConnection {
                arrive: first_times.arrive,
                depart: second_times.depart,
            });
        }

        let total_distance_km = first
            .distance_km()
            .checked_add(second.distance_km())
            .ok_or(DomainError::DistanceOverflow(
                first.distance_km(),
                second.distance_km(),
            ))?;
        Ok(Self {
            kind: ItineraryKind::Transfer,
            total_distance_km,
            total_price: tariff.fare_for(total_distance_km),
            total_duration_min: first_times.depart.minutes_until(second_times.arrive),
            legs: vec![first, second],
        })
    }

    /// A placeholder itinerary for a train that serves both stations.
    pub fn available(leg: Leg) -> Self {
        Self {
            kind: ItineraryKind::Available {
                note: AVAILABLE_NOTE.to_string(),
            },
            legs: vec![leg],
            total_distance_km: 0,
            total_price: Fare::ZERO,
            total_duration_min: 0,
        }
    }

    pub fn kind(&self) -> &ItineraryKind {
        &self.kind
    }

    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    pub fn total_distance_km(&self) -> u32 {
        self.total_distance_km
    }

    pub fn total_price(&self) -> Fare {
        self.total_price
    }

    pub fn total_duration_min(&self) -> u16 {
        self.total_duration_min
    }

    /// The note carried by placeholder itineraries.
    pub fn note(&self) -> Option<&str> {
        match &self.kind {
            ItineraryKind::Available { note } => Some(note),
            _ => None,
        }
    }

    /// Number of train changes.
    pub fn change_count(&self) -> usize {
        self.legs.len().saturating_sub(1)
    }
}

/// Whether an onward departure connects with an arrival on the same day.
pub fn connects(arrive: ClockTime, depart: ClockTime) -> bool {
    depart > arrive
}
