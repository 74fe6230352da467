//! Train leg type.
//!
//! A `Leg` is the traversal of one train between two of its stops, with
//! distance and fare already resolved.

use super::{ClockTime, Fare, Station, StopIndex, Tariff, TrainId};

/// A forward-ordered pair of stops on one train, as reported by the store.
///
/// `from_index < to_index` always holds. Times are the departure times
/// recorded at each stop; the one at `to_index` doubles as the arrival time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegCandidate {
    pub train_id: TrainId,
    pub train_name: String,
    pub depart: ClockTime,
    pub arrive: ClockTime,
    pub from_index: StopIndex,
    pub to_index: StopIndex,
}

/// Scheduled times of a leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegTimes {
    pub depart: ClockTime,
    pub arrive: ClockTime,
}

/// A leg of an itinerary (one train).
///
/// Legs built from store candidates always carry times. Placeholder legs,
/// used when a train is known to serve both stations but no forward
/// sequence was found, carry no times and zero distance.
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    train_id: TrainId,
    train_name: String,
    from: Station,
    to: Station,
    times: Option<LegTimes>,
    distance_km: u32,
    price: Fare,
}

impl Leg {
    /// Build a scheduled leg from a store candidate and its aggregated distance.
    ///
    /// # Examples
    ///
    /// ```
    /// use itinerary_server::domain::{
    ///     ClockTime, Leg, LegCandidate, Station, StationId, StationName, StopIndex, Tariff,
    ///     TrainId,
    /// };
    ///
    /// let candidate = LegCandidate {
    ///     train_id: TrainId(1),
    ///     train_name: "Train A".into(),
    ///     depart: ClockTime::parse_hhmm("09:00").unwrap(),
    ///     arrive: ClockTime::parse_hhmm("15:30").unwrap(),
    ///     from_index: StopIndex(0),
    ///     to_index: StopIndex(2),
    /// };
    /// let chennai = Station::new(StationId(1), StationName::parse("Chennai").unwrap());
    /// let bangalore = Station::new(StationId(3), StationName::parse("Bangalore").unwrap());
    ///
    /// let leg = Leg::scheduled(&candidate, chennai, bangalore, 370, &Tariff::default());
    /// assert_eq!(leg.duration_min(), 390);
    /// assert_eq!(leg.price().to_string(), "462.50");
    /// ```
    pub fn scheduled(
        candidate: &LegCandidate,
        from: Station,
        to: Station,
        distance_km: u32,
        tariff: &Tariff,
    ) -> Self {
        Self {
            train_id: candidate.train_id,
            train_name: candidate.train_name.clone(),
            from,
            to,
            times: Some(LegTimes {
                depart: candidate.depart,
                arrive: candidate.arrive,
            }),
            distance_km,
            price: tariff.fare_for(distance_km),
        }
    }

    /// Build a placeholder leg with no schedule, distance or price.
    pub fn placeholder(
        train_id: TrainId,
        train_name: impl Into<String>,
        from: Station,
        to: Station,
    ) -> Self {
        Self {
            train_id,
            train_name: train_name.into(),
            from,
            to,
            times: None,
            distance_km: 0,
            price: Fare::ZERO,
        }
    }

    pub fn train_id(&self) -> TrainId {
        self.train_id
    }

    pub fn train_name(&self) -> &str {
        &self.train_name
    }

    pub fn origin(&self) -> &Station {
        &self.from
    }

    pub fn destination(&self) -> &Station {
        &self.to
    }

    /// Scheduled times, or `None` for a placeholder leg.
    pub fn times(&self) -> Option<LegTimes> {
        self.times
    }

    pub fn depart_time(&self) -> Option<ClockTime> {
        self.times.map(|t| t.depart)
    }

    pub fn arrive_time(&self) -> Option<ClockTime> {
        self.times.map(|t| t.arrive)
    }

    pub fn distance_km(&self) -> u32 {
        self.distance_km
    }

    pub fn price(&self) -> Fare {
        self.price
    }

    /// Travel time in minutes, wrapping at midnight. Zero for placeholders.
    pub fn duration_min(&self) -> u16 {
        self.times
            .map(|t| t.depart.minutes_until(t.arrive))
            .unwrap_or(0)
    }

    /// Whether this leg has a resolved schedule.
    pub fn is_scheduled(&self) -> bool {
        self.times.is_some()
    }
}
