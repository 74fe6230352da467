//! Domain error types.
//!
//! These errors represent invalid itinerary construction in the domain
//! layer. They are distinct from store and request errors.

use super::{ClockTime, StationName};

/// Domain-level errors for itinerary construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A leg without a resolved schedule was used where times are needed
    #[error("leg on {0} has no schedule")]
    UnscheduledLeg(String),

    /// Consecutive legs don't meet at the same station
    #[error("legs do not connect: first ends at {0}, second starts at {1}")]
    LegsNotConnected(StationName, StationName),

    /// The onward train leaves before (or as) the first one arrives
    #[error("connection too tight: arrive {arrive}, depart {depart}")]
    MissedConnection { arrive: ClockTime, depart: ClockTime },

    /// Leg distances sum past what an itinerary can carry
    #[error("total distance of {0} km and {1} km is out of range")]
    DistanceOverflow(u32, u32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DomainError::UnscheduledLeg("Train B".into());
        assert_eq!(err.to_string(), "leg on Train B has no schedule");

        let err = DomainError::LegsNotConnected(
            StationName::parse("Bangalore").unwrap(),
            StationName::parse("Mysuru").unwrap(),
        );
        assert_eq!(
            err.to_string(),
            "legs do not connect: first ends at Bangalore, second starts at Mysuru"
        );

        let err = DomainError::MissedConnection {
            arrive: ClockTime::parse_hhmm("15:30").unwrap(),
            depart: ClockTime::parse_hhmm("09:00").unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "connection too tight: arrive 15:30, depart 09:00"
        );

        let err = DomainError::DistanceOverflow(u32::MAX, 1);
        assert_eq!(
            err.to_string(),
            "total distance of 4294967295 km and 1 km is out of range"
        );
    }
}
