//! Same-train itineraries.

use crate::domain::{Itinerary, Leg, Station, Tariff};
use crate::store::ScheduleStore;

use super::distance::leg_distance;

/// All scheduled legs from `from` to `to` on a single train.
///
/// One leg per forward-ordered pair of stops, so a train that calls at
/// either station more than once yields several legs. Legs come out in
/// train id order, then boarding index, then alighting index.
pub fn find_legs<S: ScheduleStore + ?Sized>(
    store: &S,
    from: &Station,
    to: &Station,
    tariff: &Tariff,
) -> Vec<Leg> {
    store
        .leg_candidates(from.id, to.id)
        .iter()
        .map(|candidate| {
            let distance = leg_distance(store, candidate);
            Leg::scheduled(candidate, from.clone(), to.clone(), distance, tariff)
        })
        .collect()
}

/// Direct itineraries from `from` to `to`, one per leg.
pub fn find_direct<S: ScheduleStore + ?Sized>(
    store: &S,
    from: &Station,
    to: &Station,
    tariff: &Tariff,
) -> Vec<Itinerary> {
    find_legs(store, from, to, tariff)
        .into_iter()
        .map(Itinerary::direct)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClockTime, ItineraryKind};
    use crate::store::{NewStop, NewTrain, Timetable};

    fn train(tt: &mut Timetable, name: &str, stops: &[(&str, u32, &str)]) {
        let stops = stops
            .iter()
            .map(|(station, km, time)| NewStop {
                station: (*station).into(),
                distance_from_prev_km: *km,
                departure: ClockTime::parse_hhmm(time).unwrap(),
            })
            .collect();
        tt.add_train(&NewTrain::new(name, stops)).unwrap();
    }

    fn station(tt: &Timetable, name: &str) -> Station {
        tt.resolve_station(name).unwrap()
    }

    #[test]
    fn direct_leg_totals() {
        let mut tt = Timetable::new();
        train(
            &mut tt,
            "Train A",
            &[
                ("Chennai", 0, "09:00"),
                ("Vellore", 170, "11:00"),
                ("Bangalore", 200, "15:30"),
            ],
        );

        let found = find_direct(
            &tt,
            &station(&tt, "Chennai"),
            &station(&tt, "Bangalore"),
            &Tariff::default(),
        );

        assert_eq!(found.len(), 1);
        let itinerary = &found[0];
        assert_eq!(itinerary.kind(), &ItineraryKind::Direct);
        assert_eq!(itinerary.total_distance_km(), 370);
        assert_eq!(itinerary.total_price().to_string(), "462.50");
        assert_eq!(itinerary.total_duration_min(), 390);

        let leg = &itinerary.legs()[0];
        assert_eq!(leg.train_name(), "Train A");
        assert_eq!(leg.origin().name.as_str(), "Chennai");
        assert_eq!(leg.destination().name.as_str(), "Bangalore");
    }

    #[test]
    fn wrong_direction_finds_nothing() {
        let mut tt = Timetable::new();
        train(&mut tt, "T", &[("A", 0, "09:00"), ("B", 10, "10:00")]);

        let found = find_direct(&tt, &station(&tt, "B"), &station(&tt, "A"), &Tariff::default());
        assert!(found.is_empty());
    }

    #[test]
    fn overnight_leg_wraps_duration() {
        let mut tt = Timetable::new();
        train(&mut tt, "Night", &[("A", 0, "22:00"), ("B", 300, "04:00")]);

        let found = find_direct(&tt, &station(&tt, "A"), &station(&tt, "B"), &Tariff::default());
        assert_eq!(found[0].total_duration_min(), 360);
    }

    #[test]
    fn loop_route_yields_each_pair() {
        let mut tt = Timetable::new();
        train(
            &mut tt,
            "Loop",
            &[
                ("A", 0, "08:00"),
                ("B", 10, "08:30"),
                ("A", 10, "09:00"),
                ("B", 10, "09:30"),
            ],
        );

        let found = find_direct(&tt, &station(&tt, "A"), &station(&tt, "B"), &Tariff::default());
        let distances: Vec<u32> = found.iter().map(|i| i.total_distance_km()).collect();
        assert_eq!(distances, vec![10, 30, 10]);
    }
}
