//! One-change itineraries.
//!
//! Every station with at least one stop, other than the endpoints, is a
//! candidate interchange. Interchanges are independent of each other, so
//! they are examined in parallel and the per-station results concatenated
//! in station id order.

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::domain::{Itinerary, Station, Tariff, connects};
use crate::store::ScheduleStore;

use super::config::SearchConfig;
use super::direct::find_legs;

/// Outcome of a transfer scan.
#[derive(Debug, Clone, Default)]
pub struct TransferScan {
    /// Valid one-change itineraries.
    pub itineraries: Vec<Itinerary>,

    /// Number of interchange stations examined.
    pub stations_scanned: usize,

    /// Whether candidates were dropped because of the configured cap.
    pub truncated: bool,
}

/// Find one-change itineraries from `from` to `to`.
pub fn find_transfers<S: ScheduleStore + Sync + ?Sized>(
    store: &S,
    from: &Station,
    to: &Station,
    config: &SearchConfig,
) -> TransferScan {
    let mut interchanges: Vec<Station> = store
        .stations_with_stops()
        .into_iter()
        .filter(|s| s.id != from.id && s.id != to.id)
        .collect();

    let truncated = interchanges.len() > config.max_transfer_stations;
    if truncated {
        warn!(
            candidates = interchanges.len(),
            cap = config.max_transfer_stations,
            "Too many interchange candidates, truncating"
        );
        interchanges.truncate(config.max_transfer_stations);
    }

    let tariff = config.tariff();
    let itineraries: Vec<Itinerary> = interchanges
        .par_iter()
        .flat_map_iter(|via| transfers_via(store, from, via, to, &tariff))
        .collect();

    debug!(
        from = %from.name,
        to = %to.name,
        scanned = interchanges.len(),
        found = itineraries.len(),
        "Transfer scan complete"
    );

    TransferScan {
        itineraries,
        stations_scanned: interchanges.len(),
        truncated,
    }
}

/// Pair every leg into `via` with every leg out of it that connects.
///
/// Each leg is built (and its distance summed) once, however many times it
/// is paired.
fn transfers_via<S: ScheduleStore + ?Sized>(
    store: &S,
    from: &Station,
    via: &Station,
    to: &Station,
    tariff: &Tariff,
) -> Vec<Itinerary> {
    let inbound = find_legs(store, from, via, tariff);
    if inbound.is_empty() {
        return Vec::new();
    }
    let outbound = find_legs(store, via, to, tariff);

    let mut found = Vec::new();
    for first in &inbound {
        let Some(arrive) = first.arrive_time() else {
            continue;
        };
        for second in &outbound {
            let Some(depart) = second.depart_time() else {
                continue;
            };
            if !connects(arrive, depart) {
                continue;
            }
            match Itinerary::transfer(first.clone(), second.clone(), tariff) {
                Ok(itinerary) => found.push(itinerary),
                Err(e) => debug!(
                    via = %via.name,
                    first = first.train_name(),
                    second = second.train_name(),
                    error = %e,
                    "Skipping transfer"
                ),
            }
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClockTime, ItineraryKind};
    use crate::store::{MAX_ROUTE_DISTANCE_KM, NewStop, NewTrain, Timetable};

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

    fn network() -> Timetable {
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
        train(
            &mut tt,
            "Train B",
            &[
                ("Bangalore", 0, "09:00"),
                ("Shimoga", 180, "12:00"),
                ("Mangalore", 250, "17:30"),
            ],
        );
        train(
            &mut tt,
            "Train C",
            &[
                ("Bangalore", 0, "16:00"),
                ("Shimoga", 180, "19:00"),
                ("Mangalore", 250, "23:45"),
            ],
        );
        tt
    }

    #[test]
    fn connects_only_when_departing_after_arrival() {
        let tt = network();
        let scan = find_transfers(
            &tt,
            &station(&tt, "Chennai"),
            &station(&tt, "Mangalore"),
            &SearchConfig::default(),
        );

        assert_eq!(scan.itineraries.len(), 1);
        let itinerary = &scan.itineraries[0];
        assert_eq!(itinerary.kind(), &ItineraryKind::Transfer);
        assert_eq!(itinerary.legs()[0].train_name(), "Train A");
        assert_eq!(itinerary.legs()[1].train_name(), "Train C");
        assert_eq!(itinerary.total_distance_km(), 800);
        assert_eq!(itinerary.total_price().to_string(), "1000.00");
        // 09:00 to 23:45
        assert_eq!(itinerary.total_duration_min(), 885);
    }

    #[test]
    fn longest_routes_still_price_the_total() {
        let mut tt = Timetable::new();
        train(&mut tt, "Out", &[("A", 0, "08:00"), ("M", MAX_ROUTE_DISTANCE_KM, "10:00")]);
        train(&mut tt, "On", &[("M", 0, "11:00"), ("B", MAX_ROUTE_DISTANCE_KM, "13:00")]);

        let scan = find_transfers(
            &tt,
            &station(&tt, "A"),
            &station(&tt, "B"),
            &SearchConfig::default(),
        );

        assert_eq!(scan.itineraries.len(), 1);
        let itinerary = &scan.itineraries[0];
        assert_eq!(itinerary.total_distance_km(), 2 * MAX_ROUTE_DISTANCE_KM);
        assert_eq!(itinerary.total_price().to_string(), "2500000.00");
    }

    #[test]
    fn oversized_route_is_refused_before_search() {
        let mut tt = Timetable::new();
        let stops = vec![
            NewStop {
                station: "A".into(),
                distance_from_prev_km: 0,
                departure: ClockTime::parse_hhmm("08:00").unwrap(),
            },
            NewStop {
                station: "M".into(),
                distance_from_prev_km: 3_000_000_000,
                departure: ClockTime::parse_hhmm("10:00").unwrap(),
            },
        ];
        assert!(tt.add_train(&NewTrain::new("Out", stops)).is_err());
        assert_eq!(tt.train_count(), 0);
    }

    #[test]
    fn endpoints_are_not_interchanges() {
        let tt = network();
        let scan = find_transfers(
            &tt,
            &station(&tt, "Chennai"),
            &station(&tt, "Mangalore"),
            &SearchConfig::default(),
        );

        // Vellore, Bangalore, Shimoga
        assert_eq!(scan.stations_scanned, 3);
        assert!(!scan.truncated);
    }

    #[test]
    fn equal_times_do_not_connect() {
        let mut tt = Timetable::new();
        train(&mut tt, "In", &[("A", 0, "09:00"), ("M", 10, "10:00")]);
        train(&mut tt, "Out", &[("M", 0, "10:00"), ("B", 10, "11:00")]);

        let scan = find_transfers(
            &tt,
            &station(&tt, "A"),
            &station(&tt, "B"),
            &SearchConfig::default(),
        );
        assert!(scan.itineraries.is_empty());
    }

    #[test]
    fn cap_limits_interchanges() {
        let mut tt = Timetable::new();
        train(&mut tt, "In", &[("A", 0, "09:00"), ("M1", 10, "10:00")]);
        train(&mut tt, "In2", &[("A", 0, "09:00"), ("M2", 10, "10:00")]);
        train(&mut tt, "Out", &[("M1", 0, "11:00"), ("B", 10, "12:00")]);
        train(&mut tt, "Out2", &[("M2", 0, "11:00"), ("B", 10, "12:00")]);

        let config = SearchConfig::new(1.25, 1);
        let scan = find_transfers(&tt, &station(&tt, "A"), &station(&tt, "B"), &config);

        assert!(scan.truncated);
        assert_eq!(scan.stations_scanned, 1);
        assert_eq!(scan.itineraries.len(), 1);
        assert_eq!(scan.itineraries[0].legs()[0].destination().name.as_str(), "M1");
    }

    #[test]
    fn results_follow_station_order() {
        let mut tt = Timetable::new();
        train(
            &mut tt,
            "Line",
            &[("A", 0, "08:00"), ("M1", 5, "08:10"), ("M2", 5, "08:20")],
        );
        train(&mut tt, "From M2", &[("M2", 0, "09:00"), ("B", 5, "09:10")]);
        train(&mut tt, "From M1", &[("M1", 0, "09:00"), ("B", 5, "09:20")]);

        let scan = find_transfers(
            &tt,
            &station(&tt, "A"),
            &station(&tt, "B"),
            &SearchConfig::default(),
        );

        let vias: Vec<&str> = scan
            .itineraries
            .iter()
            .map(|i| i.legs()[0].destination().name.as_str())
            .collect();
        assert_eq!(vias, vec!["M1", "M2"]);
    }
}
