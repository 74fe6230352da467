//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{ClockTime, Itinerary, ItineraryKind, Leg, Station};
use crate::store::{NewStop, NewTrain};

/// Shown in place of times on placeholder legs.
pub const CHECK_SCHEDULE: &str = "Check Schedule";

/// Query parameters for itinerary search.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    /// Origin station name or id
    pub from: Option<String>,

    /// Destination station name or id
    pub to: Option<String>,

    /// `price` (default) or `duration`
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
}

/// A station in listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationResult {
    pub id: i64,
    pub name: String,
}

impl StationResult {
    pub fn from_station(station: &Station) -> Self {
        Self {
            id: station.id.0,
            name: station.name.to_string(),
        }
    }
}

/// A leg in search results.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegResult {
    pub train_id: i64,
    pub train_name: String,
    pub from: String,
    pub to: String,

    /// `HH:MM`, or "Check Schedule" on placeholder legs
    pub depart_time: String,

    /// `HH:MM`, or "Check Schedule" on placeholder legs
    pub arrive_time: String,

    pub distance_km: u32,
    pub price: f64,
    pub duration_min: u16,
}

impl LegResult {
    pub fn from_leg(leg: &Leg) -> Self {
        let time = |t: Option<ClockTime>| {
            t.map_or_else(|| CHECK_SCHEDULE.to_string(), |t| t.to_string())
        };

        Self {
            train_id: leg.train_id().0,
            train_name: leg.train_name().to_string(),
            from: leg.origin().name.to_string(),
            to: leg.destination().name.to_string(),
            depart_time: time(leg.depart_time()),
            arrive_time: time(leg.arrive_time()),
            distance_km: leg.distance_km(),
            price: leg.price().as_f64(),
            duration_min: leg.duration_min(),
        }
    }
}

/// Fields shared by every itinerary kind.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteResult {
    pub legs: Vec<LegResult>,
    pub total_distance_km: u32,
    pub total_price: f64,
    pub total_duration_min: u16,
}

/// A placeholder itinerary with its note.
#[derive(Debug, Clone, Serialize)]
pub struct AvailableResult {
    #[serde(flatten)]
    pub route: RouteResult,
    pub note: String,
}

/// An itinerary in search results, tagged by `type`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItineraryResult {
    Direct(RouteResult),
    Transfer(RouteResult),
    Available(AvailableResult),
}

impl ItineraryResult {
    pub fn from_itinerary(itinerary: &Itinerary) -> Self {
        let route = RouteResult {
            legs: itinerary.legs().iter().map(LegResult::from_leg).collect(),
            total_distance_km: itinerary.total_distance_km(),
            total_price: itinerary.total_price().as_f64(),
            total_duration_min: itinerary.total_duration_min(),
        };

        match itinerary.kind() {
            ItineraryKind::Direct => ItineraryResult::Direct(route),
            ItineraryKind::Transfer => ItineraryResult::Transfer(route),
            ItineraryKind::Available { note } => ItineraryResult::Available(AvailableResult {
                route,
                note: note.clone(),
            }),
        }
    }
}

/// Request to create a station.
#[derive(Debug, Deserialize)]
pub struct CreateStationRequest {
    pub name: Option<String>,
}

/// A stop in a train creation request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopRequest {
    pub station: String,

    #[serde(default)]
    pub distance_from_prev_km: u32,

    /// `HH:MM`
    pub departure_time: String,
}

/// Request to create a train with its stops.
#[derive(Debug, Deserialize)]
pub struct CreateTrainRequest {
    pub name: Option<String>,
    pub stops: Option<Vec<StopRequest>>,
}

impl CreateTrainRequest {
    /// Convert into a train ready for insertion.
    ///
    /// Only checks presence and time formats; the store validates the rest.
    pub fn to_new_train(&self) -> Result<NewTrain, String> {
        let (Some(name), Some(stops)) = (&self.name, &self.stops) else {
            return Err("name and stops[] required".to_string());
        };
        if name.trim().is_empty() || stops.is_empty() {
            return Err("name and stops[] required".to_string());
        }

        let stops = stops
            .iter()
            .map(|s| {
                Ok(NewStop {
                    station: s.station.clone(),
                    distance_from_prev_km: s.distance_from_prev_km,
                    departure: ClockTime::parse_hhmm(&s.departure_time)
                        .map_err(|e| e.to_string())?,
                })
            })
            .collect::<Result<Vec<_>, String>>()?;

        Ok(NewTrain::new(name.as_str(), stops))
    }
}

/// Response after creating a train.
#[derive(Debug, Serialize)]
pub struct CreateTrainResponse {
    pub id: i64,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        LegCandidate, StationId, StationName, StopIndex, Tariff, TrainId,
    };
    use serde_json::json;

    fn station(id: i64, name: &str) -> Station {
        Station::new(StationId(id), StationName::parse(name).unwrap())
    }

    fn leg(train: i64, from: &Station, to: &Station, depart: &str, arrive: &str, km: u32) -> Leg {
        let candidate = LegCandidate {
            train_id: TrainId(train),
            train_name: format!("Train {train}"),
            depart: ClockTime::parse_hhmm(depart).unwrap(),
            arrive: ClockTime::parse_hhmm(arrive).unwrap(),
            from_index: StopIndex(0),
            to_index: StopIndex(1),
        };
        Leg::scheduled(&candidate, from.clone(), to.clone(), km, &Tariff::default())
    }

    #[test]
    fn direct_itinerary_json() {
        let chennai = station(1, "Chennai");
        let bangalore = station(3, "Bangalore");
        let itinerary = Itinerary::direct(leg(1, &chennai, &bangalore, "09:00", "15:30", 370));

        let value = serde_json::to_value(ItineraryResult::from_itinerary(&itinerary)).unwrap();

        assert_eq!(
            value,
            json!({
                "type": "direct",
                "legs": [{
                    "trainId": 1,
                    "trainName": "Train 1",
                    "from": "Chennai",
                    "to": "Bangalore",
                    "departTime": "09:00",
                    "arriveTime": "15:30",
                    "distanceKm": 370,
                    "price": 462.5,
                    "durationMin": 390
                }],
                "totalDistanceKm": 370,
                "totalPrice": 462.5,
                "totalDurationMin": 390
            })
        );
    }

    #[test]
    fn transfer_itinerary_json() {
        let a = station(1, "A");
        let m = station(2, "M");
        let b = station(3, "B");
        let itinerary = Itinerary::transfer(
            leg(1, &a, &m, "08:00", "09:00", 10),
            leg(2, &m, &b, "09:30", "10:00", 20),
            &Tariff::default(),
        )
        .unwrap();

        let value = serde_json::to_value(ItineraryResult::from_itinerary(&itinerary)).unwrap();

        assert_eq!(value["type"], "transfer");
        assert_eq!(value["legs"].as_array().unwrap().len(), 2);
        assert_eq!(value["legs"][1]["from"], "M");
        assert_eq!(value["totalDistanceKm"], 30);
        assert_eq!(value["totalPrice"], 37.5);
        assert_eq!(value["totalDurationMin"], 120);
        assert!(value.get("note").is_none());
    }

    #[test]
    fn available_itinerary_json() {
        let x = station(1, "X");
        let y = station(2, "Y");
        let itinerary = Itinerary::available(Leg::placeholder(TrainId(7), "Up", x, y));

        let value = serde_json::to_value(ItineraryResult::from_itinerary(&itinerary)).unwrap();

        assert_eq!(value["type"], "available");
        assert_eq!(value["legs"][0]["departTime"], CHECK_SCHEDULE);
        assert_eq!(value["legs"][0]["arriveTime"], CHECK_SCHEDULE);
        assert_eq!(value["legs"][0]["price"], 0.0);
        assert_eq!(value["totalPrice"], 0.0);
        assert_eq!(value["totalDurationMin"], 0);
        assert_eq!(value["note"], crate::domain::AVAILABLE_NOTE);
    }

    #[test]
    fn search_query_uses_camel_case_sort() {
        let query: SearchQuery =
            serde_json::from_value(json!({"from": "A", "to": "B", "sortBy": "duration"})).unwrap();
        assert_eq!(query.sort_by.as_deref(), Some("duration"));
    }

    #[test]
    fn create_train_request_converts() {
        let request: CreateTrainRequest = serde_json::from_value(json!({
            "name": "Train A",
            "stops": [
                {"station": "Chennai", "distanceFromPrevKm": 0, "departureTime": "09:00"},
                {"station": "Vellore", "distanceFromPrevKm": 170, "departureTime": "11:00"}
            ]
        }))
        .unwrap();

        let train = request.to_new_train().unwrap();
        assert_eq!(train.name, "Train A");
        assert_eq!(train.stops.len(), 2);
        assert_eq!(train.stops[1].distance_from_prev_km, 170);
        assert_eq!(train.stops[1].departure.to_string(), "11:00");
    }

    #[test]
    fn create_train_request_requires_name_and_stops() {
        for body in [
            json!({"stops": [{"station": "A", "departureTime": "09:00"}]}),
            json!({"name": "T"}),
            json!({"name": "T", "stops": []}),
        ] {
            let request: CreateTrainRequest = serde_json::from_value(body).unwrap();
            assert_eq!(
                request.to_new_train().unwrap_err(),
                "name and stops[] required"
            );
        }
    }

    #[test]
    fn create_train_request_rejects_bad_time() {
        let request: CreateTrainRequest = serde_json::from_value(json!({
            "name": "T",
            "stops": [{"station": "A", "departureTime": "9am"}]
        }))
        .unwrap();

        assert!(request.to_new_train().unwrap_err().starts_with("invalid time"));
    }
}
