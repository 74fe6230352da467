//! Sample schedules for development.

use rand::Rng;
use tracing::info;

use crate::domain::ClockTime;

use super::{NewStop, NewTrain, SqliteStore, StoreError};

/// Station names used by the random network. The first twenty are treated
/// as major stations, the first ten as principal cities.
const STATION_NAMES: &[&str] = &[
    "Mumbai Central",
    "Delhi Junction",
    "Bangalore City",
    "Chennai Central",
    "Kolkata Howrah",
    "Hyderabad Deccan",
    "Ahmedabad Junction",
    "Pune Junction",
    "Jaipur Junction",
    "Lucknow Junction",
    "Kanpur Central",
    "Nagpur Junction",
    "Indore Junction",
    "Bhopal Junction",
    "Patna Junction",
    "Varanasi Junction",
    "Amritsar Junction",
    "Chandigarh Junction",
    "Dehradun Junction",
    "Shimla",
    "Mysuru Junction",
    "Mangalore Junction",
    "Vellore Junction",
    "Shimoga Junction",
    "Hubli Junction",
    "Belgaum Junction",
    "Gulbarga Junction",
    "Bidar Junction",
    "Nanded Junction",
    "Aurangabad Junction",
    "Jalgaon Junction",
    "Bhusaval Junction",
    "Akola Junction",
    "Wardha Junction",
    "Gondia Junction",
    "Raipur Junction",
    "Bilaspur Junction",
    "Jabalpur Junction",
    "Bina Junction",
    "Gwalior Junction",
    "Agra Cantonment",
    "Mathura Junction",
    "Aligarh Junction",
    "Bareilly Junction",
    "Moradabad Junction",
    "Meerut City",
    "Ghaziabad Junction",
    "Faridabad Junction",
    "Gurgaon Junction",
    "Sonipat Junction",
    "Panipat Junction",
    "Karnal Junction",
    "Kurukshetra Junction",
    "Ambala Cantonment",
    "Ludhiana Junction",
    "Jalandhar City",
    "Pathankot Junction",
    "Udhampur Junction",
    "Jammu Tawi",
    "Udaipur City",
    "Jodhpur Junction",
    "Bikaner Junction",
    "Ajmer Junction",
    "Kota Junction",
    "Bhilwara Junction",
    "Chittorgarh Junction",
    "Sawai Madhopur",
    "Alwar Junction",
    "Bharatpur Junction",
    "Jhansi Junction",
    "Etawah Junction",
    "Tundla Junction",
    "Rewari Junction",
    "Ratlam Junction",
    "Godhra Junction",
    "Vadodara Junction",
    "Surat Junction",
    "Valsad Junction",
    "Vapi Junction",
    "Virar Junction",
    "Bandra Terminus",
    "Dadar Junction",
    "Thane Junction",
    "Kalyan Junction",
    "Lonavala Junction",
    "Daund Junction",
    "Manmad Junction",
    "Katni Junction",
    "Satna Junction",
    "Prayagraj Junction",
    "Gaya Junction",
    "Ranchi Junction",
    "Tatanagar Junction",
    "Rourkela Junction",
    "Sambalpur Junction",
    "Durg Junction",
    "Bhubaneswar Junction",
    "Cuttack Junction",
    "Puri Junction",
    "Visakhapatnam Junction",
    "Rajahmundry Junction",
    "Vijayawada Junction",
    "Guntur Junction",
    "Nellore Junction",
    "Chengalpattu Junction",
    "Tambaram Junction",
    "Chennai Egmore",
];

const MAJOR_STATIONS: usize = 20;
const PRINCIPAL_CITIES: usize = 10;

/// Size of a random network.
#[derive(Debug, Clone, Copy)]
pub struct RandomNetwork {
    pub trains: usize,
    pub stations: usize,
}

impl Default for RandomNetwork {
    fn default() -> Self {
        Self {
            trains: 1000,
            stations: 200,
        }
    }
}

fn stop(station: &str, distance_from_prev_km: u32, departure: ClockTime) -> NewStop {
    NewStop {
        station: station.to_string(),
        distance_from_prev_km,
        departure,
    }
}

fn hm(hour: u32, minute: u32) -> ClockTime {
    ClockTime::from_minutes(hour * 60 + minute)
}

/// Replace the schedule with the small worked example.
///
/// Train A runs Chennai to Mangalore via Bangalore; Trains B and C run
/// Bangalore to Mangalore, one before and one after Train A reaches
/// Bangalore.
pub fn example(store: &mut SqliteStore) -> Result<(), StoreError> {
    store.reset()?;

    let trains = [
        NewTrain::new(
            "Train A",
            vec![
                stop("Chennai", 0, hm(9, 0)),
                stop("Vellore", 170, hm(11, 0)),
                stop("Bangalore", 200, hm(15, 30)),
                stop("Mysuru", 120, hm(17, 30)),
                stop("Mangalore", 300, hm(21, 45)),
            ],
        ),
        NewTrain::new(
            "Train B",
            vec![
                stop("Bangalore", 0, hm(9, 0)),
                stop("Shimoga", 180, hm(12, 0)),
                stop("Mangalore", 250, hm(17, 30)),
            ],
        ),
        NewTrain::new(
            "Train C",
            vec![
                stop("Bangalore", 0, hm(16, 0)),
                stop("Shimoga", 180, hm(19, 0)),
                stop("Mangalore", 250, hm(23, 45)),
            ],
        ),
    ];

    for train in &trains {
        store.insert_train(train)?;
    }

    info!(trains = trains.len(), "Seeded example schedule");
    Ok(())
}

/// Replace the schedule with a random network.
///
/// Besides `network.trains` wandering trains of 3 to 8 stops, adds express
/// pairs between major stations, several trains between every pair of
/// principal cities, and short regional hops.
pub fn random<R: Rng>(
    store: &mut SqliteStore,
    network: RandomNetwork,
    rng: &mut R,
) -> Result<(), StoreError> {
    store.reset()?;

    let names = &STATION_NAMES[..network.stations.clamp(2, STATION_NAMES.len())];
    for name in names {
        store.get_or_create_station(name)?;
    }

    let mut inserted = 0usize;

    for t in 0..network.trains {
        let stop_count = rng.gen_range(3..=8);
        let mut minutes: u32 = rng.gen_range(4 * 60..=22 * 60);
        let mut station = rng.gen_range(0..names.len());
        let mut stops = vec![stop(names[station], 0, ClockTime::from_minutes(minutes))];

        for _ in 1..stop_count {
            let travel_km = rng.gen_range(20..=150);
            minutes += rng.gen_range(15..=120);
            let step = rng.gen_range(1..=(names.len() - 1).min(5));
            station = (station + step) % names.len();
            stops.push(stop(names[station], travel_km, ClockTime::from_minutes(minutes)));
        }

        store.insert_train(&NewTrain::new(format!("Train {}", t + 1), stops))?;
        inserted += 1;
    }

    let major = &names[..MAJOR_STATIONS.min(names.len())];
    for i in 0..50 {
        let from = rng.gen_range(0..major.len());
        let to = rng.gen_range(0..major.len());
        if from == to {
            continue;
        }
        let depart = rng.gen_range(6 * 60..=20 * 60);
        let arrive = rng.gen_range(6 * 60..=20 * 60) + rng.gen_range(30..=180);
        let train = NewTrain::new(
            format!("Express {}", i + 1),
            vec![
                stop(major[from], 0, ClockTime::from_minutes(depart)),
                stop(major[to], rng.gen_range(50..=300), ClockTime::from_minutes(arrive)),
            ],
        );
        store.insert_train(&train)?;
        inserted += 1;
    }

    let principal = &names[..PRINCIPAL_CITIES.min(names.len())];
    for (i, from) in principal.iter().enumerate() {
        for to in &principal[i + 1..] {
            for n in 0..rng.gen_range(3..=5) {
                let depart = rng.gen_range(6 * 60..=20 * 60);
                let duration = rng.gen_range(60..=300);
                let train = NewTrain::new(
                    format!("{}-{} Express {}", first_word(from), first_word(to), n + 1),
                    vec![
                        stop(from, 0, ClockTime::from_minutes(depart)),
                        stop(
                            to,
                            rng.gen_range(100..=800),
                            ClockTime::from_minutes(depart + duration),
                        ),
                    ],
                );
                store.insert_train(&train)?;
                inserted += 1;
            }
        }
    }

    if major.len() > PRINCIPAL_CITIES {
        let regional = &major[PRINCIPAL_CITIES..];
        for i in 0..100 {
            let from = rng.gen_range(0..regional.len());
            let to = rng.gen_range(0..regional.len());
            if from == to {
                continue;
            }
            let depart = rng.gen_range(5 * 60..=21 * 60);
            let duration = rng.gen_range(20..=120);
            let train = NewTrain::new(
                format!("Regional {}", i + 1),
                vec![
                    stop(regional[from], 0, ClockTime::from_minutes(depart)),
                    stop(
                        regional[to],
                        rng.gen_range(30..=200),
                        ClockTime::from_minutes(depart + duration),
                    ),
                ],
            );
            store.insert_train(&train)?;
            inserted += 1;
        }
    }

    info!(
        stations = names.len(),
        trains = inserted,
        "Seeded random schedule"
    );
    Ok(())
}

fn first_word(name: &str) -> &str {
    name.split_whitespace().next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ScheduleStore;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn station_names_are_unique() {
        let mut names = STATION_NAMES.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), STATION_NAMES.len());
    }

    #[test]
    fn example_schedule() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        example(&mut store).unwrap();

        let tt = store.load_timetable().unwrap();
        assert_eq!(tt.train_count(), 3);
        assert_eq!(tt.station_count(), 6);

        let bangalore = tt.resolve_station("Bangalore").unwrap();
        let mangalore = tt.resolve_station("Mangalore").unwrap();
        assert_eq!(tt.leg_candidates(bangalore.id, mangalore.id).len(), 3);
    }

    #[test]
    fn example_reseed_replaces() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        example(&mut store).unwrap();
        example(&mut store).unwrap();

        assert_eq!(store.load_timetable().unwrap().train_count(), 3);
    }

    #[test]
    fn random_schedule_loads() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        random(
            &mut store,
            RandomNetwork {
                trains: 25,
                stations: 30,
            },
            &mut rng,
        )
        .unwrap();

        let tt = store.load_timetable().unwrap();
        assert_eq!(tt.station_count(), 30);
        // Principal city pairs alone contribute at least 3 x 45 trains
        assert!(tt.train_count() >= 25 + 135);
    }

    #[test]
    fn random_schedule_tiny_network() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        random(
            &mut store,
            RandomNetwork {
                trains: 5,
                stations: 0,
            },
            &mut rng,
        )
        .unwrap();

        let tt = store.load_timetable().unwrap();
        assert_eq!(tt.station_count(), 2);
    }
}
