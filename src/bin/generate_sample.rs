use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use serde::Serialize;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64) as usize % n
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len())]
    }
}

// ---------------------------------------------------------------------------
// Row layouts (Washington has no demographics)
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct TripRow<'a> {
    #[serde(rename = "")]
    index: usize,
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "End Time")]
    end_time: String,
    #[serde(rename = "Trip Duration")]
    trip_duration: i64,
    #[serde(rename = "Start Station")]
    start_station: &'a str,
    #[serde(rename = "End Station")]
    end_station: &'a str,
    #[serde(rename = "User Type")]
    user_type: Option<&'a str>,
    #[serde(rename = "Gender")]
    gender: Option<&'a str>,
    #[serde(rename = "Birth Year")]
    birth_year: Option<f64>,
}

#[derive(Serialize)]
struct BasicTripRow<'a> {
    #[serde(rename = "")]
    index: usize,
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "End Time")]
    end_time: String,
    #[serde(rename = "Trip Duration")]
    trip_duration: f64,
    #[serde(rename = "Start Station")]
    start_station: &'a str,
    #[serde(rename = "End Station")]
    end_station: &'a str,
    #[serde(rename = "User Type")]
    user_type: &'a str,
}

struct CityProfile {
    file_name: &'static str,
    stations: &'static [&'static str],
    user_types: &'static [&'static str],
    demographics: bool,
    seed: u64,
}

const CITIES: [CityProfile; 3] = [
    CityProfile {
        file_name: "chicago.csv",
        stations: &[
            "Streeter Dr & Grand Ave",
            "Lake Shore Dr & Monroe St",
            "Clinton St & Washington Blvd",
            "Canal St & Adams St",
            "Theater on the Lake",
            "Millennium Park",
        ],
        user_types: &["Subscriber", "Subscriber", "Subscriber", "Customer"],
        demographics: true,
        seed: 42,
    },
    CityProfile {
        file_name: "new_york_city.csv",
        stations: &[
            "Pershing Square North",
            "E 17 St & Broadway",
            "W 21 St & 6 Ave",
            "West St & Chambers St",
            "Broadway & E 22 St",
            "Central Park S & 6 Ave",
        ],
        user_types: &["Subscriber", "Subscriber", "Subscriber", "Customer"],
        demographics: true,
        seed: 7,
    },
    CityProfile {
        file_name: "washington.csv",
        stations: &[
            "Columbus Circle / Union Station",
            "Lincoln Memorial",
            "Jefferson Dr & 14th St SW",
            "Massachusetts Ave & Dupont Circle NW",
            "15th & P St NW",
        ],
        user_types: &["Subscriber", "Subscriber", "Customer"],
        demographics: false,
        seed: 1234,
    },
];

const ROWS_PER_CITY: usize = 2_000;

fn main() {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    let year_start = NaiveDate::from_ymd_opt(2017, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("valid start date");
    // Jan 1 .. Jun 30
    let span_seconds = 181 * 86_400;

    for city in &CITIES {
        let mut rng = SimpleRng::new(city.seed);
        let path = out_dir.join(city.file_name);
        let mut writer = csv::Writer::from_path(&path).expect("Failed to create output file");

        for index in 0..ROWS_PER_CITY {
            let offset = (rng.next_f64() * span_seconds as f64) as i64;
            let start: NaiveDateTime = year_start + TimeDelta::seconds(offset);
            // Mostly short rides with an occasional long one
            let minutes = 2.0 + rng.next_f64().powi(3) * 120.0;
            let trip_seconds = (minutes * 60.0) as i64;
            let end = start + TimeDelta::seconds(trip_seconds);

            let start_station = rng.pick(city.stations);
            let end_station = rng.pick(city.stations);
            // ~1% of rows lack a user type
            let user_type = (rng.below(100) != 0).then(|| rng.pick(city.user_types));

            if city.demographics {
                let recorded = user_type == Some("Subscriber");
                let row = TripRow {
                    index,
                    start_time: start.format(TIMESTAMP_FORMAT).to_string(),
                    end_time: end.format(TIMESTAMP_FORMAT).to_string(),
                    trip_duration: trip_seconds,
                    start_station,
                    end_station,
                    user_type,
                    gender: recorded.then(|| rng.pick(&["Male", "Male", "Female"])),
                    birth_year: recorded.then(|| (1950 + rng.below(50)) as f64),
                };
                writer.serialize(row).expect("Failed to write row");
            } else {
                let row = BasicTripRow {
                    index,
                    start_time: start.format(TIMESTAMP_FORMAT).to_string(),
                    end_time: end.format(TIMESTAMP_FORMAT).to_string(),
                    trip_duration: trip_seconds as f64 + rng.next_f64(),
                    start_station,
                    end_station,
                    user_type: user_type.unwrap_or("Subscriber"),
                };
                writer.serialize(row).expect("Failed to write row");
            }
        }
        writer.flush().expect("Failed to flush writer");

        println!("Wrote {ROWS_PER_CITY} trips to {}", path.display());
    }
}
