use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::NaiveDateTime;

use super::filter::TripFilter;
use super::model::{City, Column, Trip, TripTable};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a city's dataset from `data_dir` and apply the month/day filter.
pub fn load_data(data_dir: &Path, city: City, filter: &TripFilter) -> Result<TripTable> {
    let path = data_dir.join(city.file_name());
    let table = load_csv(&path, city)?;
    let total = table.len();
    let table = filter.apply(table);
    log::info!(
        "{city}: kept {} of {total} trips (month={}, day={})",
        table.len(),
        filter.month,
        filter.day
    );
    Ok(table)
}

/// CSV layout: header row with column names.
///
/// * An unnamed leading column (`""` or `Unnamed: 0`) is a row index and is dropped.
/// * `Start Time`, `End Time`, `Start Station`, `End Station`, `User Type` are required.
/// * `Gender` and `Birth Year` are optional.
/// * Derived columns (`start_hour`, `month`, ...) are recomputed, not read.
/// * Anything else is kept as raw text.
///
/// Empty cells are missing values.
pub fn load_csv(path: &Path, city: City) -> Result<TripTable> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let layout = Layout::from_headers(&headers)?;
    let mut trips = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let cell = |idx: usize| record.get(idx).unwrap_or("");

        let start = parse_timestamp(cell(layout.start_time), row_no, "Start Time")?;
        let end = parse_timestamp(cell(layout.end_time), row_no, "End Time")?;

        let mut trip = Trip::new(
            row_no,
            start,
            end,
            cell(layout.start_station).to_string(),
            cell(layout.end_station).to_string(),
        );
        trip.user_type = non_empty(cell(layout.user_type));
        trip.gender = layout.gender.and_then(|i| non_empty(cell(i)));
        trip.birth_year = match layout.birth_year {
            Some(i) => parse_birth_year(cell(i), row_no)?,
            None => None,
        };
        trip.extra = layout.extras.iter().map(|&i| non_empty(cell(i))).collect();

        trips.push(trip);
    }

    log::info!("read {} trips from {}", trips.len(), path.display());

    Ok(TripTable {
        city,
        columns: layout.columns,
        trips,
    })
}

// ---------------------------------------------------------------------------
// Header layout
// ---------------------------------------------------------------------------

/// Record positions of each known column, resolved once from the header.
struct Layout {
    columns: Vec<Column>,
    start_time: usize,
    end_time: usize,
    start_station: usize,
    end_station: usize,
    user_type: usize,
    gender: Option<usize>,
    birth_year: Option<usize>,
    extras: Vec<usize>,
}

impl Layout {
    fn from_headers(headers: &[String]) -> Result<Self> {
        let mut columns = Vec::new();
        let mut positions: Vec<(Column, usize)> = Vec::new();
        let mut extras = Vec::new();

        for (idx, header) in headers.iter().enumerate() {
            if idx == 0 && is_index_header(header) {
                continue;
            }
            if Column::is_derived_header(header) {
                continue;
            }
            let column = match Column::from_header(header) {
                Some(col) => {
                    positions.push((col.clone(), idx));
                    col
                }
                None => {
                    let slot = extras.len();
                    extras.push(idx);
                    Column::Extra {
                        name: header.clone(),
                        slot,
                    }
                }
            };
            columns.push(column);
        }

        let find = |wanted: Column| {
            positions
                .iter()
                .find(|(col, _)| *col == wanted)
                .map(|(_, idx)| *idx)
        };
        let require = |wanted: Column| {
            let name = wanted.name().to_string();
            find(wanted).with_context(|| format!("CSV missing '{name}' column"))
        };

        Ok(Layout {
            start_time: require(Column::StartTime)?,
            end_time: require(Column::EndTime)?,
            start_station: require(Column::StartStation)?,
            end_station: require(Column::EndStation)?,
            user_type: require(Column::UserType)?,
            gender: find(Column::Gender),
            birth_year: find(Column::BirthYear),
            extras,
            columns,
        })
    }
}

fn is_index_header(header: &str) -> bool {
    header.trim().is_empty() || header.starts_with("Unnamed")
}

// ---------------------------------------------------------------------------
// Cell parsing
// ---------------------------------------------------------------------------

const TIMESTAMP_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

fn parse_timestamp(s: &str, row: usize, col: &str) -> Result<NaiveDateTime> {
    let s = s.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .with_context(|| format!("Row {row}, {col}: '{s}' is not a timestamp"))
}

/// Birth years are written either as integers or as pandas-style floats (`1989.0`).
fn parse_birth_year(s: &str, row: usize) -> Result<Option<i32>> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }
    if let Ok(year) = s.parse::<i32>() {
        return Ok(Some(year));
    }
    let value: f64 = s
        .parse()
        .with_context(|| format!("Row {row}, Birth Year: '{s}' is not a number"))?;
    if !value.is_finite() || value.fract() != 0.0 {
        bail!("Row {row}, Birth Year: '{s}' is not a whole year");
    }
    Ok(Some(value as i32))
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
