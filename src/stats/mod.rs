/// Statistics over a filtered trip table.
///
/// Each module computes a plain report struct from `&TripTable` and renders
/// it through `Display`; the menu loop adds the banner, the elapsed time and
/// the sample/export offer around it.
pub mod duration;
pub mod quality;
pub mod station;
pub mod time;
pub mod user;

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crate::data::model::TripTable;

pub const NO_TRIPS: &str = "No trips match the selected filters.";

// ---------------------------------------------------------------------------
// Module registry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsKind {
    Time,
    Station,
    Duration,
    User,
    Quality,
}

impl StatsKind {
    /// Order used by the "All stats" menu entry.
    pub const ALL: [StatsKind; 5] = [
        StatsKind::Time,
        StatsKind::Station,
        StatsKind::Duration,
        StatsKind::User,
        StatsKind::Quality,
    ];

    pub fn banner(self) -> &'static str {
        match self {
            StatsKind::Time => "Calculating The Most Frequent Times of Travel...",
            StatsKind::Station => "Calculating The Most Popular Stations and Trip...",
            StatsKind::Duration => "Calculating Trip Duration...",
            StatsKind::User => "Calculating User Stats...",
            StatsKind::Quality => "Checking for data errors...",
        }
    }

    /// Compute and render this module's report.
    pub fn report(self, table: &TripTable) -> String {
        let body = match self {
            StatsKind::Time => time::time_stats(table).map(|s| s.to_string()),
            StatsKind::Station => station::station_stats(table).map(|s| s.to_string()),
            StatsKind::Duration => duration::duration_stats(table).map(|s| s.to_string()),
            StatsKind::User => Some(user::user_stats(table).to_string()),
            StatsKind::Quality => Some(quality::quality_report(table).to_string()),
        };
        body.unwrap_or_else(|| NO_TRIPS.to_string())
    }
}

/// A rendered report with its wall-clock computation time.
#[derive(Debug, Clone)]
pub struct Timed {
    pub body: String,
    pub elapsed: Duration,
}

pub fn run(kind: StatsKind, table: &TripTable) -> Timed {
    let started = Instant::now();
    let body = kind.report(table);
    let elapsed = started.elapsed();
    log::debug!("{kind:?} stats over {} trips took {elapsed:?}", table.len());
    Timed { body, elapsed }
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Occurrence count per distinct value, ordered by value.
pub fn value_counts<T: Ord, I: IntoIterator<Item = T>>(values: I) -> BTreeMap<T, usize> {
    let mut counts = BTreeMap::new();
    for v in values {
        *counts.entry(v).or_insert(0) += 1;
    }
    counts
}

/// Most frequent value; ties go to the largest value.
pub fn mode_max<T: Ord + Clone>(counts: &BTreeMap<T, usize>) -> Option<T> {
    let top = *counts.values().max()?;
    counts
        .iter()
        .rev()
        .find(|(_, n)| **n == top)
        .map(|(v, _)| v.clone())
}
