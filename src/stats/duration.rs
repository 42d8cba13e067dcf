use std::fmt;

use chrono::TimeDelta;

use crate::data::model::TripTable;

const MICROS_PER_SECOND: i128 = 1_000_000;
const MICROS_PER_DAY: i128 = 86_400 * MICROS_PER_SECOND;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationStats {
    pub total: TimeDelta,
    pub mean: TimeDelta,
}

/// `None` when the table is empty.
pub fn duration_stats(table: &TripTable) -> Option<DurationStats> {
    if table.is_empty() {
        return None;
    }
    let total_micros: i128 = table.trips.iter().map(|t| micros(t.travel_time)).sum();
    let mean_micros = total_micros / table.len() as i128;
    Some(DurationStats {
        total: from_micros(total_micros)?,
        mean: from_micros(mean_micros)?,
    })
}

fn micros(d: TimeDelta) -> i128 {
    d.num_seconds() as i128 * MICROS_PER_SECOND + (d.subsec_nanos() / 1_000) as i128
}

fn from_micros(us: i128) -> Option<TimeDelta> {
    i64::try_from(us).ok().map(TimeDelta::microseconds)
}

/// Render like `3 days 04:05:06` with microseconds only when non-zero.
/// Negative spans borrow whole days: -10s is `-1 days +23:59:50`.
pub fn format_timedelta(d: TimeDelta) -> String {
    let us = micros(d);
    let days = us.div_euclid(MICROS_PER_DAY);
    let rest = us.rem_euclid(MICROS_PER_DAY);

    let secs = rest / MICROS_PER_SECOND;
    let frac = rest % MICROS_PER_SECOND;
    let (h, m, s) = (secs / 3600, secs % 3600 / 60, secs % 60);

    let sign = if days < 0 { "+" } else { "" };
    let mut out = format!("{days} days {sign}{h:02}:{m:02}:{s:02}");
    if frac != 0 {
        out.push_str(&format!(".{frac:06}"));
    }
    out
}

impl fmt::Display for DurationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "The total travel time in the requested data is {}.",
            format_timedelta(self.total)
        )?;
        write!(
            f,
            "The mean travel time in the requested data is {}.",
            format_timedelta(self.mean)
        )
    }
}
