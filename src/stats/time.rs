use std::fmt;

use chrono::Month;

use super::{mode_max, value_counts};
use crate::data::model::TripTable;

/// Most frequent value of a column, or its only value when the filter left
/// a single one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Popular<T> {
    Most(T),
    Only(T),
}

impl<T: Ord + Clone> Popular<T> {
    fn of<I: IntoIterator<Item = T>>(values: I) -> Option<Self> {
        let counts = value_counts(values);
        if counts.len() > 1 {
            mode_max(&counts).map(Popular::Most)
        } else {
            counts.into_keys().next_back().map(Popular::Only)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeStats {
    /// Month number, 1-12.
    pub month: Popular<u32>,
    /// Weekday name; ties resolve by name, as text.
    pub day_of_week: Popular<&'static str>,
    pub start_hour: u32,
}

/// `None` when the table is empty.
pub fn time_stats(table: &TripTable) -> Option<TimeStats> {
    let month = Popular::of(table.trips.iter().map(|t| t.month))?;
    let day_of_week = Popular::of(table.trips.iter().map(|t| t.day_name()))?;
    let start_hour = mode_max(&value_counts(table.trips.iter().map(|t| t.start_hour)))?;
    Some(TimeStats {
        month,
        day_of_week,
        start_hour,
    })
}

fn month_name(number: u32) -> String {
    u8::try_from(number)
        .ok()
        .and_then(|n| Month::try_from(n).ok())
        .map(|m| m.name().to_string())
        .unwrap_or_else(|| number.to_string())
}

impl fmt::Display for TimeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.month {
            Popular::Most(m) => writeln!(
                f,
                "The most common month in the requested data is {}.",
                month_name(m)
            )?,
            Popular::Only(m) => writeln!(f, "The data is filtered to {} only.", month_name(m))?,
        }
        match self.day_of_week {
            Popular::Most(d) => {
                writeln!(f, "The most common day of week in the requested data is {d}.")?
            }
            Popular::Only(d) => writeln!(f, "The data is filtered to {d} only.")?,
        }
        write!(
            f,
            "The most common start hour in the requested data is {}:00.",
            self.start_hour
        )
    }
}
