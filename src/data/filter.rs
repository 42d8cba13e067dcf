use std::fmt;

use chrono::{Month, Weekday};

use super::model::{weekday_name, Trip, TripTable};

// ---------------------------------------------------------------------------
// Filter predicate: which month and weekday to keep
// ---------------------------------------------------------------------------

/// Months selectable at the prompt, in calendar order.
pub const SUPPORTED_MONTHS: [Month; 6] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthFilter {
    All,
    Only(Month),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayFilter {
    All,
    Only(Weekday),
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthFilter::All => f.write_str("all"),
            MonthFilter::Only(m) => f.write_str(&m.name().to_lowercase()),
        }
    }
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayFilter::All => f.write_str("all"),
            DayFilter::Only(d) => f.write_str(&weekday_name(*d).to_lowercase()),
        }
    }
}

/// Month and weekday restriction applied right after loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripFilter {
    pub month: MonthFilter,
    pub day: DayFilter,
}

impl Default for TripFilter {
    fn default() -> Self {
        TripFilter {
            month: MonthFilter::All,
            day: DayFilter::All,
        }
    }
}

impl TripFilter {
    pub fn new(month: MonthFilter, day: DayFilter) -> Self {
        TripFilter { month, day }
    }

    /// A trip passes when its derived month and weekday match every
    /// restriction that is not `All`.
    pub fn matches(&self, trip: &Trip) -> bool {
        let month_ok = match self.month {
            MonthFilter::All => true,
            MonthFilter::Only(m) => trip.month == m.number_from_month(),
        };
        let day_ok = match self.day {
            DayFilter::All => true,
            DayFilter::Only(d) => trip.day_of_week == d,
        };
        month_ok && day_ok
    }

    /// Keep only the matching trips. Row order and row ids are preserved.
    pub fn apply(&self, mut table: TripTable) -> TripTable {
        table.trips.retain(|t| self.matches(t));
        table
    }
}
