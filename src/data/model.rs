use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDateTime, TimeDelta, Timelike, Weekday};

use crate::error::Error;

// ---------------------------------------------------------------------------
// City – one of the bundled datasets
// ---------------------------------------------------------------------------

/// A city with a bundled trip dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Canonical lowercase key, as typed at the prompt.
    pub fn key(self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }

    /// File name of the city's dataset inside the data directory.
    pub fn file_name(self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for City {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        City::ALL
            .into_iter()
            .find(|c| c.key() == s)
            .ok_or_else(|| Error::UnknownCity(s.to_string()))
    }
}

/// Full English weekday name ("Monday", ...).
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

// ---------------------------------------------------------------------------
// Column – the table layout
// ---------------------------------------------------------------------------

/// A column of the trip table.
///
/// Source columns keep the order they had in the CSV header. Derived columns
/// are always appended after them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Column {
    StartTime,
    EndTime,
    StartStation,
    EndStation,
    UserType,
    Gender,
    BirthYear,
    /// Unrecognised source column; `slot` indexes [`Trip::extra`].
    Extra { name: String, slot: usize },
    StartHour,
    Month,
    DayOfWeek,
    TravelTime,
}

impl Column {
    pub const DERIVED: [Column; 4] = [
        Column::StartHour,
        Column::Month,
        Column::DayOfWeek,
        Column::TravelTime,
    ];

    pub fn name(&self) -> &str {
        match self {
            Column::StartTime => "Start Time",
            Column::EndTime => "End Time",
            Column::StartStation => "Start Station",
            Column::EndStation => "End Station",
            Column::UserType => "User Type",
            Column::Gender => "Gender",
            Column::BirthYear => "Birth Year",
            Column::Extra { name, .. } => name,
            Column::StartHour => "start_hour",
            Column::Month => "month",
            Column::DayOfWeek => "day_of_week",
            Column::TravelTime => "travel time",
        }
    }

    /// Map a CSV header to a known source column.
    pub fn from_header(header: &str) -> Option<Column> {
        match header {
            "Start Time" => Some(Column::StartTime),
            "End Time" => Some(Column::EndTime),
            "Start Station" => Some(Column::StartStation),
            "End Station" => Some(Column::EndStation),
            "User Type" => Some(Column::UserType),
            "Gender" => Some(Column::Gender),
            "Birth Year" => Some(Column::BirthYear),
            _ => None,
        }
    }

    /// Whether the header names a column recomputed at load time.
    pub fn is_derived_header(header: &str) -> bool {
        Column::DERIVED.iter().any(|c| c.name() == header)
    }
}

// ---------------------------------------------------------------------------
// Trip – one row of the table
// ---------------------------------------------------------------------------

/// A single bikeshare trip plus the helper values derived from its times.
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    /// 0-based position in the source file; survives filtering.
    pub row_id: usize,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub start_station: String,
    pub end_station: String,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,
    pub extra: Vec<Option<String>>,

    pub start_hour: u32,
    /// Calendar month, 1-12.
    pub month: u32,
    pub day_of_week: Weekday,
    /// `end_time - start_time`; negative for corrupt rows.
    pub travel_time: TimeDelta,
}

impl Trip {
    /// Build a trip and derive hour, month, weekday and travel time.
    pub fn new(
        row_id: usize,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
        start_station: String,
        end_station: String,
    ) -> Self {
        Trip {
            row_id,
            start_time,
            end_time,
            start_station,
            end_station,
            user_type: None,
            gender: None,
            birth_year: None,
            extra: Vec::new(),
            start_hour: start_time.hour(),
            month: start_time.month(),
            day_of_week: start_time.weekday(),
            travel_time: end_time - start_time,
        }
    }

    pub fn day_name(&self) -> &'static str {
        weekday_name(self.day_of_week)
    }
}

// ---------------------------------------------------------------------------
// TripTable – the loaded dataset
// ---------------------------------------------------------------------------

/// Trips for one city, in source order.
#[derive(Debug, Clone)]
pub struct TripTable {
    pub city: City,
    /// Source columns in header order (index column excluded).
    pub columns: Vec<Column>,
    pub trips: Vec<Trip>,
}

impl TripTable {
    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    pub fn has_column(&self, column: &Column) -> bool {
        self.columns.contains(column)
    }

    pub fn has_gender(&self) -> bool {
        self.has_column(&Column::Gender)
    }

    pub fn has_birth_year(&self) -> bool {
        self.has_column(&Column::BirthYear)
    }

    /// Source columns followed by the derived ones.
    pub fn all_columns(&self) -> Vec<Column> {
        self.columns
            .iter()
            .cloned()
            .chain(Column::DERIVED)
            .collect()
    }

    /// Missing-value count for every column, in table order.
    pub fn null_counts(&self) -> Vec<(String, usize)> {
        self.all_columns()
            .iter()
            .map(|col| {
                let nulls = self
                    .trips
                    .iter()
                    .filter(|t| match col {
                        Column::UserType => t.user_type.is_none(),
                        Column::Gender => t.gender.is_none(),
                        Column::BirthYear => t.birth_year.is_none(),
                        Column::Extra { slot, .. } => {
                            t.extra.get(*slot).map_or(true, Option::is_none)
                        }
                        _ => false,
                    })
                    .count();
                (col.name().to_string(), nulls)
            })
            .collect()
    }
}
