use std::fmt;

use crate::data::model::{Trip, TripTable};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualityReport {
    pub negative_travel_times: usize,
    /// Missing values per column, every column listed.
    pub nulls: Vec<(String, usize)>,
}

impl QualityReport {
    pub fn total_nulls(&self) -> usize {
        self.nulls.iter().map(|(_, n)| n).sum()
    }
}

/// A trip is flagged once its travel time is at least one whole day negative.
pub fn is_negative_trip(trip: &Trip) -> bool {
    trip.travel_time.num_days() < 0
}

pub fn quality_report(table: &TripTable) -> QualityReport {
    QualityReport {
        negative_travel_times: table.trips.iter().filter(|t| is_negative_trip(t)).count(),
        nulls: table.null_counts(),
    }
}

impl fmt::Display for QualityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} instances of negative travel times.\n",
            self.negative_travel_times
        )?;
        if self.total_nulls() == 0 {
            return write!(f, "No null data found in requested data.");
        }
        writeln!(f, "Null data found in requested data:")?;
        let width = self.nulls.iter().map(|(c, _)| c.len()).max().unwrap_or(0);
        for (column, count) in &self.nulls {
            writeln!(f, "{column:<width$}  {count}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{City, Column};
    use chrono::{NaiveDate, TimeDelta};

    fn trip(i: usize, travel: TimeDelta, user: Option<&str>) -> Trip {
        let start = NaiveDate::from_ymd_opt(2017, 5, 10)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .unwrap();
        let mut trip = Trip::new(i, start, start + travel, "A".into(), "B".into());
        trip.user_type = user.map(str::to_string);
        trip
    }

    fn table(trips: Vec<Trip>) -> TripTable {
        TripTable {
            city: City::NewYorkCity,
            columns: vec![
                Column::StartTime,
                Column::EndTime,
                Column::StartStation,
                Column::EndStation,
                Column::UserType,
            ],
            trips,
        }
    }

    #[test]
    fn clean_table_reports_nothing() {
        let report = quality_report(&table(vec![
            trip(0, TimeDelta::minutes(5), Some("Subscriber")),
            trip(1, TimeDelta::minutes(50), Some("Customer")),
        ]));
        assert_eq!(report.negative_travel_times, 0);
        assert_eq!(report.total_nulls(), 0);
        assert!(report.to_string().contains("No null data found"));
    }

    #[test]
    fn counts_only_whole_day_negative_spans() {
        let report = quality_report(&table(vec![
            trip(0, TimeDelta::minutes(-5), Some("Subscriber")),
            trip(1, TimeDelta::hours(-25), Some("Subscriber")),
            trip(2, TimeDelta::days(-3), Some("Subscriber")),
        ]));
        assert_eq!(report.negative_travel_times, 2);
        assert!(report
            .to_string()
            .starts_with("2 instances of negative travel times.\n"));
    }

    #[test]
    fn lists_every_column_when_nulls_exist() {
        let report = quality_report(&table(vec![
            trip(0, TimeDelta::minutes(5), None),
            trip(1, TimeDelta::minutes(5), None),
        ]));
        assert_eq!(report.total_nulls(), 2);
        assert_eq!(report.nulls.len(), 9);
        let text = report.to_string();
        assert!(text.contains("Null data found in requested data:"));
        let row = |name: &str| {
            text.lines()
                .find(|l| l.starts_with(name))
                .map(|l| l[name.len()..].trim().to_string())
        };
        assert_eq!(row("User Type").as_deref(), Some("2"));
        assert_eq!(row("Start Time").as_deref(), Some("0"));
    }
}
