use std::collections::BTreeMap;
use std::fmt;

use super::{mode_max, value_counts};
use crate::data::model::TripTable;

/// Start × end station frequency table. Labels are kept sorted on both axes.
#[derive(Debug, Default)]
pub struct CrossTab<'a> {
    cells: BTreeMap<&'a str, BTreeMap<&'a str, usize>>,
}

impl<'a> CrossTab<'a> {
    pub fn from_pairs<I: IntoIterator<Item = (&'a str, &'a str)>>(pairs: I) -> Self {
        let mut cells: BTreeMap<&str, BTreeMap<&str, usize>> = BTreeMap::new();
        for (row, col) in pairs {
            *cells.entry(row).or_default().entry(col).or_insert(0) += 1;
        }
        CrossTab { cells }
    }

    /// Largest cell of each row.
    pub fn row_peaks(&self) -> impl Iterator<Item = (&'a str, usize)> + '_ {
        self.cells
            .iter()
            .map(|(row, cols)| (*row, cols.values().copied().max().unwrap_or(0)))
    }

    /// Largest cell of each column.
    pub fn column_peaks(&self) -> BTreeMap<&'a str, usize> {
        let mut peaks: BTreeMap<&str, usize> = BTreeMap::new();
        for cols in self.cells.values() {
            for (col, n) in cols {
                let peak = peaks.entry(*col).or_insert(0);
                *peak = (*peak).max(*n);
            }
        }
        peaks
    }

    /// Route labels as `(from, to)`: "from" is the column whose peak is
    /// largest and "to" is, independently, the row whose peak is largest.
    /// Ties keep the first label in sorted order. The two labels need not
    /// share a cell.
    pub fn peak_labels(&self) -> Option<(&'a str, &'a str)> {
        let col = first_argmax(self.column_peaks())?;
        let row = first_argmax(self.row_peaks())?;
        Some((col, row))
    }
}

fn first_argmax<'a, I: IntoIterator<Item = (&'a str, usize)>>(peaks: I) -> Option<&'a str> {
    let mut best: Option<(&str, usize)> = None;
    for (label, n) in peaks {
        if best.map_or(true, |(_, b)| n > b) {
            best = Some((label, n));
        }
    }
    best.map(|(label, _)| label)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationStats {
    pub start_station: String,
    pub end_station: String,
    pub route_from: String,
    pub route_to: String,
}

/// `None` when the table is empty.
pub fn station_stats(table: &TripTable) -> Option<StationStats> {
    let start_station = mode_max(&value_counts(
        table.trips.iter().map(|t| t.start_station.as_str()),
    ))?;
    let end_station = mode_max(&value_counts(
        table.trips.iter().map(|t| t.end_station.as_str()),
    ))?;
    let xtab = CrossTab::from_pairs(
        table
            .trips
            .iter()
            .map(|t| (t.start_station.as_str(), t.end_station.as_str())),
    );
    let (route_from, route_to) = xtab.peak_labels()?;

    Some(StationStats {
        start_station: start_station.to_string(),
        end_station: end_station.to_string(),
        route_from: route_from.to_string(),
        route_to: route_to.to_string(),
    })
}

impl fmt::Display for StationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "The most commonly used start station in the requested data is {}.",
            self.start_station
        )?;
        writeln!(
            f,
            "The most commonly used end station in the requested data is {}.",
            self.end_station
        )?;
        write!(
            f,
            "The most common journey in the requested data is from {} to {}.",
            self.route_from, self.route_to
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{City, Trip};
    use chrono::NaiveDate;

    fn table(pairs: &[(&str, &str)]) -> TripTable {
        let t = NaiveDate::from_ymd_opt(2017, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap();
        TripTable {
            city: City::Chicago,
            columns: Vec::new(),
            trips: pairs
                .iter()
                .enumerate()
                .map(|(i, (s, e))| Trip::new(i, t, t, s.to_string(), e.to_string()))
                .collect(),
        }
    }

    #[test]
    fn most_common_stations_and_route() {
        let stats = station_stats(&table(&[
            ("Canal St", "Clark St"),
            ("Canal St", "Clark St"),
            ("Lake St", "Canal St"),
        ]))
        .unwrap();
        assert_eq!(stats.start_station, "Canal St");
        assert_eq!(stats.end_station, "Clark St");
        assert_eq!(stats.route_from, "Clark St");
        assert_eq!(stats.route_to, "Canal St");
        assert!(stats
            .to_string()
            .contains("most common journey in the requested data is from Clark St to Canal St."));
    }

    #[test]
    fn station_ties_go_to_the_largest_name() {
        let stats = station_stats(&table(&[("A", "Y"), ("B", "X")])).unwrap();
        assert_eq!(stats.start_station, "B");
        assert_eq!(stats.end_station, "Y");
    }

    #[test]
    fn route_labels_are_chosen_per_axis() {
        // Peaks of 2 at (A, Z) and (B, Y); the first column and the first row
        // reaching the peak are Y and A, which never occur together.
        let xtab = CrossTab::from_pairs([
            ("A", "Z"),
            ("A", "Z"),
            ("B", "Y"),
            ("B", "Y"),
            ("B", "Z"),
        ]);
        assert_eq!(xtab.peak_labels(), Some(("Y", "A")));
    }

    #[test]
    fn route_reads_from_end_axis_to_start_axis() {
        let stats = station_stats(&table(&[("A", "X"), ("A", "X"), ("B", "Y")])).unwrap();
        assert_eq!(
            (stats.route_from.as_str(), stats.route_to.as_str()),
            ("X", "A")
        );
        assert!(stats
            .to_string()
            .ends_with("most common journey in the requested data is from X to A."));
    }

    #[test]
    fn column_peaks_take_the_max_over_rows() {
        let xtab = CrossTab::from_pairs([("A", "X"), ("B", "X"), ("B", "X")]);
        assert_eq!(xtab.column_peaks().get("X"), Some(&2));
        let rows: Vec<_> = xtab.row_peaks().collect();
        assert_eq!(rows, vec![("A", 1), ("B", 2)]);
    }

    #[test]
    fn empty_table_has_no_stats() {
        assert_eq!(station_stats(&table(&[])), None);
    }
}
