use std::fs;

use chrono::{Month, Weekday};
use rusty_bikeshare::config::ExportFormat;
use rusty_bikeshare::data::filter::{DayFilter, MonthFilter, TripFilter};
use rusty_bikeshare::data::loader::{load_csv, load_data};
use rusty_bikeshare::data::model::{City, Column};
use rusty_bikeshare::export::Exporter;
use rusty_bikeshare::stats::quality::quality_report;
use rusty_bikeshare::stats::user::user_stats;
use tempfile::TempDir;

const NEW_YORK: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
5688089,2017-06-11 14:55:05,2017-06-11 15:08:21,795,Suffolk St & Stanton St,W Broadway & Spring St,Subscriber,Male,1998.0
4096714,2017-05-11 15:30:11,2017-05-11 15:41:43,692,Lispenard St & Broadway,Pike St & Monroe St,Subscriber,Male,1981.0
2173887,2017-03-29 13:26:26,2017-03-29 13:48:31,1325,Broadway & W 60 St,Broadway & W 60 St,Subscriber,Female,1987.0
2173888,2017-03-29 13:30:00,2017-03-29 13:40:00,600,\"Broadway, W 60 St\",Pike St & Monroe St,,,
";

fn setup() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(City::NewYorkCity.file_name()), NEW_YORK).unwrap();
    dir
}

#[test]
fn unfiltered_load_keeps_every_row() {
    let dir = setup();
    let table = load_data(dir.path(), City::NewYorkCity, &TripFilter::default()).unwrap();
    assert_eq!(table.len(), NEW_YORK.lines().count() - 1);
}

#[test]
fn month_filter_yields_a_constant_month() {
    let dir = setup();
    let filter = TripFilter::new(MonthFilter::Only(Month::March), DayFilter::All);
    let table = load_data(dir.path(), City::NewYorkCity, &filter).unwrap();
    assert_eq!(table.len(), 2);
    assert!(table.trips.iter().all(|t| t.month == 3));
}

#[test]
fn day_filter_yields_a_constant_weekday() {
    let dir = setup();
    let filter = TripFilter::new(MonthFilter::All, DayFilter::Only(Weekday::Sun));
    let table = load_data(dir.path(), City::NewYorkCity, &filter).unwrap();
    assert_eq!(table.len(), 1);
    assert!(table.trips.iter().all(|t| t.day_name() == "Sunday"));
}

#[test]
fn user_type_counts_sum_to_row_count() {
    let dir = setup();
    let table = load_data(dir.path(), City::NewYorkCity, &TripFilter::default()).unwrap();
    let stats = user_stats(&table);
    let total: usize = stats.user_types.iter().map(|(_, n)| n).sum();
    assert_eq!(total, table.len());
    assert!(stats.user_types.contains(&(None, 1)));
}

#[test]
fn exported_csv_reloads_to_the_same_rows() {
    let dir = setup();
    let filter = TripFilter::new(MonthFilter::Only(Month::March), DayFilter::All);
    let table = load_data(dir.path(), City::NewYorkCity, &filter).unwrap();

    let path = Exporter::export(dir.path(), ExportFormat::Csv, &table).unwrap();
    let reloaded = load_csv(&path, City::NewYorkCity).unwrap();

    assert_eq!(reloaded.columns, table.columns);
    assert_eq!(reloaded.len(), table.len());
    for (a, b) in table.trips.iter().zip(&reloaded.trips) {
        assert_eq!(a.start_time, b.start_time);
        assert_eq!(a.end_time, b.end_time);
        assert_eq!(a.start_station, b.start_station);
        assert_eq!(a.end_station, b.end_station);
        assert_eq!(a.user_type, b.user_type);
        assert_eq!(a.gender, b.gender);
        assert_eq!(a.birth_year, b.birth_year);
        assert_eq!(a.extra, b.extra);
        assert_eq!(a.start_hour, b.start_hour);
        assert_eq!(a.month, b.month);
        assert_eq!(a.day_of_week, b.day_of_week);
        assert_eq!(a.travel_time, b.travel_time);
    }
    assert_eq!(quality_report(&reloaded), quality_report(&table));
}

#[test]
fn extra_columns_survive_export() {
    let dir = setup();
    let table = load_data(dir.path(), City::NewYorkCity, &TripFilter::default()).unwrap();
    assert!(table.has_column(&Column::Extra {
        name: "Trip Duration".into(),
        slot: 0
    }));

    let path = Exporter::export(dir.path(), ExportFormat::Csv, &table).unwrap();
    let text = fs::read_to_string(path).unwrap();
    assert!(text
        .lines()
        .next()
        .unwrap()
        .ends_with("Birth Year,start_hour,month,day_of_week,travel time"));
    assert!(text.contains("\"Broadway, W 60 St\""));
}
