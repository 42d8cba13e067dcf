//! Sample pages and file exports of the filtered trip table.
//!
//! The table is converted to a single Arrow `RecordBatch` once; pages are
//! slices of it rendered by Arrow's pretty printer, and exports go through
//! Arrow's CSV / JSON writers or the Parquet `ArrowWriter`.

use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use arrow::array::{Array, ArrayRef, Int32Array, StringArray, UInt32Array, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::choices::SampleAction;
use crate::config::{Config, ExportFormat};
use crate::data::model::{Column, Trip, TripTable};
use crate::prompt::Prompter;
use crate::stats::duration::format_timedelta;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";
const EXPORT_PREFIX: &str = "BikeShare Data Export_";

// ---------------------------------------------------------------------------
// TripTable → Arrow
// ---------------------------------------------------------------------------

/// Convert the table to one record batch: a leading row-index column named
/// `index_name`, the source columns, then the derived ones.
pub fn to_record_batch(table: &TripTable, index_name: &str) -> Result<RecordBatch> {
    let trips = &table.trips;
    let mut fields = vec![Field::new(index_name, DataType::UInt64, false)];
    let mut arrays: Vec<ArrayRef> = vec![Arc::new(UInt64Array::from_iter_values(
        trips.iter().map(|t| t.row_id as u64),
    ))];

    for column in table.all_columns() {
        let (array, nullable): (ArrayRef, bool) = match &column {
            Column::StartTime => (timestamps(trips, |t| t.start_time), false),
            Column::EndTime => (timestamps(trips, |t| t.end_time), false),
            Column::StartStation => (
                Arc::new(StringArray::from_iter_values(
                    trips.iter().map(|t| t.start_station.as_str()),
                )),
                false,
            ),
            Column::EndStation => (
                Arc::new(StringArray::from_iter_values(
                    trips.iter().map(|t| t.end_station.as_str()),
                )),
                false,
            ),
            Column::UserType => (optional_text(trips, |t| t.user_type.as_deref()), true),
            Column::Gender => (optional_text(trips, |t| t.gender.as_deref()), true),
            Column::BirthYear => (
                Arc::new(trips.iter().map(|t| t.birth_year).collect::<Int32Array>()),
                true,
            ),
            Column::Extra { slot, .. } => (
                optional_text(trips, |t| t.extra.get(*slot).and_then(|v| v.as_deref())),
                true,
            ),
            Column::StartHour => (
                Arc::new(UInt32Array::from_iter_values(trips.iter().map(|t| t.start_hour))),
                false,
            ),
            Column::Month => (
                Arc::new(UInt32Array::from_iter_values(trips.iter().map(|t| t.month))),
                false,
            ),
            Column::DayOfWeek => (
                Arc::new(StringArray::from_iter_values(trips.iter().map(|t| t.day_name()))),
                false,
            ),
            Column::TravelTime => (
                Arc::new(StringArray::from_iter_values(
                    trips.iter().map(|t| format_timedelta(t.travel_time)),
                )),
                false,
            ),
        };
        fields.push(Field::new(column.name(), array.data_type().clone(), nullable));
        arrays.push(array);
    }

    RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)
        .context("building record batch")
}

fn timestamps(trips: &[Trip], f: impl Fn(&Trip) -> chrono::NaiveDateTime) -> ArrayRef {
    Arc::new(StringArray::from_iter_values(
        trips.iter().map(|t| f(t).format(TIMESTAMP_FORMAT).to_string()),
    ))
}

fn optional_text<'a>(trips: &'a [Trip], f: impl Fn(&'a Trip) -> Option<&'a str>) -> ArrayRef {
    Arc::new(trips.iter().map(f).collect::<StringArray>())
}

/// Render `len` rows starting at `offset` as an ASCII table.
pub fn format_page(batch: &RecordBatch, offset: usize, len: usize) -> Result<String> {
    let page = batch.slice(offset, len);
    Ok(pretty_format_batches(&[page])
        .context("formatting sample page")?
        .to_string())
}

// ---------------------------------------------------------------------------
// File export
// ---------------------------------------------------------------------------

/// `BikeShare Data Export_<unix seconds>.<ext>`; the fractional timestamp
/// keeps repeated exports in one session apart.
pub fn export_file_name(format: ExportFormat, at: SystemTime) -> String {
    let secs = at
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or_default();
    format!("{EXPORT_PREFIX}{secs:.6}.{}", format.extension())
}

/// Exports trip tables to files.
pub struct Exporter;

impl Exporter {
    /// Write the whole table into `dir` and return the created path.
    pub fn export(dir: &Path, format: ExportFormat, table: &TripTable) -> Result<PathBuf> {
        let mut path = dir.join(export_file_name(format, SystemTime::now()));
        while path.exists() {
            path = dir.join(export_file_name(format, SystemTime::now()));
        }

        match format {
            ExportFormat::Csv => Self::export_csv(&path, &to_record_batch(table, "")?)?,
            ExportFormat::Json => Self::export_json(&path, &to_record_batch(table, "index")?)?,
            ExportFormat::Parquet => {
                Self::export_parquet(&path, &to_record_batch(table, "index")?)?
            }
        }

        log::info!("exported {} trips to {}", table.len(), path.display());
        Ok(path)
    }

    fn export_csv(path: &Path, batch: &RecordBatch) -> Result<()> {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        let mut writer = arrow::csv::WriterBuilder::new()
            .with_header(true)
            .build(BufWriter::new(file));
        writer.write(batch).context("writing CSV export")?;
        writer.into_inner().flush().context("flushing CSV export")?;
        Ok(())
    }

    fn export_json(path: &Path, batch: &RecordBatch) -> Result<()> {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        let mut writer = arrow::json::LineDelimitedWriter::new(BufWriter::new(file));
        writer.write_batches(&[batch]).context("writing JSON export")?;
        writer.finish().context("finishing JSON export")?;
        Ok(())
    }

    fn export_parquet(path: &Path, batch: &RecordBatch) -> Result<()> {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        let props = WriterProperties::builder()
            .set_compression(Compression::SNAPPY)
            .build();
        let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))
            .context("creating parquet writer")?;
        writer.write(batch).context("writing parquet export")?;
        writer.close().context("closing parquet writer")?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Interactive sample / export step
// ---------------------------------------------------------------------------

const INVALID: &str = "\nThat's not a valid selection! Please check and try again.";

/// Offer a paged preview or an export of `table`. Leaves the table untouched.
pub fn offer<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    config: &Config,
    table: &TripTable,
) -> crate::error::Result<()> {
    let action: SampleAction = prompter.choose(
        "\nWould you like to sample the data? Enter Y, N or export.\n",
        INVALID,
    )?;
    match action {
        SampleAction::Decline => Ok(()),
        SampleAction::Sample => sample(prompter, usize::from(config.page_size), table),
        SampleAction::Export => {
            let started = Instant::now();
            prompter.say("Exporting...")?;
            let path = Exporter::export(&config.export_dir, config.export_format, table)?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            prompter.say(format_args!("Export complete! Saved as {name}"))?;
            prompter.say(format_args!(
                "\nThis took {:.6} seconds.",
                started.elapsed().as_secs_f64()
            ))
        }
    }
}

fn sample<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    page_size: usize,
    table: &TripTable,
) -> crate::error::Result<()> {
    let batch = to_record_batch(table, "")?;
    let total = batch.num_rows();
    let mut offset = 0;

    while offset < total {
        let len = page_size.min(total - offset);
        prompter.say(format_page(&batch, offset, len)?)?;
        offset += len;
        if offset < total && !prompter.confirm("\nContinue sample? Y or N\n")? {
            return Ok(());
        }
    }
    prompter.say("End of data.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::City;
    use chrono::{NaiveDate, TimeDelta};
    use tempfile::TempDir;

    fn table(n: usize) -> TripTable {
        let start = NaiveDate::from_ymd_opt(2017, 6, 1)
            .and_then(|d| d.and_hms_opt(7, 30, 0))
            .unwrap();
        let trips = (0..n)
            .map(|i| {
                let mut t = Trip::new(
                    i * 2,
                    start,
                    start + TimeDelta::minutes(i as i64 + 1),
                    format!("Station {i}"),
                    "Union, Station".into(),
                );
                t.user_type = (i % 2 == 0).then(|| "Subscriber".to_string());
                t
            })
            .collect();
        TripTable {
            city: City::Washington,
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
    fn batch_has_index_source_and_derived_columns() {
        let batch = to_record_batch(&table(3), "").unwrap();
        assert_eq!(batch.num_rows(), 3);
        let names: Vec<String> = batch
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect();
        assert_eq!(
            names,
            vec![
                "",
                "Start Time",
                "End Time",
                "Start Station",
                "End Station",
                "User Type",
                "start_hour",
                "month",
                "day_of_week",
                "travel time"
            ]
        );
        assert_eq!(batch.column(5).null_count(), 1);
    }

    #[test]
    fn page_shows_only_the_requested_rows() {
        let batch = to_record_batch(&table(7), "").unwrap();
        let page = format_page(&batch, 5, 2).unwrap();
        assert!(page.contains("Station 5"));
        assert!(page.contains("Station 6"));
        assert!(!page.contains("Station 4"));
    }

    #[test]
    fn file_names_embed_the_timestamp() {
        let at = UNIX_EPOCH + std::time::Duration::from_millis(1_500_000_000_250);
        assert_eq!(
            export_file_name(ExportFormat::Csv, at),
            "BikeShare Data Export_1500000000.250000.csv"
        );
    }

    #[test]
    fn repeated_exports_create_distinct_files() {
        let dir = TempDir::new().unwrap();
        let t = table(2);
        let a = Exporter::export(dir.path(), ExportFormat::Csv, &t).unwrap();
        let b = Exporter::export(dir.path(), ExportFormat::Csv, &t).unwrap();
        assert_ne!(a, b);
        assert!(a.exists() && b.exists());
    }

    #[test]
    fn csv_export_has_unnamed_index_and_quotes_commas() {
        let dir = TempDir::new().unwrap();
        let path = Exporter::export(dir.path(), ExportFormat::Csv, &table(2)).unwrap();
        let text = std::fs::read_to_string(path).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some(",Start Time,End Time,Start Station,End Station,User Type,start_hour,month,day_of_week,travel time")
        );
        assert_eq!(
            lines.next(),
            Some("0,2017-06-01 07:30:00,2017-06-01 07:31:00,Station 0,\"Union, Station\",Subscriber,7,6,Thursday,0 days 00:01:00")
        );
        assert_eq!(
            lines.next(),
            Some("2,2017-06-01 07:30:00,2017-06-01 07:32:00,Station 1,\"Union, Station\",,7,6,Thursday,0 days 00:02:00")
        );
    }

    #[test]
    fn json_and_parquet_exports_are_written() {
        let dir = TempDir::new().unwrap();
        let json = Exporter::export(dir.path(), ExportFormat::Json, &table(3)).unwrap();
        assert_eq!(std::fs::read_to_string(&json).unwrap().lines().count(), 3);

        let parquet = Exporter::export(dir.path(), ExportFormat::Parquet, &table(3)).unwrap();
        assert!(std::fs::metadata(parquet).unwrap().len() > 0);
    }

    #[test]
    fn sample_pages_until_declined() {
        let input = "y\ny\nn\n";
        let mut prompter = Prompter::new(input.as_bytes(), Vec::new());
        let config = Config::default();
        offer(&mut prompter, &config, &table(12)).unwrap();
        let out = String::from_utf8(prompter.into_output()).unwrap();
        assert!(out.contains("Station 9"));
        assert!(!out.contains("Station 10"));
        assert!(!out.contains("End of data."));
    }

    #[test]
    fn sample_reaches_the_last_partial_page() {
        let input = "y\ny\n";
        let mut prompter = Prompter::new(input.as_bytes(), Vec::new());
        offer(&mut prompter, &Config::default(), &table(7)).unwrap();
        let out = String::from_utf8(prompter.into_output()).unwrap();
        assert!(out.contains("Station 6"));
        assert!(out.contains("End of data."));
    }

    #[test]
    fn invalid_answer_reprompts() {
        let mut prompter = Prompter::new("maybe\nn\n".as_bytes(), Vec::new());
        offer(&mut prompter, &Config::default(), &table(1)).unwrap();
        let out = String::from_utf8(prompter.into_output()).unwrap();
        assert_eq!(out.matches("That's not a valid selection!").count(), 1);
    }
}
