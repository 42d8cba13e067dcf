//! Command-line configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Export file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Comma-separated values with a leading row-index column
    Csv,
    /// JSON Lines (one JSON object per row)
    Json,
    /// Apache Parquet columnar format
    Parquet,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "jsonl",
            ExportFormat::Parquet => "parquet",
        }
    }
}

/// Explore US bikeshare trip data interactively.
#[derive(Parser, Debug, Clone)]
#[command(name = "rusty-bikeshare")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Directory holding chicago.csv, new_york_city.csv and washington.csv
    #[arg(long = "data-dir", value_name = "DIR", default_value = ".")]
    pub data_dir: PathBuf,

    /// Directory exports are written to
    #[arg(long = "export-dir", value_name = "DIR", default_value = ".")]
    pub export_dir: PathBuf,

    /// Format used by the "export" answer
    #[arg(long = "export-format", value_enum, default_value = "csv")]
    pub export_format: ExportFormat,

    /// Rows shown per sample page
    #[arg(
        long = "page-size",
        default_value = "5",
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    pub page_size: u16,

    /// Enable verbose logging (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Default for Config {
    fn default() -> Self {
        Config::parse_from(["rusty-bikeshare"])
    }
}

impl Config {
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        }
    }
}
