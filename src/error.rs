//! Error types for rusty-bikeshare.

use thiserror::Error;

/// Main error type for a bikeshare session.
#[derive(Error, Debug)]
pub enum Error {
    /// The user typed the exit sentinel (or stdin closed).
    #[error("exit requested")]
    Exit,

    /// City key outside the bundled datasets
    #[error("Unknown city: {0}")]
    UnknownCity(String),

    /// Console I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Loading or exporting trip data failed
    #[error("Data error: {0:#}")]
    Data(#[from] anyhow::Error),
}

impl Error {
    pub fn is_exit(&self) -> bool {
        matches!(self, Error::Exit)
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
