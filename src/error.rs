use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the bikeshare explorer core.
#[derive(Error, Debug)]
pub enum BikeshareError {
    /// The city name is not one of the cities we have data for.
    #[error("Unknown city: {0}")]
    InvalidCity(String),

    /// The month name is not in the dataset's month range (and not "all").
    #[error("Unknown month: {0}")]
    InvalidMonth(String),

    /// The day name is not a day of the week (and not "all").
    #[error("Unknown day: {0}")]
    InvalidDay(String),

    /// A Start Time cell did not parse as a timestamp.
    #[error("Invalid start time {value:?} in row {row}")]
    Timestamp { row: usize, value: String },

    /// A city CSV could not be opened.
    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A row could not be deserialized from the CSV.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BikeshareError>;
