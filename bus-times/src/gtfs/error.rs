//! GTFS static feed error types.

use std::path::PathBuf;

/// Errors that can occur when loading a GTFS static feed.
#[derive(Debug, thiserror::Error)]
pub enum GtfsError {
    /// Feed file could not be opened
    #[error("failed to open {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Feed file is not valid CSV or lacks a required column
    #[error("malformed {file}: {source}")]
    Csv {
        file: &'static str,
        source: csv::Error,
    },

    /// Time value is not in `H:MM:SS` form
    #[error("invalid GTFS time: {value:?}")]
    InvalidTime { value: String },

    /// Time value falls in a daylight-saving gap
    #[error("GTFS time {value} does not exist in the agency timezone")]
    NonexistentLocalTime { value: String },
}
