//! GTFS static feed loading.
//!
//! Reads the handful of tables the application needs from an extracted
//! feed directory: `stops.txt`, `routes.txt`, `trips.txt` and
//! `stop_times.txt`.

mod error;
mod schedule;
mod stops;
mod time;

pub use error::GtfsError;
pub use schedule::StaticSchedule;
pub use stops::StopDirectory;
pub use time::parse_static_time;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;

/// Open one table of the feed in `dir`.
fn open_table(dir: &Path, file: &'static str) -> Result<File, GtfsError> {
    let path = dir.join(file);
    File::open(&path).map_err(|source| GtfsError::Io { path, source })
}

/// Deserialize every row of a GTFS table.
///
/// Columns are matched by header name, so extra columns are ignored. A
/// leading byte-order mark, common in agency exports, is skipped.
fn read_table<T: DeserializeOwned>(
    file: &'static str,
    mut reader: impl Read,
) -> Result<Vec<T>, GtfsError> {
    let mut contents = String::new();
    reader
        .read_to_string(&mut contents)
        .map_err(|e| GtfsError::Csv {
            file,
            source: e.into(),
        })?;
    let contents = contents.strip_prefix('\u{feff}').unwrap_or(&contents);

    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(contents.as_bytes())
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(|source| GtfsError::Csv { file, source })
}
