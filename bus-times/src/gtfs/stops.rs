//! Stop lookup and search.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::config::MAX_SUGGESTIONS;
use crate::domain::{Stop, StopId};
use crate::ui::Autocomplete;

use super::error::GtfsError;
use super::{open_table, read_table};

const STOPS_FILE: &str = "stops.txt";

#[derive(Debug, Deserialize)]
struct StopRecord {
    stop_id: String,
    stop_name: String,
}

/// All stops in the feed, in file order.
#[derive(Debug, Clone, Default)]
pub struct StopDirectory {
    stops: Vec<Stop>,
    index: HashMap<StopId, usize>,
}

impl StopDirectory {
    /// Build a directory from stops. Later duplicates of an ID are dropped.
    pub fn from_stops(stops: impl IntoIterator<Item = Stop>) -> Self {
        let mut directory = Self::default();
        for stop in stops {
            if directory.index.contains_key(&stop.id) {
                debug!(stop_id = %stop.id, "skipping duplicate stop");
                continue;
            }
            directory
                .index
                .insert(stop.id.clone(), directory.stops.len());
            directory.stops.push(stop);
        }
        directory
    }

    /// Read `stops.txt` content.
    pub fn from_reader(reader: impl Read) -> Result<Self, GtfsError> {
        let records: Vec<StopRecord> = read_table(STOPS_FILE, reader)?;
        let stops = records.into_iter().filter_map(|r| match StopId::parse(&r.stop_id) {
            Ok(id) => Some(Stop::new(id, r.stop_name)),
            Err(e) => {
                debug!(stop_id = %r.stop_id, error = %e, "skipping stop");
                None
            }
        });
        Ok(Self::from_stops(stops))
    }

    /// Load `stops.txt` from an extracted feed directory.
    pub fn load(dir: &Path) -> Result<Self, GtfsError> {
        Self::from_reader(open_table(dir, STOPS_FILE)?)
    }

    /// Look up a stop by ID.
    pub fn lookup(&self, stop_id: &StopId) -> Option<&Stop> {
        self.index.get(stop_id).map(|&i| &self.stops[i])
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}

impl Autocomplete for StopDirectory {
    /// Stops whose name contains `query`, ignoring case, in file order.
    fn suggest(&self, query: &str) -> Vec<Stop> {
        let query = query.to_lowercase();
        self.stops
            .iter()
            .filter(|s| s.name.to_lowercase().contains(&query))
            .take(MAX_SUGGESTIONS)
            .cloned()
            .collect()
    }
}
