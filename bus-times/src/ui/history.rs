//! Session history with query-string handling.

use std::fmt;

use tracing::{debug, trace};

use crate::domain::StopId;

use super::{Navigation, STOP_ID_PARAM};

/// A same-origin URL: path plus decoded query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    path: String,
    query: Vec<(String, String)>,
}

impl Location {
    /// Parse a path-and-query string such as `/?stop_id=101`.
    ///
    /// Any `#fragment` is dropped. Parameters without `=` get an empty value.
    pub fn parse(url: &str) -> Self {
        let url = url.split('#').next().unwrap_or_default();
        let (path, query) = url.split_once('?').unwrap_or((url, ""));

        let query = serde_urlencoded::from_str::<Vec<(String, String)>>(query)
            .unwrap_or_else(|e| {
                debug!(error = %e, "ignoring undecodable query string");
                Vec::new()
            });

        let path = if path.is_empty() { "/" } else { path };

        Self {
            path: path.to_string(),
            query,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// First value of the query parameter `name`.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// A copy with `name` set to `value`, replacing any existing values.
    pub fn with_param(&self, name: &str, value: &str) -> Self {
        let mut query: Vec<(String, String)> = self
            .query
            .iter()
            .filter(|(n, _)| n != name)
            .cloned()
            .collect();
        query.push((name.to_string(), value.to_string()));

        Self {
            path: self.path.clone(),
            query,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        if !self.query.is_empty() {
            let query = serde_urlencoded::to_string(&self.query).map_err(|_| fmt::Error)?;
            write!(f, "?{}", query)?;
        }
        Ok(())
    }
}

/// In-memory session history.
///
/// There is always a current entry. Pushing an entry discards anything ahead
/// of the current position, the way `history.pushState` does after
/// navigating back.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Location>,
    index: usize,
}

impl History {
    /// Start a history at `initial`.
    pub fn new(initial: Location) -> Self {
        Self {
            entries: vec![initial],
            index: 0,
        }
    }

    /// The current entry.
    pub fn current(&self) -> &Location {
        &self.entries[self.index]
    }

    /// Add an entry after the current one and make it current.
    pub fn push(&mut self, location: Location) {
        self.entries.truncate(self.index + 1);
        self.entries.push(location);
        self.index = self.entries.len() - 1;
    }

    /// Move forward one entry, if there is one.
    pub fn forward(&mut self) -> bool {
        if self.index + 1 < self.entries.len() {
            self.index += 1;
            true
        } else {
            false
        }
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(Location::parse("/"))
    }
}

impl Navigation for History {
    fn current_stop_id(&self) -> Option<StopId> {
        let raw = self.current().param(STOP_ID_PARAM)?;
        StopId::parse(raw).ok()
    }

    fn push_stop_id(&mut self, stop_id: &StopId) {
        let next = self.current().with_param(STOP_ID_PARAM, stop_id.as_str());
        trace!(url = %next, "pushing history entry");
        self.push(next);
    }

    fn back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }
}
