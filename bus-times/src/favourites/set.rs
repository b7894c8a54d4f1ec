//! The favourite stops mapping.

use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::StopId;

/// A single favourite stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavouriteEntry {
    pub stop_id: StopId,
    pub stop_name: String,
}

/// Outcome of toggling a stop's membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggled {
    Added,
    Removed,
}

/// Mapping from stop ID to stop name, unique by stop ID.
///
/// Entries keep insertion order, which is also the order of keys in the
/// persisted JSON object. Sets are small (a handful of stops), so lookups
/// are linear scans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavouriteSet {
    entries: Vec<FavouriteEntry>,
}

impl FavouriteSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `stop_id` is a favourite.
    pub fn contains(&self, stop_id: &StopId) -> bool {
        self.position(stop_id).is_some()
    }

    /// The stored display name for `stop_id`.
    pub fn name(&self, stop_id: &StopId) -> Option<&str> {
        self.position(stop_id)
            .map(|i| self.entries[i].stop_name.as_str())
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &FavouriteEntry> {
        self.entries.iter()
    }

    /// Insert or rename an entry. Existing entries keep their position.
    ///
    /// Returns `true` if the stop was not previously present.
    pub fn insert(&mut self, stop_id: StopId, stop_name: impl Into<String>) -> bool {
        let stop_name = stop_name.into();
        match self.position(&stop_id) {
            Some(i) => {
                self.entries[i].stop_name = stop_name;
                false
            }
            None => {
                self.entries.push(FavouriteEntry { stop_id, stop_name });
                true
            }
        }
    }

    /// Remove an entry, returning it if it was present.
    pub fn remove(&mut self, stop_id: &StopId) -> Option<FavouriteEntry> {
        self.position(stop_id).map(|i| self.entries.remove(i))
    }

    /// Remove `stop_id` if present, otherwise add it with `stop_name`.
    pub fn toggle(&mut self, stop_id: &StopId, stop_name: &str) -> Toggled {
        if self.remove(stop_id).is_some() {
            Toggled::Removed
        } else {
            self.entries.push(FavouriteEntry {
                stop_id: stop_id.clone(),
                stop_name: stop_name.to_string(),
            });
            Toggled::Added
        }
    }

    fn position(&self, stop_id: &StopId) -> Option<usize> {
        self.entries.iter().position(|e| &e.stop_id == stop_id)
    }
}

impl Serialize for FavouriteSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(entry.stop_id.as_str(), &entry.stop_name)?;
        }
        map.end()
    }
}

struct FavouriteSetVisitor;

impl<'de> Visitor<'de> for FavouriteSetVisitor {
    type Value = FavouriteSet;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object mapping stop IDs to stop names")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<FavouriteSet, A::Error> {
        let mut set = FavouriteSet::new();
        while let Some((key, name)) = access.next_entry::<String, String>()? {
            let stop_id = StopId::parse(&key).map_err(de::Error::custom)?;
            // Later duplicates win, as with JSON.parse
            set.insert(stop_id, name);
        }
        Ok(set)
    }
}

impl<'de> Deserialize<'de> for FavouriteSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(FavouriteSetVisitor)
    }
}
