//! Persistent favourites store.

use tracing::{debug, warn};

use crate::domain::StopId;
use crate::storage::KeyValueStore;

use super::set::{FavouriteSet, Toggled};

/// Storage key holding the serialized favourites object.
pub const FAVOURITES_KEY: &str = "favourites";

/// Read the persisted favourites.
///
/// Fails open: a missing entry, an unreadable store or a value that isn't a
/// valid favourites object all yield an empty set.
pub fn load_favourites<S: KeyValueStore + ?Sized>(storage: &S) -> FavouriteSet {
    let raw = match storage.get(FAVOURITES_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return FavouriteSet::new(),
        Err(e) => {
            debug!(error = %e, "failed to read favourites, starting empty");
            return FavouriteSet::new();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(set) => set,
        Err(e) => {
            debug!(error = %e, "ignoring malformed favourites");
            FavouriteSet::new()
        }
    }
}

/// Owns the favourites set and keeps the persisted copy in step with it.
///
/// Every mutation rewrites the whole set. If the write fails the mutation
/// still takes effect in memory, so the feature keeps working for the rest
/// of the session.
#[derive(Debug)]
pub struct FavouriteStore<S> {
    storage: S,
    set: FavouriteSet,
}

impl<S: KeyValueStore> FavouriteStore<S> {
    /// Create a store, loading whatever is already persisted.
    pub fn load(storage: S) -> Self {
        let set = load_favourites(&storage);
        debug!(count = set.len(), "loaded favourites");
        Self { storage, set }
    }

    /// Add `stop_id` if absent, remove it if present, then persist.
    pub fn toggle(&mut self, stop_id: &StopId, stop_name: &str) -> Toggled {
        let outcome = self.set.toggle(stop_id, stop_name);
        debug!(stop_id = %stop_id, ?outcome, "toggled favourite");
        self.persist();
        outcome
    }

    /// Whether `stop_id` is a favourite.
    pub fn contains(&self, stop_id: &StopId) -> bool {
        self.set.contains(stop_id)
    }

    /// The current favourites.
    pub fn favourites(&self) -> &FavouriteSet {
        &self.set
    }

    /// The backing store.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Mutable access to the backing store, for other per-origin settings.
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    fn persist(&mut self) {
        let json = match serde_json::to_string(&self.set) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "failed to serialize favourites");
                return;
            }
        };

        if let Err(e) = self.storage.set(FAVOURITES_KEY, &json) {
            warn!(
                error = %e,
                "failed to persist favourites, keeping changes in memory only"
            );
        }
    }
}
