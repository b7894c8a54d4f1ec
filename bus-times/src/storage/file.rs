//! Disk-backed key-value store.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::KeyValueStore;
use super::error::StorageError;

/// On-disk layout of the store.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    entries: BTreeMap<String, String>,
}

/// Key-value store persisted as a single JSON file.
///
/// The whole file is read once on open and rewritten on every mutation,
/// so the file always reflects the last successful write.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`.
    ///
    /// A missing, empty or unparseable file yields an empty store; the
    /// unparseable one is replaced on the next write. A file that exists but
    /// cannot be read is an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();

        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "storage file not found, starting empty");
                String::new()
            }
            Err(e) => {
                return Err(StorageError::Io {
                    message: format!("failed to read {}: {}", path.display(), e),
                });
            }
        };

        let entries = if contents.trim().is_empty() {
            BTreeMap::new()
        } else {
            match serde_json::from_str::<StoreFile>(&contents) {
                Ok(file) => file.entries,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "ignoring corrupt storage file");
                    BTreeMap::new()
                }
            }
        };

        Ok(Self { path, entries })
    }

    /// Get the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the current entries to disk.
    ///
    /// Creates parent directories if they don't exist.
    fn flush(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::Io {
                message: format!("failed to create storage directory: {}", e),
            })?;
        }

        let file = StoreFile {
            entries: self.entries.clone(),
        };
        let json = serde_json::to_string_pretty(&file).map_err(|e| StorageError::Io {
            message: format!("failed to serialize store: {}", e),
        })?;

        std::fs::write(&self.path, json).map_err(|e| StorageError::Io {
            message: format!("failed to write {}: {}", self.path.display(), e),
        })
    }

    /// Apply a mutation, flush, and roll back the in-memory copy if the
    /// flush fails.
    fn write_through(
        &mut self,
        key: &str,
        mutate: impl FnOnce(&mut BTreeMap<String, String>),
    ) -> Result<(), StorageError> {
        let previous = self.entries.get(key).cloned();
        mutate(&mut self.entries);

        if let Err(e) = self.flush() {
            match previous {
                Some(old) => self.entries.insert(key.to_string(), old),
                None => self.entries.remove(key),
            };
            return Err(e);
        }

        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.write_through(key, |entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if !self.entries.contains_key(key) {
            return Ok(());
        }
        self.write_through(key, |entries| {
            entries.remove(key);
        })
    }
}
