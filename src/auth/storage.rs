//! Key-value storage primitives backing the session store.
//!
//! [`KeyValueStore`] is the synchronous get/set/remove contract the host
//! storage offers. Two implementations ship with the crate:
//!
//! - [`MemoryStore`]: process-local, lost on exit
//! - [`FileStore`]: a JSON document on disk that survives restarts
//!
//! Values are JSON so identity records and flags can be stored next to the
//! token without a second serialization layer.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use serde_json::{Map, Value};
use thiserror::Error;

/// Errors raised by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("Storage I/O error at '{}': {source}", path.display())]
    Io {
        /// The file being accessed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The stored document is not valid JSON.
    #[error("Storage document is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A lock guarding the store was poisoned by a panicking writer.
    #[error("Storage lock poisoned")]
    Poisoned,
}

impl<T> From<PoisonError<T>> for StorageError {
    fn from(_: PoisonError<T>) -> Self {
        Self::Poisoned
    }
}

/// Synchronous key-value storage.
///
/// Batched operations default to one call per key; backends that can apply
/// a batch atomically should override them.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`.
    fn get(&self, key: &str) -> Option<Value>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the value cannot be persisted.
    fn set(&self, key: &str, value: Value) -> Result<(), StorageError>;

    /// Removes `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the removal cannot be persisted.
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Stores several entries.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if any entry cannot be persisted.
    fn set_many(&self, entries: Vec<(&str, Value)>) -> Result<(), StorageError> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }

    /// Removes several keys.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if any removal cannot be persisted.
    fn remove_many(&self, keys: &[&str]) -> Result<(), StorageError> {
        for key in keys {
            self.remove(key)?;
        }
        Ok(())
    }
}

/// In-memory storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        self.entries.write()?.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.write()?.remove(key);
        Ok(())
    }

    fn set_many(&self, entries: Vec<(&str, Value)>) -> Result<(), StorageError> {
        let mut guard = self.entries.write()?;
        for (key, value) in entries {
            guard.insert(key.to_string(), value);
        }
        Ok(())
    }

    fn remove_many(&self, keys: &[&str]) -> Result<(), StorageError> {
        let mut guard = self.entries.write()?;
        for key in keys {
            guard.remove(*key);
        }
        Ok(())
    }
}

/// File-backed storage.
///
/// The whole store is one JSON object. It is loaded once on
/// [`open`](Self::open) and rewritten on every mutation by writing a
/// sibling temporary file and renaming it over the original, so a crash
/// mid-write leaves either the old or the new document.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: RwLock<Map<String, Value>>,
}

impl FileStore {
    /// Opens the store at `path`, creating an empty one if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the file exists but cannot be read,
    /// and [`StorageError::Serialization`] if it does not hold a JSON object.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => Map::new(),
            Ok(text) => serde_json::from_str(&text)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Map::new(),
            Err(source) => return Err(StorageError::Io { path, source }),
        };

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Returns the path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &Map<String, Value>) -> Result<(), StorageError> {
        let text = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("tmp");
        let io_err = |source: io::Error| StorageError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }
        fs::write(&tmp, text).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)
    }

    fn mutate(&self, apply: impl FnOnce(&mut Map<String, Value>)) -> Result<(), StorageError> {
        let mut guard = self.entries.write()?;
        let mut next = guard.clone();
        apply(&mut next);
        self.flush(&next)?;
        *guard = next;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        self.mutate(|entries| {
            entries.insert(key.to_string(), value);
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.mutate(|entries| {
            entries.remove(key);
        })
    }

    fn set_many(&self, items: Vec<(&str, Value)>) -> Result<(), StorageError> {
        self.mutate(|entries| {
            for (key, value) in items {
                entries.insert(key.to_string(), value);
            }
        })
    }

    fn remove_many(&self, keys: &[&str]) -> Result<(), StorageError> {
        self.mutate(|entries| {
            for key in keys {
                entries.remove(*key);
            }
        })
    }
}

// Verify stores are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<MemoryStore>();
    assert_send_sync::<FileStore>();
};
