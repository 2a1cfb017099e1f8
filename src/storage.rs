//! Storage
//!
//! The durable key-value seam the cart persists through. Backends store whole
//! serialized snapshots as strings under a fixed key; the cart treats them as
//! best-effort and never lets their failures escape to callers.

use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::Mutex,
};

use mockall::automock;
use rustc_hash::FxHashMap;
use thiserror::Error;

/// Errors surfaced by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing file could not be read or written.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// The backend rejected or lost the operation.
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

/// A string key-value store with `localStorage`-shaped semantics.
#[automock]
pub trait CartStorage: Send + Sync {
    /// Fetch the value stored under `key`, or `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend could not be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend could not be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory storage for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<FxHashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self
            .entries
            .lock()
            .map_err(|err| StorageError::Unavailable(err.to_string()))?;

        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|err| StorageError::Unavailable(err.to_string()))?;

        entries.insert(key.to_owned(), value.to_owned());

        Ok(())
    }
}

/// File-backed storage, one JSON file per key under a root directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Create a store rooted at `root`. The directory is created lazily on
    /// first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key).with_extension("json")
    }

    /// The directory this store writes under.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl CartStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root)?;
        fs::write(self.path_for(key), value)?;

        Ok(())
    }
}
