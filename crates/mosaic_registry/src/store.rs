//! Shared storage media for the roster document.
//!
//! The medium is deliberately dumb: string keys, string payloads, no
//! transactions. Multiple processes read and write the same key; every
//! call is synchronous and atomic at the granularity of one payload.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;

/// Errors from a shared store backend.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backing medium rejected the operation.
    #[error("store backend failed: {0}")]
    Backend(String),
}

/// A shared string-keyed payload store - the localStorage of the system.
pub trait SharedStore: Send + Sync {
    /// Reads a payload, `None` if the key was never written.
    ///
    /// # Errors
    ///
    /// Fails if the backing medium is unreachable.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes a payload, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Fails if the backing medium is unreachable.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Deletes a key. Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Fails if the backing medium is unreachable.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// In-process store: every clone shares the same map.
///
/// This is what lets a simulation host many "windows" inside one process
/// and is the reference medium for tests.
#[derive(Clone, Default)]
pub struct MemoryStore {
    cells: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SharedStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.cells.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.cells.lock().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.cells.lock().remove(key);
        Ok(())
    }
}

/// File-backed store: one JSON file per key inside a directory.
///
/// The cross-process analog of the in-memory store. Writes are plain
/// whole-file replacements - best effort, last writer wins, exactly the
/// consistency the roster protocol is designed to tolerate.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Creates a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Fails if the directory cannot be created.
    pub fn new(dir: PathBuf) -> Result<Self, StoreError> {
        std::fs::create_dir_all(&dir).map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys are dotted identifiers; keep them filesystem-safe anyway.
        let safe: String =
            key.chars().map(|c| if c.is_alphanumeric() || c == '.' { c } else { '_' }).collect();
        self.dir.join(format!("{safe}.json"))
    }
}

impl SharedStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Backend(e.to_string())),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        std::fs::write(self.path_for(key), value).map_err(|e| StoreError::Backend(e.to_string()))
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Backend(e.to_string())),
        }
    }
}
