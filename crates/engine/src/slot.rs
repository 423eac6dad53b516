//! Storage slots holding serialized store snapshots
//!
//! A slot is a string key/value space. The store writes its whole JSON
//! snapshot under one key and reads it back on restore.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use soupstore_core::{StoreError, StoreResult};

/// Key/value space for store snapshots.
pub trait StorageSlot: Send + Sync {
    /// Text stored under `key`, or `None` when nothing was saved yet.
    fn load(&self, key: &str) -> StoreResult<Option<String>>;

    /// Replace the text stored under `key`.
    fn save(&self, key: &str, text: &str) -> StoreResult<()>;
}

/// Slot kept in process memory.
#[derive(Debug, Default)]
pub struct MemorySlot {
    values: Mutex<HashMap<String, String>>,
}

impl MemorySlot {
    /// Create an empty slot
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageSlot for MemorySlot {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.values.lock().get(key).cloned())
    }

    fn save(&self, key: &str, text: &str) -> StoreResult<()> {
        self.values.lock().insert(key.to_string(), text.to_string());
        Ok(())
    }
}

/// Slot backed by a directory with one `<key>.json` file per key.
#[derive(Debug, Clone)]
pub struct FileSlot {
    dir: PathBuf,
}

impl FileSlot {
    /// Slot over `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileSlot { dir: dir.into() }
    }

    /// Directory holding the snapshot files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File a key is stored in
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl StorageSlot for FileSlot {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(format!(
                "Failed to read snapshot '{}': {}",
                path.display(),
                e
            ))),
        }
    }

    fn save(&self, key: &str, text: &str) -> StoreResult<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        // Sibling file, then rename over the snapshot.
        let tmp = self.dir.join(format!("{}.json.tmp", key));
        std::fs::write(&tmp, text).map_err(|e| {
            StoreError::Io(format!("Failed to write snapshot '{}': {}", tmp.display(), e))
        })?;
        std::fs::rename(&tmp, &path).map_err(|e| {
            StoreError::Io(format!(
                "Failed to replace snapshot '{}': {}",
                path.display(),
                e
            ))
        })
    }
}
