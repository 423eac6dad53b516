//! Global store registry for singleton management
//!
//! Ensures only one store instance exists per name and scope. Uses weak
//! references so a store is released when all handles are dropped.

use once_cell::sync::Lazy;
use parking_lot::{Mutex, MutexGuard};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Weak};
use tracing::{info, warn};

use soupstore_core::StoreResult;

use super::{SoupStore, StoreConfig};
use crate::slot::FileSlot;

// =============================================================================
// Global Store Registry
// =============================================================================
//
// Opening the same key twice returns the same handle, so every caller of a
// named store sees the same soups and cursors. Entries hold weak references
// and are removed when the last handle drops.

/// Global registry of open stores (key -> weak reference)
pub static OPEN_STORES: Lazy<Mutex<HashMap<StoreKey, Weak<StoreHandle>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Visibility of a named store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreScope {
    /// Per-user store
    User,
    /// Store shared by all users of the process
    Global,
}

impl StoreScope {
    /// Lowercase name used in slot keys
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreScope::User => "user",
            StoreScope::Global => "global",
        }
    }
}

/// Registry key of a named store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoreKey {
    /// Store name
    pub name: String,
    /// Store scope
    pub scope: StoreScope,
}

impl StoreKey {
    /// Key of a user store
    pub fn user(name: impl Into<String>) -> Self {
        StoreKey {
            name: name.into(),
            scope: StoreScope::User,
        }
    }

    /// Key of a global store
    pub fn global(name: impl Into<String>) -> Self {
        StoreKey {
            name: name.into(),
            scope: StoreScope::Global,
        }
    }

    /// Key the snapshot is saved under in a storage slot.
    pub fn slot_key(&self) -> String {
        format!("{}.{}", self.name, self.scope.as_str())
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.slot_key())
    }
}

/// Shared, lockable store.
///
/// Every operation locks the store for its whole duration. A handle opened
/// with a data directory writes its snapshot on [`flush`](Self::flush) and
/// when it is dropped.
pub struct StoreHandle {
    key: StoreKey,
    store: Mutex<SoupStore>,
    slot: Option<FileSlot>,
}

impl StoreHandle {
    /// Handle outside the registry with no persistence.
    pub fn ephemeral(store: SoupStore) -> Arc<Self> {
        Arc::new(StoreHandle {
            key: StoreKey::user(""),
            store: Mutex::new(store),
            slot: None,
        })
    }

    /// Registry key
    pub fn key(&self) -> &StoreKey {
        &self.key
    }

    /// Whether the handle writes snapshots
    pub fn is_persistent(&self) -> bool {
        self.slot.is_some()
    }

    /// Lock the store.
    pub fn lock(&self) -> MutexGuard<'_, SoupStore> {
        self.store.lock()
    }

    /// Write the current snapshot to the handle's slot, if it has one.
    pub fn flush(&self) -> StoreResult<()> {
        match &self.slot {
            Some(slot) => self.store.lock().persist_to(slot, &self.key.slot_key()),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for StoreHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreHandle")
            .field("key", &self.key)
            .field("persistent", &self.is_persistent())
            .finish()
    }
}

impl Drop for StoreHandle {
    fn drop(&mut self) {
        // Held across the final flush so a reopen of the key restores it.
        let mut registry = OPEN_STORES.lock();
        if let Err(e) = self.flush() {
            warn!(target: "soupstore::registry", key = %self.key, error = %e, "Final flush failed");
        }

        let this: *const StoreHandle = self;
        let registered = registry
            .get(&self.key)
            .map_or(false, |weak| std::ptr::eq(weak.as_ptr(), this));
        if registered {
            registry.remove(&self.key);
        }
    }
}

/// Open the store registered under `key`, creating it on first use.
///
/// A new store takes its page size from `config`. When `config.data_dir` is
/// set it is restored from the snapshot in that directory and flushed back on
/// drop.
pub fn open_store(key: StoreKey, config: &StoreConfig) -> StoreResult<Arc<StoreHandle>> {
    config.validate()?;
    let mut registry = OPEN_STORES.lock();

    // A dead entry belongs to a handle whose drop has not taken the lock
    // yet; wait for its final flush to remove it.
    while let Some(weak) = registry.get(&key) {
        if let Some(handle) = weak.upgrade() {
            info!(target: "soupstore::registry", key = %key, "Returning existing store instance");
            return Ok(handle);
        }
        MutexGuard::unlocked(&mut registry, std::thread::yield_now);
    }

    let mut store = SoupStore::with_config(config);
    let slot = config.data_dir.as_ref().map(FileSlot::new);
    if let Some(slot) = &slot {
        store.restore_from(slot, &key.slot_key())?;
    }

    let handle = Arc::new(StoreHandle {
        key: key.clone(),
        store: Mutex::new(store),
        slot,
    });
    registry.insert(key.clone(), Arc::downgrade(&handle));
    info!(
        target: "soupstore::registry",
        key = %key,
        persistent = handle.is_persistent(),
        "Store opened"
    );
    Ok(handle)
}
