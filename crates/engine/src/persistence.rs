//! JSON snapshot of a whole store
//!
//! ## Layout
//!
//! ```text
//! {
//!   "soups":           { soup: { entryId: entry } },
//!   "soupIndexedData": { soup: { entryId: { path: value } } },
//!   "soupIndexSpecs":  { soup: [ {path, type} ] },
//!   "cursors":         { cursorId: cursor },
//!   "nextSoupEltIds":  { soup: nextEntryId },
//!   "nextCursorId":    nextCursorId
//! }
//! ```
//!
//! Map keys are decimal strings, as JSON requires.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use soupstore_core::{CursorId, EntryId, IndexSpec, StoreError, StoreResult};
use tracing::info;

use crate::cursor::Cursor;
use crate::slot::StorageSlot;
use crate::soup::{IndexedRow, Soup};
use crate::store::SoupStore;

fn first_id() -> u64 {
    1
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snapshot {
    #[serde(default)]
    soups: BTreeMap<String, BTreeMap<EntryId, Value>>,
    #[serde(default)]
    soup_indexed_data: BTreeMap<String, BTreeMap<EntryId, IndexedRow>>,
    #[serde(default)]
    soup_index_specs: BTreeMap<String, Vec<IndexSpec>>,
    #[serde(default)]
    cursors: BTreeMap<CursorId, Cursor>,
    #[serde(default)]
    next_soup_elt_ids: BTreeMap<String, EntryId>,
    #[serde(default = "first_id")]
    next_cursor_id: CursorId,
}

impl SoupStore {
    fn snapshot(&self) -> Snapshot {
        let mut snapshot = Snapshot {
            cursors: self.cursors.clone(),
            next_cursor_id: self.next_cursor_id,
            ..Snapshot::default()
        };
        for (name, soup) in &self.soups {
            snapshot.soups.insert(name.clone(), soup.entries.clone());
            snapshot
                .soup_indexed_data
                .insert(name.clone(), soup.indexed_data.clone());
            snapshot
                .soup_index_specs
                .insert(name.clone(), soup.index_specs.clone());
            snapshot
                .next_soup_elt_ids
                .insert(name.clone(), soup.next_entry_id);
        }
        snapshot
    }

    fn from_snapshot(&mut self, snapshot: Snapshot) {
        let Snapshot {
            mut soups,
            mut soup_indexed_data,
            soup_index_specs,
            cursors,
            next_soup_elt_ids,
            next_cursor_id,
        } = snapshot;

        let mut names: Vec<String> = soup_index_specs.keys().cloned().collect();
        names.extend(soups.keys().filter(|n| !soup_index_specs.contains_key(*n)).cloned());

        let mut restored = BTreeMap::new();
        for name in names {
            let mut soup = Soup::new(
                name.clone(),
                soup_index_specs.get(&name).cloned().unwrap_or_default(),
            );
            soup.entries = soups.remove(&name).unwrap_or_default();
            let mut rows = soup_indexed_data.remove(&name).unwrap_or_default();
            for (id, entry) in &soup.entries {
                let row = rows.remove(id).unwrap_or_else(|| soup.index_row(entry));
                soup.indexed_data.insert(*id, row);
            }
            let past_last = soup
                .entries
                .keys()
                .next_back()
                .map_or(1, |id| id.saturating_add(1));
            soup.next_entry_id = next_soup_elt_ids
                .get(&name)
                .copied()
                .unwrap_or(1)
                .max(past_last);
            restored.insert(name, soup);
        }

        let past_last_cursor = cursors
            .keys()
            .next_back()
            .map_or(1, |id| id.saturating_add(1));
        self.soups = restored;
        self.cursors = cursors;
        self.next_cursor_id = next_cursor_id.max(past_last_cursor);
    }

    /// Serialize the whole store.
    pub fn to_json(&self) -> StoreResult<String> {
        Ok(serde_json::to_string(&self.snapshot())?)
    }

    /// Replace the store's contents with a snapshot.
    ///
    /// The text is parsed completely before anything is replaced, so a
    /// corrupt snapshot leaves the store unchanged.
    pub fn from_json(&mut self, text: &str) -> StoreResult<()> {
        let snapshot: Snapshot = serde_json::from_str(text)?;
        self.from_snapshot(snapshot);
        Ok(())
    }

    /// Byte length of the serialized store
    pub fn get_database_size(&self) -> StoreResult<usize> {
        Ok(self.to_json()?.len())
    }

    /// Write the snapshot to `slot` under `key`.
    pub fn persist_to<S: StorageSlot + ?Sized>(&self, slot: &S, key: &str) -> StoreResult<()> {
        let text = self.to_json()?;
        slot.save(key, &text)?;
        info!(
            target: "soupstore::persistence",
            key,
            bytes = text.len(),
            soups = self.soups.len(),
            "Store persisted"
        );
        Ok(())
    }

    /// Load the snapshot saved under `key`. Returns `false` and leaves the
    /// store untouched when the slot holds nothing for the key.
    pub fn restore_from<S: StorageSlot + ?Sized>(&mut self, slot: &S, key: &str) -> StoreResult<bool> {
        let Some(text) = slot.load(key)? else {
            return Ok(false);
        };
        self.from_json(&text).map_err(|e| match e {
            StoreError::Serialization(reason) => {
                StoreError::Serialization(format!("snapshot '{}': {}", key, reason))
            }
            other => other,
        })?;
        info!(
            target: "soupstore::persistence",
            key,
            soups = self.soups.len(),
            cursors = self.cursors.len(),
            "Store restored"
        );
        Ok(true)
    }
}
