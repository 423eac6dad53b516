//! SoupStore struct: soup lifecycle and entry operations
//!
//! This module provides the main store struct. Index spec operations live in
//! `index`, queries in `query`, cursor paging in `cursor` and the JSON
//! snapshot in `persistence`; each adds an `impl SoupStore` block.
//!
//! ## Entry isolation
//!
//! Entries are owned by the store. Upserts take the caller's documents by
//! value and every read returns an owned clone, so callers can never mutate
//! stored documents by reference.
//!
//! ## Threading
//!
//! All methods are synchronous. Hosts that share a store across threads wrap
//! it in a [`StoreHandle`], which serializes every operation.

pub mod config;
mod registry;

pub use config::{StoreConfig, CONFIG_FILE_NAME};
pub use registry::{open_store, StoreHandle, StoreKey, StoreScope, OPEN_STORES};

use std::collections::BTreeMap;

use serde_json::Value;
use soupstore_core::entry::entry_id_of;
use soupstore_core::{
    value_to_text, CursorId, EntryId, IndexSpec, StoreError, StoreResult, SOUP_ENTRY_ID,
    SOUP_LAST_MODIFIED_DATE,
};
use tracing::{debug, info};

use crate::cursor::Cursor;
use crate::soup::Soup;

/// In-memory document store.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use soupstore_core::{IndexSpec, QuerySpec};
/// use soupstore_engine::SoupStore;
///
/// let mut store = SoupStore::new();
/// store.register_soup("contacts", vec![IndexSpec::string("Name")]);
/// store
///     .upsert_soup_entries("contacts", vec![json!({"Name": "Robot"})], "_soupEntryId")
///     .unwrap();
///
/// let cursor = store.query_soup("contacts", QuerySpec::exact("Name", "Robot", 10)).unwrap();
/// assert_eq!(cursor.total_entries, 1);
/// ```
#[derive(Debug, Clone)]
pub struct SoupStore {
    pub(crate) soups: BTreeMap<String, Soup>,
    pub(crate) cursors: BTreeMap<CursorId, Cursor>,
    pub(crate) next_cursor_id: CursorId,
    pub(crate) default_page_size: usize,
}

impl Default for SoupStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SoupStore {
    /// Create an empty store with default settings
    pub fn new() -> Self {
        Self::with_config(&StoreConfig::default())
    }

    /// Create an empty store using `config`
    pub fn with_config(config: &StoreConfig) -> Self {
        SoupStore {
            soups: BTreeMap::new(),
            cursors: BTreeMap::new(),
            next_cursor_id: 1,
            default_page_size: config.default_page_size.max(1),
        }
    }

    /// Drop every soup and cursor.
    pub fn reset(&mut self) {
        self.soups.clear();
        self.cursors.clear();
        self.next_cursor_id = 1;
        info!(target: "soupstore::store", "Store reset");
    }

    /// Page size applied to query specs without one
    pub fn default_page_size(&self) -> usize {
        self.default_page_size
    }

    // ========================================================================
    // Soup lookup
    // ========================================================================

    /// Soup by name, or `SoupNotFound`
    pub fn soup(&self, soup_name: &str) -> StoreResult<&Soup> {
        self.soups
            .get(soup_name)
            .ok_or_else(|| StoreError::soup_not_found(soup_name))
    }

    pub(crate) fn soup_mut(&mut self, soup_name: &str) -> StoreResult<&mut Soup> {
        self.soups
            .get_mut(soup_name)
            .ok_or_else(|| StoreError::soup_not_found(soup_name))
    }

    /// Whether `soup_name` is registered
    pub fn soup_exists(&self, soup_name: &str) -> bool {
        self.soups.contains_key(soup_name)
    }

    /// Registered soup names, sorted
    pub fn soup_names(&self) -> Vec<String> {
        self.soups.keys().cloned().collect()
    }

    // ========================================================================
    // Soup lifecycle
    // ========================================================================

    /// Register a soup. The first registration wins; registering an existing
    /// soup again leaves it untouched.
    pub fn register_soup(&mut self, soup_name: &str, index_specs: Vec<IndexSpec>) -> String {
        if !self.soups.contains_key(soup_name) {
            info!(
                target: "soupstore::store",
                soup = soup_name,
                indexes = index_specs.len(),
                "Soup registered"
            );
            self.soups
                .insert(soup_name.to_string(), Soup::new(soup_name, index_specs));
        }
        soup_name.to_string()
    }

    /// Drop a soup with its entries, index specs and counter.
    pub fn remove_soup(&mut self, soup_name: &str) -> StoreResult<()> {
        self.soups
            .remove(soup_name)
            .ok_or_else(|| StoreError::soup_not_found(soup_name))?;
        info!(target: "soupstore::store", soup = soup_name, "Soup removed");
        Ok(())
    }

    /// Empty a soup, keeping its registration, index specs and counter.
    pub fn clear_soup(&mut self, soup_name: &str) -> StoreResult<()> {
        self.soup_mut(soup_name)?.clear();
        info!(target: "soupstore::store", soup = soup_name, "Soup cleared");
        Ok(())
    }

    // ========================================================================
    // Entries
    // ========================================================================

    /// Insert or update entries.
    ///
    /// With `external_id_path` other than `_soupEntryId`, an entry whose
    /// typed projection at that path equals exactly one stored entry takes
    /// over its `_soupEntryId`. Entries are applied in order; when one fails
    /// the earlier ones stay applied and the rest of the batch is skipped.
    pub fn upsert_soup_entries(
        &mut self,
        soup_name: &str,
        entries: Vec<Value>,
        external_id_path: &str,
    ) -> StoreResult<Vec<Value>> {
        let by_external_id = external_id_path != SOUP_ENTRY_ID;
        let soup = self.soup_mut(soup_name)?;
        if by_external_id && !soup.has_index(external_id_path) {
            return Err(StoreError::invalid_index(soup_name, external_id_path));
        }

        let mut upserted = Vec::with_capacity(entries.len());
        for mut entry in entries {
            if !entry.is_object() {
                return Err(StoreError::malformed("soup entries must be JSON objects"));
            }
            let mut entry_id = entry_id_of(&entry).map_err(|_| {
                StoreError::malformed(format!("{} must be a non-negative integer", SOUP_ENTRY_ID))
            })?;

            if by_external_id {
                let external_id = soup.typed_projection(&entry, external_id_path);
                if !external_id.is_null() {
                    let matches = soup.ids_matching(external_id_path, &external_id);
                    match matches.as_slice() {
                        [] => {}
                        [existing] => entry_id = Some(*existing),
                        _ => {
                            return Err(StoreError::DuplicateExternalId {
                                path: external_id_path.to_string(),
                                value: value_to_text(&external_id),
                            })
                        }
                    }
                }
            }

            let id = match entry_id {
                Some(id) => {
                    soup.observe_id(id)?;
                    id
                }
                None => soup.allocate_id()?,
            };

            if let Some(fields) = entry.as_object_mut() {
                fields.insert(SOUP_ENTRY_ID.to_string(), Value::from(id));
                fields.insert(
                    SOUP_LAST_MODIFIED_DATE.to_string(),
                    Value::from(chrono::Utc::now().timestamp_millis()),
                );
            }
            soup.put(id, entry.clone());
            upserted.push(entry);
        }

        debug!(
            target: "soupstore::store",
            soup = soup_name,
            count = upserted.len(),
            external_id_path,
            "Entries upserted"
        );
        Ok(upserted)
    }

    /// Entries in request order; ids with no entry yield `None`.
    pub fn retrieve_soup_entries(
        &self,
        soup_name: &str,
        entry_ids: &[EntryId],
    ) -> StoreResult<Vec<Option<Value>>> {
        let soup = self.soup(soup_name)?;
        Ok(entry_ids.iter().map(|id| soup.get(*id).cloned()).collect())
    }

    /// Delete entries; unknown ids are ignored.
    pub fn remove_from_soup(&mut self, soup_name: &str, entry_ids: &[EntryId]) -> StoreResult<()> {
        let soup = self.soup_mut(soup_name)?;
        let removed = entry_ids.iter().filter(|id| soup.remove(**id)).count();
        debug!(
            target: "soupstore::store",
            soup = soup_name,
            requested = entry_ids.len(),
            removed,
            "Entries removed"
        );
        Ok(())
    }
}
