//! A soup: entries, index specs and the derived indexed-data table
//!
//! The indexed-data table maps each entry id to a row of
//! `indexed path -> typed value`. Rows are recomputed from the document on
//! every write, so a row always reflects the soup's current index specs.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

use serde_json::Value;
use soupstore_core::entry::is_virtual_path;
use soupstore_core::{
    project, EntryId, IndexSpec, IndexType, StoreError, StoreResult, SOUP_ENTRY_ID, SOUP_PATH,
};

/// Indexed values of one entry, keyed by index path.
pub type IndexedRow = BTreeMap<String, Value>;

/// A named collection of documents.
#[derive(Debug, Clone, PartialEq)]
pub struct Soup {
    pub(crate) name: String,
    pub(crate) entries: BTreeMap<EntryId, Value>,
    pub(crate) index_specs: Vec<IndexSpec>,
    pub(crate) indexed_data: BTreeMap<EntryId, IndexedRow>,
    pub(crate) next_entry_id: EntryId,
}

impl Soup {
    /// Create an empty soup
    pub fn new(name: impl Into<String>, index_specs: Vec<IndexSpec>) -> Self {
        Soup {
            name: name.into(),
            entries: BTreeMap::new(),
            index_specs,
            indexed_data: BTreeMap::new(),
            next_entry_id: 1,
        }
    }

    /// Soup name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current index specs, in registration order
    pub fn index_specs(&self) -> &[IndexSpec] {
        &self.index_specs
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the soup holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry by id
    pub fn get(&self, id: EntryId) -> Option<&Value> {
        self.entries.get(&id)
    }

    /// Entries in id order
    pub fn entries(&self) -> impl Iterator<Item = (EntryId, &Value)> {
        self.entries.iter().map(|(id, entry)| (*id, entry))
    }

    /// Entry ids in ascending order
    pub fn entry_ids(&self) -> impl Iterator<Item = EntryId> + '_ {
        self.entries.keys().copied()
    }

    /// Counter value the next inserted entry receives
    pub fn next_entry_id(&self) -> EntryId {
        self.next_entry_id
    }

    // ========================================================================
    // Index lookups
    // ========================================================================

    /// Index spec registered for `path`
    pub fn index_spec(&self, path: &str) -> Option<&IndexSpec> {
        self.index_specs.iter().find(|spec| spec.path == path)
    }

    /// Whether `path` has an index spec
    pub fn has_index(&self, path: &str) -> bool {
        self.index_spec(path).is_some()
    }

    /// Accept `_soup`, `_soupEntryId` and any indexed path.
    pub fn check_index(&self, path: &str) -> StoreResult<()> {
        if is_virtual_path(path) || self.has_index(path) {
            Ok(())
        } else {
            Err(StoreError::invalid_index(&self.name, path))
        }
    }

    /// Type a query key is coerced to before it is compared at `path`.
    pub fn key_type(&self, path: &str) -> Option<IndexType> {
        if path == SOUP_ENTRY_ID {
            return Some(IndexType::Integer);
        }
        self.index_spec(path).map(|spec| spec.index_type)
    }

    /// Coerce a query key to the type of the index at `path`.
    pub fn coerce_key(&self, path: &str, key: Value) -> Value {
        match self.key_type(path) {
            Some(index_type) => index_type.coerce(key),
            None => key,
        }
    }

    /// Indexed value of an entry at `path`.
    ///
    /// `_soup` yields the whole document and `_soupEntryId` the id; other
    /// paths read the indexed-data table (null when absent).
    pub fn indexed_value(&self, id: EntryId, path: &str) -> Cow<'_, Value> {
        match path {
            SOUP_PATH => match self.entries.get(&id) {
                Some(entry) => Cow::Borrowed(entry),
                None => Cow::Owned(Value::Null),
            },
            SOUP_ENTRY_ID => Cow::Owned(Value::from(id)),
            _ => match self.indexed_data.get(&id).and_then(|row| row.get(path)) {
                Some(value) => Cow::Borrowed(value),
                None => Cow::Owned(Value::Null),
            },
        }
    }

    /// Sort key of an entry: the indexed value when `path` is queryable,
    /// otherwise the raw projection of the document.
    pub fn sort_key(&self, id: EntryId, path: &str) -> Value {
        if is_virtual_path(path) || self.has_index(path) {
            return self.indexed_value(id, path).into_owned();
        }
        self.entries
            .get(&id)
            .map(|entry| project(entry, path))
            .unwrap_or(Value::Null)
    }

    /// Typed projection of a document at an indexed path.
    pub fn typed_projection(&self, document: &Value, path: &str) -> Value {
        let projected = project(document, path);
        self.coerce_key(path, projected)
    }

    /// Ids of entries whose indexed value at `path` equals `value`.
    pub fn ids_matching(&self, path: &str, value: &Value) -> Vec<EntryId> {
        self.entry_ids()
            .filter(|id| soupstore_core::values_equal(&self.indexed_value(*id, path), value))
            .collect()
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Take the next entry id from the counter.
    ///
    /// The counter never wraps; once it reaches `EntryId::MAX` the soup
    /// accepts no more new entries.
    pub(crate) fn allocate_id(&mut self) -> StoreResult<EntryId> {
        let id = self.next_entry_id;
        self.next_entry_id = id.checked_add(1).ok_or_else(|| {
            StoreError::malformed(format!("entry ids of soup {} are exhausted", self.name))
        })?;
        Ok(id)
    }

    /// Keep the counter ahead of a caller-supplied id.
    ///
    /// `EntryId::MAX` is rejected: no counter value lies past it.
    pub(crate) fn observe_id(&mut self, id: EntryId) -> StoreResult<()> {
        if id == EntryId::MAX {
            return Err(StoreError::malformed(format!(
                "{} must be below {}",
                SOUP_ENTRY_ID,
                EntryId::MAX
            )));
        }
        if id >= self.next_entry_id {
            self.next_entry_id = id + 1;
        }
        Ok(())
    }

    /// Insert or overwrite an entry and recompute its indexed row.
    pub(crate) fn put(&mut self, id: EntryId, entry: Value) {
        let row = self.index_row(&entry);
        self.entries.insert(id, entry);
        self.indexed_data.insert(id, row);
    }

    /// Delete an entry and its indexed row. Returns whether it existed.
    pub(crate) fn remove(&mut self, id: EntryId) -> bool {
        self.indexed_data.remove(&id);
        self.entries.remove(&id).is_some()
    }

    /// Drop every entry, keeping specs and the counter.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.indexed_data.clear();
    }

    /// Indexed row of a document under the current specs.
    pub(crate) fn index_row(&self, entry: &Value) -> IndexedRow {
        self.index_specs
            .iter()
            .map(|spec| {
                (
                    spec.path.clone(),
                    spec.index_type.coerce(project(entry, &spec.path)),
                )
            })
            .collect()
    }

    /// Replace the index specs and rebuild every indexed row.
    ///
    /// A `(path, type)` pair already present in the old specs keeps its
    /// stored value unless `reindex_all` is set.
    pub(crate) fn alter(&mut self, index_specs: Vec<IndexSpec>, reindex_all: bool) {
        let old_types: HashMap<String, IndexType> = self
            .index_specs
            .iter()
            .map(|spec| (spec.path.clone(), spec.index_type))
            .collect();
        self.index_specs = index_specs;

        let mut rebuilt = BTreeMap::new();
        for (id, entry) in &self.entries {
            let old_row = self.indexed_data.get(id);
            let row: IndexedRow = self
                .index_specs
                .iter()
                .map(|spec| {
                    let unchanged = old_types.get(&spec.path) == Some(&spec.index_type);
                    let kept = old_row.and_then(|row| row.get(&spec.path));
                    let value = match kept {
                        Some(value) if unchanged && !reindex_all => value.clone(),
                        _ => spec.index_type.coerce(project(entry, &spec.path)),
                    };
                    (spec.path.clone(), value)
                })
                .collect();
            rebuilt.insert(*id, row);
        }
        self.indexed_data = rebuilt;
    }

    /// Recompute the indexed values of `paths` for every entry.
    pub(crate) fn reindex(&mut self, paths: &[String]) {
        let specs: Vec<IndexSpec> = self
            .index_specs
            .iter()
            .filter(|spec| paths.contains(&spec.path))
            .cloned()
            .collect();
        if specs.is_empty() {
            return;
        }
        for (id, entry) in &self.entries {
            let row = self.indexed_data.entry(*id).or_default();
            for spec in &specs {
                row.insert(
                    spec.path.clone(),
                    spec.index_type.coerce(project(entry, &spec.path)),
                );
            }
        }
    }
}
