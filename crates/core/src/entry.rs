//! System fields stamped onto every soup entry.

use serde_json::Value;

/// Identifier of an entry within its soup. Assigned from a per-soup counter
/// that starts at 1 and is never reused.
pub type EntryId = u64;

/// Field holding the entry id. Also accepted as an index path.
pub const SOUP_ENTRY_ID: &str = "_soupEntryId";

/// Field holding the last upsert time in milliseconds since the epoch.
pub const SOUP_LAST_MODIFIED_DATE: &str = "_soupLastModifiedDate";

/// Pseudo path selecting the whole document.
pub const SOUP_PATH: &str = "_soup";

/// Paths that are always queryable without an index spec.
pub fn is_virtual_path(path: &str) -> bool {
    path == SOUP_PATH || path == SOUP_ENTRY_ID
}

/// Read `_soupEntryId` from a document, if present.
///
/// Returns `Err(())` when the field exists but is not a non-negative integer.
#[allow(clippy::result_unit_err)]
pub fn entry_id_of(document: &Value) -> Result<Option<EntryId>, ()> {
    match document.get(SOUP_ENTRY_ID) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value.as_u64().map(Some).ok_or(()),
    }
}
