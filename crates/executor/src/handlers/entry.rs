//! Entry command handlers.

use serde_json::Value;
use soupstore_core::EntryId;
use soupstore_engine::SoupStore;

use crate::bridge::validate_soup_name;
use crate::convert::convert_result;
use crate::{Output, Result};

/// Handle UpsertSoupEntries command.
pub fn upsert_soup_entries(
    store: &mut SoupStore,
    soup_name: String,
    entries: Vec<Value>,
    external_id_path: String,
) -> Result<Output> {
    convert_result(validate_soup_name(&soup_name))?;
    let stored = convert_result(store.upsert_soup_entries(&soup_name, entries, &external_id_path))?;
    Ok(Output::Entries(stored))
}

/// Handle RetrieveSoupEntries command.
pub fn retrieve_soup_entries(
    store: &SoupStore,
    soup_name: String,
    entry_ids: Vec<EntryId>,
) -> Result<Output> {
    convert_result(validate_soup_name(&soup_name))?;
    let entries = convert_result(store.retrieve_soup_entries(&soup_name, &entry_ids))?;
    Ok(Output::MaybeEntries(entries))
}

/// Handle RemoveFromSoup command.
pub fn remove_from_soup(
    store: &mut SoupStore,
    soup_name: String,
    entry_ids: Vec<EntryId>,
) -> Result<Output> {
    convert_result(validate_soup_name(&soup_name))?;
    convert_result(store.remove_from_soup(&soup_name, &entry_ids))?;
    Ok(Output::Ok)
}
