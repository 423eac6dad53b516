//! Soup command handlers.
//!
//! Soup-level commands validate the soup name before reaching the store;
//! registration also rejects an empty index spec list.

use soupstore_core::IndexSpec;
use soupstore_engine::SoupStore;
use tracing::debug;

use crate::bridge::{validate_index_specs, validate_soup_name};
use crate::convert::convert_result;
use crate::{Output, Result};

/// Handle GetDatabaseSize command.
pub fn get_database_size(store: &SoupStore) -> Result<Output> {
    let size = convert_result(store.get_database_size())?;
    Ok(Output::Uint(size as u64))
}

/// Handle RegisterSoup command.
pub fn register_soup(
    store: &mut SoupStore,
    soup_name: String,
    index_specs: Vec<IndexSpec>,
) -> Result<Output> {
    convert_result(validate_soup_name(&soup_name))?;
    convert_result(validate_index_specs(&index_specs))?;
    Ok(Output::SoupName(store.register_soup(&soup_name, index_specs)))
}

/// Handle RemoveSoup command.
pub fn remove_soup(store: &mut SoupStore, soup_name: String) -> Result<Output> {
    convert_result(validate_soup_name(&soup_name))?;
    convert_result(store.remove_soup(&soup_name))?;
    Ok(Output::Ok)
}

/// Handle ClearSoup command.
pub fn clear_soup(store: &mut SoupStore, soup_name: String) -> Result<Output> {
    convert_result(validate_soup_name(&soup_name))?;
    convert_result(store.clear_soup(&soup_name))?;
    Ok(Output::Ok)
}

/// Handle GetSoupIndexSpecs command.
pub fn get_soup_index_specs(store: &SoupStore, soup_name: String) -> Result<Output> {
    convert_result(validate_soup_name(&soup_name))?;
    let specs = convert_result(store.get_soup_index_specs(&soup_name))?;
    Ok(Output::IndexSpecs(specs))
}

/// Handle AlterSoup command.
pub fn alter_soup(
    store: &mut SoupStore,
    soup_name: String,
    index_specs: Vec<IndexSpec>,
    reindex_data: bool,
) -> Result<Output> {
    convert_result(validate_soup_name(&soup_name))?;
    convert_result(validate_index_specs(&index_specs))?;
    let name = convert_result(store.alter_soup(&soup_name, index_specs, reindex_data))?;
    Ok(Output::SoupName(name))
}

/// Handle ReIndexSoup command.
pub fn reindex_soup(store: &mut SoupStore, soup_name: String, paths: Vec<String>) -> Result<Output> {
    convert_result(validate_soup_name(&soup_name))?;
    let name = convert_result(store.reindex_soup(&soup_name, &paths))?;
    Ok(Output::SoupName(name))
}

/// Handle SoupExists command.
pub fn soup_exists(store: &SoupStore, soup_name: String) -> Result<Output> {
    convert_result(validate_soup_name(&soup_name))?;
    let exists = store.soup_exists(&soup_name);
    debug!(target: "soupstore::executor", soup = %soup_name, exists, "soupExists");
    Ok(Output::Bool(exists))
}
