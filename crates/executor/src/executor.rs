//! The Executor - single entry point to the store engine.
//!
//! The Executor is a stateless dispatcher that routes commands to the
//! handlers and converts results to outputs.

use std::sync::Arc;

use serde_json::Value;
use soupstore_engine::{open_store, SoupStore, StoreConfig, StoreHandle, StoreKey};
use tracing::debug;

use crate::bridge::decode_action;
use crate::convert::convert_result;
use crate::handlers::{entry, query, soup};
use crate::{Command, Output, Result};

/// The command executor - single entry point to the store engine.
///
/// The Executor holds a handle to a shared store but no state of its own.
/// Each command locks the store for its whole duration, so commands from
/// different threads never interleave.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use soupstore_executor::{Command, Executor, Output};
///
/// let executor = Executor::ephemeral();
/// executor
///     .call("registerSoup", &[json!("contacts"), json!([{"path": "Name", "type": "string"}])])
///     .unwrap();
///
/// let results = executor.execute_many(vec![
///     Command::SoupExists { soup_name: "contacts".into() },
///     Command::SoupExists { soup_name: "accounts".into() },
/// ]);
/// assert_eq!(results[0], Ok(Output::Bool(true)));
/// assert_eq!(results[1], Ok(Output::Bool(false)));
/// ```
#[derive(Debug, Clone)]
pub struct Executor {
    store: Arc<StoreHandle>,
}

impl Executor {
    /// Create a new executor over a shared store handle.
    pub fn new(store: Arc<StoreHandle>) -> Self {
        Self { store }
    }

    /// Executor over a fresh in-memory store outside the registry.
    pub fn ephemeral() -> Self {
        Self::new(StoreHandle::ephemeral(SoupStore::new()))
    }

    /// Executor over the registered store named by `key`.
    pub fn open(key: StoreKey, config: &StoreConfig) -> Result<Self> {
        Ok(Self::new(convert_result(open_store(key, config))?))
    }

    /// The store handle this executor dispatches to
    pub fn store(&self) -> &Arc<StoreHandle> {
        &self.store
    }

    /// Execute a single command.
    ///
    /// Returns the command result or an error.
    pub fn execute(&self, cmd: Command) -> Result<Output> {
        let name = cmd.name();
        let write = cmd.is_write();
        let mut store = self.store.lock();

        let result = match cmd {
            Command::GetDatabaseSize => soup::get_database_size(&store),

            // Soup commands
            Command::RegisterSoup {
                soup_name,
                index_specs,
            } => soup::register_soup(&mut store, soup_name, index_specs),
            Command::RemoveSoup { soup_name } => soup::remove_soup(&mut store, soup_name),
            Command::ClearSoup { soup_name } => soup::clear_soup(&mut store, soup_name),
            Command::GetSoupIndexSpecs { soup_name } => {
                soup::get_soup_index_specs(&store, soup_name)
            }
            Command::AlterSoup {
                soup_name,
                index_specs,
                reindex_data,
            } => soup::alter_soup(&mut store, soup_name, index_specs, reindex_data),
            Command::ReIndexSoup { soup_name, paths } => {
                soup::reindex_soup(&mut store, soup_name, paths)
            }
            Command::SoupExists { soup_name } => soup::soup_exists(&store, soup_name),

            // Entry commands
            Command::RetrieveSoupEntries {
                soup_name,
                entry_ids,
            } => entry::retrieve_soup_entries(&store, soup_name, entry_ids),
            Command::UpsertSoupEntries {
                soup_name,
                entries,
                external_id_path,
            } => entry::upsert_soup_entries(&mut store, soup_name, entries, external_id_path),
            Command::RemoveFromSoup {
                soup_name,
                entry_ids,
            } => entry::remove_from_soup(&mut store, soup_name, entry_ids),

            // Query commands
            Command::QuerySoup {
                soup_name,
                query_spec,
            } => query::query_soup(&mut store, soup_name, query_spec),
            Command::RunSmartQuery { query_spec } => query::run_smart_query(&mut store, query_spec),
            Command::MoveCursorToPageIndex {
                cursor_id,
                page_index,
            } => query::move_cursor_to_page_index(&mut store, cursor_id, page_index),
            Command::CloseCursor { cursor_id } => query::close_cursor(&mut store, cursor_id),
        };

        match &result {
            Ok(_) => debug!(target: "soupstore::executor", command = name, write, "Command executed"),
            Err(e) => debug!(
                target: "soupstore::executor",
                command = name,
                kind = e.kind(),
                error = %e,
                "Command failed"
            ),
        }
        result
    }

    /// Execute commands in order, returning one result per command.
    ///
    /// A failing command does not stop the ones after it.
    pub fn execute_many(&self, cmds: Vec<Command>) -> Vec<Result<Output>> {
        cmds.into_iter().map(|cmd| self.execute(cmd)).collect()
    }

    /// Run a positional call and render its output as JSON.
    ///
    /// `removeSoup`, `clearSoup`, `removeFromSoup` and `closeCursor` return
    /// `"OK"`.
    pub fn call(&self, action: &str, args: &[Value]) -> Result<Value> {
        let cmd = decode_action(action, args)?;
        self.execute(cmd).map(Output::into_json)
    }

    /// Write the store snapshot if the store is persistent.
    pub fn flush(&self) -> Result<()> {
        convert_result(self.store.flush())
    }
}
