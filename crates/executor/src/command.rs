//! Command enum defining all SoupStore operations.
//!
//! Commands are the "instruction set" of the store. Every operation a caller
//! can perform is a variant of this enum.
//!
//! Commands are:
//! - **Self-contained**: All parameters needed for execution are in the variant
//! - **Serializable**: Can be converted to/from JSON for cross-language use
//! - **Typed**: No generic fallback, every operation has explicit types

use serde::{Deserialize, Serialize};
use serde_json::Value;
use soupstore_core::{CursorId, EntryId, IndexSpec, QuerySpec};

fn default_external_id_path() -> String {
    soupstore_core::SOUP_ENTRY_ID.to_string()
}

/// A command is a self-contained, serializable operation.
///
/// # Command Categories
///
/// | Category | Count | Description |
/// |----------|-------|-------------|
/// | Database | 1 | Store-level operations |
/// | Soup | 7 | Soup lifecycle and index specs |
/// | Entry | 3 | Upsert, retrieve and remove entries |
/// | Query | 4 | Queries and cursor paging |
///
/// # Example
///
/// ```
/// use soupstore_executor::{Command, Executor, Output};
/// use soupstore_core::IndexSpec;
///
/// let executor = Executor::ephemeral();
/// let output = executor
///     .execute(Command::RegisterSoup {
///         soup_name: "contacts".into(),
///         index_specs: vec![IndexSpec::string("Name")],
///     })
///     .unwrap();
/// assert_eq!(output, Output::SoupName("contacts".into()));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub enum Command {
    // ==================== Database (1) ====================
    /// Byte length of the serialized store.
    /// Returns: `Output::Uint`
    GetDatabaseSize,

    // ==================== Soup (7) ====================
    /// Register a soup; a second registration keeps the first specs.
    /// Returns: `Output::SoupName`
    RegisterSoup {
        soup_name: String,
        index_specs: Vec<IndexSpec>,
    },

    /// Drop a soup with all its entries.
    /// Returns: `Output::Ok`
    RemoveSoup { soup_name: String },

    /// Remove every entry of a soup.
    /// Returns: `Output::Ok`
    ClearSoup { soup_name: String },

    /// Current index specs of a soup.
    /// Returns: `Output::IndexSpecs`
    GetSoupIndexSpecs { soup_name: String },

    /// Replace a soup's index specs.
    /// Returns: `Output::SoupName`
    AlterSoup {
        soup_name: String,
        index_specs: Vec<IndexSpec>,
        #[serde(default)]
        reindex_data: bool,
    },

    /// Recompute indexed values for some paths.
    /// Returns: `Output::SoupName`
    ReIndexSoup {
        soup_name: String,
        paths: Vec<String>,
    },

    /// Whether a soup is registered.
    /// Returns: `Output::Bool`
    SoupExists { soup_name: String },

    // ==================== Entry (3) ====================
    /// Entries by id, in request order.
    /// Returns: `Output::MaybeEntries`
    RetrieveSoupEntries {
        soup_name: String,
        entry_ids: Vec<EntryId>,
    },

    /// Insert or update entries, matching on `external_id_path`.
    /// Returns: `Output::Entries`
    UpsertSoupEntries {
        soup_name: String,
        entries: Vec<Value>,
        #[serde(default = "default_external_id_path")]
        external_id_path: String,
    },

    /// Delete entries by id.
    /// Returns: `Output::Ok`
    RemoveFromSoup {
        soup_name: String,
        entry_ids: Vec<EntryId>,
    },

    // ==================== Query (4) ====================
    /// Run a query and open a cursor.
    /// Returns: `Output::Cursor`
    QuerySoup {
        soup_name: String,
        query_spec: QuerySpec,
    },

    /// Run a smart query and open a cursor.
    /// Returns: `Output::Cursor`
    RunSmartQuery { query_spec: QuerySpec },

    /// Move a cursor to another page.
    /// Returns: `Output::Cursor`
    MoveCursorToPageIndex {
        cursor_id: CursorId,
        page_index: usize,
    },

    /// Close a cursor.
    /// Returns: `Output::Ok`
    CloseCursor { cursor_id: CursorId },
}

impl Command {
    /// Operation name callers use for this command.
    pub fn name(&self) -> &'static str {
        match self {
            Command::GetDatabaseSize => "getDatabaseSize",
            Command::RegisterSoup { .. } => "registerSoup",
            Command::RemoveSoup { .. } => "removeSoup",
            Command::ClearSoup { .. } => "clearSoup",
            Command::GetSoupIndexSpecs { .. } => "getSoupIndexSpecs",
            Command::AlterSoup { .. } => "alterSoup",
            Command::ReIndexSoup { .. } => "reIndexSoup",
            Command::SoupExists { .. } => "soupExists",
            Command::RetrieveSoupEntries { .. } => "retrieveSoupEntries",
            Command::UpsertSoupEntries { .. } => "upsertSoupEntries",
            Command::RemoveFromSoup { .. } => "removeFromSoup",
            Command::QuerySoup { .. } => "querySoup",
            Command::RunSmartQuery { .. } => "runSmartQuery",
            Command::MoveCursorToPageIndex { .. } => "moveCursorToPageIndex",
            Command::CloseCursor { .. } => "closeCursor",
        }
    }

    /// Whether the command can change store contents.
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            Command::RegisterSoup { .. }
                | Command::RemoveSoup { .. }
                | Command::ClearSoup { .. }
                | Command::AlterSoup { .. }
                | Command::ReIndexSoup { .. }
                | Command::UpsertSoupEntries { .. }
                | Command::RemoveFromSoup { .. }
        )
    }
}
