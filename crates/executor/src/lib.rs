//! # SoupStore Executor
//!
//! The public API for SoupStore - an in-memory document store with indexed
//! soups, paged cursors and a small smart SQL dialect.
//!
//! This is the only crate users need to import. It provides:
//! - [`Executor`] - Executes commands against a shared store
//! - [`Command`]/[`Output`] - Typed command interface
//! - [`Executor::call`] - Positional JSON calls by operation name
//!
//! ## Quick Start
//!
//! ```
//! use serde_json::json;
//! use soupstore_executor::Executor;
//!
//! let store = Executor::ephemeral();
//! store
//!     .call("registerSoup", &[json!("contacts"), json!([{"path": "Name", "type": "string"}])])
//!     .unwrap();
//! store
//!     .call("upsertSoupEntries", &[json!("contacts"), json!([{"Name": "Todd"}])])
//!     .unwrap();
//!
//! let cursor = store
//!     .call(
//!         "querySoup",
//!         &[json!("contacts"), json!({"queryType": "like", "indexPath": "Name",
//!                                    "likeKey": "T%", "pageSize": 10})],
//!     )
//!     .unwrap();
//! assert_eq!(cursor["totalEntries"], json!(1));
//! ```
//!
//! ## Operations
//!
//! | Category | Operations |
//! |----------|-----------|
//! | **Soup** | registerSoup, removeSoup, clearSoup, soupExists, getSoupIndexSpecs, alterSoup, reIndexSoup |
//! | **Entry** | upsertSoupEntries, retrieveSoupEntries, removeFromSoup |
//! | **Query** | querySoup, runSmartQuery, moveCursorToPageIndex, closeCursor |
//! | **Database** | getDatabaseSize |

#![warn(missing_docs)]

pub mod bridge;
mod command;
mod convert;
mod error;
mod executor;
mod output;

// Handler modules
mod handlers;

// Test modules
#[cfg(test)]
mod tests;

// =============================================================================
// Public API - Everything users need is re-exported here
// =============================================================================

pub use command::Command;
pub use error::Error;
pub use executor::Executor;
pub use output::Output;

// Re-export core types so users don't need soupstore-core directly
pub use soupstore_core::{
    CursorId, CursorView, EntryId, IndexSpec, IndexType, Order, QuerySpec, QueryType,
    SOUP_ENTRY_ID, SOUP_LAST_MODIFIED_DATE,
};

// Re-export store handles and configuration so users don't need soupstore-engine directly
pub use soupstore_engine::{
    FileSlot, MemorySlot, SoupStore, StorageSlot, StoreConfig, StoreHandle, StoreKey, StoreScope,
};

/// Result type for executor operations
pub type Result<T> = std::result::Result<T, Error>;
