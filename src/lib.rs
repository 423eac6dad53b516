//! SoupStore - in-memory document store with typed secondary indexes
//!
//! Documents ("entries") live in named collections ("soups"). Each soup
//! declares index specs that make paths queryable by exact match, range,
//! `%` pattern, full-text terms, or a handful of smart SQL shapes. Queries
//! return re-querying paged cursors.
//!
//! # Quick Start
//!
//! ```
//! use serde_json::json;
//! use soupstore::{Command, Executor, IndexSpec, Output, QuerySpec};
//!
//! let executor = Executor::ephemeral();
//! executor
//!     .execute(Command::RegisterSoup {
//!         soup_name: "contacts".into(),
//!         index_specs: vec![IndexSpec::string("Name")],
//!     })
//!     .unwrap();
//! executor
//!     .call("upsertSoupEntries", &[json!("contacts"), json!([{"Name": "Ada"}])])
//!     .unwrap();
//!
//! let output = executor
//!     .execute(Command::QuerySoup {
//!         soup_name: "contacts".into(),
//!         query_spec: QuerySpec::exact("Name", "Ada", 10),
//!     })
//!     .unwrap();
//! assert!(matches!(output, Output::Cursor(c) if c.total_entries == 1));
//! ```
//!
//! # Architecture
//!
//! All operations go through the [`Executor`], which provides a command-based
//! API and a positional [`Executor::call`] for bridged hosts. The engine and
//! its storage slots are reached through the executor's re-exports.

// Re-export the public API from soupstore-executor
pub use soupstore_executor::*;
