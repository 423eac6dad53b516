//! Store engine for SoupStore
//!
//! This crate holds everything that owns state:
//! - SoupStore: soups, entries and the indexed-data side table
//! - Index spec management (register, alter, reindex)
//! - Query evaluation, including the smart SQL templates
//! - Paged cursors that re-run their query on every move
//! - JSON snapshots and storage slots
//! - The process-wide registry of named stores
//!
//! The engine is synchronous. Share a store across threads through
//! [`StoreHandle`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cursor;
mod index;
mod persistence;
mod query;
pub mod slot;
pub mod soup;
pub mod store;

pub use cursor::Cursor;
pub use slot::{FileSlot, MemorySlot, StorageSlot};
pub use soup::{IndexedRow, Soup};
pub use store::{
    open_store, SoupStore, StoreConfig, StoreHandle, StoreKey, StoreScope, CONFIG_FILE_NAME,
    OPEN_STORES,
};
