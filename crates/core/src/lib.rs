//! Core types for SoupStore
//!
//! This crate defines the foundational types used throughout the system:
//! - Entry constants: `_soupEntryId`, `_soupLastModifiedDate`, `_soup`
//! - Projection: dotted-path lookup into JSON documents
//! - IndexSpec / IndexType: typed secondary index declarations and coercion
//! - Value ordering: predicate and sort comparison over JSON values
//! - QuerySpec: the five query kinds and their builders
//! - CursorView: the cursor shape handed back to callers
//! - StoreError: the error taxonomy shared by every layer

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cursor;
pub mod entry;
pub mod error;
pub mod index_spec;
pub mod projection;
pub mod query_spec;
pub mod value;

pub use cursor::{CursorId, CursorView};
pub use entry::{EntryId, SOUP_ENTRY_ID, SOUP_LAST_MODIFIED_DATE, SOUP_PATH};
pub use error::{StoreError, StoreResult};
pub use index_spec::{IndexSpec, IndexType};
pub use projection::project;
pub use query_spec::{Order, QuerySpec, QueryType, DEFAULT_PAGE_SIZE};
pub use value::{compare_values, sort_cmp, value_to_text, values_equal};
