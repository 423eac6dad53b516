//! Command handlers organized by category.
//!
//! | Module | Commands | Scope |
//! |--------|----------|-------|
//! | `soup` | 8 | Soup lifecycle, index specs, database size |
//! | `entry` | 3 | Upsert, retrieve and remove entries |
//! | `query` | 4 | Queries and cursor paging |

pub mod entry;
pub mod query;
pub mod soup;
