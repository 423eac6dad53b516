//! Output enum for command execution results.
//!
//! Every command produces exactly one output type. This mapping is deterministic:
//! the same command always produces the same output variant (though the values
//! may differ based on store state).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use soupstore_core::{CursorView, IndexSpec};

/// Successful command execution results.
///
/// Each [`Command`](crate::Command) variant maps to exactly one `Output` variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Output {
    /// Operation succeeded with nothing to return
    Ok,

    /// Unsigned integer result (database size)
    Uint(u64),

    /// Boolean result
    Bool(bool),

    /// Name of the soup the operation applied to
    SoupName(String),

    /// Index specs of a soup
    IndexSpecs(Vec<IndexSpec>),

    /// One page of a query
    Cursor(CursorView),

    /// Stored entries after an upsert
    Entries(Vec<Value>),

    /// Entries by id; `None` where no entry has the id
    MaybeEntries(Vec<Option<Value>>),
}

impl Output {
    /// Render as the plain JSON value callers receive.
    ///
    /// `Ok` renders as the string `"OK"`; missing entries render as `null`.
    pub fn into_json(self) -> Value {
        match self {
            Output::Ok => Value::String("OK".to_string()),
            Output::Uint(n) => Value::from(n),
            Output::Bool(b) => Value::Bool(b),
            Output::SoupName(name) => Value::String(name),
            Output::IndexSpecs(specs) => {
                serde_json::to_value(specs).unwrap_or(Value::Array(Vec::new()))
            }
            Output::Cursor(view) => serde_json::to_value(view).unwrap_or(Value::Null),
            Output::Entries(entries) => Value::Array(entries),
            Output::MaybeEntries(entries) => Value::Array(
                entries
                    .into_iter()
                    .map(|entry| entry.unwrap_or(Value::Null))
                    .collect(),
            ),
        }
    }
}
