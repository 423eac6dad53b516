//! Bridge module: positional calls and argument validation.
//!
//! Hosts that forward calls from another runtime send an action name and a
//! JSON array of positional arguments. This module provides:
//!
//! - [`decode_action`]: Maps an action name and its arguments to a [`Command`]
//! - Validation helpers: soup name and index spec checks shared by the handlers
//!
//! | Action | Arguments |
//! |--------|-----------|
//! | `getDatabaseSize` | |
//! | `registerSoup` | soupName, indexSpecs |
//! | `removeSoup` / `clearSoup` / `getSoupIndexSpecs` / `soupExists` | soupName |
//! | `alterSoup` | soupName, indexSpecs, reIndexData |
//! | `reIndexSoup` | soupName, paths |
//! | `querySoup` | soupName, querySpec |
//! | `runSmartQuery` | querySpec |
//! | `retrieveSoupEntries` / `removeFromSoup` | soupName, entryIds |
//! | `upsertSoupEntries` | soupName, entries, externalIdPath? |
//! | `moveCursorToPageIndex` | cursor, pageIndex |
//! | `closeCursor` | cursor |
//!
//! A cursor argument may be the cursor id or a cursor object carrying
//! `cursorId`.

use serde::de::DeserializeOwned;
use serde_json::Value;
use soupstore_core::{CursorId, IndexSpec, StoreError, StoreResult, SOUP_ENTRY_ID};

use crate::{Command, Error, Result};

// =============================================================================
// Validation
// =============================================================================

/// Reject blank soup names.
pub fn validate_soup_name(soup_name: &str) -> StoreResult<()> {
    if soup_name.trim().is_empty() {
        return Err(StoreError::malformed("soup name must not be blank"));
    }
    Ok(())
}

/// Reject an empty index spec list or specs with blank paths.
pub fn validate_index_specs(index_specs: &[IndexSpec]) -> StoreResult<()> {
    if index_specs.is_empty() {
        return Err(StoreError::malformed("index specs must not be empty"));
    }
    if index_specs.iter().any(|spec| spec.path.trim().is_empty()) {
        return Err(StoreError::malformed("index spec path must not be blank"));
    }
    Ok(())
}

// =============================================================================
// Positional decoding
// =============================================================================

static NULL: Value = Value::Null;

struct Args<'a> {
    action: &'a str,
    values: &'a [Value],
}

impl<'a> Args<'a> {
    fn raw(&self, index: usize) -> &'a Value {
        self.values.get(index).unwrap_or(&NULL)
    }

    fn required<T: DeserializeOwned>(&self, index: usize, name: &str) -> Result<T> {
        let value = self.raw(index);
        if value.is_null() {
            return Err(Error::malformed(format!(
                "{}: {} must not be null",
                self.action, name
            )));
        }
        serde_json::from_value(value.clone()).map_err(|e| {
            Error::malformed(format!("{}: invalid {}: {}", self.action, name, e))
        })
    }

    fn optional<T: DeserializeOwned>(&self, index: usize, name: &str) -> Result<Option<T>> {
        if self.raw(index).is_null() {
            return Ok(None);
        }
        self.required(index, name).map(Some)
    }

    fn soup_name(&self, index: usize) -> Result<String> {
        match self.raw(index) {
            Value::Null => Err(Error::malformed(format!(
                "{}: soup name must not be null",
                self.action
            ))),
            Value::String(name) => Ok(name.clone()),
            other => Err(Error::malformed(format!(
                "{}: soup name must be a string, got {}",
                self.action, other
            ))),
        }
    }

    fn cursor_id(&self, index: usize) -> Result<CursorId> {
        match self.raw(index) {
            Value::Object(cursor) => cursor
                .get("cursorId")
                .and_then(Value::as_u64)
                .ok_or_else(|| {
                    Error::malformed(format!("{}: cursor has no cursorId", self.action))
                }),
            _ => self.required(index, "cursorId"),
        }
    }
}

/// Decode a positional call into a [`Command`].
pub fn decode_action(action: &str, args: &[Value]) -> Result<Command> {
    let args = Args {
        action,
        values: args,
    };
    let command = match action {
        "getDatabaseSize" => Command::GetDatabaseSize,
        "registerSoup" => Command::RegisterSoup {
            soup_name: args.soup_name(0)?,
            index_specs: args.optional(1, "indexSpecs")?.unwrap_or_default(),
        },
        "removeSoup" => Command::RemoveSoup {
            soup_name: args.soup_name(0)?,
        },
        "clearSoup" => Command::ClearSoup {
            soup_name: args.soup_name(0)?,
        },
        "getSoupIndexSpecs" => Command::GetSoupIndexSpecs {
            soup_name: args.soup_name(0)?,
        },
        "alterSoup" => Command::AlterSoup {
            soup_name: args.soup_name(0)?,
            index_specs: args.required(1, "indexSpecs")?,
            reindex_data: args.optional(2, "reIndexData")?.unwrap_or(false),
        },
        "reIndexSoup" => Command::ReIndexSoup {
            soup_name: args.soup_name(0)?,
            paths: args.required(1, "paths")?,
        },
        "soupExists" => Command::SoupExists {
            soup_name: args.soup_name(0)?,
        },
        "querySoup" => Command::QuerySoup {
            soup_name: args.soup_name(0)?,
            query_spec: args.required(1, "querySpec")?,
        },
        "runSmartQuery" => Command::RunSmartQuery {
            query_spec: args.required(0, "querySpec")?,
        },
        "retrieveSoupEntries" => Command::RetrieveSoupEntries {
            soup_name: args.soup_name(0)?,
            entry_ids: args.required(1, "entryIds")?,
        },
        "upsertSoupEntries" => Command::UpsertSoupEntries {
            soup_name: args.soup_name(0)?,
            entries: args.required(1, "entries")?,
            external_id_path: args
                .optional(2, "externalIdPath")?
                .unwrap_or_else(|| SOUP_ENTRY_ID.to_string()),
        },
        "removeFromSoup" => Command::RemoveFromSoup {
            soup_name: args.soup_name(0)?,
            entry_ids: args.required(1, "entryIds")?,
        },
        "moveCursorToPageIndex" => Command::MoveCursorToPageIndex {
            cursor_id: args.cursor_id(0)?,
            page_index: args.required(1, "pageIndex")?,
        },
        "closeCursor" => Command::CloseCursor {
            cursor_id: args.cursor_id(0)?,
        },
        other => return Err(Error::malformed(format!("unknown action: {}", other))),
    };
    Ok(command)
}
