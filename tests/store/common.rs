//! Shared fixtures for the store tests.

use serde_json::{json, Value};
use soupstore::{Command, Executor, IndexSpec, Output, QuerySpec, SOUP_ENTRY_ID};

pub fn create_executor() -> Executor {
    Executor::ephemeral()
}

pub fn register(executor: &Executor, soup: &str, specs: Vec<IndexSpec>) {
    executor
        .execute(Command::RegisterSoup {
            soup_name: soup.into(),
            index_specs: specs,
        })
        .unwrap();
}

pub fn upsert(executor: &Executor, soup: &str, entries: Vec<Value>) -> Vec<Value> {
    upsert_by(executor, soup, entries, SOUP_ENTRY_ID).unwrap()
}

pub fn upsert_by(
    executor: &Executor,
    soup: &str,
    entries: Vec<Value>,
    external_id_path: &str,
) -> soupstore::Result<Vec<Value>> {
    match executor.execute(Command::UpsertSoupEntries {
        soup_name: soup.into(),
        entries,
        external_id_path: external_id_path.into(),
    })? {
        Output::Entries(entries) => Ok(entries),
        other => panic!("Expected Entries, got {:?}", other),
    }
}

/// Every entry of the first page of `spec`.
pub fn query(executor: &Executor, soup: &str, spec: QuerySpec) -> soupstore::CursorView {
    match executor
        .execute(Command::QuerySoup {
            soup_name: soup.into(),
            query_spec: spec,
        })
        .unwrap()
    {
        Output::Cursor(cursor) => cursor,
        other => panic!("Expected Cursor, got {:?}", other),
    }
}

pub fn field(entries: &[Value], path: &str) -> Vec<Value> {
    entries.iter().map(|e| e[path].clone()).collect()
}

pub fn players() -> Vec<Value> {
    vec![
        json!({"name": "Todd Stellanova", "shots": 37}),
        json!({"name": "Pro Bono Bonobo", "shots": 92}),
        json!({"name": "Robot", "shots": 0}),
    ]
}
