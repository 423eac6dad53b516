//! Tests for the error variants commands report.

use serde_json::json;

use super::players_executor;
use crate::{Command, Error, Executor, IndexSpec, QuerySpec};

#[test]
fn test_missing_soup() {
    let executor = Executor::ephemeral();
    let err = executor
        .execute(Command::ClearSoup {
            soup_name: "ghost".into(),
        })
        .unwrap_err();
    assert_eq!(
        err,
        Error::SoupNotFound {
            soup: "ghost".into()
        }
    );
    assert_eq!(err.to_string(), "Soup: ghost does not exist");
    assert_eq!(err.kind(), "NotFound");
}

#[test]
fn test_unindexed_query_path() {
    let executor = players_executor();
    let err = executor
        .execute(Command::QuerySoup {
            soup_name: "players".into(),
            query_spec: QuerySpec::exact("team", "red", 10),
        })
        .unwrap_err();
    assert_eq!(
        err,
        Error::InvalidIndex {
            soup: "players".into(),
            path: "team".into()
        }
    );
}

#[test]
fn test_duplicate_external_id() {
    let executor = Executor::ephemeral();
    executor
        .execute(Command::RegisterSoup {
            soup_name: "s".into(),
            index_specs: vec![IndexSpec::string("key")],
        })
        .unwrap();
    executor
        .execute(Command::UpsertSoupEntries {
            soup_name: "s".into(),
            entries: vec![json!({"key": "k"}), json!({"key": "k"})],
            external_id_path: crate::SOUP_ENTRY_ID.into(),
        })
        .unwrap();

    let err = executor
        .execute(Command::UpsertSoupEntries {
            soup_name: "s".into(),
            entries: vec![json!({"key": "k"})],
            external_id_path: "key".into(),
        })
        .unwrap_err();
    assert_eq!(
        err,
        Error::DuplicateExternalId {
            path: "key".into(),
            value: "k".into()
        }
    );
}

#[test]
fn test_unsupported_smart_query() {
    let executor = players_executor();
    let err = executor
        .execute(Command::RunSmartQuery {
            query_spec: QuerySpec::smart("DELETE FROM {players}", 10),
        })
        .unwrap_err();
    assert_eq!(err.to_string(), "SmartQuery not supported: DELETE FROM {players}");
    assert_eq!(err.kind(), "UnsupportedQuery");
}

#[test]
fn test_unknown_cursor() {
    let executor = players_executor();
    let err = executor
        .execute(Command::MoveCursorToPageIndex {
            cursor_id: 77,
            page_index: 0,
        })
        .unwrap_err();
    assert_eq!(err, Error::CursorNotFound { cursor_id: 77 });
}

#[test]
fn test_error_is_serializable() {
    let err = Error::InvalidIndex {
        soup: "players".into(),
        path: "team".into(),
    };
    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(
        json,
        json!({"InvalidIndex": {"soup": "players", "path": "team"}})
    );
    let restored: Error = serde_json::from_value(json).unwrap();
    assert_eq!(restored, err);
}
