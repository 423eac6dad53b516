//! Store Property Tests
//!
//! Behaviour every store guarantees, exercised through the executor.

use crate::common::*;
use serde_json::json;
use soupstore::{Command, Error, IndexSpec, Order, Output, QuerySpec, SoupStore};

// ============================================================================
// Soup lifecycle
// ============================================================================

#[test]
fn soup_exists_follows_register_and_remove() {
    let executor = create_executor();
    assert_eq!(executor.call("soupExists", &[json!("s")]).unwrap(), json!(false));

    register(&executor, "s", vec![IndexSpec::string("k")]);
    assert_eq!(executor.call("soupExists", &[json!("s")]).unwrap(), json!(true));

    executor.call("removeSoup", &[json!("s")]).unwrap();
    assert_eq!(executor.call("soupExists", &[json!("s")]).unwrap(), json!(false));
}

// ============================================================================
// Upsert
// ============================================================================

#[test]
fn upsert_by_external_id_twice_keeps_one_entry() {
    let executor = create_executor();
    register(&executor, "s", vec![IndexSpec::string("key")]);

    let first = upsert_by(&executor, "s", vec![json!({"key": "k1", "v": 1})], "key").unwrap();
    let second = upsert_by(&executor, "s", vec![json!({"key": "k1", "v": 2})], "key").unwrap();
    assert_eq!(first[0]["_soupEntryId"], second[0]["_soupEntryId"]);

    let cursor = query(&executor, "s", QuerySpec::exact("key", "k1", 10));
    assert_eq!(cursor.total_entries, 1);
    assert_eq!(cursor.current_page_ordered_entries[0]["v"], json!(2));
}

#[test]
fn duplicate_external_id_fails_only_the_conflicting_entry() {
    let executor = create_executor();
    register(&executor, "s", vec![IndexSpec::string("key")]);
    upsert(&executor, "s", vec![json!({"key": "dup"}), json!({"key": "dup"})]);

    let err = upsert_by(
        &executor,
        "s",
        vec![json!({"key": "fresh"}), json!({"key": "dup"})],
        "key",
    )
    .unwrap_err();
    assert!(matches!(err, Error::DuplicateExternalId { .. }));

    assert_eq!(query(&executor, "s", QuerySpec::exact("key", "fresh", 10)).total_entries, 1);
    assert_eq!(query(&executor, "s", QuerySpec::exact("key", "dup", 10)).total_entries, 2);
}

#[test]
fn same_external_id_twice_in_one_call_coalesces() {
    let executor = create_executor();
    register(&executor, "s", vec![IndexSpec::string("key")]);

    let stored = upsert_by(
        &executor,
        "s",
        vec![json!({"key": "k1", "v": 1}), json!({"key": "k1", "v": 2})],
        "key",
    )
    .unwrap();
    assert_eq!(stored[0]["_soupEntryId"], stored[1]["_soupEntryId"]);

    let cursor = query(&executor, "s", QuerySpec::exact("key", "k1", 10));
    assert_eq!(cursor.total_entries, 1);
    assert_eq!(cursor.current_page_ordered_entries[0]["v"], json!(2));
}

// ============================================================================
// Queries
// ============================================================================

#[test]
fn range_returns_bounded_matches_in_order() {
    let executor = create_executor();
    register(&executor, "players", vec![IndexSpec::integer("shots")]);
    upsert(&executor, "players", players());

    let cursor = query(
        &executor,
        "players",
        QuerySpec::range("shots", Some(json!(10)), Some(json!(100)), Order::Ascending, 10),
    );
    assert_eq!(
        field(&cursor.current_page_ordered_entries, "shots"),
        vec![json!(37), json!(92)]
    );
}

#[test]
fn like_patterns_match_prefix_suffix_and_infix() {
    let executor = create_executor();
    register(&executor, "players", vec![IndexSpec::string("name")]);
    upsert(&executor, "players", players());

    for pattern in ["Todd%", "%Stellanova", "%ono%"] {
        let cursor = query(
            &executor,
            "players",
            QuerySpec::like("name", pattern, Order::Ascending, 10),
        );
        assert_eq!(cursor.total_entries, 1, "pattern {}", pattern);
    }
}

#[test]
fn query_on_unindexed_path_is_invalid_index() {
    let executor = create_executor();
    register(&executor, "players", vec![IndexSpec::string("name")]);

    let err = executor
        .execute(Command::QuerySoup {
            soup_name: "players".into(),
            query_spec: QuerySpec::exact("shots", 37, 10),
        })
        .unwrap_err();
    assert!(matches!(err, Error::InvalidIndex { .. }));
}

#[test]
fn smart_count_returns_single_row() {
    let executor = create_executor();
    register(&executor, "players", vec![IndexSpec::string("name")]);
    upsert(&executor, "players", players());

    let cursor = executor
        .call(
            "runSmartQuery",
            &[json!({"queryType": "smart", "smartSql": "SELECT count(*) FROM {players}", "pageSize": 1})],
        )
        .unwrap();
    assert_eq!(cursor["currentPageOrderedEntries"], json!([[3]]));
}

// ============================================================================
// Cursors
// ============================================================================

#[test]
fn cursor_pages_cover_every_entry() {
    let executor = create_executor();
    register(&executor, "numbers", vec![IndexSpec::integer("n")]);
    upsert(
        &executor,
        "numbers",
        (0..103).map(|n| json!({ "n": n })).collect(),
    );

    let first = query(&executor, "numbers", QuerySpec::all("n", Order::Ascending, 10));
    assert_eq!(first.total_pages, 11);

    let page = |index: usize| match executor
        .execute(Command::MoveCursorToPageIndex {
            cursor_id: first.cursor_id,
            page_index: index,
        })
        .unwrap()
    {
        Output::Cursor(cursor) => cursor,
        other => panic!("Expected Cursor, got {:?}", other),
    };
    assert_eq!(page(10).current_page_ordered_entries.len(), 3);
    assert!(page(11).current_page_ordered_entries.is_empty());
}

// ============================================================================
// Snapshots
// ============================================================================

#[test]
fn snapshot_round_trips_empty_and_populated_stores() {
    let mut empty = SoupStore::new();
    let json = empty.to_json().unwrap();
    empty.from_json(&json).unwrap();
    assert!(empty.soup_names().is_empty());

    let mut store = SoupStore::new();
    store.register_soup("players", vec![IndexSpec::string("name")]);
    store
        .upsert_soup_entries("players", players(), "_soupEntryId")
        .unwrap();
    let json = store.to_json().unwrap();

    let mut restored = SoupStore::new();
    restored.from_json(&json).unwrap();
    assert_eq!(restored.to_json().unwrap(), json);
    assert_eq!(
        restored.retrieve_soup_entries("players", &[2]).unwrap()[0]
            .as_ref()
            .unwrap()["name"],
        json!("Pro Bono Bonobo")
    );
}
