//! Integration tests for upserts by entry id and by external id

use serde_json::json;
use soupstore_core::{IndexSpec, StoreError, SOUP_ENTRY_ID, SOUP_LAST_MODIFIED_DATE};
use soupstore_engine::SoupStore;

fn accounts() -> SoupStore {
    let mut store = SoupStore::new();
    store.register_soup(
        "accounts",
        vec![IndexSpec::string("key"), IndexSpec::string("name")],
    );
    store
}

#[test]
fn test_external_id_upsert_is_stable() {
    let mut store = accounts();
    let first = store
        .upsert_soup_entries("accounts", vec![json!({"key": "k1", "name": "A"})], "key")
        .unwrap();
    let second = store
        .upsert_soup_entries("accounts", vec![json!({"key": "k1", "name": "B"})], "key")
        .unwrap();

    assert_eq!(first[0][SOUP_ENTRY_ID], second[0][SOUP_ENTRY_ID]);
    let soup = store.soup("accounts").unwrap();
    assert_eq!(soup.len(), 1);
    assert_eq!(soup.get(1).unwrap()["name"], json!("B"));
}

#[test]
fn test_external_id_is_typed() {
    let mut store = SoupStore::new();
    store.register_soup("orders", vec![IndexSpec::integer("number")]);
    store
        .upsert_soup_entries("orders", vec![json!({"number": 7})], "number")
        .unwrap();
    store
        .upsert_soup_entries("orders", vec![json!({"number": "7"})], "number")
        .unwrap();
    assert_eq!(store.soup("orders").unwrap().len(), 1);
}

#[test]
fn test_duplicate_external_id_fails_only_conflicting_entry() {
    let mut store = accounts();
    // Two stored entries sharing a key, written by entry id.
    store
        .upsert_soup_entries(
            "accounts",
            vec![json!({"key": "dup"}), json!({"key": "dup"})],
            SOUP_ENTRY_ID,
        )
        .unwrap();

    let err = store
        .upsert_soup_entries(
            "accounts",
            vec![
                json!({"key": "fresh", "name": "ok"}),
                json!({"key": "dup", "name": "conflict"}),
                json!({"key": "later"}),
            ],
            "key",
        )
        .unwrap_err();
    assert_eq!(
        err,
        StoreError::DuplicateExternalId {
            path: "key".to_string(),
            value: "dup".to_string(),
        }
    );
    assert_eq!(
        err.to_string(),
        "There are more than one soup elements where key is dup"
    );

    let soup = store.soup("accounts").unwrap();
    assert_eq!(soup.len(), 3);
    assert_eq!(soup.get(3).unwrap()["name"], json!("ok"));
    assert!(soup.ids_matching("key", &json!("later")).is_empty());
}

#[test]
fn test_upsert_returns_post_mutation_entries() {
    let mut store = accounts();
    let stored = store
        .upsert_soup_entries("accounts", vec![json!({"name": "A"})], SOUP_ENTRY_ID)
        .unwrap();
    let entry = &stored[0];
    assert_eq!(entry[SOUP_ENTRY_ID], json!(1));
    assert!(entry[SOUP_LAST_MODIFIED_DATE].is_i64());

    let retrieved = store.retrieve_soup_entries("accounts", &[1]).unwrap();
    assert_eq!(retrieved[0].as_ref(), Some(entry));
}

#[test]
fn test_timestamps_refresh_on_update() {
    let mut store = accounts();
    let first = store
        .upsert_soup_entries("accounts", vec![json!({"name": "A"})], SOUP_ENTRY_ID)
        .unwrap();
    let before = first[0][SOUP_LAST_MODIFIED_DATE].as_i64().unwrap();
    std::thread::sleep(std::time::Duration::from_millis(5));

    let second = store
        .upsert_soup_entries("accounts", first, SOUP_ENTRY_ID)
        .unwrap();
    let after = second[0][SOUP_LAST_MODIFIED_DATE].as_i64().unwrap();
    assert!(after > before);
}

#[test]
fn test_invalid_entry_id_rejected() {
    let mut store = accounts();
    let err = store
        .upsert_soup_entries(
            "accounts",
            vec![json!({"_soupEntryId": "one"})],
            SOUP_ENTRY_ID,
        )
        .unwrap_err();
    assert!(matches!(err, StoreError::MalformedArgument { .. }));
}

#[test]
fn test_removed_ids_are_not_reused() {
    let mut store = accounts();
    store
        .upsert_soup_entries(
            "accounts",
            vec![json!({"name": "A"}), json!({"name": "B"})],
            SOUP_ENTRY_ID,
        )
        .unwrap();
    store.remove_from_soup("accounts", &[2]).unwrap();
    let stored = store
        .upsert_soup_entries("accounts", vec![json!({"name": "C"})], SOUP_ENTRY_ID)
        .unwrap();
    assert_eq!(stored[0][SOUP_ENTRY_ID], json!(3));
    assert_eq!(
        store.retrieve_soup_entries("accounts", &[2]).unwrap(),
        vec![None]
    );
}

#[test]
fn test_max_entry_id_is_rejected() {
    let mut store = accounts();
    let err = store
        .upsert_soup_entries(
            "accounts",
            vec![json!({"_soupEntryId": u64::MAX, "name": "last"})],
            SOUP_ENTRY_ID,
        )
        .unwrap_err();
    assert!(matches!(err, StoreError::MalformedArgument { .. }));
    assert!(store.soup("accounts").unwrap().is_empty());

    let stored = store
        .upsert_soup_entries("accounts", vec![json!({"name": "fresh"})], SOUP_ENTRY_ID)
        .unwrap();
    assert_eq!(stored[0][SOUP_ENTRY_ID], json!(1));
}

#[test]
fn test_exhausted_counter_never_overwrites() {
    let mut store = accounts();
    store
        .upsert_soup_entries(
            "accounts",
            vec![json!({"_soupEntryId": u64::MAX - 1, "name": "near the end"})],
            SOUP_ENTRY_ID,
        )
        .unwrap();

    let err = store
        .upsert_soup_entries("accounts", vec![json!({"name": "fresh"})], SOUP_ENTRY_ID)
        .unwrap_err();
    assert!(matches!(err, StoreError::MalformedArgument { .. }));

    let soup = store.soup("accounts").unwrap();
    assert_eq!(soup.len(), 1);
    assert_eq!(soup.get(u64::MAX - 1).unwrap()["name"], json!("near the end"));
}

#[test]
fn test_same_external_id_twice_in_one_batch() {
    let mut store = accounts();
    let stored = store
        .upsert_soup_entries(
            "accounts",
            vec![
                json!({"key": "k1", "name": "first"}),
                json!({"key": "k1", "name": "second"}),
            ],
            "key",
        )
        .unwrap();

    // The second entry matches the first and takes over its id.
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0][SOUP_ENTRY_ID], stored[1][SOUP_ENTRY_ID]);

    let soup = store.soup("accounts").unwrap();
    assert_eq!(soup.len(), 1);
    assert_eq!(soup.get(1).unwrap()["name"], json!("second"));
}
