//! Integration tests for snapshots, file slots and the store registry

use serde_json::json;
use soupstore_core::{IndexSpec, Order, QuerySpec, StoreError, SOUP_ENTRY_ID};
use soupstore_engine::{open_store, FileSlot, SoupStore, StorageSlot, StoreConfig, StoreKey};
use tempfile::TempDir;

fn populated() -> SoupStore {
    let mut store = SoupStore::new();
    store.register_soup(
        "notes",
        vec![IndexSpec::string("title"), IndexSpec::full_text("body")],
    );
    store
        .upsert_soup_entries(
            "notes",
            vec![
                json!({"title": "b", "body": "second note"}),
                json!({"title": "a", "body": "first note"}),
            ],
            SOUP_ENTRY_ID,
        )
        .unwrap();
    store
}

#[test]
fn test_empty_store_round_trip() {
    let store = SoupStore::new();
    let text = store.to_json().unwrap();
    let mut restored = populated();
    restored.from_json(&text).unwrap();
    assert!(restored.soup_names().is_empty());
    assert_eq!(restored.to_json().unwrap(), text);
}

#[test]
fn test_populated_store_round_trip() {
    let store = populated();
    let text = store.to_json().unwrap();
    let mut restored = SoupStore::new();
    restored.from_json(&text).unwrap();
    assert_eq!(restored.to_json().unwrap(), text);

    let cursor = restored
        .query_soup("notes", QuerySpec::full_text(None, "first", Order::Ascending, 10))
        .unwrap();
    assert_eq!(cursor.current_page_ordered_entries[0]["title"], json!("a"));
}

#[test]
fn test_corrupt_snapshot_is_rejected() {
    let mut store = populated();
    for text in ["not json", "{\"soups\": 5}", "\"text\""] {
        let err = store.from_json(text).unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)), "{}", text);
    }
    assert!(store.soup_exists("notes"));
}

#[test]
fn test_database_size_is_snapshot_length() {
    let store = populated();
    assert_eq!(
        store.get_database_size().unwrap(),
        store.to_json().unwrap().len()
    );
}

#[test]
fn test_file_slot_round_trip() {
    let dir = TempDir::new().unwrap();
    let slot = FileSlot::new(dir.path());
    let store = populated();
    store.persist_to(&slot, "notes.user").unwrap();

    let mut restored = SoupStore::new();
    assert!(restored.restore_from(&slot, "notes.user").unwrap());
    assert_eq!(restored.to_json().unwrap(), store.to_json().unwrap());
}

#[test]
fn test_corrupt_file_slot_names_key() {
    let dir = TempDir::new().unwrap();
    let slot = FileSlot::new(dir.path());
    slot.save("broken.user", "{").unwrap();
    let err = SoupStore::new()
        .restore_from(&slot, "broken.user")
        .unwrap_err();
    assert!(err.to_string().contains("broken.user"));
}

#[test]
fn test_open_store_flushes_on_demand() {
    let dir = TempDir::new().unwrap();
    let config = StoreConfig::persistent(dir.path());
    let handle = open_store(StoreKey::user("persistence-flush"), &config).unwrap();
    handle
        .lock()
        .register_soup("s", vec![IndexSpec::string("a")]);
    handle.flush().unwrap();

    let slot = FileSlot::new(dir.path());
    let text = slot.load("persistence-flush.user").unwrap().unwrap();
    let mut copy = SoupStore::new();
    copy.from_json(&text).unwrap();
    assert!(copy.soup_exists("s"));
}

#[test]
fn test_open_store_uses_configured_page_size() {
    let config = StoreConfig {
        default_page_size: 2,
        data_dir: None,
    };
    let handle = open_store(StoreKey::global("persistence-page-size"), &config).unwrap();
    let mut store = handle.lock();
    store.register_soup("s", vec![IndexSpec::integer("n")]);
    store
        .upsert_soup_entries(
            "s",
            vec![json!({"n": 1}), json!({"n": 2}), json!({"n": 3})],
            SOUP_ENTRY_ID,
        )
        .unwrap();
    let mut spec = QuerySpec::all("n", Order::Ascending, 1);
    spec.page_size = None;
    let cursor = store.query_soup("s", spec).unwrap();
    assert_eq!(cursor.page_size, 2);
    assert_eq!(cursor.total_pages, 2);
}

#[test]
fn test_dropped_handle_flushes_and_reopens() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let dir = TempDir::new().unwrap();
    let config = StoreConfig::persistent(dir.path());
    let key = StoreKey::user("persistence-reopen");

    let handle = open_store(key.clone(), &config).unwrap();
    handle.lock().register_soup("s", vec![IndexSpec::string("a")]);
    drop(handle);

    let reopened = open_store(key, &config).unwrap();
    assert!(reopened.is_persistent());
    assert!(reopened.lock().soup_exists("s"));
}

#[test]
fn test_restored_max_ids_do_not_wrap() {
    let text = format!(
        r#"{{"soups": {{"s": {{"{max}": {{"_soupEntryId": {max}}}}}}},
            "soupIndexSpecs": {{"s": [{{"path": "a", "type": "string"}}]}},
            "nextSoupEltIds": {{"s": 1}}}}"#,
        max = u64::MAX
    );
    let mut store = SoupStore::new();
    store.from_json(&text).unwrap();

    let err = store
        .upsert_soup_entries("s", vec![json!({"a": "fresh"})], SOUP_ENTRY_ID)
        .unwrap_err();
    assert!(matches!(err, StoreError::MalformedArgument { .. }));
    assert_eq!(store.soup("s").unwrap().len(), 1);
}
