//! Session Tests
//!
//! Stores opened by key share one instance while open and persist to the
//! configured data directory.

use crate::common::*;
use serde_json::json;
use soupstore::{Executor, IndexSpec, StoreConfig, StoreKey};
use tempfile::TempDir;

#[test]
fn opening_the_same_key_shares_the_store() {
    let config = StoreConfig::default();
    let first = Executor::open(StoreKey::user("sessions-shared"), &config).unwrap();
    let second = Executor::open(StoreKey::user("sessions-shared"), &config).unwrap();

    register(&first, "s", vec![IndexSpec::string("k")]);
    assert_eq!(second.call("soupExists", &[json!("s")]).unwrap(), json!(true));
}

#[test]
fn user_and_global_scopes_are_separate() {
    let config = StoreConfig::default();
    let user = Executor::open(StoreKey::user("sessions-scoped"), &config).unwrap();
    let global = Executor::open(StoreKey::global("sessions-scoped"), &config).unwrap();

    register(&user, "s", vec![IndexSpec::string("k")]);
    assert_eq!(global.call("soupExists", &[json!("s")]).unwrap(), json!(false));
}

#[test]
fn persistent_store_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let config = StoreConfig::persistent(dir.path());
    let key = StoreKey::user("sessions-persistent");

    {
        let executor = Executor::open(key.clone(), &config).unwrap();
        register(&executor, "players", vec![IndexSpec::string("name")]);
        upsert(&executor, "players", players());
    }

    let executor = Executor::open(key, &config).unwrap();
    let entries = executor
        .call("retrieveSoupEntries", &[json!("players"), json!([3])])
        .unwrap();
    assert_eq!(entries[0]["name"], json!("Robot"));

    let stored = upsert(&executor, "players", vec![json!({"name": "Next"})]);
    assert_eq!(stored[0]["_soupEntryId"], json!(4));
}
