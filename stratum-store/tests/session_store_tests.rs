use serde_json::json;
use std::collections::HashMap;
use stratum_store::{InMemorySessionStore, SessionStore};

// ── Basic operations ────────────────────────────────────────────

#[tokio::test]
async fn get_of_absent_key_is_none() {
    let store = InMemorySessionStore::new();
    assert!(store.get("counter").await.unwrap().is_none());
}

#[tokio::test]
async fn put_then_get_roundtrip() {
    let store = InMemorySessionStore::new();
    store.put("counter", json!({"count": 5})).await.unwrap();
    assert_eq!(
        store.get("counter").await.unwrap(),
        Some(json!({"count": 5}))
    );
}

#[tokio::test]
async fn put_replaces_prior_value() {
    let store = InMemorySessionStore::new();
    store.put("counter", json!({"count": 1})).await.unwrap();
    store.put("counter", json!({"count": 2})).await.unwrap();
    assert_eq!(
        store.get("counter").await.unwrap(),
        Some(json!({"count": 2}))
    );
}

#[tokio::test]
async fn delete_removes_the_attribute() {
    let store = InMemorySessionStore::new();
    store.put("counter", json!(1)).await.unwrap();
    store.delete("counter").await.unwrap();
    assert!(store.get("counter").await.unwrap().is_none());
}

#[tokio::test]
async fn delete_of_absent_key_is_a_noop() {
    let store = InMemorySessionStore::new();
    store.delete("never-written").await.unwrap();
    store.delete("never-written").await.unwrap();
}

// ── Host seeding and snapshots ──────────────────────────────────

#[tokio::test]
async fn seeded_attributes_are_readable() {
    let mut seed = HashMap::new();
    seed.insert("counter".to_string(), json!({"count": 9}));
    let store = InMemorySessionStore::with_attributes(seed);
    assert_eq!(
        store.get("counter").await.unwrap(),
        Some(json!({"count": 9}))
    );
}

#[tokio::test]
async fn snapshot_reflects_all_writes() {
    let store = InMemorySessionStore::new();
    store.put("a", json!(1)).await.unwrap();
    store.put("b", json!("text")).await.unwrap();

    let snapshot = store.attributes().await;
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot.get("a"), Some(&json!(1)));
    assert_eq!(snapshot.get("b"), Some(&json!("text")));
}
