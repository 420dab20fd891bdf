//! Session store contract and in-memory implementation.
//!
//! The session store is the fast, request-scoped attribute cache the host
//! runtime carries through one conversation. Values are untyped JSON: the
//! handlers write field maps, but hosts may have stored JSON text or other
//! shapes, so readers must be prepared for any [`Value`].

use crate::error::StoreResult;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Request-scoped key-value cache for session attributes.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the attribute stored under `key`, if any.
    async fn get(&self, key: &str) -> StoreResult<Option<Value>>;

    /// Stores `value` under `key`, replacing any prior attribute.
    async fn put(&self, key: &str, value: Value) -> StoreResult<()>;

    /// Deletes the attribute under `key`. Deleting an absent key is a no-op.
    async fn delete(&self, key: &str) -> StoreResult<()>;
}

/// In-memory session store.
///
/// Hosts construct one per invocation, seeded with the incoming session
/// attributes, and snapshot it back into the response envelope when the
/// request completes.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    attributes: RwLock<HashMap<String, Value>>,
}

impl InMemorySessionStore {
    /// Creates an empty session store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session store seeded with existing attributes.
    pub fn with_attributes(attributes: HashMap<String, Value>) -> Self {
        Self {
            attributes: RwLock::new(attributes),
        }
    }

    /// Snapshot of all stored attributes.
    pub async fn attributes(&self) -> HashMap<String, Value> {
        self.attributes.read().await.clone()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, key: &str) -> StoreResult<Option<Value>> {
        Ok(self.attributes.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: Value) -> StoreResult<()> {
        self.attributes.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        self.attributes.write().await.remove(key);
        Ok(())
    }
}
