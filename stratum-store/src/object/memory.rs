//! In-memory object store.

use crate::error::StoreResult;
use crate::object::ObjectStore;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Object store backed by a process-local map.
///
/// Useful for tests and for embedded deployments that do not need durable
/// remote state.
#[derive(Debug, Default)]
pub struct InMemoryObjectStore {
    objects: RwLock<HashMap<(String, String), Vec<u8>>>,
}

impl InMemoryObjectStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored objects, across all buckets.
    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    /// True when no objects are stored.
    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn exists(&self, bucket: &str, path: &str) -> StoreResult<bool> {
        let key = (bucket.to_string(), path.to_string());
        Ok(self.objects.read().await.contains_key(&key))
    }

    async fn get(&self, bucket: &str, path: &str) -> StoreResult<Option<Vec<u8>>> {
        let key = (bucket.to_string(), path.to_string());
        Ok(self.objects.read().await.get(&key).cloned())
    }

    async fn put(&self, bucket: &str, path: &str, content: &str) -> StoreResult<()> {
        let key = (bucket.to_string(), path.to_string());
        self.objects
            .write()
            .await
            .insert(key, content.as_bytes().to_vec());
        Ok(())
    }

    async fn delete(&self, bucket: &str, path: &str) -> StoreResult<()> {
        let key = (bucket.to_string(), path.to_string());
        self.objects.write().await.remove(&key);
        Ok(())
    }
}
