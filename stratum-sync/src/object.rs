//! Object-storage strategy.

use crate::context::StateContext;
use crate::engine::RemoteStateStore;
use crate::error::{StateError, StateResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use stratum_model::Scope;
use stratum_store::ObjectStore;
use tracing::{debug, warn};

const STORE_NAME: &str = "object";

/// Configuration for [`ObjectStateStore`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectStateConfig {
    /// Bucket holding all state objects.
    pub bucket: String,
    /// Folder for application-location payloads, shared by all users.
    pub application_folder: String,
    /// Extension given to state objects.
    pub file_extension: String,
}

impl Default for ObjectStateConfig {
    fn default() -> Self {
        Self {
            bucket: String::new(),
            application_folder: "__application".to_string(),
            file_extension: "json".to_string(),
        }
    }
}

/// Remote store keeping one JSON object per attribute key and location.
///
/// User-location payloads live under a folder named after the user id,
/// application-location payloads under the shared application folder.
pub struct ObjectStateStore {
    store: Arc<dyn ObjectStore>,
    context: StateContext,
    config: ObjectStateConfig,
}

impl ObjectStateStore {
    /// Creates a strategy over the given object store.
    pub fn new(store: Arc<dyn ObjectStore>, context: StateContext, config: ObjectStateConfig) -> Self {
        Self {
            store,
            context,
            config,
        }
    }

    fn object_path(&self, scope: Scope, key: &str) -> String {
        let folder = match scope {
            Scope::Application => self.config.application_folder.as_str(),
            _ => self.context.user_id.as_str(),
        };
        format!("{folder}/{key}.{}", self.config.file_extension)
    }
}

#[async_trait]
impl RemoteStateStore for ObjectStateStore {
    fn store_name(&self) -> &'static str {
        STORE_NAME
    }

    async fn fetch(&self, scope: Scope, key: &str) -> StateResult<Option<String>> {
        let path = self.object_path(scope, key);
        let exists = self
            .store
            .exists(&self.config.bucket, &path)
            .await
            .map_err(|e| StateError::store(key, STORE_NAME, e))?;
        if !exists {
            return Ok(None);
        }
        // The object may vanish between the probe and the fetch.
        let Some(bytes) = self
            .store
            .get(&self.config.bucket, &path)
            .await
            .map_err(|e| StateError::store(key, STORE_NAME, e))?
        else {
            warn!("object {} vanished between probe and fetch", path);
            return Ok(None);
        };
        let payload =
            String::from_utf8(bytes).map_err(|e| StateError::encoding(key, STORE_NAME, e))?;
        if payload.is_empty() {
            return Ok(Some("{}".to_string()));
        }
        Ok(Some(payload))
    }

    async fn put(&self, scope: Scope, key: &str, json: &str) -> StateResult<()> {
        let path = self.object_path(scope, key);
        self.store
            .put(&self.config.bucket, &path, json)
            .await
            .map_err(|e| StateError::store(key, STORE_NAME, e))?;
        debug!("stored object {} in bucket {}", path, self.config.bucket);
        Ok(())
    }

    async fn delete(&self, scope: Scope, key: &str) -> StateResult<()> {
        let path = self.object_path(scope, key);
        self.store
            .delete(&self.config.bucket, &path)
            .await
            .map_err(|e| StateError::store(key, STORE_NAME, e))?;
        debug!("deleted object {} from bucket {}", path, self.config.bucket);
        Ok(())
    }
}
