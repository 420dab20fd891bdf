//! Session-cache state handler.

use crate::error::{StateError, StateResult};
use crate::handler::StateHandler;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use stratum_model::{attribute_key, ModelError, Scope, StateModel};
use stratum_store::SessionStore;
use tracing::debug;

const STORE_NAME: &str = "session";

/// Handler that keeps every declared field in the session cache.
///
/// The cache holds one entry per attribute key. Entries written by this
/// handler are JSON field maps; entries seeded by the hosting runtime may
/// also arrive as JSON text, and both shapes decode transparently.
pub struct SessionStateHandler {
    store: Arc<dyn SessionStore>,
}

impl SessionStateHandler {
    /// Creates a handler over the given session store.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// The backing session store.
    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }
}

#[async_trait]
impl StateHandler for SessionStateHandler {
    async fn read_model<M: StateModel>(&self, id: Option<&str>) -> StateResult<Option<M>> {
        let key = attribute_key(M::TYPE_KEY, id);
        let cached = self
            .store
            .get(&key)
            .await
            .map_err(|e| StateError::store(&key, STORE_NAME, e))?;
        let Some(value) = cached else {
            return Ok(None);
        };
        let mut model = M::with_id(id.map(str::to_owned));
        match value {
            Value::Object(fields) => {
                model
                    .merge_scoped_fields(&fields, Scope::Session)
                    .map_err(|e| StateError::decode(&key, STORE_NAME, e))?;
            }
            Value::String(json) => {
                model
                    .merge_scoped_json(&json, Scope::Session)
                    .map_err(|e| StateError::decode(&key, STORE_NAME, e))?;
            }
            _ => {
                return Err(StateError::decode(
                    &key,
                    STORE_NAME,
                    ModelError::PayloadNotAnObject(M::TYPE_KEY),
                ));
            }
        }
        Ok(Some(model))
    }

    async fn write_model<M: StateModel>(&self, model: &M) -> StateResult<()> {
        let key = model.attribute_key();
        let fields = model
            .to_scoped_map(Scope::Session)
            .map_err(|e| StateError::decode(&key, STORE_NAME, e))?;
        self.store
            .put(&key, Value::Object(fields))
            .await
            .map_err(|e| StateError::store(&key, STORE_NAME, e))?;
        debug!("cached session state for {}", key);
        Ok(())
    }

    async fn remove_model<M: StateModel>(&self, id: Option<&str>) -> StateResult<()> {
        let key = attribute_key(M::TYPE_KEY, id);
        self.store
            .delete(&key)
            .await
            .map_err(|e| StateError::store(&key, STORE_NAME, e))?;
        debug!("evicted session state for {}", key);
        Ok(())
    }
}
