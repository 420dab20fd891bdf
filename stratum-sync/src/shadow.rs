//! Shadow-document strategy.

use crate::context::StateContext;
use crate::engine::RemoteStateStore;
use crate::error::{StateError, StateResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::sync::Arc;
use stratum_model::Scope;
use stratum_store::{ShadowStore, StoreError, ThingAttributes};
use tokio::sync::RwLock;
use tracing::{debug, info};

const STORE_NAME: &str = "shadow";

/// Configuration for [`ShadowStateStore`].
///
/// The attribute names must match what the shadow service's registry is
/// set up to index, since thing lookup goes through attribute search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShadowStateConfig {
    /// Registry attribute carrying the thing name.
    pub name_attribute: String,
    /// Registry attribute carrying the raw user id on user things.
    pub user_attribute: String,
    /// Registry attribute carrying the application id.
    pub application_attribute: String,
}

impl Default for ShadowStateConfig {
    fn default() -> Self {
        Self {
            name_attribute: "name".to_string(),
            user_attribute: "user-id".to_string(),
            application_attribute: "application-id".to_string(),
        }
    }
}

/// Remote store keeping state in per-thing shadow documents.
///
/// Application state lives on one thing shared by every user of the
/// application; user state lives on a per-user thing whose name appends a
/// digest of the user id. Fetches read the reported half of the thing's
/// document, writes graft into the desired half, and things are
/// provisioned lazily on first use.
///
/// Clones share the provisioning cache; construct one store per process
/// and clone it where needed.
#[derive(Clone)]
pub struct ShadowStateStore {
    store: Arc<dyn ShadowStore>,
    context: StateContext,
    config: ShadowStateConfig,
    known_things: Arc<RwLock<HashSet<String>>>,
}

impl ShadowStateStore {
    /// Creates a strategy over the given shadow store.
    pub fn new(store: Arc<dyn ShadowStore>, context: StateContext, config: ShadowStateConfig) -> Self {
        Self {
            store,
            context,
            config,
            known_things: Arc::new(RwLock::new(HashSet::new())),
        }
    }

    /// Thing name backing the given location.
    ///
    /// Registries commonly reject dots, so the application id is flattened;
    /// user ids can carry arbitrary characters and travel as a hex digest.
    fn thing_name(&self, scope: Scope) -> String {
        let application_thing = self.context.application_id.replace('.', "-");
        match scope {
            Scope::Application => application_thing,
            _ => {
                let mut hasher = Sha256::new();
                hasher.update(self.context.user_id.as_bytes());
                format!("{application_thing}-{}", hex::encode(hasher.finalize()))
            }
        }
    }

    async fn thing_exists(&self, thing: &str) -> StateResult<bool> {
        let listing = self
            .store
            .list_things(&self.config.name_attribute, thing, 1)
            .await
            .map_err(|e| StateError::provisioning(thing, e))?;
        Ok(!listing.is_empty())
    }

    /// Makes sure the thing backing `scope` exists, creating it on first
    /// use. Existence, once observed, is cached for the life of the store
    /// and never rechecked.
    async fn ensure_thing(&self, scope: Scope) -> StateResult<String> {
        let thing = self.thing_name(scope);
        if self.known_things.read().await.contains(&thing) {
            return Ok(thing);
        }
        if !self.thing_exists(&thing).await? {
            let mut attributes = ThingAttributes::new();
            attributes.insert(self.config.name_attribute.clone(), thing.clone());
            attributes.insert(
                self.config.application_attribute.clone(),
                self.context.application_id.clone(),
            );
            if scope != Scope::Application {
                attributes.insert(self.config.user_attribute.clone(), self.context.user_id.clone());
            }
            match self.store.create_thing(&thing, attributes).await {
                Ok(()) => info!("provisioned shadow entity {}", thing),
                // Lost a provisioning race; the thing is there either way.
                Err(StoreError::AlreadyExists(_)) => {}
                Err(e) => return Err(StateError::provisioning(&thing, e)),
            }
        }
        self.known_things.write().await.insert(thing.clone());
        Ok(thing)
    }

    /// Fetches and parses the thing's document, treating a missing or
    /// empty document as an empty object.
    async fn shadow_document(&self, thing: &str, key: &str) -> StateResult<Value> {
        let Some(bytes) = self
            .store
            .get_document(thing)
            .await
            .map_err(|e| StateError::store(key, STORE_NAME, e))?
        else {
            return Ok(Value::Object(Map::new()));
        };
        let text = String::from_utf8(bytes).map_err(|e| StateError::encoding(key, STORE_NAME, e))?;
        if text.is_empty() {
            return Ok(Value::Object(Map::new()));
        }
        serde_json::from_str(&text).map_err(|e| StateError::decode(key, STORE_NAME, e.into()))
    }
}

/// Returns the object under `key`, inserting or coercing one as needed.
fn child_object<'a>(map: &'a mut Map<String, Value>, key: &str) -> &'a mut Map<String, Value> {
    let slot = map
        .entry(key.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if !slot.is_object() {
        *slot = Value::Object(Map::new());
    }
    match slot {
        Value::Object(inner) => inner,
        _ => unreachable!("slot was coerced to an object"),
    }
}

#[async_trait]
impl RemoteStateStore for ShadowStateStore {
    fn store_name(&self) -> &'static str {
        STORE_NAME
    }

    async fn fetch(&self, scope: Scope, key: &str) -> StateResult<Option<String>> {
        let thing = self.ensure_thing(scope).await?;
        let document = self.shadow_document(&thing, key).await?;
        let reported = document
            .get("state")
            .and_then(|state| state.get("reported"))
            .and_then(|reported| reported.get(key));
        Ok(reported.map(|value| value.to_string()))
    }

    async fn put(&self, scope: Scope, key: &str, json: &str) -> StateResult<()> {
        let thing = self.ensure_thing(scope).await?;
        let payload: Value =
            serde_json::from_str(json).map_err(|e| StateError::decode(key, STORE_NAME, e.into()))?;
        let document = self.shadow_document(&thing, key).await?;
        let mut root = match document {
            Value::Object(root) => root,
            _ => Map::new(),
        };
        child_object(child_object(&mut root, "state"), "desired").insert(key.to_string(), payload);
        let text = serde_json::to_string(&Value::Object(root))
            .map_err(|e| StateError::decode(key, STORE_NAME, e.into()))?;
        self.store
            .update_document(&thing, &text)
            .await
            .map_err(|e| StateError::store(key, STORE_NAME, e))?;
        debug!("published desired state for {} on {}", key, thing);
        Ok(())
    }

    async fn delete(&self, scope: Scope, key: &str) -> StateResult<()> {
        let thing = self.ensure_thing(scope).await?;
        let mut document = self.shadow_document(&thing, key).await?;
        let Some(desired) = document
            .get_mut("state")
            .and_then(|state| state.get_mut("desired"))
            .and_then(Value::as_object_mut)
        else {
            return Ok(());
        };
        if desired.remove(key).is_none() {
            return Ok(());
        }
        let text = serde_json::to_string(&document)
            .map_err(|e| StateError::decode(key, STORE_NAME, e.into()))?;
        self.store
            .update_document(&thing, &text)
            .await
            .map_err(|e| StateError::store(key, STORE_NAME, e))?;
        debug!("withdrew desired state for {} on {}", key, thing);
        Ok(())
    }
}
