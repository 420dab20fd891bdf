//! In-memory shadow store.

use crate::error::{StoreError, StoreResult};
use crate::shadow::{ShadowStore, ThingAttributes, ThingSummary};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct ThingEntry {
    attributes: ThingAttributes,
    document: Option<Value>,
}

/// Shadow store backed by a process-local map.
///
/// Documents are upserted by name, mirroring services that accept shadow
/// updates for names that were never registered; only created things show
/// up in listings. The reported section is normally written by an external
/// agent, so tests stand in for it via [`set_reported`](Self::set_reported).
#[derive(Debug, Default)]
pub struct InMemoryShadowStore {
    things: RwLock<HashMap<String, ThingEntry>>,
}

impl InMemoryShadowStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes `value` under `state.reported.{attribute_key}` of the
    /// thing's document, standing in for the external reporting agent.
    pub async fn set_reported(&self, thing: &str, attribute_key: &str, value: Value) {
        let mut things = self.things.write().await;
        let entry = things.entry(thing.to_string()).or_default();
        let document = entry
            .document
            .get_or_insert_with(|| Value::Object(Map::new()));
        if !document.is_object() {
            *document = Value::Object(Map::new());
        }
        if let Value::Object(root) = document {
            let reported = child_object(child_object(root, "state"), "reported");
            reported.insert(attribute_key.to_string(), value);
        }
    }

    /// Returns the node stored under `state.desired.{attribute_key}` of
    /// the thing's document, if any.
    pub async fn desired(&self, thing: &str, attribute_key: &str) -> Option<Value> {
        let things = self.things.read().await;
        things
            .get(thing)?
            .document
            .as_ref()?
            .get("state")?
            .get("desired")?
            .get(attribute_key)
            .cloned()
    }

    /// Number of created things.
    pub async fn thing_count(&self) -> usize {
        self.things.read().await.len()
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
impl ShadowStore for InMemoryShadowStore {
    async fn get_document(&self, thing: &str) -> StoreResult<Option<Vec<u8>>> {
        let things = self.things.read().await;
        let Some(document) = things.get(thing).and_then(|entry| entry.document.as_ref()) else {
            return Ok(None);
        };
        let bytes = serde_json::to_vec(document)
            .map_err(|e| StoreError::Shadow(format!("failed to encode document: {e}")))?;
        Ok(Some(bytes))
    }

    async fn update_document(&self, thing: &str, payload: &str) -> StoreResult<()> {
        let document: Value = serde_json::from_str(payload)
            .map_err(|e| StoreError::Shadow(format!("invalid document payload: {e}")))?;
        let mut things = self.things.write().await;
        let entry = things.entry(thing.to_string()).or_default();
        entry.document = Some(document);
        Ok(())
    }

    async fn list_things(
        &self,
        attribute: &str,
        value: &str,
        limit: usize,
    ) -> StoreResult<Vec<ThingSummary>> {
        let things = self.things.read().await;
        Ok(things
            .iter()
            .filter(|(_, entry)| entry.attributes.get(attribute).map(String::as_str) == Some(value))
            .take(limit)
            .map(|(name, entry)| ThingSummary {
                name: name.clone(),
                attributes: entry.attributes.clone(),
            })
            .collect())
    }

    async fn create_thing(&self, name: &str, attributes: ThingAttributes) -> StoreResult<()> {
        let mut things = self.things.write().await;
        if things.contains_key(name) {
            return Err(StoreError::AlreadyExists(name.to_string()));
        }
        things.insert(
            name.to_string(),
            ThingEntry {
                attributes,
                document: None,
            },
        );
        Ok(())
    }
}
