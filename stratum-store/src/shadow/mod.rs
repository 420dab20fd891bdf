//! Shadow store contract and implementations.
//!
//! A shadow service keeps one JSON document per named entity ("thing").
//! Clients publish into the document's `state.desired` section; a separate
//! reporting agent populates `state.reported`, which is what reads come
//! from. Things carry string attributes and can only be queried by
//! attribute equality, not looked up by name.

mod http;
mod memory;

pub use http::{HttpShadowStore, HttpShadowStoreConfig};
pub use memory::InMemoryShadowStore;

use crate::error::StoreResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Attributes attached to a shadow entity at creation time.
pub type ThingAttributes = HashMap<String, String>;

/// Summary of a shadow entity returned from a listing query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThingSummary {
    /// Entity name.
    pub name: String,
    /// Attributes the entity was created with.
    #[serde(default)]
    pub attributes: ThingAttributes,
}

/// Abstract shadow service.
///
/// `update_document` replaces the full document; callers wanting to touch
/// a single node fetch, modify, and republish. Absence of an entity or of
/// its document is reported as `None`, never as an error.
#[async_trait]
pub trait ShadowStore: Send + Sync {
    /// Returns the full shadow document for `thing`, or `None` when the
    /// entity has no document or does not exist.
    async fn get_document(&self, thing: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Publishes `payload` as the full shadow document for `thing`,
    /// replacing any prior document.
    async fn update_document(&self, thing: &str, payload: &str) -> StoreResult<()>;

    /// Lists entities whose attribute `attribute` equals `value`, up to
    /// `limit` results.
    async fn list_things(
        &self,
        attribute: &str,
        value: &str,
        limit: usize,
    ) -> StoreResult<Vec<ThingSummary>>;

    /// Creates a shadow entity. Fails with
    /// [`StoreError::AlreadyExists`](crate::StoreError::AlreadyExists)
    /// when the name is taken.
    async fn create_thing(&self, name: &str, attributes: ThingAttributes) -> StoreResult<()>;
}
