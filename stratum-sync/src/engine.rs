//! The synchronization engine.
//!
//! [`StateSyncEngine`] layers a remote store over the session cache. Writes
//! land in the cache and fan out to the remote locations a model declares
//! fields for; reads merge remote state into the cached model and write the
//! merged result back, so later reads in the same session are served
//! locally.

use crate::context::StateContext;
use crate::error::{StateError, StateResult};
use crate::handler::StateHandler;
use crate::object::{ObjectStateConfig, ObjectStateStore};
use crate::session::SessionStateHandler;
use crate::shadow::{ShadowStateConfig, ShadowStateStore};
use async_trait::async_trait;
use std::sync::Arc;
use stratum_model::{attribute_key, Scope, StateModel};
use stratum_store::{ObjectStore, SessionStore, ShadowStore};
use tracing::debug;

/// Store strategy for state that outlives the session.
///
/// Implementations are only ever asked about the [`Scope::User`] and
/// [`Scope::Application`] locations; session state never leaves the session
/// cache. Payloads are the JSON field maps produced by scoped
/// serialization.
#[async_trait]
pub trait RemoteStateStore: Send + Sync {
    /// Short store label used in error reports.
    fn store_name(&self) -> &'static str;

    /// Fetches the payload stored for `key` at the given location.
    async fn fetch(&self, scope: Scope, key: &str) -> StateResult<Option<String>>;

    /// Stores a payload for `key` at the given location.
    async fn put(&self, scope: Scope, key: &str, json: &str) -> StateResult<()>;

    /// Deletes any payload stored for `key` at the given location.
    ///
    /// Deleting an absent payload is not an error.
    async fn delete(&self, scope: Scope, key: &str) -> StateResult<()>;
}

/// Handler that synchronizes scoped state between the session cache and a
/// remote store.
pub struct StateSyncEngine {
    session: SessionStateHandler,
    remote: Arc<dyn RemoteStateStore>,
}

impl StateSyncEngine {
    /// Builds an engine over an explicit remote store strategy.
    pub fn new(session_store: Arc<dyn SessionStore>, remote: Arc<dyn RemoteStateStore>) -> Self {
        Self {
            session: SessionStateHandler::new(session_store),
            remote,
        }
    }

    /// Builds an engine whose durable state lives in object storage.
    pub fn with_object_store(
        session_store: Arc<dyn SessionStore>,
        object_store: Arc<dyn ObjectStore>,
        context: StateContext,
        config: ObjectStateConfig,
    ) -> Self {
        let remote = ObjectStateStore::new(object_store, context, config);
        Self::new(session_store, Arc::new(remote))
    }

    /// Builds an engine whose durable state lives in shadow documents.
    pub fn with_shadow_store(
        session_store: Arc<dyn SessionStore>,
        shadow_store: Arc<dyn ShadowStore>,
        context: StateContext,
        config: ShadowStateConfig,
    ) -> Self {
        let remote = ShadowStateStore::new(shadow_store, context, config);
        Self::new(session_store, Arc::new(remote))
    }

    /// The session half of the engine.
    pub fn session(&self) -> &SessionStateHandler {
        &self.session
    }

    /// The remote store strategy.
    pub fn remote(&self) -> &Arc<dyn RemoteStateStore> {
        &self.remote
    }

    /// Merges the remote payload for `scope` into `model`, returning true
    /// when at least one field was applied.
    async fn merge_remote<M: StateModel>(&self, model: &mut M, scope: Scope) -> StateResult<bool> {
        if !M::has_fields_in(scope) {
            return Ok(false);
        }
        let key = model.attribute_key();
        let Some(payload) = self.remote.fetch(scope, &key).await? else {
            return Ok(false);
        };
        model
            .merge_scoped_json(&payload, scope)
            .map_err(|e| StateError::decode(&key, self.remote.store_name(), e))
    }
}

#[async_trait]
impl StateHandler for StateSyncEngine {
    async fn read_model<M: StateModel>(&self, id: Option<&str>) -> StateResult<Option<M>> {
        let cached: Option<M> = self.session.read_model(id).await?;
        let had_session_state = cached.is_some();
        let mut model = match cached {
            Some(model) => model,
            None => M::with_id(id.map(str::to_owned)),
        };
        let mut changed = self.merge_remote(&mut model, Scope::User).await?;
        changed |= self.merge_remote(&mut model, Scope::Application).await?;
        if changed {
            self.session.write_model(&model).await?;
            return Ok(Some(model));
        }
        Ok(had_session_state.then_some(model))
    }

    async fn write_model<M: StateModel>(&self, model: &M) -> StateResult<()> {
        self.session.write_model(model).await?;
        let key = model.attribute_key();
        if M::has_fields_in(Scope::User) {
            let payload = model
                .to_scoped_json(Scope::User)
                .map_err(|e| StateError::decode(&key, self.remote.store_name(), e))?;
            self.remote.put(Scope::User, &key, &payload).await?;
        }
        if M::has_fields_in(Scope::Application) {
            let payload = model
                .to_scoped_json(Scope::Application)
                .map_err(|e| StateError::decode(&key, self.remote.store_name(), e))?;
            self.remote.put(Scope::Application, &key, &payload).await?;
        }
        debug!("synchronized {} across stores", key);
        Ok(())
    }

    async fn remove_model<M: StateModel>(&self, id: Option<&str>) -> StateResult<()> {
        self.session.remove_model::<M>(id).await?;
        let key = attribute_key(M::TYPE_KEY, id);
        // Session-visible fields broaden the delete to the user location.
        if M::has_fields_in(Scope::Session) || M::has_fields_in(Scope::User) {
            self.remote.delete(Scope::User, &key).await?;
        }
        if M::has_fields_in(Scope::Application) {
            self.remote.delete(Scope::Application, &key).await?;
        }
        debug!("removed {} from all stores", key);
        Ok(())
    }
}
