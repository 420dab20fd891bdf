use crate::error::StateResult;
use async_trait::async_trait;
use stratum_model::StateModel;

/// Uniform protocol for reading, writing, and removing scoped state.
///
/// Which stores participate depends on the handler: a session handler
/// touches only the session cache, while the sync engine additionally fans
/// out to a remote store for user and application state. Callers address
/// models by their optional instance id; the singleton instance of a type
/// is addressed with `None`.
#[async_trait]
pub trait StateHandler: Send + Sync {
    /// Builds a fresh model bound to `id` without touching any store.
    fn create_model<M: StateModel>(&self, id: Option<&str>) -> M {
        M::with_id(id.map(str::to_owned))
    }

    /// Reads the model's state from every participating store.
    ///
    /// Returns `None` when no store holds state for the instance.
    async fn read_model<M: StateModel>(&self, id: Option<&str>) -> StateResult<Option<M>>;

    /// Persists the model's fields to every store responsible for them.
    async fn write_model<M: StateModel>(&self, model: &M) -> StateResult<()>;

    /// Deletes the instance's state from every participating store.
    ///
    /// Removing state that was never written is not an error.
    async fn remove_model<M: StateModel>(&self, id: Option<&str>) -> StateResult<()>;
}
