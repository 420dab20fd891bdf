//! Error taxonomy for state synchronization.

use stratum_model::ModelError;
use stratum_store::StoreError;
use thiserror::Error;

/// Convenience alias for synchronization results.
pub type StateResult<T> = Result<T, StateError>;

/// Errors surfaced by state handlers.
///
/// Variants carry the attribute key (or shadow entity name) involved and
/// the store that failed, so a fan-out across several stores stays
/// diagnosable from the error alone.
#[derive(Debug, Error)]
pub enum StateError {
    /// A state payload could not be decoded into, or produced from, its model.
    #[error("invalid state payload for `{key}` in the {store} store: {source}")]
    Decode {
        key: String,
        store: &'static str,
        #[source]
        source: ModelError,
    },

    /// A backing store failed an operation.
    #[error("{store} store operation on `{key}` failed: {source}")]
    Store {
        key: String,
        store: &'static str,
        #[source]
        source: StoreError,
    },

    /// Fetched payload bytes were not valid UTF-8.
    #[error("state payload for `{key}` in the {store} store is not valid UTF-8: {source}")]
    Encoding {
        key: String,
        store: &'static str,
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// A shadow entity could not be located or created.
    #[error("provisioning shadow entity `{thing}` failed: {source}")]
    Provisioning {
        thing: String,
        #[source]
        source: StoreError,
    },
}

impl StateError {
    /// Decode failure for `key` in the named store.
    pub fn decode(key: impl Into<String>, store: &'static str, source: ModelError) -> Self {
        Self::Decode {
            key: key.into(),
            store,
            source,
        }
    }

    /// Store failure for `key` in the named store.
    pub fn store(key: impl Into<String>, store: &'static str, source: StoreError) -> Self {
        Self::Store {
            key: key.into(),
            store,
            source,
        }
    }

    /// UTF-8 failure for `key` in the named store.
    pub fn encoding(
        key: impl Into<String>,
        store: &'static str,
        source: std::string::FromUtf8Error,
    ) -> Self {
        Self::Encoding {
            key: key.into(),
            store,
            source,
        }
    }

    /// Provisioning failure for the named shadow entity.
    pub fn provisioning(thing: impl Into<String>, source: StoreError) -> Self {
        Self::Provisioning {
            thing: thing.into(),
            source,
        }
    }
}
