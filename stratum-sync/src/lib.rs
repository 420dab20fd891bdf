//! Scoped state synchronization for Stratum.
//!
//! Stratum persists conversational application state across three widening
//! scopes. Session state lives only in the per-session cache; user and
//! application state additionally fan out to a remote store, and reads
//! merge the remote copies back into the cache so later reads in the same
//! session stay local.
//!
//! ## Components
//!
//! - [`StateHandler`]: the uniform read, write, remove protocol
//! - [`SessionStateHandler`]: cache-only handler for session state
//! - [`StateSyncEngine`]: fan-out writes and merge-on-read over a remote store
//! - [`RemoteStateStore`]: strategy seam for durable backends
//! - [`ObjectStateStore`]: one JSON object per attribute key and location
//! - [`ShadowStateStore`]: desired and reported halves of shadow documents
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use stratum_store::{InMemoryObjectStore, InMemorySessionStore};
//! use stratum_sync::{ObjectStateConfig, StateContext, StateSyncEngine};
//!
//! let engine = StateSyncEngine::with_object_store(
//!     Arc::new(InMemorySessionStore::new()),
//!     Arc::new(InMemoryObjectStore::new()),
//!     StateContext::new("app.demo", "user-1"),
//!     ObjectStateConfig {
//!         bucket: "state".to_string(),
//!         ..Default::default()
//!     },
//! );
//! # let _ = engine;
//! ```

mod context;
mod engine;
mod error;
mod handler;
mod object;
mod session;
mod shadow;

pub use context::StateContext;
pub use engine::{RemoteStateStore, StateSyncEngine};
pub use error::{StateError, StateResult};
pub use handler::StateHandler;
pub use object::{ObjectStateConfig, ObjectStateStore};
pub use session::SessionStateHandler;
pub use shadow::{ShadowStateConfig, ShadowStateStore};
