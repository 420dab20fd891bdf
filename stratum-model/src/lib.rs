//! Scoped state-model contract for Stratum.
//!
//! Defines what a persistable state type looks like, independent of any
//! backing store:
//!
//! - **Scope**: the three visibility tiers (session, user, application)
//!   and the breadth ordering between them
//! - **StateModel**: the trait a state type implements to declare its type
//!   key, id, and field-to-scope mapping; scoped serialization and merging
//!   come for free from the type's serde representation
//! - **Attribute keys**: the stable `type[:id]` addresses under which model
//!   instances live in every store
//!
//! The synchronization engine and the backing-store adapters live in
//! `stratum-sync` and `stratum-store`; this crate carries no store or
//! runtime dependencies.

mod error;
mod key;
mod model;
mod scope;

pub use error::{ModelError, ModelResult};
pub use key::attribute_key;
pub use model::StateModel;
pub use scope::Scope;
