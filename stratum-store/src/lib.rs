//! Backing-store contracts for Stratum.
//!
//! The synchronization layer treats its stores as external collaborators
//! behind three async traits:
//!
//! - [`SessionStore`]: the fast, request-scoped attribute cache the host
//!   runtime carries through one conversation
//! - [`ObjectStore`]: whole-document storage under bucket + path addresses
//! - [`ShadowStore`]: per-entity shadow documents with desired/reported
//!   sections and attribute-based entity lookup
//!
//! Each trait ships with an in-memory implementation; the object store
//! additionally has a filesystem adapter, and both remote stores have
//! plain-REST HTTP clients. Absence of data is always reported as `None`
//! or `false`, never as an error.

mod error;
pub mod object;
pub mod session;
pub mod shadow;

pub use error::{StoreError, StoreResult};
pub use object::{
    FsObjectStore, HttpObjectStore, HttpObjectStoreConfig, InMemoryObjectStore, ObjectStore,
};
pub use session::{InMemorySessionStore, SessionStore};
pub use shadow::{
    HttpShadowStore, HttpShadowStoreConfig, InMemoryShadowStore, ShadowStore, ThingAttributes,
    ThingSummary,
};
