//! Object store contract and implementations.
//!
//! An object store holds whole documents under `bucket` + `path` addresses.
//! Three implementations are provided: in-memory for tests and embedded
//! use, filesystem-backed for local deployments, and an HTTP client for
//! remote object services.

mod fs;
mod http;
mod memory;

pub use fs::FsObjectStore;
pub use http::{HttpObjectStore, HttpObjectStoreConfig};
pub use memory::InMemoryObjectStore;

use crate::error::StoreResult;
use async_trait::async_trait;

/// Abstract object storage.
///
/// Objects are opaque byte blobs addressed by bucket and path. Absence is
/// reported as `None` or `false`, never as an error.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// True when an object exists at `bucket`/`path`.
    async fn exists(&self, bucket: &str, path: &str) -> StoreResult<bool>;

    /// Returns the raw bytes of the object, or `None` when absent.
    async fn get(&self, bucket: &str, path: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Writes `content` as the full object content, creating or replacing it.
    async fn put(&self, bucket: &str, path: &str, content: &str) -> StoreResult<()>;

    /// Deletes the object. Deleting an absent object is a no-op.
    async fn delete(&self, bucket: &str, path: &str) -> StoreResult<()>;
}
