//! Filesystem-backed object store.

use crate::error::StoreResult;
use crate::object::ObjectStore;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Object store rooted at a local directory.
///
/// Buckets map to directories under the root and object paths to files
/// below them, so `("state", "user-1/counter.json")` lands at
/// `{root}/state/user-1/counter.json`. Parent directories are created on
/// write.
#[derive(Debug, Clone)]
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    /// Creates a store rooted at `root`. The directory itself is created
    /// lazily on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory of this store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn object_path(&self, bucket: &str, path: &str) -> PathBuf {
        self.root.join(bucket).join(path)
    }
}

#[async_trait]
impl ObjectStore for FsObjectStore {
    async fn exists(&self, bucket: &str, path: &str) -> StoreResult<bool> {
        Ok(fs::try_exists(self.object_path(bucket, path)).await?)
    }

    async fn get(&self, bucket: &str, path: &str) -> StoreResult<Option<Vec<u8>>> {
        match fs::read(self.object_path(bucket, path)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn put(&self, bucket: &str, path: &str, content: &str) -> StoreResult<()> {
        let file = self.object_path(bucket, path);
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&file, content).await?;
        debug!("wrote object {} ({} bytes)", file.display(), content.len());
        Ok(())
    }

    async fn delete(&self, bucket: &str, path: &str) -> StoreResult<()> {
        let file = self.object_path(bucket, path);
        match fs::remove_file(&file).await {
            Ok(()) => {
                debug!("deleted object {}", file.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
