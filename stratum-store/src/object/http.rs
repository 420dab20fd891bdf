//! HTTP object store client.
//!
//! Speaks a plain REST protocol: `HEAD`/`GET`/`PUT`/`DELETE` on
//! `{base}/{bucket}/{path}`, where 404 means the object is absent. Works
//! against any object service exposing that surface.

use crate::error::{StoreError, StoreResult};
use crate::object::ObjectStore;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Configuration for [`HttpObjectStore`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpObjectStoreConfig {
    /// Base URL of the object service, without a trailing slash.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for HttpObjectStoreConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_secs: 60,
        }
    }
}

/// Object store backed by an HTTP object service.
pub struct HttpObjectStore {
    config: HttpObjectStoreConfig,
    client: Client,
}

impl HttpObjectStore {
    /// Creates a client for the service at `config.base_url`.
    pub fn new(config: HttpObjectStoreConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("failed to create HTTP client");
        Self { config, client }
    }

    fn object_url(&self, bucket: &str, path: &str) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        format!(
            "{}/{}/{}",
            base,
            urlencoding::encode(bucket),
            encode_path(path)
        )
    }
}

/// Percent-encodes each path segment, keeping `/` separators intact.
fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    async fn exists(&self, bucket: &str, path: &str) -> StoreResult<bool> {
        let url = self.object_url(bucket, path);
        let response = self.client.head(&url).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            status if status.is_success() => Ok(true),
            status => Err(StoreError::Object(format!(
                "unexpected status {status} probing {url}"
            ))),
        }
    }

    async fn get(&self, bucket: &str, path: &str) -> StoreResult<Option<Vec<u8>>> {
        let url = self.object_url(bucket, path);
        let response = self.client.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(StoreError::Object(format!(
                "fetch of {url} failed with status {}",
                response.status()
            )));
        }
        Ok(Some(response.bytes().await?.to_vec()))
    }

    async fn put(&self, bucket: &str, path: &str, content: &str) -> StoreResult<()> {
        let url = self.object_url(bucket, path);
        let response = self
            .client
            .put(&url)
            .header("content-type", "application/json")
            .body(content.to_string())
            .send()
            .await?;
        if !response.status().is_success() {
            let status = response.status();
            let error = response.text().await.unwrap_or_default();
            return Err(StoreError::Object(format!(
                "write to {url} failed with status {status}: {error}"
            )));
        }
        debug!("stored object at {} ({} bytes)", url, content.len());
        Ok(())
    }

    async fn delete(&self, bucket: &str, path: &str) -> StoreResult<()> {
        let url = self.object_url(bucket, path);
        let response = self.client.delete(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND || response.status().is_success() {
            debug!("deleted object at {}", url);
            return Ok(());
        }
        Err(StoreError::Object(format!(
            "delete of {url} failed with status {}",
            response.status()
        )))
    }
}
