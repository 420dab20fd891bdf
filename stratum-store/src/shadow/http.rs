//! HTTP shadow service client.
//!
//! Speaks a plain REST protocol:
//!
//! - `GET {base}/things/{name}/shadow` returns the document, 404 when absent
//! - `PUT {base}/things/{name}/shadow` replaces the document
//! - `GET {base}/things?attribute=&value=&limit=` lists matching things
//! - `POST {base}/things` creates a thing, 409 when the name is taken

use crate::error::{StoreError, StoreResult};
use crate::shadow::{ShadowStore, ThingAttributes, ThingSummary};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Configuration for [`HttpShadowStore`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpShadowStoreConfig {
    /// Base URL of the shadow service, without a trailing slash.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for HttpShadowStoreConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_secs: 60,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ThingListResponse {
    #[serde(default)]
    things: Vec<ThingSummary>,
}

#[derive(Debug, Serialize)]
struct CreateThingRequest<'a> {
    name: &'a str,
    attributes: &'a ThingAttributes,
}

/// Shadow store backed by an HTTP shadow service.
pub struct HttpShadowStore {
    config: HttpShadowStoreConfig,
    client: Client,
}

impl HttpShadowStore {
    /// Creates a client for the service at `config.base_url`.
    pub fn new(config: HttpShadowStoreConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("failed to create HTTP client");
        Self { config, client }
    }

    fn things_url(&self) -> String {
        format!("{}/things", self.config.base_url.trim_end_matches('/'))
    }

    fn shadow_url(&self, thing: &str) -> String {
        format!("{}/{}/shadow", self.things_url(), urlencoding::encode(thing))
    }
}

#[async_trait]
impl ShadowStore for HttpShadowStore {
    async fn get_document(&self, thing: &str) -> StoreResult<Option<Vec<u8>>> {
        let url = self.shadow_url(thing);
        let response = self.client.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(StoreError::Shadow(format!(
                "fetch of {url} failed with status {}",
                response.status()
            )));
        }
        Ok(Some(response.bytes().await?.to_vec()))
    }

    async fn update_document(&self, thing: &str, payload: &str) -> StoreResult<()> {
        let url = self.shadow_url(thing);
        let response = self
            .client
            .put(&url)
            .header("content-type", "application/json")
            .body(payload.to_string())
            .send()
            .await?;
        if !response.status().is_success() {
            let status = response.status();
            let error = response.text().await.unwrap_or_default();
            return Err(StoreError::Shadow(format!(
                "update of {url} failed with status {status}: {error}"
            )));
        }
        debug!("published shadow document to {}", url);
        Ok(())
    }

    async fn list_things(
        &self,
        attribute: &str,
        value: &str,
        limit: usize,
    ) -> StoreResult<Vec<ThingSummary>> {
        let limit = limit.to_string();
        let response = self
            .client
            .get(self.things_url())
            .query(&[("attribute", attribute), ("value", value), ("limit", &limit)])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(StoreError::Shadow(format!(
                "thing listing failed with status {}",
                response.status()
            )));
        }
        let listing: ThingListResponse = response.json().await?;
        Ok(listing.things)
    }

    async fn create_thing(&self, name: &str, attributes: ThingAttributes) -> StoreResult<()> {
        let response = self
            .client
            .post(self.things_url())
            .json(&CreateThingRequest { name, attributes: &attributes })
            .send()
            .await?;
        if response.status() == StatusCode::CONFLICT {
            return Err(StoreError::AlreadyExists(name.to_string()));
        }
        if !response.status().is_success() {
            let status = response.status();
            let error = response.text().await.unwrap_or_default();
            return Err(StoreError::Shadow(format!(
                "thing creation failed with status {status}: {error}"
            )));
        }
        debug!("created shadow entity {}", name);
        Ok(())
    }
}
