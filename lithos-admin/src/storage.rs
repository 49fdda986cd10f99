//! Object storage client for site-content images
//!
//! Upload mechanics belong to the hosted object store; this client just
//! PUTs bytes and hands back the public URL the site can reference.

use async_trait::async_trait;
use lithos_common::config::ObjectStoreConfig;
use lithos_common::{Error, Result};
use std::time::Duration;
use tracing::debug;

/// Default timeout for object-storage requests (uploads can be slow)
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Object upload seam, faked in tests
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store one object; returns its public URL
    async fn put(&self, object_name: &str, bytes: Vec<u8>, content_type: &str) -> Result<String>;
}

/// HTTP client for the hosted object store
pub struct HttpObjectStore {
    http_client: reqwest::Client,
    base_url: String,
    bucket: String,
    api_key: String,
}

impl HttpObjectStore {
    /// Create a client from the object-store configuration
    pub fn new(config: &ObjectStoreConfig) -> Self {
        Self {
            http_client: reqwest::Client::builder()
                .timeout(DEFAULT_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            bucket: config.bucket.clone(),
            api_key: config.api_key.clone(),
        }
    }

    fn object_url(&self, object_name: &str) -> String {
        format!("{}/{}/{}", self.base_url, self.bucket, object_name)
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    async fn put(&self, object_name: &str, bytes: Vec<u8>, content_type: &str) -> Result<String> {
        let url = self.object_url(object_name);
        let response = self
            .http_client
            .put(&url)
            .header("X-Api-Key", &self.api_key)
            .header("Content-Type", content_type)
            .body(bytes)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Remote(format!(
                "object upload failed: HTTP {}",
                response.status()
            )));
        }

        debug!("Uploaded object {}", object_name);
        Ok(url)
    }
}
