//! HTTP implementation of the SiteRegistry trait.
//!
//! Targets the external client store's REST endpoints:
//! `GET/POST /clients/{id}/sitemap-urls` and
//! `GET/POST /clients/{id}/used-topics`.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::warn;

use crate::error::{AuthoringError, Result};
use crate::traits::SiteRegistry;

/// Registry client over the external client store's HTTP API.
#[derive(Clone)]
pub struct HttpRegistry {
    http_client: Client,
    base_url: String,
}

impl HttpRegistry {
    /// Create a registry client for the store at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, client_id: &str, collection: &str) -> String {
        format!("{}/clients/{}/{}", self.base_url, client_id, collection)
    }

    async fn get_strings(&self, url: &str) -> Result<Vec<String>> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| AuthoringError::Registration(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, url = %url, "registry read rejected");
            return Err(AuthoringError::Registration(format!(
                "registry returned {}",
                status
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AuthoringError::Registration(e.to_string()))
    }

    async fn post_json<B: Serialize>(&self, url: &str, body: &B) -> Result<()> {
        let response = self
            .http_client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| AuthoringError::Registration(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, url = %url, "registry write rejected");
            return Err(AuthoringError::Registration(format!(
                "registry returned {}",
                status
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl SiteRegistry for HttpRegistry {
    async fn sitemap_urls(&self, client_id: &str) -> Result<Vec<String>> {
        self.get_strings(&self.endpoint(client_id, "sitemap-urls"))
            .await
    }

    async fn register_sitemap_url(&self, client_id: &str, url: &str) -> Result<()> {
        self.post_json(
            &self.endpoint(client_id, "sitemap-urls"),
            &serde_json::json!({ "url": url }),
        )
        .await
    }

    async fn used_topics(&self, client_id: &str) -> Result<Vec<String>> {
        self.get_strings(&self.endpoint(client_id, "used-topics"))
            .await
    }

    async fn record_topic(&self, client_id: &str, topic: &str) -> Result<()> {
        self.post_json(
            &self.endpoint(client_id, "used-topics"),
            &serde_json::json!({ "topic": topic }),
        )
        .await
    }
}
