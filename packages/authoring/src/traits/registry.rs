//! SiteRegistry trait - the external URL-registration collaborator.
//!
//! Durable per-client state (known page URLs, previously used topics)
//! lives in an external CRUD store; the pipeline only appends to it
//! and re-reads it. The pipeline itself is stateless between runs.

use async_trait::async_trait;

use crate::error::Result;

/// External store of per-client sitemap URLs and used topics.
#[async_trait]
pub trait SiteRegistry: Send + Sync {
    /// All known page URLs for a client, in insertion order.
    async fn sitemap_urls(&self, client_id: &str) -> Result<Vec<String>>;

    /// Append a newly published page URL for a client.
    ///
    /// Append-only: concurrent registrations for the same client may
    /// race, and eventual consistency is accepted - losing this
    /// bookkeeping race never affects already-generated content.
    async fn register_sitemap_url(&self, client_id: &str, url: &str) -> Result<()>;

    /// Topics already covered for a client.
    async fn used_topics(&self, client_id: &str) -> Result<Vec<String>>;

    /// Record a topic as covered.
    async fn record_topic(&self, client_id: &str, topic: &str) -> Result<()>;
}
