//! Client profile types - identity plus voice/strategy configuration.

use secrecy::SecretString;
use serde::Deserialize;

/// CMS connection credentials for a client.
///
/// The application password is wrapped in [`SecretString`] so it never
/// lands in logs or debug output.
#[derive(Debug, Clone, Deserialize)]
pub struct CmsCredentials {
    /// Base URL of the CMS site, e.g. "https://blog.example.com"
    pub site_url: String,

    /// CMS username for Basic auth
    pub username: String,

    /// Application password for Basic auth
    pub app_password: SecretString,
}

impl CmsCredentials {
    /// Create new credentials.
    pub fn new(
        site_url: impl Into<String>,
        username: impl Into<String>,
        app_password: impl Into<String>,
    ) -> Self {
        Self {
            site_url: site_url.into(),
            username: username.into(),
            app_password: app_password.into().into(),
        }
    }
}

/// A client profile: identity plus the voice/strategy configuration
/// that conditions every generation step.
///
/// Owned by the external client store; the pipeline receives its own
/// copy per run. `id` is immutable once assigned. `known_urls` may
/// grow during a run (the new article is appended via the registry)
/// but is never shrunk.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientProfile {
    /// Opaque stable identifier assigned by the client store
    pub id: String,

    /// Display name of the client business
    pub name: String,

    /// Industry the client operates in
    pub industry: String,

    /// Public website URL, used to build new article URLs
    pub website_url: String,

    /// What sets the client apart from competitors
    pub unique_value_prop: String,

    /// Voice the content should be written in
    pub brand_voice: String,

    /// Editorial strategy guiding every article
    pub content_strategy: String,

    /// Known published page URLs, in insertion order. The allowed set
    /// for internal linking.
    #[serde(default)]
    pub known_urls: Vec<String>,

    /// CMS credentials for publishing
    pub cms: CmsCredentials,
}

impl ClientProfile {
    /// Create a profile with empty known URLs.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        industry: impl Into<String>,
        website_url: impl Into<String>,
        unique_value_prop: impl Into<String>,
        brand_voice: impl Into<String>,
        content_strategy: impl Into<String>,
        cms: CmsCredentials,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            industry: industry.into(),
            website_url: website_url.into(),
            unique_value_prop: unique_value_prop.into(),
            brand_voice: brand_voice.into(),
            content_strategy: content_strategy.into(),
            known_urls: Vec::new(),
            cms,
        }
    }

    /// Set the known URLs.
    pub fn with_known_urls(mut self, urls: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.known_urls = urls.into_iter().map(|u| u.into()).collect();
        self
    }
}
