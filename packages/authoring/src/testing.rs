//! Testing utilities including mock implementations.
//!
//! These are useful for testing applications that use the authoring
//! library without making real AI, registry, or CMS calls.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::{AuthoringError, PublishError, PublishResult, Result};
use crate::schema::ResponseSchema;
use crate::traits::{
    Cms, CreatedPost, GenerativeAI, ImageOptions, MediaUpload, NewPost, SiteRegistry, TextOptions,
    UploadedMedia,
};
use crate::types::FaqEntry;

/// A mock generative AI with deterministic, configurable responses.
///
/// Calls are routed by operation shape: the grounded text call gets
/// the topic, non-grounded text calls are matched on the fixed prompt
/// wording (outline vs body), structured calls on the schema's first
/// field name.
pub struct MockAI {
    topic: Arc<RwLock<String>>,
    outline: Arc<RwLock<String>>,
    body: Arc<RwLock<String>>,
    details: Arc<RwLock<serde_json::Value>>,
    faqs: Arc<RwLock<Vec<FaqEntry>>>,
    image: Arc<RwLock<Vec<u8>>>,
    fail_images: Arc<RwLock<bool>>,
    calls: Arc<RwLock<Vec<MockAICall>>>,
}

/// Record of a call made to the mock AI.
#[derive(Debug, Clone)]
pub enum MockAICall {
    CompleteText { grounded: bool },
    CompleteStructured { first_field: String },
    GenerateImage { prompt: String },
}

impl Default for MockAI {
    fn default() -> Self {
        Self {
            topic: Arc::new(RwLock::new("Default trending topic".to_string())),
            outline: Arc::new(RwLock::new(
                "<h2>Introduction</h2>\n<h2>Main Point</h2>\n<h2>Conclusion</h2>".to_string(),
            )),
            body: Arc::new(RwLock::new(
                "<p>Intro paragraph.</p>\n<h2>Main Point</h2>\n<p>Body paragraph.</p>".to_string(),
            )),
            details: Arc::new(RwLock::new(serde_json::json!({
                "title": "Default Title",
                "angle": "A default angle.",
                "keywords": ["one", "two", "three", "four", "five"],
            }))),
            faqs: Arc::new(RwLock::new(vec![
                FaqEntry {
                    question: "Question one?".to_string(),
                    answer: "Answer one.".to_string(),
                },
                FaqEntry {
                    question: "Question two?".to_string(),
                    answer: "Answer two.".to_string(),
                },
                FaqEntry {
                    question: "Question three?".to_string(),
                    answer: "Answer three.".to_string(),
                },
            ])),
            image: Arc::new(RwLock::new(vec![0xFF, 0xD8, 0xFF, 0xE0])),
            fail_images: Arc::new(RwLock::new(false)),
            calls: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl MockAI {
    /// Create a mock with default responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the topic returned by grounded text calls.
    pub fn with_topic(self, topic: impl Into<String>) -> Self {
        *self.topic.write().unwrap() = topic.into();
        self
    }

    /// Set the structured details response.
    pub fn with_details(
        self,
        title: impl Into<String>,
        angle: impl Into<String>,
        keywords: &[&str],
    ) -> Self {
        *self.details.write().unwrap() = serde_json::json!({
            "title": title.into(),
            "angle": angle.into(),
            "keywords": keywords,
        });
        self
    }

    /// Set a raw structured details response (for malformed payloads).
    pub fn with_raw_details(self, value: serde_json::Value) -> Self {
        *self.details.write().unwrap() = value;
        self
    }

    /// Set the outline text.
    pub fn with_outline(self, outline: impl Into<String>) -> Self {
        *self.outline.write().unwrap() = outline.into();
        self
    }

    /// Set the body HTML.
    pub fn with_body(self, body: impl Into<String>) -> Self {
        *self.body.write().unwrap() = body.into();
        self
    }

    /// Set the FAQ entries.
    pub fn with_faqs(self, faqs: Vec<FaqEntry>) -> Self {
        *self.faqs.write().unwrap() = faqs;
        self
    }

    /// Set the image bytes.
    pub fn with_image(self, bytes: Vec<u8>) -> Self {
        *self.image.write().unwrap() = bytes;
        self
    }

    /// Make every image call fail (service produces zero images).
    pub fn with_failing_images(self) -> Self {
        *self.fail_images.write().unwrap() = true;
        self
    }

    /// Get all calls made to this mock.
    pub fn calls(&self) -> Vec<MockAICall> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl GenerativeAI for MockAI {
    async fn complete_text(&self, prompt: &str, opts: TextOptions) -> Result<String> {
        self.calls.write().unwrap().push(MockAICall::CompleteText {
            grounded: opts.search_grounding,
        });

        if opts.search_grounding {
            return Ok(self.topic.read().unwrap().clone());
        }
        if prompt.starts_with("Based on the following title and angle") {
            return Ok(self.outline.read().unwrap().clone());
        }
        Ok(self.body.read().unwrap().clone())
    }

    async fn complete_structured(
        &self,
        _prompt: &str,
        schema: &ResponseSchema,
    ) -> Result<serde_json::Value> {
        let first_field = schema
            .fields()
            .first()
            .map(|f| f.name.clone())
            .unwrap_or_default();
        self.calls
            .write()
            .unwrap()
            .push(MockAICall::CompleteStructured {
                first_field: first_field.clone(),
            });

        let value = if first_field == "faqs" {
            serde_json::json!({ "faqs": &*self.faqs.read().unwrap() })
        } else {
            self.details.read().unwrap().clone()
        };

        // Same contract as real implementations: validate before return.
        schema.validate(&value)?;
        Ok(value)
    }

    async fn generate_image(&self, prompt: &str, _opts: ImageOptions) -> Result<Vec<u8>> {
        self.calls.write().unwrap().push(MockAICall::GenerateImage {
            prompt: prompt.to_string(),
        });

        if *self.fail_images.read().unwrap() {
            return Err(AuthoringError::ImageGeneration(
                "service produced zero images".into(),
            ));
        }
        Ok(self.image.read().unwrap().clone())
    }
}

/// A mock site registry backed by in-memory maps.
#[derive(Default)]
pub struct MockRegistry {
    urls: Arc<RwLock<HashMap<String, Vec<String>>>>,
    topics: Arc<RwLock<HashMap<String, Vec<String>>>>,
    fail_writes: Arc<RwLock<bool>>,
    fail_reads: Arc<RwLock<bool>>,
    calls: Arc<RwLock<Vec<MockRegistryCall>>>,
}

/// Record of a call made to the mock registry.
#[derive(Debug, Clone)]
pub enum MockRegistryCall {
    SitemapUrls { client_id: String },
    RegisterSitemapUrl { client_id: String, url: String },
    UsedTopics { client_id: String },
    RecordTopic { client_id: String, topic: String },
}

impl MockRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed sitemap URLs for a client.
    pub fn with_urls(
        self,
        client_id: impl Into<String>,
        urls: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.urls
            .write()
            .unwrap()
            .insert(client_id.into(), urls.into_iter().map(|u| u.into()).collect());
        self
    }

    /// Seed used topics for a client.
    pub fn with_topics(
        self,
        client_id: impl Into<String>,
        topics: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.topics.write().unwrap().insert(
            client_id.into(),
            topics.into_iter().map(|t| t.into()).collect(),
        );
        self
    }

    /// Make every write fail.
    pub fn with_failing_writes(self) -> Self {
        *self.fail_writes.write().unwrap() = true;
        self
    }

    /// Make every read fail.
    pub fn with_failing_reads(self) -> Self {
        *self.fail_reads.write().unwrap() = true;
        self
    }

    /// Get all calls made to this mock.
    pub fn calls(&self) -> Vec<MockRegistryCall> {
        self.calls.read().unwrap().clone()
    }

    /// Current sitemap URLs for a client.
    pub fn stored_urls(&self, client_id: &str) -> Vec<String> {
        self.urls
            .read()
            .unwrap()
            .get(client_id)
            .cloned()
            .unwrap_or_default()
    }

    fn check_read(&self) -> Result<()> {
        if *self.fail_reads.read().unwrap() {
            return Err(AuthoringError::Registration("mock read failure".into()));
        }
        Ok(())
    }

    fn check_write(&self) -> Result<()> {
        if *self.fail_writes.read().unwrap() {
            return Err(AuthoringError::Registration("mock write failure".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl SiteRegistry for MockRegistry {
    async fn sitemap_urls(&self, client_id: &str) -> Result<Vec<String>> {
        self.calls
            .write()
            .unwrap()
            .push(MockRegistryCall::SitemapUrls {
                client_id: client_id.to_string(),
            });
        self.check_read()?;
        Ok(self.stored_urls(client_id))
    }

    async fn register_sitemap_url(&self, client_id: &str, url: &str) -> Result<()> {
        self.calls
            .write()
            .unwrap()
            .push(MockRegistryCall::RegisterSitemapUrl {
                client_id: client_id.to_string(),
                url: url.to_string(),
            });
        self.check_write()?;
        self.urls
            .write()
            .unwrap()
            .entry(client_id.to_string())
            .or_default()
            .push(url.to_string());
        Ok(())
    }

    async fn used_topics(&self, client_id: &str) -> Result<Vec<String>> {
        self.calls
            .write()
            .unwrap()
            .push(MockRegistryCall::UsedTopics {
                client_id: client_id.to_string(),
            });
        self.check_read()?;
        Ok(self
            .topics
            .read()
            .unwrap()
            .get(client_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn record_topic(&self, client_id: &str, topic: &str) -> Result<()> {
        self.calls
            .write()
            .unwrap()
            .push(MockRegistryCall::RecordTopic {
                client_id: client_id.to_string(),
                topic: topic.to_string(),
            });
        self.check_write()?;
        self.topics
            .write()
            .unwrap()
            .entry(client_id.to_string())
            .or_default()
            .push(topic.to_string());
        Ok(())
    }
}

/// A mock CMS recording upload/post calls.
pub struct MockCms {
    media_id: u64,
    source_url: String,
    link: String,
    fail_upload: Option<(u16, String)>,
    fail_post: Option<(u16, String)>,
    calls: Arc<RwLock<Vec<MockCmsCall>>>,
}

/// Record of a call made to the mock CMS.
#[derive(Debug, Clone)]
pub enum MockCmsCall {
    UploadMedia { filename: String, title: String },
    CreatePost {
        title: String,
        status: String,
        featured_media: u64,
    },
}

impl Default for MockCms {
    fn default() -> Self {
        Self {
            media_id: 42,
            source_url: "https://blog.example.com/wp-content/uploads/featured.jpg".to_string(),
            link: "https://blog.example.com/?p=101".to_string(),
            fail_upload: None,
            fail_post: None,
            calls: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl MockCms {
    /// Create a mock CMS with default responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the permalink returned on post creation.
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = link.into();
        self
    }

    /// Set the media id returned on upload.
    pub fn with_media_id(mut self, id: u64) -> Self {
        self.media_id = id;
        self
    }

    /// Make the media upload fail with the given status/message.
    pub fn with_failing_upload(mut self, status: u16, message: impl Into<String>) -> Self {
        self.fail_upload = Some((status, message.into()));
        self
    }

    /// Make the post creation fail with the given status/message.
    pub fn with_failing_post(mut self, status: u16, message: impl Into<String>) -> Self {
        self.fail_post = Some((status, message.into()));
        self
    }

    /// Get all calls made to this mock.
    pub fn calls(&self) -> Vec<MockCmsCall> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl Cms for MockCms {
    async fn upload_media(&self, upload: MediaUpload) -> PublishResult<UploadedMedia> {
        self.calls.write().unwrap().push(MockCmsCall::UploadMedia {
            filename: upload.filename,
            title: upload.title,
        });

        if let Some((status, message)) = &self.fail_upload {
            return Err(PublishError::Media {
                status: *status,
                message: message.clone(),
            });
        }

        Ok(UploadedMedia {
            id: self.media_id,
            source_url: self.source_url.clone(),
        })
    }

    async fn create_post(&self, post: NewPost) -> PublishResult<CreatedPost> {
        self.calls.write().unwrap().push(MockCmsCall::CreatePost {
            title: post.title,
            status: post.status.as_str().to_string(),
            featured_media: post.featured_media,
        });

        if let Some((status, message)) = &self.fail_post {
            return Err(PublishError::Post {
                status: *status,
                message: message.clone(),
            });
        }

        Ok(CreatedPost {
            link: self.link.clone(),
        })
    }
}
