//! The pipeline orchestrator - a fixed, strictly sequential stage machine.
//!
//! `FindingTopic -> GeneratingDetails -> GeneratingOutline ->
//! GeneratingBody -> GeneratingFeaturedImage -> RegisteringUrl`, then
//! Done. Any error in the first five stages aborts the run and
//! propagates with the stage name attached; RegisteringUrl failures
//! are logged and swallowed because the article is already fully
//! formed without that bookkeeping.

use std::fmt;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::corpus::LinkCorpus;
use crate::error::{AuthoringError, Result};
use crate::linkcheck::audit_links;
use crate::pipeline::body::{find_headings, insert_image_after_heading, strip_code_fences};
use crate::pipeline::faq::{faq_schema, parse_faq_response, render_faq_block};
use crate::pipeline::prompts;
use crate::schema::{FieldKind, ResponseSchema};
use crate::slug::slugify;
use crate::traits::{GenerativeAI, ImageOptions, SiteRegistry, TextOptions};
use crate::types::{Article, ClientProfile, PipelineConfig};

/// One discrete step of the generation pipeline, bound to exactly one
/// external call and one progress message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    FindingTopic,
    GeneratingDetails,
    GeneratingOutline,
    GeneratingBody,
    GeneratingFeaturedImage,
    RegisteringUrl,
}

impl Stage {
    /// The fixed message emitted before this stage does its work, so
    /// a UI can render "currently doing X" rather than "just did X".
    pub fn progress_message(&self) -> &'static str {
        match self {
            Stage::FindingTopic => "Finding trending topic...",
            Stage::GeneratingDetails => "Generating title, angle, and keywords...",
            Stage::GeneratingOutline => "Creating blog post outline...",
            Stage::GeneratingBody => "Writing full blog post content...",
            Stage::GeneratingFeaturedImage => "Generating featured image...",
            Stage::RegisteringUrl => "Registering article URL...",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::FindingTopic => "FindingTopic",
            Stage::GeneratingDetails => "GeneratingDetails",
            Stage::GeneratingOutline => "GeneratingOutline",
            Stage::GeneratingBody => "GeneratingBody",
            Stage::GeneratingFeaturedImage => "GeneratingFeaturedImage",
            Stage::RegisteringUrl => "RegisteringUrl",
        };
        f.write_str(name)
    }
}

/// Structured details response: title, angle, keywords.
#[derive(Debug, Clone, Deserialize)]
pub struct BlogDetails {
    pub title: String,
    pub angle: String,
    pub keywords: Vec<String>,
}

/// The declarative schema for the details call.
pub fn details_schema() -> ResponseSchema {
    ResponseSchema::new()
        .required("title", FieldKind::Str)
        .describe("A compelling, SEO-friendly blog post title.")
        .required("angle", FieldKind::Str)
        .describe("A unique angle or perspective for the article.")
        .required("keywords", FieldKind::StrArray)
        .describe("A list of 5-7 relevant SEO keywords.")
}

/// Allowed keyword count range. Array length cannot be expressed in
/// the declarative schema, so the stage checks it separately.
const KEYWORD_RANGE: (usize, usize) = (5, 7);

fn validate_keyword_count(keywords: &[String]) -> Result<()> {
    if keywords.len() < KEYWORD_RANGE.0 || keywords.len() > KEYWORD_RANGE.1 {
        return Err(AuthoringError::SchemaValidation {
            reason: format!(
                "expected {}-{} keywords, got {}",
                KEYWORD_RANGE.0,
                KEYWORD_RANGE.1,
                keywords.len()
            ),
        });
    }
    Ok(())
}

/// The generation pipeline.
///
/// Holds no per-run state: each [`run`](Pipeline::run) operates on its
/// own copy of the client profile, so concurrent runs for different
/// clients never race on shared memory. There is no cancellation
/// primitive - a started run proceeds to completion or failure.
pub struct Pipeline<A, R> {
    ai: A,
    registry: R,
    config: PipelineConfig,
}

impl<A: GenerativeAI, R: SiteRegistry> Pipeline<A, R> {
    /// Create a pipeline over a generative service and URL registry.
    pub fn new(ai: A, registry: R) -> Self {
        Self {
            ai,
            registry,
            config: PipelineConfig::default(),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// Run the full pipeline for `client`, producing an [`Article`].
    ///
    /// `on_progress` receives each stage's fixed message before the
    /// stage performs its work. On success the client's `known_urls`
    /// are refreshed from the registry so subsequent runs see the new
    /// page; a failed refresh never shrinks the list.
    pub async fn run(
        &self,
        client: &mut ClientProfile,
        on_progress: impl Fn(&str),
    ) -> Result<Article> {
        let corpus = LinkCorpus::new(client.known_urls.iter().cloned());

        on_progress(Stage::FindingTopic.progress_message());
        let topic = self
            .find_topic(client, &corpus)
            .await
            .map_err(|e| e.at_stage(Stage::FindingTopic))?;
        info!(client_id = %client.id, topic = %topic, "topic selected");

        on_progress(Stage::GeneratingDetails.progress_message());
        let details = self
            .generate_details(client, &corpus, &topic)
            .await
            .map_err(|e| e.at_stage(Stage::GeneratingDetails))?;

        on_progress(Stage::GeneratingOutline.progress_message());
        let outline = self
            .ai
            .complete_text(
                &prompts::format_outline_prompt(&details.title, &details.angle),
                TextOptions::default(),
            )
            .await
            .map_err(|e| e.at_stage(Stage::GeneratingOutline))?;

        on_progress(Stage::GeneratingBody.progress_message());
        let body_html = self
            .generate_body(client, &corpus, &details, &outline)
            .await
            .map_err(|e| e.at_stage(Stage::GeneratingBody))?;

        on_progress(Stage::GeneratingFeaturedImage.progress_message());
        let featured_image = self
            .ai
            .generate_image(
                &prompts::featured_image_prompt(&details.title, &details.angle),
                ImageOptions::default(),
            )
            .await
            .map_err(|e| e.at_stage(Stage::GeneratingFeaturedImage))?;

        on_progress(Stage::RegisteringUrl.progress_message());
        if let Err(e) = self.register_url(client, &details.title).await {
            // The article is fully formed and usable without this
            // bookkeeping; log and return Done anyway.
            warn!(
                client_id = %client.id,
                error = %e,
                "URL registration failed; continuing"
            );
        }

        Ok(Article {
            title: details.title,
            angle: details.angle,
            keywords: details.keywords,
            outline,
            body_html,
            featured_image,
            generated_at: chrono::Utc::now(),
        })
    }

    /// FindingTopic: search-grounded topic discovery, biased away from
    /// already-covered pages and topics. Records the chosen topic in
    /// the registry fire-and-forget.
    async fn find_topic(&self, client: &ClientProfile, corpus: &LinkCorpus) -> Result<String> {
        let used_topics = match self.registry.used_topics(&client.id).await {
            Ok(topics) => topics,
            Err(e) => {
                warn!(client_id = %client.id, error = %e, "could not fetch used topics");
                Vec::new()
            }
        };

        let prompt = prompts::format_topic_prompt(&client.industry, corpus.all(), &used_topics);
        let topic = self.ai.complete_text(&prompt, TextOptions::grounded()).await?;

        if let Err(e) = self.registry.record_topic(&client.id, &topic).await {
            warn!(client_id = %client.id, error = %e, "could not record topic");
        }

        Ok(topic)
    }

    /// GeneratingDetails: structured title/angle/keywords.
    async fn generate_details(
        &self,
        client: &ClientProfile,
        corpus: &LinkCorpus,
        topic: &str,
    ) -> Result<BlogDetails> {
        let prompt = prompts::format_details_prompt(
            &client.industry,
            &client.unique_value_prop,
            &client.brand_voice,
            &client.content_strategy,
            topic,
            corpus.all(),
        );

        let value = self.ai.complete_structured(&prompt, &details_schema()).await?;
        let details: BlogDetails = serde_json::from_value(value)?;
        validate_keyword_count(&details.keywords)?;

        Ok(details)
    }

    /// GeneratingBody: full HTML body, fence stripping, in-body
    /// images, appended FAQ block, link audit.
    async fn generate_body(
        &self,
        client: &ClientProfile,
        corpus: &LinkCorpus,
        details: &BlogDetails,
        outline: &str,
    ) -> Result<String> {
        let prompt = prompts::format_body_prompt(
            &details.title,
            outline,
            &client.unique_value_prop,
            &client.brand_voice,
            &client.content_strategy,
            corpus.all(),
        );

        let raw = self.ai.complete_text(&prompt, TextOptions::default()).await?;
        let mut body = strip_code_fences(&raw);

        body = self.insert_inline_images(body).await;

        let faq_prompt =
            prompts::format_faq_prompt(&details.title, &body, self.config.faq_context_chars);
        let faq_value = self.ai.complete_structured(&faq_prompt, &faq_schema()).await?;
        let faqs = parse_faq_response(faq_value)?;
        body.push_str(&render_faq_block(&faqs));

        let audit = audit_links(&body, corpus, &client.website_url);
        if !audit.is_clean() {
            if self.config.enforce_link_contract {
                return Err(AuthoringError::LinkingConstraint(
                    audit.describe_violations(),
                ));
            }
            warn!(
                client_id = %client.id,
                internal = audit.internal.len(),
                external = audit.external.len(),
                violations = %audit.describe_violations(),
                "body violates link contract"
            );
        } else {
            debug!(
                internal = audit.internal.len(),
                external = audit.external.len(),
                "link contract satisfied"
            );
        }

        Ok(body)
    }

    /// Insert up to `max_inline_images` images after section headings.
    /// Each individual image failure is logged and skipped.
    async fn insert_inline_images(&self, mut body: String) -> String {
        if self.config.max_inline_images == 0 {
            return body;
        }

        let headings = find_headings(&body);
        let mut inserted = 0;

        for heading in headings {
            if inserted >= self.config.max_inline_images {
                break;
            }

            let prompt = prompts::inline_image_prompt(&heading.text);
            match self.ai.generate_image(&prompt, ImageOptions::default()).await {
                Ok(image) => {
                    body = insert_image_after_heading(&body, &heading, &image);
                    inserted += 1;
                }
                Err(e) => {
                    warn!(heading = %heading.text, error = %e, "in-body image skipped");
                }
            }
        }

        body
    }

    /// RegisteringUrl: derive the slug, append the new article URL to
    /// the registry, then refresh the client's known URLs.
    async fn register_url(&self, client: &mut ClientProfile, title: &str) -> Result<()> {
        let slug = slugify(title);
        let url = format!("{}/blog/{}", client.website_url.trim_end_matches('/'), slug);

        self.registry
            .register_sitemap_url(&client.id, &url)
            .await
            .map_err(|e| AuthoringError::Registration(e.to_string()))?;

        let refreshed = self
            .registry
            .sitemap_urls(&client.id)
            .await
            .map_err(|e| AuthoringError::Registration(e.to_string()))?;
        client.known_urls = refreshed;

        debug!(client_id = %client.id, url = %url, "article URL registered");
        Ok(())
    }
}
