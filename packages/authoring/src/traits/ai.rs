//! GenerativeAI trait - the capability boundary to the generative service.
//!
//! Three operations: free text (optionally grounded in live web
//! search), schema-validated structured generation, and image
//! generation. No retry or backoff happens behind this trait; retry
//! policy belongs to the caller's transport, not the pipeline.

use async_trait::async_trait;

use crate::error::Result;
use crate::schema::ResponseSchema;

/// Options for a text completion.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextOptions {
    /// Permit the service to consult live web search. Grounded output
    /// is not deterministic for a fixed prompt.
    pub search_grounding: bool,
}

impl TextOptions {
    /// Options with search grounding enabled.
    pub fn grounded() -> Self {
        Self {
            search_grounding: true,
        }
    }
}

/// Options for an image generation.
#[derive(Debug, Clone)]
pub struct ImageOptions {
    /// Aspect ratio, e.g. "16:9".
    pub aspect_ratio: String,

    /// Output format MIME type, e.g. "image/jpeg".
    pub output_format: String,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            aspect_ratio: "16:9".to_string(),
            output_format: "image/jpeg".to_string(),
        }
    }
}

/// Capability interface to the generative content/image service.
///
/// Implementations wrap a specific provider and handle its wire
/// specifics; the pipeline only sees these three operations.
#[async_trait]
pub trait GenerativeAI: Send + Sync {
    /// Complete free text from a prompt.
    ///
    /// Fails with [`AuthoringError::Generation`](crate::error::AuthoringError::Generation)
    /// on transport failure, non-success status, or an empty response.
    async fn complete_text(&self, prompt: &str, opts: TextOptions) -> Result<String>;

    /// Complete a structured value conforming to `schema`.
    ///
    /// Implementations must validate the raw response against the
    /// schema's required-field set before returning (see
    /// [`ResponseSchema::parse_and_validate`]); a malformed or
    /// incomplete response is a hard
    /// [`SchemaValidation`](crate::error::AuthoringError::SchemaValidation)
    /// failure, never a partial result.
    async fn complete_structured(
        &self,
        prompt: &str,
        schema: &ResponseSchema,
    ) -> Result<serde_json::Value>;

    /// Generate exactly one image.
    ///
    /// Fails with [`ImageGeneration`](crate::error::AuthoringError::ImageGeneration)
    /// when the service returns zero images.
    async fn generate_image(&self, prompt: &str, opts: ImageOptions) -> Result<Vec<u8>>;
}
