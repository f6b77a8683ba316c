//! Gemini implementation of the GenerativeAI trait.
//!
//! A reference implementation over the `gemini-client` crate: text
//! via generateContent (optionally grounded in Google Search),
//! structured output via a response schema, images via Imagen.
//!
//! # Example
//!
//! ```rust,ignore
//! use authoring::ai::GeminiAI;
//!
//! let ai = GeminiAI::from_env()?;
//! let pipeline = Pipeline::new(ai, registry);
//! ```

use async_trait::async_trait;

use gemini_client::{GeminiClient, GeminiError, ImageGenOptions, TextGenOptions};

use crate::error::{AuthoringError, Result};
use crate::schema::ResponseSchema;
use crate::traits::{GenerativeAI, ImageOptions, TextOptions};

/// Gemini-backed generative AI.
#[derive(Clone)]
pub struct GeminiAI {
    client: GeminiClient,
}

impl GeminiAI {
    /// Wrap an existing Gemini client.
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }

    /// Create from environment variable `GEMINI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let client = GeminiClient::from_env()
            .map_err(|e| AuthoringError::Generation(e.to_string()))?;
        Ok(Self::new(client))
    }

    /// Access the underlying client.
    pub fn client(&self) -> &GeminiClient {
        &self.client
    }
}

fn map_err(e: GeminiError) -> AuthoringError {
    AuthoringError::Generation(e.to_string())
}

#[async_trait]
impl GenerativeAI for GeminiAI {
    async fn complete_text(&self, prompt: &str, opts: TextOptions) -> Result<String> {
        let gen_opts = TextGenOptions {
            search_grounding: opts.search_grounding,
        };

        let text = self
            .client
            .generate_text(prompt, &gen_opts)
            .await
            .map_err(map_err)?;

        if text.is_empty() {
            return Err(AuthoringError::Generation("empty completion".into()));
        }

        Ok(text)
    }

    async fn complete_structured(
        &self,
        prompt: &str,
        schema: &ResponseSchema,
    ) -> Result<serde_json::Value> {
        let raw = self
            .client
            .generate_json(prompt, schema.to_gemini())
            .await
            .map_err(map_err)?;

        // Required-field validation happens here, before the value is
        // handed to any caller.
        schema.parse_and_validate(&raw)
    }

    async fn generate_image(&self, prompt: &str, opts: ImageOptions) -> Result<Vec<u8>> {
        let gen_opts = ImageGenOptions {
            count: 1,
            aspect_ratio: opts.aspect_ratio,
            output_mime_type: opts.output_format,
        };

        let images = self
            .client
            .generate_images(prompt, &gen_opts)
            .await
            .map_err(|e| AuthoringError::ImageGeneration(e.to_string()))?;

        images.into_iter().next().ok_or_else(|| {
            AuthoringError::ImageGeneration("service produced zero images".into())
        })
    }
}
