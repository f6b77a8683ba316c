//! Pure Google Gemini REST API client
//!
//! A clean, minimal client for the Gemini API with no domain-specific logic.
//! Supports text generation (optionally grounded in Google Search),
//! schema-constrained JSON generation, and Imagen image generation.
//!
//! # Example
//!
//! ```rust,ignore
//! use gemini_client::{GeminiClient, TextGenOptions};
//!
//! let client = GeminiClient::from_env()?;
//!
//! // Plain text generation
//! let text = client.generate_text("Say hello.", &TextGenOptions::default()).await?;
//!
//! // Grounded in live web search (non-deterministic)
//! let topic = client.generate_text("What's trending?", &TextGenOptions::grounded()).await?;
//!
//! // JSON constrained to a schema
//! let schema = serde_json::json!({
//!     "type": "OBJECT",
//!     "properties": { "title": { "type": "STRING" } },
//!     "required": ["title"]
//! });
//! let raw_json = client.generate_json("Suggest a title.", schema).await?;
//! ```

pub mod error;
pub mod types;

pub use error::{GeminiError, Result};
pub use types::*;

use base64::Engine;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_IMAGE_MODEL: &str = "imagen-3.0-generate-002";

/// Pure Gemini API client.
#[derive(Clone)]
pub struct GeminiClient {
    http_client: Client,
    api_key: SecretString,
    base_url: String,
    text_model: String,
    image_model: String,
}

impl GeminiClient {
    /// Create a new Gemini client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into().into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
        }
    }

    /// Create from environment variable `GEMINI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| GeminiError::Config("GEMINI_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Set a custom base URL (for proxies, regional endpoints).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the text model (default: gemini-2.5-flash).
    pub fn with_text_model(mut self, model: impl Into<String>) -> Self {
        self.text_model = model.into();
        self
    }

    /// Set the image model (default: imagen-3.0-generate-002).
    pub fn with_image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = model.into();
        self
    }

    /// Get the text model name.
    pub fn text_model(&self) -> &str {
        &self.text_model
    }

    /// Get the image model name.
    pub fn image_model(&self) -> &str {
        &self.image_model
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Generate free text from a prompt.
    ///
    /// With `search_grounding` set the model may consult Google Search;
    /// grounded output is not deterministic for a fixed prompt.
    pub async fn generate_text(&self, prompt: &str, opts: &TextGenOptions) -> Result<String> {
        let mut request = GenerateContentRequest::from_prompt(prompt);
        if opts.search_grounding {
            request = request.with_search_grounding();
        }

        let response = self.generate_content(&request).await?;
        response
            .text()
            .map(|t| t.trim().to_string())
            .ok_or_else(|| GeminiError::Api("No text in Gemini response".into()))
    }

    /// Generate JSON constrained to `schema`.
    ///
    /// Returns the raw JSON string from the model. The caller is
    /// responsible for parsing and validating it against the schema's
    /// required-field set; the service only best-effort conforms.
    pub async fn generate_json(&self, prompt: &str, schema: serde_json::Value) -> Result<String> {
        let request = GenerateContentRequest::from_prompt(prompt).with_response_schema(schema);

        let response = self.generate_content(&request).await?;
        response
            .text()
            .ok_or_else(|| GeminiError::Api("No JSON in Gemini response".into()))
    }

    /// Generate images via Imagen.
    ///
    /// Returns decoded image bytes, one entry per generated image. May
    /// legitimately return an empty vector when the service produces
    /// zero images; translating that into a failure is the caller's
    /// concern.
    pub async fn generate_images(
        &self,
        prompt: &str,
        opts: &ImageGenOptions,
    ) -> Result<Vec<Vec<u8>>> {
        let start = std::time::Instant::now();

        let request = PredictRequest {
            instances: vec![ImageInstance {
                prompt: prompt.to_string(),
            }],
            parameters: ImageParameters {
                sample_count: opts.count,
                aspect_ratio: opts.aspect_ratio.clone(),
                output_mime_type: opts.output_mime_type.clone(),
            },
        };

        let url = format!("{}/models/{}:predict", self.base_url, self.image_model);
        let response = self.post_json(&url, &request).await?;

        let predict: PredictResponse = response
            .json()
            .await
            .map_err(|e| GeminiError::Parse(e.to_string()))?;

        let mut images = Vec::with_capacity(predict.predictions.len());
        for prediction in predict.predictions {
            let bytes = base64::engine::general_purpose::STANDARD
                .decode(prediction.bytes_base64_encoded.as_bytes())
                .map_err(|e| GeminiError::Parse(format!("Invalid image base64: {}", e)))?;
            images.push(bytes);
        }

        debug!(
            model = %self.image_model,
            count = images.len(),
            duration_ms = start.elapsed().as_millis(),
            "Imagen generation"
        );

        Ok(images)
    }

    /// Raw generateContent call.
    async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let start = std::time::Instant::now();

        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url, self.text_model
        );
        let response = self.post_json(&url, request).await?;

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GeminiError::Parse(e.to_string()))?;

        debug!(
            model = %self.text_model,
            duration_ms = start.elapsed().as_millis(),
            "Gemini generateContent"
        );

        Ok(parsed)
    }

    /// POST a JSON body with API-key auth, mapping transport and
    /// non-success statuses to errors.
    async fn post_json<B: serde::Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<reqwest::Response> {
        let response = self
            .http_client
            .post(url)
            .header("x-goog-api-key", self.api_key.expose_secret())
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Gemini request failed");
                GeminiError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Gemini API error");
            return Err(GeminiError::Api(format!(
                "Gemini API error ({}): {}",
                status, error_text
            )));
        }

        Ok(response)
    }
}
