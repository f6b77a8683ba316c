//! Request and response types for the Gemini REST API.

use serde::{Deserialize, Serialize};

/// Options for a text generation request.
#[derive(Debug, Clone, Default)]
pub struct TextGenOptions {
    /// Allow the model to consult Google Search while answering.
    ///
    /// Grounded responses are not deterministic; callers must not
    /// assume stable output for the same prompt.
    pub search_grounding: bool,
}

impl TextGenOptions {
    /// Enable search grounding.
    pub fn grounded() -> Self {
        Self {
            search_grounding: true,
        }
    }
}

/// Options for an image generation request.
#[derive(Debug, Clone)]
pub struct ImageGenOptions {
    /// Number of images to request (default: 1).
    pub count: u32,

    /// Aspect ratio, e.g. "16:9", "1:1" (default: "16:9").
    pub aspect_ratio: String,

    /// Output MIME type, e.g. "image/jpeg" (default: "image/jpeg").
    pub output_mime_type: String,
}

impl Default for ImageGenOptions {
    fn default() -> Self {
        Self {
            count: 1,
            aspect_ratio: "16:9".to_string(),
            output_mime_type: "image/jpeg".to_string(),
        }
    }
}

// =============================================================================
// generateContent wire types
// =============================================================================

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub tools: Vec<Tool>,

    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// A plain single-turn user prompt.
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: prompt.into(),
                }],
            }],
            tools: Vec::new(),
            generation_config: None,
        }
    }

    /// Attach the Google Search grounding tool.
    pub fn with_search_grounding(mut self) -> Self {
        self.tools.push(Tool::google_search());
        self
    }

    /// Constrain the response to JSON conforming to `schema`.
    pub fn with_response_schema(mut self, schema: serde_json::Value) -> Self {
        self.generation_config = Some(GenerationConfig {
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(schema),
        });
        self
    }
}

/// One conversation turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub role: String,
    pub parts: Vec<Part>,
}

/// A content part. Only text parts are used by this client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: String,
}

/// Tool declaration. Only Google Search is supported.
#[derive(Debug, Clone, Serialize)]
pub struct Tool {
    #[serde(rename = "google_search")]
    pub google_search: serde_json::Value,
}

impl Tool {
    pub fn google_search() -> Self {
        Self {
            google_search: serde_json::json!({}),
        }
    }
}

/// Generation configuration (structured output).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
}

/// Response body for `models/{model}:generateContent`.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate's parts.
    ///
    /// Returns `None` when the response holds no candidates or no
    /// text parts (blocked prompt, empty completion).
    pub fn text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let text: String = candidate
            .content
            .parts
            .iter()
            .map(|p| p.text.as_str())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// One response candidate.
#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    pub content: Content,

    #[serde(rename = "finishReason", default)]
    pub finish_reason: Option<String>,
}

// =============================================================================
// Imagen predict wire types
// =============================================================================

/// Request body for `models/{model}:predict` (Imagen).
#[derive(Debug, Clone, Serialize)]
pub struct PredictRequest {
    pub instances: Vec<ImageInstance>,
    pub parameters: ImageParameters,
}

/// A single prompt instance.
#[derive(Debug, Clone, Serialize)]
pub struct ImageInstance {
    pub prompt: String,
}

/// Imagen sampling parameters.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageParameters {
    pub sample_count: u32,
    pub aspect_ratio: String,
    pub output_mime_type: String,
}

/// Response body for `models/{model}:predict`.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictResponse {
    #[serde(default)]
    pub predictions: Vec<Prediction>,
}

/// One generated image, base64-encoded.
#[derive(Debug, Clone, Deserialize)]
pub struct Prediction {
    #[serde(rename = "bytesBase64Encoded", default)]
    pub bytes_base64_encoded: String,

    #[serde(rename = "mimeType", default)]
    pub mime_type: Option<String>,
}
