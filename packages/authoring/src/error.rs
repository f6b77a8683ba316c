//! Typed errors for the authoring library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to keep the
//! failure taxonomy explicit: generation, schema validation, image
//! generation, link-contract violations, URL registration, and the
//! two publish steps each carry their own variant.

use thiserror::Error;

use crate::pipeline::Stage;

/// Errors that can occur while generating an article.
#[derive(Debug, Error)]
pub enum AuthoringError {
    /// Generative service failed (transport error, non-success status,
    /// empty or malformed response).
    #[error("generation error: {0}")]
    Generation(String),

    /// Structured response was not valid JSON or did not satisfy the
    /// schema's required-field set.
    #[error("schema validation failed: {reason}")]
    SchemaValidation { reason: String },

    /// Image service produced zero images.
    #[error("image generation error: {0}")]
    ImageGeneration(String),

    /// Body failed the internal/external link-count contract.
    ///
    /// Only raised when `PipelineConfig::enforce_link_contract` is set;
    /// otherwise violations are logged and the run continues.
    #[error("link contract violated: {0}")]
    LinkingConstraint(String),

    /// Sitemap URL registration or refresh failed. Deliberately
    /// non-fatal to a pipeline run.
    #[error("registration error: {0}")]
    Registration(String),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A pipeline stage failed; wraps the underlying error with the
    /// stage name for diagnostics.
    #[error("pipeline failed at {stage}: {source}")]
    Stage {
        stage: Stage,
        #[source]
        source: Box<AuthoringError>,
    },
}

impl AuthoringError {
    /// Attach the failing stage to an error.
    pub fn at_stage(self, stage: Stage) -> Self {
        AuthoringError::Stage {
            stage,
            source: Box::new(self),
        }
    }

    /// The stage this error occurred in, if attached.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            AuthoringError::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

/// Errors that can occur during the two-step CMS publish transaction.
///
/// The CMS's reported status code and message are carried verbatim.
#[derive(Debug, Error)]
pub enum PublishError {
    /// Media upload rejected; no post was created.
    #[error("media upload failed ({status}): {message}")]
    Media { status: u16, message: String },

    /// Post creation rejected. The previously uploaded media asset is
    /// left orphaned on the CMS (accepted inconsistency, no rollback).
    #[error("post creation failed ({status}): {message}")]
    Post { status: u16, message: String },

    /// Transport-level failure before the CMS could answer.
    #[error("HTTP error: {0}")]
    Http(String),
}

/// Result type alias for authoring operations.
pub type Result<T> = std::result::Result<T, AuthoringError>;

/// Result type alias for publish operations.
pub type PublishResult<T> = std::result::Result<T, PublishError>;
