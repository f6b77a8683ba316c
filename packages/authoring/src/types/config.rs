//! Configuration for the generation pipeline.

use serde::{Deserialize, Serialize};

/// Configuration for a [`Pipeline`](crate::pipeline::Pipeline).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// How many leading characters of the body condition the FAQ call.
    ///
    /// Bounded so prompt size stays stable regardless of body length.
    /// Default: 2000.
    pub faq_context_chars: usize,

    /// Maximum in-body images inserted after H2/H3 headings.
    ///
    /// Individual image failures are logged and skipped. Set to 0 to
    /// disable in-body images entirely. Default: 2.
    pub max_inline_images: usize,

    /// Abort the run when the body violates the internal/external
    /// link-count contract.
    ///
    /// When false (the default) violations are only logged: the
    /// contract is enforced through prompt instructions and treated
    /// as advisory, matching how the prompts state it.
    pub enforce_link_contract: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            faq_context_chars: 2000,
            max_inline_images: 2,
            enforce_link_contract: false,
        }
    }
}

impl PipelineConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the FAQ context bound.
    pub fn with_faq_context_chars(mut self, chars: usize) -> Self {
        self.faq_context_chars = chars;
        self
    }

    /// Set the in-body image cap.
    pub fn with_max_inline_images(mut self, max: usize) -> Self {
        self.max_inline_images = max;
        self
    }

    /// Turn link-contract violations into hard failures.
    pub fn with_enforce_link_contract(mut self, enforce: bool) -> Self {
        self.enforce_link_contract = enforce;
        self
    }
}
