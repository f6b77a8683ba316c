//! AI Blog Authoring Library
//!
//! Generates a complete blog article for a business client by
//! orchestrating a fixed sequence of generative-AI calls, then
//! publishes the result to a CMS in a two-step transaction.
//!
//! # Design
//!
//! - Fixed stage sequence, not a workflow engine: topic discovery →
//!   structured details → outline → body (links, FAQ block, in-body
//!   images) → featured image → URL registration.
//! - Every external collaborator sits behind a trait so the pipeline
//!   runs unchanged against mocks.
//! - Stateless between runs: durable per-client state lives in the
//!   external registry; a failed run is restarted from the beginning.
//!
//! # Usage
//!
//! ```rust,ignore
//! use authoring::{Pipeline, PipelineConfig, publish, PublishStatus};
//! use authoring::ai::GeminiAI;
//! use authoring::registry::HttpRegistry;
//! use authoring::cms::WordPressCms;
//!
//! let ai = GeminiAI::from_env()?;
//! let registry = HttpRegistry::new("http://localhost:3001/api");
//! let pipeline = Pipeline::new(ai, registry);
//!
//! let article = pipeline.run(&mut client, |msg| println!("{msg}")).await?;
//!
//! // Later, on an explicit user action:
//! let cms = WordPressCms::new(&client.cms);
//! let url = publish(&cms, &client, &article, PublishStatus::Draft).await?;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Core trait abstractions (GenerativeAI, SiteRegistry, Cms)
//! - [`types`] - Value objects flowing through the pipeline
//! - [`schema`] - Declarative schemas for structured generation
//! - [`pipeline`] - The stage machine, prompts, and body post-processing
//! - [`publish`] - The two-step CMS publish transaction
//! - [`linkcheck`] - Internal/external link-contract auditing
//! - [`registry`] - SiteRegistry implementations (HTTP)
//! - [`cms`] - Cms implementations (WordPress)
//! - [`testing`] - Mock implementations for testing

pub mod cms;
pub mod corpus;
pub mod error;
pub mod linkcheck;
pub mod pipeline;
pub mod publish;
pub mod registry;
pub mod schema;
pub mod slug;
pub mod testing;
pub mod traits;
pub mod types;

#[cfg(feature = "gemini")]
pub mod ai;

// Re-export core types at crate root
pub use corpus::LinkCorpus;
pub use error::{AuthoringError, PublishError, PublishResult, Result};
pub use linkcheck::{audit_links, LinkAudit, LinkViolation};
pub use pipeline::{Pipeline, Stage};
pub use publish::publish;
pub use schema::{FieldKind, ResponseSchema};
pub use slug::slugify;
pub use traits::{Cms, GenerativeAI, ImageOptions, SiteRegistry, TextOptions};
pub use types::{
    Article, ClientProfile, CmsCredentials, FaqEntry, PipelineConfig, PublishStatus,
};

// Re-export implementations
pub use cms::WordPressCms;
pub use registry::HttpRegistry;

#[cfg(feature = "gemini")]
pub use ai::GeminiAI;
