//! Data types flowing through the pipeline.

pub mod article;
pub mod client;
pub mod config;

pub use article::{Article, FaqEntry, PublishStatus};
pub use client::{ClientProfile, CmsCredentials};
pub use config::PipelineConfig;
