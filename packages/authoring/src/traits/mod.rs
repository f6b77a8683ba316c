//! Core trait abstractions.
//!
//! Every external collaborator sits behind a trait so the pipeline
//! can be exercised against mocks:
//! - [`GenerativeAI`](ai::GenerativeAI): the generative content/image service
//! - [`SiteRegistry`](registry::SiteRegistry): the external URL/topic store
//! - [`Cms`](cms::Cms): the content-management backend

pub mod ai;
pub mod cms;
pub mod registry;

pub use ai::{GenerativeAI, ImageOptions, TextOptions};
pub use cms::{Cms, CreatedPost, MediaUpload, NewPost, UploadedMedia};
pub use registry::SiteRegistry;
