//! Cms trait - the content-management backend boundary.
//!
//! Two operations, matching the publish transaction's two steps:
//! upload a media asset, then create a post referencing it.

use async_trait::async_trait;

use crate::error::PublishResult;
use crate::types::PublishStatus;

/// A media asset to upload.
#[derive(Debug, Clone)]
pub struct MediaUpload {
    /// File name, e.g. "my-great-title-featured.jpg"
    pub filename: String,

    /// Raw file bytes
    pub bytes: Vec<u8>,

    /// MIME type of the file
    pub mime_type: String,

    /// Media title shown in the CMS library
    pub title: String,

    /// Alt text for the image
    pub alt_text: String,
}

/// A successfully uploaded media asset.
#[derive(Debug, Clone)]
pub struct UploadedMedia {
    /// CMS-assigned media identifier
    pub id: u64,

    /// Public URL of the media file
    pub source_url: String,
}

/// A post to create.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,

    /// Body HTML fragment
    pub content: String,

    pub status: PublishStatus,

    /// Media id of the featured image
    pub featured_media: u64,

    /// Comma-joined SEO keywords, stored as post metadata
    pub seo_keywords: String,
}

/// A successfully created post.
#[derive(Debug, Clone)]
pub struct CreatedPost {
    /// Public permalink of the post
    pub link: String,
}

/// Capability interface to the CMS.
#[async_trait]
pub trait Cms: Send + Sync {
    /// Upload a media asset.
    ///
    /// Fails with [`PublishError::Media`](crate::error::PublishError::Media)
    /// carrying the CMS's status and message verbatim.
    async fn upload_media(&self, upload: MediaUpload) -> PublishResult<UploadedMedia>;

    /// Create a post.
    ///
    /// Fails with [`PublishError::Post`](crate::error::PublishError::Post)
    /// carrying the CMS's status and message verbatim.
    async fn create_post(&self, post: NewPost) -> PublishResult<CreatedPost>;
}
