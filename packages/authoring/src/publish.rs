//! The publish transaction: media upload, then post creation.
//!
//! Two ordered steps with no automatic rollback. The post is never
//! created without a backing media id; a post-creation failure after
//! a successful upload leaves an orphaned media asset on the CMS
//! (accepted inconsistency, no compensating delete).

use tracing::{debug, info};

use crate::error::PublishResult;
use crate::slug::slugify;
use crate::traits::{Cms, MediaUpload, NewPost};
use crate::types::{Article, ClientProfile, PublishStatus};

/// Publish `article` to the client's CMS with the desired status.
///
/// Returns the CMS-reported public permalink of the created post.
pub async fn publish<C: Cms>(
    cms: &C,
    client: &ClientProfile,
    article: &Article,
    status: PublishStatus,
) -> PublishResult<String> {
    // Step 1: upload the featured image. Failure aborts the whole
    // publish before any post call is made.
    let upload = MediaUpload {
        filename: format!("{}-featured.jpg", slugify(&article.title)),
        bytes: article.featured_image.clone(),
        mime_type: "image/jpeg".to_string(),
        title: article.title.clone(),
        alt_text: format!("Featured image for blog post titled: {}", article.title),
    };
    let media = cms.upload_media(upload).await?;
    debug!(media_id = media.id, media_url = %media.source_url, "featured image uploaded");

    // Step 2: create the post referencing the media id.
    let post = NewPost {
        title: article.title.clone(),
        content: article.body_html.clone(),
        status,
        featured_media: media.id,
        seo_keywords: article.keywords.join(", "),
    };
    let created = cms.create_post(post).await?;
    info!(client_id = %client.id, link = %created.link, status = status.as_str(), "post published");

    Ok(created.link)
}
