//! WordPress implementation of the Cms trait.
//!
//! Talks to the WP REST API: `POST /wp-json/wp/v2/media` (multipart,
//! Basic auth) and `POST /wp-json/wp/v2/posts` (JSON, Basic auth).
//! CMS rejections surface the reported status code and message
//! verbatim.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{PublishError, PublishResult};
use crate::traits::{Cms, CreatedPost, MediaUpload, NewPost, UploadedMedia};
use crate::types::CmsCredentials;

/// WordPress REST API client.
#[derive(Clone)]
pub struct WordPressCms {
    http_client: Client,
    site_url: String,
    username: String,
    app_password: SecretString,
}

impl WordPressCms {
    /// Create a client from CMS credentials.
    pub fn new(credentials: &CmsCredentials) -> Self {
        Self {
            http_client: Client::new(),
            site_url: credentials.site_url.trim_end_matches('/').to_string(),
            username: credentials.username.clone(),
            app_password: credentials.app_password.clone(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/wp-json/wp/v2/{}", self.site_url, path)
    }

    /// Extract the CMS's error message from a rejection body, falling
    /// back when the body is not the expected JSON.
    async fn error_message(response: reqwest::Response) -> String {
        let body: WpErrorBody = response.json().await.unwrap_or_default();
        body.message.unwrap_or_else(|| "Unknown error".to_string())
    }
}

#[async_trait]
impl Cms for WordPressCms {
    async fn upload_media(&self, upload: MediaUpload) -> PublishResult<UploadedMedia> {
        let file_part = Part::bytes(upload.bytes)
            .file_name(upload.filename)
            .mime_str(&upload.mime_type)
            .map_err(|e| PublishError::Http(e.to_string()))?;

        let form = Form::new()
            .part("file", file_part)
            .text("title", upload.title)
            .text("alt_text", upload.alt_text);

        let response = self
            .http_client
            .post(self.endpoint("media"))
            .basic_auth(&self.username, Some(self.app_password.expose_secret()))
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "media upload request failed");
                PublishError::Http(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = Self::error_message(response).await;
            warn!(status = %status, message = %message, "media upload rejected");
            return Err(PublishError::Media {
                status: status.as_u16(),
                message,
            });
        }

        let media: WpMediaResponse = response
            .json()
            .await
            .map_err(|e| PublishError::Http(e.to_string()))?;

        Ok(UploadedMedia {
            id: media.id,
            source_url: media.source_url,
        })
    }

    async fn create_post(&self, post: NewPost) -> PublishResult<CreatedPost> {
        let body = WpNewPost {
            title: post.title,
            content: post.content,
            status: post.status.as_str(),
            featured_media: post.featured_media,
            meta: WpPostMeta {
                seo_keywords: post.seo_keywords,
            },
        };

        let response = self
            .http_client
            .post(self.endpoint("posts"))
            .basic_auth(&self.username, Some(self.app_password.expose_secret()))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "post creation request failed");
                PublishError::Http(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = Self::error_message(response).await;
            warn!(status = %status, message = %message, "post creation rejected");
            return Err(PublishError::Post {
                status: status.as_u16(),
                message,
            });
        }

        let created: WpPostResponse = response
            .json()
            .await
            .map_err(|e| PublishError::Http(e.to_string()))?;

        Ok(CreatedPost { link: created.link })
    }
}

#[derive(Debug, Serialize)]
struct WpNewPost {
    title: String,
    content: String,
    status: &'static str,
    featured_media: u64,
    meta: WpPostMeta,
}

#[derive(Debug, Serialize)]
struct WpPostMeta {
    seo_keywords: String,
}

#[derive(Debug, Deserialize)]
struct WpMediaResponse {
    id: u64,
    source_url: String,
}

#[derive(Debug, Deserialize)]
struct WpPostResponse {
    link: String,
}

#[derive(Debug, Default, Deserialize)]
struct WpErrorBody {
    message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let cms = WordPressCms::new(&CmsCredentials::new(
            "https://blog.example.com/",
            "admin",
            "pw",
        ));
        assert_eq!(
            cms.endpoint("media"),
            "https://blog.example.com/wp-json/wp/v2/media"
        );
    }

    #[test]
    fn test_new_post_wire_shape() {
        let body = WpNewPost {
            title: "T".into(),
            content: "<p>x</p>".into(),
            status: "draft",
            featured_media: 42,
            meta: WpPostMeta {
                seo_keywords: "a, b".into(),
            },
        };
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["status"], "draft");
        assert_eq!(json["featured_media"], 42);
        assert_eq!(json["meta"]["seo_keywords"], "a, b");
    }
}
