//! Article types - the pipeline's output.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A fully generated article, ready to publish.
///
/// `body_html` never repeats the title as a top-level heading (the
/// consumer renders the title separately), and its internal links are
/// drawn only from the client's known URLs at generation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    /// Article title (rendered as H1 by the consumer)
    pub title: String,

    /// One-paragraph differentiation statement
    pub angle: String,

    /// 5-7 short SEO keywords
    pub keywords: Vec<String>,

    /// Hierarchical heading text (H2/H3), intro through conclusion
    pub outline: String,

    /// HTML fragment: paragraphs, headings matching the outline,
    /// internal/external links, and an appended FAQ block with
    /// schema.org structured-data markup
    pub body_html: String,

    /// Featured image bytes (jpeg)
    pub featured_image: Vec<u8>,

    /// When the article was generated
    pub generated_at: DateTime<Utc>,
}

/// One question/answer pair of the FAQ block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

/// Desired status for a published post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublishStatus {
    Draft,
    Publish,
}

impl PublishStatus {
    /// Wire form of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            PublishStatus::Draft => "draft",
            PublishStatus::Publish => "publish",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_status_wire_form() {
        assert_eq!(PublishStatus::Draft.as_str(), "draft");
        assert_eq!(
            serde_json::to_string(&PublishStatus::Publish).unwrap(),
            "\"publish\""
        );
    }
}
