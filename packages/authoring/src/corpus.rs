//! Link corpus - the client's known published page URLs.

/// The client's known, previously published page URLs, used as the
/// allowed set for internal linking.
///
/// Advisory context handed to prompts: iteration order is insertion
/// order and no deduplication or URL-syntax validation happens here.
#[derive(Debug, Clone, Default)]
pub struct LinkCorpus {
    urls: Vec<String>,
}

impl LinkCorpus {
    /// Create a corpus from known URLs, preserving order.
    pub fn new(urls: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            urls: urls.into_iter().map(|u| u.into()).collect(),
        }
    }

    /// All URLs, in insertion order.
    pub fn all(&self) -> &[String] {
        &self.urls
    }

    /// Whether the corpus holds no URLs.
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Number of URLs in the corpus.
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// Whether `url` is a member of the corpus.
    pub fn contains(&self, url: &str) -> bool {
        self.urls.iter().any(|u| u == url)
    }
}
