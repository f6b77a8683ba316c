//! Link auditing for generated article bodies.
//!
//! The body contract: 2-4 distinct internal links, each a member of
//! the link corpus (zero when the corpus is empty - an internal link
//! must never be invented), and 2-8 external links. The contract is
//! stated in the prompts; this module checks what actually came back.

use std::collections::BTreeSet;
use std::fmt;

use regex::Regex;

use crate::corpus::LinkCorpus;

/// Allowed range of distinct internal links (non-empty corpus).
pub const INTERNAL_LINK_RANGE: (usize, usize) = (2, 4);

/// Allowed range of external links.
pub const EXTERNAL_LINK_RANGE: (usize, usize) = (2, 8);

/// One violation of the link contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkViolation {
    /// Distinct internal-link count outside 2-4 (non-empty corpus).
    InternalCount { found: usize },

    /// A link targets the client's own site but is not a corpus
    /// member - the model invented an internal link.
    InventedInternal { url: String },

    /// External-link count outside 2-8.
    ExternalCount { found: usize },
}

impl fmt::Display for LinkViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkViolation::InternalCount { found } => write!(
                f,
                "expected {}-{} distinct internal links, found {}",
                INTERNAL_LINK_RANGE.0, INTERNAL_LINK_RANGE.1, found
            ),
            LinkViolation::InventedInternal { url } => {
                write!(f, "internal link not drawn from the corpus: {}", url)
            }
            LinkViolation::ExternalCount { found } => write!(
                f,
                "expected {}-{} external links, found {}",
                EXTERNAL_LINK_RANGE.0, EXTERNAL_LINK_RANGE.1, found
            ),
        }
    }
}

/// Result of auditing a body against the link contract.
#[derive(Debug, Clone, Default)]
pub struct LinkAudit {
    /// Distinct corpus-member link targets found in the body.
    pub internal: Vec<String>,

    /// External link targets (third-party, in order of appearance).
    pub external: Vec<String>,

    /// Contract violations, empty when the body conforms.
    pub violations: Vec<LinkViolation>,
}

impl LinkAudit {
    /// Whether the body satisfies the contract.
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    /// All violations joined into one diagnostic line.
    pub fn describe_violations(&self) -> String {
        self.violations
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Audit `body_html` against the link contract.
///
/// `site_url` is the client's own site base; a link under it (or a
/// relative link) that is not a corpus member counts as an invented
/// internal link. Data URIs (in-body images) are not links and are
/// ignored.
pub fn audit_links(body_html: &str, corpus: &LinkCorpus, site_url: &str) -> LinkAudit {
    let href_re =
        Regex::new(r#"<a\s[^>]*?href\s*=\s*["']([^"']+)["']"#).expect("valid href pattern");

    let site_prefix = site_url.trim_end_matches('/');

    // BTreeSet keeps the distinct-internal report deterministic.
    let mut internal = BTreeSet::new();
    let mut external = Vec::new();
    let mut violations = Vec::new();

    for capture in href_re.captures_iter(body_html) {
        let href = capture[1].trim().to_string();

        // Same-page anchors and non-navigational schemes are not links
        // in the sense of the contract.
        if href.starts_with('#') || href.starts_with("mailto:") || href.starts_with("tel:") {
            continue;
        }

        if corpus.contains(&href) {
            internal.insert(href);
        } else if href.starts_with(site_prefix) || !href.starts_with("http") {
            violations.push(LinkViolation::InventedInternal { url: href });
        } else {
            external.push(href);
        }
    }

    let internal_count = internal.len();
    if corpus.is_empty() {
        // With an empty corpus nothing can match it, so conforming
        // bodies simply carry no own-site links; invented ones were
        // flagged above.
    } else if internal_count < INTERNAL_LINK_RANGE.0 || internal_count > INTERNAL_LINK_RANGE.1 {
        violations.push(LinkViolation::InternalCount {
            found: internal_count,
        });
    }

    if external.len() < EXTERNAL_LINK_RANGE.0 || external.len() > EXTERNAL_LINK_RANGE.1 {
        violations.push(LinkViolation::ExternalCount {
            found: external.len(),
        });
    }

    LinkAudit {
        internal: internal.into_iter().collect(),
        external,
        violations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SITE: &str = "https://acme.example.com";

    fn corpus() -> LinkCorpus {
        LinkCorpus::new([
            "https://acme.example.com/blog/one",
            "https://acme.example.com/blog/two",
            "https://acme.example.com/blog/three",
        ])
    }

    fn body(internal: &[&str], external: &[&str]) -> String {
        let mut html = String::from("<p>Intro text.</p>");
        for url in internal.iter().chain(external) {
            html.push_str(&format!(r#"<p>See <a href="{}">this</a>.</p>"#, url));
        }
        html
    }

    #[test]
    fn test_conforming_body_is_clean() {
        let html = body(
            &[
                "https://acme.example.com/blog/one",
                "https://acme.example.com/blog/two",
            ],
            &["https://example.org/a", "https://example.net/b"],
        );

        let audit = audit_links(&html, &corpus(), SITE);
        assert!(audit.is_clean(), "{}", audit.describe_violations());
        assert_eq!(audit.internal.len(), 2);
        assert_eq!(audit.external.len(), 2);
    }

    #[test]
    fn test_duplicate_internal_links_counted_once() {
        let html = body(
            &[
                "https://acme.example.com/blog/one",
                "https://acme.example.com/blog/one",
            ],
            &["https://example.org/a", "https://example.net/b"],
        );

        let audit = audit_links(&html, &corpus(), SITE);
        assert_eq!(audit.internal.len(), 1);
        assert!(audit
            .violations
            .contains(&LinkViolation::InternalCount { found: 1 }));
    }

    #[test]
    fn test_too_many_internal_links_flagged() {
        let urls: Vec<String> = (0..5)
            .map(|i| format!("https://acme.example.com/blog/p{}", i))
            .collect();
        let corpus = LinkCorpus::new(urls.clone());
        let refs: Vec<&str> = urls.iter().map(String::as_str).collect();
        let html = body(&refs, &["https://example.org/a", "https://example.net/b"]);

        let audit = audit_links(&html, &corpus, SITE);
        assert!(audit
            .violations
            .contains(&LinkViolation::InternalCount { found: 5 }));
    }

    #[test]
    fn test_invented_internal_link_flagged() {
        let html = body(
            &[
                "https://acme.example.com/blog/one",
                "https://acme.example.com/blog/made-up",
            ],
            &["https://example.org/a", "https://example.net/b"],
        );

        let audit = audit_links(&html, &corpus(), SITE);
        assert!(audit.violations.iter().any(|v| matches!(
            v,
            LinkViolation::InventedInternal { url } if url.ends_with("made-up")
        )));
    }

    #[test]
    fn test_empty_corpus_zero_internal_is_clean() {
        let html = body(&[], &["https://example.org/a", "https://example.net/b"]);

        let audit = audit_links(&html, &LinkCorpus::default(), SITE);
        assert!(audit.is_clean());
        assert!(audit.internal.is_empty());
    }

    #[test]
    fn test_empty_corpus_own_site_link_is_invented() {
        let html = body(
            &["https://acme.example.com/blog/anything"],
            &["https://example.org/a", "https://example.net/b"],
        );

        let audit = audit_links(&html, &LinkCorpus::default(), SITE);
        assert!(!audit.is_clean());
    }

    #[test]
    fn test_external_count_bounds() {
        let externals: Vec<String> = (0..9)
            .map(|i| format!("https://site{}.example.org/x", i))
            .collect();
        let refs: Vec<&str> = externals.iter().map(String::as_str).collect();
        let html = body(
            &[
                "https://acme.example.com/blog/one",
                "https://acme.example.com/blog/two",
            ],
            &refs,
        );

        let audit = audit_links(&html, &corpus(), SITE);
        assert!(audit
            .violations
            .contains(&LinkViolation::ExternalCount { found: 9 }));
    }
}
