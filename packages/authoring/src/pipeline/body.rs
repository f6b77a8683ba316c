//! Body post-processing: fence stripping, heading scans, image insertion.

use base64::Engine;
use regex::Regex;

/// Strip fenced code-block markers the model may wrap HTML output in
/// (a leading ```` ```html ```` line and a trailing ```` ``` ````).
/// The inner content is returned trimmed.
pub fn strip_code_fences(raw: &str) -> String {
    let mut content = raw.trim();

    if let Some(rest) = content.strip_prefix("```") {
        // Drop the whole fence line ("```html", "```HTML", bare "```").
        content = match rest.find('\n') {
            Some(idx) => &rest[idx + 1..],
            None => "",
        };
    }

    if let Some(rest) = content.trim_end().strip_suffix("```") {
        content = rest;
    }

    content.trim().to_string()
}

/// A section heading found in the body.
#[derive(Debug, Clone)]
pub struct Heading {
    /// The full tag, e.g. `<h2>Why it matters</h2>`
    pub html: String,

    /// The inner text, e.g. `Why it matters`
    pub text: String,
}

/// Find H2/H3 headings in document order.
pub fn find_headings(body_html: &str) -> Vec<Heading> {
    let heading_re = Regex::new(r"<h[23]>(.*?)</h[23]>").expect("valid heading pattern");

    heading_re
        .captures_iter(body_html)
        .map(|capture| Heading {
            html: capture[0].to_string(),
            text: capture[1].to_string(),
        })
        .collect()
}

/// Insert an image (as a base64 data URI) directly after `heading`.
///
/// Returns the modified body; the first occurrence of the heading is
/// used, matching document order when called over `find_headings`.
pub fn insert_image_after_heading(body_html: &str, heading: &Heading, image: &[u8]) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(image);
    let tag = format!(
        r#"<img src="data:image/jpeg;base64,{}" alt="{}" />"#,
        encoded, heading.text
    );
    body_html.replacen(&heading.html, &format!("{}\n{}", heading.html, tag), 1)
}
