//! FAQ block generation: structured response handling and rendering.
//!
//! The FAQ is an appended HTML block plus an embedded schema.org
//! `FAQPage` JSON-LD document whose `mainEntity` list holds exactly
//! one entry per rendered question/answer pair.

use serde::Deserialize;

use crate::error::{AuthoringError, Result};
use crate::schema::{FieldKind, ResponseSchema};
use crate::types::FaqEntry;

/// Minimum number of question/answer pairs.
pub const MIN_FAQ_ENTRIES: usize = 3;

/// Structured FAQ response from the generative service.
#[derive(Debug, Clone, Deserialize)]
pub struct FaqResponse {
    pub faqs: Vec<FaqEntry>,
}

/// The declarative schema for the FAQ call.
pub fn faq_schema() -> ResponseSchema {
    ResponseSchema::new()
        .required(
            "faqs",
            FieldKind::ObjectArray(
                ResponseSchema::new()
                    .required("question", FieldKind::Str)
                    .describe("A frequently asked question related to the blog post.")
                    .required("answer", FieldKind::Str)
                    .describe("The answer to the question."),
            ),
        )
        .describe("At least 3 frequently asked questions with answers.")
}

/// Extract FAQ entries from a schema-validated structured value.
///
/// Fewer than [`MIN_FAQ_ENTRIES`] pairs is a hard validation failure.
pub fn parse_faq_response(value: serde_json::Value) -> Result<Vec<FaqEntry>> {
    let response: FaqResponse = serde_json::from_value(value)?;

    if response.faqs.len() < MIN_FAQ_ENTRIES {
        return Err(AuthoringError::SchemaValidation {
            reason: format!(
                "expected at least {} FAQ entries, got {}",
                MIN_FAQ_ENTRIES,
                response.faqs.len()
            ),
        });
    }

    Ok(response.faqs)
}

/// Render the FAQ entries as an HTML block plus FAQPage JSON-LD.
pub fn render_faq_block(faqs: &[FaqEntry]) -> String {
    let main_entity: Vec<serde_json::Value> = faqs
        .iter()
        .map(|faq| {
            serde_json::json!({
                "@type": "Question",
                "name": faq.question,
                "acceptedAnswer": {
                    "@type": "Answer",
                    "text": faq.answer,
                },
            })
        })
        .collect();

    let faq_page = serde_json::json!({
        "@context": "https://schema.org",
        "@type": "FAQPage",
        "mainEntity": main_entity,
    });

    let mut html = String::from("\n<div class=\"faq-section\">\n<h2>Frequently Asked Questions</h2>\n");
    for faq in faqs {
        html.push_str(&format!("<h3>{}</h3>\n<p>{}</p>\n", faq.question, faq.answer));
    }
    html.push_str("</div>\n");
    html.push_str(&format!(
        "<script type=\"application/ld+json\">{}</script>\n",
        faq_page
    ));

    html
}
