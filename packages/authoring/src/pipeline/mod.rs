//! Generation pipeline - the core of the library.
//!
//! The pipeline orchestrates:
//! - Topic discovery (search-grounded)
//! - Structured details (title/angle/keywords)
//! - Outline generation
//! - Body generation (fence stripping, in-body images, FAQ block, link audit)
//! - Featured image generation
//! - URL registration (non-fatal bookkeeping)

pub mod body;
pub mod faq;
pub mod prompts;
pub mod run;

pub use body::{find_headings, insert_image_after_heading, strip_code_fences, Heading};
pub use faq::{faq_schema, parse_faq_response, render_faq_block, FaqResponse, MIN_FAQ_ENTRIES};
pub use prompts::{
    featured_image_prompt, format_body_prompt, format_details_prompt, format_faq_prompt,
    format_outline_prompt, format_topic_prompt, inline_image_prompt, GUARDRAIL,
    IMAGE_STYLE_DIRECTIVE,
};
pub use run::{details_schema, BlogDetails, Pipeline, Stage};
