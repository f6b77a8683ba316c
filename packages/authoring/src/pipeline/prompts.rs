//! Prompts for the generation pipeline.
//!
//! Each stage binds to exactly one prompt. The stage sequence is
//! fixed, so these are constants with `{placeholder}` substitution,
//! not templates.

/// Fixed, non-optional instruction embedded in every content-shaping
/// prompt: the model must never disparage the client or its business.
pub const GUARDRAIL: &str = "Under no circumstances produce content that is disparaging of the client, its products, its services, or its business model.";

/// Fixed stylistic directive appended to every image prompt.
pub const IMAGE_STYLE_DIRECTIVE: &str =
    "A cinematic, photorealistic, high-quality image, no text or words on the image.";

/// Prompt for finding a trending topic (search-grounded).
pub const TOPIC_PROMPT: &str = r#"Using Google Search, find one current and highly relevant trending topic, news story, or popular question related to the '{industry}' industry. Provide only the topic name or headline.

Bias your choice away from subjects already covered by the client's published pages:
{known_urls}

Also avoid these previously covered topics:
{used_topics}

{guardrail}"#;

/// Prompt for generating title, angle, and keywords (structured).
pub const DETAILS_PROMPT: &str = r#"You are an expert content strategist for a company in the '{industry}' industry.
Company's unique value proposition: '{value_prop}'
Company's brand voice: '{brand_voice}'
Company's content strategy: '{content_strategy}'
We want to write a blog post about the following topic: '{topic}'

For uniqueness and linking context, these pages already exist on the client's site:
{known_urls}

Please generate a compelling, SEO-friendly blog post title, a unique angle for the article, and a list of 5-7 relevant SEO keywords.

{guardrail}"#;

/// Prompt for the heading outline.
pub const OUTLINE_PROMPT: &str = r#"Based on the following title and angle, create a detailed blog post outline.
Title: '{title}'
Angle: '{angle}'

The outline should have a clear hierarchical structure with H2 and H3 headings. Include an introduction and a conclusion. The blog title itself will be the H1, so do not include it in the outline. Output only the outline.

{guardrail}"#;

/// Prompt for the full article body.
pub const BODY_PROMPT: &str = r#"Write a complete blog post in HTML format based on the provided title and outline.
Title (H1): '{title}'
Outline:
{outline}

Follow these instructions:
- Adhere to the client's content strategy: '{content_strategy}'.
- Elaborate on each point in the outline. Use <p> tags for paragraphs.
- Use <h2> and <h3> tags exactly as specified in the outline.
- Do NOT include the H1 title in the generated content; it will be added separately.
- Write in the following brand voice: '{brand_voice}'.
- Naturally incorporate the company's unique value proposition where relevant: '{value_prop}'.
- Ensure the tone is confident and expert. Avoid apologetic language or AI self-references.
- The content must be original and engaging.
- **IMPORTANT:** Include between 2 and 8 external HTML hyperlinks to relevant, high-authority third-party sources, contextually embedded in anchor text.
- **IMPORTANT:** Include exactly 2 to 4 internal HTML hyperlinks, each pointing to a DIFFERENT URL, selected ONLY from the following list of the client's pages. If the list is empty, include NO internal links at all - never invent one.
{known_urls}

{guardrail}"#;

/// Prompt for the FAQ block (structured).
pub const FAQ_PROMPT: &str = r#"Based on the following blog post title and content, generate a list of at least 3 frequently asked questions (FAQs) with their answers.

Title: {title}

Content:
{content}...

{guardrail}"#;

/// Format the known-URL list for embedding in a prompt.
fn format_url_list(urls: &[String]) -> String {
    if urls.is_empty() {
        "(no pages available)".to_string()
    } else {
        urls.join("\n")
    }
}

/// Format the topic prompt.
pub fn format_topic_prompt(industry: &str, known_urls: &[String], used_topics: &[String]) -> String {
    let topics = if used_topics.is_empty() {
        "(none yet)".to_string()
    } else {
        used_topics.join("\n")
    };

    TOPIC_PROMPT
        .replace("{industry}", industry)
        .replace("{known_urls}", &format_url_list(known_urls))
        .replace("{used_topics}", &topics)
        .replace("{guardrail}", GUARDRAIL)
}

/// Format the details prompt.
pub fn format_details_prompt(
    industry: &str,
    value_prop: &str,
    brand_voice: &str,
    content_strategy: &str,
    topic: &str,
    known_urls: &[String],
) -> String {
    DETAILS_PROMPT
        .replace("{industry}", industry)
        .replace("{value_prop}", value_prop)
        .replace("{brand_voice}", brand_voice)
        .replace("{content_strategy}", content_strategy)
        .replace("{topic}", topic)
        .replace("{known_urls}", &format_url_list(known_urls))
        .replace("{guardrail}", GUARDRAIL)
}

/// Format the outline prompt.
pub fn format_outline_prompt(title: &str, angle: &str) -> String {
    OUTLINE_PROMPT
        .replace("{title}", title)
        .replace("{angle}", angle)
        .replace("{guardrail}", GUARDRAIL)
}

/// Format the body prompt.
pub fn format_body_prompt(
    title: &str,
    outline: &str,
    value_prop: &str,
    brand_voice: &str,
    content_strategy: &str,
    known_urls: &[String],
) -> String {
    BODY_PROMPT
        .replace("{title}", title)
        .replace("{outline}", outline)
        .replace("{value_prop}", value_prop)
        .replace("{brand_voice}", brand_voice)
        .replace("{content_strategy}", content_strategy)
        .replace("{known_urls}", &format_url_list(known_urls))
        .replace("{guardrail}", GUARDRAIL)
}

/// Format the FAQ prompt from the title and a bounded body prefix.
pub fn format_faq_prompt(title: &str, body: &str, context_chars: usize) -> String {
    let excerpt: String = body.chars().take(context_chars).collect();

    FAQ_PROMPT
        .replace("{title}", title)
        .replace("{content}", &excerpt)
        .replace("{guardrail}", GUARDRAIL)
}

/// Prompt for the featured image.
pub fn featured_image_prompt(title: &str, angle: &str) -> String {
    format!("{}. {}. {}", title, angle, IMAGE_STYLE_DIRECTIVE)
}

/// Prompt for an in-body image illustrating a section heading.
pub fn inline_image_prompt(heading: &str) -> String {
    format!("{}. {}", heading, IMAGE_STYLE_DIRECTIVE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_content_prompt_carries_the_guardrail() {
        let urls = vec!["https://a.example.com/p".to_string()];

        assert!(format_topic_prompt("Plumbing", &urls, &[]).contains(GUARDRAIL));
        assert!(
            format_details_prompt("Plumbing", "uvp", "voice", "strategy", "topic", &urls)
                .contains(GUARDRAIL)
        );
        assert!(format_outline_prompt("Title", "Angle").contains(GUARDRAIL));
        assert!(
            format_body_prompt("Title", "outline", "uvp", "voice", "strategy", &urls)
                .contains(GUARDRAIL)
        );
        assert!(format_faq_prompt("Title", "body", 2000).contains(GUARDRAIL));
    }

    #[test]
    fn test_topic_prompt_includes_corpus_and_topics() {
        let urls = vec!["https://a.example.com/one".to_string()];
        let topics = vec!["Old topic".to_string()];
        let prompt = format_topic_prompt("Plumbing", &urls, &topics);

        assert!(prompt.contains("Plumbing"));
        assert!(prompt.contains("https://a.example.com/one"));
        assert!(prompt.contains("Old topic"));
    }

    #[test]
    fn test_body_prompt_empty_corpus_placeholder() {
        let prompt = format_body_prompt("T", "O", "u", "v", "s", &[]);
        assert!(prompt.contains("(no pages available)"));
        assert!(prompt.contains("never invent one"));
    }

    #[test]
    fn test_faq_prompt_is_bounded() {
        let body = "x".repeat(10_000);
        let prompt = format_faq_prompt("T", &body, 2000);
        // Bounded excerpt plus the fixed prompt text.
        assert!(prompt.len() < 3000);
    }

    #[test]
    fn test_image_prompts_carry_style_directive() {
        assert!(featured_image_prompt("T", "A").contains("photorealistic"));
        assert!(inline_image_prompt("Heading").contains("no text or words"));
    }
}
