//! Integration tests for the full generation pipeline and the publish
//! transaction, exercised against mocks.

use std::sync::Mutex;

use authoring::testing::{MockAI, MockCms, MockCmsCall, MockRegistry};
use authoring::types::FaqEntry;
use authoring::{
    publish, AuthoringError, ClientProfile, CmsCredentials, Pipeline, PipelineConfig,
    PublishError, PublishStatus, Stage,
};

const SITE: &str = "https://acme.example.com";

fn test_client(known_urls: &[&str]) -> ClientProfile {
    ClientProfile::new(
        "client-1",
        "Acme Plumbing",
        "Plumbing",
        SITE,
        "Same-day service, upfront pricing",
        "Friendly and practical",
        "Educational how-to content for homeowners",
        CmsCredentials::new("https://blog.acme.example.com", "admin", "app-password"),
    )
    .with_known_urls(known_urls.iter().copied())
}

/// A body that satisfies the link contract for the given corpus.
fn conforming_body(internal: &[&str]) -> String {
    let mut body = String::from("<p>Opening paragraph.</p>\n<h2>Why It Matters</h2>\n");
    for url in internal {
        body.push_str(&format!(r#"<p>Read <a href="{}">our guide</a>.</p>"#, url));
    }
    body.push_str(concat!(
        r#"<p>Per <a href="https://www.energy.gov/article">the DOE</a> and "#,
        r#"<a href="https://www.epa.gov/report">the EPA</a>, efficiency matters.</p>"#,
    ));
    body.push_str("\n<h2>Conclusion</h2>\n<p>Closing paragraph.</p>");
    body
}

fn known_urls() -> Vec<&'static str> {
    vec![
        "https://acme.example.com/blog/water-heaters",
        "https://acme.example.com/blog/frozen-pipes",
        "https://acme.example.com/blog/leak-detection",
    ]
}

#[tokio::test]
async fn test_happy_path_assembles_article() {
    let urls = known_urls();
    let ai = MockAI::new()
        .with_topic("Tankless water heater rebates")
        .with_details(
            "My Great Title!",
            "A practical angle.",
            &["rebate", "tankless", "water heater", "plumbing", "savings"],
        )
        .with_body(conforming_body(&urls[..2]));
    let registry = MockRegistry::new().with_urls("client-1", urls.clone());
    let pipeline = Pipeline::new(ai, registry);

    let mut client = test_client(&urls);
    let article = pipeline.run(&mut client, |_| {}).await.unwrap();

    assert_eq!(article.title, "My Great Title!");
    assert_eq!(article.angle, "A practical angle.");
    assert_eq!(article.keywords.len(), 5);
    assert!(!article.outline.is_empty());
    assert!(!article.featured_image.is_empty());

    // Title is rendered separately by the consumer; the body never
    // carries it as a top-level heading.
    assert!(!article.body_html.contains("<h1>"));
    assert!(!article.outline.contains("My Great Title!"));

    // FAQ block appended with structured data.
    assert!(article.body_html.contains("Frequently Asked Questions"));
    assert!(article.body_html.contains("application/ld+json"));
    assert!(article.body_html.contains("FAQPage"));
}

#[tokio::test]
async fn test_progress_messages_emitted_in_stage_order() {
    let urls = known_urls();
    let ai = MockAI::new().with_body(conforming_body(&urls[..2]));
    let registry = MockRegistry::new().with_urls("client-1", urls.clone());
    let pipeline = Pipeline::new(ai, registry);

    let progress: Mutex<Vec<String>> = Mutex::new(Vec::new());
    let mut client = test_client(&urls);
    pipeline
        .run(&mut client, |msg| {
            progress.lock().unwrap().push(msg.to_string())
        })
        .await
        .unwrap();

    let messages = progress.into_inner().unwrap();
    let expected: Vec<&str> = [
        Stage::FindingTopic,
        Stage::GeneratingDetails,
        Stage::GeneratingOutline,
        Stage::GeneratingBody,
        Stage::GeneratingFeaturedImage,
        Stage::RegisteringUrl,
    ]
    .iter()
    .map(|s| s.progress_message())
    .collect();

    assert_eq!(messages, expected);
}

#[tokio::test]
async fn test_empty_corpus_run_reaches_done_with_zero_internal_links() {
    let ai = MockAI::new().with_body(conforming_body(&[]));
    let registry = MockRegistry::new();
    let pipeline = Pipeline::new(ai, registry);

    let mut client = test_client(&[]);
    let article = pipeline.run(&mut client, |_| {}).await.unwrap();

    // No own-site links at all in the body.
    assert!(!article.body_html.contains("href=\"https://acme.example.com"));
}

#[tokio::test]
async fn test_zero_images_fails_at_featured_image_stage() {
    let urls = known_urls();
    let ai = MockAI::new()
        .with_body(conforming_body(&urls[..2]))
        .with_failing_images();
    let registry = MockRegistry::new().with_urls("client-1", urls.clone());
    // In-body image failures are swallowed; only the featured image is fatal.
    let pipeline = Pipeline::new(ai, registry);

    let mut client = test_client(&urls);
    let err = pipeline.run(&mut client, |_| {}).await.unwrap_err();

    assert_eq!(err.stage(), Some(Stage::GeneratingFeaturedImage));
    assert!(err.to_string().contains("GeneratingFeaturedImage"));
}

#[tokio::test]
async fn test_registration_failure_does_not_abort_the_run() {
    let urls = known_urls();
    let ai = MockAI::new().with_body(conforming_body(&urls[..2]));
    let registry = MockRegistry::new()
        .with_urls("client-1", urls.clone())
        .with_failing_writes();
    let pipeline = Pipeline::new(ai, registry);

    let mut client = test_client(&urls);
    let article = pipeline.run(&mut client, |_| {}).await.unwrap();

    // The article is identical to a successful-registration run.
    assert_eq!(article.title, "Default Title");
    assert!(!article.body_html.is_empty());

    // A failed refresh never shrinks known_urls.
    assert_eq!(client.known_urls.len(), urls.len());
}

#[tokio::test]
async fn test_successful_run_registers_slug_and_refreshes_known_urls() {
    let urls = known_urls();
    let ai = MockAI::new()
        .with_details(
            "My Great Title!",
            "Angle.",
            &["a", "b", "c", "d", "e"],
        )
        .with_body(conforming_body(&urls[..2]));
    let registry = MockRegistry::new().with_urls("client-1", urls.clone());
    let pipeline = Pipeline::new(ai, registry);

    let mut client = test_client(&urls);
    pipeline.run(&mut client, |_| {}).await.unwrap();

    let expected_url = "https://acme.example.com/blog/my-great-title";
    assert!(client.known_urls.iter().any(|u| u == expected_url));
    assert_eq!(client.known_urls.len(), urls.len() + 1);
}

#[tokio::test]
async fn test_schema_violation_fails_at_details_stage() {
    let ai = MockAI::new().with_raw_details(serde_json::json!({
        "title": "T", "angle": "A"
        // keywords missing
    }));
    let registry = MockRegistry::new();
    let pipeline = Pipeline::new(ai, registry);

    let mut client = test_client(&[]);
    let err = pipeline.run(&mut client, |_| {}).await.unwrap_err();

    assert_eq!(err.stage(), Some(Stage::GeneratingDetails));
}

#[tokio::test]
async fn test_keyword_count_out_of_range_is_a_hard_failure() {
    let ai = MockAI::new().with_details("T", "A", &["only", "three", "keywords"]);
    let registry = MockRegistry::new();
    let pipeline = Pipeline::new(ai, registry);

    let mut client = test_client(&[]);
    let err = pipeline.run(&mut client, |_| {}).await.unwrap_err();

    assert_eq!(err.stage(), Some(Stage::GeneratingDetails));
}

#[tokio::test]
async fn test_link_contract_enforcement_aborts_body_stage() {
    let urls = known_urls();
    // Only one internal link: violates the 2-4 contract.
    let ai = MockAI::new().with_body(conforming_body(&urls[..1]));
    let registry = MockRegistry::new().with_urls("client-1", urls.clone());
    let pipeline = Pipeline::new(ai, registry)
        .with_config(PipelineConfig::new().with_enforce_link_contract(true));

    let mut client = test_client(&urls);
    let err = pipeline.run(&mut client, |_| {}).await.unwrap_err();

    assert_eq!(err.stage(), Some(Stage::GeneratingBody));
    match err {
        AuthoringError::Stage { source, .. } => {
            assert!(matches!(*source, AuthoringError::LinkingConstraint(_)));
        }
        other => panic!("expected Stage wrapper, got {}", other),
    }
}

#[tokio::test]
async fn test_link_contract_advisory_by_default() {
    let urls = known_urls();
    let ai = MockAI::new().with_body(conforming_body(&urls[..1]));
    let registry = MockRegistry::new().with_urls("client-1", urls.clone());
    let pipeline = Pipeline::new(ai, registry);

    let mut client = test_client(&urls);
    // Violation is logged, not fatal.
    assert!(pipeline.run(&mut client, |_| {}).await.is_ok());
}

#[tokio::test]
async fn test_fenced_body_output_is_stripped() {
    let urls = known_urls();
    let fenced = format!("```html\n{}\n```", conforming_body(&urls[..2]));
    let ai = MockAI::new().with_body(fenced);
    let registry = MockRegistry::new().with_urls("client-1", urls.clone());
    let pipeline = Pipeline::new(ai, registry)
        .with_config(PipelineConfig::new().with_max_inline_images(0));

    let mut client = test_client(&urls);
    let article = pipeline.run(&mut client, |_| {}).await.unwrap();

    assert!(!article.body_html.starts_with("```"));
    assert!(!article.body_html.contains("```html"));
}

#[tokio::test]
async fn test_faq_entity_count_matches_rendered_pairs() {
    let urls = known_urls();
    let faqs: Vec<FaqEntry> = (0..5)
        .map(|i| FaqEntry {
            question: format!("Question {}?", i),
            answer: format!("Answer {}.", i),
        })
        .collect();
    let ai = MockAI::new()
        .with_body(conforming_body(&urls[..2]))
        .with_faqs(faqs);
    let registry = MockRegistry::new().with_urls("client-1", urls.clone());
    let pipeline = Pipeline::new(ai, registry);

    let mut client = test_client(&urls);
    let article = pipeline.run(&mut client, |_| {}).await.unwrap();

    let marker = r#"<script type="application/ld+json">"#;
    let start = article.body_html.find(marker).unwrap() + marker.len();
    let end = article.body_html[start..].find("</script>").unwrap() + start;
    let faq_page: serde_json::Value =
        serde_json::from_str(&article.body_html[start..end]).unwrap();

    let rendered_pairs = article.body_html.matches("<h3>Question").count();
    assert_eq!(rendered_pairs, 5);
    assert_eq!(faq_page["mainEntity"].as_array().unwrap().len(), 5);
}

// =============================================================================
// Publish transaction
// =============================================================================

async fn generated_article() -> authoring::Article {
    let urls = known_urls();
    let ai = MockAI::new()
        .with_details(
            "My Great Title!",
            "Angle.",
            &["a", "b", "c", "d", "e"],
        )
        .with_body(conforming_body(&urls[..2]));
    let registry = MockRegistry::new().with_urls("client-1", urls.clone());
    let pipeline = Pipeline::new(ai, registry);

    let mut client = test_client(&urls);
    pipeline.run(&mut client, |_| {}).await.unwrap()
}

#[tokio::test]
async fn test_publish_uploads_media_before_creating_post() {
    let article = generated_article().await;
    let client = test_client(&[]);
    let cms = MockCms::new();

    let link = publish(&cms, &client, &article, PublishStatus::Draft)
        .await
        .unwrap();
    assert_eq!(link, "https://blog.example.com/?p=101");

    let calls = cms.calls();
    assert_eq!(calls.len(), 2);
    match &calls[0] {
        MockCmsCall::UploadMedia { filename, .. } => {
            assert_eq!(filename, "my-great-title-featured.jpg");
        }
        other => panic!("first call must be the upload, got {:?}", other),
    }
    match &calls[1] {
        MockCmsCall::CreatePost {
            status,
            featured_media,
            ..
        } => {
            assert_eq!(status, "draft");
            assert_eq!(*featured_media, 42);
        }
        other => panic!("second call must be the post, got {:?}", other),
    }
}

#[tokio::test]
async fn test_failed_upload_means_no_post_call() {
    let article = generated_article().await;
    let client = test_client(&[]);
    let cms = MockCms::new().with_failing_upload(403, "Invalid credentials.");

    let err = publish(&cms, &client, &article, PublishStatus::Publish)
        .await
        .unwrap_err();

    match err {
        PublishError::Media { status, message } => {
            assert_eq!(status, 403);
            assert_eq!(message, "Invalid credentials.");
        }
        other => panic!("expected Media error, got {}", other),
    }

    // Upload failure aborts the transaction before any post call.
    assert_eq!(cms.calls().len(), 1);
}

#[tokio::test]
async fn test_failed_post_surfaces_cms_message_verbatim() {
    let article = generated_article().await;
    let client = test_client(&[]);
    let cms = MockCms::new().with_failing_post(400, "Invalid post status.");

    let err = publish(&cms, &client, &article, PublishStatus::Publish)
        .await
        .unwrap_err();

    match err {
        PublishError::Post { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Invalid post status.");
        }
        other => panic!("expected Post error, got {}", other),
    }
}

#[tokio::test]
async fn test_draft_publish_returns_cms_link_exactly() {
    let article = generated_article().await;
    let client = test_client(&[]);
    let cms = MockCms::new().with_link("https://blog.acme.example.com/2026/08/my-great-title/");

    let link = publish(&cms, &client, &article, PublishStatus::Draft)
        .await
        .unwrap();

    assert_eq!(link, "https://blog.acme.example.com/2026/08/my-great-title/");
}
