//! Contact form submission through the full router.

use axum::http::{StatusCode, header};
use mathsoc_integration_tests::TestContext;
use mathsoc_site::storage::MemoryStorage;

#[tokio::test]
async fn test_submission_is_stored_and_thanked() {
    let ctx = TestContext::new();

    let resp = ctx
        .submit_contact("Ada+Lovelace", "ada%40example.com", "Hello+there")
        .await;

    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    let location = resp.header(header::LOCATION).unwrap_or_default();
    assert!(location.starts_with("/?sent="), "{location}");
    assert!(location.ends_with("#contact"), "{location}");
    assert_eq!(ctx.stored(), 1);

    let page = ctx.get(resp.location_path().unwrap_or("/")).await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Thank you, Ada Lovelace!"));
    assert!(page.body.contains("ada@example.com"));
}

#[tokio::test]
async fn test_fields_are_trimmed() {
    let ctx = TestContext::new();

    ctx.submit_contact("++Ada++", "+ada%40example.com", "+Hi+")
        .await;

    let records = ctx.state.store().list_by_recency();
    let record = records.first().unwrap_or_else(|| panic!("nothing stored"));
    assert_eq!(record.name(), "Ada");
    assert_eq!(record.email(), "ada@example.com");
    assert_eq!(record.message(), "Hi");
}

#[tokio::test]
async fn test_blank_field_is_rejected_and_values_kept() {
    let ctx = TestContext::new();

    let resp = ctx
        .submit_contact("+++", "ada%40example.com", "Still+here")
        .await;

    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(resp.body.contains("Please fill in all fields."));
    assert!(resp.body.contains(r#"value="ada@example.com""#));
    assert!(resp.body.contains("Still here</textarea>"));
    assert_eq!(ctx.stored(), 0);
}

#[tokio::test]
async fn test_missing_fields_are_rejected() {
    let ctx = TestContext::new();

    let resp = ctx.post_form("/contact", "name=Ada").await;

    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(ctx.stored(), 0);
}

#[tokio::test]
async fn test_storage_failure_reports_not_saved() {
    let ctx = TestContext::with_storage(MemoryStorage::with_quota(16));

    let resp = ctx
        .submit_contact("Ada", "ada%40example.com", "Hello")
        .await;

    assert_eq!(resp.status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(resp.body.contains("Your message was not saved. Please try again."));
    assert!(resp.body.contains(r#"value="Ada""#));
    assert_eq!(ctx.stored(), 0);
}

#[tokio::test]
async fn test_unknown_sent_id_still_thanks() {
    let ctx = TestContext::new();

    let page = ctx.get("/?sent=unknown").await;

    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Thank you!"));
}
