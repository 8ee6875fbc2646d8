//! Admin panel gate, export, clear and close.

use axum::http::{StatusCode, header};
use mathsoc_core::{CSV_CONTENT_TYPE, CSV_HEADER};
use mathsoc_integration_tests::{ADMIN_TOKEN, TestContext};
use mathsoc_site::config::SiteConfig;
use mathsoc_site::storage::MemoryStorage;
use secrecy::SecretString;

const PANEL_MARKER: &str = r#"id="admin-panel""#;

fn admin(path: &str) -> String {
    format!("{path}?admin={ADMIN_TOKEN}")
}

async fn seeded() -> TestContext {
    let ctx = TestContext::new();
    ctx.submit_contact("Ada", "ada%40example.com", "First")
        .await;
    ctx.submit_contact("Grace", "grace%40example.com", "Second")
        .await;
    ctx
}

// ============================================================================
// Gate
// ============================================================================

#[tokio::test]
async fn test_panel_hidden_by_default() {
    let ctx = seeded().await;

    let page = ctx.get("/").await;

    assert_eq!(page.status, StatusCode::OK);
    assert!(!page.body.contains(PANEL_MARKER));
    assert!(!page.body.contains("grace@example.com"));
}

#[tokio::test]
async fn test_panel_visible_with_exact_token() {
    let ctx = seeded().await;

    let page = ctx.get(&admin("/")).await;

    assert!(page.body.contains(PANEL_MARKER));
    assert!(page.body.contains("2 responses"));
    assert!(page.body.contains("grace@example.com"));
    assert!(page.body.contains("ada@example.com"));
}

#[tokio::test]
async fn test_panel_stays_hidden_for_near_misses() {
    let ctx = seeded().await;

    for uri in [
        "/?admin=mathsoc-admi",
        "/?admin=mathsoc-admin1",
        "/?admin=MATHSOC-ADMIN",
        "/?token=mathsoc-admin",
        "/?admin=wrong&admin=mathsoc-admin",
    ] {
        let page = ctx.get(uri).await;
        assert_eq!(page.status, StatusCode::OK);
        assert!(!page.body.contains(PANEL_MARKER), "{uri} opened the panel");
    }
}

#[tokio::test]
async fn test_configured_token_replaces_default() {
    let config = SiteConfig {
        admin_token: SecretString::from("club-secret"),
        ..SiteConfig::default()
    };
    let ctx = TestContext::with_config(config, MemoryStorage::new());

    assert!(!ctx.get(&admin("/")).await.body.contains(PANEL_MARKER));
    assert!(ctx.get("/?admin=club-secret").await.body.contains(PANEL_MARKER));
}

#[tokio::test]
async fn test_card_shows_record_id() {
    let ctx = TestContext::new();
    ctx.submit_contact("Ada", "ada%40example.com", "Hello").await;
    let records = ctx.state.store().list_by_recency();
    let record = records.first().unwrap_or_else(|| panic!("nothing stored"));
    let id = record.id().as_str();

    let page = ctx.get(&admin("/")).await;

    let text = page.body.replace(&format!(r#"id="response-{id}""#), "");
    assert!(text.contains(id), "id {id} not shown on its card");
}

#[tokio::test]
async fn test_stored_markup_is_escaped() {
    let ctx = TestContext::new();
    ctx.submit_contact(
        "%3Cb%3EMallory%3C%2Fb%3E",
        "m%40example.com",
        "%3Cscript%3Ealert(1)%3C%2Fscript%3E",
    )
    .await;

    let page = ctx.get(&admin("/")).await;

    assert!(!page.body.contains("<script>alert(1)</script>"));
    assert!(!page.body.contains("<b>Mallory</b>"));
    assert!(page.body.contains("&lt;script&gt;"));
}

// ============================================================================
// Export
// ============================================================================

#[tokio::test]
async fn test_export_downloads_csv() {
    let ctx = TestContext::new();
    ctx.submit_contact("Ada", "ada%40example.com", "Say+%22hi%22")
        .await;

    let resp = ctx.get(&admin("/admin/export")).await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.header(header::CONTENT_TYPE), Some(CSV_CONTENT_TYPE));
    let disposition = resp.header(header::CONTENT_DISPOSITION).unwrap_or_default();
    assert!(disposition.starts_with("attachment; filename=\"mathsoc-contact-responses-"));
    assert!(disposition.ends_with(".csv\""));

    let mut lines = resp.body.lines();
    assert_eq!(lines.next(), Some(CSV_HEADER));
    let row = lines.next().unwrap_or_default();
    assert!(row.contains(r#","Ada",ada@example.com,"Say ""hi""","#), "{row}");
    assert_eq!(lines.next(), None);
}

#[tokio::test]
async fn test_export_empty_shows_notice() {
    let ctx = TestContext::new();

    let resp = ctx.get(&admin("/admin/export")).await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.header(header::CONTENT_DISPOSITION).is_none());
    assert!(resp.body.contains("No responses to export."));
    assert!(resp.body.contains(PANEL_MARKER));
}

#[tokio::test]
async fn test_actions_without_token_are_not_found() {
    let ctx = seeded().await;

    assert_eq!(ctx.get("/admin/export").await.status, StatusCode::NOT_FOUND);
    assert_eq!(
        ctx.get("/admin/export?admin=nope").await.status,
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        ctx.post_form("/admin/clear", "confirm=yes").await.status,
        StatusCode::NOT_FOUND
    );
    assert_eq!(ctx.stored(), 2);
}

// ============================================================================
// Clear & Close
// ============================================================================

#[tokio::test]
async fn test_clear_asks_for_confirmation_first() {
    let ctx = seeded().await;

    let resp = ctx.post_form(&admin("/admin/clear"), "").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("This cannot be undone."));
    assert!(resp.body.contains(r#"name="confirm" value="yes""#));
    assert_eq!(ctx.stored(), 2);
}

#[tokio::test]
async fn test_confirmed_clear_empties_store_and_hides_panel() {
    let ctx = seeded().await;

    let resp = ctx.post_form(&admin("/admin/clear"), "confirm=yes").await;

    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.header(header::LOCATION), Some("/"));
    assert_eq!(ctx.stored(), 0);

    let again = ctx.post_form(&admin("/admin/clear"), "confirm=yes").await;
    assert_eq!(again.status, StatusCode::SEE_OTHER);
    assert_eq!(ctx.stored(), 0);
}

#[tokio::test]
async fn test_close_strips_token() {
    let ctx = TestContext::new();

    let resp = ctx.get("/admin/close").await;

    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.header(header::LOCATION), Some("/#contact"));

    let page = ctx.get(resp.location_path().unwrap_or("/")).await;
    assert!(!page.body.contains(PANEL_MARKER));
}
