//! HTTP route handlers for the site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Home page (?admin=<token> shows the panel)
//! POST /contact                 - Contact form submission
//! GET  /health                  - Health check
//!
//! # Admin (404 without ?admin=<token>)
//! GET  /admin/export            - Download responses as CSV
//! POST /admin/clear             - Delete all responses (confirm=yes)
//! GET  /admin/close             - Leave the admin view
//! ```

pub mod admin;
pub mod contact;
pub mod home;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/export", get(admin::export))
        .route("/clear", post(admin::clear))
        .route("/close", get(admin::close))
}

/// Create all page routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/contact", post(contact::submit))
        .nest("/admin", admin_routes())
}
