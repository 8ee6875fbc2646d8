//! Request-level errors.
//!
//! Most failures on this site are rendered as part of the page (validation
//! notices, the "not saved" message). [`AppError`] covers what is left:
//! handlers that return `Result` and the 404 fallback.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::middleware::admin_gate::strip_admin_param;
use crate::store::StoreError;

/// Error returned from a handler.
#[derive(Debug, Error)]
pub enum AppError {
    /// The response store could not be written.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// No route or resource under this path.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// HTTP status sent to the client.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    /// Body text sent to the client. Never includes the underlying cause.
    #[must_use]
    pub const fn public_message(&self) -> &'static str {
        match self {
            Self::Store(_) => "Storage is unavailable, please try again",
            Self::NotFound(_) => "Not found",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Self::Store(source) = &self {
            let event_id = sentry::capture_error(source);
            tracing::error!(error = %source, sentry_event_id = %event_id, "Store failure");
        }

        (self.status(), self.public_message()).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Record an admin or visitor action as a Sentry breadcrumb.
pub fn add_breadcrumb(category: &str, message: &str) {
    sentry::add_breadcrumb(sentry::Breadcrumb {
        category: Some(category.to_owned()),
        message: Some(message.to_owned()),
        level: sentry::Level::Info,
        ..Default::default()
    });
}

/// Remove the admin token from an event's request data before it is sent.
#[must_use]
pub fn scrub_event(
    mut event: sentry::protocol::Event<'static>,
) -> sentry::protocol::Event<'static> {
    let Some(request) = event.request.as_mut() else {
        return event;
    };

    if let Some(query) = request.query_string.take() {
        let cleaned = strip_admin_param(&query);
        request.query_string = (!cleaned.is_empty()).then_some(cleaned);
    }

    if let Some(url) = request.url.as_mut() {
        let cleaned = url.query().map(strip_admin_param).unwrap_or_default();
        url.set_query((!cleaned.is_empty()).then_some(cleaned.as_str()));
    }

    event
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::StorageError;

    fn store_error() -> AppError {
        AppError::Store(StoreError::WriteFailed(StorageError::QuotaExceeded {
            key: "mathsoc_contact_responses".to_owned(),
            needed: 10,
            quota: 5,
        }))
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(store_error().status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            AppError::NotFound("/nope".to_owned()).status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_public_message_hides_cause() {
        let err = store_error();
        assert!(err.to_string().contains("quota"));
        assert!(!err.public_message().contains("quota"));
    }

    #[test]
    fn test_into_response_uses_status() {
        let resp = AppError::NotFound("/nope".to_owned()).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_scrub_event_drops_admin_token() {
        let event = sentry::protocol::Event {
            request: Some(sentry::protocol::Request {
                url: Some(
                    "http://localhost:3000/?sent=abc&admin=mathsoc-admin"
                        .parse()
                        .unwrap(),
                ),
                query_string: Some("sent=abc&admin=mathsoc-admin".to_owned()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let request = scrub_event(event).request.unwrap();

        assert_eq!(request.query_string.as_deref(), Some("sent=abc"));
        assert_eq!(
            request.url.unwrap().as_str(),
            "http://localhost:3000/?sent=abc"
        );
    }

    #[test]
    fn test_scrub_event_clears_token_only_query() {
        let event = sentry::protocol::Event {
            request: Some(sentry::protocol::Request {
                url: Some(
                    "http://localhost:3000/admin/export?admin=mathsoc-admin"
                        .parse()
                        .unwrap(),
                ),
                query_string: Some("admin=mathsoc-admin".to_owned()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let request = scrub_event(event).request.unwrap();

        assert_eq!(request.query_string, None);
        assert_eq!(
            request.url.unwrap().as_str(),
            "http://localhost:3000/admin/export"
        );
    }
}
