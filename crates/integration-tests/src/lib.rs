//! Integration tests for the MathSoc site.
//!
//! The full router runs in-process against [`MemoryStorage`]; requests go
//! through `tower::ServiceExt::oneshot`, so no server or data directory is
//! needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p mathsoc-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use axum::{
    body::{Body, to_bytes},
    http::{HeaderMap, Request, StatusCode, header},
};
use mathsoc_site::app;
use mathsoc_site::config::SiteConfig;
use mathsoc_site::state::AppState;
use mathsoc_site::storage::MemoryStorage;
use tower::ServiceExt;

/// Admin token of [`SiteConfig::default`].
pub const ADMIN_TOKEN: &str = mathsoc_site::config::DEFAULT_ADMIN_TOKEN;

/// A response with its body collected as text.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// Value of a header as text, if present.
    #[must_use]
    pub fn header(&self, name: header::HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// `Location` header with any fragment removed, ready to be requested.
    #[must_use]
    pub fn location_path(&self) -> Option<&str> {
        self.header(header::LOCATION)
            .and_then(|location| location.split('#').next())
    }
}

/// Site wired to in-memory storage.
pub struct TestContext {
    pub state: AppState,
}

impl TestContext {
    /// Default configuration, unlimited storage.
    #[must_use]
    pub fn new() -> Self {
        Self::with_storage(MemoryStorage::new())
    }

    /// Default configuration over the given storage.
    #[must_use]
    pub fn with_storage(storage: MemoryStorage) -> Self {
        Self::with_config(SiteConfig::default(), storage)
    }

    #[must_use]
    pub fn with_config(config: SiteConfig, storage: MemoryStorage) -> Self {
        Self {
            state: AppState::new(config, Arc::new(storage)),
        }
    }

    /// Send one request through a fresh router sharing this context's state.
    ///
    /// # Panics
    ///
    /// Panics if the router fails or the body is not UTF-8.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = app(self.state.clone())
            .oneshot(request)
            .await
            .unwrap_or_else(|e| match e {});

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap_or_else(|e| panic!("failed to read body: {e}"));
        let body = String::from_utf8(bytes.to_vec())
            .unwrap_or_else(|e| panic!("body is not UTF-8: {e}"));

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// `GET uri`.
    ///
    /// # Panics
    ///
    /// Panics on an invalid URI.
    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::get(uri)
            .body(Body::empty())
            .unwrap_or_else(|e| panic!("invalid request {uri}: {e}"));
        self.send(request).await
    }

    /// `POST uri` with a form-urlencoded body.
    ///
    /// # Panics
    ///
    /// Panics on an invalid URI.
    pub async fn post_form(&self, uri: &str, body: &str) -> TestResponse {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap_or_else(|e| panic!("invalid request {uri}: {e}"));
        self.send(request).await
    }

    /// Submit the contact form with already-encoded field values.
    pub async fn submit_contact(&self, name: &str, email: &str, message: &str) -> TestResponse {
        self.post_form(
            "/contact",
            &format!("name={name}&email={email}&message={message}"),
        )
        .await
    }

    /// Number of stored responses.
    #[must_use]
    pub fn stored(&self) -> usize {
        self.state.store().len()
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
