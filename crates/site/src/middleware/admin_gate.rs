//! Shared-secret gate for the admin panel.
//!
//! The panel is shown when the request's query string carries
//! `admin=<token>` with the configured token. This is a capability link,
//! not authentication: the token is static and ends up in browser history
//! and server logs. Anyone holding the link can read and delete responses.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use secrecy::ExposeSecret;
use url::form_urlencoded;

use crate::state::AppState;

/// Query parameter carrying the admin token.
pub const ADMIN_QUERY_PARAM: &str = "admin";

/// Visibility of the admin panel for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminView {
    #[default]
    Hidden,
    Visible,
}

impl AdminView {
    /// Evaluate the gate for a raw (still percent-encoded) query string.
    ///
    /// Only the first `admin` parameter counts, and its decoded value must
    /// equal `token` exactly.
    #[must_use]
    pub fn from_query(query: Option<&str>, token: &str) -> Self {
        let Some(query) = query else {
            return Self::Hidden;
        };

        let supplied = form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == ADMIN_QUERY_PARAM)
            .map(|(_, value)| value);

        match supplied {
            Some(value) if !token.is_empty() && value == token => Self::Visible,
            _ => Self::Hidden,
        }
    }

    #[must_use]
    pub const fn is_visible(self) -> bool {
        matches!(self, Self::Visible)
    }
}

/// Query string (without `?`) that re-opens the panel, for links and forms
/// rendered inside it.
#[must_use]
pub fn admin_query(token: &str) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair(ADMIN_QUERY_PARAM, token)
        .finish()
}

/// Remove every `admin` parameter from a raw query string, keeping the rest.
#[must_use]
pub fn strip_admin_param(query: &str) -> String {
    let kept =
        form_urlencoded::parse(query.as_bytes()).filter(|(key, _)| key != ADMIN_QUERY_PARAM);
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(kept)
        .finish()
}

/// Extractor reporting whether the admin panel should be shown.
///
/// Never rejects; pages render normally with the panel hidden.
pub struct AdminGate(pub AdminView);

impl FromRequestParts<AppState> for AdminGate {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = state.config().admin_token.expose_secret();
        Ok(Self(AdminView::from_query(parts.uri.query(), token)))
    }
}

/// Extractor for admin-only actions.
///
/// Rejects with `404 Not Found` when the gate is closed, so the actions
/// are indistinguishable from unknown routes.
///
/// # Example
///
/// ```rust,ignore
/// async fn export(_admin: RequireAdmin, State(state): State<AppState>) -> Response {
///     // only reached with ?admin=<token>
/// }
/// ```
pub struct RequireAdmin;

/// Error returned when an admin action is requested without the token.
pub struct AdminGateRejection;

impl IntoResponse for AdminGateRejection {
    fn into_response(self) -> Response {
        StatusCode::NOT_FOUND.into_response()
    }
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AdminGateRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = state.config().admin_token.expose_secret();
        if AdminView::from_query(parts.uri.query(), token).is_visible() {
            Ok(Self)
        } else {
            tracing::debug!(path = %parts.uri.path(), "Admin action without valid token");
            Err(AdminGateRejection)
        }
    }
}
