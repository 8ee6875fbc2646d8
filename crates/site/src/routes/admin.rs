//! Admin panel view and actions.
//!
//! Every action re-checks the token through [`RequireAdmin`]; forms and links
//! inside the panel carry it forward in their query strings.

use axum::{
    Form,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Redirect, Response},
};
use mathsoc_core::{CSV_CONTENT_TYPE, ExportError, ResponseRecord, export_csv, export_filename};
use secrecy::ExposeSecret;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::error::{Result, add_breadcrumb};
use crate::middleware::{RequireAdmin, admin_query};
use crate::routes::home::{ContactFormView, IndexTemplate, Notice};
use crate::state::AppState;

/// Notice shown when an export is requested with nothing stored.
pub const EMPTY_EXPORT_MESSAGE: &str = "No responses to export.";

/// One stored response as shown in the panel.
#[derive(Debug, Clone)]
pub struct ResponseView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub message: String,
    pub submitted: String,
}

impl From<&ResponseRecord> for ResponseView {
    fn from(record: &ResponseRecord) -> Self {
        Self {
            id: record.id().to_string(),
            name: record.name().to_string(),
            email: record.email().to_string(),
            message: record.message().to_string(),
            submitted: record.display_timestamp().to_string(),
        }
    }
}

/// Admin panel display data.
#[derive(Debug, Clone)]
pub struct AdminPanelView {
    /// Stored responses, newest first.
    pub responses: Vec<ResponseView>,
    /// Query string that keeps the panel open on follow-up requests.
    pub admin_query: String,
    pub notice: Option<Notice>,
    /// Ask for confirmation before clearing.
    pub confirm_clear: bool,
}

impl AdminPanelView {
    /// Load the panel from the current store contents.
    #[must_use]
    pub fn load(state: &AppState, notice: Option<Notice>, confirm_clear: bool) -> Self {
        let responses = state
            .store()
            .list_by_recency()
            .iter()
            .map(ResponseView::from)
            .collect();

        Self {
            responses,
            admin_query: admin_query(state.config().admin_token.expose_secret()),
            notice,
            confirm_clear,
        }
    }

    /// "1 response" / "3 responses".
    #[must_use]
    pub fn count_label(&self) -> String {
        match self.responses.len() {
            1 => "1 response".to_string(),
            n => format!("{n} responses"),
        }
    }
}

fn render_panel(state: &AppState, notice: Option<Notice>, confirm_clear: bool) -> Response {
    let panel = AdminPanelView::load(state, notice, confirm_clear);
    IndexTemplate::new(state, ContactFormView::default(), Some(panel)).into_response()
}

/// Download all stored responses as CSV.
///
/// GET /admin/export?admin=<token>
#[instrument(skip_all)]
pub async fn export(_admin: RequireAdmin, State(state): State<AppState>) -> Response {
    let records = state.store().list_by_recency();

    match export_csv(&records) {
        Ok(csv) => {
            let filename = export_filename(&state.config().site_prefix, state.now().date_naive());
            info!(count = records.len(), %filename, "Exported contact responses");
            add_breadcrumb("admin", "Exported contact responses");

            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, CSV_CONTENT_TYPE.to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{filename}\""),
                    ),
                ],
                csv,
            )
                .into_response()
        }
        Err(ExportError::Empty) => {
            render_panel(&state, Some(Notice::info(EMPTY_EXPORT_MESSAGE)), false)
        }
    }
}

/// Clear form payload.
#[derive(Debug, Default, Deserialize)]
pub struct ClearForm {
    #[serde(default)]
    pub confirm: Option<String>,
}

/// Delete every stored response.
///
/// POST /admin/clear?admin=<token>
///
/// Without `confirm=yes` the panel is re-rendered with a confirmation prompt
/// and nothing is removed.
#[instrument(skip_all)]
pub async fn clear(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Form(form): Form<ClearForm>,
) -> Result<Response> {
    if form.confirm.as_deref() != Some("yes") {
        return Ok(render_panel(&state, None, true));
    }

    let count = state.store().len();
    state.store().clear_all()?;

    info!(count, "Cleared contact responses");
    add_breadcrumb("admin", "Cleared contact responses");

    Ok(Redirect::to("/").into_response())
}

/// Leave the admin view.
///
/// GET /admin/close
pub async fn close() -> Redirect {
    Redirect::to("/#contact")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::Arc;

    use chrono::{FixedOffset, TimeZone};
    use mathsoc_core::build_record;

    use super::*;
    use crate::config::SiteConfig;
    use crate::storage::MemoryStorage;

    fn state_with(count: usize) -> AppState {
        let state = AppState::new(SiteConfig::default(), Arc::new(MemoryStorage::new()));
        let offset = FixedOffset::east_opt(8 * 3600).unwrap();
        for minute in 0..count {
            let now = offset
                .with_ymd_and_hms(2025, 9, 15, 19, u32::try_from(minute).unwrap(), 0)
                .unwrap();
            let record = build_record("Ada", "ada@example.com", "Hi", now).unwrap();
            state.store().append(record).unwrap();
        }
        state
    }

    #[test]
    fn test_count_label() {
        let label = |count| AdminPanelView::load(&state_with(count), None, false).count_label();
        assert_eq!(label(0), "0 responses");
        assert_eq!(label(1), "1 response");
        assert_eq!(label(2), "2 responses");
    }

    #[test]
    fn test_panel_carries_admin_query() {
        let panel = AdminPanelView::load(&state_with(0), None, false);
        assert_eq!(panel.admin_query, "admin=mathsoc-admin");
    }

    #[test]
    fn test_response_view_uses_display_timestamp() {
        let panel = AdminPanelView::load(&state_with(1), None, false);
        assert_eq!(panel.responses.len(), 1);
        assert_eq!(panel.responses[0].submitted, "15 Sep 2025 7:00 PM");
    }
}
