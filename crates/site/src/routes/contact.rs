//! Contact form submission.

use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use mathsoc_core::build_record;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::error::add_breadcrumb;
use crate::routes::home::{ContactFormView, IndexTemplate, Notice};
use crate::state::AppState;

/// Where the browser lands after storing response `id`.
#[must_use]
pub fn sent_redirect(id: &str) -> String {
    format!("/?sent={id}#contact")
}

/// Shown when the response could not be persisted.
pub const NOT_SAVED_MESSAGE: &str = "Your message was not saved. Please try again.";

/// Contact form fields. Missing fields deserialize as empty and fail
/// validation like blank ones.
#[derive(Debug, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

impl ContactForm {
    fn into_view(self, notice: Notice) -> ContactFormView {
        ContactFormView {
            name: self.name,
            email: self.email,
            message: self.message,
            notice: Some(notice),
        }
    }
}

/// Store a contact form submission.
///
/// POST /contact
///
/// On success redirects to the page with a thank-you notice. Validation and
/// storage failures re-render the page with the entered values kept.
#[instrument(skip_all)]
pub async fn submit(State(state): State<AppState>, Form(form): Form<ContactForm>) -> Response {
    let record = match build_record(&form.name, &form.email, &form.message, state.now()) {
        Ok(record) => record,
        Err(e) => {
            tracing::debug!(error = %e, "Contact form rejected");
            let view = form.into_view(Notice::error(e.user_message()));
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                IndexTemplate::new(&state, view, None),
            )
                .into_response();
        }
    };

    let id = record.id().clone();
    if let Err(e) = state.store().append(record) {
        let event_id = sentry::capture_error(&e);
        tracing::error!(error = %e, sentry_event_id = %event_id, "Failed to store contact response");
        let view = form.into_view(Notice::error(NOT_SAVED_MESSAGE));
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            IndexTemplate::new(&state, view, None),
        )
            .into_response();
    }

    info!(response_id = %id, "Contact response stored");
    add_breadcrumb("contact", "Contact response stored");

    Redirect::to(&sent_redirect(id.as_str())).into_response()
}
