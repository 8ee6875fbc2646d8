//! Home page route handler and the shared page template.
//!
//! The whole site is one page; the contact and admin handlers re-render it
//! with their own notices instead of having templates of their own.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use chrono::Datelike;
use mathsoc_core::{Event, ResponseRecord};
use serde::Deserialize;
use tracing::instrument;

use crate::events::upcoming_events;
use crate::middleware::AdminGate;
use crate::routes::admin::AdminPanelView;
use crate::state::AppState;

// =============================================================================
// Notices
// =============================================================================

/// Tone of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
    Error,
}

impl NoticeKind {
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Success => "notice-success",
            Self::Info => "notice-info",
            Self::Error => "notice-error",
        }
    }
}

/// A one-line message shown above a form or panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

// =============================================================================
// Views
// =============================================================================

/// Event card display data.
#[derive(Debug, Clone)]
pub struct EventView {
    pub title: String,
    pub description: String,
    pub display_date: String,
    pub time: String,
    pub location: String,
    pub url: Option<String>,
}

impl From<Event> for EventView {
    fn from(event: Event) -> Self {
        Self {
            display_date: event.display_date(),
            title: event.title,
            description: event.description,
            time: event.time,
            location: event.location,
            url: event.url,
        }
    }
}

/// Contact form state: previously entered values and an outcome notice.
#[derive(Debug, Clone, Default)]
pub struct ContactFormView {
    pub name: String,
    pub email: String,
    pub message: String,
    pub notice: Option<Notice>,
}

impl ContactFormView {
    /// Empty form with a notice.
    #[must_use]
    pub fn with_notice(notice: Notice) -> Self {
        Self {
            notice: Some(notice),
            ..Self::default()
        }
    }
}

/// The single page template.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    /// Upcoming events, soonest first.
    pub events: Vec<EventView>,
    /// Contact form state.
    pub contact: ContactFormView,
    /// Admin panel, present only when the gate is open.
    pub admin: Option<AdminPanelView>,
    /// Footer copyright year.
    pub year: i32,
}

impl IndexTemplate {
    /// Assemble the page for the current moment.
    #[must_use]
    pub fn new(state: &AppState, contact: ContactFormView, admin: Option<AdminPanelView>) -> Self {
        let now = state.now();
        Self {
            events: upcoming_events(now).into_iter().map(EventView::from).collect(),
            contact,
            admin,
            year: now.year(),
        }
    }
}

// =============================================================================
// Handler
// =============================================================================

/// Query parameters understood by the home page.
#[derive(Debug, Default, Deserialize)]
pub struct HomeQuery {
    /// Id of the response just stored by the contact form.
    #[serde(default)]
    pub sent: Option<String>,
}

/// Thank-you text for a stored submission, personalised when the record is
/// still in the store.
#[must_use]
pub fn thank_you_message(record: Option<&ResponseRecord>) -> String {
    match record {
        Some(record) => format!(
            "Thank you, {}! Your message has been received. We'll get back to you at {} soon.",
            record.name(),
            record.email()
        ),
        None => {
            "Thank you! Your message has been received. We'll get back to you soon.".to_string()
        }
    }
}

/// Display the home page.
///
/// GET /
#[instrument(skip_all, fields(admin = gate.is_visible()))]
pub async fn index(
    State(state): State<AppState>,
    AdminGate(gate): AdminGate,
    Query(query): Query<HomeQuery>,
) -> IndexTemplate {
    let contact = match query.sent.as_deref() {
        Some(id) => {
            let record = state.store().find(id);
            ContactFormView::with_notice(Notice::success(thank_you_message(record.as_ref())))
        }
        None => ContactFormView::default(),
    };

    let admin = gate
        .is_visible()
        .then(|| AdminPanelView::load(&state, None, false));

    IndexTemplate::new(&state, contact, admin)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::DateTime;
    use mathsoc_core::build_record;

    use super::*;

    #[test]
    fn test_thank_you_names_the_sender() {
        let now = DateTime::parse_from_rfc3339("2025-09-15T19:00:00+08:00").unwrap();
        let record = build_record("Ada", "ada@example.com", "Hi", now).unwrap();

        assert_eq!(
            thank_you_message(Some(&record)),
            "Thank you, Ada! Your message has been received. \
             We'll get back to you at ada@example.com soon."
        );
        assert!(!thank_you_message(None).contains("ada@example.com"));
    }

    #[test]
    fn test_notice_classes() {
        assert_eq!(Notice::success("ok").kind.css_class(), "notice-success");
        assert_eq!(Notice::error("no").kind.css_class(), "notice-error");
    }
}
