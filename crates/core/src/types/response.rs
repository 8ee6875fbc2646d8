//! Contact form responses.

use core::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ResponseId;

/// The three required contact form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Email,
    Message,
}

impl FormField {
    /// Form input name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur when building a [`ResponseRecord`] from form input.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// One or more required fields were empty after trimming.
    #[error(
        "missing required field(s): {}",
        .fields.iter().map(|f| f.as_str()).collect::<Vec<_>>().join(", ")
    )]
    MissingField {
        /// Every field that was empty, in form order.
        fields: Vec<FormField>,
    },
}

impl ValidationError {
    /// Message shown to the person filling in the form.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "Please fill in all fields.",
        }
    }
}

/// One submitted contact form entry.
///
/// Records are immutable once built. The only constructor is
/// [`build_record`](crate::codec::build_record), which guarantees trimmed,
/// non-empty text fields; values read back from storage are trusted.
///
/// ## Persisted form
///
/// ```json
/// {
///   "id": "mfl0ijk0q3x9a7b2c",
///   "name": "Ada",
///   "email": "ada@example.com",
///   "message": "Hello",
///   "timestamp": "2025-09-15T11:00:00.000Z",
///   "dateFormatted": "15 Sep 2025 7:00 PM"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseRecord {
    id: ResponseId,
    name: String,
    email: String,
    message: String,
    #[serde(with = "rfc3339_millis")]
    timestamp: DateTime<Utc>,
    #[serde(rename = "dateFormatted")]
    display_timestamp: String,
}

impl ResponseRecord {
    pub(crate) const fn new(
        id: ResponseId,
        name: String,
        email: String,
        message: String,
        timestamp: DateTime<Utc>,
        display_timestamp: String,
    ) -> Self {
        Self {
            id,
            name,
            email,
            message,
            timestamp,
            display_timestamp,
        }
    }

    #[must_use]
    pub const fn id(&self) -> &ResponseId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Creation instant (UTC, millisecond precision).
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Human-readable creation time, fixed when the record was built.
    #[must_use]
    pub fn display_timestamp(&self) -> &str {
        &self.display_timestamp
    }
}

/// RFC 3339 with exactly three fractional digits and a `Z` suffix, so the
/// persisted string sorts lexically in chronological order.
mod rfc3339_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
