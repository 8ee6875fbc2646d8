//! Record codec: form fields to records, records to persisted text.
//!
//! The persisted collection is a single JSON array of
//! [`ResponseRecord`] objects in insertion order.

use chrono::{DateTime, FixedOffset, SubsecRound, Utc};
use thiserror::Error;

use crate::types::{FormField, ResponseId, ResponseRecord, ValidationError};

/// Display format for [`ResponseRecord::display_timestamp`].
///
/// Contains no comma so the CSV `Date` column needs no quoting.
pub const DISPLAY_TIMESTAMP_FORMAT: &str = "%-d %b %Y %-I:%M %p";

/// Errors from encoding or decoding the persisted collection.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Persisted text is not a JSON array of response records.
    #[error("malformed response collection: {0}")]
    Malformed(#[source] serde_json::Error),

    /// The collection could not be encoded.
    #[error("failed to encode response collection: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Build a record from raw form input.
///
/// All three fields are trimmed. `now` is the creation instant; its offset
/// decides the zone of the human-readable timestamp, while the stored
/// `timestamp` is UTC truncated to milliseconds.
///
/// # Errors
///
/// Returns [`ValidationError::MissingField`] listing every field that is
/// empty after trimming.
///
/// # Example
///
/// ```
/// use chrono::DateTime;
/// use mathsoc_core::build_record;
///
/// let now = DateTime::parse_from_rfc3339("2025-09-15T19:00:00+08:00").unwrap();
/// let record = build_record("  Ada ", "ada@example.com", "Hi!", now).unwrap();
/// assert_eq!(record.name(), "Ada");
/// assert_eq!(record.display_timestamp(), "15 Sep 2025 7:00 PM");
///
/// assert!(build_record("Ada", "   ", "Hi!", now).is_err());
/// ```
pub fn build_record(
    name: &str,
    email: &str,
    message: &str,
    now: DateTime<FixedOffset>,
) -> Result<ResponseRecord, ValidationError> {
    let name = name.trim();
    let email = email.trim();
    let message = message.trim();

    let fields: Vec<FormField> = [
        (FormField::Name, name),
        (FormField::Email, email),
        (FormField::Message, message),
    ]
    .into_iter()
    .filter(|(_, value)| value.is_empty())
    .map(|(field, _)| field)
    .collect();

    if !fields.is_empty() {
        return Err(ValidationError::MissingField { fields });
    }

    let now = now.trunc_subsecs(3);
    let timestamp = now.with_timezone(&Utc);

    Ok(ResponseRecord::new(
        ResponseId::generate(timestamp),
        name.to_owned(),
        email.to_owned(),
        message.to_owned(),
        timestamp,
        now.format(DISPLAY_TIMESTAMP_FORMAT).to_string(),
    ))
}

/// Encode the collection as a JSON array, preserving order.
///
/// # Errors
///
/// Returns [`CodecError::Encode`] if serialization fails.
pub fn serialize_collection(records: &[ResponseRecord]) -> Result<String, CodecError> {
    serde_json::to_string(records).map_err(CodecError::Encode)
}

/// Decode a persisted collection.
///
/// Callers that own persisted state treat an error here as an empty
/// collection; the codec itself only reports what went wrong.
///
/// # Errors
///
/// Returns [`CodecError::Malformed`] if `text` is not a JSON array of
/// records.
pub fn deserialize_collection(text: &str) -> Result<Vec<ResponseRecord>, CodecError> {
    serde_json::from_str(text).map_err(CodecError::Malformed)
}
