//! CSV export of stored contact responses.

use std::fmt::Write;

use chrono::NaiveDate;
use thiserror::Error;

use crate::types::ResponseRecord;

/// Header row of every export.
pub const CSV_HEADER: &str = "ID,Name,Email,Message,Date";

/// MIME type of the exported file.
pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

/// Errors that can occur when exporting responses.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ExportError {
    /// There are no responses to export.
    #[error("no responses to export")]
    Empty,
}

/// Render `records` as CSV, one row per record in the given order.
///
/// Only the free-text `Name` and `Message` columns are quoted, with inner
/// double quotes doubled. Rows are separated by `\n` with no trailing
/// newline.
///
/// # Errors
///
/// Returns [`ExportError::Empty`] when `records` is empty; no file should be
/// produced in that case.
pub fn export_csv(records: &[ResponseRecord]) -> Result<String, ExportError> {
    if records.is_empty() {
        return Err(ExportError::Empty);
    }

    let mut csv = String::from(CSV_HEADER);
    for record in records {
        let _ = write!(
            csv,
            "\n{},{},{},{},{}",
            record.id(),
            quote(record.name()),
            record.email(),
            quote(record.message()),
            record.display_timestamp()
        );
    }
    Ok(csv)
}

/// Download filename for an export triggered on `date`.
///
/// ```
/// use chrono::NaiveDate;
/// use mathsoc_core::export_filename;
///
/// let date = NaiveDate::from_ymd_opt(2025, 9, 15).unwrap();
/// assert_eq!(
///     export_filename("mathsoc", date),
///     "mathsoc-contact-responses-2025-09-15.csv"
/// );
/// ```
#[must_use]
pub fn export_filename(prefix: &str, date: NaiveDate) -> String {
    format!("{prefix}-contact-responses-{}.csv", date.format("%Y-%m-%d"))
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
