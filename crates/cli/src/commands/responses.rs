//! Contact response commands.
//!
//! # Usage
//!
//! ```bash
//! # Newest first, human readable
//! mathsoc responses list
//!
//! # Same records as JSON
//! mathsoc responses list --json
//!
//! # Write the CSV export (defaults to <prefix>-contact-responses-<date>.csv)
//! mathsoc responses export -o responses.csv
//!
//! # Delete everything
//! mathsoc responses clear --yes
//! ```
//!
//! # Environment Variables
//!
//! Reads the same `MATHSOC_*` variables as the site, most importantly
//! `MATHSOC_DATA_DIR`.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use mathsoc_core::{export_csv, export_filename};
use mathsoc_site::store::ResponseStore;

use super::CliError;

/// Print every stored response, newest first.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn list(store: &ResponseStore, json: bool, out: &mut impl Write) -> Result<(), CliError> {
    let records = store.list_by_recency();

    if json {
        serde_json::to_writer_pretty(&mut *out, &records)?;
        writeln!(out)?;
        return Ok(());
    }

    if records.is_empty() {
        writeln!(out, "No responses stored.")?;
        return Ok(());
    }

    for record in &records {
        writeln!(
            out,
            "{}  {} <{}>  [{}]",
            record.display_timestamp(),
            record.name(),
            record.email(),
            record.id()
        )?;
        for line in record.message().lines() {
            writeln!(out, "    {line}")?;
        }
    }
    writeln!(out, "{} response(s)", records.len())?;

    Ok(())
}

/// Write the CSV export to `output`, or to the default export filename in
/// the current directory. Returns the path written.
///
/// # Errors
///
/// Returns [`CliError::Export`] when nothing is stored, or an I/O error.
pub fn export(
    store: &ResponseStore,
    site_prefix: &str,
    today: NaiveDate,
    output: Option<&Path>,
) -> Result<PathBuf, CliError> {
    let records = store.list_by_recency();
    let csv = export_csv(&records)?;

    let path = output.map_or_else(
        || PathBuf::from(export_filename(site_prefix, today)),
        Path::to_path_buf,
    );
    std::fs::write(&path, csv)?;

    tracing::info!(count = records.len(), path = %path.display(), "Exported responses");
    Ok(path)
}

/// Delete every stored response. Requires `confirmed`.
///
/// # Errors
///
/// Returns [`CliError::NotConfirmed`] without confirmation, or a store error.
pub fn clear(store: &ResponseStore, confirmed: bool) -> Result<usize, CliError> {
    let count = store.len();
    if !confirmed {
        return Err(CliError::NotConfirmed(count));
    }

    store.clear_all()?;
    tracing::info!(count, "Cleared responses");
    Ok(count)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::Arc;

    use chrono::DateTime;
    use mathsoc_core::{CSV_HEADER, build_record};
    use mathsoc_site::storage::MemoryStorage;

    use super::*;

    fn store_with(entries: &[(&str, &str)]) -> ResponseStore {
        let store = ResponseStore::new(Arc::new(MemoryStorage::new()));
        for (name, at) in entries {
            let now = DateTime::parse_from_rfc3339(at).unwrap();
            let record =
                build_record(name, "someone@example.com", "line one\nline two", now).unwrap();
            store.append(record).unwrap();
        }
        store
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 20).unwrap()
    }

    #[test]
    fn test_list_text_newest_first() {
        let store = store_with(&[
            ("Older", "2025-09-15T19:00:00+08:00"),
            ("Newer", "2025-09-16T09:30:00+08:00"),
        ]);
        let mut out = Vec::new();
        list(&store, false, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let newer = text.find("Newer").unwrap();
        let older = text.find("Older").unwrap();
        assert!(newer < older);
        assert!(text.contains("16 Sep 2025 9:30 AM  Newer <someone@example.com>"));
        assert!(text.contains("    line two\n"));
        assert!(text.ends_with("2 response(s)\n"));
    }

    #[test]
    fn test_list_empty() {
        let mut out = Vec::new();
        list(&store_with(&[]), false, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No responses stored.\n");
    }

    #[test]
    fn test_list_json() {
        let store = store_with(&[("Ada", "2025-09-15T19:00:00+08:00")]);
        let mut out = Vec::new();
        list(&store, true, &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["name"], "Ada");
        assert_eq!(value[0]["timestamp"], "2025-09-15T11:00:00.000Z");
        assert_eq!(value[0]["dateFormatted"], "15 Sep 2025 7:00 PM");
    }

    #[test]
    fn test_export_writes_csv() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.csv");
        let store = store_with(&[("Ada", "2025-09-15T19:00:00+08:00")]);

        let path = export(&store, "mathsoc", today(), Some(target.as_path())).unwrap();

        assert_eq!(path, target);
        let csv = std::fs::read_to_string(&path).unwrap();
        assert!(csv.starts_with(CSV_HEADER));
        assert!(csv.contains("\"Ada\",someone@example.com"));
    }

    #[test]
    fn test_export_empty_fails_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.csv");
        let store = store_with(&[]);

        let err = export(&store, "mathsoc", today(), Some(target.as_path())).unwrap_err();

        assert!(matches!(err, CliError::Export(_)));
        assert!(!target.exists());
    }

    #[test]
    fn test_clear_requires_confirmation() {
        let store = store_with(&[("Ada", "2025-09-15T19:00:00+08:00")]);

        assert!(matches!(clear(&store, false), Err(CliError::NotConfirmed(1))));
        assert_eq!(store.len(), 1);

        assert_eq!(clear(&store, true).unwrap(), 1);
        assert!(store.is_empty());
    }
}
