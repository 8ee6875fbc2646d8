//! CLI command implementations.

pub mod responses;

use mathsoc_core::ExportError;
use mathsoc_site::config::ConfigError;
use mathsoc_site::store::StoreError;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Store write failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Nothing to export.
    #[error("No responses to export")]
    Export(#[from] ExportError),

    /// JSON output failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// `clear` was run without `--yes`.
    #[error("Refusing to clear {0} response(s) without --yes")]
    NotConfirmed(usize),
}
