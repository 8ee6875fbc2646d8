//! Site configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `MATHSOC_HOST` - Bind address (default: 127.0.0.1)
//! - `MATHSOC_PORT` - Listen port (default: 3000)
//! - `MATHSOC_DATA_DIR` - Directory for stored responses (default: data)
//! - `MATHSOC_ADMIN_TOKEN` - Value of the `admin` query parameter that opens
//!   the admin panel (default: `mathsoc-admin`)
//! - `MATHSOC_SITE_PREFIX` - Prefix of exported CSV filenames (default: mathsoc)
//! - `MATHSOC_UTC_OFFSET` - Offset for displayed times and "today" (default: +08:00)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use chrono::{FixedOffset, Offset, Utc};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Admin gate value used when `MATHSOC_ADMIN_TOKEN` is unset.
///
/// Anyone who has read the source knows it; override it in deployment.
pub const DEFAULT_ADMIN_TOKEN: &str = "mathsoc-admin";

const DEFAULT_UTC_OFFSET_SECS: i32 = 8 * 3600;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Site configuration.
///
/// Implements `Debug` manually to redact the admin token.
#[derive(Clone)]
pub struct SiteConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory backing [`FileStorage`](crate::storage::FileStorage)
    pub data_dir: PathBuf,
    /// Shared secret of the admin gate
    pub admin_token: SecretString,
    /// Prefix of exported CSV filenames
    pub site_prefix: String,
    /// Offset used for display timestamps and the current date
    pub utc_offset: FixedOffset,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Emit logs as JSON lines
    pub log_json: bool,
}

impl std::fmt::Debug for SiteConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SiteConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("data_dir", &self.data_dir)
            .field("admin_token", &"[REDACTED]")
            .field("site_prefix", &self.site_prefix)
            .field("utc_offset", &self.utc_offset)
            .field("sentry_dsn", &self.sentry_dsn)
            .field("sentry_environment", &self.sentry_environment)
            .field("log_json", &self.log_json)
            .finish()
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
            data_dir: PathBuf::from("data"),
            admin_token: SecretString::from(DEFAULT_ADMIN_TOKEN),
            site_prefix: "mathsoc".to_string(),
            utc_offset: FixedOffset::east_opt(DEFAULT_UTC_OFFSET_SECS).unwrap_or_else(|| Utc.fix()),
            sentry_dsn: None,
            sentry_environment: None,
            log_json: false,
        }
    }
}

impl SiteConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let defaults = Self::default();

        let host = match get_optional_env("MATHSOC_HOST") {
            Some(raw) => raw.parse::<IpAddr>().map_err(|e| {
                ConfigError::InvalidEnvVar("MATHSOC_HOST".to_string(), e.to_string())
            })?,
            None => defaults.host,
        };
        let port = match get_optional_env("MATHSOC_PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|e| {
                ConfigError::InvalidEnvVar("MATHSOC_PORT".to_string(), e.to_string())
            })?,
            None => defaults.port,
        };
        let utc_offset = match get_optional_env("MATHSOC_UTC_OFFSET") {
            Some(raw) => parse_utc_offset(&raw).ok_or_else(|| {
                ConfigError::InvalidEnvVar(
                    "MATHSOC_UTC_OFFSET".to_string(),
                    format!("expected +HH:MM or -HH:MM, got {raw:?}"),
                )
            })?,
            None => defaults.utc_offset,
        };
        let admin_token = match get_optional_env("MATHSOC_ADMIN_TOKEN") {
            Some(token) if token.is_empty() => {
                return Err(ConfigError::InvalidEnvVar(
                    "MATHSOC_ADMIN_TOKEN".to_string(),
                    "must not be empty".to_string(),
                ));
            }
            Some(token) => SecretString::from(token),
            None => defaults.admin_token,
        };

        Ok(Self {
            host,
            port,
            data_dir: get_optional_env("MATHSOC_DATA_DIR")
                .map_or(defaults.data_dir, PathBuf::from),
            admin_token,
            site_prefix: get_optional_env("MATHSOC_SITE_PREFIX")
                .unwrap_or(defaults.site_prefix),
            utc_offset,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            log_json: get_optional_env("MATHSOC_LOG_JSON")
                .is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true")),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the admin gate still uses the built-in token.
    #[must_use]
    pub fn uses_default_admin_token(&self) -> bool {
        self.admin_token.expose_secret() == DEFAULT_ADMIN_TOKEN
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Parse `+HH:MM`, `-HH:MM` or `Z`.
fn parse_utc_offset(raw: &str) -> Option<FixedOffset> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("z") {
        return FixedOffset::east_opt(0);
    }

    let (sign, rest) = match raw.as_bytes().first()? {
        b'+' => (1, raw.get(1..)?),
        b'-' => (-1, raw.get(1..)?),
        _ => return None,
    };
    let (hours, minutes) = rest.split_once(':')?;
    if hours.len() != 2 || minutes.len() != 2 {
        return None;
    }
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if minutes >= 60 {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
