//! HTTP middleware stack for the site.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (binary only)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Security headers (CSP, frame, referrer, caching)
//!
//! The admin gate is an extractor rather than a layer, so pages that merely
//! show or hide the panel and actions that require it share one check.

pub mod admin_gate;
pub mod request_id;
pub mod security_headers;

pub use admin_gate::{ADMIN_QUERY_PARAM, AdminGate, AdminView, RequireAdmin, admin_query};
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
