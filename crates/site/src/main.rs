//! MathSoc club website.
//!
//! Serves the single-page site on port 3000 by default.
//!
//! # Architecture
//!
//! - Axum web framework, no client-side scripts
//! - Askama templates for server-side rendering
//! - Contact responses kept in a JSON file under `MATHSOC_DATA_DIR`
//! - Admin panel behind a `?admin=<token>` capability link

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::borrow::Cow;
use std::sync::Arc;

use mathsoc_site::config::SiteConfig;
use mathsoc_site::error::scrub_event;
use mathsoc_site::state::AppState;
use mathsoc_site::storage::FileStorage;
use sentry::integrations::tracing as sentry_tracing;
use tracing::Level;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "mathsoc_site=info,tower_http=debug";

/// Start Sentry when a DSN is configured. The guard flushes on drop.
///
/// Events pass through [`scrub_event`] so the admin token in request URLs
/// never leaves the process.
fn init_sentry(config: &SiteConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_deref()?;

    let options = sentry::ClientOptions {
        release: sentry::release_name!(),
        environment: config.sentry_environment.clone().map(Cow::Owned),
        attach_stacktrace: true,
        before_send: Some(Arc::new(|event| Some(scrub_event(event)))),
        ..Default::default()
    };
    Some(sentry::init((dsn, options)))
}

/// Warnings and errors become Sentry events, info and debug become
/// breadcrumbs.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        Level::ERROR | Level::WARN => sentry_tracing::EventFilter::Event,
        Level::INFO | Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn init_tracing(log_json: bool) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let json_layer = log_json.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!log_json).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() {
    let config = SiteConfig::from_env().expect("Failed to load configuration");

    // Sentry before the subscriber so its tracing layer has a client
    let sentry_guard = init_sentry(&config);
    init_tracing(config.log_json);
    if sentry_guard.is_some() {
        tracing::info!("Sentry initialized");
    }

    if config.uses_default_admin_token() {
        tracing::warn!(
            "MATHSOC_ADMIN_TOKEN is not set; the admin panel opens with the default token"
        );
    }

    tracing::info!(data_dir = %config.data_dir.display(), "Using file storage");
    let storage = Arc::new(FileStorage::new(&config.data_dir));
    let addr = config.socket_addr();

    let router = mathsoc_site::app(AppState::new(config, storage))
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction());

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");
    tracing::info!("site listening on http://{addr}");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    drop(sentry_guard);
}

/// Resolves on Ctrl+C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Ctrl+C handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}
