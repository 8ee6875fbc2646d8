//! Application state shared across handlers.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};

use crate::config::SiteConfig;
use crate::storage::KeyValueStorage;
use crate::store::ResponseStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the configuration and the response store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SiteConfig,
    store: ResponseStore,
}

impl AppState {
    /// Create a new application state over the given storage backend.
    #[must_use]
    pub fn new(config: SiteConfig, storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store: ResponseStore::new(storage),
            }),
        }
    }

    /// Get a reference to the site configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.inner.config
    }

    /// Get a reference to the contact response store.
    #[must_use]
    pub fn store(&self) -> &ResponseStore {
        &self.inner.store
    }

    /// Current time in the site's configured offset.
    #[must_use]
    pub fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.inner.config.utc_offset)
    }
}
