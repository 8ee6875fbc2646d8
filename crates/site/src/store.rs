//! Persisted contact form responses.
//!
//! [`ResponseStore`] is the only reader and writer of the response
//! collection. Listing never fails: a missing, unreadable or corrupt
//! collection is shown as empty. A corrupt collection is also replaced by
//! the next append so a bad value can never block new submissions. An
//! unreadable one is not: `append` refuses to overwrite what it could not
//! read. Writes report failure so the visitor can be told their message was
//! not saved.
//!
//! # Concurrency
//!
//! Read-modify-write cycles are serialized within one process. Two
//! processes sharing a data directory (for example the site and the CLI)
//! are not coordinated and may lose updates.

use std::sync::{Arc, Mutex, PoisonError};

use mathsoc_core::{CodecError, ResponseRecord, deserialize_collection, serialize_collection};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::storage::{KeyValueStorage, StorageError};

/// Storage key holding the JSON array of responses.
pub const RESPONSES_KEY: &str = "mathsoc_contact_responses";

/// Errors returned by [`ResponseStore`] writes.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The existing collection could not be read before a write.
    #[error("failed to read responses: {0}")]
    ReadFailed(#[source] StorageError),

    /// The backend did not persist the change.
    #[error("failed to write responses: {0}")]
    WriteFailed(#[from] StorageError),

    /// The collection could not be encoded.
    #[error(transparent)]
    Encode(#[from] CodecError),
}

/// Append-only store of contact form responses.
pub struct ResponseStore {
    storage: Arc<dyn KeyValueStorage>,
    write_lock: Mutex<()>,
}

impl std::fmt::Debug for ResponseStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseStore")
            .field("key", &RESPONSES_KEY)
            .finish_non_exhaustive()
    }
}

impl ResponseStore {
    /// Create a store over `storage`.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            storage,
            write_lock: Mutex::new(()),
        }
    }

    /// Append `record` to the end of the collection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ReadFailed`] if the existing collection cannot
    /// be read, and [`StoreError::WriteFailed`] if the backend rejects the
    /// write (quota, I/O). Either way the stored collection is left as it was.
    #[instrument(skip(self, record), fields(id = %record.id()))]
    pub fn append(&self, record: ResponseRecord) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut records = self.load().map_err(StoreError::ReadFailed)?;
        records.push(record);

        let text = serialize_collection(&records)?;
        self.storage.set(RESPONSES_KEY, &text)?;

        debug!(count = records.len(), "Appended response");
        Ok(())
    }

    /// All responses, most recent first.
    ///
    /// Records with equal timestamps keep their insertion order.
    #[must_use]
    pub fn list_by_recency(&self) -> Vec<ResponseRecord> {
        let mut records = self.read();
        records.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
        records
    }

    /// Look up a stored response by id.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<ResponseRecord> {
        self.read().into_iter().find(|record| record.id().as_str() == id)
    }

    /// Delete every stored response. Clearing an empty store is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::WriteFailed`] if an existing collection could
    /// not be removed.
    #[instrument(skip(self))]
    pub fn clear_all(&self) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.storage.remove(RESPONSES_KEY)?;
        Ok(())
    }

    /// Number of stored responses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether no responses are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lenient read for display: backend failures show as an empty list.
    fn read(&self) -> Vec<ResponseRecord> {
        self.load().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to read responses, treating as empty");
            Vec::new()
        })
    }

    /// Read the collection, failing only if the backend cannot be read.
    /// Corrupt data reads as empty.
    fn load(&self) -> Result<Vec<ResponseRecord>, StorageError> {
        let Some(text) = self.storage.get(RESPONSES_KEY)? else {
            return Ok(Vec::new());
        };

        Ok(deserialize_collection(&text).unwrap_or_else(|e| {
            warn!(error = %e, "Stored responses are corrupt, treating as empty");
            Vec::new()
        }))
    }
}
