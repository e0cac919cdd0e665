//! Store Module
//!
//! Key-value storage backends behind a single async interface.
//!
//! Values are UTF-8 strings. Records are stored as serialized JSON, view
//! counters as decimal strings.

mod memory;
mod persistent;

use async_trait::async_trait;
use thiserror::Error;

pub use memory::MemoryStore;
pub use persistent::PersistentStore;

// == Store Error ==
/// Failure raised by a storage backend.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backend itself failed (I/O, transaction, task join)
    #[error("Storage backend error: {0}")]
    Backend(String),

    /// A stored value could not be decoded
    #[error("Corrupt value under '{key}': {reason}")]
    Corrupt { key: String, reason: String },
}

impl StoreError {
    /// Wraps any displayable backend failure.
    pub fn backend(err: impl std::fmt::Display) -> Self {
        StoreError::Backend(err.to_string())
    }
}

/// Convenience Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

// == Key-Value Store Trait ==
/// Async string key-value store.
///
/// Implementations must give read-your-writes consistency for a single key.
/// Nothing is promised across keys.
#[async_trait]
pub trait KvStore: Send + Sync + 'static {
    /// Returns the value stored under `key`, or `None` if absent.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn put(&self, key: &str, value: String) -> StoreResult<()>;

    /// Stores `value` under `key` only if the key is free.
    ///
    /// Returns `Some(existing)` without writing when the key is taken.
    /// The default implementation is a plain get followed by a put and is not
    /// atomic; backends that can do better override it.
    async fn put_if_absent(&self, key: &str, value: String) -> StoreResult<Option<String>> {
        if let Some(existing) = self.get(key).await? {
            return Ok(Some(existing));
        }
        self.put(key, value).await?;
        Ok(None)
    }
}
