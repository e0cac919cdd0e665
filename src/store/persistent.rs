//! Persistent Store
//!
//! redb-backed store keeping every key in one `&str -> &str` table.
//! redb is synchronous, so each call runs on the blocking thread pool.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};

use super::{KvStore, StoreError, StoreResult};

/// Single table holding records, checksum entries and view counters.
///
/// Key prefixes keep the three kinds apart:
/// - `shareable_url:<key>` -> record JSON
/// - `views:<key>` -> decimal view count
/// - `<contentHash>` -> owning record key
const TABLE_ENTRIES: TableDefinition<&str, &str> = TableDefinition::new("entries_v1");

// == Persistent Store ==
/// Durable key-value store on top of an embedded redb database.
#[derive(Clone)]
pub struct PersistentStore {
    db: Arc<Database>,
}

impl PersistentStore {
    /// Opens (or creates) the database at `path` and makes sure the table exists.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let db = Database::create(path.as_ref()).map_err(StoreError::backend)?;

        let write_txn = db.begin_write().map_err(StoreError::backend)?;
        write_txn
            .open_table(TABLE_ENTRIES)
            .map_err(StoreError::backend)?;
        write_txn.commit().map_err(StoreError::backend)?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Runs a blocking closure against the database off the async runtime.
    async fn blocking<T, F>(&self, f: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Database) -> StoreResult<T> + Send + 'static,
    {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || f(&db))
            .await
            .map_err(StoreError::backend)?
    }
}

#[async_trait]
impl KvStore for PersistentStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let key = key.to_string();
        self.blocking(move |db| {
            let read_txn = db.begin_read().map_err(StoreError::backend)?;
            let table = read_txn
                .open_table(TABLE_ENTRIES)
                .map_err(StoreError::backend)?;
            let value = table
                .get(key.as_str())
                .map_err(StoreError::backend)?
                .map(|guard| guard.value().to_string());
            Ok(value)
        })
        .await
    }

    async fn put(&self, key: &str, value: String) -> StoreResult<()> {
        let key = key.to_string();
        self.blocking(move |db| {
            let write_txn = db.begin_write().map_err(StoreError::backend)?;
            {
                let mut table = write_txn
                    .open_table(TABLE_ENTRIES)
                    .map_err(StoreError::backend)?;
                table
                    .insert(key.as_str(), value.as_str())
                    .map_err(StoreError::backend)?;
            }
            write_txn.commit().map_err(StoreError::backend)
        })
        .await
    }

    async fn put_if_absent(&self, key: &str, value: String) -> StoreResult<Option<String>> {
        let key = key.to_string();
        self.blocking(move |db| {
            // redb allows one writer at a time, so the check and insert are atomic
            let write_txn = db.begin_write().map_err(StoreError::backend)?;
            let existing = {
                let mut table = write_txn
                    .open_table(TABLE_ENTRIES)
                    .map_err(StoreError::backend)?;
                let existing = table
                    .get(key.as_str())
                    .map_err(StoreError::backend)?
                    .map(|guard| guard.value().to_string());
                if existing.is_none() {
                    table
                        .insert(key.as_str(), value.as_str())
                        .map_err(StoreError::backend)?;
                }
                existing
            };

            if existing.is_some() {
                write_txn.abort().map_err(StoreError::backend)?;
            } else {
                write_txn.commit().map_err(StoreError::backend)?;
            }
            Ok(existing)
        })
        .await
    }
}
