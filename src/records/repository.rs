//! Record Repository
//!
//! Record lifecycle on top of a [`KvStore`]: creation with content-hash
//! deduplication, lookup, merge-on-update and the per-key view counter.

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::models::RecordMetadata;
use crate::store::{KvStore, StoreError, StoreResult};

// == Field Names ==
pub const FIELD_KEY: &str = "key";
pub const FIELD_CONTENT_HASH: &str = "contentHash";
pub const FIELD_DATE_CREATION: &str = "dateCreation";
pub const FIELD_DATE_MODIFICATION: &str = "dateModification";
pub const FIELD_VIEW_COUNT: &str = "viewCount";

/// Storage key of the record document.
pub fn record_key(key: &str) -> String {
    format!("shareable_url:{}", key)
}

/// Storage key of the view counter.
pub fn views_key(key: &str) -> String {
    format!("views:{}", key)
}

/// Current time as an ISO-8601 UTC timestamp with millisecond precision.
fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

// == Create Outcome ==
/// Result of a creation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// Record and checksum entry were written
    Created,
    /// The content hash is already claimed by `existing`
    Duplicate { existing: String },
}

// == Document ==
/// A stored record together with its current view count.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub record: Map<String, Value>,
    pub view_count: u64,
}

impl Document {
    /// Record fields with `viewCount` attached.
    pub fn into_json(self) -> Value {
        let view_count = self.view_count;
        self.with_view_count(view_count)
    }

    /// Record fields with the given `viewCount` attached.
    pub fn with_view_count(self, view_count: u64) -> Value {
        let mut fields = self.record;
        fields.insert(FIELD_VIEW_COUNT.to_string(), Value::from(view_count));
        Value::Object(fields)
    }

    /// Projection used by the batch metadata endpoint.
    pub fn metadata(&self) -> RecordMetadata {
        let text = |field: &str| {
            self.record
                .get(field)
                .and_then(Value::as_str)
                .map(str::to_string)
        };

        RecordMetadata {
            key: text(FIELD_KEY),
            content_hash: text(FIELD_CONTENT_HASH),
            date_creation: text(FIELD_DATE_CREATION),
            date_modification: text(FIELD_DATE_MODIFICATION),
            view_count: self.view_count,
        }
    }
}

// == Record Repository ==
/// Record operations over an injected key-value store.
#[derive(Clone)]
pub struct RecordRepository {
    store: Arc<dyn KvStore>,
}

impl RecordRepository {
    /// Creates a repository over `store`.
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// Returns the record key owning `content_hash`, if any.
    pub async fn content_owner(&self, content_hash: &str) -> StoreResult<Option<String>> {
        self.store.get(content_hash).await
    }

    // == Create ==
    /// Creates a record unless its content hash is already indexed.
    ///
    /// The checksum entry is claimed with a conditional write before the
    /// record is stored, so on atomic backends only one of two racing
    /// creations with the same hash succeeds.
    pub async fn create(
        &self,
        key: &str,
        content_hash: &str,
        payload: Map<String, Value>,
    ) -> StoreResult<CreateOutcome> {
        if let Some(existing) = self.content_owner(content_hash).await? {
            debug!("Content hash already owned by {}", existing);
            return Ok(CreateOutcome::Duplicate { existing });
        }

        if let Some(existing) = self
            .store
            .put_if_absent(content_hash, key.to_string())
            .await?
        {
            debug!("Lost checksum race to {}", existing);
            return Ok(CreateOutcome::Duplicate { existing });
        }

        let mut record = Map::new();
        record.insert(FIELD_KEY.to_string(), Value::from(key));
        record.extend(payload);
        record.insert(FIELD_CONTENT_HASH.to_string(), Value::from(content_hash));
        record.insert(FIELD_DATE_CREATION.to_string(), Value::from(now_timestamp()));

        self.write_record(key, &record).await?;
        info!("Created shareable url {}", key);
        Ok(CreateOutcome::Created)
    }

    // == Fetch ==
    /// Loads the record for `key` with its current view count.
    ///
    /// Reading never touches the counter.
    pub async fn fetch(&self, key: &str) -> StoreResult<Option<Document>> {
        let Some(record) = self.read_record(key).await? else {
            return Ok(None);
        };
        let view_count = self.view_count(key).await?;
        Ok(Some(Document { record, view_count }))
    }

    // == Update ==
    /// Merges `changes` into the stored record and stamps `dateModification`.
    ///
    /// `key` and `dateCreation` cannot be overwritten and a `viewCount` field
    /// in `changes` is dropped. Returns the written record, or `None` if
    /// there is nothing to update.
    pub async fn update(
        &self,
        key: &str,
        changes: Map<String, Value>,
    ) -> StoreResult<Option<Map<String, Value>>> {
        let Some(mut record) = self.read_record(key).await? else {
            return Ok(None);
        };

        for (field, value) in changes {
            match field.as_str() {
                FIELD_KEY | FIELD_DATE_CREATION | FIELD_VIEW_COUNT => {}
                _ => {
                    record.insert(field, value);
                }
            }
        }
        record.insert(FIELD_KEY.to_string(), Value::from(key));
        record.insert(
            FIELD_DATE_MODIFICATION.to_string(),
            Value::from(now_timestamp()),
        );

        self.write_record(key, &record).await?;
        info!("Updated shareable url {}", key);
        Ok(Some(record))
    }

    // == View Counter ==
    /// Current view count; an absent counter reads as zero.
    pub async fn view_count(&self, key: &str) -> StoreResult<u64> {
        Ok(self.read_counter(key).await?.unwrap_or(0))
    }

    /// Bumps the view counter and returns the stored value.
    ///
    /// An absent counter is initialised to 0, not 1: the first view reports
    /// zero. Read and write are separate store calls, so concurrent views of
    /// the same key may collapse into one increment.
    pub async fn increment_view_count(&self, key: &str) -> StoreResult<u64> {
        let next = match self.read_counter(key).await? {
            Some(current) => current.saturating_add(1),
            None => 0,
        };
        self.store.put(&views_key(key), next.to_string()).await?;
        debug!("View count of {} is now {}", key, next);
        Ok(next)
    }

    // == Helpers ==
    async fn read_record(&self, key: &str) -> StoreResult<Option<Map<String, Value>>> {
        let storage_key = record_key(key);
        let Some(raw) = self.store.get(&storage_key).await? else {
            return Ok(None);
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(record)) => Ok(Some(record)),
            Ok(_) => Err(StoreError::Corrupt {
                key: storage_key,
                reason: "record is not a JSON object".to_string(),
            }),
            Err(e) => Err(StoreError::Corrupt {
                key: storage_key,
                reason: e.to_string(),
            }),
        }
    }

    async fn write_record(&self, key: &str, record: &Map<String, Value>) -> StoreResult<()> {
        let raw = serde_json::to_string(record).map_err(StoreError::backend)?;
        self.store.put(&record_key(key), raw).await
    }

    async fn read_counter(&self, key: &str) -> StoreResult<Option<u64>> {
        let Some(raw) = self.store.get(&views_key(key)).await? else {
            return Ok(None);
        };
        match raw.trim().parse::<u64>() {
            Ok(count) => Ok(Some(count)),
            Err(_) => {
                warn!("Unreadable view counter for {}: {:?}, treating as unset", key, raw);
                Ok(None)
            }
        }
    }
}
