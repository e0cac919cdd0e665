//! API Handlers
//!
//! HTTP request handlers for the collection, metadata and item endpoints.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use futures::future::try_join_all;
use serde_json::{json, Value};

use super::cors::CorsHeaders;
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::{CreateRequest, CreatedResponse, MetadataRequest, MetadataResponse};
use crate::records::{is_valid_key, parse_key_list, CreateOutcome, Document, RecordRepository};
use crate::store::{KvStore, MemoryStore, PersistentStore, StoreResult};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Record operations over the configured store
    pub records: RecordRepository,
    /// Header set stamped on every response
    pub cors: CorsHeaders,
}

impl AppState {
    /// Creates a new AppState over the given store with default CORS headers.
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self {
            records: RecordRepository::new(store),
            cors: CorsHeaders::default(),
        }
    }

    /// Creates a new AppState backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Replaces the CORS header set.
    pub fn with_cors(mut self, cors: CorsHeaders) -> Self {
        self.cors = cors;
        self
    }

    /// Creates a new AppState from configuration.
    ///
    /// Opens the redb file when `store_path` is set, otherwise keeps data in memory.
    pub fn from_config(config: &Config) -> StoreResult<Self> {
        let store: Arc<dyn KvStore> = match &config.store_path {
            Some(path) => Arc::new(PersistentStore::open(path)?),
            None => Arc::new(MemoryStore::new()),
        };

        Ok(Self::new(store).with_cors(CorsHeaders::new(&config.cors_origin, config.cors_max_age)))
    }
}

fn parse_json(body: &[u8]) -> Result<Value> {
    serde_json::from_slice(body).map_err(|_| ApiError::BadRequestBody)
}

/// Parses a body, yielding `None` for falsy JSON (`null`, `false`, `0`, `""`).
///
/// Falsy bodies are answered with an empty `{}` and never reach the store.
fn parse_body(body: &[u8]) -> Result<Option<Value>> {
    let value = parse_json(body)?;
    let falsy = match &value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    };
    Ok((!falsy).then_some(value))
}

fn empty_object() -> Json<Value> {
    Json(json!({}))
}

/// Handler for POST /
///
/// Creates a record unless its content hash is already indexed.
pub async fn create_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response> {
    let Some(body) = parse_body(&body)? else {
        return Ok(empty_object().into_response());
    };
    let req = CreateRequest::from_body(body);

    let key = match req.key {
        Some(key) if is_valid_key(&key) => key,
        _ => return Err(ApiError::InvalidKey),
    };

    match state
        .records
        .create(&key, &req.content_hash, req.payload)
        .await?
    {
        CreateOutcome::Created => {
            Ok((StatusCode::CREATED, Json(CreatedResponse::new())).into_response())
        }
        CreateOutcome::Duplicate { existing } => Err(ApiError::DuplicateContent { existing }),
    }
}

/// Handler for POST /metadata
///
/// Looks up every requested key concurrently and returns the metadata of
/// those that exist, in request order.
pub async fn metadata_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response> {
    let Some(body) = parse_body(&body)? else {
        return Ok(empty_object().into_response());
    };
    let req = MetadataRequest::from_body(body);
    let keys = parse_key_list(req.url_keys.as_ref()).ok_or(ApiError::InvalidKeyList)?;

    let documents = try_join_all(keys.iter().map(|key| state.records.fetch(key))).await?;
    let url_keys = documents
        .iter()
        .flatten()
        .map(Document::metadata)
        .collect();

    Ok(Json(MetadataResponse::new(url_keys)).into_response())
}

/// Handler for every path other than `/` and `/metadata`.
///
/// The path minus its leading slash is the record key.
pub async fn item_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Result<Response> {
    let key = uri.path().strip_prefix('/').unwrap_or(uri.path());
    let document = state.records.fetch(key).await?;

    if method == Method::OPTIONS {
        return Ok(empty_object().into_response());
    }

    let document = document.ok_or(ApiError::NotFound)?;

    match method {
        Method::GET => {
            let view_count = state.records.increment_view_count(key).await?;
            Ok(Json(document.with_view_count(view_count)).into_response())
        }
        Method::PUT => {
            let changes = match parse_body(&body)? {
                Some(Value::Object(changes)) => changes,
                Some(_) => return Err(ApiError::BadRequestBody),
                None => return Ok(empty_object().into_response()),
            };

            // Re-read so the response reflects the record as it was before this write
            let previous = state.records.fetch(key).await?.ok_or(ApiError::NotFound)?;
            state
                .records
                .update(key, changes)
                .await?
                .ok_or(ApiError::NotFound)?;
            let view_count = state.records.view_count(key).await?;

            Ok((
                StatusCode::ACCEPTED,
                Json(previous.with_view_count(view_count)),
            )
                .into_response())
        }
        _ => Err(ApiError::MethodNotAllowed),
    }
}

/// Handler for preflights and unmatched methods on `/`.
pub async fn empty_handler() -> Json<Value> {
    empty_object()
}

/// Handler for verbs a path does not support.
pub async fn method_not_allowed_handler() -> ApiError {
    ApiError::MethodNotAllowed
}
