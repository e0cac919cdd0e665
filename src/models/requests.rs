//! Request DTOs for the shareable URL API
//!
//! Request bodies are free-form JSON objects, so they are split apart by
//! hand instead of through a derived `Deserialize`.

use serde_json::{Map, Value};

use crate::records::{FIELD_CONTENT_HASH, FIELD_KEY};

/// Request body for record creation (POST /)
///
/// # Fields
/// - `key`: the record key, if it was given as a string
/// - `content_hash`: content fingerprint, empty when missing
/// - `payload`: every other field
#[derive(Debug, Clone, PartialEq)]
pub struct CreateRequest {
    pub key: Option<String>,
    pub content_hash: String,
    pub payload: Map<String, Value>,
}

impl CreateRequest {
    /// Splits a parsed body into key, content hash and payload.
    ///
    /// A body that is not an object yields no key and an empty payload.
    pub fn from_body(body: Value) -> Self {
        let mut payload = match body {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        let key = match payload.remove(FIELD_KEY) {
            Some(Value::String(key)) => Some(key),
            _ => None,
        };

        let content_hash = match payload.remove(FIELD_CONTENT_HASH) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(hash)) => hash,
            Some(other) => other.to_string(),
        };

        Self {
            key,
            content_hash,
            payload,
        }
    }
}

/// Request body for the batch metadata endpoint (POST /metadata)
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataRequest {
    /// Raw `urlKeys` value, validated by the handler
    pub url_keys: Option<Value>,
}

impl MetadataRequest {
    /// Pulls `urlKeys` out of a parsed body.
    pub fn from_body(mut body: Value) -> Self {
        let url_keys = body.as_object_mut().and_then(|map| map.remove("urlKeys"));
        Self { url_keys }
    }
}
