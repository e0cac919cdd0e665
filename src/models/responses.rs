//! Response DTOs for the shareable URL API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

/// Response body for a successful creation (POST /)
#[derive(Debug, Clone, Serialize)]
pub struct CreatedResponse {
    /// Always true
    pub created: bool,
}

impl CreatedResponse {
    /// Creates a new CreatedResponse
    pub fn new() -> Self {
        Self { created: true }
    }
}

impl Default for CreatedResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Metadata projection of one record (POST /metadata)
///
/// Only these five fields are exposed; other payload fields are dropped.
/// Missing text fields are omitted from the JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_creation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_modification: Option<String>,
    pub view_count: u64,
}

/// Response body for the batch metadata endpoint (POST /metadata)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataResponse {
    /// Existing records, in request order
    pub url_keys: Vec<RecordMetadata>,
}

impl MetadataResponse {
    /// Creates a new MetadataResponse
    pub fn new(url_keys: Vec<RecordMetadata>) -> Self {
        Self { url_keys }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
    /// Owner of a duplicate content hash
    #[serde(rename = "existing-document", skip_serializing_if = "Option::is_none")]
    pub existing_document: Option<String>,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            existing_document: None,
        }
    }

    /// Attaches the key of the record that already owns the content
    pub fn with_existing_document(mut self, key: impl Into<String>) -> Self {
        self.existing_document = Some(key.into());
        self
    }
}
