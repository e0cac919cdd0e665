//! Error types for the shareable URL service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;
use crate::store::StoreError;

// == API Error Enum ==
/// Unified error type for request handling.
///
/// The display strings are the exact `error` messages sent to callers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Body is not valid JSON (or not an object where one is required)
    #[error("Provide a valid JSON body.")]
    BadRequestBody,

    /// Record key is not a UUID
    #[error("Provide a valid uuid v4 key.")]
    InvalidKey,

    /// `urlKeys` is not an array of UUIDs
    #[error("Provide an array with valid UUID link keys.")]
    InvalidKeyList,

    /// Content hash already claimed by another record
    #[error("Document exists.")]
    DuplicateContent { existing: String },

    /// No record under the requested key
    #[error("Document not found.")]
    NotFound,

    /// Verb not supported on this path
    #[error("Method not allowed.")]
    MethodNotAllowed,

    /// Storage backend failure
    #[error("Internal error.")]
    Store(#[from] StoreError),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequestBody
            | ApiError::InvalidKey
            | ApiError::InvalidKeyList
            | ApiError::DuplicateContent { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::DuplicateContent { existing } => {
                ErrorResponse::new(self.to_string()).with_existing_document(existing.clone())
            }
            ApiError::Store(err) => {
                error!("Store failure: {}", err);
                ErrorResponse::new(self.to_string())
            }
            _ => ErrorResponse::new(self.to_string()),
        };

        (status, Json(body)).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for request handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
