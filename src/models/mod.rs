//! Request and Response models for the shareable URL API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{CreateRequest, MetadataRequest};
pub use responses::{CreatedResponse, ErrorResponse, MetadataResponse, RecordMetadata};
