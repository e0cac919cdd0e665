//! API Module
//!
//! HTTP handlers and routing for the shareable URL REST API.
//!
//! # Endpoints
//! - `POST /` - Create a record
//! - `POST /metadata` - Batch metadata lookup
//! - `GET /:key` - Read a record and count the view
//! - `PUT /:key` - Merge fields into a record

pub mod cors;
pub mod handlers;
pub mod routes;

pub use cors::CorsHeaders;
pub use handlers::*;
pub use routes::create_router;
