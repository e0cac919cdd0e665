//! Shareable URLs - A small HTTP service for shareable URL records
//!
//! Creates, reads and updates records in a key-value store, deduplicating by
//! content hash and counting views per record.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod records;
pub mod store;

pub use api::{create_router, AppState};
pub use config::Config;
pub use error::ApiError;
pub use store::{KvStore, MemoryStore, PersistentStore};
