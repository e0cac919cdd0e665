//! Records Module
//!
//! Shareable URL records, their checksum index and view counters.

mod repository;
pub mod validation;

#[cfg(test)]
mod property_tests;

pub use repository::{
    record_key, views_key, CreateOutcome, Document, RecordRepository, FIELD_CONTENT_HASH,
    FIELD_DATE_CREATION, FIELD_DATE_MODIFICATION, FIELD_KEY, FIELD_VIEW_COUNT,
};
pub use validation::{is_valid_key, parse_key_list};
