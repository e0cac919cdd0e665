//! Identifier validation.

use serde_json::Value;
use uuid::{Uuid, Variant};

/// Length of the hyphenated UUID text form.
const HYPHENATED_LEN: usize = 36;

/// Returns true if `key` is a hyphenated RFC 4122 UUID.
///
/// Versions 1 to 8 with the RFC 4122 variant are accepted, as are the nil and
/// max UUIDs. Braced, URN and un-hyphenated forms are rejected.
pub fn is_valid_key(key: &str) -> bool {
    if key.len() != HYPHENATED_LEN {
        return false;
    }
    let Ok(uuid) = Uuid::try_parse(key) else {
        return false;
    };

    let is_max = uuid.as_bytes().iter().all(|b| *b == 0xff);
    uuid.is_nil()
        || is_max
        || (uuid.get_variant() == Variant::RFC4122
            && (1..=8).contains(&uuid.get_version_num()))
}

/// Extracts a list of record keys from a JSON value.
///
/// Returns `None` unless `value` is an array whose every element is a
/// string passing [`is_valid_key`]. An empty array is valid.
pub fn parse_key_list(value: Option<&Value>) -> Option<Vec<String>> {
    let items = value?.as_array()?;
    items
        .iter()
        .map(|item| {
            item.as_str()
                .filter(|key| is_valid_key(key))
                .map(str::to_string)
        })
        .collect()
}
