//! Property-Based Tests for Records Module
//!
//! Uses proptest to check view counting, deduplication and key validation.

use proptest::prelude::*;
use serde_json::Map;
use std::sync::Arc;

use crate::records::{is_valid_key, CreateOutcome, RecordRepository};
use crate::store::MemoryStore;

// == Strategies ==
/// Generates hyphenated RFC 4122 UUID strings, versions 1 to 8
fn uuid_strategy() -> impl Strategy<Value = String> {
    "[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[1-8][0-9a-fA-F]{3}-[89abAB][0-9a-fA-F]{3}-[0-9a-fA-F]{12}"
}

/// Generates content hashes
fn hash_strategy() -> impl Strategy<Value = String> {
    "[a-f0-9]{8,40}"
}

fn repository() -> RecordRepository {
    RecordRepository::new(Arc::new(MemoryStore::new()))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Every well-formed versioned UUID string is a valid key
    #[test]
    fn prop_hyphenated_uuids_are_valid(key in uuid_strategy()) {
        prop_assert!(is_valid_key(&key));
    }

    // A variant nibble outside 8..=b is rejected whatever the version
    #[test]
    fn prop_foreign_variant_is_invalid(
        key in "[0-9a-f]{8}-[0-9a-f]{4}-[1-8][0-9a-f]{3}-[0-7c-e][0-9a-f]{3}-[0-9a-f]{12}"
    ) {
        prop_assert!(!is_valid_key(&key));
    }

    // Strings containing a non-hex character never validate
    #[test]
    fn prop_non_hex_is_invalid(key in "[g-z]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}") {
        prop_assert!(!is_valid_key(&key));
    }

    // N increments report 0, 1, ..., N-1 and the stored count ends at N-1
    #[test]
    fn prop_view_count_increments_by_one(key in uuid_strategy(), views in 1usize..30) {
        let repo = repository();

        tokio_test::block_on(async {
            for expected in 0..views {
                let count = repo.increment_view_count(&key).await.unwrap();
                assert_eq!(count, expected as u64);
            }
            assert_eq!(repo.view_count(&key).await.unwrap(), views as u64 - 1);
        });
    }

    // Reads interleaved with increments never change the count
    #[test]
    fn prop_fetch_never_changes_count(key in uuid_strategy(), ops in prop::collection::vec(any::<bool>(), 1..40)) {
        let repo = repository();

        tokio_test::block_on(async {
            repo.create(&key, "hash", Map::new()).await.unwrap();
            let mut last = None;
            for increment in ops {
                if increment {
                    let count = repo.increment_view_count(&key).await.unwrap();
                    if let Some(previous) = last {
                        assert_eq!(count, previous + 1);
                    }
                    last = Some(count);
                } else {
                    let count = repo.fetch(&key).await.unwrap().unwrap().view_count;
                    assert_eq!(count, last.unwrap_or(0));
                }
            }
        });
    }

    // The first creation for a hash wins; later ones report its key
    #[test]
    fn prop_first_creator_owns_hash(
        hash in hash_strategy(),
        keys in prop::collection::hash_set(uuid_strategy(), 2..6),
    ) {
        let repo = repository();
        let keys: Vec<String> = keys.into_iter().collect();

        tokio_test::block_on(async {
            let first = repo.create(&keys[0], &hash, Map::new()).await.unwrap();
            assert_eq!(first, CreateOutcome::Created);

            for key in &keys[1..] {
                let outcome = repo.create(key, &hash, Map::new()).await.unwrap();
                assert_eq!(outcome, CreateOutcome::Duplicate { existing: keys[0].clone() });
                assert!(repo.fetch(key).await.unwrap().is_none());
            }
        });
    }
}
