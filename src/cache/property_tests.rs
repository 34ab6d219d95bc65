//! Property-Based Tests for the Cache Module
//!
//! Uses proptest to check the store invariants over arbitrary operation
//! sequences.

use axum::body::Bytes;
use proptest::prelude::*;

use crate::cache::{CacheStore, CachedPayload};
use crate::config::StoreConfig;

// == Test Configuration ==
const TEST_TTL: u64 = 300;

fn test_store(max_entries: usize) -> CacheStore {
    CacheStore::new(&StoreConfig {
        name: "prop-test",
        ttl_seconds: TEST_TTL,
        sweep_interval_seconds: 60,
        max_entries,
    })
}

fn payload(text: &str) -> CachedPayload {
    CachedPayload {
        body: Bytes::from(text.to_string()),
        content_type: None,
    }
}

// == Strategies ==
/// Keys drawn from a small alphabet so sequences revisit the same key
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-d][0-9]".prop_map(|s| s)
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,64}".prop_map(|s| s)
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: String },
    Get { key: String },
    Delete { key: String },
    Flush,
    Sweep,
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        4 => (key_strategy(), value_strategy())
            .prop_map(|(key, value)| CacheOp::Set { key, value }),
        4 => key_strategy().prop_map(|key| CacheOp::Get { key }),
        1 => key_strategy().prop_map(|key| CacheOp::Delete { key }),
        1 => Just(CacheOp::Flush),
        1 => Just(CacheOp::Sweep),
    ]
}

fn apply(store: &mut CacheStore, op: &CacheOp) {
    match op {
        CacheOp::Set { key, value } => store.set(key.clone(), payload(value)),
        CacheOp::Get { key } => {
            store.get(key);
        }
        CacheOp::Delete { key } => {
            store.delete(key);
        }
        CacheOp::Flush => {
            store.flush();
        }
        CacheOp::Sweep => {
            store.sweep();
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // The entry count never exceeds the configured cap, no matter what
    // sequence of operations runs.
    #[test]
    fn prop_capacity_bound_always_holds(
        max_entries in 0usize..8,
        ops in prop::collection::vec(cache_op_strategy(), 1..60),
    ) {
        let mut store = test_store(max_entries);

        for op in &ops {
            apply(&mut store, op);
            prop_assert!(
                store.len() <= max_entries,
                "len {} exceeded cap {}", store.len(), max_entries
            );
        }
    }

    // Reject-new admission: filling the store and then offering a new key
    // leaves every existing entry intact and the new key absent.
    #[test]
    fn prop_reject_new_preserves_existing(extra in "[e-h][0-9]") {
        let mut store = test_store(3);

        store.set("a1".to_string(), payload("v1"));
        store.set("b1".to_string(), payload("v2"));
        store.set("c1".to_string(), payload("v3"));
        store.set(extra.clone(), payload("overflow"));

        prop_assert_eq!(store.len(), 3);
        prop_assert!(store.get(&extra).is_none());
        prop_assert_eq!(&store.get("a1").unwrap().body[..], b"v1");
        prop_assert_eq!(&store.get("b1").unwrap().body[..], b"v2");
        prop_assert_eq!(&store.get("c1").unwrap().body[..], b"v3");
    }

    // Overwrite is idempotent on the entry count and last-write-wins on
    // the value.
    #[test]
    fn prop_overwrite_last_write_wins(
        key in key_strategy(),
        v1 in value_strategy(),
        v2 in value_strategy(),
    ) {
        let mut store = test_store(10);

        store.set(key.clone(), payload(&v1));
        store.set(key.clone(), payload(&v2));

        prop_assert_eq!(store.len(), 1);
        prop_assert_eq!(&store.get(&key).unwrap().body[..], v2.as_bytes());
    }

    // Round trip: a stored value reads back unchanged within its TTL.
    #[test]
    fn prop_roundtrip_storage(key in key_strategy(), value in value_strategy()) {
        let mut store = test_store(10);

        store.set(key.clone(), payload(&value));

        let retrieved = store.get(&key).unwrap();
        prop_assert_eq!(&retrieved.body[..], value.as_bytes());
    }

    // After a flush every previously set key reads as absent.
    #[test]
    fn prop_flush_completeness(keys in prop::collection::hash_set(key_strategy(), 1..8)) {
        let mut store = test_store(100);

        for key in &keys {
            store.set(key.clone(), payload("v"));
        }

        store.flush();

        prop_assert!(store.is_empty());
        for key in &keys {
            prop_assert!(store.get(key).is_none());
        }
    }

    // Hit and miss counters exactly track get() outcomes.
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..50)) {
        let mut store = test_store(100);
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;

        for op in &ops {
            if let CacheOp::Get { key } = op {
                match store.get(key) {
                    Some(_) => expected_hits += 1,
                    None => expected_misses += 1,
                }
            } else {
                apply(&mut store, op);
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, expected_hits, "Hits mismatch");
        prop_assert_eq!(stats.misses, expected_misses, "Misses mismatch");
        prop_assert_eq!(stats.key_count, store.len(), "Key count mismatch");
    }
}
