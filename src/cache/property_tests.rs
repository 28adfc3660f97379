//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check gating, overwrite and invalidation behavior over
//! arbitrary keys and operation sequences.

use proptest::prelude::*;
use std::collections::HashMap;
use std::time::Duration;

use crate::cache::{CacheContainer, KeyGenerator, RuleSet};

// == Test Configuration ==
const TTL: Duration = Duration::from_secs(300);
const CACHEABLE: [&str; 2] = ["Get", "Find"];
const INVALIDATING: [&str; 2] = ["Delete", "Save"];

fn container() -> CacheContainer<String> {
    CacheContainer::new(RuleSet::new(CACHEABLE, INVALIDATING).unwrap())
}

// == Strategies ==
/// Generates keys that begin with a cacheable prefix
fn cacheable_key_strategy() -> impl Strategy<Value = String> {
    (prop::sample::select(CACHEABLE.to_vec()), "[a-zA-Z0-9_:]{0,32}")
        .prop_map(|(prefix, rest)| format!("{}{}", prefix, rest))
}

/// Generates keys that match no cacheable prefix
fn uncacheable_key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_:]{1,32}".prop_filter("must not be cacheable", |k| {
        !CACHEABLE.iter().any(|p| k.starts_with(p))
    })
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,64}"
}

/// Generates a sequence of cache operations for testing
#[derive(Debug, Clone)]
enum CacheOp {
    Add { key: String, value: String },
    Get { key: String },
    Invalidate { operation: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        4 => (cacheable_key_strategy(), value_strategy())
            .prop_map(|(key, value)| CacheOp::Add { key, value }),
        4 => cacheable_key_strategy().prop_map(|key| CacheOp::Get { key }),
        1 => "(Delete|Save|Update)[A-Za-z]{0,8}".prop_map(|operation| CacheOp::Invalidate { operation }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_default_closed(key in ".{0,64}", value in value_strategy()) {
        let cache: CacheContainer<String> = CacheContainer::new(RuleSet::default());

        prop_assert!(!cache.try_add(&key, Some(value), TTL));
        prop_assert!(cache.is_empty());
    }

    #[test]
    fn prop_uncacheable_keys_rejected(key in uncacheable_key_strategy(), value in value_strategy()) {
        let cache = container();

        prop_assert!(!cache.try_add(&key, Some(value), TTL));
        prop_assert_eq!(cache.try_get(&key), None);
    }

    #[test]
    fn prop_roundtrip_storage(key in cacheable_key_strategy(), value in value_strategy()) {
        let cache = container();

        prop_assert!(cache.try_add(&key, Some(value.clone()), TTL));
        prop_assert_eq!(cache.try_get(&key), Some(value));
    }

    #[test]
    fn prop_overwrite_semantics(
        key in cacheable_key_strategy(),
        value1 in value_strategy(),
        value2 in value_strategy()
    ) {
        let cache = container();

        cache.try_add(&key, Some(value1), TTL);
        cache.try_add(&key, Some(value2.clone()), TTL);

        prop_assert_eq!(cache.try_get(&key), Some(value2));
        prop_assert_eq!(cache.len(), 1, "Should have exactly one entry after overwrite");
        prop_assert_eq!(cache.stats().updates, 1);
    }

    // Replays operations against a plain HashMap model: the container must
    // agree with it after every step.
    #[test]
    fn prop_matches_model(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let cache = container();
        let mut model: HashMap<String, String> = HashMap::new();

        for op in ops {
            match op {
                CacheOp::Add { key, value } => {
                    prop_assert!(cache.try_add(&key, Some(value.clone()), TTL));
                    model.insert(key, value);
                }
                CacheOp::Get { key } => {
                    prop_assert_eq!(cache.try_get(&key), model.get(&key).cloned());
                }
                CacheOp::Invalidate { operation } => {
                    let expected = INVALIDATING.iter().any(|p| operation.starts_with(p));
                    prop_assert_eq!(cache.invalidate_if_needed(&operation), expected);
                    if expected {
                        model.clear();
                    }
                }
            }
            prop_assert_eq!(cache.len(), model.len());
        }
    }

    #[test]
    fn prop_generated_keys_are_gated_by_identity(id in any::<u32>(), name in "[a-z]{1,12}") {
        let gen = KeyGenerator::new();
        let cache = container();

        let get = gen.generate("GetPerson", &(id, &name)).unwrap();
        let delete = gen.generate("DeletePerson", &(id, &name)).unwrap();

        prop_assert_eq!(&get, &gen.generate("GetPerson", &(id, &name)).unwrap());
        prop_assert!(cache.try_add(get.as_str(), Some(name.clone()), TTL));
        prop_assert!(!cache.try_add(delete.as_str(), Some(name), TTL));
    }
}
