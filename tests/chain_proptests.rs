// Property tests for ChainMap and ChainSet against std models.
//
// - Uniqueness: len() equals the number of distinct keys inserted.
// - Round-trip: get(k) returns the last value set for k until k is removed.
// - Resize transparency: lookups answer the same right before and right after a resize.
// - Idempotent remove: removing an absent key returns false and leaves len() alone.
// - Overwrite: setting a present key never changes len().
// - Placement: chain lengths always add up to len().
use chainmap::{ChainMap, ChainSet, KeyError, TableConfig};
use proptest::prelude::*;
use std::collections::{HashMap, HashSet};

// Small alphabet so operations hit the same keys (and the same buckets) often.
fn key() -> impl Strategy<Value = String> {
    "[a-dA-B]{0,4}"
}

#[derive(Debug, Clone)]
enum Op {
    Set(String, i32),
    Remove(String),
    Get(String),
    Clear,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => (key(), any::<i32>()).prop_map(|(k, v)| Op::Set(k, v)),
        3 => key().prop_map(Op::Remove),
        3 => key().prop_map(Op::Get),
        1 => Just(Op::Clear),
    ]
}

fn config() -> impl Strategy<Value = TableConfig> {
    (1usize..=32, prop_oneof![Just(0.5), Just(0.75), Just(1.0)]).prop_filter_map(
        "valid config",
        |(capacity, load_factor)| TableConfig::new(capacity, load_factor).ok(),
    )
}

// Answers of `get` for every lookup key, in order
fn snapshot(
    map: &ChainMap<String, usize>,
    lookups: &[String],
) -> Result<Vec<Option<usize>>, KeyError> {
    lookups.iter().map(|lookup| Ok(map.get(lookup.as_str())?.copied())).collect()
}

proptest! {
    #[test]
    fn prop_map_matches_model(
        config in config(),
        ops in proptest::collection::vec(op(), 1..200),
    ) {
        let mut map = ChainMap::with_config(config);
        let mut model: HashMap<String, i32> = HashMap::new();

        for op in ops {
            match op {
                Op::Set(k, v) => {
                    let before = map.len();
                    let existed = model.contains_key(&k);
                    let previous = map.set(k.clone(), v)?;
                    prop_assert_eq!(previous, model.insert(k, v));
                    if existed {
                        prop_assert_eq!(map.len(), before);
                    }
                    prop_assert!(map.current_load() < map.load_factor());
                }
                Op::Remove(k) => {
                    let before = map.len();
                    let removed = map.remove(k.as_str())?;
                    prop_assert_eq!(removed, model.remove(&k).is_some());
                    if !removed {
                        prop_assert_eq!(map.len(), before);
                    }
                }
                Op::Get(k) => {
                    prop_assert_eq!(map.get(k.as_str())?, model.get(&k));
                    prop_assert_eq!(map.has(k.as_str())?, model.contains_key(&k));
                }
                Op::Clear => {
                    let capacity = map.capacity();
                    map.clear();
                    model.clear();
                    prop_assert_eq!(map.capacity(), capacity);
                }
            }

            prop_assert_eq!(map.len(), model.len());
            prop_assert_eq!(map.chain_lengths().sum::<usize>(), model.len());
        }

        let mut entries: Vec<(String, i32)> =
            map.entries().map(|(k, v)| (k.clone(), *v)).collect();
        entries.sort();
        let mut expected: Vec<(String, i32)> = model.into_iter().collect();
        expected.sort();
        prop_assert_eq!(entries, expected);
    }

    #[test]
    fn prop_resize_is_transparent(keys in proptest::collection::vec("[a-z]{1,8}", 1..100)) {
        let mut map = ChainMap::with_config(TableConfig::new(1, 0.75)?);
        let mut resizes = 0;

        for (i, key) in keys.iter().enumerate() {
            let capacity = map.capacity();
            let before = snapshot(&map, &keys)?;
            map.set(key.clone(), i)?;
            let after = snapshot(&map, &keys)?;

            if map.capacity() != capacity {
                resizes += 1;
                prop_assert_eq!(map.capacity(), capacity * 2);
            }
            for ((lookup, old), new) in keys.iter().zip(before).zip(after) {
                if lookup == key {
                    prop_assert_eq!(new, Some(i));
                } else {
                    prop_assert_eq!(old, new);
                }
            }
        }

        prop_assert!(resizes > 0);
    }

    #[test]
    fn prop_set_matches_model(
        keys in proptest::collection::vec(key(), 0..150),
        removals in proptest::collection::vec(key(), 0..50),
    ) {
        let mut set = ChainSet::new();
        let mut model = HashSet::new();

        for k in keys {
            prop_assert_eq!(set.add(k.clone())?, model.insert(k));
        }
        prop_assert_eq!(set.len(), model.len());

        for k in removals {
            prop_assert_eq!(set.remove(k.as_str())?, model.remove(&k));
            prop_assert!(!set.contains_key(k.as_str())?);
        }

        prop_assert_eq!(set.len(), model.len());
        let mut keys: Vec<&String> = set.keys().collect();
        keys.sort();
        let mut expected: Vec<&String> = model.iter().collect();
        expected.sort();
        prop_assert_eq!(keys, expected);
    }
}
