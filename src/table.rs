//! Separate-chaining table shared by [`ChainMap`](crate::ChainMap) and
//! [`ChainSet`](crate::ChainSet)

use crate::{
    ChainKey, KeyError, TableConfig,
    hash::{bucket_index, polynomial_hash},
};
use std::{borrow::Borrow, iter::FusedIterator, mem, num::NonZeroUsize, slice};
use tracing::{debug, trace};

/// Capacity multiplier applied on every resize
const GROWTH_FACTOR: NonZeroUsize = NonZeroUsize::MIN.saturating_add(1);

/// A key-value pair stored in a chain
#[derive(Debug, Clone)]
struct Entry<K, V> {
    /// The key, never mutated after insertion
    key: K,
    /// The value associated with the key
    value: V,
    /// Polynomial hash of `key`, cached so a rehash only recomputes the modulo
    hash: u32,
}

/// Entries whose hash maps onto the same bucket, in insertion order
type Chain<K, V> = Vec<Entry<K, V>>;

/// Hash table with separate chaining.
///
/// Capacity only ever doubles. The growth check runs at the start of every insert call,
/// before the key is looked up, so overwriting an existing key close to the threshold can
/// grow the table as well.
#[derive(Debug, Clone)]
pub(crate) struct ChainTable<K, V> {
    /// One chain per bucket; its length always equals `capacity`
    buckets: Vec<Chain<K, V>>,
    /// Current number of buckets
    capacity: NonZeroUsize,
    /// Number of entries summed across all chains
    size: usize,
    /// Growth threshold for `size / capacity`
    load_factor: f64,
}

/// Allocates `capacity` empty chains
fn empty_buckets<K, V>(capacity: NonZeroUsize) -> Vec<Chain<K, V>> {
    let mut buckets = Vec::with_capacity(capacity.get());
    buckets.resize_with(capacity.get(), Vec::new);
    buckets
}

impl<K, V> ChainTable<K, V> {
    /// Creates an empty table
    pub(crate) fn new(config: TableConfig) -> Self {
        Self {
            buckets: empty_buckets(config.capacity()),
            capacity: config.capacity(),
            size: 0,
            load_factor: config.load_factor(),
        }
    }

    /// Number of stored entries
    pub(crate) fn len(&self) -> usize {
        self.size
    }

    /// Whether the table holds no entries
    pub(crate) fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of buckets
    pub(crate) fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Configured growth threshold
    pub(crate) fn load_factor(&self) -> f64 {
        self.load_factor
    }

    /// Actual ratio of entries to buckets
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub(crate) fn current_load(&self) -> f64 {
        self.size as f64 / self.capacity.get() as f64
    }

    /// Length of every chain, in bucket order
    pub(crate) fn chain_lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.buckets.iter().map(Vec::len)
    }

    /// Length of the longest chain
    pub(crate) fn longest_chain(&self) -> usize {
        self.chain_lengths().max().unwrap_or(0)
    }

    /// Chain the hash resolves to under the current capacity
    fn chain(&self, hash: u32) -> &[Entry<K, V>] {
        self.buckets.get(bucket_index(hash, self.capacity)).map(Vec::as_slice).unwrap_or_default()
    }

    /// Mutable chain the hash resolves to under the current capacity
    fn chain_mut(&mut self, hash: u32) -> Option<&mut Chain<K, V>> {
        self.buckets.get_mut(bucket_index(hash, self.capacity))
    }

    /// Whether one more entry in `capacity` buckets would reach the load factor
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    fn reaches_load_factor(&self, capacity: NonZeroUsize) -> bool {
        self.size.saturating_add(1) as f64 / capacity.get() as f64 >= self.load_factor
    }

    /// Doubles the capacity until one more entry stays below the load factor.
    ///
    /// A single doubling is enough unless the table is tiny and the load factor low
    /// (1 bucket at 0.5 needs 4 buckets for the first entry).
    fn grow_if_needed(&mut self) {
        let mut capacity = self.capacity;
        while self.reaches_load_factor(capacity) {
            let doubled = capacity.saturating_mul(GROWTH_FACTOR);
            if doubled == capacity {
                break;
            }
            capacity = doubled;
        }

        if capacity != self.capacity {
            self.rehash(capacity);
        }
    }

    /// Moves every entry into its chain under `capacity`.
    ///
    /// Entries are visited in bucket order then chain order, so entries that shared a chain
    /// and land together again keep their relative order. The old bucket array is dropped
    /// before returning.
    fn rehash(&mut self, capacity: NonZeroUsize) {
        let old_capacity = mem::replace(&mut self.capacity, capacity);
        let old_buckets = mem::replace(&mut self.buckets, empty_buckets(capacity));

        for entry in old_buckets.into_iter().flatten() {
            if let Some(chain) = self.chain_mut(entry.hash) {
                chain.push(entry);
            }
        }

        debug!(
            old_capacity = old_capacity.get(),
            new_capacity = capacity.get(),
            entries = self.size,
            "rehashed chain table"
        );
    }

    /// Drops every entry, keeping the current capacity
    pub(crate) fn clear(&mut self) {
        self.buckets = empty_buckets(self.capacity);
        self.size = 0;
        trace!(capacity = self.capacity.get(), "cleared chain table");
    }

    /// Iterates over entries in bucket order then chain order
    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        Iter { buckets: self.buckets.iter(), chain: slice::Iter::default(), remaining: self.size }
    }
}

impl<K: ChainKey, V> ChainTable<K, V> {
    /// Inserts a pair, returning the previous value when the key was already present
    pub(crate) fn insert(&mut self, key: K, value: V) -> Result<Option<V>, KeyError> {
        let hash = polynomial_hash(&key)?;

        self.grow_if_needed();

        let Some(chain) = self.chain_mut(hash) else {
            return Ok(None);
        };
        if let Some(entry) = chain.iter_mut().find(|entry| entry.hash == hash && entry.key == key)
        {
            return Ok(Some(mem::replace(&mut entry.value, value)));
        }

        chain.push(Entry { key, value, hash });
        self.size = self.size.saturating_add(1);
        Ok(None)
    }

    /// Retrieves the value stored under `key`
    pub(crate) fn get<Q>(&self, key: &Q) -> Result<Option<&V>, KeyError>
    where
        K: Borrow<Q>,
        Q: ChainKey + ?Sized,
    {
        let hash = polynomial_hash(key)?;
        Ok(self
            .chain(hash)
            .iter()
            .find(|entry| entry.hash == hash && entry.key.borrow() == key)
            .map(|entry| &entry.value))
    }

    /// Retrieves a mutable reference to the value stored under `key`
    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Result<Option<&mut V>, KeyError>
    where
        K: Borrow<Q>,
        Q: ChainKey + ?Sized,
    {
        let hash = polynomial_hash(key)?;
        Ok(self
            .chain_mut(hash)
            .and_then(|chain| {
                chain.iter_mut().find(|entry| entry.hash == hash && entry.key.borrow() == key)
            })
            .map(|entry| &mut entry.value))
    }

    /// Whether `key` is stored
    pub(crate) fn contains_key<Q>(&self, key: &Q) -> Result<bool, KeyError>
    where
        K: Borrow<Q>,
        Q: ChainKey + ?Sized,
    {
        Ok(self.get(key)?.is_some())
    }

    /// Unlinks the entry stored under `key`; the rest of its chain keeps its order
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Result<Option<V>, KeyError>
    where
        K: Borrow<Q>,
        Q: ChainKey + ?Sized,
    {
        let hash = polynomial_hash(key)?;
        let Some(chain) = self.chain_mut(hash) else {
            return Ok(None);
        };
        let Some(position) =
            chain.iter().position(|entry| entry.hash == hash && entry.key.borrow() == key)
        else {
            return Ok(None);
        };

        let entry = chain.remove(position);
        self.size = self.size.saturating_sub(1);
        Ok(Some(entry.value))
    }
}

/// Iterator over the entries of a chained container
#[derive(Debug, Clone)]
pub struct Iter<'a, K, V> {
    /// Buckets not visited yet
    buckets: slice::Iter<'a, Chain<K, V>>,
    /// Rest of the chain being visited
    chain: slice::Iter<'a, Entry<K, V>>,
    /// Entries left to yield
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.chain.next() {
                self.remaining = self.remaining.saturating_sub(1);
                return Some((&entry.key, &entry.value));
            }
            self.chain = self.buckets.next()?.iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConfigError;

    fn table(capacity: usize, load_factor: f64) -> Result<ChainTable<String, i32>, ConfigError> {
        Ok(ChainTable::new(TableConfig::new(capacity, load_factor)?))
    }

    /// Asserts every entry sits in the chain its hash resolves to
    fn assert_placement(table: &ChainTable<String, i32>) {
        for (index, chain) in table.buckets.iter().enumerate() {
            for entry in chain {
                assert_eq!(bucket_index(entry.hash, table.capacity), index);
            }
        }
        assert_eq!(table.buckets.len(), table.capacity());
        assert_eq!(table.chain_lengths().sum::<usize>(), table.len());
    }

    #[test]
    fn test_insert_and_get() -> Result<(), Box<dyn std::error::Error>> {
        let mut table = table(16, 0.75)?;
        assert_eq!(table.insert("key1".to_string(), 1)?, None);
        assert_eq!(table.insert("key2".to_string(), 2)?, None);

        assert_eq!(table.get("key1")?, Some(&1));
        assert_eq!(table.get("key2")?, Some(&2));
        assert_eq!(table.get("key3")?, None);
        assert!(table.contains_key("key1")?);
        assert!(!table.contains_key("key3")?);
        Ok(())
    }

    #[test]
    fn test_update_keeps_size() -> Result<(), Box<dyn std::error::Error>> {
        let mut table = table(16, 0.75)?;
        assert_eq!(table.insert("a".to_string(), 1)?, None);
        assert_eq!(table.insert("a".to_string(), 2)?, Some(1));
        assert_eq!(table.get("a")?, Some(&2));
        assert_eq!(table.len(), 1);
        Ok(())
    }

    #[test]
    fn test_get_mut() -> Result<(), Box<dyn std::error::Error>> {
        let mut table = table(16, 0.75)?;
        table.insert("key1".to_string(), 1)?;

        if let Some(value) = table.get_mut("key1")? {
            *value += 10;
        }

        assert_eq!(table.get("key1")?, Some(&11));
        assert_eq!(table.get_mut("missing")?, None);
        Ok(())
    }

    #[test]
    fn test_collisions_share_a_chain() -> Result<(), Box<dyn std::error::Error>> {
        let mut table = table(16, 0.75)?;
        for (value, key) in ["AaAa", "BBBB", "AaBB", "BBAa"].into_iter().enumerate() {
            table.insert(key.to_string(), i32::try_from(value)?)?;
        }

        assert_eq!(table.longest_chain(), 4);
        assert_eq!(table.get("AaBB")?, Some(&2));

        assert_eq!(table.remove("BBBB")?, Some(1));
        let order: Vec<&str> = table.iter().map(|(key, _)| key.as_str()).collect();
        assert_eq!(order, ["AaAa", "AaBB", "BBAa"]);
        assert_eq!(table.len(), 3);
        assert_placement(&table);
        Ok(())
    }

    #[test]
    fn test_rehash_keeps_chain_order() -> Result<(), Box<dyn std::error::Error>> {
        let mut table = table(2, 1.0)?;
        let keys = ["AaAa", "BBBB", "AaBB", "BBAa"];
        for (value, key) in keys.into_iter().enumerate() {
            table.insert(key.to_string(), i32::try_from(value)?)?;
        }

        assert!(table.capacity() > 2);
        assert_eq!(table.longest_chain(), 4);
        let order: Vec<&str> = table.iter().map(|(key, _)| key.as_str()).collect();
        assert_eq!(order, keys);
        assert_placement(&table);
        Ok(())
    }

    #[test]
    fn test_remove_absent_is_noop() -> Result<(), Box<dyn std::error::Error>> {
        let mut table = table(16, 0.75)?;
        table.insert("key1".to_string(), 1)?;

        assert_eq!(table.remove("nope")?, None);
        assert_eq!(table.len(), 1);
        assert_eq!(table.remove("key1")?, Some(1));
        assert_eq!(table.remove("key1")?, None);
        assert!(table.is_empty());
        Ok(())
    }

    #[test]
    fn test_twelfth_insert_doubles_capacity() -> Result<(), Box<dyn std::error::Error>> {
        let mut table = table(16, 0.75)?;
        for i in 0..11 {
            table.insert(format!("key-{i}"), i)?;
        }
        assert_eq!(table.capacity(), 16);

        table.insert("key-11".to_string(), 11)?;
        assert_eq!(table.capacity(), 32);
        assert!(table.current_load() < table.load_factor());

        for i in 0..12 {
            assert_eq!(table.get(&format!("key-{i}"))?, Some(&i));
        }
        assert_placement(&table);
        Ok(())
    }

    #[test]
    fn test_growth_check_runs_on_overwrite() -> Result<(), Box<dyn std::error::Error>> {
        let mut table = table(16, 0.75)?;
        for i in 0..11 {
            table.insert(format!("key-{i}"), i)?;
        }
        assert_eq!(table.capacity(), 16);

        assert_eq!(table.insert("key-0".to_string(), 100)?, Some(0));
        assert_eq!(table.capacity(), 32);
        assert_eq!(table.len(), 11);
        assert_placement(&table);
        Ok(())
    }

    #[test]
    fn test_full_load_factor_never_fills_table() -> Result<(), Box<dyn std::error::Error>> {
        let mut table = table(1, 1.0)?;
        for i in 0..100 {
            table.insert(i.to_string(), i)?;
            assert!(table.current_load() < 1.0);
        }
        assert_eq!(table.capacity(), 128);
        assert_placement(&table);
        Ok(())
    }

    #[test]
    fn test_small_table_grows_past_threshold() -> Result<(), Box<dyn std::error::Error>> {
        let mut table = table(1, 0.5)?;
        table.insert("first".to_string(), 1)?;

        assert_eq!(table.capacity(), 4);
        assert!(table.current_load() < table.load_factor());
        assert_placement(&table);
        Ok(())
    }

    #[test]
    fn test_resize_preserves_entries() -> Result<(), Box<dyn std::error::Error>> {
        let mut table = table(2, 0.75)?;
        for i in 0..500 {
            table.insert(format!("entry {i}"), i)?;
        }

        assert_eq!(table.len(), 500);
        assert_eq!(table.capacity(), 1024);
        for i in 0..500 {
            assert_eq!(table.get(&format!("entry {i}"))?, Some(&i));
        }
        assert_placement(&table);
        Ok(())
    }

    #[test]
    fn test_clear_keeps_capacity() -> Result<(), Box<dyn std::error::Error>> {
        let mut table = table(4, 0.75)?;
        for i in 0..10 {
            table.insert(i.to_string(), i)?;
        }
        let capacity = table.capacity();

        table.clear();

        assert!(table.is_empty());
        assert_eq!(table.capacity(), capacity);
        assert_eq!(table.get("3")?, None);
        assert_eq!(table.iter().count(), 0);
        assert_placement(&table);
        Ok(())
    }

    #[test]
    fn test_iter_is_exact() -> Result<(), Box<dyn std::error::Error>> {
        let mut table = table(8, 0.75)?;
        for i in 1..=5 {
            table.insert(i.to_string(), i)?;
        }

        let iter = table.iter();
        assert_eq!(iter.len(), 5);
        assert_eq!(iter.map(|(_, value)| value).sum::<i32>(), 15);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_rejected_key_leaves_table_untouched() -> Result<(), Box<dyn std::error::Error>> {
        use std::{ffi::OsString, os::unix::ffi::OsStringExt};

        let mut table: ChainTable<OsString, i32> = ChainTable::new(TableConfig::new(1, 1.0)?);
        let bad = OsString::from_vec(vec![0xff, 0xfe]);

        assert_eq!(
            table.insert(bad.clone(), 1),
            Err(KeyError::UnsupportedKey { kind: "OsStr" })
        );
        assert_eq!(table.capacity(), 1);
        assert!(table.is_empty());
        assert!(table.get(&bad).is_err());
        assert!(table.remove(&bad).is_err());
        Ok(())
    }
}
