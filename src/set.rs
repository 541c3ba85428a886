use crate::{
    ChainKey, ConfigError, KeyError, TableConfig,
    table::{ChainTable, Iter},
};
use std::{borrow::Borrow, fmt, iter::FusedIterator};

/// A hash set backed by the same chaining core as [`ChainMap`](crate::ChainMap).
///
/// Each bucket holds bare keys; the value slot of the core is the zero-sized `()`.
#[derive(Clone)]
pub struct ChainSet<K> {
    /// The shared chaining core
    table: ChainTable<K, ()>,
}

/// Iterator over the keys of a [`ChainSet`]
#[derive(Debug, Clone)]
pub struct Keys<'a, K> {
    /// Entries of the underlying table
    inner: Iter<'a, K, ()>,
}

impl<'a, K> Iterator for Keys<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, ())| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K> ExactSizeIterator for Keys<'_, K> {}

impl<K> FusedIterator for Keys<'_, K> {}

impl<K> Default for ChainSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug> fmt::Debug for ChainSet<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'a, K> IntoIterator for &'a ChainSet<K> {
    type Item = &'a K;
    type IntoIter = Keys<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K> ChainSet<K> {
    /// Creates an empty set with 16 buckets and a 0.75 load factor
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(TableConfig::default())
    }

    /// Creates an empty set with `capacity` buckets and the default load factor
    ///
    /// # Errors
    ///
    /// [`ConfigError::ZeroCapacity`] when `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Result<Self, ConfigError> {
        Ok(Self::with_config(TableConfig::default().with_capacity(capacity)?))
    }

    /// Creates an empty set from a validated configuration
    #[must_use]
    pub fn with_config(config: TableConfig) -> Self {
        Self { table: ChainTable::new(config) }
    }

    /// Number of distinct keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns true if the set is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the number of buckets
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Length of the longest bucket chain
    #[must_use]
    pub fn longest_chain(&self) -> usize {
        self.table.longest_chain()
    }

    /// Removes every key. The capacity is kept.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Returns an iterator over the keys, in bucket order
    #[must_use]
    pub fn iter(&self) -> Keys<'_, K> {
        Keys { inner: self.table.iter() }
    }

    /// Same as [`ChainSet::iter`]
    #[must_use]
    pub fn keys(&self) -> Keys<'_, K> {
        self.iter()
    }
}

impl<K: ChainKey> ChainSet<K> {
    /// Adds a key, returning true if it was not present yet
    ///
    /// # Errors
    ///
    /// [`KeyError::UnsupportedKey`] when the key has no text representation.
    pub fn add(&mut self, key: K) -> Result<bool, KeyError> {
        Ok(self.table.insert(key, ())?.is_none())
    }

    /// Returns true if the set contains the given key
    ///
    /// # Errors
    ///
    /// [`KeyError::UnsupportedKey`] when the key has no text representation.
    pub fn contains_key<Q>(&self, key: &Q) -> Result<bool, KeyError>
    where
        K: Borrow<Q>,
        Q: ChainKey + ?Sized,
    {
        self.table.contains_key(key)
    }

    /// Removes a key, returning true if it was present
    ///
    /// # Errors
    ///
    /// [`KeyError::UnsupportedKey`] when the key has no text representation.
    pub fn remove<Q>(&mut self, key: &Q) -> Result<bool, KeyError>
    where
        K: Borrow<Q>,
        Q: ChainKey + ?Sized,
    {
        Ok(self.table.remove(key)?.is_some())
    }

    /// Adds every key of `iter`, stopping at the first rejected key
    ///
    /// # Errors
    ///
    /// [`KeyError::UnsupportedKey`] for the first key without a text representation. Keys
    /// before it stay in the set.
    pub fn try_extend<I>(&mut self, iter: I) -> Result<(), KeyError>
    where
        I: IntoIterator<Item = K>,
    {
        for key in iter {
            self.add(key)?;
        }
        Ok(())
    }
}
