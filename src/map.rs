use crate::{
    ChainKey, ConfigError, KeyError, TableConfig,
    table::{ChainTable, Iter},
};
use std::{borrow::Borrow, fmt};

/// A hash map with separate chaining and a deterministic polynomial string hash.
///
/// Keys are text-like values (see [`ChainKey`]). Every keyed operation returns a
/// [`KeyError`] instead of touching the table when the key cannot be read as text.
///
/// Note: This implementation is not thread-safe. Wrap it in a lock to share it.
#[derive(Clone)]
pub struct ChainMap<K, V> {
    /// The shared chaining core
    table: ChainTable<K, V>,
}

impl<K, V> Default for ChainMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for ChainMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, V> IntoIterator for &'a ChainMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> ChainMap<K, V> {
    /// Creates an empty map with 16 buckets and a 0.75 load factor
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(TableConfig::default())
    }

    /// Creates an empty map with `capacity` buckets and the default load factor
    ///
    /// # Errors
    ///
    /// [`ConfigError::ZeroCapacity`] when `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Result<Self, ConfigError> {
        Ok(Self::with_config(TableConfig::default().with_capacity(capacity)?))
    }

    /// Creates an empty map from a validated configuration
    #[must_use]
    pub fn with_config(config: TableConfig) -> Self {
        Self { table: ChainTable::new(config) }
    }

    /// Returns the number of distinct keys in the map
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns true if the map is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the number of buckets
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Returns the configured growth threshold
    #[must_use]
    pub fn load_factor(&self) -> f64 {
        self.table.load_factor()
    }

    /// Returns the current ratio of entries to buckets
    #[must_use]
    pub fn current_load(&self) -> f64 {
        self.table.current_load()
    }

    /// Length of every bucket chain, in bucket order
    pub fn chain_lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.table.chain_lengths()
    }

    /// Length of the longest bucket chain
    #[must_use]
    pub fn longest_chain(&self) -> usize {
        self.table.longest_chain()
    }

    /// Removes every entry. The capacity is kept.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Returns an iterator over the key-value pairs.
    ///
    /// The order follows the bucket layout and changes whenever the map resizes.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.table.iter()
    }

    /// Same as [`ChainMap::iter`]
    #[must_use]
    pub fn entries(&self) -> Iter<'_, K, V> {
        self.iter()
    }

    /// Returns an iterator over the keys
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &K> + '_ {
        self.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over the values
    pub fn values(&self) -> impl ExactSizeIterator<Item = &V> + '_ {
        self.iter().map(|(_, value)| value)
    }
}

impl<K: ChainKey, V> ChainMap<K, V> {
    /// Inserts a key-value pair into the map.
    ///
    /// If the key already exists its value is replaced in place and the old value returned;
    /// the number of entries does not change.
    ///
    /// ```rust
    /// use chainmap::ChainMap;
    ///
    /// let mut map = ChainMap::new();
    /// assert_eq!(map.set("a".to_string(), 1)?, None);
    /// assert_eq!(map.set("a".to_string(), 2)?, Some(1));
    /// assert_eq!(map.get("a")?, Some(&2));
    /// assert_eq!(map.len(), 1);
    /// # Ok::<(), chainmap::KeyError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// [`KeyError::UnsupportedKey`] when the key has no text representation.
    pub fn set(&mut self, key: K, value: V) -> Result<Option<V>, KeyError> {
        self.table.insert(key, value)
    }

    /// Retrieves the value for a given key
    ///
    /// # Errors
    ///
    /// [`KeyError::UnsupportedKey`] when the key has no text representation.
    pub fn get<Q>(&self, key: &Q) -> Result<Option<&V>, KeyError>
    where
        K: Borrow<Q>,
        Q: ChainKey + ?Sized,
    {
        self.table.get(key)
    }

    /// Retrieves a mutable reference to the value for a given key
    ///
    /// # Errors
    ///
    /// [`KeyError::UnsupportedKey`] when the key has no text representation.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<Option<&mut V>, KeyError>
    where
        K: Borrow<Q>,
        Q: ChainKey + ?Sized,
    {
        self.table.get_mut(key)
    }

    /// Returns true if the map contains the given key
    ///
    /// # Errors
    ///
    /// [`KeyError::UnsupportedKey`] when the key has no text representation.
    pub fn has<Q>(&self, key: &Q) -> Result<bool, KeyError>
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

    /// Removes a key, returning its value if it was present
    ///
    /// # Errors
    ///
    /// [`KeyError::UnsupportedKey`] when the key has no text representation.
    pub fn take<Q>(&mut self, key: &Q) -> Result<Option<V>, KeyError>
    where
        K: Borrow<Q>,
        Q: ChainKey + ?Sized,
    {
        self.table.remove(key)
    }

    /// Inserts every pair of `iter`, stopping at the first rejected key
    ///
    /// # Errors
    ///
    /// [`KeyError::UnsupportedKey`] for the first key without a text representation. Pairs
    /// before it stay inserted.
    pub fn try_extend<I>(&mut self, iter: I) -> Result<(), KeyError>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in iter {
            self.set(key, value)?;
        }
        Ok(())
    }
}
