//! Construction parameters for chained tables

use crate::ConfigError;
use std::num::NonZeroUsize;

/// Number of buckets a table starts with unless configured otherwise
pub const DEFAULT_CAPACITY: usize = 16;

/// Ratio of entries to buckets at which a table doubles
pub const DEFAULT_LOAD_FACTOR: f64 = 0.75;

/// Initial capacity and growth threshold of a table.
///
/// ```rust
/// use chainmap::{ChainMap, TableConfig};
///
/// let config = TableConfig::default().with_capacity(4)?.with_load_factor(0.5)?;
/// let map: ChainMap<String, u32> = ChainMap::with_config(config);
/// assert_eq!(map.capacity(), 4);
/// # Ok::<(), chainmap::ConfigError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableConfig {
    /// Bucket count of a freshly created table
    capacity: NonZeroUsize,
    /// Growth threshold, in `(0, 1]`
    load_factor: f64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            capacity: NonZeroUsize::new(DEFAULT_CAPACITY).unwrap_or(NonZeroUsize::MIN),
            load_factor: DEFAULT_LOAD_FACTOR,
        }
    }
}

impl TableConfig {
    /// Creates a validated configuration
    ///
    /// # Errors
    ///
    /// [`ConfigError::ZeroCapacity`] for a zero capacity and
    /// [`ConfigError::InvalidLoadFactor`] for a load factor outside of `(0, 1]`.
    pub fn new(capacity: usize, load_factor: f64) -> Result<Self, ConfigError> {
        Self::default().with_capacity(capacity)?.with_load_factor(load_factor)
    }

    /// Replaces the initial capacity
    ///
    /// # Errors
    ///
    /// [`ConfigError::ZeroCapacity`] when `capacity` is zero.
    pub fn with_capacity(self, capacity: usize) -> Result<Self, ConfigError> {
        let capacity = NonZeroUsize::new(capacity).ok_or(ConfigError::ZeroCapacity)?;
        Ok(Self { capacity, ..self })
    }

    /// Replaces the load factor
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidLoadFactor`] unless `load_factor` is finite and in `(0, 1]`.
    pub fn with_load_factor(self, load_factor: f64) -> Result<Self, ConfigError> {
        if load_factor.is_finite() && load_factor > 0.0 && load_factor <= 1.0 {
            Ok(Self { load_factor, ..self })
        } else {
            Err(ConfigError::InvalidLoadFactor(load_factor))
        }
    }

    /// Initial number of buckets
    #[must_use]
    pub fn capacity(&self) -> NonZeroUsize {
        self.capacity
    }

    /// Growth threshold
    #[must_use]
    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }
}
