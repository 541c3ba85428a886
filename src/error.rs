//! Error types returned by the chained containers

use thiserror::Error;

/// Failure to read a key as a sequence of text code units.
///
/// Returned by every keyed operation before the table is touched, so a rejected key never
/// leaves a container in a modified state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum KeyError {
    /// The key type is text-like but this particular value has no UTF-16 code units
    #[error("unsupported key type: {kind} value is not valid Unicode text")]
    UnsupportedKey {
        /// Name of the key type that was rejected
        kind: &'static str,
    },
}

/// Invalid construction parameters for a table.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A table needs at least one bucket
    #[error("table capacity must be at least 1")]
    ZeroCapacity,
    /// Load factor outside of `(0, 1]`
    #[error("load factor must be a finite number in (0, 1], got {0}")]
    InvalidLoadFactor(f64),
}
