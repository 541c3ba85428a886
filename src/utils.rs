//! Bulk constructors for the chained containers

use crate::{ChainKey, ChainMap, ChainSet, KeyError};

/// Creates a `ChainMap` from an iterator of key-value pairs.
///
/// Later pairs overwrite earlier pairs with the same key.
///
/// # Errors
///
/// [`KeyError::UnsupportedKey`] for the first key without a text representation.
pub fn from_pairs<K, V, I>(iter: I) -> Result<ChainMap<K, V>, KeyError>
where
    K: ChainKey,
    I: IntoIterator<Item = (K, V)>,
{
    let mut map = ChainMap::new();
    map.try_extend(iter)?;
    Ok(map)
}

/// Creates a `ChainSet` from an iterator of keys
///
/// # Errors
///
/// [`KeyError::UnsupportedKey`] for the first key without a text representation.
pub fn from_keys<K, I>(iter: I) -> Result<ChainSet<K>, KeyError>
where
    K: ChainKey,
    I: IntoIterator<Item = K>,
{
    let mut set = ChainSet::new();
    set.try_extend(iter)?;
    Ok(set)
}
