//! Polynomial string hash and bucket resolution shared by every container in the crate

use crate::KeyError;
use std::{
    borrow::Cow,
    ffi::{OsStr, OsString},
    num::{NonZeroU32, NonZeroUsize},
    path::{Path, PathBuf},
};

/// Multiplier of the polynomial accumulation
pub const HASH_PRIME: u32 = 31;

/// A key made of text code units.
///
/// The hash walks the UTF-16 code units of the key from left to right, so every
/// implementation must yield the same units for the owned and the borrowed form of a key
/// (`String` and `str`, `PathBuf` and `Path`, ...). Lookups rely on that to find a `String`
/// key through a `&str`.
///
/// Types that are not text simply do not implement this trait. Text-like values that cannot
/// be decoded at run time, such as a non-Unicode [`OsStr`], return
/// [`KeyError::UnsupportedKey`].
pub trait ChainKey: Eq {
    /// Returns the UTF-16 code units of the key in order
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::UnsupportedKey`] when the value has no textual representation.
    fn code_units(&self) -> Result<impl Iterator<Item = u16> + '_, KeyError>;
}

impl ChainKey for str {
    fn code_units(&self) -> Result<impl Iterator<Item = u16> + '_, KeyError> {
        Ok(self.encode_utf16())
    }
}

impl ChainKey for String {
    fn code_units(&self) -> Result<impl Iterator<Item = u16> + '_, KeyError> {
        self.as_str().code_units()
    }
}

impl ChainKey for Box<str> {
    fn code_units(&self) -> Result<impl Iterator<Item = u16> + '_, KeyError> {
        (**self).code_units()
    }
}

impl ChainKey for Cow<'_, str> {
    fn code_units(&self) -> Result<impl Iterator<Item = u16> + '_, KeyError> {
        (**self).code_units()
    }
}

impl ChainKey for [u16] {
    fn code_units(&self) -> Result<impl Iterator<Item = u16> + '_, KeyError> {
        Ok(self.iter().copied())
    }
}

impl ChainKey for Vec<u16> {
    fn code_units(&self) -> Result<impl Iterator<Item = u16> + '_, KeyError> {
        self.as_slice().code_units()
    }
}

impl ChainKey for OsStr {
    fn code_units(&self) -> Result<impl Iterator<Item = u16> + '_, KeyError> {
        self.to_str().map(str::encode_utf16).ok_or(KeyError::UnsupportedKey { kind: "OsStr" })
    }
}

impl ChainKey for OsString {
    fn code_units(&self) -> Result<impl Iterator<Item = u16> + '_, KeyError> {
        self.as_os_str().code_units()
    }
}

impl ChainKey for Path {
    fn code_units(&self) -> Result<impl Iterator<Item = u16> + '_, KeyError> {
        self.to_str().map(str::encode_utf16).ok_or(KeyError::UnsupportedKey { kind: "Path" })
    }
}

impl ChainKey for PathBuf {
    fn code_units(&self) -> Result<impl Iterator<Item = u16> + '_, KeyError> {
        self.as_path().code_units()
    }
}

impl<T: ChainKey + ?Sized> ChainKey for &T {
    fn code_units(&self) -> Result<impl Iterator<Item = u16> + '_, KeyError> {
        (**self).code_units()
    }
}

/// Computes `h = h * 31 + unit` over the code units of `key`, starting from zero.
///
/// The accumulator is a `u32` with wrapping arithmetic, which gives the same bit pattern as
/// Java's `String::hashCode`. The value depends on the key only, never on a table, so it
/// stays the same across resizes and across tables.
///
/// # Errors
///
/// Propagates [`KeyError::UnsupportedKey`] from [`ChainKey::code_units`].
pub fn polynomial_hash<Q: ChainKey + ?Sized>(key: &Q) -> Result<u32, KeyError> {
    Ok(key
        .code_units()?
        .fold(0, |hash: u32, unit| hash.wrapping_mul(HASH_PRIME).wrapping_add(u32::from(unit))))
}

/// Maps a hash onto `0..capacity`.
///
/// Both operands are unsigned, so the remainder is always a valid index and no sign
/// correction is needed. On targets where `usize` is narrower than 32 bits the capacity
/// fits in a `u32`, so the remainder is taken there and converted back.
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub fn bucket_index(hash: u32, capacity: NonZeroUsize) -> usize {
    match usize::try_from(hash) {
        Ok(hash) => hash % capacity,
        Err(_) => NonZeroU32::try_from(capacity)
            .ok()
            .and_then(|capacity| usize::try_from(hash % capacity).ok())
            .unwrap_or_default(),
    }
}
