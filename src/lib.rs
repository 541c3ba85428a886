//! # Chain Map
//!
//! A Rust implementation of a hash map and a hash set with separate chaining.
//!
//! This crate provides two containers over one shared bucket engine:
//!
//! - `ChainMap`: stores key-value pairs
//! - `ChainSet`: stores bare keys
//!
//! Keys are text. They are hashed with the polynomial `h = h * 31 + unit` over their UTF-16
//! code units in 32-bit wrapping arithmetic, so the same key always lands in the same bucket
//! for a given capacity. The table doubles before an insertion would bring the ratio of
//! entries to buckets up to the load factor (0.75 by default), rehashing every entry.
//!
//! ## Basic Usage
//!
//! ```rust
//! use chainmap::ChainMap;
//!
//! // Create a new hash map
//! let mut map = ChainMap::new();
//!
//! // Insert values
//! map.set("apple".to_string(), 1)?;
//! map.set("banana".to_string(), 2)?;
//!
//! // Retrieve values
//! assert_eq!(map.get("apple")?, Some(&1));
//!
//! // Update values
//! map.set("apple".to_string(), 10)?;
//! assert_eq!(map.get("apple")?, Some(&10));
//!
//! // Remove values
//! assert!(map.remove("apple")?);
//! assert_eq!(map.get("apple")?, None);
//! # Ok::<(), chainmap::KeyError>(())
//! ```
//!
//! ## Sets
//!
//! ```rust
//! use chainmap::ChainSet;
//!
//! let mut set = ChainSet::new();
//! set.add("x")?;
//! set.add("x")?;
//!
//! assert_eq!(set.len(), 1);
//! assert!(set.contains_key("x")?);
//! # Ok::<(), chainmap::KeyError>(())
//! ```
//!
//! ## Growth
//!
//! ```rust
//! use chainmap::ChainMap;
//!
//! let mut map = ChainMap::new();
//! for i in 0..12 {
//!     map.set(format!("key-{i}"), i)?;
//! }
//!
//! // The twelfth insert would have reached 12 / 16 = 0.75, so the table doubled first
//! assert_eq!(map.capacity(), 32);
//! # Ok::<(), chainmap::KeyError>(())
//! ```

/// Construction parameters
mod config;
/// Error types
mod error;
/// Polynomial hash and bucket resolution
pub mod hash;
/// Key-value container
mod map;
/// Key-only container
mod set;
/// Chaining core shared by both containers
mod table;
/// Bulk constructors
mod utils;

pub use config::{DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR, TableConfig};
pub use error::{ConfigError, KeyError};
pub use hash::{ChainKey, polynomial_hash};
pub use map::ChainMap;
pub use set::{ChainSet, Keys};
pub use table::Iter;
pub use utils::{from_keys, from_pairs};
