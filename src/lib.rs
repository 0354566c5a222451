//! # Prime Map
//!
//! String-keyed hash tables over prime bucket counts.
//!
//! This crate provides two hash map implementations with the same contract:
//!
//! - `OpenAddressingMap`: open addressing with quadratic probing and tombstones, kept under a
//!   0.5 load factor
//! - `ChainedMap`: separate chaining with a singly linked list per bucket, kept under a 1.0
//!   load factor
//!
//! Both grow by doubling their bucket count and rounding up to the next prime, then rehashing
//! every entry. On top of the chained table, `find_mode` reports the most frequent values of
//! a sequence.
//!
//! ## Basic Usage
//!
//! ```rust
//! use primemap::OpenAddressingMap;
//!
//! // Create a new hash map with at least 11 slots
//! let mut map = OpenAddressingMap::with_capacity(11);
//!
//! // Insert values
//! map.put("apple", 1);
//! map.put("banana", 2);
//!
//! // Retrieve values
//! assert_eq!(map.get("apple"), Some(&1));
//!
//! // Update values
//! map.put("apple", 10);
//! assert_eq!(map.get("apple"), Some(&10));
//! assert_eq!(map.len(), 2);
//!
//! // Remove values
//! map.remove("apple");
//! assert_eq!(map.get("apple"), None);
//! ```
//!
//! ## Custom Hash Functions
//!
//! Any `Fn(&str) -> u64` can hash the keys, as long as it stays the same for the table's
//! lifetime.
//!
//! ```rust
//! use primemap::{ChainedMap, hash};
//!
//! let mut map = ChainedMap::with_hasher(11, hash::weighted_char_sum);
//! for i in 1..=20 {
//!     map.put(i.to_string(), i);
//! }
//!
//! assert!(map.load_factor() <= 1.0);
//! assert!((1..=20).all(|i| map.contains_key(&i.to_string())));
//! ```
//!
//! ## Modes
//!
//! ```rust
//! use primemap::find_mode;
//!
//! let mode = find_mode(["apple", "apple", "grape", "melon", "peach"]);
//! assert_eq!(mode.modes, vec!["apple".to_string()]);
//! assert_eq!(mode.frequency, 2);
//! ```

/// Singly linked list used as a bucket by the chained table
mod chain;
/// Module implementing the separate chaining hash map
mod chained;
/// Errors reported by the tables
mod error;
/// String hash functions
pub mod hash;
/// Most frequent values of a sequence
mod mode;
/// Module implementing the open addressing hash map
mod open_addressing;
/// Prime sizing of bucket arrays
pub mod prime;
/// The map contract shared by both tables
mod table;

pub use chained::{ChainedMap, Iter as ChainedIter};
pub use error::ResizeError;
pub use mode::{Mode, find_mode};
pub use open_addressing::{Iter as OpenAddressingIter, OpenAddressingMap};
pub use table::StringMap;
