//! String hash functions usable as a table's hasher.
//!
//! A table accepts any `Fn(&str) -> u64`; these are the ones shipped with the crate. Each is a
//! pure function of the key, so a table built with one keeps finding its entries.

use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

/// Function pointer type of the shipped hash functions.
pub type HashFn = fn(&str) -> u64;

/// Hashes the key with the standard library's `DefaultHasher`.
#[must_use]
pub fn sip(key: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    hasher.finish()
}

/// Sum of the key's code points.
///
/// Anagrams collide, which makes it handy for exercising collision handling.
#[must_use]
pub fn char_sum(key: &str) -> u64 {
    key.chars().fold(0u64, |acc, c| acc.wrapping_add(u64::from(c)))
}

/// Sum of `(position + 1) * code point` over the key.
#[must_use]
pub fn weighted_char_sum(key: &str) -> u64 {
    key.chars()
        .zip(1u64..)
        .fold(0u64, |acc, (c, weight)| acc.wrapping_add(weight.wrapping_mul(u64::from(c))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_sum() {
        assert_eq!(char_sum(""), 0);
        assert_eq!(char_sum("a"), 97);
        assert_eq!(char_sum("ab"), 97 + 98);
        assert_eq!(char_sum("ab"), char_sum("ba"));
    }

    #[test]
    fn test_weighted_char_sum() {
        assert_eq!(weighted_char_sum("a"), 97);
        assert_eq!(weighted_char_sum("ab"), 97 + 2 * 98);
        assert_ne!(weighted_char_sum("ab"), weighted_char_sum("ba"));
    }

    #[test]
    fn test_sip_is_deterministic() {
        assert_eq!(sip("apple"), sip("apple"));
    }
}
