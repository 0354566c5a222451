use std::{fmt, iter, iter::FusedIterator, mem, slice};

use crate::{
    chain::{self, Chain},
    error::ResizeError,
    hash::{self, HashFn},
    prime::{next_prime, prime_capacity},
};

/// Number of buckets used by `new`
const DEFAULT_CAPACITY: usize = 11;
/// Load factor at which the next insertion doubles the table first
const MAX_LOAD_FACTOR: f64 = 1.0;

/// Builds `capacity` empty chains
fn empty_chains<V>(capacity: usize) -> Vec<Chain<V>> {
    iter::repeat_with(Chain::default).take(capacity).collect()
}

/// A string-keyed hash table using separate chaining.
///
/// Every bucket holds a singly linked list of the entries hashing to it, in insertion order.
/// The bucket count is always prime and the table doubles (then rounds up to the next prime)
/// before an insertion whenever its load factor has reached 1.0.
///
/// Note: This implementation is not thread-safe.
#[derive(Clone)]
pub struct ChainedMap<V, H = HashFn> {
    /// One chain per bucket, `chains.len()` is the capacity
    chains: Vec<Chain<V>>,
    /// Number of entries across all chains
    size: usize,
    /// Hash function applied to keys
    hasher: H,
}

#[allow(clippy::missing_fields_in_debug)]
impl<V: fmt::Debug, H> fmt::Debug for ChainedMap<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainedMap")
            .field("size", &self.size)
            .field("capacity", &self.chains.len())
            .field("chains", &self.chains)
            .finish_non_exhaustive()
    }
}

impl<V> Default for ChainedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> ChainedMap<V> {
    /// Creates an empty table with 11 buckets, hashing keys with [`hash::sip`]
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty table with at least `capacity` buckets (rounded up to a prime)
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_hasher(capacity, hash::sip)
    }
}

impl<V, H> ChainedMap<V, H>
where
    H: Fn(&str) -> u64,
{
    /// Creates an empty table with at least `capacity` buckets and the given hash function.
    ///
    /// The bucket count is [`next_prime`] of `capacity`, so even requests round up to an odd
    /// prime.
    pub fn with_hasher(capacity: usize, hasher: H) -> Self {
        Self { chains: empty_chains(next_prime(capacity)), size: 0, hasher }
    }

    /// Bucket index for `key`
    #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
    fn bucket_index(&self, key: &str) -> usize {
        let capacity = self.chains.len().max(1) as u64;
        ((self.hasher)(key) % capacity) as usize
    }

    /// Doubles the table when the next insertion would find it at its load limit
    fn grow_if_loaded(&mut self) {
        if self.load_factor() >= MAX_LOAD_FACTOR {
            self.resize(self.capacity().saturating_mul(2));
        }
    }

    /// Inserts or updates a key, returning the previous value if the key was present.
    ///
    /// The table doubles first when its load factor has reached 1.0.
    pub fn put(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        self.grow_if_loaded();

        let key = key.into();
        let index = self.bucket_index(&key);
        let chain = self.chains.get_mut(index)?;

        // Keys are unique within a chain, so an existing node is updated in place
        if let Some(existing) = chain.find_mut(&key) {
            return Some(mem::replace(existing, value));
        }

        chain.push_back(key, value);
        self.size = self.size.saturating_add(1);
        None
    }

    /// Retrieves the value stored under `key`
    pub fn get(&self, key: &str) -> Option<&V> {
        self.chains.get(self.bucket_index(key))?.find(key)
    }

    /// Retrieves a mutable reference to the value stored under `key`
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let index = self.bucket_index(key);
        self.chains.get_mut(index)?.find_mut(key)
    }

    /// Returns true if `key` is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.size > 0 && self.get(key).is_some()
    }

    /// Unlinks `key` from its chain. Missing keys are ignored.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let index = self.bucket_index(key);
        let removed = self.chains.get_mut(index)?.remove(key)?;
        self.size = self.size.saturating_sub(1);
        Some(removed)
    }

    /// Rehashes every entry into `new_capacity` buckets (rounded up to a prime).
    ///
    /// Does nothing when `new_capacity` is zero. Unlike the open addressing table, a target
    /// below the number of entries is accepted and the rehash grows the table as it goes.
    pub fn resize(&mut self, new_capacity: usize) {
        if let Err(err) = self.try_resize(new_capacity) {
            log::debug!("chained resize ignored: {err}");
        }
    }

    /// Like [`resize`](Self::resize), but reports a refused request.
    ///
    /// # Errors
    ///
    /// Returns [`ResizeError::ZeroCapacity`] if `new_capacity` is zero.
    pub fn try_resize(&mut self, new_capacity: usize) -> Result<(), ResizeError> {
        if new_capacity < 1 {
            return Err(ResizeError::ZeroCapacity);
        }

        let old_chains = mem::replace(&mut self.chains, empty_chains(prime_capacity(new_capacity)));
        let old_capacity = old_chains.len();
        let moved = self.size;
        self.size = 0;

        // Through `put`, so a target below the entry count keeps growing until the load fits
        for (key, value) in old_chains.into_iter().flatten() {
            self.put(key, value);
        }

        log::debug!("rehashed {moved} entries from {old_capacity} to {} buckets", self.capacity());
        Ok(())
    }
}

impl<H> ChainedMap<usize, H>
where
    H: Fn(&str) -> u64,
{
    /// Counts one more occurrence of `key`, starting it at 1 when absent.
    ///
    /// Works on the chain directly so the count is bumped in place.
    pub(crate) fn tally(&mut self, key: String) {
        self.grow_if_loaded();

        let index = self.bucket_index(&key);
        let Some(chain) = self.chains.get_mut(index) else {
            return;
        };

        if let Some(count) = chain.find_mut(&key) {
            *count = count.saturating_add(1);
            return;
        }

        // First occurrence
        chain.push_back(key, 1);
        self.size = self.size.saturating_add(1);
    }
}

impl<V, H> ChainedMap<V, H> {
    /// Returns the number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the table holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of buckets
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.chains.len()
    }

    /// Returns `len / capacity`
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.size as f64 / self.chains.len() as f64
    }

    /// Returns the number of buckets with an empty chain
    #[must_use]
    pub fn empty_buckets(&self) -> usize {
        self.chains.iter().filter(|chain| chain.is_empty()).count()
    }

    /// Empties every bucket, keeping the capacity
    pub fn clear(&mut self) {
        for chain in &mut self.chains {
            *chain = Chain::default();
        }
        self.size = 0;
    }

    /// Returns an iterator over the entries, bucket by bucket and in chain order within a bucket
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { chains: self.chains.iter(), current: None, remaining: self.size }
    }

    /// Returns the key-value pairs in bucket order, then chain order
    #[must_use]
    pub fn entries(&self) -> Vec<(&str, &V)> {
        self.iter().collect()
    }
}

impl<V, H, K> Extend<(K, V)> for ChainedMap<V, H>
where
    H: Fn(&str) -> u64,
    K: Into<String>,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<V, K: Into<String>> FromIterator<(K, V)> for ChainedMap<V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<V: fmt::Display, H> fmt::Display for ChainedMap<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, chain) in self.chains.iter().enumerate() {
            write!(f, "{index}:")?;
            for (key, value) in chain.iter() {
                write!(f, " -> {key}: {value}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl<'a, V, H> IntoIterator for &'a ChainedMap<V, H> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the entries of a [`ChainedMap`]
#[derive(Debug)]
pub struct Iter<'a, V> {
    /// Buckets not yet entered
    chains: slice::Iter<'a, Chain<V>>,
    /// Position inside the bucket being walked
    current: Option<chain::Iter<'a, V>>,
    /// Entries not yet yielded
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            // Drain the current bucket, then move on to the next one
            if let Some(item) = self.current.as_mut().and_then(Iterator::next) {
                self.remaining = self.remaining.saturating_sub(1);
                return Some(item);
            }
            self.current = Some(self.chains.next()?.iter());
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> FusedIterator for Iter<'_, V> {}
