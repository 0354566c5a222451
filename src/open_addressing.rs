use std::{fmt, iter, iter::FusedIterator, mem};

use crate::{
    error::ResizeError,
    hash::{self, HashFn},
    prime::{next_prime, prime_capacity},
};

/// Number of slots used by `new`
const DEFAULT_CAPACITY: usize = 11;
/// Load factor at which the next insertion doubles the table first
const MAX_LOAD_FACTOR: f64 = 0.5;

/// A live key-value pair
#[derive(Debug, Clone)]
struct Entry<V> {
    /// The key the entry was stored under
    key: String,
    /// The value associated with the key
    value: V,
}

/// State of one slot in the table
#[derive(Debug, Clone)]
enum Slot<V> {
    /// Never written since the last clear or rehash; ends a probe sequence
    Empty,
    /// Held an entry that was removed; probes continue past it
    Tombstone,
    /// Holds a live entry
    Occupied(Entry<V>),
}

/// Builds `capacity` empty slots
fn empty_slots<V>(capacity: usize) -> Vec<Slot<V>> {
    iter::repeat_with(|| Slot::Empty).take(capacity).collect()
}

/// Quadratic probe sequence `(start + i^2) mod capacity` for `i` in `0..capacity`.
#[derive(Debug, Clone)]
struct Probe {
    /// Slot yielded by the next call
    index: usize,
    /// Number of slots yielded so far (`i`)
    step: usize,
    /// Modulus of the sequence
    capacity: usize,
}

impl Probe {
    /// Starts a sequence at `start`
    fn new(start: usize, capacity: usize) -> Self {
        Self { index: start, step: 0, capacity }
    }
}

impl Iterator for Probe {
    type Item = usize;

    #[allow(clippy::arithmetic_side_effects)]
    fn next(&mut self) -> Option<usize> {
        if self.step >= self.capacity {
            return None;
        }

        let current = self.index;
        // (i + 1)^2 - i^2 = 2i + 1
        let delta = self.step.saturating_mul(2).saturating_add(1) % self.capacity;
        self.index = (self.index + delta) % self.capacity;
        self.step = self.step.saturating_add(1);

        Some(current)
    }
}

/// A string-keyed hash table using open addressing with quadratic probing.
///
/// The slot count is always prime and the table doubles (then rounds up to the next prime)
/// before an insertion whenever its load factor has reached 0.5. Removed entries leave a
/// tombstone behind so that keys stored further along a probe sequence stay reachable.
///
/// The hash function is any `Fn(&str) -> u64` and must stay the same for the table's lifetime.
///
/// Note: This implementation is not thread-safe.
#[derive(Clone)]
pub struct OpenAddressingMap<V, H = HashFn> {
    /// One slot per bucket, `slots.len()` is the capacity
    slots: Vec<Slot<V>>,
    /// Number of live entries
    size: usize,
    /// Hash function applied to keys
    hasher: H,
}

#[allow(clippy::missing_fields_in_debug)]
impl<V: fmt::Debug, H> fmt::Debug for OpenAddressingMap<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAddressingMap")
            .field("size", &self.size)
            .field("capacity", &self.slots.len())
            .field("slots", &self.slots)
            .finish_non_exhaustive()
    }
}

impl<V> Default for OpenAddressingMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> OpenAddressingMap<V> {
    /// Creates an empty table with 11 slots, hashing keys with [`hash::sip`]
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty table with at least `capacity` slots (rounded up to a prime)
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_hasher(capacity, hash::sip)
    }
}

impl<V, H> OpenAddressingMap<V, H>
where
    H: Fn(&str) -> u64,
{
    /// Creates an empty table with at least `capacity` slots and the given hash function.
    ///
    /// The slot count is [`next_prime`] of `capacity`, so even requests round up to an odd prime.
    pub fn with_hasher(capacity: usize, hasher: H) -> Self {
        Self { slots: empty_slots(next_prime(capacity)), size: 0, hasher }
    }

    /// First slot of the probe sequence for `key`
    #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
    fn home(&self, key: &str) -> usize {
        let capacity = self.slots.len().max(1) as u64;
        ((self.hasher)(key) % capacity) as usize
    }

    /// Probe sequence for `key` over the current slots
    fn probe(&self, key: &str) -> Probe {
        Probe::new(self.home(key), self.slots.len())
    }

    /// Index of the slot holding `key` as a live entry
    fn find(&self, key: &str) -> Option<usize> {
        if self.size == 0 {
            return None;
        }

        for index in self.probe(key) {
            match self.slots.get(index)? {
                // Nothing was ever stored past an empty slot on this sequence
                Slot::Empty => return None,
                Slot::Occupied(entry) if entry.key == key => return Some(index),
                Slot::Occupied(_) | Slot::Tombstone => {}
            }
        }

        None
    }

    /// Inserts or updates a key, returning the previous value if the key was present.
    ///
    /// The table doubles first when its load factor has reached 0.5.
    pub fn put(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        // Growing first keeps the load below 0.5 while the entry is placed
        if self.load_factor() >= MAX_LOAD_FACTOR {
            self.resize(self.capacity().saturating_mul(2));
        }

        self.insert_entry(Entry { key: key.into(), value })
    }

    /// Places an entry along its probe sequence, the caller having kept the load below 0.5.
    ///
    /// A quadratic probe over a prime modulus meets `(capacity + 1) / 2` distinct slots, which
    /// is more than the live entries, so the sequence always offers a free slot.
    fn insert_entry(&mut self, entry: Entry<V>) -> Option<V> {
        debug_assert!(self.size.saturating_mul(2) < self.capacity());
        let mut vacant = None;

        for index in self.probe(&entry.key) {
            match self.slots.get_mut(index) {
                None => break,
                // End of the sequence: the key is not stored anywhere further
                Some(Slot::Empty) => {
                    vacant = vacant.or(Some(index));
                    break;
                }
                // Remember the first tombstone, but a live copy of the key may sit past it
                Some(Slot::Tombstone) => vacant = vacant.or(Some(index)),
                Some(Slot::Occupied(existing)) if existing.key == entry.key => {
                    return Some(mem::replace(&mut existing.value, entry.value));
                }
                Some(Slot::Occupied(_)) => {}
            }
        }

        let Some(slot) = vacant.and_then(|index| self.slots.get_mut(index)) else {
            log::error!(
                "no free slot for {:?} among {} slots holding {} entries",
                entry.key,
                self.slots.len(),
                self.size
            );
            return None;
        };

        if matches!(slot, Slot::Tombstone) {
            log::trace!("reusing tombstone for key {:?}", entry.key);
        }
        *slot = Slot::Occupied(entry);
        self.size = self.size.saturating_add(1);
        None
    }

    /// Retrieves the value stored under `key`
    pub fn get(&self, key: &str) -> Option<&V> {
        match self.slots.get(self.find(key)?)? {
            Slot::Occupied(entry) => Some(&entry.value),
            Slot::Empty | Slot::Tombstone => None,
        }
    }

    /// Retrieves a mutable reference to the value stored under `key`
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let index = self.find(key)?;
        match self.slots.get_mut(index)? {
            Slot::Occupied(entry) => Some(&mut entry.value),
            Slot::Empty | Slot::Tombstone => None,
        }
    }

    /// Returns true if `key` has a live entry
    pub fn contains_key(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Removes `key`, leaving a tombstone in its slot. Missing keys are ignored.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let index = self.find(key)?;
        let slot = self.slots.get_mut(index)?;

        // The slot must not go back to empty or later keys on its sequence become unreachable
        match mem::replace(slot, Slot::Tombstone) {
            Slot::Occupied(entry) => {
                self.size = self.size.saturating_sub(1);
                Some(entry.value)
            }
            other => {
                *slot = other;
                None
            }
        }
    }

    /// Rehashes every live entry into `new_capacity` slots (rounded up to a prime).
    ///
    /// Does nothing when `new_capacity` is smaller than the number of entries.
    pub fn resize(&mut self, new_capacity: usize) {
        if let Err(err) = self.try_resize(new_capacity) {
            log::debug!("open addressing resize ignored: {err}");
        }
    }

    /// Like [`resize`](Self::resize), but reports a refused request.
    ///
    /// # Errors
    ///
    /// Returns [`ResizeError::BelowSize`] if `new_capacity` is smaller than [`len`](Self::len).
    pub fn try_resize(&mut self, new_capacity: usize) -> Result<(), ResizeError> {
        if new_capacity < self.size {
            return Err(ResizeError::BelowSize { requested: new_capacity, size: self.size });
        }

        self.rehash(prime_capacity(new_capacity));
        Ok(())
    }

    /// Moves all live entries into a fresh slot array of `capacity` slots
    fn rehash(&mut self, capacity: usize) {
        let old_slots = mem::replace(&mut self.slots, empty_slots(capacity));
        let old_capacity = old_slots.len();
        let moved = self.size;
        self.size = 0;

        // Tombstones are dropped here; only live entries are placed again
        for slot in old_slots {
            if let Slot::Occupied(Entry { key, value }) = slot {
                self.put(key, value);
            }
        }

        log::debug!("rehashed {moved} entries from {old_capacity} to {} slots", self.capacity());
    }
}

impl<V, H> OpenAddressingMap<V, H> {
    /// Returns the number of live entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the table holds no live entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of slots
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns `len / capacity`
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.size as f64 / self.slots.len() as f64
    }

    /// Returns the number of slots without a live entry; tombstones count as empty
    #[must_use]
    pub fn empty_buckets(&self) -> usize {
        self.slots.len().saturating_sub(self.size)
    }

    /// Empties every slot, keeping the capacity
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = Slot::Empty;
        }
        self.size = 0;
    }

    /// Returns an iterator over the live entries in slot order
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { slots: &self.slots, index: 0, remaining: self.size }
    }

    /// Returns the live key-value pairs in slot order
    #[must_use]
    pub fn entries(&self) -> Vec<(&str, &V)> {
        self.iter().collect()
    }
}

impl<V, H, K> Extend<(K, V)> for OpenAddressingMap<V, H>
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

impl<V, K: Into<String>> FromIterator<(K, V)> for OpenAddressingMap<V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<V: fmt::Display, H> fmt::Display for OpenAddressingMap<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, slot) in self.slots.iter().enumerate() {
            match slot {
                Slot::Empty => writeln!(f, "{index}: empty")?,
                Slot::Tombstone => writeln!(f, "{index}: tombstone")?,
                Slot::Occupied(entry) => writeln!(f, "{index}: {} => {}", entry.key, entry.value)?,
            }
        }
        Ok(())
    }
}

impl<'a, V, H> IntoIterator for &'a OpenAddressingMap<V, H> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the live entries of an [`OpenAddressingMap`], in slot order
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    /// The slots being scanned
    slots: &'a [Slot<V>],
    /// Next slot to look at
    index: usize,
    /// Live entries not yet yielded
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(slot) = self.slots.get(self.index) {
            self.index = self.index.saturating_add(1);
            if let Slot::Occupied(entry) = slot {
                self.remaining = self.remaining.saturating_sub(1);
                return Some((entry.key.as_str(), &entry.value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> FusedIterator for Iter<'_, V> {}
