//! The map contract shared by both tables

use crate::{ChainedMap, OpenAddressingMap};

/// Operations common to [`OpenAddressingMap`] and [`ChainedMap`].
///
/// Lets callers drive either collision strategy through the same code.
pub trait StringMap<V> {
    /// Inserts or updates `key`, returning the previous value
    fn put(&mut self, key: String, value: V) -> Option<V>;

    /// Retrieves the value stored under `key`
    fn get(&self, key: &str) -> Option<&V>;

    /// Removes `key`, returning its value; missing keys are ignored
    fn remove(&mut self, key: &str) -> Option<V>;

    /// Drops every entry, keeping the capacity
    fn clear(&mut self);

    /// Rehashes into `new_capacity` buckets, or does nothing if the table refuses the target
    fn resize(&mut self, new_capacity: usize);

    /// Returns the number of entries
    fn len(&self) -> usize;

    /// Returns the number of buckets
    fn capacity(&self) -> usize;

    /// Returns the number of buckets without an entry
    fn empty_buckets(&self) -> usize;

    /// Returns the key-value pairs in bucket order
    fn entries(&self) -> Vec<(&str, &V)>;

    /// Returns true if `key` is present
    fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Returns true if the map holds no entries
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `len / capacity`
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    fn load_factor(&self) -> f64 {
        self.len() as f64 / self.capacity() as f64
    }

    /// Returns the keys in bucket order
    fn keys<'a>(&'a self) -> Vec<&'a str>
    where
        V: 'a,
    {
        self.entries().into_iter().map(|(key, _)| key).collect()
    }

    /// Returns the values in bucket order
    fn values(&self) -> Vec<&V> {
        self.entries().into_iter().map(|(_, value)| value).collect()
    }
}

impl<V, H> StringMap<V> for OpenAddressingMap<V, H>
where
    H: Fn(&str) -> u64,
{
    fn put(&mut self, key: String, value: V) -> Option<V> {
        Self::put(self, key, value)
    }

    fn get(&self, key: &str) -> Option<&V> {
        Self::get(self, key)
    }

    fn remove(&mut self, key: &str) -> Option<V> {
        Self::remove(self, key)
    }

    fn clear(&mut self) {
        Self::clear(self);
    }

    fn resize(&mut self, new_capacity: usize) {
        Self::resize(self, new_capacity);
    }

    fn len(&self) -> usize {
        Self::len(self)
    }

    fn capacity(&self) -> usize {
        Self::capacity(self)
    }

    fn empty_buckets(&self) -> usize {
        Self::empty_buckets(self)
    }

    fn entries(&self) -> Vec<(&str, &V)> {
        Self::entries(self)
    }

    fn contains_key(&self, key: &str) -> bool {
        Self::contains_key(self, key)
    }
}

impl<V, H> StringMap<V> for ChainedMap<V, H>
where
    H: Fn(&str) -> u64,
{
    fn put(&mut self, key: String, value: V) -> Option<V> {
        Self::put(self, key, value)
    }

    fn get(&self, key: &str) -> Option<&V> {
        Self::get(self, key)
    }

    fn remove(&mut self, key: &str) -> Option<V> {
        Self::remove(self, key)
    }

    fn clear(&mut self) {
        Self::clear(self);
    }

    fn resize(&mut self, new_capacity: usize) {
        Self::resize(self, new_capacity);
    }

    fn len(&self) -> usize {
        Self::len(self)
    }

    fn capacity(&self) -> usize {
        Self::capacity(self)
    }

    fn empty_buckets(&self) -> usize {
        Self::empty_buckets(self)
    }

    fn entries(&self) -> Vec<(&str, &V)> {
        Self::entries(self)
    }

    fn contains_key(&self, key: &str) -> bool {
        Self::contains_key(self, key)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use proptest::prelude::*;

    use super::*;
    use crate::{hash, prime::is_prime};

    #[derive(Debug, Clone)]
    enum Op {
        Put(String, u32),
        Remove(String),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => ("[a-d]{1,3}", any::<u32>()).prop_map(|(key, value)| Op::Put(key, value)),
            1 => "[a-d]{1,3}".prop_map(Op::Remove),
        ]
    }

    /// Replays `ops` against `map` and a std `HashMap`, checking they agree after every step
    fn check_against_model<M: StringMap<u32>>(
        map: &mut M,
        ops: &[Op],
        max_load: fn(&M) -> bool,
    ) -> Result<(), TestCaseError> {
        let mut model = HashMap::new();

        for op in ops {
            match op {
                Op::Put(key, value) => {
                    let previous = map.put(key.clone(), *value);
                    prop_assert_eq!(previous, model.insert(key.clone(), *value));
                    prop_assert_eq!(map.get(key), Some(value));
                    prop_assert!(max_load(map), "load bound broken at {}", map.load_factor());
                }
                Op::Remove(key) => {
                    prop_assert_eq!(map.remove(key), model.remove(key));
                    prop_assert_eq!(map.get(key), None);
                    prop_assert!(!map.contains_key(key));
                }
            }
            prop_assert_eq!(map.len(), model.len());
            prop_assert!(is_prime(map.capacity()));
        }

        let mut keys = map.keys();
        keys.sort_unstable();
        keys.dedup();
        prop_assert_eq!(keys.len(), model.len());
        for (key, value) in &model {
            prop_assert_eq!(map.get(key), Some(value));
        }
        Ok(())
    }

    /// Resizes to `target` and checks nothing was lost
    fn check_resize_preserves<M: StringMap<u32>>(
        map: &mut M,
        pairs: &[(String, u32)],
        target: usize,
    ) -> Result<(), TestCaseError> {
        for (key, value) in pairs {
            map.put(key.clone(), *value);
        }
        let before: HashMap<String, u32> =
            map.entries().into_iter().map(|(key, value)| (key.to_string(), *value)).collect();

        map.resize(target);

        prop_assert_eq!(map.len(), before.len());
        prop_assert!(is_prime(map.capacity()));
        for (key, value) in &before {
            prop_assert_eq!(map.get(key), Some(value));
        }
        Ok(())
    }

    /// Clears the map and checks every prior key is gone
    fn check_clear<M: StringMap<u32>>(
        map: &mut M,
        pairs: &[(String, u32)],
    ) -> Result<(), TestCaseError> {
        for (key, value) in pairs {
            map.put(key.clone(), *value);
        }
        let capacity = map.capacity();

        map.clear();
        map.clear();

        prop_assert!(map.is_empty());
        prop_assert_eq!(map.capacity(), capacity);
        prop_assert_eq!(map.empty_buckets(), capacity);
        for (key, _) in pairs {
            prop_assert!(!map.contains_key(key));
        }
        Ok(())
    }

    /// Open addressing may only cross 0.5 by the entry just inserted
    fn open_addressing_bound<H: Fn(&str) -> u64>(map: &OpenAddressingMap<u32, H>) -> bool {
        map.len().saturating_sub(1).saturating_mul(2) < map.capacity()
    }

    fn chained_bound<H: Fn(&str) -> u64>(map: &ChainedMap<u32, H>) -> bool {
        map.len() <= map.capacity()
    }

    fn pairs_strategy() -> impl Strategy<Value = Vec<(String, u32)>> {
        prop::collection::vec(("[a-z]{0,4}", any::<u32>()), 0..120)
    }

    proptest! {
        #[test]
        fn open_addressing_matches_model(ops in prop::collection::vec(op_strategy(), 0..200)) {
            check_against_model(&mut OpenAddressingMap::with_capacity(2), &ops, open_addressing_bound)?;
        }

        #[test]
        fn open_addressing_matches_model_under_collisions(ops in prop::collection::vec(op_strategy(), 0..200)) {
            let mut map = OpenAddressingMap::with_hasher(11, hash::char_sum);
            check_against_model(&mut map, &ops, open_addressing_bound)?;
        }

        #[test]
        fn chained_matches_model(ops in prop::collection::vec(op_strategy(), 0..200)) {
            check_against_model(&mut ChainedMap::with_capacity(2), &ops, chained_bound)?;
        }

        #[test]
        fn chained_matches_model_under_collisions(ops in prop::collection::vec(op_strategy(), 0..200)) {
            let mut map = ChainedMap::with_hasher(11, hash::char_sum);
            check_against_model(&mut map, &ops, chained_bound)?;
        }

        #[test]
        fn open_addressing_resize_preserves_content(pairs in pairs_strategy(), target in 0usize..300) {
            check_resize_preserves(&mut OpenAddressingMap::with_capacity(11), &pairs, target)?;
        }

        #[test]
        fn chained_resize_preserves_content(pairs in pairs_strategy(), target in 0usize..300) {
            check_resize_preserves(&mut ChainedMap::with_capacity(11), &pairs, target)?;
        }

        #[test]
        fn open_addressing_clear_is_idempotent(pairs in pairs_strategy()) {
            check_clear(&mut OpenAddressingMap::with_capacity(11), &pairs)?;
        }

        #[test]
        fn chained_clear_is_idempotent(pairs in pairs_strategy()) {
            check_clear(&mut ChainedMap::with_capacity(11), &pairs)?;
        }
    }

    #[test]
    fn test_keys_and_values() {
        let mut map: Box<dyn StringMap<i32>> = Box::new(ChainedMap::new());
        map.put("a".to_string(), 1);
        map.put("b".to_string(), 2);
        map.put("c".to_string(), 3);

        let mut keys = map.keys();
        keys.sort_unstable();
        let mut values = map.values();
        values.sort_unstable();

        assert_eq!(keys, vec!["a", "b", "c"]);
        assert_eq!(values, vec![&1, &2, &3]);
    }

    /// Keys listed through the contract when the values borrow from the caller
    fn sorted_keys<'a, V, M: StringMap<V>>(map: &'a M) -> Vec<&'a str>
    where
        V: 'a,
    {
        let mut keys = map.keys();
        keys.sort_unstable();
        keys
    }

    #[test]
    fn test_keys_with_borrowed_values() {
        let words = ["one".to_string(), "two".to_string()];
        let mut open: OpenAddressingMap<&String> = OpenAddressingMap::new();
        let mut chained: ChainedMap<&String> = ChainedMap::new();
        for word in &words {
            open.put(word.clone(), word);
            chained.put(word.clone(), word);
        }

        assert_eq!(sorted_keys(&open), vec!["one", "two"]);
        assert_eq!(sorted_keys(&chained), vec!["one", "two"]);
    }

    #[test]
    fn test_update_keeps_single_entry() {
        let mut map: Box<dyn StringMap<i32>> = Box::new(OpenAddressingMap::with_capacity(11));
        map.put("a".to_string(), 1);
        map.put("b".to_string(), 2);
        map.put("a".to_string(), 3);

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("a"), Some(&3));
        assert!(map.contains_key("b"));
        assert!((map.load_factor() - 2.0 / 11.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_resize_asymmetry() {
        let mut open: OpenAddressingMap<i32> = OpenAddressingMap::with_capacity(11);
        let mut chained: ChainedMap<i32> = ChainedMap::with_capacity(11);
        for (key, value) in [("a", 0), ("b", 1), ("c", 2), ("d", 3)] {
            open.put(key, value);
            chained.put(key, value);
        }

        StringMap::resize(&mut open, 3);
        StringMap::resize(&mut chained, 3);

        assert_eq!(open.capacity(), 11);
        assert_ne!(chained.capacity(), 11);
        assert_eq!(open.len(), 4);
        assert_eq!(chained.len(), 4);
    }
}
