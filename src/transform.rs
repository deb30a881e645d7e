use crate::{Error, OrderedMap};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;

impl<K: Eq + Hash, V> OrderedMap<K, V> {
    /// Builds a map from pairs, failing on the first repeated key.
    pub fn try_from_unique_pairs<I>(pairs: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Clone,
    {
        let pairs = pairs.into_iter();
        let mut map = Self::with_capacity(pairs.size_hint().0);
        for (key, value) in pairs {
            map.try_insert(key, value)?;
        }
        Ok(map)
    }

    /// Builds a map from values, keying each one with `key_of`. Keys must be pairwise distinct.
    pub fn try_from_values_keyed_by<I, F>(values: I, mut key_of: F) -> Result<Self, Error>
    where
        I: IntoIterator<Item = V>,
        F: FnMut(&V) -> K,
        K: Clone,
    {
        Self::try_from_unique_pairs(values.into_iter().map(|value| (key_of(&value), value)))
    }

    /// Orders the entries of an unordered map with a comparator over
    /// `(key, value, other_key, other_value)`.
    pub fn from_unordered<F>(map: HashMap<K, V>, cmp: F) -> Self
    where
        K: Clone,
        F: FnMut(&K, &V, &K, &V) -> Ordering,
    {
        let keys = map.keys().cloned().collect();
        let mut ordered = Self { keys, map };
        ordered.sort_by(cmp);
        ordered
    }

    /// A new map with every value transformed; keys and order are kept.
    pub fn map_values<T, F>(&self, mut f: F) -> OrderedMap<K, T>
    where
        K: Clone,
        F: FnMut(&V) -> T,
    {
        let Self { keys, map } = self;
        OrderedMap {
            keys: keys.clone(),
            map: keys.iter().map(|k| (k.clone(), f(&map[k]))).collect(),
        }
    }

    /// Like [`map_values`](Self::map_values), dropping entries for which `f` returns `None`.
    pub fn compact_map_values<T, F>(&self, mut f: F) -> OrderedMap<K, T>
    where
        K: Clone,
        F: FnMut(&V) -> Option<T>,
    {
        let mut mapped = OrderedMap::with_capacity(self.len());
        for (key, value) in self {
            if let Some(value) = f(value) {
                mapped.keys.push(key.clone());
                mapped.map.insert(key.clone(), value);
            }
        }
        mapped
    }

    /// A new map with the entries satisfying `pred`, in their current order.
    pub fn filter<F>(&self, mut pred: F) -> Self
    where
        K: Clone,
        V: Clone,
        F: FnMut(&K, &V) -> bool,
    {
        let mut filtered = Self::new();
        for (key, value) in self {
            if pred(key, value) {
                filtered.keys.push(key.clone());
                filtered.map.insert(key.clone(), value.clone());
            }
        }
        filtered
    }

    /// Removes, in place, the entries not satisfying `pred`.
    pub fn retain<F: FnMut(&K, &V) -> bool>(&mut self, mut pred: F) {
        let Self { keys, map } = self;
        keys.retain(|key| {
            let keep = pred(key, &map[key]);
            if !keep {
                map.remove(key);
            }
            keep
        });
    }
}

impl<K: Eq + Hash + Clone, V> FromIterator<(K, V)> for OrderedMap<K, V> {
    /// # Panics
    ///
    /// Panics if a key occurs twice. Use [`OrderedMap::try_from_unique_pairs`] for untrusted input.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        match Self::try_from_unique_pairs(iter) {
            Ok(map) => map,
            Err(err) => panic!("cannot build an OrderedMap from pairs: {err}"),
        }
    }
}

impl<K: Eq + Hash + Clone, V, const N: usize> From<[(K, V); N]> for OrderedMap<K, V> {
    /// # Panics
    ///
    /// Panics if a key occurs twice.
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K: Eq + Hash + Clone, V> TryFrom<Vec<(K, V)>> for OrderedMap<K, V> {
    type Error = Error;

    fn try_from(pairs: Vec<(K, V)>) -> Result<Self, Self::Error> {
        Self::try_from_unique_pairs(pairs)
    }
}

impl<K: Eq + Hash + Clone, V> Extend<(K, V)> for OrderedMap<K, V> {
    /// Inserts every pair with [`OrderedMap::insert`] semantics: repeated keys overwrite values in
    /// place.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}
