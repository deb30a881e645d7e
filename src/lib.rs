//! A hash map whose entries also form an explicitly ordered, index-addressable sequence.
//!
//! [`OrderedMap`] answers key lookups in O(1) like a [`HashMap`], and also addresses every entry
//! by a zero-based position like a [`Vec`]. Key-based insertion never reorders existing entries;
//! index-based operations, sorting and the other reordering methods move entries explicitly.

mod display;
mod entry;
mod error;
mod iter;
mod reorder;
#[cfg(feature = "serde")]
mod serde_impl;
mod transform;
mod view;

pub use entry::{Entry, OccupiedEntry, VacantEntry};
pub use error::Error;
pub use iter::{IntoIter, Iter};
pub use view::{OrderedMapView, OrderedMapViewMut};

use derive_where::derive_where;
use log::trace;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::mem;
use std::ops::{Range, RangeBounds};

/// An ordered hash map with positional access.
///
/// The map owns two structures that are kept in lock step by every public method: a `Vec<K>`
/// holding the keys in order, and a `HashMap<K, V>` holding the values. The position of a key in
/// the vector is the entry's index. Both structures always hold exactly the same set of keys, and
/// the vector never holds a key twice.
///
/// Inserting with [`insert`](Self::insert) appends new keys at the end and replaces values of
/// existing keys in place. Positional insertion ([`insert_at`](Self::insert_at)) and replacement
/// ([`update_at`](Self::update_at)) refuse keys that already live elsewhere in the map and report
/// [`Error::DuplicateKey`] instead; [`insert_relocating`](Self::insert_relocating) and
/// [`move_index`](Self::move_index) exist for callers that want an entry moved.
///
/// Key removal has to find the key's position and shift the following keys down, so
/// [`remove`](Self::remove) and [`index_of`](Self::index_of) are O(n). Lookups are O(1) on
/// average.
///
/// Key-based and index-based accessors have distinct names (`get` versus `get_index` / `at`), so
/// an `OrderedMap<usize, V>` is never ambiguous.
#[derive_where(Default)]
#[derive_where(Clone; K: Clone, V: Clone)]
pub struct OrderedMap<K, V> {
    keys: Vec<K>,
    map: HashMap<K, V>,
}

impl<K, V> OrderedMap<K, V> {
    pub fn new() -> Self {
        Self {
            keys: Vec::new(),
            map: HashMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            keys: Vec::with_capacity(capacity),
            map: HashMap::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        let Self { keys, map } = self;
        debug_assert_eq!(keys.len(), map.len());
        keys.len()
    }

    pub fn is_empty(&self) -> bool {
        let Self { keys, map } = self;
        debug_assert_eq!(keys.is_empty(), map.is_empty());
        keys.is_empty()
    }

    /// The number of entries the map can hold without reallocating either structure.
    pub fn capacity(&self) -> usize {
        self.keys.capacity().min(self.map.capacity())
    }

    /// The keys in order, as a slice.
    pub fn keys_slice(&self) -> &[K] {
        &self.keys
    }

    /// Returns an iterator over keys in order.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator {
        self.keys.iter()
    }

    /// Removes every entry, keeping the allocated capacity.
    pub fn clear(&mut self) {
        self.remove_all(true);
    }

    /// Removes every entry. With `keep_capacity` unset both backing allocations are released.
    pub fn remove_all(&mut self, keep_capacity: bool) {
        let Self { keys, map } = self;
        if keep_capacity {
            keys.clear();
            map.clear();
        } else {
            *keys = Vec::new();
            *map = HashMap::new();
        }
    }

    /// Whether an entry could be inserted at `index`; `len()` itself means append.
    pub fn can_insert_at(&self, index: usize) -> bool {
        index <= self.len()
    }

    pub(crate) fn resolve_range<R: RangeBounds<usize>>(&self, range: R) -> Range<usize> {
        let len = self.len();
        match view::simplify_range(range, len) {
            Some(range) => range,
            None => panic!("range out of bounds for OrderedMap of length {len}"),
        }
    }
}

impl<K: Eq + Hash, V> OrderedMap<K, V> {
    /// Inserts a key-value pair.
    /// - If the key is new: appends it to the end; returns `None`.
    /// - If the key exists: replaces the value in place; returns `Some(old_v)`.
    pub fn insert(&mut self, key: K, value: V) -> Option<V>
    where
        K: Clone,
    {
        match self.entry(key) {
            Entry::Occupied(mut occupied_entry) => Some(occupied_entry.insert(value)),
            Entry::Vacant(vacant_entry) => {
                vacant_entry.insert(value);
                None
            }
        }
    }

    /// Assigns an optional value to `key`: `Some` behaves like [`insert`](Self::insert), `None`
    /// removes the entry if there is one. Returns the previous value either way.
    pub fn set(&mut self, key: K, value: Option<V>) -> Option<V>
    where
        K: Clone,
    {
        match value {
            Some(value) => self.insert(key, value),
            None => self.remove(&key),
        }
    }

    /// Appends a new entry, failing if `key` is already present.
    pub fn try_insert(&mut self, key: K, value: V) -> Result<(), Error>
    where
        K: Clone,
    {
        let len = self.len();
        self.insert_at(len, key, value)
    }

    pub fn get<Q: Eq + Hash + ?Sized>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
    {
        self.map.get(key)
    }

    pub fn get_mut<Q: Eq + Hash + ?Sized>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
    {
        self.map.get_mut(key)
    }

    pub fn get_key_value<Q: Eq + Hash + ?Sized>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
    {
        self.map.get_key_value(key)
    }

    pub fn contains_key<Q: Eq + Hash + ?Sized>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
    {
        self.map.contains_key(key)
    }

    /// Returns the position of `key`. This is a linear scan of the key order.
    pub fn index_of<Q: Eq + Hash + ?Sized>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
    {
        if !self.map.contains_key(key) {
            return None;
        }
        let position = self.keys.iter().position(|k| k.borrow() == key);
        debug_assert!(position.is_some());
        position
    }

    /// Removes `key` if present and returns its value. Later entries shift down by one.
    pub fn remove<Q: Eq + Hash + ?Sized>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    pub fn remove_entry<Q: Eq + Hash + ?Sized>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
    {
        let Self { keys, map } = self;
        let (k_stored, v) = map.remove_entry(key)?;
        let position = keys.iter().position(|k| k.borrow() == key).unwrap();
        keys.remove(position);
        Some((k_stored, v))
    }

    /// Returns the entry at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`. Use [`get_index`](Self::get_index) when the index may be
    /// invalid.
    pub fn at(&self, index: usize) -> (&K, &V) {
        match self.get_index(index) {
            Some(entry) => entry,
            None => panic!(
                "index out of bounds: the len is {} but the index is {}",
                self.len(),
                index
            ),
        }
    }

    pub fn get_index(&self, index: usize) -> Option<(&K, &V)> {
        let Self { keys, map } = self;
        let key = keys.get(index)?;
        Some((key, &map[key]))
    }

    pub fn get_index_mut(&mut self, index: usize) -> Option<(&K, &mut V)> {
        let Self { keys, map } = self;
        let key = keys.get(index)?;
        let value = map.get_mut(key).unwrap();
        Some((key, value))
    }

    pub fn first(&self) -> Option<(&K, &V)> {
        self.get_index(0)
    }

    pub fn last(&self) -> Option<(&K, &V)> {
        self.get_index(self.len().checked_sub(1)?)
    }

    /// Whether `key` could be inserted anywhere without a duplicate-key failure.
    pub fn can_insert_key<Q: Eq + Hash + ?Sized>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
    {
        !self.contains_key(key)
    }

    /// Whether [`update_at`](Self::update_at) would accept `key` at `index`.
    pub fn can_update_at<Q: Eq + Hash + ?Sized>(&self, key: &Q, index: usize) -> bool
    where
        K: Borrow<Q>,
    {
        match self.keys.get(index) {
            Some(current) => current.borrow() == key || !self.contains_key(key),
            None => false,
        }
    }

    /// Inserts a new entry at `index`, shifting the entries at and after it up by one.
    ///
    /// Fails with [`Error::DuplicateKey`] if `key` is already present anywhere in the map, in which
    /// case the map is left untouched.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    pub fn insert_at(&mut self, index: usize, key: K, value: V) -> Result<(), Error>
    where
        K: Clone,
    {
        let len = self.len();
        assert!(
            index <= len,
            "insertion index (is {index}) should be <= len (is {len})"
        );
        let Self { keys, map } = self;
        if map.contains_key(&key) {
            return Err(Error::DuplicateKey);
        }
        keys.insert(index, key.clone());
        map.insert(key, value);
        Ok(())
    }

    /// Inserts an entry at `index`, first taking `key` out of its current position if it is
    /// already present.
    ///
    /// When the old position precedes `index`, the target shifts down by one to account for the
    /// removal, so the entry lands where `index` pointed before the call. Returns the value the key
    /// had before, if any.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    pub fn insert_relocating(&mut self, index: usize, key: K, value: V) -> Option<V>
    where
        K: Clone,
    {
        let len = self.len();
        assert!(
            index <= len,
            "insertion index (is {index}) should be <= len (is {len})"
        );
        let mut target = index;
        let previous = match self.index_of(&key) {
            Some(old) => {
                let (_, old_value) = self.remove_at(old).unwrap();
                if old < target {
                    target -= 1;
                }
                trace!("relocating entry from index {old} to {target}");
                Some(old_value)
            }
            None => None,
        };
        let Self { keys, map } = self;
        keys.insert(target, key.clone());
        map.insert(key, value);
        previous
    }

    /// Replaces the entry at `index` and returns the entry that was there.
    ///
    /// If `key` equals the current key at `index` only the value changes. Otherwise `key` must not
    /// be present elsewhere in the map, or [`Error::DuplicateKey`] is returned and nothing changes.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn update_at(&mut self, index: usize, key: K, value: V) -> Result<(K, V), Error>
    where
        K: Clone,
    {
        let len = self.len();
        assert!(
            index < len,
            "index out of bounds: the len is {len} but the index is {index}"
        );
        let Self { keys, map } = self;
        if keys[index] == key {
            let old_value = mem::replace(map.get_mut(&key).unwrap(), value);
            return Ok((key, old_value));
        }
        if map.contains_key(&key) {
            return Err(Error::DuplicateKey);
        }
        let old_key = mem::replace(&mut keys[index], key.clone());
        let old_value = map.remove(&old_key).unwrap();
        map.insert(key, value);
        Ok((old_key, old_value))
    }

    /// Removes the entry at `index`, shifting later entries down by one. An invalid index is not
    /// an error here; it yields `None`.
    pub fn remove_at(&mut self, index: usize) -> Option<(K, V)> {
        let Self { keys, map } = self;
        if index >= keys.len() {
            return None;
        }
        let key = keys.remove(index);
        let value = map.remove(&key).unwrap();
        Some((key, value))
    }

    pub fn pop_first(&mut self) -> Option<(K, V)> {
        self.remove_at(0)
    }

    pub fn pop_last(&mut self) -> Option<(K, V)> {
        let Self { keys, map } = self;
        let key = keys.pop()?;
        let value = map.remove(&key).unwrap();
        Some((key, value))
    }

    /// # Panics
    ///
    /// Panics if the map is empty.
    pub fn remove_first(&mut self) -> (K, V) {
        self.pop_first()
            .expect("remove_first called on an empty OrderedMap")
    }

    /// # Panics
    ///
    /// Panics if the map is empty.
    pub fn remove_last(&mut self) -> (K, V) {
        self.pop_last()
            .expect("remove_last called on an empty OrderedMap")
    }

    /// Replaces the entries in `range` with `entries`, keeping their order.
    ///
    /// Incoming keys must be distinct from each other and from every key outside `range`; keys of
    /// the replaced entries may be reused. On [`Error::DuplicateKey`] nothing changes.
    ///
    /// # Panics
    ///
    /// Panics if `range` is out of bounds.
    pub fn replace_range<R, I>(&mut self, range: R, entries: I) -> Result<(), Error>
    where
        R: RangeBounds<usize>,
        I: IntoIterator<Item = (K, V)>,
        K: Clone,
    {
        let Range { start, end } = self.resolve_range(range);
        let incoming: Vec<(K, V)> = entries.into_iter().collect();
        let Self { keys, map } = self;
        {
            let replaced: std::collections::HashSet<&K> = keys[start..end].iter().collect();
            let mut seen = std::collections::HashSet::with_capacity(incoming.len());
            for (key, _) in &incoming {
                let collides = map.contains_key(key) && !replaced.contains(key);
                if !seen.insert(key) || collides {
                    return Err(Error::DuplicateKey);
                }
            }
        }
        for key in &keys[start..end] {
            map.remove(key);
        }
        let tail = keys.split_off(end);
        keys.truncate(start);
        keys.reserve(incoming.len() + tail.len());
        for (key, value) in incoming {
            keys.push(key.clone());
            map.insert(key, value);
        }
        keys.extend(tail);
        Ok(())
    }

    /// Iterator over `(&K, &V)` in order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.keys, &self.map)
    }

    /// Returns an iterator over values in order.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator {
        self.iter().map(|(_, v)| v)
    }

    /// Calls `f` on every entry in order, with mutable access to the value.
    pub fn for_each_mut<F: FnMut(&K, &mut V)>(&mut self, mut f: F) {
        let Self { keys, map } = self;
        for key in keys.iter() {
            f(key, map.get_mut(key).unwrap());
        }
    }

    /// A copy of the entries as a plain [`HashMap`], without the order.
    pub fn to_unordered_map(&self) -> HashMap<K, V>
    where
        K: Clone,
        V: Clone,
    {
        self.map.clone()
    }

    pub fn into_unordered_map(self) -> HashMap<K, V> {
        self.map
    }

    pub fn entry(&mut self, key: K) -> Entry<'_, K, V> {
        let Self { keys, map } = self;
        Entry::new(map.entry(key), keys)
    }

    pub fn reserve(&mut self, additional: usize) {
        let Self { keys, map } = self;
        keys.reserve(additional);
        map.reserve(additional);
    }

    pub fn shrink_to_fit(&mut self) {
        let Self { keys, map } = self;
        keys.shrink_to_fit();
        map.shrink_to_fit();
    }

    /// Shrinks both structures to at least `max(len, min_capacity)`. Never grows.
    pub fn shrink_to(&mut self, min_capacity: usize) {
        let Self { keys, map } = self;
        keys.shrink_to(min_capacity);
        map.shrink_to(min_capacity);
    }
}

impl<K: Eq + Hash, V: PartialEq> PartialEq for OrderedMap<K, V> {
    /// Two maps are equal when they hold equal entries at every position.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq + Hash, V: Eq> Eq for OrderedMap<K, V> {}

impl<'a, K: Eq + Hash, V> IntoIterator for &'a OrderedMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Eq + Hash, V> IntoIterator for OrderedMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        let Self { keys, map } = self;
        IntoIter::new(keys, map)
    }
}
