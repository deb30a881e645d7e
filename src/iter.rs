use std::collections::HashMap;
use std::hash::Hash;
use std::iter::FusedIterator;
use std::slice;
use std::vec;

/// Borrowing iterator over `(&K, &V)` pairs in order.
///
/// Walks the key order and looks each value up in the hash map, so it also serves views, which
/// hand it a sub-slice of the keys.
pub struct Iter<'a, K, V> {
    keys: slice::Iter<'a, K>,
    map: &'a HashMap<K, V>,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(keys: &'a [K], map: &'a HashMap<K, V>) -> Self {
        Self {
            keys: keys.iter(),
            map,
        }
    }
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            keys: self.keys.clone(),
            map: self.map,
        }
    }
}

impl<'a, K: Eq + Hash, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let map = self.map;
        let key = self.keys.next()?;
        Some((key, &map[key]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

impl<K: Eq + Hash, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let map = self.map;
        let key = self.keys.next_back()?;
        Some((key, &map[key]))
    }
}

impl<K: Eq + Hash, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K: Eq + Hash, V> FusedIterator for Iter<'_, K, V> {}

/// Owning iterator over `(K, V)` pairs in order.
pub struct IntoIter<K, V> {
    keys: vec::IntoIter<K>,
    map: HashMap<K, V>,
}

impl<K, V> IntoIter<K, V> {
    pub(crate) fn new(keys: Vec<K>, map: HashMap<K, V>) -> Self {
        Self {
            keys: keys.into_iter(),
            map,
        }
    }
}

impl<K: Eq + Hash, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.keys.next()?;
        let (key, value) = self.map.remove_entry(&key).unwrap();
        Some((key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

impl<K: Eq + Hash, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let key = self.keys.next_back()?;
        let (key, value) = self.map.remove_entry(&key).unwrap();
        Some((key, value))
    }
}

impl<K: Eq + Hash, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K: Eq + Hash, V> FusedIterator for IntoIter<K, V> {}
