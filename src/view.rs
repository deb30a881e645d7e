use crate::reorder::{partition_keys, sort_keys_by};
use crate::{Iter, OrderedMap};
use derive_where::derive_where;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;
use std::ops::{Bound, Range, RangeBounds};

/// Converts any range over positions into a concrete `start..end`, or `None` if it does not fit
/// inside `0..len`.
pub(crate) fn simplify_range<R: RangeBounds<usize>>(range: R, len: usize) -> Option<Range<usize>> {
    let start = match range.start_bound() {
        Bound::Included(&start) => start,
        Bound::Excluded(&start) => start.checked_add(1)?,
        Bound::Unbounded => 0,
    };
    let end = match range.end_bound() {
        Bound::Included(&end) => end.checked_add(1)?,
        Bound::Excluded(&end) => end,
        Bound::Unbounded => len,
    };
    (start <= end && end <= len).then_some(start..end)
}

/// A read-only view of the entries at positions `lower..upper` of an [`OrderedMap`].
///
/// Positions passed to and returned by a view are local: position `p` of the view is position
/// `lower + p` of the map. The view borrows the map, so the map cannot change underneath it and a
/// view's bounds never go stale.
#[derive_where(Clone, Copy)]
pub struct OrderedMapView<'a, K, V> {
    keys: &'a [K],
    map: &'a HashMap<K, V>,
    lower: usize,
}

/// A view of the entries at positions `lower..upper` of an [`OrderedMap`] that can reorder them.
///
/// Reordering only permutes entries inside the range. Values can be changed in place; keys can
/// neither be added nor removed through a view.
pub struct OrderedMapViewMut<'a, K, V> {
    keys: &'a mut [K],
    map: &'a mut HashMap<K, V>,
    lower: usize,
}

impl<K, V> OrderedMap<K, V> {
    /// A view of the entries in `range`.
    ///
    /// # Panics
    ///
    /// Panics if `range` is out of bounds.
    pub fn view<R: RangeBounds<usize>>(&self, range: R) -> OrderedMapView<'_, K, V> {
        let range = self.resolve_range(range);
        OrderedMapView {
            keys: &self.keys[range.clone()],
            map: &self.map,
            lower: range.start,
        }
    }

    pub fn get_view<R: RangeBounds<usize>>(&self, range: R) -> Option<OrderedMapView<'_, K, V>> {
        let range = simplify_range(range, self.len())?;
        Some(OrderedMapView {
            keys: &self.keys[range.clone()],
            map: &self.map,
            lower: range.start,
        })
    }

    /// A reordering view of the entries in `range`.
    ///
    /// # Panics
    ///
    /// Panics if `range` is out of bounds.
    pub fn view_mut<R: RangeBounds<usize>>(&mut self, range: R) -> OrderedMapViewMut<'_, K, V> {
        let range = self.resolve_range(range);
        let Self { keys, map } = self;
        OrderedMapViewMut {
            keys: &mut keys[range.clone()],
            map,
            lower: range.start,
        }
    }

    pub fn get_view_mut<R: RangeBounds<usize>>(
        &mut self,
        range: R,
    ) -> Option<OrderedMapViewMut<'_, K, V>> {
        let range = simplify_range(range, self.len())?;
        let Self { keys, map } = self;
        Some(OrderedMapViewMut {
            keys: &mut keys[range.clone()],
            map,
            lower: range.start,
        })
    }
}

impl<'a, K, V> OrderedMapView<'a, K, V> {
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The positions of the viewed entries in the underlying map.
    pub fn range(&self) -> Range<usize> {
        self.lower..self.lower + self.keys.len()
    }

    pub fn keys_slice(&self) -> &'a [K] {
        self.keys
    }

    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &'a K> + ExactSizeIterator {
        self.keys.iter()
    }

    /// A narrower view; `range` is relative to this view.
    ///
    /// # Panics
    ///
    /// Panics if `range` is out of bounds for this view.
    pub fn view<R: RangeBounds<usize>>(&self, range: R) -> OrderedMapView<'a, K, V> {
        let len = self.len();
        let range = match simplify_range(range, len) {
            Some(range) => range,
            None => panic!("range out of bounds for view of length {len}"),
        };
        let keys = self.keys;
        OrderedMapView {
            keys: &keys[range.clone()],
            map: self.map,
            lower: self.lower + range.start,
        }
    }
}

impl<'a, K: Eq + Hash, V> OrderedMapView<'a, K, V> {
    pub fn iter(&self) -> Iter<'a, K, V> {
        Iter::new(self.keys, self.map)
    }

    pub fn values(&self) -> impl DoubleEndedIterator<Item = &'a V> + ExactSizeIterator {
        self.iter().map(|(_, v)| v)
    }

    pub fn get_index(&self, index: usize) -> Option<(&'a K, &'a V)> {
        let map = self.map;
        let key = self.keys.get(index)?;
        Some((key, &map[key]))
    }

    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn at(&self, index: usize) -> (&'a K, &'a V) {
        match self.get_index(index) {
            Some(entry) => entry,
            None => panic!(
                "index out of bounds: the len is {} but the index is {}",
                self.len(),
                index
            ),
        }
    }

    pub fn first(&self) -> Option<(&'a K, &'a V)> {
        self.get_index(0)
    }

    pub fn last(&self) -> Option<(&'a K, &'a V)> {
        self.get_index(self.len().checked_sub(1)?)
    }

    /// The view-local position of `key`, if it lies inside the view.
    pub fn index_of<Q: Eq + Hash + ?Sized>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
    {
        if !self.map.contains_key(key) {
            return None;
        }
        self.keys.iter().position(|k| k.borrow() == key)
    }

    pub fn contains_key<Q: Eq + Hash + ?Sized>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
    {
        self.index_of(key).is_some()
    }

    /// The value for `key`, if the key lies inside the view.
    pub fn get<Q: Eq + Hash + ?Sized>(&self, key: &Q) -> Option<&'a V>
    where
        K: Borrow<Q>,
    {
        let map = self.map;
        self.index_of(key).map(|_| &map[key])
    }

    /// Copies the viewed entries into a new map.
    pub fn to_ordered_map(&self) -> OrderedMap<K, V>
    where
        K: Clone,
        V: Clone,
    {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

impl<'a, K: Eq + Hash, V> IntoIterator for OrderedMapView<'a, K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Eq + Hash, V: PartialEq> PartialEq for OrderedMapView<'_, K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<'a, K, V> OrderedMapViewMut<'a, K, V> {
    pub fn as_view(&self) -> OrderedMapView<'_, K, V> {
        OrderedMapView {
            keys: &*self.keys,
            map: &*self.map,
            lower: self.lower,
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn range(&self) -> Range<usize> {
        self.lower..self.lower + self.keys.len()
    }

    /// # Panics
    ///
    /// Panics if either index is out of bounds for this view.
    pub fn swap_indices(&mut self, a: usize, b: usize) {
        self.keys.swap(a, b);
    }

    pub fn reverse(&mut self) {
        self.keys.reverse();
    }
}

impl<'a, K: Eq + Hash, V> OrderedMapViewMut<'a, K, V> {
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&*self.keys, &*self.map)
    }

    pub fn get_index(&self, index: usize) -> Option<(&K, &V)> {
        let key = self.keys.get(index)?;
        Some((key, &self.map[key]))
    }

    pub fn get_index_mut(&mut self, index: usize) -> Option<(&K, &mut V)> {
        let key = self.keys.get(index)?;
        let value = self.map.get_mut(key).unwrap();
        Some((key, value))
    }

    /// Reorders the view so entries failing `pred` come first; see
    /// [`OrderedMap::partition`]. Returns the view-local index of the first entry satisfying it.
    pub fn partition<F: FnMut(&K, &V) -> bool>(&mut self, pred: F) -> usize {
        partition_keys(self.keys, &*self.map, pred)
    }

    /// Stable sort of the viewed entries.
    pub fn sort_by<F>(&mut self, cmp: F)
    where
        F: FnMut(&K, &V, &K, &V) -> Ordering,
    {
        sort_keys_by(self.keys, &*self.map, cmp);
    }

    pub fn sort_by_key<T: Ord, F: FnMut(&K, &V) -> T>(&mut self, mut f: F) {
        self.sort_by(|k1, v1, k2, v2| f(k1, v1).cmp(&f(k2, v2)));
    }
}
