use crate::OrderedMap;
use log::trace;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;

/// Stable sort of `keys` by a comparator over whole entries.
pub(crate) fn sort_keys_by<K, V, F>(keys: &mut [K], map: &HashMap<K, V>, mut cmp: F)
where
    K: Eq + Hash,
    F: FnMut(&K, &V, &K, &V) -> Ordering,
{
    keys.sort_by(|k1, k2| cmp(k1, &map[k1], k2, &map[k2]));
}

/// Moves keys whose entries fail `pred` before keys whose entries satisfy it and returns the
/// number of failing entries. Scans inward from both ends, swapping misplaced pairs, so the order
/// within each group is not preserved.
pub(crate) fn partition_keys<K, V, F>(keys: &mut [K], map: &HashMap<K, V>, mut pred: F) -> usize
where
    K: Eq + Hash,
    F: FnMut(&K, &V) -> bool,
{
    let mut satisfies = |key: &K| pred(key, &map[key]);
    let mut lo = 0;
    let mut hi = keys.len();
    loop {
        while lo < hi && !satisfies(&keys[lo]) {
            lo += 1;
        }
        if lo == hi {
            return lo;
        }
        hi -= 1;
        while lo < hi && satisfies(&keys[hi]) {
            hi -= 1;
        }
        if lo == hi {
            return lo;
        }
        keys.swap(lo, hi);
        lo += 1;
    }
}

impl<K, V> OrderedMap<K, V> {
    /// Exchanges the entries at `a` and `b`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn swap_indices(&mut self, a: usize, b: usize) {
        self.keys.swap(a, b);
    }

    pub fn reverse(&mut self) {
        self.keys.reverse();
    }

    /// Moves the entry at `from` so that it ends up at `to`, shifting the entries in between by
    /// one.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn move_index(&mut self, from: usize, to: usize) {
        let len = self.len();
        assert!(
            from < len && to < len,
            "move_index out of bounds: from {from}, to {to}, len {len}"
        );
        trace!("moving entry from index {from} to {to}");
        if from < to {
            self.keys[from..=to].rotate_left(1);
        } else {
            self.keys[to..=from].rotate_right(1);
        }
    }
}

impl<K: Eq + Hash, V> OrderedMap<K, V> {
    /// Reorders the entries so that every entry failing `pred` precedes every entry satisfying
    /// it, and returns the index of the first satisfying entry (`len()` if there is none).
    ///
    /// The relative order inside each group is unspecified.
    pub fn partition<F: FnMut(&K, &V) -> bool>(&mut self, pred: F) -> usize {
        let Self { keys, map } = self;
        partition_keys(keys, map, pred)
    }

    /// Sorts the entries in place with a comparator over `(key, value, other_key, other_value)`.
    ///
    /// The sort is stable: entries that compare equal keep their relative order.
    pub fn sort_by<F>(&mut self, cmp: F)
    where
        F: FnMut(&K, &V, &K, &V) -> Ordering,
    {
        let Self { keys, map } = self;
        sort_keys_by(keys, map, cmp);
    }

    pub fn sort_by_key<T: Ord, F: FnMut(&K, &V) -> T>(&mut self, mut f: F) {
        self.sort_by(|k1, v1, k2, v2| f(k1, v1).cmp(&f(k2, v2)));
    }

    /// Sorts the entries by key.
    pub fn sort_keys(&mut self)
    where
        K: Ord,
    {
        self.keys.sort();
    }

    /// Returns a sorted copy, leaving `self` untouched.
    pub fn sorted_by<F>(&self, cmp: F) -> Self
    where
        K: Clone,
        V: Clone,
        F: FnMut(&K, &V, &K, &V) -> Ordering,
    {
        let mut sorted = self.clone();
        sorted.sort_by(cmp);
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::partition_keys;
    use std::collections::HashMap;

    fn partitioned(keys: &[&'static str], pred: fn(&i32) -> bool) -> (Vec<&'static str>, usize) {
        let map: HashMap<_, _> = keys.iter().copied().zip(1..).collect();
        let mut keys = keys.to_vec();
        let pivot = partition_keys(&mut keys, &map, |_, v| pred(v));
        (keys, pivot)
    }

    #[test]
    fn partition_swaps_misplaced_pairs() {
        let (keys, pivot) = partitioned(&["a", "b", "c", "d"], |v| v % 2 == 0);
        assert_eq!(keys, vec!["a", "c", "b", "d"]);
        assert_eq!(pivot, 2);
    }

    #[test]
    fn partition_when_nothing_satisfies() {
        let (keys, pivot) = partitioned(&["a", "b", "c"], |_| false);
        assert_eq!(keys, vec!["a", "b", "c"]);
        assert_eq!(pivot, 3);
    }

    #[test]
    fn partition_when_everything_satisfies() {
        let (keys, pivot) = partitioned(&["a", "b", "c"], |_| true);
        assert_eq!(keys, vec!["a", "b", "c"]);
        assert_eq!(pivot, 0);
    }

    #[test]
    fn partition_of_empty_slice() {
        let (keys, pivot) = partitioned(&[], |_| true);
        assert!(keys.is_empty());
        assert_eq!(pivot, 0);
    }

    #[test]
    fn partition_groups_every_entry() {
        let (keys, pivot) = partitioned(&["a", "b", "c", "d", "e", "f", "g"], |v| *v > 4);
        assert_eq!(pivot, 4);
        let map: HashMap<_, _> = ["a", "b", "c", "d", "e", "f", "g"].into_iter().zip(1..).collect();
        assert!(keys[..pivot].iter().all(|k| map[k] <= 4));
        assert!(keys[pivot..].iter().all(|k| map[k] > 4));
    }
}
