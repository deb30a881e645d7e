use std::collections::hash_map::{
    Entry as StdEntry, OccupiedEntry as StdOccupiedEntry, VacantEntry as StdVacantEntry,
};
use std::mem;

/// A view into a single key of an [`OrderedMap`](crate::OrderedMap), either present or absent.
pub enum Entry<'a, K, V> {
    Occupied(OccupiedEntry<'a, K, V>),
    Vacant(VacantEntry<'a, K, V>),
}

pub struct OccupiedEntry<'a, K, V> {
    entry: StdOccupiedEntry<'a, K, V>,
    keys: &'a mut Vec<K>,
}

pub struct VacantEntry<'a, K, V> {
    entry: StdVacantEntry<'a, K, V>,
    keys: &'a mut Vec<K>,
}

impl<'a, K, V> Entry<'a, K, V> {
    pub(crate) fn new(entry: StdEntry<'a, K, V>, keys: &'a mut Vec<K>) -> Self {
        match entry {
            StdEntry::Occupied(entry) => Entry::Occupied(OccupiedEntry { entry, keys }),
            StdEntry::Vacant(entry) => Entry::Vacant(VacantEntry { entry, keys }),
        }
    }

    pub fn key(&self) -> &K {
        match self {
            Entry::Occupied(occ) => occ.key(),
            Entry::Vacant(vac) => vac.key(),
        }
    }
}

impl<'a, K: Clone, V> Entry<'a, K, V> {
    pub fn or_insert(self, default: V) -> &'a mut V {
        self.or_insert_with(|| default)
    }

    pub fn or_insert_with<F: FnOnce() -> V>(self, default: F) -> &'a mut V {
        match self {
            Entry::Occupied(occ) => occ.into_mut(),
            Entry::Vacant(vac) => vac.insert(default()),
        }
    }

    pub fn or_insert_default(self) -> &'a mut V
    where
        V: Default,
    {
        self.or_insert_with(V::default)
    }

    /// Runs `f` on the value if the key is present; vacant entries pass through unchanged.
    pub fn and_modify<F: FnOnce(&mut V)>(self, f: F) -> Self {
        match self {
            Entry::Occupied(mut occ) => {
                f(occ.get_mut());
                Entry::Occupied(occ)
            }
            Entry::Vacant(vac) => Entry::Vacant(vac),
        }
    }
}

impl<'a, K, V> OccupiedEntry<'a, K, V> {
    pub fn key(&self) -> &K {
        self.entry.key()
    }

    /// The entry's current position. Linear in the number of entries.
    pub fn index(&self) -> usize
    where
        K: Eq,
    {
        let Self { entry, keys } = self;
        keys.iter().position(|k| k == entry.key()).unwrap()
    }

    pub fn get(&self) -> &V {
        self.entry.get()
    }

    pub fn get_mut(&mut self) -> &mut V {
        self.entry.get_mut()
    }

    pub fn into_mut(self) -> &'a mut V {
        self.entry.into_mut()
    }

    /// Replaces the value, leaving the entry where it is.
    pub fn insert(&mut self, value: V) -> V {
        mem::replace(self.entry.get_mut(), value)
    }

    pub fn remove_entry(self) -> (K, V)
    where
        K: Eq,
    {
        let index = self.index();
        let Self { entry, keys } = self;
        keys.remove(index);
        entry.remove_entry()
    }

    pub fn remove(self) -> V
    where
        K: Eq,
    {
        self.remove_entry().1
    }
}

impl<'a, K, V> VacantEntry<'a, K, V> {
    pub fn key(&self) -> &K {
        self.entry.key()
    }

    pub fn into_key(self) -> K {
        self.entry.into_key()
    }

    /// The position the entry will take when inserted.
    pub fn index(&self) -> usize {
        self.keys.len()
    }

    /// Insert a new entry into the map appended to the end.
    pub fn insert(self, value: V) -> &'a mut V
    where
        K: Clone,
    {
        let Self { entry, keys } = self;
        keys.push(entry.key().clone());
        entry.insert(value)
    }
}
