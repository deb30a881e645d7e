use crate::{OrderedMap, OrderedMapView};
use std::fmt;
use std::hash::Hash;

/// Writes `[:]` for no pairs, otherwise `[` pairs separated by `, ` `]`.
fn write_pairs<I, F>(f: &mut fmt::Formatter<'_>, mut pairs: I, mut write_pair: F) -> fmt::Result
where
    I: Iterator,
    F: FnMut(&mut fmt::Formatter<'_>, I::Item) -> fmt::Result,
{
    let Some(first) = pairs.next() else {
        return f.write_str("[:]");
    };
    f.write_str("[")?;
    write_pair(f, first)?;
    for pair in pairs {
        f.write_str(", ")?;
        write_pair(f, pair)?;
    }
    f.write_str("]")
}

impl<K: fmt::Display + Eq + Hash, V: fmt::Display> fmt::Display for OrderedMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_pairs(f, self.iter(), |f, (k, v)| write!(f, "{k}: {v}"))
    }
}

impl<K: fmt::Debug + Eq + Hash, V: fmt::Debug> fmt::Debug for OrderedMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_pairs(f, self.iter(), |f, (k, v)| write!(f, "{k:?}: {v:?}"))
    }
}

impl<K: fmt::Display + Eq + Hash, V: fmt::Display> fmt::Display for OrderedMapView<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_pairs(f, self.iter(), |f, (k, v)| write!(f, "{k}: {v}"))
    }
}

impl<K: fmt::Debug + Eq + Hash, V: fmt::Debug> fmt::Debug for OrderedMapView<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_pairs(f, self.iter(), |f, (k, v)| write!(f, "{k:?}: {v:?}"))
    }
}
