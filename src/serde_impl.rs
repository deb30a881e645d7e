//! Encoding as a flat sequence `[k1, v1, k2, v2, ...]`.
//!
//! A sequence rather than a map keeps the order in every format and allows keys that formats
//! cannot use as map keys.

use crate::{Error, OrderedMap, OrderedMapView};
use log::debug;
use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

/// Upper bound on the capacity preallocated from an untrusted length hint.
const MAX_PREALLOCATED_ENTRIES: usize = 4096;

fn serialize_pairs<'a, K, V, I, S>(len: usize, pairs: I, serializer: S) -> Result<S::Ok, S::Error>
where
    K: Serialize + 'a,
    V: Serialize + 'a,
    I: Iterator<Item = (&'a K, &'a V)>,
    S: Serializer,
{
    let mut seq = serializer.serialize_seq(Some(len * 2))?;
    for (key, value) in pairs {
        seq.serialize_element(key)?;
        seq.serialize_element(value)?;
    }
    seq.end()
}

impl<K, V> Serialize for OrderedMap<K, V>
where
    K: Serialize + Eq + Hash,
    V: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serialize_pairs(self.len(), self.iter(), serializer)
    }
}

impl<K, V> Serialize for OrderedMapView<'_, K, V>
where
    K: Serialize + Eq + Hash,
    V: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serialize_pairs(self.len(), self.iter(), serializer)
    }
}

struct OrderedMapVisitor<K, V> {
    marker: PhantomData<fn() -> OrderedMap<K, V>>,
}

impl<'de, K, V> Visitor<'de> for OrderedMapVisitor<K, V>
where
    K: Deserialize<'de> + Eq + Hash + Clone,
    V: Deserialize<'de>,
{
    type Value = OrderedMap<K, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence of alternating keys and values")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let capacity = (seq.size_hint().unwrap_or(0) / 2).min(MAX_PREALLOCATED_ENTRIES);
        let mut map = OrderedMap::with_capacity(capacity);
        while let Some(key) = seq.next_element::<K>()? {
            let Some(value) = seq.next_element::<V>()? else {
                debug!("rejecting encoded map: key {} has no value", map.len());
                return Err(de::Error::custom(Error::MissingValue));
            };
            if let Err(err) = map.try_insert(key, value) {
                debug!("rejecting encoded map: key {} repeats an earlier key", map.len());
                return Err(de::Error::custom(err));
            }
        }
        Ok(map)
    }
}

impl<'de, K, V> Deserialize<'de> for OrderedMap<K, V>
where
    K: Deserialize<'de> + Eq + Hash + Clone,
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(OrderedMapVisitor {
            marker: PhantomData,
        })
    }
}
