//! Conversion between host dicts and native maps.
//!
//! Decoding snapshots the source's `(key, value)` pairs through the host
//! enumeration protocol, decodes each pair with the key and element casters
//! and stops at the first rejected pair. Encoding allocates a fresh host dict
//! and inserts one encoded pair per native entry, abandoning the dict on the
//! first failure.

use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};
use std::marker::PhantomData;

use dictcast_host::{dict, error, HostErrorKind, Object};
use indexmap::IndexMap;

use crate::caster::{Castable, TypeCaster};
use crate::cleanup::CleanupList;
use crate::descr::Descr;
use crate::error::CastError;
use crate::flags::CastFlags;
use crate::policy::RvPolicy;

/// Associative container with unique keys that a [`DictCaster`] fills and
/// reads.
pub trait NativeMap: Default {
    type Key;
    type Value;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&mut self);

    fn reserve(&mut self, _additional: usize) {}

    /// Inserts or replaces; the last write for a key wins.
    fn insert_entry(&mut self, key: Self::Key, value: Self::Value);

    fn entries<'a>(&'a self) -> impl Iterator<Item = (&'a Self::Key, &'a Self::Value)>
    where
        Self::Key: 'a,
        Self::Value: 'a;

    fn into_entries(self) -> impl Iterator<Item = (Self::Key, Self::Value)>;
}

impl<K: Eq + Hash, V, S: BuildHasher + Default> NativeMap for HashMap<K, V, S> {
    type Key = K;
    type Value = V;

    fn len(&self) -> usize {
        HashMap::len(self)
    }

    fn clear(&mut self) {
        HashMap::clear(self);
    }

    fn reserve(&mut self, additional: usize) {
        HashMap::reserve(self, additional);
    }

    fn insert_entry(&mut self, key: K, value: V) {
        self.insert(key, value);
    }

    fn entries<'a>(&'a self) -> impl Iterator<Item = (&'a K, &'a V)>
    where
        K: 'a,
        V: 'a,
    {
        self.iter()
    }

    fn into_entries(self) -> impl Iterator<Item = (K, V)> {
        self.into_iter()
    }
}

impl<K: Ord, V> NativeMap for BTreeMap<K, V> {
    type Key = K;
    type Value = V;

    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn clear(&mut self) {
        BTreeMap::clear(self);
    }

    fn insert_entry(&mut self, key: K, value: V) {
        self.insert(key, value);
    }

    fn entries<'a>(&'a self) -> impl Iterator<Item = (&'a K, &'a V)>
    where
        K: 'a,
        V: 'a,
    {
        self.iter()
    }

    fn into_entries(self) -> impl Iterator<Item = (K, V)> {
        self.into_iter()
    }
}

impl<K: Eq + Hash, V, S: BuildHasher + Default> NativeMap for IndexMap<K, V, S> {
    type Key = K;
    type Value = V;

    fn len(&self) -> usize {
        IndexMap::len(self)
    }

    fn clear(&mut self) {
        IndexMap::clear(self);
    }

    fn reserve(&mut self, additional: usize) {
        IndexMap::reserve(self, additional);
    }

    fn insert_entry(&mut self, key: K, value: V) {
        self.insert(key, value);
    }

    fn entries<'a>(&'a self) -> impl Iterator<Item = (&'a K, &'a V)>
    where
        K: 'a,
        V: 'a,
    {
        self.iter()
    }

    fn into_entries(self) -> impl Iterator<Item = (K, V)> {
        self.into_iter()
    }
}

/// Caster for the native map `M`, with `KC` converting keys and `VC`
/// converting elements. Renders as `dict[K, V]`.
pub struct DictCaster<M, KC, VC>(PhantomData<(M, KC, VC)>);

impl<M, KC, VC> DictCaster<M, KC, VC>
where
    M: NativeMap,
    KC: TypeCaster<Value = M::Key>,
    VC: TypeCaster<Value = M::Value>,
{
    /// Decodes `src` into `dest`, clearing it first.
    ///
    /// On `Err` the contents of `dest` are unspecified and must be discarded.
    /// Every failure is reported through the return value only: a host error
    /// raised while probing `src` is cleared before returning.
    pub fn load_into(
        dest: &mut M,
        src: &Object,
        flags: CastFlags,
        cleanup: &mut CleanupList,
    ) -> Result<(), CastError> {
        dest.clear();

        let items = match dict::items(src) {
            Ok(items) => items,
            Err(err) => {
                error::clear();
                tracing::trace!(source = src.type_name(), "dict decode: no item enumeration");
                return Err(match err.kind {
                    HostErrorKind::MemoryError => CastError::AllocationFailed,
                    _ => CastError::NotMappingLike,
                });
            }
        };
        // `items` and the borrow below are released on every return path.
        let Some(pairs) = items.as_list() else {
            return Err(CastError::NotMappingLike);
        };
        dest.reserve(pairs.len());

        for (index, pair) in pairs.iter().enumerate() {
            let Some([key, element]) = pair.as_tuple() else {
                return Err(CastError::NotMappingLike);
            };
            let key = KC::from_host(key, flags, cleanup).map_err(|err| {
                tracing::trace!(index, %err, "dict decode: key rejected");
                CastError::KeyDecodeFailed
            })?;
            let element = VC::from_host(element, flags, cleanup).map_err(|err| {
                tracing::trace!(index, %err, "dict decode: element rejected");
                CastError::ElementDecodeFailed
            })?;
            dest.insert_entry(key, element);
        }
        Ok(())
    }

    fn insert_pair(
        out: &Object,
        index: usize,
        key: Result<Object, CastError>,
        element: Result<Object, CastError>,
    ) -> Result<(), CastError> {
        let key = key.map_err(|err| {
            tracing::trace!(index, %err, "dict encode: key rejected");
            CastError::KeyEncodeFailed
        })?;
        let element = element.map_err(|err| {
            tracing::trace!(index, %err, "dict encode: element rejected");
            CastError::ElementEncodeFailed
        })?;
        dict::set_item(out, key, element).map_err(|err| {
            tracing::trace!(index, %err, "dict encode: insertion rejected");
            CastError::InsertionRejected
        })
    }

    fn new_dict() -> Result<Object, CastError> {
        dict::new().map_err(|_| {
            tracing::trace!("dict encode: allocation failed");
            CastError::AllocationFailed
        })
    }
}

impl<M, KC, VC> TypeCaster for DictCaster<M, KC, VC>
where
    M: NativeMap,
    KC: TypeCaster<Value = M::Key>,
    VC: TypeCaster<Value = M::Value>,
{
    type Value = M;

    fn descr() -> Descr {
        Descr::generic("dict", [KC::descr(), VC::descr()])
    }

    fn from_host(
        src: &Object,
        flags: CastFlags,
        cleanup: &mut CleanupList,
    ) -> Result<M, CastError> {
        let mut map = M::default();
        Self::load_into(&mut map, src, flags, cleanup)?;
        Ok(map)
    }

    /// Encodes every entry of `src`, in the map's own iteration order, with
    /// `policy` applied to keys and elements alike. A partially filled dict
    /// is dropped on failure, never returned.
    fn from_native(
        src: &M,
        policy: RvPolicy,
        cleanup: &mut CleanupList,
    ) -> Result<Object, CastError> {
        let out = Self::new_dict()?;
        for (index, (key, element)) in src.entries().enumerate() {
            let key = KC::from_native(key, policy, cleanup);
            let element = VC::from_native(element, policy, cleanup);
            Self::insert_pair(&out, index, key, element)?;
        }
        Ok(out)
    }

    fn from_native_owned(
        src: M,
        policy: RvPolicy,
        cleanup: &mut CleanupList,
    ) -> Result<Object, CastError> {
        let out = Self::new_dict()?;
        for (index, (key, element)) in src.into_entries().enumerate() {
            let key = KC::from_native_owned(key, policy, cleanup);
            let element = VC::from_native_owned(element, policy, cleanup);
            Self::insert_pair(&out, index, key, element)?;
        }
        Ok(out)
    }
}

impl<K, V, S> Castable for HashMap<K, V, S>
where
    K: Castable + Eq + Hash,
    V: Castable,
    S: BuildHasher + Default,
{
    type Caster = DictCaster<Self, K::Caster, V::Caster>;
}

impl<K: Castable + Ord, V: Castable> Castable for BTreeMap<K, V> {
    type Caster = DictCaster<Self, K::Caster, V::Caster>;
}

impl<K, V, S> Castable for IndexMap<K, V, S>
where
    K: Castable + Eq + Hash,
    V: Castable,
    S: BuildHasher + Default,
{
    type Caster = DictCaster<Self, K::Caster, V::Caster>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caster::CasterOf;
    use crate::casters::{IntCaster, StrCaster};
    use serde_json::json;

    type StrInt = HashMap<String, i64>;

    #[test]
    fn load_into_clears_destination_first() {
        let src = Object::from_json(&json!({"b": 2})).unwrap();
        let mut dest: StrInt = HashMap::from([("stale".to_string(), 9)]);
        let mut cleanup = CleanupList::new();
        DictCaster::<StrInt, StrCaster, IntCaster<i64>>::load_into(
            &mut dest,
            &src,
            CastFlags::NONE,
            &mut cleanup,
        )
        .unwrap();
        assert_eq!(dest, HashMap::from([("b".to_string(), 2)]));
    }

    #[test]
    fn key_failure_is_reported_before_element() {
        let src = dict::new().unwrap();
        dict::set_item(&src, Object::int(1).unwrap(), Object::str("x").unwrap()).unwrap();
        let mut cleanup = CleanupList::new();
        let got = <CasterOf<StrInt> as TypeCaster>::from_host(&src, CastFlags::NONE, &mut cleanup);
        assert_eq!(got, Err(CastError::KeyDecodeFailed));
    }

    #[test]
    fn descr_composes_key_and_element() {
        let descr = <CasterOf<BTreeMap<String, Vec<Option<i32>>>> as TypeCaster>::descr();
        assert_eq!(descr.to_string(), "dict[str, list[Optional[int]]]");
    }

    #[test]
    fn native_map_last_write_wins() {
        let mut map: IndexMap<i32, &str> = IndexMap::new();
        map.insert_entry(1, "a");
        map.insert_entry(2, "b");
        map.insert_entry(1, "c");
        assert_eq!(map.entries().collect::<Vec<_>>(), [(&1, &"c"), (&2, &"b")]);
    }
}
