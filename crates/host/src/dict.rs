//! Host dict type and the mapping protocols built on it.
//!
//! Dicts iterate in insertion order. The free functions in this module are
//! the construction and enumeration protocols the conversion core consumes.

use std::cell::RefCell;

use indexmap::IndexMap;

use crate::error::{raise, HostErrorKind, HostResult};
use crate::hash::HashKey;
use crate::object::{Object, ObjectKind};

#[derive(Default)]
pub struct DictObject {
    entries: IndexMap<HashKey, (Object, Object)>,
}

impl DictObject {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &Object) -> HostResult<Option<Object>> {
        let hash = HashKey::of(key)?;
        Ok(self.entries.get(&hash).map(|(_, value)| value.clone()))
    }

    pub fn contains_key(&self, key: &Object) -> HostResult<bool> {
        Ok(self.entries.contains_key(&HashKey::of(key)?))
    }

    /// Iterates `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Object, &Object)> + '_ {
        self.entries.values().map(|(key, value)| (key, value))
    }

    /// Stores `value` under `key`. An existing entry keeps its key object
    /// and position; the replaced value is returned.
    fn insert(&mut self, hash: HashKey, key: Object, value: Object) -> Option<Object> {
        match self.entries.get_mut(&hash) {
            Some(slot) => Some(std::mem::replace(&mut slot.1, value)),
            None => {
                self.entries.insert(hash, (key, value));
                None
            }
        }
    }
}

fn dict_cell<'a>(obj: &'a Object, action: &str) -> HostResult<&'a RefCell<DictObject>> {
    match obj.kind() {
        ObjectKind::Dict(cell) => Ok(cell),
        _ => Err(raise(
            HostErrorKind::TypeError,
            format!("'{}' object {action}", obj.type_name()),
        )),
    }
}

/// Allocates a new, empty dict.
pub fn new() -> HostResult<Object> {
    Object::alloc(ObjectKind::Dict(RefCell::new(DictObject::default())))
}

/// `dict[key] = value`. Fails on unhashable keys and non-dict targets.
pub fn set_item(dict: &Object, key: Object, value: Object) -> HostResult<()> {
    let cell = dict_cell(dict, "does not support item assignment")?;
    let hash = HashKey::of(&key)?;
    let previous = cell.borrow_mut().insert(hash, key, value);
    // Released outside the borrow in case the old value refers back to `dict`.
    drop(previous);
    Ok(())
}

/// `dict.get(key)`.
pub fn get_item(dict: &Object, key: &Object) -> HostResult<Option<Object>> {
    let cell = dict_cell(dict, "is not subscriptable")?;
    let found = cell.borrow().get(key)?;
    Ok(found)
}

/// Snapshot of a mapping's `(key, value)` pairs as a new list of 2-tuples,
/// in iteration order. Raises `TypeError` for objects that are not mappings.
pub fn items(mapping: &Object) -> HostResult<Object> {
    let cell = dict_cell(mapping, "is not a mapping")?;
    let pairs: Vec<(Object, Object)> = cell
        .borrow()
        .iter()
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    let mut tuples = Vec::with_capacity(pairs.len());
    for (key, value) in pairs {
        tuples.push(Object::tuple(vec![key, value])?);
    }
    Object::list(tuples)
}
