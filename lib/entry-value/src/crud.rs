//! Key-path navigation over nested objects.
//!
//! Reads and removals are conservative: a missing key or a non-object
//! intermediate value ends the walk without touching anything. Writes are
//! permissive: missing intermediates are created and non-object intermediates
//! are replaced by empty objects.
//!
//! All functions take the path relative to `map`; an empty path addresses
//! `map` itself and is handled by the caller.

use std::borrow::Borrow;

use crate::{ObjectMap, Value};

/// Returns the value at `path`, or `None` when any key is missing or an
/// intermediate value is not an object.
pub fn get<'a, K: Borrow<str>>(map: &'a ObjectMap, path: &[K]) -> Option<&'a Value> {
    let (last, parents) = path.split_last()?;
    let mut current = map;
    for key in parents {
        current = current.get(key.borrow())?.as_object()?;
    }
    current.get(last.borrow())
}

/// Mutable counterpart of [`get`]; never creates intermediates.
pub fn get_mut<'a, K: Borrow<str>>(
    map: &'a mut ObjectMap,
    path: &[K],
) -> Option<&'a mut Value> {
    let (last, parents) = path.split_last()?;
    let mut current = map;
    for key in parents {
        current = current.get_mut(key.borrow())?.as_object_mut()?;
    }
    current.get_mut(last.borrow())
}

/// Like [`get`], starting from an arbitrary value rather than an object.
pub fn get_value<'a, K: Borrow<str>>(value: &'a Value, path: &[K]) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(value);
    }
    get(value.as_object()?, path)
}

/// Returns the object at `path`, creating it and any missing intermediates.
///
/// Existing non-object values along the way, including the one at `path`
/// itself, are overwritten with empty objects.
pub fn nested_map_mut<'a, K: Borrow<str>>(map: &'a mut ObjectMap, path: &[K]) -> &'a mut ObjectMap {
    let mut current = map;
    for key in path {
        current = object_entry(current, key.borrow());
    }
    current
}

fn object_entry<'a>(map: &'a mut ObjectMap, key: &str) -> &'a mut ObjectMap {
    let slot = map
        .entry(key.to_owned())
        .or_insert_with(|| Value::Object(ObjectMap::new()));
    ensure_object(slot)
}

/// Returns `value` as an object, replacing it with an empty one first when it
/// holds anything else.
pub fn ensure_object(value: &mut Value) -> &mut ObjectMap {
    if !value.is_object() {
        *value = Value::Object(ObjectMap::new());
    }
    match value {
        Value::Object(map) => map,
        _ => unreachable!("value was just set to an object"),
    }
}

/// Writes `value` at `path`, returning the value previously stored there.
///
/// Returns `None` without writing when `path` is empty.
pub fn insert<K: Borrow<str>>(map: &mut ObjectMap, path: &[K], value: Value) -> Option<Value> {
    let (last, parents) = path.split_last()?;
    nested_map_mut(map, parents).insert(last.borrow().to_owned(), value)
}

/// Overlays every key of `values` onto the object at `path`.
pub fn merge<K: Borrow<str>>(map: &mut ObjectMap, path: &[K], values: ObjectMap) {
    nested_map_mut(map, path).extend(values);
}

/// Removes and returns the value at `path`.
///
/// Stops as soon as a key is missing or an intermediate value is not an
/// object; nothing is modified in that case.
pub fn remove<K: Borrow<str>>(map: &mut ObjectMap, path: &[K]) -> Option<Value> {
    let (last, parents) = path.split_last()?;
    let mut current = map;
    for key in parents {
        current = current.get_mut(key.borrow())?.as_object_mut()?;
    }
    current.remove(last.borrow())
}
