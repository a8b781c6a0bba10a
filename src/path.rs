//! Dot-path traversal over nested mappings.
//!
//! Paths are segments joined by `.`, and only mapping members are addressable.
//! Sequence elements have no path syntax; a path that runs into a sequence or
//! scalar simply misses.

use crate::value::{Map, Value};

/// Splits a path into its segments. The empty path has no segments.
pub fn segments(path: &str) -> Vec<&str> {
    if path.is_empty() {
        Vec::new()
    } else {
        path.split('.').collect()
    }
}

/// Resolves `path` against `root`. The empty path addresses `root` itself.
pub fn get<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(root);
    }
    let mut node = root;
    for segment in path.split('.') {
        node = node.as_object()?.get(segment)?;
    }
    Some(node)
}

/// Mutable variant of [`get`].
pub fn get_mut<'a>(root: &'a mut Value, path: &str) -> Option<&'a mut Value> {
    if path.is_empty() {
        return Some(root);
    }
    let mut node = root;
    for segment in path.split('.') {
        node = node.as_object_mut()?.get_mut(segment)?;
    }
    Some(node)
}

/// Resolves `path`, falling back to `default` when it misses.
pub fn get_or<'a>(root: &'a Value, path: &str, default: &'a Value) -> &'a Value {
    get(root, path).unwrap_or(default)
}

/// Whether `path` resolves to any value, including a stored null.
pub fn has(root: &Value, path: &str) -> bool {
    get(root, path).is_some()
}

/// Writes `value` at `path`, returning whether the write happened.
///
/// With `create` set, missing intermediates are created and non-mapping
/// intermediates are replaced by fresh mappings. Without it, a path whose
/// parent is missing or not a mapping leaves `root` untouched and returns
/// `false`.
pub fn set(root: &mut Value, path: &str, value: Value, create: bool) -> bool {
    let (parent_path, leaf) = split_leaf(path);
    let Some(parent) = parent_mut(root, parent_path, create) else {
        return false;
    };
    if !parent.is_object() {
        if !create {
            return false;
        }
        *parent = Value::Object(Map::new());
    }
    match parent.as_object_mut() {
        Some(map) => {
            map.insert(leaf.to_string(), value);
            true
        }
        None => false,
    }
}

/// Removes the value at `path`, returning it. Remaining sibling order is kept.
pub fn remove(root: &mut Value, path: &str) -> Option<Value> {
    let (parent_path, leaf) = split_leaf(path);
    let parent = get_mut(root, parent_path)?;
    parent.as_object_mut()?.shift_remove(leaf)
}

/// Splits off the final segment: `"a.b.c"` becomes `("a.b", "c")` and a
/// segment-less path becomes `("", path)`.
pub(crate) fn split_leaf(path: &str) -> (&str, &str) {
    path.rsplit_once('.').unwrap_or(("", path))
}

fn parent_mut<'a>(root: &'a mut Value, parent_path: &str, create: bool) -> Option<&'a mut Value> {
    if !create {
        return get_mut(root, parent_path);
    }
    if parent_path.is_empty() {
        return Some(root);
    }
    let mut node = root;
    for segment in parent_path.split('.') {
        if !node.is_object() {
            *node = Value::Object(Map::new());
        }
        node = node
            .as_object_mut()?
            .entry(segment.to_string())
            .or_insert(Value::Null);
    }
    Some(node)
}
