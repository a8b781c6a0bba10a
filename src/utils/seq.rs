//! Sequence and mapping helpers: boundary elements, lookup and plucking.

use crate::path;
use crate::value::{Map, Value};

/// First element, or its `key` member when the element is a mapping holding
/// that key. Empty sequences yield `None`.
pub fn first<'a>(items: &'a [Value], key: Option<&str>) -> Option<&'a Value> {
    items.first().map(|item| project(item, key))
}

/// Last element, with the same projection rule as [`first`].
pub fn last<'a>(items: &'a [Value], key: Option<&str>) -> Option<&'a Value> {
    items.last().map(|item| project(item, key))
}

/// Index of the first element whose (optionally `key`-projected) value is
/// the string `value`. Non-string values never match, and with a `key` given
/// an element lacking that member never matches either.
pub fn index_of(items: &[Value], value: &str, key: Option<&str>) -> Option<usize> {
    items.iter().position(|item| {
        let candidate = match key {
            Some(key) => item.get(key),
            None => Some(item),
        };
        candidate.and_then(Value::as_str) == Some(value)
    })
}

/// Projects the last path segment out of every element under the parent
/// path, filling misses with `default`. The parent may be a sequence or a
/// mapping; anything else plucks nothing.
pub fn pluck(root: &Value, path: &str, default: &Value) -> Vec<Value> {
    let (parent_path, leaf) = path::split_leaf(path);
    let Some(parent) = path::get(root, parent_path) else {
        return Vec::new();
    };
    let plucked = |item: &Value| item.get(leaf).unwrap_or(default).clone();
    match parent {
        Value::Array(items) => items.iter().map(plucked).collect(),
        Value::Object(map) => map.values().map(plucked).collect(),
        _ => Vec::new(),
    }
}

/// Whether every key is present. Null-valued keys count as present.
pub fn keys_exist(map: &Map, keys: &[&str]) -> bool {
    keys.iter().all(|key| map.contains_key(*key))
}

fn project<'a>(item: &'a Value, key: Option<&str>) -> &'a Value {
    match key.and_then(|key| item.get(key)) {
        Some(member) => member,
        None => item,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users() -> Value {
        Value::from_json(
            r#"{
                "users": [
                    {"name": "ann", "age": 31},
                    {"name": "bo"},
                    {"age": 55}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_first_and_last() {
        let root = users();
        let items = root.get("users").unwrap().as_array().unwrap();

        assert_eq!(first(items, Some("name")), Some(&Value::from("ann")));
        assert_eq!(last(items, Some("age")), Some(&Value::Int(55)));
        assert!(first(items, None).is_some_and(Value::is_object));
        assert_eq!(first(&[], None), None);
        assert_eq!(last(&[], Some("name")), None);
    }

    #[test]
    fn test_projection_falls_back_to_the_element() {
        let items = vec![Value::from("plain")];
        assert_eq!(first(&items, Some("name")), Some(&Value::from("plain")));

        let root = users();
        let elements = root.get("users").unwrap().as_array().unwrap();
        // The last element has no "name" member, so it comes back whole.
        assert!(last(elements, Some("name")).is_some_and(Value::is_object));
    }

    #[test]
    fn test_index_of() {
        let root = users();
        let items = root.get("users").unwrap().as_array().unwrap();

        assert_eq!(index_of(items, "bo", Some("name")), Some(1));
        assert_eq!(index_of(items, "zed", Some("name")), None);

        let plain = vec![Value::from("x"), Value::from("y")];
        assert_eq!(index_of(&plain, "y", None), Some(1));

        // Numbers never match a string probe.
        let numbers = vec![Value::Int(1)];
        assert_eq!(index_of(&numbers, "1", None), None);
    }

    #[test]
    fn test_index_of_with_key_skips_keyless_elements() {
        // Unlike first/last, a key probe does not fall back to the element.
        let items = vec![Value::from("bo"), Value::from_json(r#"{"name":"bo"}"#).unwrap()];

        assert_eq!(index_of(&items, "bo", Some("name")), Some(1));
        assert_eq!(index_of(&items, "bo", None), Some(0));
    }

    #[test]
    fn test_pluck_from_sequence() {
        let root = users();
        let fallback = Value::from("unknown");

        let names = pluck(&root, "users.name", &fallback);
        assert_eq!(
            names,
            vec![Value::from("ann"), Value::from("bo"), Value::from("unknown")]
        );
    }

    #[test]
    fn test_pluck_from_mapping() {
        let root = Value::from_json(
            r#"{"servers": {"a": {"host": "h1"}, "b": {"host": "h2"}, "c": {}}}"#,
        )
        .unwrap();
        let fallback = Value::Null;

        let hosts = pluck(&root, "servers.host", &fallback);
        assert_eq!(hosts, vec![Value::from("h1"), Value::from("h2"), Value::Null]);
    }

    #[test]
    fn test_pluck_misses() {
        let root = users();
        let fallback = Value::Null;

        assert!(pluck(&root, "ghost.name", &fallback).is_empty());
        // A scalar parent has nothing to pluck from.
        let scalar_root = Value::from_json(r#"{"users": 5}"#).unwrap();
        assert!(pluck(&scalar_root, "users.name", &fallback).is_empty());
    }

    #[test]
    fn test_keys_exist() {
        let root = Value::from_json(r#"{"a": 1, "b": null, "c": "x"}"#).unwrap();
        let map = root.as_object().unwrap();

        assert!(keys_exist(map, &["a", "b", "c"]));
        assert!(keys_exist(map, &["b"]));
        assert!(!keys_exist(map, &["a", "ghost"]));
        assert!(keys_exist(map, &[]));
    }
}
