//! Insertion-ordered data store addressed by dot-paths.

use std::fmt;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CoerceError;
use crate::path;
use crate::value::{Map, Value};

/// A mutable tree of values with dot-path access and lossy typed getters.
///
/// The root is always a mapping. Writes create missing intermediates, reads
/// that miss return `None` or the caller's default, and key order is the
/// order of first insertion throughout.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DataStore {
    root: Value,
}

impl DataStore {
    pub fn new() -> Self {
        DataStore {
            root: Value::Object(Map::new()),
        }
    }

    pub fn from_map(data: Map) -> Self {
        DataStore {
            root: Value::Object(data),
        }
    }

    /// Parses a JSON object into a store. Any other top-level shape is an error.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let value = Value::from_json(json)?;
        match value {
            Value::Object(map) => {
                debug!(keys = map.len(), "loaded data store from json");
                Ok(DataStore::from_map(map))
            }
            other => Err(CoerceError::NotAMapping {
                actual: other.type_name(),
            }
            .into()),
        }
    }

    /// Full tree view. Always the mapping variant.
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Value at `key`, or `None` when the path misses.
    pub fn get(&self, key: &str) -> Option<&Value> {
        path::get(&self.root, key)
    }

    /// Value at `key`, or `default` when the path misses.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a Value) -> &'a Value {
        path::get_or(&self.root, key, default)
    }

    /// Writes `value` at `key`, creating intermediate mappings as needed.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> &mut Self {
        path::set(&mut self.root, key, value.into(), true);
        self
    }

    /// Bulk write. With `merge` each entry is written through [`set`], so a
    /// key containing dots lands at depth; without it `data` replaces the
    /// whole tree.
    ///
    /// [`set`]: DataStore::set
    pub fn set_map(&mut self, data: Map, merge: bool) -> &mut Self {
        if merge {
            for (key, value) in data {
                self.set(&key, value);
            }
        } else {
            self.root = Value::Object(data);
        }
        self
    }

    /// String at `key`. Missing paths and stored nulls yield `default`,
    /// anything else is coerced.
    pub fn get_string(&self, key: &str, default: &str) -> String {
        match self.get(key) {
            None | Some(Value::Null) => default.to_string(),
            Some(value) => value.coerce_string(),
        }
    }

    /// String at `key`, or `None` when missing or stored null.
    pub fn get_string_opt(&self, key: &str) -> Option<String> {
        match self.get(key) {
            None | Some(Value::Null) => None,
            Some(value) => Some(value.coerce_string()),
        }
    }

    /// Coerces `value` to a string before storing it.
    pub fn set_string(&mut self, key: &str, value: impl Into<Value>) -> &mut Self {
        let coerced = value.into().coerce_string();
        self.set(key, coerced)
    }

    /// Integer at `key`. Missing paths and stored nulls yield `default`,
    /// anything else is coerced.
    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        match self.get(key) {
            None | Some(Value::Null) => default,
            Some(value) => value.coerce_int(),
        }
    }

    /// Integer at `key`, or `None` when missing or stored null.
    pub fn get_int_opt(&self, key: &str) -> Option<i64> {
        match self.get(key) {
            None | Some(Value::Null) => None,
            Some(value) => Some(value.coerce_int()),
        }
    }

    /// Coerces `value` to an integer before storing it.
    pub fn set_int(&mut self, key: &str, value: impl Into<Value>) -> &mut Self {
        let coerced = value.into().coerce_int();
        self.set(key, coerced)
    }

    /// Boolean at `key`. Missing paths and stored nulls yield `default`,
    /// anything else is coerced.
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.get(key) {
            None | Some(Value::Null) => default,
            Some(value) => value.coerce_bool(),
        }
    }

    /// Boolean at `key`, or `None` when missing or stored null.
    pub fn get_bool_opt(&self, key: &str) -> Option<bool> {
        match self.get(key) {
            None | Some(Value::Null) => None,
            Some(value) => Some(value.coerce_bool()),
        }
    }

    /// Coerces `value` to a boolean before storing it.
    pub fn set_bool(&mut self, key: &str, value: impl Into<Value>) -> &mut Self {
        let coerced = value.into().coerce_bool();
        self.set(key, coerced)
    }

    /// Stores an explicit null at `key`. The key then exists with a null value.
    pub fn set_null(&mut self, key: &str) -> &mut Self {
        self.set(key, Value::Null)
    }

    /// Removes the value at `key`. Removing a missing key is a no-op.
    pub fn remove(&mut self, key: &str) -> &mut Self {
        path::remove(&mut self.root, key);
        self
    }

    /// Whether `key` resolves, counting stored nulls as present.
    pub fn has(&self, key: &str) -> bool {
        path::has(&self.root, key)
    }

    pub fn clear(&mut self) -> &mut Self {
        self.root = Value::Object(Map::new());
        self
    }

    /// Number of top-level keys.
    pub fn len(&self) -> usize {
        self.root.as_object().map_or(0, Map::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the top-level mapping, with the keys named in `key_order`
    /// emitted first (when present) and the rest following in insertion order.
    /// Order keys are plain top-level names, not paths.
    pub fn to_map(&self, key_order: &[&str]) -> Map {
        let mut out = Map::new();
        if let Some(data) = self.root.as_object() {
            for key in key_order {
                if let Some(value) = data.get(*key) {
                    out.insert((*key).to_string(), value.clone());
                }
            }
            for (key, value) in data {
                if !out.contains_key(key) {
                    out.insert(key.clone(), value.clone());
                }
            }
        }
        out
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for DataStore {
    fn default() -> Self {
        DataStore::new()
    }
}

impl fmt::Display for DataStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.root, f)
    }
}

impl<'de> Deserialize<'de> for DataStore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Object(map) => Ok(DataStore::from_map(map)),
            other => Err(de::Error::custom(format!(
                "expected a mapping, found {}",
                other.type_name()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DataError;

    #[test]
    fn test_set_get_round_trip() {
        let mut store = DataStore::new();
        store.set("server.host", "localhost").set("server.port", 8080);

        assert_eq!(store.get("server.host"), Some(&Value::from("localhost")));
        assert_eq!(store.get("server.port"), Some(&Value::Int(8080)));
        assert!(store.get("server").is_some_and(Value::is_object));
        assert_eq!(store.get("server.missing"), None);
    }

    #[test]
    fn test_stored_null_is_present_but_defaulted() {
        let mut store = DataStore::new();
        store.set_null("gap");

        assert!(store.has("gap"));
        assert_eq!(store.get("gap"), Some(&Value::Null));
        assert_eq!(store.get_string("gap", "fallback"), "fallback");
        assert_eq!(store.get_int("gap", 9), 9);
        assert_eq!(store.get_bool("gap", true), true);
        assert_eq!(store.get_string_opt("gap"), None);

        store.remove("gap");
        assert!(!store.has("gap"));
    }

    #[test]
    fn test_typed_getters_coerce() {
        let mut store = DataStore::new();
        store
            .set("port", "8080")
            .set("count", 7)
            .set("flag", "yes")
            .set("ratio", 2.9);

        assert_eq!(store.get_int("port", 0), 8080);
        assert_eq!(store.get_int("ratio", 0), 2);
        assert_eq!(store.get_string("count", ""), "7");
        assert_eq!(store.get_bool("flag", false), true);
        assert_eq!(store.get_bool("count", true), false);
    }

    #[test]
    fn test_typed_getters_default_when_missing() {
        let store = DataStore::new();

        assert_eq!(store.get_string("missing", "d"), "d");
        assert_eq!(store.get_int("missing", 42), 42);
        assert_eq!(store.get_bool("missing", true), true);
        assert_eq!(store.get_int_opt("missing"), None);
        assert_eq!(store.get_bool_opt("missing"), None);
    }

    #[test]
    fn test_opt_getters_coerce_present_values() {
        let mut store = DataStore::new();
        store.set("answer", "42").set("flag", 1);

        assert_eq!(store.get_int_opt("answer"), Some(42));
        assert_eq!(store.get_bool_opt("flag"), Some(true));
        assert_eq!(store.get_string_opt("answer"), Some("42".to_string()));
    }

    #[test]
    fn test_setters_coerce_before_storing() {
        let mut store = DataStore::new();
        store
            .set_int("n", "42")
            .set_bool("b", "on")
            .set_string("s", 7);

        assert_eq!(store.get("n"), Some(&Value::Int(42)));
        assert_eq!(store.get("b"), Some(&Value::Bool(true)));
        assert_eq!(store.get("s"), Some(&Value::from("7")));
    }

    #[test]
    fn test_get_or() {
        let mut store = DataStore::new();
        store.set("present", 1);
        let fallback = Value::from("none");

        assert_eq!(store.get_or("present", &fallback), &Value::Int(1));
        assert_eq!(store.get_or("absent", &fallback), &fallback);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut store = DataStore::new();
        store.set("a.b", 1).set("a.c", 2);

        store.remove("a.b").remove("a.b").remove("ghost");
        assert!(!store.has("a.b"));
        assert!(store.has("a.c"));
    }

    #[test]
    fn test_set_map_replaces() {
        let mut store = DataStore::new();
        store.set("old", 1);

        let mut data = Map::new();
        data.insert("fresh".to_string(), Value::Int(2));
        store.set_map(data, false);

        assert!(!store.has("old"));
        assert_eq!(store.get_int("fresh", 0), 2);
    }

    #[test]
    fn test_set_map_merges() {
        let mut store = DataStore::new();
        store.set("kept", 1).set("shared", 1);

        let mut data = Map::new();
        data.insert("shared".to_string(), Value::Int(2));
        data.insert("added".to_string(), Value::Int(3));
        store.set_map(data, true);

        assert_eq!(store.get_int("kept", 0), 1);
        assert_eq!(store.get_int("shared", 0), 2);
        assert_eq!(store.get_int("added", 0), 3);
    }

    #[test]
    fn test_merge_treats_dotted_keys_as_paths() {
        let mut store = DataStore::new();

        let mut data = Map::new();
        data.insert("a.b".to_string(), Value::Int(1));
        store.set_map(data, true);

        assert_eq!(store.get_int("a.b", 0), 1);
        assert!(store.get("a").is_some_and(Value::is_object));
        // The literal dotted key does not survive a merge.
        assert!(store.root().as_object().unwrap().get("a.b").is_none());
    }

    #[test]
    fn test_to_map_applies_key_order_first() {
        let mut store = DataStore::new();
        store.set("mixed", "m").set("value", 7).set("bool", true);

        let out = store.to_map(&["bool", "value"]);
        let keys: Vec<&str> = out.keys().map(String::as_str).collect();

        assert_eq!(keys, vec!["bool", "value", "mixed"]);
        assert_eq!(out.get("value"), Some(&Value::Int(7)));
    }

    #[test]
    fn test_to_map_skips_unknown_order_keys() {
        let mut store = DataStore::new();
        store.set("a", 1);

        let out = store.to_map(&["ghost", "a"]);
        let keys: Vec<&str> = out.keys().map(String::as_str).collect();

        assert_eq!(keys, vec!["a"]);
    }

    #[test]
    fn test_exported_map_rebuilds_an_equal_store() {
        let mut store = DataStore::new();
        store
            .set("name", "unit")
            .set("nested.flag", true)
            .set_null("gap");

        let mut rebuilt = DataStore::new();
        rebuilt.set_map(store.to_map(&[]), false);

        assert_eq!(rebuilt, store);
    }

    #[test]
    fn test_len_and_clear() {
        let mut store = DataStore::new();
        assert!(store.is_empty());

        store.set("a", 1).set("b.c", 2);
        assert_eq!(store.len(), 2);

        store.clear();
        assert!(store.is_empty());
        assert!(!store.has("a"));
    }

    #[test]
    fn test_json_round_trip_keeps_order() {
        let json = r#"{"zulu":1,"alpha":{"inner":true},"mike":null}"#;
        let store = DataStore::from_json(json).unwrap();

        assert_eq!(store.to_json().unwrap(), json);
        assert_eq!(store.get_bool("alpha.inner", false), true);
    }

    #[test]
    fn test_from_json_rejects_non_objects() {
        for json in ["[1,2]", "42", "\"text\"", "null"] {
            let err = DataStore::from_json(json).unwrap_err();
            assert!(
                matches!(err, DataError::Coerce(CoerceError::NotAMapping { .. })),
                "{json} should be rejected"
            );
        }
    }

    #[test]
    fn test_from_json_propagates_parse_errors() {
        assert!(matches!(
            DataStore::from_json("{broken").unwrap_err(),
            DataError::Json(_)
        ));
    }

    #[test]
    fn test_serde_round_trip() {
        let mut store = DataStore::new();
        store.set("name", "unit").set("nested.flag", true);

        let json = serde_json::to_string(&store).unwrap();
        let back: DataStore = serde_json::from_str(&json).unwrap();
        assert_eq!(back, store);

        assert!(serde_json::from_str::<DataStore>("[1]").is_err());
    }
}
