//! Generic data-tree representation the matcher consumes.
//!
//! A single ordered-mapping variant stands in for both JSON objects and JSON
//! arrays; array-ness vs. object-ness is not distinguished at this layer. A
//! decoded array becomes a map keyed `0..n` with integer keys, so collection
//! traversal and key/value type checks work over one shape.

use indexmap::IndexMap;

/// A mapping key. Decoded mappings carry integer keys (array indices,
/// numeric object keys) or string keys (object fields).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Int(i64),
    Str(String),
}

impl Key {
    /// Runtime type name in the matcher's four-word vocabulary.
    pub fn type_name(&self) -> &'static str {
        match self {
            Key::Int(_) => "integer",
            Key::Str(_) => "string",
        }
    }

    /// Canonicalize a decoded object key: keys that are the canonical
    /// decimal rendering of an integer (`"7"`, `"-3"`, but not `"07"`)
    /// become integer keys. Schema field lookups go through the same rule
    /// so `"0"` in a schema finds index 0 of a decoded array.
    pub fn canonical(name: &str) -> Key {
        match name.parse::<i64>() {
            Ok(i) if i.to_string() == name => Key::Int(i),
            _ => Key::Str(name.to_string()),
        }
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Key::Int(i) => write!(f, "{i}"),
            Key::Str(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Key::Int(i)
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Str(s.to_string())
    }
}

/// An untyped data node: scalar or ordered mapping.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    Str(String),
    Map(IndexMap<Key, Value>),
}

impl Value {
    /// Runtime type name as reported in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Double(_) => "double",
            Value::Str(_) => "string",
            Value::Map(_) => "map",
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<Key, Value>> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl From<&serde_json::Value> for Value {
    fn from(v: &serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else {
                    // u64 beyond i64::MAX or a float; both surface as double
                    Value::Double(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::Str(s.clone()),
            serde_json::Value::Array(items) => Value::Map(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| (Key::Int(i as i64), Value::from(item)))
                    .collect(),
            ),
            // preserve_order keeps document order here
            serde_json::Value::Object(fields) => Value::Map(
                fields
                    .iter()
                    .map(|(k, v)| (Key::canonical(k), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::from(&v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn arrays_become_integer_keyed_maps() {
        let v = Value::from(json!(["a", "b"]));
        let map = v.as_map().unwrap();
        assert_eq!(map.get(&Key::Int(0)), Some(&Value::Str("a".into())));
        assert_eq!(map.get(&Key::Int(1)), Some(&Value::Str("b".into())));
    }

    #[test]
    fn object_field_order_survives_decoding() {
        let v = Value::from(json!({"z": 1, "a": 2, "m": 3}));
        let keys: Vec<String> = v.as_map().unwrap().keys().map(Key::to_string).collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn canonical_integer_object_keys_decode_as_integers() {
        let v = Value::from(json!({"1": "x", "07": "y"}));
        let map = v.as_map().unwrap();
        assert!(map.contains_key(&Key::Int(1)));
        // non-canonical rendering stays a string key
        assert!(map.contains_key(&Key::Str("07".into())));
    }

    #[test]
    fn runtime_type_names() {
        assert_eq!(Value::from(json!(1)).type_name(), "integer");
        assert_eq!(Value::from(json!(0.5)).type_name(), "double");
        assert_eq!(Value::from(json!(true)).type_name(), "boolean");
        assert_eq!(Value::from(json!("s")).type_name(), "string");
        assert_eq!(Value::from(json!(null)).type_name(), "null");
        assert_eq!(Value::from(json!({})).type_name(), "map");
        assert_eq!(Key::Int(3).type_name(), "integer");
        assert_eq!(Key::Str("k".into()).type_name(), "string");
    }

    #[test]
    fn large_unsigned_falls_back_to_double() {
        let v = Value::from(json!(u64::MAX));
        assert_eq!(v.type_name(), "double");
    }
}
