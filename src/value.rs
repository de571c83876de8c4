//! Decoded-document values carried by processed resources
//!
//! Upstream translators reduce every manifest to a bag of loosely shaped
//! values. Nothing here can fail: every accessor returns `Option`, and a value
//! of the wrong shape is simply "no evidence" for whoever asked.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// String-keyed map of values
pub type ValueMap = BTreeMap<String, Value>;

/// The processed values bag of a resource
pub type Values = ValueMap;

/// A decoded document value (JSON/YAML data model)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Map(ValueMap),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Integer view; floats with no fractional part count as integers.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Look up a key when this value is a map
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map().and_then(|m| m.get(key))
    }

    /// Walk a chain of map keys, e.g. `["spec", "template", "metadata"]`
    pub fn get_path(&self, path: &[&str]) -> Option<&Value> {
        path.iter().try_fold(self, |current, key| current.get(key))
    }

    /// Scalar rendering used when comparing label values and quantities
    pub fn to_scalar_string(&self) -> Option<String> {
        match self {
            Value::String(s) => Some(s.clone()),
            Value::Int(i) => Some(i.to_string()),
            Value::Float(f) => Some(f.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or_default()),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Map(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

/// Convert a JSON object into a values bag; anything else yields an empty bag.
pub fn values_from_json(value: serde_json::Value) -> Values {
    match Value::from(value) {
        Value::Map(map) => map,
        _ => Values::new(),
    }
}

/// Containers under `key`, only when the entry is a list of string-keyed maps.
///
/// Any other shape (missing key, scalar, list with a non-map element) is `None`.
pub fn map_list<'a>(values: &'a Values, key: &str) -> Option<Vec<&'a ValueMap>> {
    let items = values.get(key)?.as_list()?;
    items.iter().map(Value::as_map).collect()
}

/// The `containers` list of a workload's values bag
pub fn containers(values: &Values) -> Option<Vec<&ValueMap>> {
    map_list(values, "containers")
}

/// The `initContainers` list of a workload's values bag
pub fn init_containers(values: &Values) -> Option<Vec<&ValueMap>> {
    map_list(values, "initContainers")
}

/// Walk a chain of keys starting from a map
pub fn lookup<'a>(map: &'a ValueMap, path: &[&str]) -> Option<&'a Value> {
    let (first, rest) = path.split_first()?;
    map.get(*first)?.get_path(rest)
}

/// True only when the value at `path` is the boolean `true`
pub fn is_true(map: &ValueMap, path: &[&str]) -> bool {
    lookup(map, path).and_then(Value::as_bool) == Some(true)
}
