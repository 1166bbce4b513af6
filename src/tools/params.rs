//! Lenient coercion of tool-call arguments.
//!
//! Each reader is a pure function returning either a typed value or `None`.
//! A value of the wrong JSON type is reported as absent, never as an error.

use serde_json::{Map, Number, Value};

use crate::error::{Error, Result};

/// View the arguments as an object. `null` counts as no arguments.
pub fn as_object(args: &Value) -> Result<Map<String, Value>> {
    match args {
        Value::Object(map) => Ok(map.clone()),
        Value::Null => Ok(Map::new()),
        _ => Err(Error::invalid_arguments("tool arguments must be a JSON object")),
    }
}

/// Fail on the first key that is not in `allowed`.
pub fn reject_unknown(args: &Map<String, Value>, allowed: &[&str]) -> Result<()> {
    match args.keys().find(|key| !allowed.contains(&key.as_str())) {
        Some(key) => Err(Error::invalid_arguments(format!("unknown parameter: {key}"))),
        None => Ok(()),
    }
}

pub fn string(args: &Map<String, Value>, key: &str) -> Option<String> {
    args.get(key).and_then(Value::as_str).map(str::to_owned)
}

pub fn number(args: &Map<String, Value>, key: &str) -> Option<Number> {
    match args.get(key) {
        Some(Value::Number(n)) => Some(n.clone()),
        _ => None,
    }
}

/// String elements of an array; `None` if not an array or no strings remain.
pub fn string_array(args: &Map<String, Value>, key: &str) -> Option<Vec<String>> {
    let items: Vec<String> = args
        .get(key)?
        .as_array()?
        .iter()
        .filter_map(|v| v.as_str().map(str::to_owned))
        .collect();
    (!items.is_empty()).then_some(items)
}
