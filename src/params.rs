//! Request parameter access and per-parameter decoding.
//!
//! The transport hands over already-decoded JSON values. Each parameter is
//! decoded into its input form here, so a wrongly shaped value is reported
//! as `OptionsError::InvalidParam` with a JSON Pointer to the offending
//! element instead of failing somewhere inside a parser.

use std::collections::{BTreeMap, HashMap};

use serde_json::{Map, Value};

use crate::error::OptionsError;
use crate::types::{json_type_name, FilterGroupInput, FilterInput, SortInput};

/// Read-only access to request parameters by name.
///
/// `None` means the request left the parameter out. A parameter sent as
/// `null` is present and is decoded like any other value.
pub trait ParamSource {
    fn get(&self, name: &str) -> Option<&Value>;
}

impl ParamSource for Map<String, Value> {
    fn get(&self, name: &str) -> Option<&Value> {
        Map::get(self, name)
    }
}

/// Only objects carry parameters; any other value has none.
impl ParamSource for Value {
    fn get(&self, name: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(name))
    }
}

impl<S: std::hash::BuildHasher> ParamSource for HashMap<String, Value, S> {
    fn get(&self, name: &str) -> Option<&Value> {
        HashMap::get(self, name)
    }
}

impl ParamSource for BTreeMap<String, Value> {
    fn get(&self, name: &str) -> Option<&Value> {
        BTreeMap::get(self, name)
    }
}

impl<P: ParamSource + ?Sized> ParamSource for &P {
    fn get(&self, name: &str) -> Option<&Value> {
        (**self).get(name)
    }
}

/// Decode `includes`: an array of strings, or one string as a single token.
pub fn decode_includes(value: &Value, path: &str) -> Result<Vec<String>, OptionsError> {
    match value {
        Value::String(s) => Ok(vec![s.clone()]),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| decode_string(item, &format!("{}/{}", path, i)))
            .collect(),
        other => Err(unexpected(path, "array of strings", other)),
    }
}

/// Decode `sort`: an array of `{field, direction?}` objects.
pub fn decode_sort(value: &Value, path: &str) -> Result<Vec<SortInput>, OptionsError> {
    decode_array(value, path, "array of sort objects")?
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let item_path = format!("{}/{}", path, i);
            let map = decode_object(item, &item_path)?;
            Ok(SortInput {
                field: required_string(map, "field", &item_path)?,
                direction: optional_string(map, "direction", &item_path)?,
            })
        })
        .collect()
}

/// Decode `filter_groups`: an array of `{filters?, or?}` objects.
///
/// A missing `filters` key is kept as `None` so the filter parser can
/// report it.
pub fn decode_filter_groups(
    value: &Value,
    path: &str,
) -> Result<Vec<FilterGroupInput>, OptionsError> {
    decode_array(value, path, "array of filter groups")?
        .iter()
        .enumerate()
        .map(|(i, item)| decode_filter_group(item, &format!("{}/{}", path, i)))
        .collect()
}

fn decode_filter_group(value: &Value, path: &str) -> Result<FilterGroupInput, OptionsError> {
    let map = decode_object(value, path)?;

    let filters = match map.get("filters") {
        None => None,
        Some(filters) => {
            let filters_path = format!("{}/filters", path);
            let items = decode_array(filters, &filters_path, "array of filters")?;
            Some(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, f)| decode_filter(f, &format!("{}/{}", filters_path, i)))
                    .collect::<Result<Vec<_>, _>>()?,
            )
        }
    };

    Ok(FilterGroupInput {
        filters,
        or: optional_flag(map, "or", path)?,
    })
}

fn decode_filter(value: &Value, path: &str) -> Result<FilterInput, OptionsError> {
    let map = decode_object(value, path)?;
    Ok(FilterInput {
        key: required_string(map, "key", path)?,
        operator: required_string(map, "operator", path)?,
        value: map.get("value").cloned().unwrap_or(Value::Null),
        not: optional_flag(map, "not", path)?,
    })
}

/// Decode `limit` / `page`.
///
/// Accepts a non-negative integer or a string of digits. `null` and the
/// empty string clear the value.
pub fn decode_count(value: &Value, path: &str) -> Result<Option<u64>, OptionsError> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_u64()
            .map(Some)
            .ok_or_else(|| unexpected(path, "non-negative integer", value)),
        Value::String(s) if s.is_empty() => Ok(None),
        Value::String(s) if s.bytes().all(|b| b.is_ascii_digit()) => s
            .parse()
            .map(Some)
            .map_err(|_| unexpected(path, "non-negative integer", value)),
        other => Err(unexpected(path, "non-negative integer", other)),
    }
}

/// Decode a boolean flag (`not`, `or`).
///
/// Besides JSON booleans, `0`/`1` and the strings `"true"`, `"false"`,
/// `"1"`, `"0"` are accepted since form-encoded requests carry them.
pub fn decode_flag(value: &Value, path: &str) -> Result<bool, OptionsError> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) if n.as_u64() == Some(0) => Ok(false),
        Value::Number(n) if n.as_u64() == Some(1) => Ok(true),
        Value::String(s) => match s.as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(unexpected(path, "boolean", value)),
        },
        other => Err(unexpected(path, "boolean", other)),
    }
}

/// Decode a plain string parameter (`group_by`, `selects`).
pub fn decode_string(value: &Value, path: &str) -> Result<String, OptionsError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => Err(unexpected(path, "string", other)),
    }
}

// --- Internal helpers ---

fn decode_array<'a>(
    value: &'a Value,
    path: &str,
    expected: &'static str,
) -> Result<&'a Vec<Value>, OptionsError> {
    value
        .as_array()
        .ok_or_else(|| unexpected(path, expected, value))
}

fn decode_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, OptionsError> {
    value
        .as_object()
        .ok_or_else(|| unexpected(path, "object", value))
}

fn required_string(
    map: &Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<String, OptionsError> {
    let child_path = format!("{}/{}", path, key);
    match map.get(key) {
        Some(value) => decode_string(value, &child_path),
        None => Err(OptionsError::invalid(child_path, "string", "nothing")),
    }
}

fn optional_string(
    map: &Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<Option<String>, OptionsError> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => decode_string(value, &format!("{}/{}", path, key)).map(Some),
    }
}

fn optional_flag(
    map: &Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<Option<bool>, OptionsError> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => decode_flag(value, &format!("{}/{}", path, key)).map(Some),
    }
}

fn unexpected(path: &str, expected: &'static str, actual: &Value) -> OptionsError {
    let actual = match actual {
        Value::String(s) => format!("string {:?}", s),
        Value::Number(n) => format!("number {}", n),
        other => json_type_name(other).to_string(),
    };
    OptionsError::invalid(path, expected, &actual)
}
