//! Loading request parameter and defaults documents.
//!
//! Both are JSON objects. A defaults document uses the same parameter
//! shapes as a request, plus `mode`.

use std::io::Read;
use std::path::Path;

use serde_json::Value;

use crate::error::{LoadError, OptionsError};
use crate::params::{
    decode_count, decode_filter_groups, decode_includes, decode_sort, decode_string,
};
use crate::types::{json_type_name, DefaultsOverride};

/// Load a parameters document from a file path.
///
/// # Errors
///
/// Returns `LoadError::FileNotFound` if the file doesn't exist,
/// or `LoadError::InvalidJson` if the file isn't valid JSON.
pub fn load_params(path: &Path) -> Result<Value, LoadError> {
    if !path.exists() {
        return Err(LoadError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| LoadError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;

    load_params_str(&content)
}

/// Load a parameters document from a JSON string.
///
/// # Errors
///
/// Returns `LoadError::InvalidJson` if the string isn't valid JSON.
pub fn load_params_str(content: &str) -> Result<Value, LoadError> {
    serde_json::from_str(content).map_err(|source| LoadError::InvalidJson { source })
}

/// Load a parameters document from a reader (e.g. stdin).
pub fn load_params_reader<R: Read>(mut reader: R) -> Result<Value, LoadError> {
    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .map_err(|source| LoadError::ReadError {
            path: "<stdin>".into(),
            source,
        })?;
    load_params_str(&content)
}

/// Load a defaults document from a file path.
pub fn load_defaults(path: &Path) -> Result<DefaultsOverride, LoadError> {
    let value = load_params(path)?;
    DefaultsOverride::from_value(&value)
}

impl DefaultsOverride {
    /// Build an override from a JSON object.
    ///
    /// Keys left out stay unset. `limit` and `page` may be `null` to clear
    /// them; other keys must not be `null`.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::UnknownDefaultsKey` for keys that are not
    /// parameters or `mode`, and `LoadError::InvalidDefaults` for wrongly
    /// shaped values.
    pub fn from_value(value: &Value) -> Result<Self, LoadError> {
        let map = value.as_object().ok_or_else(|| LoadError::InvalidDefaults {
            source: OptionsError::invalid("", "object", json_type_name(value)),
        })?;

        let mut overrides = DefaultsOverride::new();
        for (key, value) in map {
            let path = format!("/{}", key);
            let invalid = |source| LoadError::InvalidDefaults { source };
            match key.as_str() {
                "includes" => {
                    overrides.includes = Some(decode_includes(value, &path).map_err(invalid)?)
                }
                "sort" => overrides.sort = Some(decode_sort(value, &path).map_err(invalid)?),
                "limit" => overrides.limit = Some(decode_count(value, &path).map_err(invalid)?),
                "page" => overrides.page = Some(decode_count(value, &path).map_err(invalid)?),
                "mode" => overrides.mode = Some(decode_string(value, &path).map_err(invalid)?),
                "filter_groups" => {
                    overrides.filter_groups =
                        Some(decode_filter_groups(value, &path).map_err(invalid)?)
                }
                "group_by" => {
                    overrides.group_by = Some(decode_string(value, &path).map_err(invalid)?)
                }
                "selects" => {
                    overrides.selects = Some(decode_string(value, &path).map_err(invalid)?)
                }
                other => {
                    return Err(LoadError::UnknownDefaultsKey {
                        key: other.to_string(),
                    })
                }
            }
        }

        Ok(overrides)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Defaults, SortInput};
    use serde_json::json;

    #[test]
    fn defaults_from_value() {
        let overrides = DefaultsOverride::from_value(&json!({
            "mode": "sideload",
            "limit": "25",
            "sort": [{ "field": "created_at", "direction": "desc" }]
        }))
        .unwrap();

        let defaults = Defaults::merged(&overrides);
        assert_eq!(defaults.mode, "sideload");
        assert_eq!(defaults.limit, Some(25));
        assert_eq!(
            defaults.sort,
            vec![SortInput::new("created_at").direction("desc")]
        );
        assert!(defaults.includes.is_empty());
    }

    #[test]
    fn defaults_null_limit_clears() {
        let overrides = DefaultsOverride::from_value(&json!({ "limit": null })).unwrap();
        assert_eq!(overrides.limit, Some(None));
    }

    #[test]
    fn defaults_unknown_key() {
        let err = DefaultsOverride::from_value(&json!({ "limt": 10 })).unwrap_err();
        assert!(matches!(err, LoadError::UnknownDefaultsKey { ref key } if key == "limt"));
    }

    #[test]
    fn defaults_wrong_shape() {
        let err = DefaultsOverride::from_value(&json!({ "mode": 3 })).unwrap_err();
        assert!(matches!(err, LoadError::InvalidDefaults { .. }));

        let err = DefaultsOverride::from_value(&json!(["mode"])).unwrap_err();
        assert!(matches!(err, LoadError::InvalidDefaults { .. }));
    }

    #[test]
    fn params_from_str() {
        let params = load_params_str(r#"{"includes": ["author"]}"#).unwrap();
        assert_eq!(params["includes"][0], "author");

        assert!(matches!(
            load_params_str("{not json"),
            Err(LoadError::InvalidJson { .. })
        ));
    }

    #[test]
    fn params_from_reader() {
        let params = load_params_reader(r#"{"limit": 5}"#.as_bytes()).unwrap();
        assert_eq!(params["limit"], 5);
    }

    #[test]
    fn missing_file() {
        let err = load_params(Path::new("/nonexistent/params.json")).unwrap_err();
        assert!(matches!(err, LoadError::FileNotFound { .. }));
        assert_eq!(err.exit_code(), 3);
    }
}
