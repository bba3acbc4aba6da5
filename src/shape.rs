//! Seam to the downstream engine that shapes fetched data.
//!
//! Shaping itself (embedding, sideloading, id-only relations) lives outside
//! this crate; all it needs from here is the mode map.

use serde_json::Value;

use crate::types::{ModeMap, ResourceQueryOptions};

/// Shapes fetched resources according to per-relation modes.
pub trait DataShaper {
    /// `key` optionally names the root collection in the output.
    fn shape(&self, data: Value, modes: &ModeMap, key: Option<&str>) -> Value;
}

impl<F> DataShaper for F
where
    F: Fn(Value, &ModeMap, Option<&str>) -> Value,
{
    fn shape(&self, data: Value, modes: &ModeMap, key: Option<&str>) -> Value {
        self(data, modes, key)
    }
}

impl ResourceQueryOptions {
    /// Run `data` through `shaper` with these options' modes.
    pub fn shape_with<S: DataShaper + ?Sized>(
        &self,
        shaper: &S,
        data: Value,
        key: Option<&str>,
    ) -> Value {
        shaper.shape(data, &self.modes, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::assemble;
    use crate::types::DefaultsOverride;
    use serde_json::json;

    /// Replaces each relation whose mode is `ids` with the list of its ids.
    struct IdsShaper;

    impl DataShaper for IdsShaper {
        fn shape(&self, mut data: Value, modes: &ModeMap, key: Option<&str>) -> Value {
            for (relation, mode) in modes {
                if mode != "ids" {
                    continue;
                }
                let name = relation.split(',').next().unwrap_or(relation);
                if let Some(Value::Array(items)) = data.get(name) {
                    let ids: Vec<Value> =
                        items.iter().filter_map(|i| i.get("id").cloned()).collect();
                    data[name] = Value::Array(ids);
                }
            }
            match key {
                Some(key) => json!({ key: data }),
                None => data,
            }
        }
    }

    #[test]
    fn shaper_receives_modes() {
        let options = assemble(
            &json!({ "includes": ["comments,ids", "author"] }),
            &DefaultsOverride::new(),
        )
        .unwrap();
        let data = json!({
            "title": "Hello",
            "comments": [{ "id": 1, "body": "a" }, { "id": 2, "body": "b" }],
            "author": { "id": 7, "name": "Esben" }
        });

        let shaped = options.shape_with(&IdsShaper, data, Some("post"));

        assert_eq!(shaped["post"]["comments"], json!([1, 2]));
        assert_eq!(shaped["post"]["author"]["name"], "Esben");
    }

    #[test]
    fn closure_shaper() {
        let options =
            assemble(&json!({ "includes": ["author"] }), &DefaultsOverride::new()).unwrap();
        let count_modes = |_data: Value, modes: &ModeMap, _key: Option<&str>| json!(modes.len());
        assert_eq!(options.shape_with(&count_modes, json!(null), None), json!(1));
    }
}
