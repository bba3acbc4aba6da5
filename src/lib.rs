//! Resource Query Options
//!
//! Parses the query mini-language carried in request parameters into a
//! normalized [`ResourceQueryOptions`] for a downstream query layer.
//!
//! # Example
//!
//! ```
//! use resource_query::{assemble, DefaultsOverride};
//! use serde_json::json;
//!
//! let params = json!({
//!     "includes": ["author:name,bio", "comments,ids"],
//!     "sort": [{ "field": "created_at", "direction": "desc" }, { "field": "title" }],
//!     "limit": 20,
//!     "page": 2,
//!     "filter_groups": [
//!         { "filters": [{ "key": "age", "operator": "gt", "value": "18" }] }
//!     ]
//! });
//!
//! let options = assemble(&params, &DefaultsOverride::new()).unwrap();
//!
//! assert_eq!(options.includes, ["author:name,bio", "comments"]);
//! assert_eq!(options.modes["author"], "embed");
//! assert_eq!(options.modes["comments,ids"], "ids");
//! assert_eq!(options.sort[1].direction, "asc");
//! assert!(!options.filter_groups[0].or);
//! assert!(!options.filter_groups[0].filters[0].not);
//! ```
//!
//! # Parameters
//!
//! | Parameter | Shape | Notes |
//! |-----------|-------|-------|
//! | `includes` | array of strings | `relation[,mode][:field1,field2]` |
//! | `sort` | array of `{field, direction?}` | direction defaults to `asc` |
//! | `limit` | integer | |
//! | `page` | integer | requires `limit` |
//! | `filter_groups` | array of `{filters, or?}` | `filters` is mandatory |
//! | `group_by` | string | passed through |
//! | `selects` | string | passed through |
//!
//! # Include Format
//!
//! The mode map is keyed by everything before the first `:`, verbatim. An
//! include written `comments,ids` therefore yields the directive `comments`
//! but the mode key `"comments,ids"`. Consumers rely on this key shape.

mod error;
mod filters;
mod includes;
mod loader;
mod options;
mod params;
mod shape;
mod sort;
mod types;

pub use error::{LoadError, OptionsError};
pub use filters::parse_filter_groups;
pub use includes::{parse_includes, IncludeToken, ParsedIncludes};
pub use loader::{load_defaults, load_params, load_params_reader, load_params_str};
pub use options::{assemble, assemble_with, ResourceOptionsParser};
pub use params::ParamSource;
pub use shape::DataShaper;
pub use sort::parse_sort;
pub use types::{
    Defaults, DefaultsOverride, FilterGroup, FilterGroupInput, FilterInput, FilterPredicate,
    ModeMap, ResourceQueryOptions, SortInput, SortSpec, DEFAULT_DIRECTION, DEFAULT_MODE,
};
