//! Core types for resource query options.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Mode used for includes that do not name one, unless overridden.
pub const DEFAULT_MODE: &str = "embed";

/// Sort direction applied when a sort spec omits one.
pub const DEFAULT_DIRECTION: &str = "asc";

/// Returns the JSON type name for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Relation name to representation mode.
///
/// Keys are the raw include head as it appeared before any `:`, so an
/// include written `author,ids` is keyed `"author,ids"`. Keys iterate and
/// serialize in sorted order, not in the order the includes arrived.
pub type ModeMap = BTreeMap<String, String>;

/// A normalized sort instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    /// Passed through as given; only defaulted when absent.
    pub direction: String,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, direction: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: direction.into(),
        }
    }

    pub fn is_descending(&self) -> bool {
        self.direction.eq_ignore_ascii_case("desc")
    }
}

/// A single normalized filter predicate (`key:operator(value)`).
///
/// Operator and value are opaque here; a later stage interprets them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterPredicate {
    pub key: String,
    pub operator: String,
    pub value: Value,
    pub not: bool,
}

/// Predicates combined by one boolean operator: AND unless `or` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterGroup {
    pub filters: Vec<FilterPredicate>,
    pub or: bool,
}

/// The fully normalized description of what to fetch and how to shape it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceQueryOptions {
    pub includes: Vec<String>,
    pub modes: ModeMap,
    pub sort: Vec<SortSpec>,
    pub limit: Option<u64>,
    pub page: Option<u64>,
    pub filter_groups: Vec<FilterGroup>,
    pub group_by: String,
    pub selects: String,
}

// --- Input forms (before normalization) ---

/// Sort spec as supplied, direction optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortInput {
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
}

impl SortInput {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: None,
        }
    }

    pub fn direction(mut self, direction: impl Into<String>) -> Self {
        self.direction = Some(direction.into());
        self
    }
}

/// Filter as supplied, `not` optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterInput {
    pub key: String,
    pub operator: String,
    #[serde(default)]
    pub value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not: Option<bool>,
}

impl FilterInput {
    pub fn new(
        key: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        Self {
            key: key.into(),
            operator: operator.into(),
            value: value.into(),
            not: None,
        }
    }

    pub fn not(mut self, not: bool) -> Self {
        self.not = Some(not);
        self
    }
}

/// Filter group as supplied.
///
/// `filters` is optional here only so its absence can be reported; a group
/// without it is rejected during parsing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterGroupInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<Vec<FilterInput>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub or: Option<bool>,
}

impl FilterGroupInput {
    pub fn new(filters: Vec<FilterInput>) -> Self {
        Self {
            filters: Some(filters),
            or: None,
        }
    }

    pub fn or(mut self, or: bool) -> Self {
        self.or = Some(or);
        self
    }
}

// --- Defaults ---

/// Values used for any parameter the request leaves out.
#[derive(Debug, Clone, PartialEq)]
pub struct Defaults {
    pub includes: Vec<String>,
    pub sort: Vec<SortInput>,
    pub limit: Option<u64>,
    pub page: Option<u64>,
    /// Mode for includes that do not name one.
    pub mode: String,
    pub filter_groups: Vec<FilterGroupInput>,
    pub group_by: String,
    pub selects: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            includes: Vec::new(),
            sort: Vec::new(),
            limit: None,
            page: None,
            mode: DEFAULT_MODE.to_string(),
            filter_groups: Vec::new(),
            group_by: String::new(),
            selects: String::new(),
        }
    }
}

impl Defaults {
    /// Base defaults with `overrides` applied on top.
    pub fn merged(overrides: &DefaultsOverride) -> Self {
        Self::default().merge(overrides)
    }

    /// Apply `overrides`; set fields win, unset fields keep the current value.
    pub fn merge(self, overrides: &DefaultsOverride) -> Self {
        let o = overrides.clone();
        Self {
            includes: o.includes.unwrap_or(self.includes),
            sort: o.sort.unwrap_or(self.sort),
            limit: o.limit.unwrap_or(self.limit),
            page: o.page.unwrap_or(self.page),
            mode: o.mode.unwrap_or(self.mode),
            filter_groups: o.filter_groups.unwrap_or(self.filter_groups),
            group_by: o.group_by.unwrap_or(self.group_by),
            selects: o.selects.unwrap_or(self.selects),
        }
    }
}

/// A caller-supplied subset of [`Defaults`].
///
/// `limit` and `page` are doubly optional so an override can explicitly
/// clear a value (`Some(None)`) as well as leave it alone (`None`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DefaultsOverride {
    pub includes: Option<Vec<String>>,
    pub sort: Option<Vec<SortInput>>,
    pub limit: Option<Option<u64>>,
    pub page: Option<Option<u64>>,
    pub mode: Option<String>,
    pub filter_groups: Option<Vec<FilterGroupInput>>,
    pub group_by: Option<String>,
    pub selects: Option<String>,
}

impl DefaultsOverride {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn includes<I, S>(mut self, includes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.includes = Some(includes.into_iter().map(Into::into).collect());
        self
    }

    pub fn sort(mut self, sort: Vec<SortInput>) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn limit(mut self, limit: Option<u64>) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn page(mut self, page: Option<u64>) -> Self {
        self.page = Some(page);
        self
    }

    pub fn mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    pub fn filter_groups(mut self, groups: Vec<FilterGroupInput>) -> Self {
        self.filter_groups = Some(groups);
        self
    }

    pub fn group_by(mut self, group_by: impl Into<String>) -> Self {
        self.group_by = Some(group_by.into());
        self
    }

    pub fn selects(mut self, selects: impl Into<String>) -> Self {
        self.selects = Some(selects.into());
        self
    }
}
