//! Filter group normalization.
//!
//! Filters are written `key:operator(value)`, e.g. `name:eq(esben)`, and
//! arrive already split into `key`, `operator` and `value`. This stage only
//! makes negation and the group combinator explicit; operators are not
//! interpreted.

use crate::error::OptionsError;
use crate::types::{FilterGroup, FilterGroupInput, FilterInput, FilterPredicate};

/// Normalize filter groups, preserving group and filter order.
///
/// # Errors
///
/// Returns `OptionsError::MissingFiltersKey` for the first group without a
/// `filters` entry. No groups are returned in that case.
pub fn parse_filter_groups(groups: &[FilterGroupInput]) -> Result<Vec<FilterGroup>, OptionsError> {
    groups
        .iter()
        .enumerate()
        .map(|(index, group)| {
            let filters = group
                .filters
                .as_ref()
                .ok_or(OptionsError::MissingFiltersKey { index })?;

            Ok(FilterGroup {
                filters: filters.iter().map(normalize_filter).collect(),
                or: group.or.unwrap_or(false),
            })
        })
        .collect()
}

fn normalize_filter(filter: &FilterInput) -> FilterPredicate {
    FilterPredicate {
        key: filter.key.clone(),
        operator: filter.operator.clone(),
        value: filter.value.clone(),
        not: filter.not.unwrap_or(false),
    }
}

impl From<FilterPredicate> for FilterInput {
    fn from(predicate: FilterPredicate) -> Self {
        Self {
            key: predicate.key,
            operator: predicate.operator,
            value: predicate.value,
            not: Some(predicate.not),
        }
    }
}

impl From<FilterGroup> for FilterGroupInput {
    fn from(group: FilterGroup) -> Self {
        Self {
            filters: Some(group.filters.into_iter().map(FilterInput::from).collect()),
            or: Some(group.or),
        }
    }
}
