//! Sort spec normalization.

use crate::types::{SortInput, SortSpec, DEFAULT_DIRECTION};

/// Fill in a missing direction with `asc`, preserving order.
///
/// Directions that are present are passed through untouched, even if they
/// are neither `asc` nor `desc`.
pub fn parse_sort(specs: &[SortInput]) -> Vec<SortSpec> {
    specs
        .iter()
        .map(|spec| SortSpec {
            field: spec.field.clone(),
            direction: spec
                .direction
                .clone()
                .unwrap_or_else(|| DEFAULT_DIRECTION.to_string()),
        })
        .collect()
}

impl From<SortSpec> for SortInput {
    fn from(spec: SortSpec) -> Self {
        Self {
            field: spec.field,
            direction: Some(spec.direction),
        }
    }
}
