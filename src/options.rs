//! Resource option assembly - merges defaults with request parameters and
//! normalizes them into [`ResourceQueryOptions`].

use serde_json::Value;
use tracing::debug;

use crate::error::OptionsError;
use crate::filters::parse_filter_groups;
use crate::includes::parse_includes;
use crate::params::{
    decode_count, decode_filter_groups, decode_includes, decode_sort, decode_string, ParamSource,
};
use crate::shape::DataShaper;
use crate::sort::parse_sort;
use crate::types::{Defaults, DefaultsOverride, ResourceQueryOptions};

/// Assemble options from request parameters and a set of default overrides.
///
/// `overrides` are merged over the base defaults first. Each parameter the
/// request leaves out falls back to the merged default. A `limit` or `page`
/// sent as `null` (or `""`) clears the default instead.
///
/// # Errors
///
/// Returns `OptionsError::PageWithoutLimit` if a page is requested without
/// a limit, `OptionsError::MissingFiltersKey` if a filter group has no
/// filters, and `OptionsError::InvalidParam` for wrongly shaped parameters.
pub fn assemble<P: ParamSource + ?Sized>(
    params: &P,
    overrides: &DefaultsOverride,
) -> Result<ResourceQueryOptions, OptionsError> {
    assemble_with(params, &Defaults::merged(overrides))
}

/// Assemble options against already merged defaults.
pub fn assemble_with<P: ParamSource + ?Sized>(
    params: &P,
    defaults: &Defaults,
) -> Result<ResourceQueryOptions, OptionsError> {
    let result = assemble_inner(params, defaults);
    match &result {
        Ok(options) => debug!(
            includes = options.includes.len(),
            sort = options.sort.len(),
            filter_groups = options.filter_groups.len(),
            limit = ?options.limit,
            page = ?options.page,
            "resource options assembled"
        ),
        Err(e) => debug!(error = %e, "resource options rejected"),
    }
    result
}

fn assemble_inner<P: ParamSource + ?Sized>(
    params: &P,
    defaults: &Defaults,
) -> Result<ResourceQueryOptions, OptionsError> {
    let includes = match params.get("includes") {
        Some(value) => decode_includes(value, "/includes")?,
        None => defaults.includes.clone(),
    };
    let includes = parse_includes(&includes, &defaults.mode)?;

    let sort = match params.get("sort") {
        Some(value) => parse_sort(&decode_sort(value, "/sort")?),
        None => parse_sort(&defaults.sort),
    };

    let limit = read_count(params, "limit", defaults.limit)?;
    let page = read_count(params, "page", defaults.page)?;

    let filter_groups = match params.get("filter_groups") {
        Some(value) => parse_filter_groups(&decode_filter_groups(value, "/filter_groups")?)?,
        None => parse_filter_groups(&defaults.filter_groups)?,
    };

    let group_by = read_string(params, "group_by", &defaults.group_by)?;
    let selects = read_string(params, "selects", &defaults.selects)?;

    if page.is_some() && limit.is_none() {
        return Err(OptionsError::PageWithoutLimit);
    }

    Ok(ResourceQueryOptions {
        includes: includes.includes,
        modes: includes.modes,
        sort,
        limit,
        page,
        filter_groups,
        group_by,
        selects,
    })
}

fn read_count<P: ParamSource + ?Sized>(
    params: &P,
    name: &str,
    default: Option<u64>,
) -> Result<Option<u64>, OptionsError> {
    match params.get(name) {
        Some(value) => decode_count(value, &format!("/{}", name)),
        None => Ok(default),
    }
}

fn read_string<P: ParamSource + ?Sized>(
    params: &P,
    name: &str,
    default: &str,
) -> Result<String, OptionsError> {
    match params.get(name) {
        Some(value) => decode_string(value, &format!("/{}", name)),
        None => Ok(default.to_string()),
    }
}

/// Parses resource options for one endpoint.
///
/// Holds the endpoint's defaults, fixed at construction. Parsing never
/// mutates them, so a single parser can serve concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct ResourceOptionsParser {
    defaults: Defaults,
}

impl ResourceOptionsParser {
    pub fn new(defaults: Defaults) -> Self {
        Self { defaults }
    }

    /// Parser whose defaults are the base defaults with `overrides` applied.
    pub fn with_overrides(overrides: &DefaultsOverride) -> Self {
        Self::new(Defaults::merged(overrides))
    }

    pub fn defaults(&self) -> &Defaults {
        &self.defaults
    }

    /// Parse request parameters into resource options.
    ///
    /// # Errors
    ///
    /// See [`assemble`].
    pub fn parse<P: ParamSource + ?Sized>(
        &self,
        params: &P,
    ) -> Result<ResourceQueryOptions, OptionsError> {
        assemble_with(params, &self.defaults)
    }

    /// Hand fetched data to `shaper` along with the options' mode map.
    pub fn shape_data<S: DataShaper + ?Sized>(
        &self,
        shaper: &S,
        data: Value,
        options: &ResourceQueryOptions,
        key: Option<&str>,
    ) -> Value {
        options.shape_with(shaper, data, key)
    }
}
