//! Include string parsing.
//!
//! An include token has the form `relation[,mode][:field1,field2]`. The
//! relation (plus any field list) becomes an include directive, and the mode
//! is recorded against the raw head that preceded the `:`.

use serde::Serialize;

use crate::error::OptionsError;
use crate::types::ModeMap;

/// Include directives and the mode for each relation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedIncludes {
    pub includes: Vec<String>,
    pub modes: ModeMap,
}

/// One include token split into its parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncludeToken<'a> {
    /// Everything before the first `:`, verbatim.
    pub head: &'a str,
    pub relation: &'a str,
    pub mode: Option<&'a str>,
    pub fields: Option<&'a str>,
}

impl<'a> IncludeToken<'a> {
    pub fn split(token: &'a str) -> Self {
        let (head, fields) = match token.split_once(':') {
            Some((head, fields)) => (head, Some(fields)),
            None => (token, None),
        };
        let (relation, mode) = match head.split_once(',') {
            Some((relation, mode)) => (relation, Some(mode)),
            None => (head, None),
        };
        Self {
            head,
            relation,
            mode,
            fields,
        }
    }

    /// The include directive: `relation` or `relation:fields`.
    pub fn directive(&self) -> String {
        match self.fields {
            Some(fields) => format!("{}:{}", self.relation, fields),
            None => self.relation.to_string(),
        }
    }
}

/// Parse include tokens into directives and a mode map.
///
/// Tokens without an explicit mode get `default_mode`. Directives are
/// deduplicated keeping first-seen order; when two tokens share a head the
/// later mode wins.
///
/// # Errors
///
/// Returns `OptionsError::MissingDefaultMode` if a token relies on the
/// default mode and `default_mode` is empty.
pub fn parse_includes<S: AsRef<str>>(
    includes: &[S],
    default_mode: &str,
) -> Result<ParsedIncludes, OptionsError> {
    let mut parsed = ParsedIncludes::default();

    for include in includes {
        let include = include.as_ref();
        let token = IncludeToken::split(include);

        let mode = match token.mode {
            Some(mode) => mode,
            None if default_mode.is_empty() => {
                return Err(OptionsError::MissingDefaultMode {
                    include: include.to_string(),
                })
            }
            None => default_mode,
        };

        let directive = token.directive();
        if !parsed.includes.contains(&directive) {
            parsed.includes.push(directive);
        }
        parsed.modes.insert(token.head.to_string(), mode.to_string());
    }

    Ok(parsed)
}
