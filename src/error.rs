//! Error types for resource option parsing and parameter loading.

use std::path::PathBuf;

use http::StatusCode;
use thiserror::Error;

/// Errors while assembling resource query options from request parameters.
///
/// Every variant aborts the whole assembly; no partial options are produced.
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("filter group {index} does not have the 'filters' key")]
    MissingFiltersKey { index: usize },

    #[error("cannot use page option without limit option")]
    PageWithoutLimit,

    #[error("include '{include}' has no mode and no default mode is configured")]
    MissingDefaultMode { include: String },

    #[error("invalid parameter at {path}: expected {expected}, got {actual}")]
    InvalidParam {
        path: String,
        expected: &'static str,
        actual: String,
    },
}

impl OptionsError {
    /// HTTP status the request layer should answer with.
    ///
    /// A missing default mode is a server configuration problem, everything
    /// else is the caller's fault.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingDefaultMode { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        1
    }

    pub(crate) fn invalid(path: impl Into<String>, expected: &'static str, actual: &str) -> Self {
        Self::InvalidParam {
            path: path.into(),
            expected,
            actual: actual.to_string(),
        }
    }
}

/// Errors while loading parameter or defaults documents.
#[derive(Debug, Error)]
pub enum LoadError {
    // IO errors (exit code 3)
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Parse errors (exit code 2)
    #[error("invalid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid defaults: {source}")]
    InvalidDefaults {
        #[source]
        source: OptionsError,
    },

    #[error("unknown defaults key \"{key}\"")]
    UnknownDefaultsKey { key: String },
}

impl LoadError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            LoadError::FileNotFound { .. } | LoadError::ReadError { .. } => 3,
            _ => 2,
        }
    }
}
