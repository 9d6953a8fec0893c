//! # Error Types
//!
//! Errors raised while reading or writing automaton definitions. The engine
//! itself (resolve, simulate, validate) has no error path: structural
//! problems are reported as [`Diagnostic`](crate::Diagnostic) values and a
//! missing transition is a rejection.

use thiserror::Error;

/// Error loading, parsing or rendering a DFA definition.
#[derive(Error, Debug)]
pub enum DfaError {
    /// The definition file could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or rendering failed.
    #[error("invalid JSON definition: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing or rendering failed.
    #[error("invalid YAML definition: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The file extension does not name a known definition format.
    #[error("unsupported definition format {extension:?}; expected .json, .yaml or .yml")]
    UnsupportedFormat {
        /// The extension that was found, if any.
        extension: Option<String>,
    },
}
