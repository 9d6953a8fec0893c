//! # Definition Files
//!
//! Reads and writes [`Dfa`] definitions as JSON or YAML. The format is
//! chosen from the file extension: `.json`, `.yaml` or `.yml`.
//!
//! Loading does not validate. Run [`validate`](crate::validate) on the
//! result when structural guarantees are needed.

use std::path::Path;

use crate::error::DfaError;
use crate::model::Dfa;

/// Serialization format of a definition file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionFormat {
    /// JSON document.
    Json,
    /// YAML document.
    Yaml,
}

impl DefinitionFormat {
    /// Infer the format from a path's extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, DfaError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            _ => Err(DfaError::UnsupportedFormat { extension }),
        }
    }
}

impl std::fmt::Display for DefinitionFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => f.write_str("json"),
            Self::Yaml => f.write_str("yaml"),
        }
    }
}

impl std::str::FromStr for DefinitionFormat {
    type Err = DfaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(DfaError::UnsupportedFormat {
                extension: Some(other.to_string()),
            }),
        }
    }
}

/// Parse a definition from text.
pub fn parse(text: &str, format: DefinitionFormat) -> Result<Dfa, DfaError> {
    match format {
        DefinitionFormat::Json => Ok(serde_json::from_str(text)?),
        DefinitionFormat::Yaml => Ok(serde_yaml::from_str(text)?),
    }
}

/// Render a definition as text.
pub fn render(dfa: &Dfa, format: DefinitionFormat) -> Result<String, DfaError> {
    match format {
        DefinitionFormat::Json => Ok(serde_json::to_string_pretty(dfa)?),
        DefinitionFormat::Yaml => Ok(serde_yaml::to_string(dfa)?),
    }
}

/// Read and parse a definition file.
pub fn load(path: &Path) -> Result<Dfa, DfaError> {
    let format = DefinitionFormat::from_path(path)?;
    let text = std::fs::read_to_string(path)?;
    let dfa = parse(&text, format)?;
    tracing::debug!(
        path = %path.display(),
        %format,
        states = dfa.states.len(),
        transitions = dfa.transitions.len(),
        "loaded DFA definition"
    );
    Ok(dfa)
}
