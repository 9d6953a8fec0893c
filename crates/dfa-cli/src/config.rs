//! # CLI Configuration
//!
//! Settings shared by every subcommand. Resolution order, later wins:
//!
//! 1. Built-in defaults.
//! 2. YAML file given with `--config`.
//! 3. Environment variables:
//!    - `DFA_STORE_DIR` — root of the definition store (default `.dfa-store`)
//!    - `DFA_USER` — user for `store:` references and `dfa store`
//!    - `DFA_INPUT_SEPARATOR` — separator for `--input` (default `,`)
//!    - `DFA_OUTPUT` — `text` or `json` (default `text`)
//! 4. Command-line flags, applied by each handler.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// How handlers print their results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// Pretty-printed JSON documents.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("expected text or json, got {other:?}")),
        }
    }
}

/// Resolved CLI settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Root directory of the filesystem definition store.
    pub store_dir: PathBuf,
    /// User whose store is used when no `--user` flag is given.
    pub default_user: Option<String>,
    /// Separator between symbols in `--input`.
    pub input_separator: String,
    /// Default output format.
    pub output: OutputFormat,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            store_dir: PathBuf::from(".dfa-store"),
            default_user: None,
            input_separator: ",".to_string(),
            output: OutputFormat::Text,
        }
    }
}

impl CliConfig {
    /// Load defaults, then `path` if given, then the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        base.with_overrides(|var| std::env::var(var).ok())
    }

    /// Read a YAML configuration file. Missing fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.checked()
    }

    /// Apply `DFA_*` overrides obtained through `lookup`.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("DFA_STORE_DIR") {
            self.store_dir = PathBuf::from(dir);
        }
        if let Some(user) = lookup("DFA_USER") {
            self.default_user = Some(user);
        }
        if let Some(sep) = lookup("DFA_INPUT_SEPARATOR") {
            self.input_separator = sep;
        }
        if let Some(raw) = lookup("DFA_OUTPUT") {
            self.output = raw.parse().map_err(|reason| ConfigError::InvalidValue {
                name: "DFA_OUTPUT".to_string(),
                reason,
            })?;
        }
        self.checked()
    }

    fn checked(self) -> Result<Self, ConfigError> {
        if self.input_separator.is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "input_separator".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.store_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "store_dir".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(self)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("invalid value for {name}: {reason}")]
    InvalidValue { name: String, reason: String },
}
