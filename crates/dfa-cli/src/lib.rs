//! # dfa-cli — Command-Line Interface for the Automaton Engine
//!
//! Provides the `dfa` binary. Argument parsing lives with each subcommand
//! module; the engine work is delegated to `dfa-core` and persistence to
//! `dfa-store`.
//!
//! ## Subcommands
//!
//! - `dfa validate` — structural diagnostics for one or more definitions.
//! - `dfa simulate` — run an input through a definition, optionally traced.
//! - `dfa store` — put, get, list and remove per-user stored definitions.
//!
//! ## Definition References
//!
//! Wherever a definition is expected, either a file path (`.json`, `.yaml`,
//! `.yml`) or `store:<key>` may be given. The latter reads the definition
//! saved under `<key>` for the active user.
//!
//! ```bash
//! dfa validate automata/parity.yaml
//! dfa simulate automata/parity.yaml 1 0 1 --trace
//! dfa store put parity automata/parity.yaml --user alice
//! dfa simulate store:parity --input 1,0,1 --user alice
//! ```
//!
//! ## Exit Codes
//!
//! `0` success, `1` invalid definition or rejected input, `2` operational
//! error (unreadable file, bad configuration, storage failure).

pub mod config;
pub mod simulate;
pub mod store;
pub mod validate;

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};

use dfa_core::Dfa;
use dfa_store::{load_dfa, FsDefinitionStore, StoreKey, UserId};

use crate::config::CliConfig;

/// Prefix marking a stored definition reference.
pub const STORE_PREFIX: &str = "store:";

/// Where a definition comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefinitionSource {
    /// A JSON or YAML file.
    File(PathBuf),
    /// A definition saved in the user's store.
    Stored(StoreKey),
}

impl DefinitionSource {
    /// Interpret a command-line reference.
    pub fn parse(reference: &str) -> Result<Self> {
        match reference.strip_prefix(STORE_PREFIX) {
            Some(key) => Ok(Self::Stored(
                StoreKey::new(key).with_context(|| format!("invalid reference {reference:?}"))?,
            )),
            None => Ok(Self::File(PathBuf::from(reference))),
        }
    }
}

impl std::fmt::Display for DefinitionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Stored(key) => write!(f, "{STORE_PREFIX}{key}"),
        }
    }
}

/// Pick the user from the `--user` flag or the configured default.
pub fn resolve_user(flag: Option<&str>, config: &CliConfig) -> Result<UserId> {
    let raw = flag
        .or(config.default_user.as_deref())
        .ok_or_else(|| anyhow!("no user given; pass --user or set DFA_USER"))?;
    Ok(UserId::new(raw)?)
}

/// Load the definition named by `source`.
pub fn load_definition(
    source: &DefinitionSource,
    user: Option<&str>,
    config: &CliConfig,
) -> Result<Dfa> {
    match source {
        DefinitionSource::File(path) => dfa_core::definition::load(path)
            .with_context(|| format!("failed to load {}", path.display())),
        DefinitionSource::Stored(key) => {
            let user = resolve_user(user, config)?;
            let store = FsDefinitionStore::new(&config.store_dir);
            match load_dfa(&store, &user, key)
                .with_context(|| format!("failed to read {source} for user {user}"))?
            {
                Some(dfa) => Ok(dfa),
                None => bail!("no definition stored under {key:?} for user {user}"),
            }
        }
    }
}
