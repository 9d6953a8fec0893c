//! # Store Subcommand
//!
//! Manages the per-user definition store under `store_dir`. Saved
//! definitions can then be referenced as `store:<key>` by `validate` and
//! `simulate`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use dfa_core::definition::{self, DefinitionFormat};
use dfa_store::{load_dfa, save_dfa, DefinitionStore, FsDefinitionStore, StoreKey};

use crate::config::{CliConfig, OutputFormat};
use crate::resolve_user;
use crate::validate::strict_refusal;

/// Arguments for the `dfa store` subcommand.
#[derive(Args, Debug)]
pub struct StoreArgs {
    /// Owner of the definitions (defaults to `DFA_USER`).
    #[arg(long, global = true)]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: StoreCommand,
}

/// Store operations.
#[derive(Subcommand, Debug)]
pub enum StoreCommand {
    /// Save a definition file under a key, replacing any previous one.
    Put {
        /// Key to store under.
        key: String,
        /// Definition file (`.json`, `.yaml`, `.yml`).
        definition: PathBuf,
        /// Refuse to save a definition with structural problems.
        #[arg(long)]
        strict: bool,
    },
    /// Print a stored definition.
    Get {
        /// Key to read.
        key: String,
        /// Print YAML instead of JSON.
        #[arg(long)]
        yaml: bool,
    },
    /// List the user's keys.
    List,
    /// Delete a stored definition.
    Remove {
        /// Key to delete.
        key: String,
    },
}

/// Execute the store subcommand.
///
/// Returns exit code: 0 on success, 1 when the key does not exist or
/// `put --strict` refused an invalid definition.
pub fn run_store(args: &StoreArgs, config: &CliConfig) -> Result<u8> {
    let user = resolve_user(args.user.as_deref(), config)?;
    let store = FsDefinitionStore::new(&config.store_dir);

    match &args.command {
        StoreCommand::Put {
            key,
            definition,
            strict,
        } => {
            let key = StoreKey::new(key)?;
            let dfa = definition::load(definition)
                .with_context(|| format!("failed to load {}", definition.display()))?;

            if *strict {
                let json = config.output == OutputFormat::Json;
                let source = definition.display().to_string();
                if let Some(refusal) = strict_refusal(&source, &dfa, json)? {
                    print!("{refusal}");
                    return Ok(1);
                }
            }

            let record = save_dfa(&store, &user, &key, &dfa)
                .with_context(|| format!("failed to save {key} for user {user}"))?;
            println!("Saved: {} ({})", record.key, record.digest);
            Ok(0)
        }
        StoreCommand::Get { key, yaml } => {
            let key = StoreKey::new(key)?;
            match load_dfa(&store, &user, &key)
                .with_context(|| format!("failed to read {key} for user {user}"))?
            {
                Some(dfa) => {
                    let format = if *yaml {
                        DefinitionFormat::Yaml
                    } else {
                        DefinitionFormat::Json
                    };
                    let text = definition::render(&dfa, format)?;
                    println!("{}", text.trim_end());
                    Ok(0)
                }
                None => {
                    eprintln!("no definition stored under {key:?} for user {user}");
                    Ok(1)
                }
            }
        }
        StoreCommand::List => {
            let keys = store.keys(&user)?;
            if config.output == OutputFormat::Json {
                let names: Vec<&str> = keys.iter().map(StoreKey::as_str).collect();
                println!("{}", serde_json::to_string_pretty(&names)?);
            } else {
                for key in &keys {
                    println!("{key}");
                }
            }
            Ok(0)
        }
        StoreCommand::Remove { key } => {
            let key = StoreKey::new(key)?;
            if store.remove(&user, &key)? {
                println!("Removed: {key}");
                Ok(0)
            } else {
                eprintln!("no definition stored under {key:?} for user {user}");
                Ok(1)
            }
        }
    }
}
