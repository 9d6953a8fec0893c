//! # dfa-store — Per-User Definition Storage
//!
//! The application around the automaton engine saves per-user JSON
//! documents under logical keys (`profile`, `projects`, saved automata, …).
//! This crate is that storage service: a [`DefinitionStore`] trait with a
//! filesystem backend ([`FsDefinitionStore`]) and an in-memory backend
//! ([`MemoryDefinitionStore`]), plus typed helpers for [`Dfa`] definitions.
//!
//! ## Integrity
//!
//! Every [`StoredRecord`] carries the SHA-256 digest of its value's
//! canonical JSON. The filesystem backend recomputes it on every read and
//! refuses records whose content no longer matches.
//!
//! ## Crate Policy
//!
//! - Identifiers are validated newtypes ([`UserId`], [`StoreKey`]); they are
//!   safe to use as path components.
//! - Stored values are opaque JSON. Only [`save_dfa`] / [`load_dfa`] know the
//!   shape of what they store.

pub mod error;
pub mod fs;
pub mod key;
pub mod memory;
pub mod record;

pub use error::StoreError;
pub use fs::FsDefinitionStore;
pub use key::{StoreKey, UserId};
pub use memory::MemoryDefinitionStore;
pub use record::StoredRecord;

use dfa_core::Dfa;

/// Keyed JSON storage partitioned by user.
pub trait DefinitionStore: Send + Sync {
    /// Fetch the record stored under `key`, if any.
    fn get(&self, user: &UserId, key: &StoreKey) -> Result<Option<StoredRecord>, StoreError>;

    /// Store `value` under `key`, replacing any previous record.
    fn set(
        &self,
        user: &UserId,
        key: &StoreKey,
        value: serde_json::Value,
    ) -> Result<StoredRecord, StoreError>;

    /// Delete the record under `key`. Returns whether one existed.
    fn remove(&self, user: &UserId, key: &StoreKey) -> Result<bool, StoreError>;

    /// All keys stored for `user`, sorted. Unknown users have no keys.
    fn keys(&self, user: &UserId) -> Result<Vec<StoreKey>, StoreError>;
}

/// Save a DFA definition under `key`.
///
/// The definition is stored as-is; validate it first if only well-formed
/// automata should be persisted.
pub fn save_dfa<S: DefinitionStore + ?Sized>(
    store: &S,
    user: &UserId,
    key: &StoreKey,
    dfa: &Dfa,
) -> Result<StoredRecord, StoreError> {
    let value = serde_json::to_value(dfa)?;
    store.set(user, key, value)
}

/// Load a DFA definition stored under `key`.
///
/// A record that exists but does not describe a DFA is a
/// [`StoreError::Serialization`] error.
pub fn load_dfa<S: DefinitionStore + ?Sized>(
    store: &S,
    user: &UserId,
    key: &StoreKey,
) -> Result<Option<Dfa>, StoreError> {
    match store.get(user, key)? {
        Some(record) => Ok(Some(serde_json::from_value(record.value)?)),
        None => Ok(None),
    }
}
