//! # In-Memory Backend
//!
//! A process-local [`DefinitionStore`] for tests and embedding. Records are
//! kept behind a `parking_lot::RwLock`, so one store can be shared across
//! threads.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::error::StoreError;
use crate::key::{StoreKey, UserId};
use crate::record::StoredRecord;
use crate::DefinitionStore;

/// A [`DefinitionStore`] held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryDefinitionStore {
    records: RwLock<HashMap<UserId, HashMap<StoreKey, StoredRecord>>>,
}

impl MemoryDefinitionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of records across all users.
    pub fn len(&self) -> usize {
        self.records.read().values().map(HashMap::len).sum()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DefinitionStore for MemoryDefinitionStore {
    fn get(&self, user: &UserId, key: &StoreKey) -> Result<Option<StoredRecord>, StoreError> {
        Ok(self
            .records
            .read()
            .get(user)
            .and_then(|by_key| by_key.get(key))
            .cloned())
    }

    fn set(
        &self,
        user: &UserId,
        key: &StoreKey,
        value: serde_json::Value,
    ) -> Result<StoredRecord, StoreError> {
        let record = StoredRecord::new(key.clone(), value)?;
        self.records
            .write()
            .entry(user.clone())
            .or_default()
            .insert(key.clone(), record.clone());
        tracing::debug!(user = %user, key = %key, "stored record in memory");
        Ok(record)
    }

    fn remove(&self, user: &UserId, key: &StoreKey) -> Result<bool, StoreError> {
        let mut records = self.records.write();
        let Some(by_key) = records.get_mut(user) else {
            return Ok(false);
        };
        let removed = by_key.remove(key).is_some();
        if by_key.is_empty() {
            records.remove(user);
        }
        Ok(removed)
    }

    fn keys(&self, user: &UserId) -> Result<Vec<StoreKey>, StoreError> {
        let mut keys: Vec<StoreKey> = self
            .records
            .read()
            .get(user)
            .map(|by_key| by_key.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        Ok(keys)
    }
}
