//! # Filesystem Backend
//!
//! Records live at `{base_dir}/{user}/{key}.json`, one pretty-printed
//! [`StoredRecord`] per file. Writes go to a sibling temporary file that is
//! then renamed over the target, so readers never observe a half-written
//! record. A failed write removes its temporary file.
//!
//! ## Integrity Invariant
//!
//! On every read the record's digest is recomputed from its value and the
//! record's own key is compared with the file name. A mismatch in either is
//! reported as [`StoreError::Integrity`] instead of returning the data.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::StoreError;
use crate::key::{StoreKey, UserId};
use crate::record::StoredRecord;
use crate::DefinitionStore;

/// A [`DefinitionStore`] backed by a directory tree.
#[derive(Debug, Clone)]
pub struct FsDefinitionStore {
    /// Root directory of the store.
    base_dir: PathBuf,
}

impl FsDefinitionStore {
    /// Create a store rooted at `base_dir`.
    ///
    /// The directory does not need to exist yet; it is created on the first
    /// write.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Return the root directory.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn user_dir(&self, user: &UserId) -> PathBuf {
        self.base_dir.join(user.as_str())
    }

    /// Path of the file holding `key` for `user`.
    pub fn record_path(&self, user: &UserId, key: &StoreKey) -> PathBuf {
        self.user_dir(user).join(format!("{}.json", key.as_str()))
    }
}

impl DefinitionStore for FsDefinitionStore {
    fn get(&self, user: &UserId, key: &StoreKey) -> Result<Option<StoredRecord>, StoreError> {
        let path = self.record_path(user, key);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let record: StoredRecord = serde_json::from_slice(&bytes)?;
        let location = path.display().to_string();
        if &record.key != key {
            return Err(StoreError::Integrity {
                location,
                reason: format!("record is keyed {} but stored as {}", record.key, key),
            });
        }
        record.verify(&location)?;

        tracing::debug!(user = %user, key = %key, digest = %record.digest, "loaded record");
        Ok(Some(record))
    }

    fn set(
        &self,
        user: &UserId,
        key: &StoreKey,
        value: serde_json::Value,
    ) -> Result<StoredRecord, StoreError> {
        let record = StoredRecord::new(key.clone(), value)?;
        let dir = self.user_dir(user);
        fs::create_dir_all(&dir)?;

        let path = self.record_path(user, key);
        // Deleted on drop if any step below fails.
        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(&serde_json::to_vec_pretty(&record)?)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| e.error)?;

        tracing::info!(
            user = %user,
            key = %key,
            digest = %record.digest,
            path = %path.display(),
            "stored record"
        );
        Ok(record)
    }

    fn remove(&self, user: &UserId, key: &StoreKey) -> Result<bool, StoreError> {
        match fs::remove_file(self.record_path(user, key)) {
            Ok(()) => {
                tracing::info!(user = %user, key = %key, "removed record");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn keys(&self, user: &UserId) -> Result<Vec<StoreKey>, StoreError> {
        let dir = self.user_dir(user);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut keys = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            // Skips temp files and anything not written by this store.
            match StoreKey::new(stem) {
                Ok(key) if key.as_str() == stem => keys.push(key),
                _ => {
                    tracing::warn!(path = %path.display(), "ignoring unrecognized file in store");
                }
            }
        }
        keys.sort();
        Ok(keys)
    }
}
