//! # Stored Records
//!
//! The envelope every backend stores: the value, when it was saved and the
//! SHA-256 digest of the value's canonical JSON.
//!
//! Canonical JSON is RFC 8785 (JCS): object keys sorted at every depth,
//! compact separators. The same logical document always hashes the same
//! way, whatever key order it was written in and however `serde_json`'s
//! `Map` happens to be built in this binary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::StoreError;
use crate::key::StoreKey;

/// RFC 8785 canonical encoding of `value`.
pub fn canonical_bytes(value: &serde_json::Value) -> Result<Vec<u8>, StoreError> {
    Ok(serde_jcs::to_string(value)?.into_bytes())
}

/// Hex-encoded SHA-256 of the canonical JSON encoding of `value`.
pub fn value_digest(value: &serde_json::Value) -> Result<String, StoreError> {
    let bytes = canonical_bytes(value)?;
    let hash = Sha256::digest(&bytes);
    Ok(hash.iter().map(|b| format!("{b:02x}")).collect())
}

/// A stored document with its metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    /// Key the record is stored under.
    pub key: StoreKey,
    /// When the record was written (UTC).
    pub saved_at: DateTime<Utc>,
    /// Hex SHA-256 of the canonical JSON of `value`.
    pub digest: String,
    /// The stored document.
    pub value: serde_json::Value,
}

impl StoredRecord {
    /// Wrap `value` for storage under `key`, stamping the time and digest.
    pub fn new(key: StoreKey, value: serde_json::Value) -> Result<Self, StoreError> {
        let digest = value_digest(&value)?;
        Ok(Self {
            key,
            saved_at: Utc::now(),
            digest,
            value,
        })
    }

    /// Check that `digest` still matches `value`.
    ///
    /// `location` names where the record came from, for the error message.
    pub fn verify(&self, location: &str) -> Result<(), StoreError> {
        let recomputed = value_digest(&self.value)?;
        if recomputed != self.digest {
            return Err(StoreError::Integrity {
                location: location.to_string(),
                reason: format!(
                    "content digest {recomputed} does not match recorded digest {}",
                    self.digest
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn digest_is_hex_sha256() {
        let d = value_digest(&json!({})).unwrap();
        assert_eq!(d.len(), 64);
        assert!(d.chars().all(|c| c.is_ascii_hexdigit()));
        // sha256("{}")
        assert_eq!(
            d,
            "44136fa355b3678a1146ad16f7e8649e94fb4fc21fe77e8310c060f61caaff8a"
        );
    }

    #[test]
    fn digest_ignores_key_order() {
        let a: serde_json::Value = serde_json::from_str(r#"{"b": 1, "a": 2}"#).unwrap();
        let b: serde_json::Value = serde_json::from_str(r#"{"a": 2, "b": 1}"#).unwrap();
        assert_eq!(value_digest(&a).unwrap(), value_digest(&b).unwrap());
    }

    #[test]
    fn canonical_bytes_sort_nested_keys() {
        let value: serde_json::Value =
            serde_json::from_str(r#"{"b": {"d": "é", "c": 1}, "a": [true, null]}"#).unwrap();
        let bytes = canonical_bytes(&value).unwrap();
        assert_eq!(
            std::str::from_utf8(&bytes).unwrap(),
            r#"{"a":[true,null],"b":{"c":1,"d":"é"}}"#
        );
        // sha256 of the canonical text above
        assert_eq!(
            value_digest(&value).unwrap(),
            "aa06e4a0d57a9ad1f1efd9c145a0c8b8f76c084f57e4546bf7f6cb7134d384c4"
        );
    }

    #[test]
    fn new_record_verifies() {
        let record = StoredRecord::new(StoreKey::new("parity").unwrap(), json!({"x": 1})).unwrap();
        assert!(record.verify("memory").is_ok());
    }

    #[test]
    fn tampered_record_fails_verification() {
        let mut record =
            StoredRecord::new(StoreKey::new("parity").unwrap(), json!({"x": 1})).unwrap();
        record.value = json!({"x": 2});
        let err = record.verify("test").unwrap_err();
        assert!(matches!(err, StoreError::Integrity { .. }));
    }
}
