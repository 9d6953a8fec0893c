//! # Store Identifiers
//!
//! Validated newtypes for the two halves of a storage address. Both are
//! restricted to characters that are safe as single path components, so a
//! backend may map them straight onto directories and file names.

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

const MAX_USER_ID_LEN: usize = 128;
const MAX_KEY_LEN: usize = 64;

fn validate_user_id(raw: &str) -> Result<String, StoreError> {
    let id = raw.trim();
    if id.is_empty()
        || id.len() > MAX_USER_ID_LEN
        || !id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(StoreError::InvalidUserId(raw.to_string()));
    }
    Ok(id.to_string())
}

/// Normalize a key: trim, lowercase, then require `^[a-z0-9][a-z0-9_-]{0,63}$`.
fn validate_key(raw: &str) -> Result<String, StoreError> {
    let k = raw.trim().to_lowercase();
    if k.is_empty() {
        return Err(StoreError::InvalidKey("key is required".into()));
    }
    if k.len() > MAX_KEY_LEN {
        return Err(StoreError::InvalidKey(format!(
            "key too long: {} chars (max {MAX_KEY_LEN})",
            k.len()
        )));
    }
    let mut chars = k.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() || c.is_ascii_digit() => {}
        _ => {
            return Err(StoreError::InvalidKey(format!(
                "key must start with [a-z0-9], got: {k:?}"
            )));
        }
    }
    for c in chars {
        if !(c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-') {
            return Err(StoreError::InvalidKey(format!(
                "key contains invalid character {c:?}: must match [a-z0-9_-]"
            )));
        }
    }
    Ok(k)
}

/// Identifier of the user a record belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and wrap a user identifier.
    pub fn new(id: &str) -> Result<Self, StoreError> {
        Ok(Self(validate_user_id(id)?))
    }

    /// Return the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for UserId {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for UserId {
    type Error = StoreError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(&s)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

/// Logical name of a stored document, e.g. `parity`, `academy_progress`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StoreKey(String);

impl StoreKey {
    /// Validate, normalize and wrap a key.
    pub fn new(key: &str) -> Result<Self, StoreError> {
        Ok(Self(validate_key(key)?))
    }

    /// Return the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StoreKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for StoreKey {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for StoreKey {
    type Error = StoreError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(&s)
    }
}

impl From<StoreKey> for String {
    fn from(key: StoreKey) -> Self {
        key.0
    }
}
