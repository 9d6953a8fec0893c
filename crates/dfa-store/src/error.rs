//! # Store Errors

use thiserror::Error;

/// Error raised by a [`DefinitionStore`](crate::DefinitionStore).
#[derive(Error, Debug)]
pub enum StoreError {
    /// The user identifier is empty, too long or contains unsafe characters.
    #[error("invalid user id {0:?}: expected 1-128 characters of [A-Za-z0-9_-]")]
    InvalidUserId(String),

    /// The key does not match `^[a-z0-9][a-z0-9_-]{0,63}$`.
    #[error("invalid store key: {0}")]
    InvalidKey(String),

    /// Filesystem failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A record or value could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored record no longer matches its digest or location.
    #[error("integrity violation for {location}: {reason}")]
    Integrity {
        /// Where the record was read from.
        location: String,
        /// What did not match.
        reason: String,
    },
}
