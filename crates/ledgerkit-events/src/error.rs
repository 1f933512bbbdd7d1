//! Error types for ledgerkit event chains.

use ledgerkit_core::{CoreError, KeyType};
use thiserror::Error;

/// Errors that can occur while building, slicing or validating an event chain.
#[derive(Debug, Error)]
pub enum EventError {
    /// The chain or event is not in a state that allows the operation.
    #[error("bad state: {0}")]
    BadState(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Events are only signed and verified with ed25519 keys.
    #[error("unsupported key type: {0}")]
    UnsupportedKeyType(KeyType),

    /// No event in the chain has the requested hash.
    #[error("no event with hash {0}")]
    NotFound(String),

    #[error("invalid signature on event {index}")]
    InvalidSignature { index: usize },

    /// An event's `previous` does not point at its predecessor.
    #[error("broken link at event {index}: expected previous {expected}, found {found}")]
    BrokenLink {
        index: usize,
        expected: String,
        found: String,
    },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for event chain operations.
pub type Result<T> = std::result::Result<T, EventError>;
