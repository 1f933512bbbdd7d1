//! Error types for ledgerkit transactions.

use ledgerkit_core::{CoreError, KeyType};
use thiserror::Error;

use crate::types::TxType;

/// Errors that can occur while building, encoding or signing a transaction.
#[derive(Debug, Error)]
pub enum TxError {
    /// A field needed for encoding is unset.
    #[error("bad state: {0}")]
    BadState(String),

    /// The operation is not allowed in the transaction's current state.
    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("unsupported {tx_type} version: {version}")]
    UnsupportedVersion { tx_type: TxType, version: u8 },

    #[error("unsupported key type: {0}")]
    UnsupportedKeyType(KeyType),

    /// Data form is missing fields or carries the wrong type tag.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A payload value is out of range.
    #[error("validation error: {0}")]
    Validation(String),

    /// Data form could not be interpreted.
    #[error("malformed transaction data: {0}")]
    Malformed(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for transaction operations.
pub type Result<T> = std::result::Result<T, TxError>;
