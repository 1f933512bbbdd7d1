//! Error types for ledgerkit core.

use thiserror::Error;

use crate::keys::KeyRole;

/// Errors that can occur in key, address and account operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Malformed address, key, amount or hash supplied at construction.
    #[error("validation error: {0}")]
    Validation(String),

    /// The account has no secret key for the requested role.
    #[error("no private {0} key")]
    NoSecretKey(KeyRole),

    /// The account has no public key for the requested role.
    #[error("no public {0} key")]
    NoPublicKey(KeyRole),

    /// Reconstructed key or address disagrees with the supplied one.
    #[error("key mismatch: {0}")]
    KeyMismatch(String),

    #[error("unsupported version: {0}")]
    UnsupportedVersion(u8),

    /// The crypto provider does not offer this capability.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Authenticated decryption failed.
    #[error("decryption failed")]
    Decrypt,

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// base58 / base64 / hex decoding failed.
    #[error("encoding error: {0}")]
    Encoding(String),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
