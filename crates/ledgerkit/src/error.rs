//! Error types for the ledgerkit facade.

use ledgerkit_core::CoreError;
use ledgerkit_events::EventError;
use ledgerkit_tx::TxError;
use thiserror::Error;

/// Errors that can occur through the facade.
#[derive(Debug, Error)]
pub enum SdkError {
    /// Key, address or account error.
    #[error("account error: {0}")]
    Core(#[from] CoreError),

    /// Transaction error.
    #[error("transaction error: {0}")]
    Tx(#[from] TxError),

    /// Event chain error.
    #[error("event chain error: {0}")]
    Event(#[from] EventError),
}

/// Result type for facade operations.
pub type Result<T> = std::result::Result<T, SdkError>;
