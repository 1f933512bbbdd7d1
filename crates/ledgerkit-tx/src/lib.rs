//! # ledgerkit transactions
//!
//! Typed transactions, their versioned binary layouts, and their node-facing
//! data form.
//!
//! ## Key Types
//!
//! - [`Transaction`] - Header fields, proofs and a [`TxPayload`]
//! - [`TxPayload`] - Closed set of transaction kinds
//! - [`TxType`] - Protocol type codes and supported versions
//! - [`TransactionData`] - serde form using the node's field names
//!
//! ## Encoding
//!
//! [`Transaction::to_binary`] produces the bytes that are hashed for the id
//! and signed for proofs. One layout exists per (kind, version); see the
//! `codec` module.

mod codec;
pub mod data;
pub mod error;
pub mod payload;
pub mod transaction;
pub mod types;

pub use data::{TransactionData, TransferData};
pub use error::{Result, TxError};
pub use payload::{
    Anchor, Association, CancelLease, Lease, MassTransfer, RevokeAssociation, SetScript,
    Sponsorship, Transfer, TransferEntry, TxPayload,
};
pub use transaction::Transaction;
pub use types::{fees, TxType, DEFAULT_VERSION};
