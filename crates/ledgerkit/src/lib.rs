//! # ledgerkit
//!
//! Client-side cryptography for an account-based ledger.
//!
//! ## Overview
//!
//! - **Accounts**: deterministic keypairs from a passphrase, checksummed addresses
//! - **Messages**: sign / verify, encrypt / decrypt between two accounts
//! - **Transactions**: typed, versioned, byte-exact encodings ready to sign
//! - **Event chains**: signed, hash-linked event logs anchored to an account
//!
//! Nothing here performs I/O. Signed artifacts are handed to a network client.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ledgerkit::{AccountExt, Event, Sdk, Transfer};
//!
//! fn example() -> ledgerkit::Result<()> {
//!     let sdk = Sdk::default();
//!     let alice = sdk.account("correct horse battery staple", 0)?;
//!     let bob = sdk.account("correct horse battery staple", 1)?;
//!
//!     let mut tx = sdk.transaction(Transfer::new(*bob.address(), 100_000_000)?)?;
//!     alice.sign_transaction(&mut tx)?;
//!
//!     let mut chain = sdk.event_chain(&alice, None)?;
//!     let event = chain.add(Event::new(&"hello", None)?)?;
//!     alice.sign_event(event)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `ledgerkit::core` - Keys, addresses, accounts
//! - `ledgerkit::tx` - Transactions
//! - `ledgerkit::events` - Event chains

pub mod account_ext;
pub mod error;
pub mod sdk;

pub use ledgerkit_core as core;
pub use ledgerkit_events as events;
pub use ledgerkit_tx as tx;

pub use account_ext::AccountExt;
pub use error::{Result, SdkError};
pub use sdk::{Sdk, SdkConfig};

pub use ledgerkit_core::{
    Account, AccountFactory, Address, Binary, CoreError, FactoryConfig, KeyMaterial, KeyPair,
    KeyType, MAINNET, TESTNET,
};
pub use ledgerkit_events::{Event, EventChain};
pub use ledgerkit_tx::{
    Anchor, Association, CancelLease, Lease, MassTransfer, RevokeAssociation, SetScript,
    Sponsorship, Transaction, TransactionData, Transfer, TxPayload, TxType,
};
