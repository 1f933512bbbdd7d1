//! # ledgerkit events
//!
//! Off-chain, tamper-evident event logs anchored to an account.
//!
//! ## Key Types
//!
//! - [`EventChain`] - Ordered, hash-linked list of events under one id
//! - [`Event`] - A signed entry carrying an application JSON body
//!
//! Chain and resource ids are deterministic when given a nonce seed; see
//! [`id`].

pub mod chain;
pub mod error;
pub mod event;
pub mod id;

pub use chain::EventChain;
pub use error::{EventError, Result};
pub use event::Event;
pub use id::{CHAIN_ID_KIND, ID_LEN, RESOURCE_ID_KIND};
