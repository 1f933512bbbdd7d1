//! # ledgerkit testkit
//!
//! Testing utilities for ledgerkit.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: fixed inputs with expected outputs for cross-implementation verification
//! - **Generators**: proptest strategies for accounts, addresses and transactions
//! - **Fixtures**: a ready account plus helpers for signed transactions and event chains
//!
//! ## Golden Vectors
//!
//! ```rust
//! use ledgerkit_testkit::vectors::verify_all_vectors;
//!
//! for (name, matches, actual) in verify_all_vectors() {
//!     assert!(matches, "{name}: got {actual}");
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use ledgerkit_testkit::generators::{tx_from_params, TxParams};
//!
//! proptest! {
//!     #[test]
//!     fn id_is_deterministic(params: TxParams) {
//!         prop_assert_eq!(tx_from_params(&params).id().unwrap(), tx_from_params(&params).id().unwrap());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use ledgerkit_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new("alice");
//! let mut chain = fixture.make_chain("docs");
//! fixture.add_event(&mut chain, &"hello");
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{multi_party_fixtures, TestFixture};
pub use generators::{tx_from_params, TxParams};
pub use vectors::{all_vectors, verify_all_vectors, GoldenVector};
