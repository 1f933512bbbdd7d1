//! # ledgerkit core
//!
//! Pure primitives for ledgerkit: binary values, protocol digests, crypto
//! providers, addresses and accounts.
//!
//! This crate does no I/O. Everything is computation over keys and bytes.
//!
//! ## Key Types
//!
//! - [`Binary`] - Immutable bytes with base58 / base64 / hex views
//! - [`Address`] - 26-byte checksummed network address
//! - [`Account`] - Sign / encrypt keypairs bound to an address
//! - [`AccountFactory`] - Deterministic derivation from passphrase and nonce
//! - [`CryptoProvider`] - One implementation per signature scheme
//!
//! ## Hashing
//!
//! Addresses use `secure_hash = sha256(blake2b256(x))`. See [`digest`].

pub mod account;
pub mod address;
pub mod binary;
pub mod crypto;
pub mod digest;
pub mod error;
pub mod factory;
pub mod keys;

pub use account::Account;
pub use address::{is_valid as is_valid_address, Address, ADDRESS_LEN, MAINNET, TESTNET};
pub use binary::Binary;
pub use crypto::{provider_for, CryptoProvider, EcdsaCurve, EcdsaProvider, Ed25519Provider, SecureRng};
pub use digest::{blake2b256, secure_hash, sha256, sha512};
pub use error::{CoreError, Result};
pub use factory::{derive_seed, AccountFactory, FactoryConfig, KeyMaterial, PartialKeyPair};
pub use keys::{KeyPair, KeyRole, KeyType};
