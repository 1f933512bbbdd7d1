//! Crypto providers: one capability interface, one implementation per
//! signature scheme.
//!
//! An [`Account`](crate::Account) owns exactly one provider, chosen when it is
//! built. Code outside this module never asks which provider it holds.

mod ecdsa;
mod ed25519;

use rand::{CryptoRng, RngCore};
use std::fmt;

use crate::binary::Binary;
use crate::error::Result;
use crate::keys::{KeyPair, KeyRole, KeyType};

pub use self::ecdsa::{EcdsaCurve, EcdsaProvider};
pub use self::ed25519::{Ed25519Provider, NONCE_LEN};

/// A cryptographically secure random source, usable as a trait object.
pub trait SecureRng: RngCore + CryptoRng {}

impl<T: RngCore + CryptoRng + ?Sized> SecureRng for T {}

/// Signing, verification, encryption and key derivation for one scheme.
pub trait CryptoProvider: fmt::Debug + Send + Sync {
    /// The signature scheme of keys produced by this provider.
    fn key_type(&self) -> KeyType;

    /// Sign `message` with a sign secret key.
    fn sign(&self, secret: &Binary, message: &[u8]) -> Result<Binary>;

    /// Check a detached signature. Malformed keys or signatures yield `false`.
    fn verify(&self, public: &Binary, message: &[u8], signature: &Binary) -> bool;

    /// Encrypt `message` from `sender_secret` to `recipient_public`.
    fn encrypt(
        &self,
        sender_secret: &Binary,
        recipient_public: &Binary,
        message: &[u8],
        rng: &mut dyn SecureRng,
    ) -> Result<Binary>;

    /// Open a message produced by [`CryptoProvider::encrypt`].
    fn decrypt(
        &self,
        recipient_secret: &Binary,
        sender_public: &Binary,
        ciphertext: &[u8],
    ) -> Result<Binary>;

    fn derive_sign_key_pair(&self, seed: &[u8; 32]) -> Result<KeyPair>;

    fn derive_encrypt_key_pair(&self, seed: &[u8; 32]) -> Result<KeyPair>;

    /// Recompute the public key belonging to `secret`.
    fn public_from_secret(&self, secret: &Binary, role: KeyRole) -> Result<Binary>;

    /// Derive the encryption keypair from an existing sign keypair.
    ///
    /// A sign keypair without a secret converts to a public-only keypair.
    fn convert_sign_to_encrypt(&self, sign: &KeyPair) -> Result<KeyPair>;

    /// Every sign public key that converts to `encrypt_public`.
    fn sign_public_candidates(&self, encrypt_public: &Binary) -> Result<Vec<Binary>>;
}

/// Apply Curve25519 scalar clamping in place.
pub(crate) fn clamp_scalar(bytes: &mut [u8; 32]) {
    bytes[0] &= 248;
    bytes[31] &= 127;
    bytes[31] |= 64;
}

/// Pick the provider for a key type.
pub fn provider_for(key_type: KeyType) -> std::sync::Arc<dyn CryptoProvider> {
    match key_type {
        KeyType::Ed25519 => std::sync::Arc::new(Ed25519Provider),
        KeyType::Secp256k1 => std::sync::Arc::new(EcdsaProvider::new(EcdsaCurve::Secp256k1)),
        KeyType::Secp256r1 => std::sync::Arc::new(EcdsaProvider::new(EcdsaCurve::Secp256r1)),
    }
}
