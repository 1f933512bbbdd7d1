//! Accounts: a signing / encryption identity plus its address.

use rand::rngs::OsRng;
use std::fmt;
use std::sync::Arc;

use crate::address::Address;
use crate::binary::Binary;
use crate::crypto::{CryptoProvider, SecureRng};
use crate::error::{CoreError, Result};
use crate::keys::{KeyPair, KeyRole, KeyType};

/// A signing and encryption identity bound to an address.
///
/// Built once by [`AccountFactory`](crate::AccountFactory); fields do not
/// change afterwards. Either keypair may be absent.
#[derive(Clone)]
pub struct Account {
    address: Address,
    sign: Option<KeyPair>,
    encrypt: Option<KeyPair>,
    provider: Arc<dyn CryptoProvider>,
}

impl Account {
    /// Assemble an account. Callers are expected to have cross-checked the
    /// parts; [`AccountFactory`](crate::AccountFactory) does so.
    pub(crate) fn from_parts(
        address: Address,
        sign: Option<KeyPair>,
        encrypt: Option<KeyPair>,
        provider: Arc<dyn CryptoProvider>,
    ) -> Self {
        Self {
            address,
            sign,
            encrypt,
            provider,
        }
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn network(&self) -> u8 {
        self.address.network()
    }

    pub fn key_type(&self) -> KeyType {
        self.provider.key_type()
    }

    pub fn sign_key(&self) -> Option<&KeyPair> {
        self.sign.as_ref()
    }

    pub fn encrypt_key(&self) -> Option<&KeyPair> {
        self.encrypt.as_ref()
    }

    pub fn provider(&self) -> &dyn CryptoProvider {
        self.provider.as_ref()
    }

    /// The public sign key.
    pub fn public_key(&self) -> Result<&Binary> {
        self.sign
            .as_ref()
            .map(|kp| &kp.public)
            .ok_or(CoreError::NoPublicKey(KeyRole::Sign))
    }

    fn secret(&self, role: KeyRole) -> Result<&Binary> {
        let pair = match role {
            KeyRole::Sign => self.sign.as_ref(),
            KeyRole::Encrypt => self.encrypt.as_ref(),
        };
        pair.and_then(|kp| kp.secret.as_ref())
            .ok_or(CoreError::NoSecretKey(role))
    }

    fn public(&self, role: KeyRole) -> Result<&Binary> {
        let pair = match role {
            KeyRole::Sign => self.sign.as_ref(),
            KeyRole::Encrypt => self.encrypt.as_ref(),
        };
        pair.map(|kp| &kp.public).ok_or(CoreError::NoPublicKey(role))
    }

    /// Whether this account can sign.
    pub fn has_secret(&self) -> bool {
        self.secret(KeyRole::Sign).is_ok()
    }

    /// Sign a message with the sign secret key.
    pub fn sign(&self, message: &[u8]) -> Result<Binary> {
        let secret = self.secret(KeyRole::Sign)?;
        self.provider.sign(secret, message)
    }

    /// Verify a signature made by this account.
    ///
    /// Returns `Ok(false)` for any non-matching or malformed signature.
    pub fn verify(&self, message: &[u8], signature: &Binary) -> Result<bool> {
        let public = self.public(KeyRole::Sign)?;
        Ok(self.provider.verify(public, message, signature))
    }

    /// Verify a third-party signature against `public` with this account's
    /// key type.
    pub fn verify_with(&self, public: &Binary, message: &[u8], signature: &Binary) -> bool {
        self.provider.verify(public, message, signature)
    }

    /// Encrypt a message that only `recipient` can open.
    pub fn encrypt_for(&self, recipient: &Account, message: &[u8]) -> Result<Binary> {
        self.encrypt_for_with_rng(recipient, message, &mut OsRng)
    }

    /// [`Account::encrypt_for`] with an explicit random source for the nonce.
    pub fn encrypt_for_with_rng(
        &self,
        recipient: &Account,
        message: &[u8],
        rng: &mut dyn SecureRng,
    ) -> Result<Binary> {
        let secret = self.secret(KeyRole::Encrypt)?;
        let recipient_public = recipient.public(KeyRole::Encrypt)?;
        self.provider.encrypt(secret, recipient_public, message, rng)
    }

    /// Open a message `sender` encrypted for this account.
    pub fn decrypt_from(&self, sender: &Account, ciphertext: &Binary) -> Result<Binary> {
        let secret = self.secret(KeyRole::Encrypt)?;
        let sender_public = sender.public(KeyRole::Encrypt)?;
        self.provider.decrypt(secret, sender_public, ciphertext.as_bytes())
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("address", &self.address)
            .field("key_type", &self.key_type())
            .field("sign", &self.sign)
            .field("encrypt", &self.encrypt)
            .finish()
    }
}

impl PartialEq for Account {
    fn eq(&self, other: &Self) -> bool {
        self.address == other.address
            && self.sign == other.sign
            && self.encrypt == other.encrypt
            && self.key_type() == other.key_type()
    }
}

impl Eq for Account {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::TESTNET;
    use crate::factory::{AccountFactory, KeyMaterial};

    fn account(passphrase: &str) -> Account {
        AccountFactory::new(TESTNET)
            .create_from_seed(passphrase, 0)
            .unwrap()
    }

    #[test]
    fn test_sign_and_verify() {
        let acc = account("alice");
        let sig = acc.sign(b"payload").unwrap();
        assert!(acc.verify(b"payload", &sig).unwrap());
        assert!(!acc.verify(b"payloaD", &sig).unwrap());
        assert!(!acc.verify(b"payload", &Binary::from([0u8; 10])).unwrap());
    }

    #[test]
    fn test_verify_other_account_signature_is_false() {
        let alice = account("alice");
        let bob = account("bob");
        let sig = alice.sign(b"payload").unwrap();
        assert!(!bob.verify(b"payload", &sig).unwrap());
    }

    #[test]
    fn test_verify_with_third_party_key() {
        let alice = account("alice");
        let bob = account("bob");
        let sig = bob.sign(b"from bob").unwrap();
        assert!(alice.verify_with(bob.public_key().unwrap(), b"from bob", &sig));
        assert!(!alice.verify_with(alice.public_key().unwrap(), b"from bob", &sig));
    }

    #[test]
    fn test_encrypt_for_and_decrypt_from() {
        let alice = account("alice");
        let bob = account("bob");

        let sealed = alice.encrypt_for(&bob, b"for bob only").unwrap();
        let opened = bob.decrypt_from(&alice, &sealed).unwrap();
        assert_eq!(opened.as_bytes(), b"for bob only");

        let carol = account("carol");
        assert!(matches!(
            carol.decrypt_from(&alice, &sealed).unwrap_err(),
            CoreError::Decrypt
        ));
    }

    #[test]
    fn test_missing_key_material() {
        let alice = account("alice");
        let public_only = AccountFactory::new(TESTNET)
            .create_from_public_key(alice.public_key().unwrap())
            .unwrap();

        assert!(matches!(
            public_only.sign(b"x").unwrap_err(),
            CoreError::NoSecretKey(KeyRole::Sign)
        ));
        // Verification still works without a secret
        let sig = alice.sign(b"x").unwrap();
        assert!(public_only.verify(b"x", &sig).unwrap());

        let address_only = AccountFactory::new(TESTNET)
            .create_from_key_material(KeyMaterial {
                address: Some(*alice.address()),
                ..Default::default()
            })
            .unwrap();
        assert!(matches!(
            address_only.verify(b"x", &sig).unwrap_err(),
            CoreError::NoPublicKey(KeyRole::Sign)
        ));
        assert!(matches!(
            address_only.encrypt_for(&alice, b"x").unwrap_err(),
            CoreError::NoSecretKey(KeyRole::Encrypt)
        ));
        assert!(matches!(
            alice.encrypt_for(&address_only, b"x").unwrap_err(),
            CoreError::NoPublicKey(KeyRole::Encrypt)
        ));
    }

    #[test]
    fn test_debug_hides_secrets() {
        let alice = account("alice");
        let secret = alice.sign_key().unwrap().secret.clone().unwrap();
        let debug = format!("{alice:?}");
        assert!(!debug.contains(&secret.to_base58()));
    }
}
