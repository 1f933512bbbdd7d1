//! Key derivation: building accounts from passphrases or key material.

use serde::Deserialize;
use std::fmt;
use std::sync::Arc;
use zeroize::Zeroize;

use crate::account::Account;
use crate::address::{Address, TESTNET};
use crate::binary::Binary;
use crate::crypto::{provider_for, CryptoProvider, SecureRng};
use crate::digest::{secure_hash, sha256};
use crate::error::{CoreError, Result};
use crate::keys::{KeyPair, KeyRole, KeyType};

/// Configuration for an [`AccountFactory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactoryConfig {
    /// Network byte embedded in derived addresses.
    pub network: u8,
    /// Signature scheme of derived accounts.
    pub key_type: KeyType,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            network: TESTNET,
            key_type: KeyType::Ed25519,
        }
    }
}

/// Derive the 32-byte seed for `(passphrase, nonce)`.
///
/// `sha256(secure_hash(nonce_le32 || utf8(passphrase)))`. Different nonces give
/// independent accounts from one passphrase.
pub fn derive_seed(passphrase: &str, nonce: u32) -> [u8; 32] {
    let mut input = Vec::with_capacity(4 + passphrase.len());
    input.extend_from_slice(&nonce.to_le_bytes());
    input.extend_from_slice(passphrase.as_bytes());

    let mut inner = secure_hash(&input);
    let seed = sha256(&inner);
    input.zeroize();
    inner.zeroize();
    seed
}

/// One role's worth of externally supplied keys.
#[derive(Clone, Default, Deserialize)]
pub struct PartialKeyPair {
    #[serde(rename = "publicKey", default)]
    pub public: Option<Binary>,
    #[serde(rename = "privateKey", default)]
    pub secret: Option<Binary>,
}

impl PartialKeyPair {
    pub fn from_secret(secret: Binary) -> Self {
        Self {
            public: None,
            secret: Some(secret),
        }
    }

    pub fn from_public(public: Binary) -> Self {
        Self {
            public: Some(public),
            secret: None,
        }
    }
}

impl fmt::Debug for PartialKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartialKeyPair")
            .field("public", &self.public)
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Any subset of an account's keys and address.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeyMaterial {
    #[serde(default)]
    pub sign: Option<PartialKeyPair>,
    #[serde(default)]
    pub encrypt: Option<PartialKeyPair>,
    #[serde(default)]
    pub address: Option<Address>,
}

/// Builds [`Account`]s for one network and key type.
#[derive(Debug, Clone)]
pub struct AccountFactory {
    config: FactoryConfig,
    provider: Arc<dyn CryptoProvider>,
}

impl AccountFactory {
    /// An ed25519 factory for `network`.
    pub fn new(network: u8) -> Self {
        Self::with_config(FactoryConfig {
            network,
            ..FactoryConfig::default()
        })
    }

    pub fn with_config(config: FactoryConfig) -> Self {
        Self {
            provider: provider_for(config.key_type),
            config,
        }
    }

    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }

    pub fn network(&self) -> u8 {
        self.config.network
    }

    /// Derive an account from a passphrase and nonce.
    pub fn create_from_seed(&self, passphrase: &str, nonce: u32) -> Result<Account> {
        let mut seed = derive_seed(passphrase, nonce);
        let account = self.create_from_seed_bytes(&seed);
        seed.zeroize();
        account
    }

    /// Derive an account from an already derived 32-byte seed.
    pub fn create_from_seed_bytes(&self, seed: &[u8; 32]) -> Result<Account> {
        let sign = self.provider.derive_sign_key_pair(seed)?;
        let encrypt = optional(self.provider.derive_encrypt_key_pair(seed))?;
        let address = Address::derive(sign.public.as_bytes(), self.config.network);

        tracing::debug!(
            key_type = %self.config.key_type,
            network = %char::from(self.config.network),
            %address,
            "derived account from seed"
        );
        Ok(Account::from_parts(
            address,
            Some(sign),
            encrypt,
            Arc::clone(&self.provider),
        ))
    }

    /// Create an account from a fresh random seed.
    pub fn create(&self, rng: &mut dyn SecureRng) -> Result<Account> {
        let mut seed = [0u8; 32];
        rng.fill_bytes(&mut seed);
        let account = self.create_from_seed_bytes(&seed);
        seed.zeroize();
        account
    }

    /// A verification-only account for a public sign key.
    pub fn create_from_public_key(&self, public: &Binary) -> Result<Account> {
        self.create_from_key_material(KeyMaterial {
            sign: Some(PartialKeyPair::from_public(public.clone())),
            ..KeyMaterial::default()
        })
    }

    /// Build an account from any subset of keys, cross-checking what is given.
    pub fn create_from_key_material(&self, material: KeyMaterial) -> Result<Account> {
        let sign = self.resolve_pair(material.sign, KeyRole::Sign)?;
        let mut encrypt = self.resolve_pair(material.encrypt, KeyRole::Encrypt)?;

        if let Some(sign) = &sign {
            match &encrypt {
                None => encrypt = optional(self.provider.convert_sign_to_encrypt(sign))?,
                Some(given) => {
                    let expected = optional(self.provider.convert_sign_to_encrypt(&sign.to_public()))?;
                    if expected.is_some_and(|kp| kp.public != given.public) {
                        return Err(CoreError::KeyMismatch(
                            "sign key doesn't match encrypt key".into(),
                        ));
                    }
                }
            }
        }

        let network = self.config.network;
        let address = match (&sign, &encrypt, material.address) {
            (Some(sign), _, given) => {
                let derived = Address::derive(sign.public.as_bytes(), network);
                if given.is_some_and(|given| given != derived) {
                    return Err(CoreError::KeyMismatch(
                        "address doesn't match keypair; possible network mismatch".into(),
                    ));
                }
                derived
            }
            (None, Some(encrypt), Some(given)) => {
                let candidates = self
                    .provider
                    .sign_public_candidates(&encrypt.public)
                    .map_err(|_| {
                        CoreError::KeyMismatch("address can't be checked against encrypt key".into())
                    })?;
                if !candidates
                    .iter()
                    .any(|public| Address::derive(public.as_bytes(), network) == given)
                {
                    return Err(CoreError::KeyMismatch(
                        "address doesn't match keypair; possible network mismatch".into(),
                    ));
                }
                given
            }
            (None, Some(_), None) => {
                return Err(CoreError::InvalidArgument(
                    "an encrypt key alone doesn't determine an address; supply the address".into(),
                ));
            }
            (None, None, Some(given)) => {
                if !given.is_valid_for(network) {
                    return Err(CoreError::Validation(format!(
                        "address {given} is not valid for network '{}'",
                        char::from(network)
                    )));
                }
                given
            }
            (None, None, None) => {
                return Err(CoreError::InvalidArgument(
                    "key material needs a sign key or an address".into(),
                ));
            }
        };

        tracing::debug!(
            %address,
            has_sign = sign.is_some(),
            has_encrypt = encrypt.is_some(),
            "built account from key material"
        );
        Ok(Account::from_parts(
            address,
            sign,
            encrypt,
            Arc::clone(&self.provider),
        ))
    }

    fn resolve_pair(&self, part: Option<PartialKeyPair>, role: KeyRole) -> Result<Option<KeyPair>> {
        let Some(part) = part else {
            return Ok(None);
        };
        match (part.public, part.secret) {
            (public, Some(secret)) => {
                let derived = self.provider.public_from_secret(&secret, role)?;
                if public.is_some_and(|given| given != derived) {
                    return Err(CoreError::KeyMismatch(format!(
                        "public {role} key doesn't match private {role} key"
                    )));
                }
                Ok(Some(KeyPair::new(derived, secret)))
            }
            (Some(public), None) => Ok(Some(KeyPair::public_only(public))),
            (None, None) => Ok(None),
        }
    }
}

impl Default for AccountFactory {
    fn default() -> Self {
        Self::with_config(FactoryConfig::default())
    }
}

/// Treat an unsupported provider capability as "no keypair".
fn optional(result: Result<KeyPair>) -> Result<Option<KeyPair>> {
    match result {
        Ok(pair) => Ok(Some(pair)),
        Err(CoreError::UnsupportedOperation(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::MAINNET;
    use rand::rngs::OsRng;

    #[test]
    fn test_derive_seed_vector() {
        let seed = derive_seed("test", 0);
        assert_eq!(
            bs58::encode(seed).into_string(),
            "9vqeQL1YNN9C8NdQ4GbkkPUk2dQe6J83zdGoNFa8sUvn"
        );
        assert_eq!(
            bs58::encode(derive_seed("test", 1)).into_string(),
            "4FCm2DRy5PqSk1S9o4NCxUfm7FHMsjjiafTHk3tVqSs5"
        );
    }

    #[test]
    fn test_account_vectors() {
        let testnet = AccountFactory::new(TESTNET).create_from_seed("test", 0).unwrap();
        assert_eq!(
            testnet.public_key().unwrap().to_base58(),
            "2KduZAmAKuXEL463udjCQkVfwJkBQhpciUC4gNiayjSJ"
        );
        assert_eq!(testnet.address().to_string(), "3N4mZ1qTrjWKnzBwAxscf7kfkoCs2HGQhJG");

        let mainnet = AccountFactory::new(MAINNET).create_from_seed("test", 0).unwrap();
        assert_eq!(mainnet.address().to_string(), "3Jr4j8y5Z44cnSipUmWx7EkVTmAoUaXu3Fx");

        let encrypt = testnet.encrypt_key().unwrap();
        assert_eq!(
            encrypt.public.to_base58(),
            "8GNG8pExbCTjQGHPgNRSan3xd4Q2tyY12VUFTQxTjmgJ"
        );
        assert_eq!(
            encrypt.secret.as_ref().unwrap().to_base58(),
            "BFkuyZGCV29tAJYCK8dLZQGNsN3CuWLj5x5vuttyToSf"
        );
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let f = AccountFactory::new(TESTNET);
        assert_eq!(f.create_from_seed("phrase", 7).unwrap(), f.create_from_seed("phrase", 7).unwrap());
        assert_ne!(
            f.create_from_seed("phrase", 7).unwrap().address(),
            f.create_from_seed("phrase", 8).unwrap().address()
        );
    }

    #[test]
    fn test_random_accounts_differ() {
        let f = AccountFactory::default();
        let a = f.create(&mut OsRng).unwrap();
        let b = f.create(&mut OsRng).unwrap();
        assert_ne!(a.address(), b.address());
    }

    #[test]
    fn test_from_sign_secret_matches_seed_account() {
        let f = AccountFactory::new(TESTNET);
        let original = f.create_from_seed("key material", 0).unwrap();
        let secret = original.sign_key().unwrap().secret.clone().unwrap();

        let rebuilt = f
            .create_from_key_material(KeyMaterial {
                sign: Some(PartialKeyPair::from_secret(secret)),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(rebuilt, original);
    }

    #[test]
    fn test_sign_key_mismatch() {
        let f = AccountFactory::new(TESTNET);
        let a = f.create_from_seed("a", 0).unwrap();
        let b = f.create_from_seed("b", 0).unwrap();

        let err = f
            .create_from_key_material(KeyMaterial {
                sign: Some(PartialKeyPair {
                    public: Some(b.public_key().unwrap().clone()),
                    secret: a.sign_key().unwrap().secret.clone(),
                }),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, CoreError::KeyMismatch(ref m) if m == "public sign key doesn't match private sign key"));
    }

    #[test]
    fn test_encrypt_key_mismatch() {
        let f = AccountFactory::new(TESTNET);
        let a = f.create_from_seed("a", 0).unwrap();
        let b = f.create_from_seed("b", 0).unwrap();

        let err = f
            .create_from_key_material(KeyMaterial {
                encrypt: Some(PartialKeyPair {
                    public: Some(b.encrypt_key().unwrap().public.clone()),
                    secret: a.encrypt_key().unwrap().secret.clone(),
                }),
                address: Some(*a.address()),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, CoreError::KeyMismatch(ref m) if m == "public encrypt key doesn't match private encrypt key"));
    }

    #[test]
    fn test_sign_and_encrypt_disagree() {
        let f = AccountFactory::new(TESTNET);
        let a = f.create_from_seed("a", 0).unwrap();
        let b = f.create_from_seed("b", 0).unwrap();

        let err = f
            .create_from_key_material(KeyMaterial {
                sign: Some(PartialKeyPair::from_public(a.public_key().unwrap().clone())),
                encrypt: Some(PartialKeyPair::from_public(b.encrypt_key().unwrap().public.clone())),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, CoreError::KeyMismatch(ref m) if m == "sign key doesn't match encrypt key"));
    }

    #[test]
    fn test_address_network_mismatch() {
        let testnet = AccountFactory::new(TESTNET).create_from_seed("a", 0).unwrap();
        let mainnet = AccountFactory::new(MAINNET);

        let err = mainnet
            .create_from_key_material(KeyMaterial {
                sign: Some(PartialKeyPair::from_public(testnet.public_key().unwrap().clone())),
                address: Some(*testnet.address()),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, CoreError::KeyMismatch(ref m) if m.contains("possible network mismatch")));
    }

    #[test]
    fn test_encrypt_key_with_own_address() {
        let f = AccountFactory::new(TESTNET);
        let a = f.create_from_seed("a", 0).unwrap();
        let only = f
            .create_from_key_material(KeyMaterial {
                encrypt: Some(PartialKeyPair::from_secret(
                    a.encrypt_key().unwrap().secret.clone().unwrap(),
                )),
                address: Some(*a.address()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(only.address(), a.address());
        assert_eq!(only.encrypt_key(), a.encrypt_key());
        assert!(only.sign_key().is_none());
    }

    #[test]
    fn test_encrypt_key_with_foreign_address() {
        let f = AccountFactory::new(TESTNET);
        let a = f.create_from_seed("a", 0).unwrap();
        let b = f.create_from_seed("b", 0).unwrap();

        let err = f
            .create_from_key_material(KeyMaterial {
                encrypt: Some(PartialKeyPair::from_secret(
                    a.encrypt_key().unwrap().secret.clone().unwrap(),
                )),
                address: Some(*b.address()),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, CoreError::KeyMismatch(ref m) if m.contains("possible network mismatch")));
    }

    #[test]
    fn test_encrypt_key_without_address() {
        let f = AccountFactory::new(TESTNET);
        let a = f.create_from_seed("a", 0).unwrap();
        let err = f
            .create_from_key_material(KeyMaterial {
                encrypt: Some(PartialKeyPair::from_public(a.encrypt_key().unwrap().public.clone())),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument(_)));
    }

    #[test]
    fn test_ecdsa_encrypt_key_cannot_vouch_for_address() {
        let ed = AccountFactory::new(TESTNET).create_from_seed("a", 0).unwrap();
        let f = AccountFactory::with_config(FactoryConfig {
            network: TESTNET,
            key_type: KeyType::Secp256k1,
        });
        let err = f
            .create_from_key_material(KeyMaterial {
                encrypt: Some(PartialKeyPair::from_public(ed.encrypt_key().unwrap().public.clone())),
                address: Some(*ed.address()),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, CoreError::KeyMismatch(_)));
    }

    #[test]
    fn test_address_only_account() {
        let f = AccountFactory::new(TESTNET);
        let a = f.create_from_seed("a", 0).unwrap();
        let only = f
            .create_from_key_material(KeyMaterial {
                address: Some(*a.address()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(only.address(), a.address());
        assert!(only.sign_key().is_none());
        assert!(only.encrypt_key().is_none());

        assert!(f.create_from_key_material(KeyMaterial::default()).is_err());
    }

    #[test]
    fn test_key_material_from_json() {
        let f = AccountFactory::new(TESTNET);
        let a = f.create_from_seed("json", 0).unwrap();
        let json = format!(
            r#"{{"sign": {{"privateKey": "{}"}}, "address": "{}"}}"#,
            a.sign_key().unwrap().secret.as_ref().unwrap(),
            a.address()
        );
        let material: KeyMaterial = serde_json::from_str(&json).unwrap();
        assert_eq!(f.create_from_key_material(material).unwrap(), a);
    }

    #[test]
    fn test_ecdsa_factory_has_no_encrypt_key() {
        let f = AccountFactory::with_config(FactoryConfig {
            network: TESTNET,
            key_type: KeyType::Secp256k1,
        });
        let acc = f.create_from_seed("ecdsa", 0).unwrap();
        assert_eq!(acc.key_type(), KeyType::Secp256k1);
        assert!(acc.encrypt_key().is_none());
        assert_eq!(acc.public_key().unwrap().len(), 33);

        let sig = acc.sign(b"m").unwrap();
        assert!(acc.verify(b"m", &sig).unwrap());

        let rebuilt = f
            .create_from_key_material(KeyMaterial {
                sign: Some(PartialKeyPair::from_secret(
                    acc.sign_key().unwrap().secret.clone().unwrap(),
                )),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(rebuilt, acc);
    }
}
