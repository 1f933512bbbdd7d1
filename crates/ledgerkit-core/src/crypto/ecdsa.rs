//! ECDSA signature-only provider over secp256k1 or secp256r1.
//!
//! Public keys are compressed SEC1 points (33 bytes); signatures are DER.
//! This provider has no encryption keypair.

use k256::ecdsa::signature::{Signer, Verifier};

use super::{CryptoProvider, SecureRng};
use crate::binary::Binary;
use crate::error::{CoreError, Result};
use crate::keys::{KeyPair, KeyRole, KeyType};

/// The named curve an [`EcdsaProvider`] operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EcdsaCurve {
    Secp256k1,
    Secp256r1,
}

#[derive(Debug, Clone, Copy)]
pub struct EcdsaProvider {
    curve: EcdsaCurve,
}

impl EcdsaProvider {
    pub fn new(curve: EcdsaCurve) -> Self {
        Self { curve }
    }

    pub fn curve(&self) -> EcdsaCurve {
        self.curve
    }

    fn unsupported(&self, what: &str) -> CoreError {
        CoreError::UnsupportedOperation(format!("{what} is not available for {}", self.key_type()))
    }
}

fn bad_secret(_: impl std::fmt::Debug) -> CoreError {
    CoreError::Validation("invalid ECDSA secret key".into())
}

impl CryptoProvider for EcdsaProvider {
    fn key_type(&self) -> KeyType {
        match self.curve {
            EcdsaCurve::Secp256k1 => KeyType::Secp256k1,
            EcdsaCurve::Secp256r1 => KeyType::Secp256r1,
        }
    }

    fn sign(&self, secret: &Binary, message: &[u8]) -> Result<Binary> {
        let der = match self.curve {
            EcdsaCurve::Secp256k1 => {
                let key = k256::ecdsa::SigningKey::from_slice(secret.as_bytes()).map_err(bad_secret)?;
                let sig: k256::ecdsa::Signature = key.sign(message);
                sig.to_der().as_bytes().to_vec()
            }
            EcdsaCurve::Secp256r1 => {
                let key = p256::ecdsa::SigningKey::from_slice(secret.as_bytes()).map_err(bad_secret)?;
                let sig: p256::ecdsa::Signature = key.sign(message);
                sig.to_der().as_bytes().to_vec()
            }
        };
        Ok(Binary::from(der))
    }

    fn verify(&self, public: &Binary, message: &[u8], signature: &Binary) -> bool {
        match self.curve {
            EcdsaCurve::Secp256k1 => {
                let Ok(key) = k256::ecdsa::VerifyingKey::from_sec1_bytes(public.as_bytes()) else {
                    return false;
                };
                let Ok(sig) = k256::ecdsa::Signature::from_der(signature.as_bytes()) else {
                    return false;
                };
                key.verify(message, &sig).is_ok()
            }
            EcdsaCurve::Secp256r1 => {
                let Ok(key) = p256::ecdsa::VerifyingKey::from_sec1_bytes(public.as_bytes()) else {
                    return false;
                };
                let Ok(sig) = p256::ecdsa::Signature::from_der(signature.as_bytes()) else {
                    return false;
                };
                key.verify(message, &sig).is_ok()
            }
        }
    }

    fn encrypt(
        &self,
        _sender_secret: &Binary,
        _recipient_public: &Binary,
        _message: &[u8],
        _rng: &mut dyn SecureRng,
    ) -> Result<Binary> {
        Err(self.unsupported("encryption"))
    }

    fn decrypt(
        &self,
        _recipient_secret: &Binary,
        _sender_public: &Binary,
        _ciphertext: &[u8],
    ) -> Result<Binary> {
        Err(self.unsupported("decryption"))
    }

    fn derive_sign_key_pair(&self, seed: &[u8; 32]) -> Result<KeyPair> {
        let secret = Binary::from(*seed);
        let public = self.public_from_secret(&secret, KeyRole::Sign)?;
        Ok(KeyPair::new(public, secret))
    }

    fn derive_encrypt_key_pair(&self, _seed: &[u8; 32]) -> Result<KeyPair> {
        Err(self.unsupported("an encrypt keypair"))
    }

    fn public_from_secret(&self, secret: &Binary, role: KeyRole) -> Result<Binary> {
        if role == KeyRole::Encrypt {
            return Err(self.unsupported("an encrypt keypair"));
        }
        let point = match self.curve {
            EcdsaCurve::Secp256k1 => k256::ecdsa::SigningKey::from_slice(secret.as_bytes())
                .map_err(bad_secret)?
                .verifying_key()
                .to_encoded_point(true)
                .as_bytes()
                .to_vec(),
            EcdsaCurve::Secp256r1 => p256::ecdsa::SigningKey::from_slice(secret.as_bytes())
                .map_err(bad_secret)?
                .verifying_key()
                .to_encoded_point(true)
                .as_bytes()
                .to_vec(),
        };
        Ok(Binary::from(point))
    }

    fn convert_sign_to_encrypt(&self, _sign: &KeyPair) -> Result<KeyPair> {
        Err(self.unsupported("sign-to-encrypt conversion"))
    }

    fn sign_public_candidates(&self, _encrypt_public: &Binary) -> Result<Vec<Binary>> {
        Err(self.unsupported("encrypt-to-sign conversion"))
    }
}
