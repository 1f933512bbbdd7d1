//! Ed25519 signatures with X25519 / XSalsa20-Poly1305 encryption.
//!
//! Encrypted messages are `box(message) || nonce`: the 24-byte nonce trails
//! the ciphertext.

use crypto_box::aead::generic_array::GenericArray;
use crypto_box::aead::Aead;
use crypto_box::SalsaBox;
use curve25519_dalek::montgomery::MontgomeryPoint;
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use x25519_dalek::{PublicKey as X25519Public, StaticSecret};
use zeroize::Zeroize;

use super::{clamp_scalar, CryptoProvider, SecureRng};
use crate::binary::Binary;
use crate::digest::sha512;
use crate::error::{CoreError, Result};
use crate::keys::{KeyPair, KeyRole, KeyType};

/// Length of the nonce appended to every ciphertext.
pub const NONCE_LEN: usize = 24;

/// Poly1305 tag length.
const TAG_LEN: usize = 16;

/// The full provider: signing plus encryption on the matching curve.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Provider;

/// Build a signing key from a 32-byte seed or a 64-byte `seed || public`.
fn signing_key(secret: &Binary) -> Result<SigningKey> {
    match secret.len() {
        32 | 64 => {
            let mut seed = [0u8; 32];
            seed.copy_from_slice(&secret.as_bytes()[..32]);
            let key = SigningKey::from_bytes(&seed);
            seed.zeroize();
            Ok(key)
        }
        n => Err(CoreError::Validation(format!(
            "ed25519 secret key must be 32 or 64 bytes, got {n}"
        ))),
    }
}

fn key32(key: &Binary, what: &str) -> Result<[u8; 32]> {
    key.to_array::<32>()
        .map_err(|_| CoreError::Validation(format!("{what} must be 32 bytes, got {}", key.len())))
}

fn x25519_public(secret: &[u8; 32]) -> Binary {
    let secret = StaticSecret::from(*secret);
    Binary::from(X25519Public::from(&secret).to_bytes())
}

fn salsa_box(secret: &Binary, public: &Binary) -> Result<SalsaBox> {
    let secret = crypto_box::SecretKey::from(key32(secret, "encrypt secret key")?);
    let public = crypto_box::PublicKey::from(key32(public, "encrypt public key")?);
    Ok(SalsaBox::new(&public, &secret))
}

impl CryptoProvider for Ed25519Provider {
    fn key_type(&self) -> KeyType {
        KeyType::Ed25519
    }

    fn sign(&self, secret: &Binary, message: &[u8]) -> Result<Binary> {
        let key = signing_key(secret)?;
        Ok(Binary::from(key.sign(message).to_bytes()))
    }

    fn verify(&self, public: &Binary, message: &[u8], signature: &Binary) -> bool {
        let Ok(public) = public.to_array::<32>() else {
            return false;
        };
        let Ok(key) = VerifyingKey::from_bytes(&public) else {
            return false;
        };
        let Ok(signature) = Signature::from_slice(signature.as_bytes()) else {
            return false;
        };
        key.verify(message, &signature).is_ok()
    }

    fn encrypt(
        &self,
        sender_secret: &Binary,
        recipient_public: &Binary,
        message: &[u8],
        rng: &mut dyn SecureRng,
    ) -> Result<Binary> {
        let salsa = salsa_box(sender_secret, recipient_public)?;

        let mut nonce = [0u8; NONCE_LEN];
        rng.fill_bytes(&mut nonce);

        let mut sealed = salsa
            .encrypt(GenericArray::from_slice(&nonce), message)
            .map_err(|_| CoreError::InvalidArgument("message could not be sealed".into()))?;
        sealed.extend_from_slice(&nonce);
        Ok(Binary::from(sealed))
    }

    fn decrypt(
        &self,
        recipient_secret: &Binary,
        sender_public: &Binary,
        ciphertext: &[u8],
    ) -> Result<Binary> {
        if ciphertext.len() < NONCE_LEN + TAG_LEN {
            return Err(CoreError::Decrypt);
        }
        let salsa = salsa_box(recipient_secret, sender_public)?;
        let (sealed, nonce) = ciphertext.split_at(ciphertext.len() - NONCE_LEN);

        salsa
            .decrypt(GenericArray::from_slice(nonce), sealed)
            .map(Binary::from)
            .map_err(|_| CoreError::Decrypt)
    }

    fn derive_sign_key_pair(&self, seed: &[u8; 32]) -> Result<KeyPair> {
        let key = SigningKey::from_bytes(seed);
        Ok(KeyPair::new(
            Binary::from(key.verifying_key().to_bytes()),
            Binary::from(*seed),
        ))
    }

    /// Direct path: `clamp(sha512(seed)[0..32])`.
    fn derive_encrypt_key_pair(&self, seed: &[u8; 32]) -> Result<KeyPair> {
        let mut hash = sha512(seed);
        let mut secret = [0u8; 32];
        secret.copy_from_slice(&hash[..32]);
        hash.zeroize();
        clamp_scalar(&mut secret);

        let pair = KeyPair::new(x25519_public(&secret), Binary::from(secret));
        secret.zeroize();
        Ok(pair)
    }

    fn public_from_secret(&self, secret: &Binary, role: KeyRole) -> Result<Binary> {
        match role {
            KeyRole::Sign => {
                let public = signing_key(secret)?.verifying_key().to_bytes();
                if secret.len() == 64 && secret.as_bytes()[32..] != public {
                    return Err(CoreError::KeyMismatch(
                        "public sign key doesn't match private sign key".into(),
                    ));
                }
                Ok(Binary::from(public))
            }
            KeyRole::Encrypt => Ok(x25519_public(&key32(secret, "encrypt secret key")?)),
        }
    }

    /// Conversion path: the signing key's scalar bytes, clamped.
    fn convert_sign_to_encrypt(&self, sign: &KeyPair) -> Result<KeyPair> {
        match &sign.secret {
            Some(secret) => {
                let mut scalar = signing_key(secret)?.to_scalar_bytes();
                clamp_scalar(&mut scalar);
                let pair = KeyPair::new(x25519_public(&scalar), Binary::from(scalar));
                scalar.zeroize();
                Ok(pair)
            }
            None => {
                let key = VerifyingKey::from_bytes(&key32(&sign.public, "sign public key")?)
                    .map_err(|_| CoreError::Validation("invalid ed25519 public key".into()))?;
                Ok(KeyPair::public_only(Binary::from(
                    key.to_montgomery().to_bytes(),
                )))
            }
        }
    }

    /// The Montgomery form drops the sign of x, so up to two Edwards keys map
    /// to one encrypt key.
    fn sign_public_candidates(&self, encrypt_public: &Binary) -> Result<Vec<Binary>> {
        let point = MontgomeryPoint(key32(encrypt_public, "encrypt public key")?);
        Ok((0u8..2)
            .filter_map(|sign| point.to_edwards(sign))
            .map(|edwards| Binary::from(edwards.compress().to_bytes()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;

    fn pair(seed: u8) -> (KeyPair, KeyPair) {
        let p = Ed25519Provider;
        let sign = p.derive_sign_key_pair(&[seed; 32]).unwrap();
        let encrypt = p.derive_encrypt_key_pair(&[seed; 32]).unwrap();
        (sign, encrypt)
    }

    #[test]
    fn test_sign_verify() {
        let p = Ed25519Provider;
        let (sign, _) = pair(1);
        let secret = sign.secret.clone().unwrap();
        let sig = p.sign(&secret, b"hello world").unwrap();
        assert_eq!(sig.len(), 64);

        assert!(p.verify(&sign.public, b"hello world", &sig));
        assert!(!p.verify(&sign.public, b"hello worlD", &sig));
    }

    #[test]
    fn test_verify_malformed_input_is_false() {
        let p = Ed25519Provider;
        let (sign, _) = pair(2);
        let sig = p.sign(sign.secret.as_ref().unwrap(), b"msg").unwrap();

        assert!(!p.verify(&Binary::from([1u8; 31]), b"msg", &sig));
        assert!(!p.verify(&sign.public, b"msg", &Binary::from([0u8; 63])));
        assert!(!p.verify(&sign.public, b"msg", &Binary::default()));
    }

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let p = Ed25519Provider;
        let (_, alice) = pair(3);
        let (_, bob) = pair(4);

        let sealed = p
            .encrypt(alice.secret.as_ref().unwrap(), &bob.public, b"secret", &mut OsRng)
            .unwrap();
        assert_eq!(sealed.len(), b"secret".len() + TAG_LEN + NONCE_LEN);

        let opened = p
            .decrypt(bob.secret.as_ref().unwrap(), &alice.public, sealed.as_bytes())
            .unwrap();
        assert_eq!(opened.as_bytes(), b"secret");
    }

    #[test]
    fn test_decrypt_wrong_key_fails() {
        let p = Ed25519Provider;
        let (_, alice) = pair(5);
        let (_, bob) = pair(6);
        let (_, eve) = pair(7);

        let sealed = p
            .encrypt(alice.secret.as_ref().unwrap(), &bob.public, b"secret", &mut OsRng)
            .unwrap();
        let err = p
            .decrypt(eve.secret.as_ref().unwrap(), &alice.public, sealed.as_bytes())
            .unwrap_err();
        assert!(matches!(err, CoreError::Decrypt));
    }

    #[test]
    fn test_decrypt_truncated_fails() {
        let p = Ed25519Provider;
        let (_, alice) = pair(8);
        let err = p
            .decrypt(alice.secret.as_ref().unwrap(), &alice.public, &[0u8; 20])
            .unwrap_err();
        assert!(matches!(err, CoreError::Decrypt));
    }

    #[test]
    fn test_both_encrypt_paths_agree() {
        let p = Ed25519Provider;
        let (sign, direct) = pair(9);
        let converted = p.convert_sign_to_encrypt(&sign).unwrap();
        assert_eq!(direct, converted);

        let secret = direct.secret.unwrap();
        assert_eq!(secret.as_bytes()[0] & 7, 0);
        assert_eq!(secret.as_bytes()[31] & 0xc0, 0x40);
    }

    #[test]
    fn test_public_only_conversion_matches() {
        let p = Ed25519Provider;
        let (sign, direct) = pair(10);
        let converted = p.convert_sign_to_encrypt(&sign.to_public()).unwrap();
        assert_eq!(converted.public, direct.public);
        assert!(converted.secret.is_none());
    }

    #[test]
    fn test_sign_candidates_contain_original_key() {
        let p = Ed25519Provider;
        for seed in 12..20 {
            let (sign, encrypt) = pair(seed);
            let candidates = p.sign_public_candidates(&encrypt.public).unwrap();
            assert_eq!(candidates.len(), 2);
            assert!(candidates.contains(&sign.public));
        }
        assert!(p.sign_public_candidates(&Binary::from([1u8; 31])).is_err());
    }

    #[test]
    fn test_public_from_secret() {
        let p = Ed25519Provider;
        let (sign, encrypt) = pair(11);
        let sign_secret = sign.secret.clone().unwrap();
        assert_eq!(p.public_from_secret(&sign_secret, KeyRole::Sign).unwrap(), sign.public);
        assert_eq!(
            p.public_from_secret(encrypt.secret.as_ref().unwrap(), KeyRole::Encrypt).unwrap(),
            encrypt.public
        );

        // 64-byte NaCl form: seed || public
        let mut full = sign_secret.to_vec();
        full.extend_from_slice(sign.public.as_bytes());
        assert_eq!(
            p.public_from_secret(&Binary::from(full.clone()), KeyRole::Sign).unwrap(),
            sign.public
        );

        full[63] ^= 1;
        let err = p.public_from_secret(&Binary::from(full), KeyRole::Sign).unwrap_err();
        assert!(matches!(err, CoreError::KeyMismatch(_)));
    }
}
