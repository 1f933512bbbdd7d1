//! Key material containers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::binary::Binary;
use crate::error::CoreError;

/// The signature scheme a key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyType {
    Ed25519,
    Secp256k1,
    Secp256r1,
}

impl KeyType {
    /// Protocol identifier written into v3 transaction headers.
    pub fn to_id(self) -> u8 {
        match self {
            Self::Ed25519 => 1,
            Self::Secp256k1 => 2,
            Self::Secp256r1 => 3,
        }
    }

    /// Parse from the protocol identifier.
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Self::Ed25519),
            2 => Some(Self::Secp256k1),
            3 => Some(Self::Secp256r1),
            _ => None,
        }
    }

    /// Look up a key type by its protocol name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ed25519" => Some(Self::Ed25519),
            "secp256k1" => Some(Self::Secp256k1),
            "secp256r1" => Some(Self::Secp256r1),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Ed25519 => "ed25519",
            Self::Secp256k1 => "secp256k1",
            Self::Secp256r1 => "secp256r1",
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for KeyType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
            .ok_or_else(|| CoreError::InvalidArgument(format!("unknown key type '{s}'")))
    }
}

/// Which of an account's two keypairs an operation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyRole {
    Sign,
    Encrypt,
}

impl fmt::Display for KeyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sign => f.write_str("sign"),
            Self::Encrypt => f.write_str("encrypt"),
        }
    }
}

/// A public key with an optional secret key.
///
/// Absence of the secret is an ordinary state (verification-only accounts).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPair {
    #[serde(rename = "publicKey")]
    pub public: Binary,
    #[serde(rename = "privateKey", default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<Binary>,
}

impl KeyPair {
    pub fn new(public: Binary, secret: Binary) -> Self {
        Self {
            public,
            secret: Some(secret),
        }
    }

    /// A keypair holding only the public half.
    pub fn public_only(public: Binary) -> Self {
        Self {
            public,
            secret: None,
        }
    }

    pub fn has_secret(&self) -> bool {
        self.secret.is_some()
    }

    /// The same keypair without its secret.
    pub fn to_public(&self) -> Self {
        Self::public_only(self.public.clone())
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public", &self.public.to_base58())
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_type_ids_roundtrip() {
        for kt in [KeyType::Ed25519, KeyType::Secp256k1, KeyType::Secp256r1] {
            assert_eq!(KeyType::from_id(kt.to_id()), Some(kt));
            assert_eq!(kt.name().parse::<KeyType>().unwrap(), kt);
        }
        assert_eq!(KeyType::from_id(0), None);
        assert!("rsa".parse::<KeyType>().is_err());
        assert_eq!(KeyType::from_name("secp256r1"), Some(KeyType::Secp256r1));
        assert_eq!(KeyType::from_name("Ed25519"), None);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let kp = KeyPair::new(Binary::from([1u8; 32]), Binary::from([2u8; 32]));
        let debug = format!("{kp:?}");
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains(&Binary::from([2u8; 32]).to_base58()));
    }

    #[test]
    fn test_public_only_has_no_secret() {
        let kp = KeyPair::new(Binary::from([1u8; 32]), Binary::from([2u8; 32]));
        assert!(kp.has_secret());
        assert!(!kp.to_public().has_secret());
        assert_eq!(kp.to_public().public, kp.public);
    }
}
