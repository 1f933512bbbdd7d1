//! Network addresses.
//!
//! Layout (26 bytes): `version(1) || network(1) || key_hash(20) || checksum(4)`
//! where `key_hash = secure_hash(public_key)[0..20]` and
//! `checksum = secure_hash(version || network || key_hash)[0..4]`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::digest::secure_hash;
use crate::error::{CoreError, Result};

/// Address format version byte.
pub const ADDRESS_VERSION: u8 = 1;

/// Length of a raw address.
pub const ADDRESS_LEN: usize = 26;

const KEY_HASH_LEN: usize = 20;
const CHECKSUM_LEN: usize = 4;

/// Mainnet network byte.
pub const MAINNET: u8 = b'L';

/// Testnet network byte.
pub const TESTNET: u8 = b'T';

/// A 26-byte network address.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address(pub [u8; ADDRESS_LEN]);

impl Address {
    /// Derive the address of a public key on a network.
    pub fn derive(public_key: &[u8], network: u8) -> Self {
        let key_hash = secure_hash(public_key);

        let mut raw = [0u8; ADDRESS_LEN];
        raw[0] = ADDRESS_VERSION;
        raw[1] = network;
        raw[2..2 + KEY_HASH_LEN].copy_from_slice(&key_hash[..KEY_HASH_LEN]);

        let checksum = secure_hash(&raw[..2 + KEY_HASH_LEN]);
        raw[2 + KEY_HASH_LEN..].copy_from_slice(&checksum[..CHECKSUM_LEN]);
        Self(raw)
    }

    /// Parse raw bytes, checking length, version and checksum.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let raw: [u8; ADDRESS_LEN] = bytes.try_into().map_err(|_| {
            CoreError::Validation(format!(
                "address must be {ADDRESS_LEN} bytes, got {}",
                bytes.len()
            ))
        })?;
        if raw[0] != ADDRESS_VERSION {
            return Err(CoreError::Validation(format!(
                "unknown address version {}",
                raw[0]
            )));
        }
        if !checksum_ok(&raw) {
            return Err(CoreError::Validation("invalid address checksum".into()));
        }
        Ok(Self(raw))
    }

    pub const fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// The network byte this address belongs to.
    pub fn network(&self) -> u8 {
        self.0[1]
    }

    /// Whether this address is well formed for `network`.
    pub fn is_valid_for(&self, network: u8) -> bool {
        is_valid(&self.0, network)
    }

    pub fn to_base58(&self) -> String {
        bs58::encode(self.0).into_string()
    }
}

fn checksum_ok(raw: &[u8; ADDRESS_LEN]) -> bool {
    let checksum = secure_hash(&raw[..2 + KEY_HASH_LEN]);
    raw[2 + KEY_HASH_LEN..] == checksum[..CHECKSUM_LEN]
}

/// Recompute and compare every part of a raw address.
pub fn is_valid(bytes: &[u8], network: u8) -> bool {
    let Ok(raw) = <[u8; ADDRESS_LEN]>::try_from(bytes) else {
        return false;
    };
    raw[0] == ADDRESS_VERSION && raw[1] == network && checksum_ok(&raw)
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_base58())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl FromStr for Address {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = bs58::decode(s)
            .into_vec()
            .map_err(|e| CoreError::Validation(format!("invalid address '{s}': {e}")))?;
        Self::from_bytes(&bytes)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base58())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_layout() {
        let addr = Address::derive(&[9u8; 32], TESTNET);
        assert_eq!(addr.0[0], ADDRESS_VERSION);
        assert_eq!(addr.network(), TESTNET);
        assert_eq!(&addr.0[2..22], &secure_hash(&[9u8; 32])[..20]);
        assert!(addr.is_valid_for(TESTNET));
        assert!(!addr.is_valid_for(MAINNET));
    }

    #[test]
    fn test_known_mainnet_address_parses() {
        let addr: Address = "3JmCa4jLVv7Yn2XkCnBUGsa7WNFVEMxAfWe".parse().unwrap();
        assert_eq!(addr.network(), MAINNET);
        assert!(addr.is_valid_for(MAINNET));
    }

    #[test]
    fn test_base58_roundtrip() {
        let addr = Address::derive(&[1u8; 32], MAINNET);
        let parsed: Address = addr.to_base58().parse().unwrap();
        assert_eq!(parsed, addr);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!("not-an-address".parse::<Address>().is_err());
        assert!(Address::from_bytes(&[1u8; 25]).is_err());

        let mut raw = Address::derive(&[1u8; 32], MAINNET).0;
        raw[0] = 2;
        assert!(Address::from_bytes(&raw).is_err());
        assert!(!is_valid(&raw, MAINNET));
    }

    proptest! {
        #[test]
        fn prop_derived_is_valid(key in any::<[u8; 32]>(), network in any::<u8>()) {
            let addr = Address::derive(&key, network);
            prop_assert!(is_valid(addr.as_bytes(), network));
        }

        #[test]
        fn prop_flipped_byte_is_invalid(
            key in any::<[u8; 32]>(),
            network in any::<u8>(),
            index in 0usize..ADDRESS_LEN,
            bit in 0u8..8,
        ) {
            let mut raw = Address::derive(&key, network).0;
            raw[index] ^= 1 << bit;
            prop_assert!(!is_valid(&raw, network));
        }
    }
}
