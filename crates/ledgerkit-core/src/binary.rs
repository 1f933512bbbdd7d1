//! Immutable binary values with base58 / base64 / hex views.
//!
//! `Binary` is what signing and encryption hand back and what verification
//! and decryption accept, so callers pick an encoding only at the edges.

use base64::{engine::general_purpose, Engine as _};
use bytes::Bytes;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::error::{CoreError, Result};

/// An immutable byte string compared by content.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Binary(Bytes);

impl Binary {
    /// Create from anything convertible into `Bytes`.
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self(bytes.into())
    }

    /// Copy from a byte slice.
    pub fn copy_from(bytes: &[u8]) -> Self {
        Self(Bytes::copy_from_slice(bytes))
    }

    /// Decode a base58 string.
    pub fn from_base58(s: &str) -> Result<Self> {
        bs58::decode(s)
            .into_vec()
            .map(Self::new)
            .map_err(|e| CoreError::Encoding(format!("base58: {e}")))
    }

    /// Decode a standard (padded) base64 string.
    pub fn from_base64(s: &str) -> Result<Self> {
        general_purpose::STANDARD
            .decode(s)
            .map(Self::new)
            .map_err(|e| CoreError::Encoding(format!("base64: {e}")))
    }

    /// Decode a hex string.
    pub fn from_hex(s: &str) -> Result<Self> {
        hex::decode(s)
            .map(Self::new)
            .map_err(|e| CoreError::Encoding(format!("hex: {e}")))
    }

    pub fn to_base58(&self) -> String {
        bs58::encode(&self.0).into_string()
    }

    pub fn to_base64(&self) -> String {
        general_purpose::STANDARD.encode(&self.0)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Interpret as a fixed-size array, failing on length mismatch.
    pub fn to_array<const N: usize>(&self) -> Result<[u8; N]> {
        self.0.as_ref().try_into().map_err(|_| {
            CoreError::Validation(format!("expected {N} bytes, got {}", self.0.len()))
        })
    }
}

impl fmt::Debug for Binary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = self.to_hex();
        if hex.len() > 16 {
            write!(f, "Binary({}...)", &hex[..16])
        } else {
            write!(f, "Binary({hex})")
        }
    }
}

impl fmt::Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl AsRef<[u8]> for Binary {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Binary {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl From<&[u8]> for Binary {
    fn from(bytes: &[u8]) -> Self {
        Self::copy_from(bytes)
    }
}

impl<const N: usize> From<[u8; N]> for Binary {
    fn from(bytes: [u8; N]) -> Self {
        Self::copy_from(&bytes)
    }
}

impl From<&str> for Binary {
    fn from(s: &str) -> Self {
        Self::copy_from(s.as_bytes())
    }
}

impl Serialize for Binary {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base58())
    }
}

impl<'de> Deserialize<'de> for Binary {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Binary::from_base58(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_views_of_same_bytes() {
        let bin = Binary::from("hello");
        assert_eq!(bin.to_base58(), "Cn8eVZg");
        assert_eq!(bin.to_base64(), "aGVsbG8=");
        assert_eq!(bin.to_hex(), "68656c6c6f");
        assert_eq!(bin.as_bytes(), b"hello");
    }

    #[test]
    fn test_decoders_agree() {
        let a = Binary::from_base58("Cn8eVZg").unwrap();
        let b = Binary::from_base64("aGVsbG8=").unwrap();
        let c = Binary::from_hex("68656c6c6f").unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn test_invalid_base58_is_encoding_error() {
        // '0' and 'l' are not in the base58 alphabet
        let err = Binary::from_base58("0l0l").unwrap_err();
        assert!(matches!(err, CoreError::Encoding(_)));
    }

    #[test]
    fn test_to_array_length_check() {
        let bin = Binary::from([7u8; 32]);
        let arr: [u8; 32] = bin.to_array().unwrap();
        assert_eq!(arr, [7u8; 32]);
        assert!(bin.to_array::<31>().is_err());
    }

    #[test]
    fn test_serde_as_base58_string() {
        let bin = Binary::from("hello");
        let json = serde_json::to_string(&bin).unwrap();
        assert_eq!(json, "\"Cn8eVZg\"");
        let back: Binary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bin);
    }
}
