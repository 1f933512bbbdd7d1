//! Chain and resource identifiers.
//!
//! Layout (45 bytes): `kind(1) || nonce(20) || ns_hash(20) || checksum(4)`
//! where `ns_hash = secure_hash(namespace)[0..20]` and
//! `checksum = secure_hash(kind || nonce || ns_hash)[0..4]`. Ids display as
//! base58.

use ledgerkit_core::{secure_hash, sha256, SecureRng};

use crate::error::{EventError, Result};

/// Kind byte of an event chain id.
pub const CHAIN_ID_KIND: u8 = 0x40;

/// Kind byte of a resource id.
pub const RESOURCE_ID_KIND: u8 = 0x50;

/// Length of a raw id.
pub const ID_LEN: usize = 45;

/// Length of the nonce segment.
pub const NONCE_LEN: usize = 20;

const NS_HASH_LEN: usize = 20;
const BODY_LEN: usize = 1 + NONCE_LEN + NS_HASH_LEN;

/// A reproducible nonce: `sha256(seed)[0..20]`.
pub fn nonce_from_seed(seed: &str) -> [u8; NONCE_LEN] {
    let mut nonce = [0u8; NONCE_LEN];
    nonce.copy_from_slice(&sha256(seed.as_bytes())[..NONCE_LEN]);
    nonce
}

/// A fresh random nonce.
pub fn random_nonce(rng: &mut dyn SecureRng) -> [u8; NONCE_LEN] {
    let mut nonce = [0u8; NONCE_LEN];
    rng.fill_bytes(&mut nonce);
    nonce
}

/// Derive the raw id bytes for `(kind, namespace, nonce)`.
pub fn derive_raw_id(kind: u8, namespace: &[u8], nonce: &[u8; NONCE_LEN]) -> [u8; ID_LEN] {
    let mut raw = [0u8; ID_LEN];
    raw[0] = kind;
    raw[1..1 + NONCE_LEN].copy_from_slice(nonce);
    raw[1 + NONCE_LEN..BODY_LEN].copy_from_slice(&secure_hash(namespace)[..NS_HASH_LEN]);

    let checksum = secure_hash(&raw[..BODY_LEN]);
    raw[BODY_LEN..].copy_from_slice(&checksum[..ID_LEN - BODY_LEN]);
    raw
}

/// Derive a base58 id for `(kind, namespace, nonce)`.
pub fn derive_id(kind: u8, namespace: &[u8], nonce: &[u8; NONCE_LEN]) -> String {
    bs58::encode(derive_raw_id(kind, namespace, nonce)).into_string()
}

/// Decode a base58 id, checking only its length.
pub fn decode_id(id: &str) -> Result<[u8; ID_LEN]> {
    let bytes = bs58::decode(id)
        .into_vec()
        .map_err(|e| EventError::InvalidArgument(format!("id '{id}' is not base58: {e}")))?;
    bytes.as_slice().try_into().map_err(|_| {
        EventError::InvalidArgument(format!("id must be {ID_LEN} bytes, got {}", bytes.len()))
    })
}

/// Whether `id` is a well-formed id of `kind` under `namespace`.
pub fn is_valid_id(id: &str, kind: u8, namespace: &[u8]) -> bool {
    let Ok(raw) = decode_id(id) else {
        return false;
    };
    raw[0] == kind
        && raw[1 + NONCE_LEN..BODY_LEN] == secure_hash(namespace)[..NS_HASH_LEN]
        && raw[BODY_LEN..] == secure_hash(&raw[..BODY_LEN])[..ID_LEN - BODY_LEN]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_layout() {
        let nonce = nonce_from_seed("foo");
        let raw = derive_raw_id(CHAIN_ID_KIND, b"namespace", &nonce);
        assert_eq!(raw[0], CHAIN_ID_KIND);
        assert_eq!(&raw[1..21], &nonce);
        assert_eq!(&raw[21..41], &secure_hash(b"namespace")[..20]);
        assert!(is_valid_id(&bs58::encode(raw).into_string(), CHAIN_ID_KIND, b"namespace"));
    }

    #[test]
    fn test_rejects_wrong_kind_namespace_or_length() {
        let id = derive_id(RESOURCE_ID_KIND, b"ns", &[1u8; NONCE_LEN]);
        assert!(is_valid_id(&id, RESOURCE_ID_KIND, b"ns"));
        assert!(!is_valid_id(&id, CHAIN_ID_KIND, b"ns"));
        assert!(!is_valid_id(&id, RESOURCE_ID_KIND, b"other"));
        assert!(!is_valid_id("abc", RESOURCE_ID_KIND, b"ns"));
        assert!(decode_id("0OIl").is_err());
    }

    proptest! {
        #[test]
        fn prop_flipped_checksum_is_invalid(nonce in any::<[u8; 20]>(), index in 41usize..45, bit in 0u8..8) {
            let mut raw = derive_raw_id(CHAIN_ID_KIND, b"ns", &nonce);
            raw[index] ^= 1 << bit;
            prop_assert!(!is_valid_id(&bs58::encode(raw).into_string(), CHAIN_ID_KIND, b"ns"));
        }
    }
}
