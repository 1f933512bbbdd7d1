//! Hash functions used by the protocol.
//!
//! Checksums and identifiers use `secure_hash(x) = sha256(blake2b256(x))`.

use blake2::digest::consts::U32;
use blake2::Blake2b;
use sha2::{Digest, Sha256, Sha512};

type Blake2b256 = Blake2b<U32>;

/// SHA-256 of the input.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// SHA-512 of the input.
pub fn sha512(data: &[u8]) -> [u8; 64] {
    Sha512::digest(data).into()
}

/// BLAKE2b with a 256-bit output.
pub fn blake2b256(data: &[u8]) -> [u8; 32] {
    Blake2b256::digest(data).into()
}

/// `sha256(blake2b256(data))`, the checksum and key-hash function.
pub fn secure_hash(data: &[u8]) -> [u8; 32] {
    sha256(&blake2b256(data))
}
