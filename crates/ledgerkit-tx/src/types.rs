//! Transaction type codes, supported versions, fees and limits.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Version used when none is requested.
pub const DEFAULT_VERSION: u8 = 3;

/// Maximum attachment size in bytes.
pub const MAX_ATTACHMENT_LEN: usize = 140;

/// Maximum number of entries in one mass transfer.
pub const MAX_TRANSFERS: usize = 100;

/// Maximum size of a single anchor hash in bytes.
pub const MAX_ANCHOR_LEN: usize = 64;

/// Maximum size of an association hash in bytes.
pub const MAX_ASSOCIATION_HASH_LEN: usize = 64;

/// Length of a lease id (the lease transaction's raw id).
pub const LEASE_ID_LEN: usize = 32;

/// Minimum fees, in the smallest unit.
pub mod fees {
    pub const TRANSFER: u64 = 100_000_000;
    pub const LEASE: u64 = 100_000_000;
    pub const CANCEL_LEASE: u64 = 100_000_000;
    pub const MASS_TRANSFER_BASE: u64 = 100_000_000;
    pub const MASS_TRANSFER_PER_ITEM: u64 = 10_000_000;
    pub const SET_SCRIPT: u64 = 500_000_000;
    pub const ANCHOR: u64 = 35_000_000;
    pub const ASSOCIATION: u64 = 100_000_000;
    pub const REVOKE_ASSOCIATION: u64 = 100_000_000;
    pub const SPONSORSHIP: u64 = 500_000_000;
    pub const CANCEL_SPONSORSHIP: u64 = 500_000_000;
}

/// The protocol type code of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum TxType {
    Transfer = 4,
    Lease = 8,
    CancelLease = 9,
    MassTransfer = 11,
    SetScript = 13,
    Anchor = 15,
    Association = 16,
    RevokeAssociation = 17,
    Sponsorship = 18,
    CancelSponsorship = 19,
}

impl TxType {
    pub const ALL: [TxType; 10] = [
        Self::Transfer,
        Self::Lease,
        Self::CancelLease,
        Self::MassTransfer,
        Self::SetScript,
        Self::Anchor,
        Self::Association,
        Self::RevokeAssociation,
        Self::Sponsorship,
        Self::CancelSponsorship,
    ];

    pub fn to_u8(self) -> u8 {
        self as u8
    }

    pub fn from_u8(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.to_u8() == code)
    }

    /// Versions this crate can encode.
    pub fn supported_versions(self) -> &'static [u8] {
        match self {
            Self::Transfer | Self::Lease | Self::CancelLease => &[2, 3],
            _ => &[1, 3],
        }
    }

    pub fn supports_version(self, version: u8) -> bool {
        self.supported_versions().contains(&version)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Transfer => "transfer",
            Self::Lease => "lease",
            Self::CancelLease => "cancel lease",
            Self::MassTransfer => "mass transfer",
            Self::SetScript => "set script",
            Self::Anchor => "anchor",
            Self::Association => "association",
            Self::RevokeAssociation => "revoke association",
            Self::Sponsorship => "sponsorship",
            Self::CancelSponsorship => "cancel sponsorship",
        }
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<TxType> for u8 {
    fn from(t: TxType) -> u8 {
        t.to_u8()
    }
}

impl TryFrom<u8> for TxType {
    type Error = String;

    fn try_from(code: u8) -> std::result::Result<Self, Self::Error> {
        Self::from_u8(code).ok_or_else(|| format!("unknown transaction type {code}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_codes_roundtrip() {
        for t in TxType::ALL {
            assert_eq!(TxType::from_u8(t.to_u8()), Some(t));
        }
        assert_eq!(TxType::from_u8(1), None);
        assert_eq!(TxType::Transfer.to_u8(), 4);
        assert_eq!(TxType::CancelSponsorship.to_u8(), 19);
    }

    #[test]
    fn test_every_type_supports_v3() {
        for t in TxType::ALL {
            assert!(t.supports_version(DEFAULT_VERSION), "{t}");
        }
        assert!(TxType::Transfer.supports_version(2));
        assert!(!TxType::Transfer.supports_version(1));
        assert!(TxType::Anchor.supports_version(1));
        assert!(!TxType::Anchor.supports_version(2));
    }
}
