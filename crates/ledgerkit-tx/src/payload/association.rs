//! Payloads that relate the sender to another party.

use ledgerkit_core::{Address, Binary};

use crate::error::{Result, TxError};
use crate::types::MAX_ASSOCIATION_HASH_LEN;

fn check_hash(hash: Option<&Binary>) -> Result<()> {
    match hash {
        Some(h) if h.len() > MAX_ASSOCIATION_HASH_LEN => Err(TxError::Validation(format!(
            "association hash is {} bytes, maximum is {MAX_ASSOCIATION_HASH_LEN}",
            h.len()
        ))),
        _ => Ok(()),
    }
}

/// Declare a typed association with `recipient`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Association {
    pub recipient: Address,
    pub association_type: u32,
    pub hash: Option<Binary>,
    /// Expiry in unix milliseconds. Only encodable from version 3.
    pub expires: Option<i64>,
}

impl Association {
    pub fn new(recipient: Address, association_type: u32) -> Self {
        Self {
            recipient,
            association_type,
            hash: None,
            expires: None,
        }
    }

    pub fn with_hash(mut self, hash: impl Into<Binary>) -> Result<Self> {
        self.hash = Some(hash.into());
        self.validate()?;
        Ok(self)
    }

    pub fn with_expires(mut self, expires: i64) -> Result<Self> {
        self.expires = Some(expires);
        self.validate()?;
        Ok(self)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if matches!(self.expires, Some(e) if e <= 0) {
            return Err(TxError::Validation("expiry must be a positive timestamp".into()));
        }
        check_hash(self.hash.as_ref())
    }
}

/// Revoke an association created earlier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevokeAssociation {
    pub recipient: Address,
    pub association_type: u32,
    pub hash: Option<Binary>,
}

impl RevokeAssociation {
    pub fn new(recipient: Address, association_type: u32) -> Self {
        Self {
            recipient,
            association_type,
            hash: None,
        }
    }

    pub fn with_hash(mut self, hash: impl Into<Binary>) -> Result<Self> {
        self.hash = Some(hash.into());
        self.validate()?;
        Ok(self)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        check_hash(self.hash.as_ref())
    }
}

/// Start or cancel paying fees on behalf of `recipient`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sponsorship {
    pub recipient: Address,
}

impl Sponsorship {
    pub fn new(recipient: Address) -> Self {
        Self { recipient }
    }
}
