//! Typed transaction payloads.
//!
//! One variant per known transaction kind. Each payload struct validates its
//! values when constructed; [`TxPayload::validate`] re-checks before encoding
//! since fields are public.

mod anchor;
mod association;
mod transfer;

use ledgerkit_core::Binary;

use crate::error::{Result, TxError};
use crate::types::{fees, TxType, MAX_ATTACHMENT_LEN};

pub use self::anchor::{Anchor, SetScript};
pub use self::association::{Association, RevokeAssociation, Sponsorship};
pub use self::transfer::{CancelLease, Lease, MassTransfer, Transfer, TransferEntry};

/// The kind-specific part of a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxPayload {
    Transfer(Transfer),
    Lease(Lease),
    CancelLease(CancelLease),
    MassTransfer(MassTransfer),
    SetScript(SetScript),
    Anchor(Anchor),
    Association(Association),
    RevokeAssociation(RevokeAssociation),
    Sponsorship(Sponsorship),
    CancelSponsorship(Sponsorship),
}

impl TxPayload {
    pub fn tx_type(&self) -> TxType {
        match self {
            Self::Transfer(_) => TxType::Transfer,
            Self::Lease(_) => TxType::Lease,
            Self::CancelLease(_) => TxType::CancelLease,
            Self::MassTransfer(_) => TxType::MassTransfer,
            Self::SetScript(_) => TxType::SetScript,
            Self::Anchor(_) => TxType::Anchor,
            Self::Association(_) => TxType::Association,
            Self::RevokeAssociation(_) => TxType::RevokeAssociation,
            Self::Sponsorship(_) => TxType::Sponsorship,
            Self::CancelSponsorship(_) => TxType::CancelSponsorship,
        }
    }

    /// The protocol minimum fee for this payload.
    pub fn minimum_fee(&self) -> u64 {
        match self {
            Self::Transfer(_) => fees::TRANSFER,
            Self::Lease(_) => fees::LEASE,
            Self::CancelLease(_) => fees::CANCEL_LEASE,
            Self::MassTransfer(m) => {
                fees::MASS_TRANSFER_BASE + fees::MASS_TRANSFER_PER_ITEM * m.transfers.len() as u64
            }
            Self::SetScript(_) => fees::SET_SCRIPT,
            Self::Anchor(_) => fees::ANCHOR,
            Self::Association(_) => fees::ASSOCIATION,
            Self::RevokeAssociation(_) => fees::REVOKE_ASSOCIATION,
            Self::Sponsorship(_) => fees::SPONSORSHIP,
            Self::CancelSponsorship(_) => fees::CANCEL_SPONSORSHIP,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Transfer(t) => t.validate(),
            Self::Lease(l) => l.validate(),
            Self::CancelLease(c) => c.validate(),
            Self::MassTransfer(m) => m.validate(),
            Self::SetScript(_) => Ok(()),
            Self::Anchor(a) => a.validate(),
            Self::Association(a) => a.validate(),
            Self::RevokeAssociation(r) => r.validate(),
            Self::Sponsorship(_) | Self::CancelSponsorship(_) => Ok(()),
        }
    }
}

macro_rules! impl_from_payload {
    ($($ty:ident),*) => {
        $(
            impl From<$ty> for TxPayload {
                fn from(p: $ty) -> Self {
                    Self::$ty(p)
                }
            }
        )*
    };
}

impl_from_payload!(
    Transfer,
    Lease,
    CancelLease,
    MassTransfer,
    SetScript,
    Anchor,
    Association,
    RevokeAssociation,
    Sponsorship
);

pub(crate) fn check_amount(amount: u64) -> Result<()> {
    if amount == 0 {
        return Err(TxError::Validation("amount must be positive".into()));
    }
    Ok(())
}

pub(crate) fn check_attachment(attachment: &Binary) -> Result<()> {
    if attachment.len() > MAX_ATTACHMENT_LEN {
        return Err(TxError::Validation(format!(
            "attachment is {} bytes, maximum is {MAX_ATTACHMENT_LEN}",
            attachment.len()
        )));
    }
    Ok(())
}
