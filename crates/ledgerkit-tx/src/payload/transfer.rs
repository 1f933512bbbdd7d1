//! Value-moving payloads: transfers and leases.

use ledgerkit_core::{Address, Binary};

use super::{check_amount, check_attachment};
use crate::error::{Result, TxError};
use crate::transaction::Transaction;
use crate::types::{TxType, LEASE_ID_LEN, MAX_TRANSFERS};

/// Move `amount` to `recipient`, with an optional attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    pub recipient: Address,
    pub amount: u64,
    pub attachment: Binary,
}

impl Transfer {
    pub fn new(recipient: Address, amount: u64) -> Result<Self> {
        let transfer = Self {
            recipient,
            amount,
            attachment: Binary::default(),
        };
        transfer.validate()?;
        Ok(transfer)
    }

    pub fn with_attachment(mut self, attachment: impl Into<Binary>) -> Result<Self> {
        self.attachment = attachment.into();
        self.validate()?;
        Ok(self)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        check_amount(self.amount)?;
        check_attachment(&self.attachment)
    }
}

/// Lease `amount` to `recipient`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lease {
    pub recipient: Address,
    pub amount: u64,
}

impl Lease {
    pub fn new(recipient: Address, amount: u64) -> Result<Self> {
        check_amount(amount)?;
        Ok(Self { recipient, amount })
    }

    pub(crate) fn validate(&self) -> Result<()> {
        check_amount(self.amount)
    }
}

/// Cancel an earlier lease, identified by its raw 32-byte id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelLease {
    pub lease_id: Binary,
    /// The cancelled lease, when known.
    pub lease: Option<Box<Transaction>>,
}

impl CancelLease {
    pub fn new(lease_id: Binary) -> Result<Self> {
        let cancel = Self {
            lease_id,
            lease: None,
        };
        cancel.validate()?;
        Ok(cancel)
    }

    /// Cancel `lease`, taking its id and embedding it.
    pub fn for_lease(mut lease: Transaction) -> Result<Self> {
        if lease.tx_type() != TxType::Lease {
            return Err(TxError::InvalidArgument(format!(
                "expected a lease transaction, got {}",
                lease.tx_type()
            )));
        }
        let id = lease.id()?;
        let lease_id = Binary::from_base58(&id)?;
        lease.id = Some(id);
        let cancel = Self {
            lease_id,
            lease: Some(Box::new(lease)),
        };
        cancel.validate()?;
        Ok(cancel)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.lease_id.len() != LEASE_ID_LEN {
            return Err(TxError::Validation(format!(
                "lease id must be {LEASE_ID_LEN} bytes, got {}",
                self.lease_id.len()
            )));
        }
        Ok(())
    }
}

/// One recipient of a mass transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferEntry {
    pub recipient: Address,
    pub amount: u64,
}

/// Pay many recipients in one transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MassTransfer {
    pub transfers: Vec<TransferEntry>,
    pub attachment: Binary,
}

impl MassTransfer {
    pub fn new(transfers: Vec<TransferEntry>) -> Result<Self> {
        let mass = Self {
            transfers,
            attachment: Binary::default(),
        };
        mass.validate()?;
        Ok(mass)
    }

    pub fn with_attachment(mut self, attachment: impl Into<Binary>) -> Result<Self> {
        self.attachment = attachment.into();
        self.validate()?;
        Ok(self)
    }

    /// Append one entry. The transaction fee is recomputed by
    /// [`Transaction::add_transfer`], not here.
    pub fn add(&mut self, recipient: Address, amount: u64) -> Result<()> {
        check_amount(amount)?;
        if self.transfers.len() >= MAX_TRANSFERS {
            return Err(TxError::Validation(format!(
                "mass transfer holds at most {MAX_TRANSFERS} entries"
            )));
        }
        self.transfers.push(TransferEntry { recipient, amount });
        Ok(())
    }

    /// Sum of all amounts, `None` on overflow.
    pub fn total_amount(&self) -> Option<u64> {
        self.transfers
            .iter()
            .try_fold(0u64, |total, t| total.checked_add(t.amount))
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.transfers.len() > MAX_TRANSFERS {
            return Err(TxError::Validation(format!(
                "mass transfer holds at most {MAX_TRANSFERS} entries, got {}",
                self.transfers.len()
            )));
        }
        for entry in &self.transfers {
            check_amount(entry.amount)?;
        }
        check_attachment(&self.attachment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MAX_ATTACHMENT_LEN;
    use ledgerkit_core::TESTNET;

    fn recipient() -> Address {
        Address::derive(&[5u8; 32], TESTNET)
    }

    #[test]
    fn test_transfer_validation() {
        assert!(Transfer::new(recipient(), 0).is_err());
        let t = Transfer::new(recipient(), 1).unwrap();
        assert!(t.clone().with_attachment(vec![0u8; MAX_ATTACHMENT_LEN]).is_ok());
        assert!(matches!(
            t.with_attachment(vec![0u8; MAX_ATTACHMENT_LEN + 1]).unwrap_err(),
            TxError::Validation(_)
        ));
    }

    #[test]
    fn test_total_amount_overflow() {
        let mut mass = MassTransfer::default();
        mass.add(recipient(), u64::MAX).unwrap();
        assert_eq!(mass.total_amount(), Some(u64::MAX));
        mass.add(recipient(), 1).unwrap();
        assert_eq!(mass.total_amount(), None);
    }

    #[test]
    fn test_lease_id_length() {
        assert!(CancelLease::new(Binary::from([1u8; 32])).is_ok());
        assert!(CancelLease::new(Binary::from([1u8; 31])).is_err());
    }

    #[test]
    fn test_mass_transfer_limit() {
        let mut mass = MassTransfer::default();
        for _ in 0..MAX_TRANSFERS {
            mass.add(recipient(), 10).unwrap();
        }
        assert!(mass.add(recipient(), 10).is_err());
        assert_eq!(mass.total_amount(), Some(10 * MAX_TRANSFERS as u64));

        let mut fresh = MassTransfer::default();
        assert!(fresh.add(recipient(), 0).is_err());
        assert!(fresh.transfers.is_empty());
    }
}
