//! Signing transactions and events from an [`Account`].

use ledgerkit_core::Account;
use ledgerkit_events::Event;
use ledgerkit_tx::Transaction;

use crate::error::Result;

/// Account operations that need the transaction and event types.
pub trait AccountExt {
    /// Sign `tx`, filling its sender and timestamp when unset.
    fn sign_transaction(&self, tx: &mut Transaction) -> Result<()>;

    /// Co-sign an already signed `tx` as its sponsor.
    fn sponsor_transaction(&self, tx: &mut Transaction) -> Result<()>;

    /// Sign an event that is already linked into a chain.
    fn sign_event(&self, event: &mut Event) -> Result<()>;
}

impl AccountExt for Account {
    fn sign_transaction(&self, tx: &mut Transaction) -> Result<()> {
        tx.sign_with(self)?;
        Ok(())
    }

    fn sponsor_transaction(&self, tx: &mut Transaction) -> Result<()> {
        tx.sponsor_with(self)?;
        Ok(())
    }

    fn sign_event(&self, event: &mut Event) -> Result<()> {
        event.sign_with(self)?;
        Ok(())
    }
}
