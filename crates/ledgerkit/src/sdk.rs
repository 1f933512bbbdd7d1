//! The Sdk: one configured entry point for accounts, transactions and chains.

use ledgerkit_core::{Account, AccountFactory, FactoryConfig, KeyMaterial};
use ledgerkit_events::EventChain;
use ledgerkit_tx::{Transaction, TxPayload, DEFAULT_VERSION};
use rand::rngs::OsRng;

use crate::error::Result;

/// Configuration for the Sdk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SdkConfig {
    /// Network and key type of created accounts.
    pub factory: FactoryConfig,
    /// Version given to new transactions.
    pub tx_version: u8,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            factory: FactoryConfig::default(),
            tx_version: DEFAULT_VERSION,
        }
    }
}

/// Entry point bundling an [`AccountFactory`] with transaction defaults.
#[derive(Debug, Clone)]
pub struct Sdk {
    config: SdkConfig,
    factory: AccountFactory,
}

impl Sdk {
    pub fn new(config: SdkConfig) -> Self {
        Self {
            factory: AccountFactory::with_config(config.factory),
            config,
        }
    }

    /// Default configuration on `network`.
    pub fn for_network(network: u8) -> Self {
        let mut config = SdkConfig::default();
        config.factory.network = network;
        Self::new(config)
    }

    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    pub fn factory(&self) -> &AccountFactory {
        &self.factory
    }

    /// Derive an account from a passphrase and nonce.
    pub fn account(&self, passphrase: &str, nonce: u32) -> Result<Account> {
        Ok(self.factory.create_from_seed(passphrase, nonce)?)
    }

    pub fn random_account(&self) -> Result<Account> {
        Ok(self.factory.create(&mut OsRng)?)
    }

    pub fn account_from_key_material(&self, material: KeyMaterial) -> Result<Account> {
        Ok(self.factory.create_from_key_material(material)?)
    }

    /// A new transaction at the configured version.
    pub fn transaction(&self, payload: impl Into<TxPayload>) -> Result<Transaction> {
        let tx = Transaction::new(payload)?.with_version(self.config.tx_version)?;
        tracing::trace!(tx_type = %tx.tx_type(), version = tx.version(), "new transaction");
        Ok(tx)
    }

    /// A new event chain owned by `account`.
    pub fn event_chain(&self, account: &Account, nonce_seed: Option<&str>) -> Result<EventChain> {
        let mut chain = EventChain::new();
        chain.init_for(account, nonce_seed)?;
        Ok(chain)
    }
}

impl Default for Sdk {
    fn default() -> Self {
        Self::new(SdkConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerkit_core::{KeyType, MAINNET, TESTNET};
    use ledgerkit_tx::{Anchor, Transfer, TxError};

    #[test]
    fn test_default_config() {
        let sdk = Sdk::default();
        assert_eq!(sdk.config().tx_version, 3);
        assert_eq!(sdk.config().factory.network, TESTNET);
        assert_eq!(sdk.config().factory.key_type, KeyType::Ed25519);
    }

    #[test]
    fn test_network_flows_into_accounts() {
        let sdk = Sdk::for_network(MAINNET);
        let acc = sdk.account("test", 0).unwrap();
        assert_eq!(acc.network(), MAINNET);
        assert_eq!(acc.address().to_string(), "3Jr4j8y5Z44cnSipUmWx7EkVTmAoUaXu3Fx");
    }

    #[test]
    fn test_configured_tx_version() {
        let sdk = Sdk::new(SdkConfig {
            tx_version: 1,
            ..SdkConfig::default()
        });
        let anchor = sdk.transaction(Anchor::single([1u8; 32]).unwrap()).unwrap();
        assert_eq!(anchor.version(), 1);

        let acc = sdk.account("x", 0).unwrap();
        let err = sdk
            .transaction(Transfer::new(*acc.address(), 1).unwrap())
            .unwrap_err();
        assert!(matches!(
            err,
            crate::SdkError::Tx(TxError::UnsupportedVersion { version: 1, .. })
        ));
    }
}
