//! Test fixtures and helpers.
//!
//! Common setup code for integration tests. Helpers panic on failure.

use ledgerkit::{
    Account, AccountExt, Address, Event, EventChain, MassTransfer, Sdk, Transaction, Transfer,
    TxPayload, TESTNET,
};
use serde::Serialize;

/// Timestamp given to fixture transactions, 2021-01-01T00:00:00Z in milliseconds.
pub const FIXED_TIMESTAMP: i64 = 1_609_459_200_000;

/// An Sdk plus one passphrase-derived account.
pub struct TestFixture {
    pub sdk: Sdk,
    pub account: Account,
}

impl TestFixture {
    /// Account at nonce 0 of `passphrase` on testnet.
    pub fn new(passphrase: &str) -> Self {
        Self::with_network(passphrase, TESTNET)
    }

    pub fn with_network(passphrase: &str, network: u8) -> Self {
        let sdk = Sdk::for_network(network);
        let account = sdk
            .account(passphrase, 0)
            .expect("passphrase derivation cannot fail for ed25519");
        Self { sdk, account }
    }

    pub fn address(&self) -> Address {
        *self.account.address()
    }

    /// `payload` as a transaction signed by this fixture at [`FIXED_TIMESTAMP`].
    pub fn make_signed(&self, payload: impl Into<TxPayload>) -> Transaction {
        let mut tx = self
            .sdk
            .transaction(payload)
            .expect("payload is valid at the default version")
            .with_timestamp(FIXED_TIMESTAMP);
        self.account
            .sign_transaction(&mut tx)
            .expect("fixture account can sign");
        tx
    }

    /// A signed transfer of `amount` to `recipient`.
    pub fn make_transfer(&self, recipient: Address, amount: u64) -> Transaction {
        self.make_signed(Transfer::new(recipient, amount).expect("amount must be positive"))
    }

    /// A signed mass transfer paying `amount` to each recipient.
    pub fn make_mass_transfer(&self, recipients: &[Address], amount: u64) -> Transaction {
        let mut mass = MassTransfer::default();
        for recipient in recipients {
            mass.add(*recipient, amount).expect("within mass transfer limits");
        }
        self.make_signed(mass)
    }

    /// A chain owned by this fixture with an id derived from `nonce_seed`.
    pub fn make_chain(&self, nonce_seed: &str) -> EventChain {
        self.sdk
            .event_chain(&self.account, Some(nonce_seed))
            .expect("fixture account has a sign key")
    }

    /// Append `body` to `chain` as an event signed by this fixture.
    pub fn add_event<T: Serialize + ?Sized>(&self, chain: &mut EventChain, body: &T) -> Event {
        let event = Event::new(body, None).expect("body serializes to JSON");
        let event = chain.add(event).expect("chain tail is signed");
        self.account.sign_event(event).expect("fixture account can sign");
        event.clone()
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new("test")
    }
}

/// Fixtures for multi-party tests, one passphrase per party.
pub fn multi_party_fixtures(count: usize) -> Vec<TestFixture> {
    (0..count)
        .map(|i| TestFixture::new(&format!("party {i}")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_transfer_is_signed() {
        let alice = TestFixture::new("alice");
        let bob = TestFixture::new("bob");

        let tx = alice.make_transfer(bob.address(), 10);
        assert_eq!(tx.timestamp, Some(FIXED_TIMESTAMP));
        assert!(tx.is_signed_by(&alice.account).unwrap());
        assert!(!tx.is_signed_by(&bob.account).unwrap());
    }

    #[test]
    fn test_fixture_is_deterministic() {
        let a = TestFixture::new("same");
        let b = TestFixture::new("same");
        let to = TestFixture::default().address();
        assert_eq!(a.make_transfer(to, 5).id().unwrap(), b.make_transfer(to, 5).id().unwrap());
    }

    #[test]
    fn test_fixture_chain_validates() {
        let fixture = TestFixture::new("chain");
        let mut chain = fixture.make_chain("fixture");
        let first = fixture.add_event(&mut chain, &serde_json::json!({ "n": 1 }));
        let second = fixture.add_event(&mut chain, "two");

        assert_eq!(second.previous, first.hash);
        assert_eq!(chain.len(), 2);
        chain.validate().unwrap();
    }

    #[test]
    fn test_multi_party_fixtures_are_distinct() {
        let parties = multi_party_fixtures(3);
        let recipients: Vec<Address> = parties.iter().map(TestFixture::address).collect();
        assert_ne!(recipients[0], recipients[1]);
        assert_ne!(recipients[1], recipients[2]);

        let tx = parties[0].make_mass_transfer(&recipients[1..], 7);
        assert_eq!(tx.mass_transfer().unwrap().total_amount(), Some(14));
    }
}
