//! Golden test vectors for deterministic verification.
//!
//! Every implementation of the protocol must reproduce these exactly.

use ledgerkit::core::derive_seed;
use ledgerkit::{AccountExt, Binary, Event, Sdk, Transfer, MAINNET, TESTNET};

/// What a vector computes from its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorKind {
    /// base58 seed for `passphrase` / `nonce`.
    Seed,
    /// base58 public sign key.
    SignPublicKey,
    /// base58 public encrypt key.
    EncryptPublicKey,
    /// Address on `network`.
    Address,
    /// Hex of a 120_000_000 transfer with attachment "hello" from nonce 0 to
    /// nonce 1, at 2021-01-01T00:00:00Z.
    TransferBytes,
    /// Id of the transfer above.
    TransferId,
    /// Id of the chain for nonce seed "foo".
    ChainId,
    /// Initial hash of that chain.
    ChainInitialHash,
    /// Resource id "bar" under that chain.
    ResourceId,
    /// Hash of the event `{"foo":"bar"}` at unix second 1609459200 signed
    /// as the first event of that chain.
    EventHash,
}

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    pub kind: VectorKind,
    pub passphrase: &'static str,
    pub nonce: u32,
    pub network: u8,
    /// Expected output, base58 unless stated otherwise.
    pub expected: &'static str,
}

const fn vector(
    name: &'static str,
    kind: VectorKind,
    nonce: u32,
    network: u8,
    expected: &'static str,
) -> GoldenVector {
    GoldenVector {
        name,
        kind,
        passphrase: "test",
        nonce,
        network,
        expected,
    }
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    use VectorKind::*;
    vec![
        vector("seed", Seed, 0, TESTNET, "9vqeQL1YNN9C8NdQ4GbkkPUk2dQe6J83zdGoNFa8sUvn"),
        vector("seed nonce 1", Seed, 1, TESTNET, "4FCm2DRy5PqSk1S9o4NCxUfm7FHMsjjiafTHk3tVqSs5"),
        vector("sign public key", SignPublicKey, 0, TESTNET, "2KduZAmAKuXEL463udjCQkVfwJkBQhpciUC4gNiayjSJ"),
        vector("encrypt public key", EncryptPublicKey, 0, TESTNET, "8GNG8pExbCTjQGHPgNRSan3xd4Q2tyY12VUFTQxTjmgJ"),
        vector("testnet address", Address, 0, TESTNET, "3N4mZ1qTrjWKnzBwAxscf7kfkoCs2HGQhJG"),
        vector("mainnet address", Address, 0, MAINNET, "3Jr4j8y5Z44cnSipUmWx7EkVTmAoUaXu3Fx"),
        vector("testnet address nonce 1", Address, 1, TESTNET, "3MtrszT9hioDhGwPgbay9wDajhfk5hirSAr"),
        vector(
            "transfer v3 bytes (hex)",
            TransferBytes,
            0,
            TESTNET,
            "04035400000176bb3e70000113a1df11d971debe13fc1b7bcb42473de28074da7595c302e20f57708b75cdd30000000005f5e1000154363d8b56a53d433b9f51d82084487c06e5669b543d8007770000000007270e00000568656c6c6f",
        ),
        vector("transfer v3 id", TransferId, 0, TESTNET, "BsSvSq7D8ejV3HCfAAynJ3ErbcEevngt5BN5JcBC5PGq"),
        vector("chain id", ChainId, 0, TESTNET, "2b6QYLttL2R3CLGL4fUB9vaXXX4c5UHrMvwVCxGZpzhxtT4oWNCJmYcM1tweGo"),
        vector("chain initial hash", ChainInitialHash, 0, TESTNET, "GS6Jymmq9jvh4g2ZPXn3YVEDsVjbedUeuBD9uHQ4iM4W"),
        vector("resource id", ResourceId, 0, TESTNET, "31E2kKp5TtUGx3MxyX5e2WGqoCfgD9winiE8Y3MAzYUWie9CQx9syR6W7VhRyP"),
        vector("event hash", EventHash, 0, TESTNET, "D6t1dwBWMdjmwRu2GtRt4UGw1D332Ucq9Z1x3uJWop2a"),
    ]
}

/// Compute the output a vector describes.
///
/// Panics if any step fails; vectors only use valid inputs.
pub fn compute(vector: &GoldenVector) -> String {
    let sdk = Sdk::for_network(vector.network);
    let account = sdk
        .account(vector.passphrase, vector.nonce)
        .expect("vector account derives");

    match vector.kind {
        VectorKind::Seed => Binary::from(derive_seed(vector.passphrase, vector.nonce)).to_base58(),
        VectorKind::SignPublicKey => account.public_key().expect("has sign key").to_base58(),
        VectorKind::EncryptPublicKey => account
            .encrypt_key()
            .expect("ed25519 accounts have an encrypt key")
            .public
            .to_base58(),
        VectorKind::Address => account.address().to_string(),
        VectorKind::TransferBytes => hex::encode(
            golden_transfer(&sdk, vector)
                .to_binary()
                .expect("transfer encodes"),
        ),
        VectorKind::TransferId => golden_transfer(&sdk, vector)
            .id()
            .expect("transfer encodes"),
        VectorKind::ChainId => golden_chain(&sdk, &account)
            .id()
            .expect("initialized chain has an id")
            .to_string(),
        VectorKind::ChainInitialHash => golden_chain(&sdk, &account)
            .initial_hash()
            .expect("initialized chain has an initial hash"),
        VectorKind::ResourceId => golden_chain(&sdk, &account)
            .create_resource_id(Some("bar"))
            .expect("initialized chain derives resource ids"),
        VectorKind::EventHash => {
            let mut chain = golden_chain(&sdk, &account);
            let mut event = Event::new(&serde_json::json!({ "foo": "bar" }), None)
                .expect("body serializes");
            event.timestamp = 1_609_459_200;
            let event = chain.add(event).expect("empty chain accepts an event");
            account.sign_event(event).expect("vector account signs");
            event.hash().expect("signed event has a hash")
        }
    }
}

fn golden_transfer(sdk: &Sdk, vector: &GoldenVector) -> ledgerkit::Transaction {
    let sender = sdk
        .account(vector.passphrase, vector.nonce)
        .expect("vector account derives");
    let recipient = sdk
        .account(vector.passphrase, vector.nonce + 1)
        .expect("vector account derives");
    let transfer = Transfer::new(*recipient.address(), 120_000_000)
        .and_then(|t| t.with_attachment("hello"))
        .expect("transfer is valid");

    let mut tx = sdk
        .transaction(transfer)
        .expect("transfer supports the default version")
        .with_timestamp(1_609_459_200_000);
    tx.set_sender(&sender).expect("sender has a public key");
    tx
}

fn golden_chain(sdk: &Sdk, account: &ledgerkit::Account) -> ledgerkit::EventChain {
    sdk.event_chain(account, Some("foo"))
        .expect("vector account has a sign key")
}

/// Verify all golden vectors.
///
/// Returns `(name, matches, actual)` per vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| {
            let actual = compute(v);
            (v.name.to_string(), actual == v.expected, actual)
        })
        .collect()
}
