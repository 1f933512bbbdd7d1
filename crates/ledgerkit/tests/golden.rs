//! Golden vectors for cross-implementation verification.
//!
//! Every implementation must reproduce these exactly: seeds, keys and
//! addresses for a fixed passphrase, the bytes and id of a fixed transfer,
//! and the ids and hashes of a fixed event chain.

use ledgerkit::core::derive_seed;
use ledgerkit::{Binary, Event, Sdk, Transfer, MAINNET, TESTNET};

const PASSPHRASE: &str = "test";

#[test]
fn golden_seed_and_keys() {
    assert_eq!(
        Binary::from(derive_seed(PASSPHRASE, 0)).to_base58(),
        "9vqeQL1YNN9C8NdQ4GbkkPUk2dQe6J83zdGoNFa8sUvn"
    );

    let account = Sdk::for_network(TESTNET).account(PASSPHRASE, 0).unwrap();
    let sign = account.sign_key().unwrap();
    let encrypt = account.encrypt_key().unwrap();

    assert_eq!(sign.public.to_base58(), "2KduZAmAKuXEL463udjCQkVfwJkBQhpciUC4gNiayjSJ");
    assert_eq!(encrypt.public.to_base58(), "8GNG8pExbCTjQGHPgNRSan3xd4Q2tyY12VUFTQxTjmgJ");
    assert_eq!(
        encrypt.secret.as_ref().unwrap().to_base58(),
        "BFkuyZGCV29tAJYCK8dLZQGNsN3CuWLj5x5vuttyToSf"
    );
}

#[test]
fn golden_addresses() {
    let testnet = Sdk::for_network(TESTNET).account(PASSPHRASE, 0).unwrap();
    let mainnet = Sdk::for_network(MAINNET).account(PASSPHRASE, 0).unwrap();
    let second = Sdk::for_network(TESTNET).account(PASSPHRASE, 1).unwrap();

    assert_eq!(testnet.address().to_string(), "3N4mZ1qTrjWKnzBwAxscf7kfkoCs2HGQhJG");
    assert_eq!(mainnet.address().to_string(), "3Jr4j8y5Z44cnSipUmWx7EkVTmAoUaXu3Fx");
    assert_eq!(second.address().to_string(), "3MtrszT9hioDhGwPgbay9wDajhfk5hirSAr");
}

#[test]
fn golden_transfer_v3() {
    let sdk = Sdk::for_network(TESTNET);
    let sender = sdk.account(PASSPHRASE, 0).unwrap();
    let recipient = sdk.account(PASSPHRASE, 1).unwrap();

    let mut tx = sdk
        .transaction(
            Transfer::new(*recipient.address(), 120_000_000)
                .unwrap()
                .with_attachment("hello")
                .unwrap(),
        )
        .unwrap()
        .with_timestamp(1_609_459_200_000);
    tx.set_sender(&sender).unwrap();

    let bytes = tx.to_binary().unwrap();
    assert_eq!(bytes.len(), 93);
    assert_eq!(
        hex::encode(&bytes),
        "04035400000176bb3e70000113a1df11d971debe13fc1b7bcb42473de28074da7595c302e20f57708b75cdd30000000005f5e1000154363d8b56a53d433b9f51d82084487c06e5669b543d8007770000000007270e00000568656c6c6f"
    );
    assert_eq!(tx.id().unwrap(), "BsSvSq7D8ejV3HCfAAynJ3ErbcEevngt5BN5JcBC5PGq");
}

#[test]
fn golden_event_chain() {
    let sdk = Sdk::for_network(TESTNET);
    let account = sdk.account(PASSPHRASE, 0).unwrap();
    let mut chain = sdk.event_chain(&account, Some("foo")).unwrap();

    assert_eq!(
        chain.id(),
        Some("2b6QYLttL2R3CLGL4fUB9vaXXX4c5UHrMvwVCxGZpzhxtT4oWNCJmYcM1tweGo")
    );
    assert_eq!(
        chain.latest_hash().unwrap(),
        "GS6Jymmq9jvh4g2ZPXn3YVEDsVjbedUeuBD9uHQ4iM4W"
    );
    assert_eq!(
        chain.create_resource_id(Some("bar")).unwrap(),
        "31E2kKp5TtUGx3MxyX5e2WGqoCfgD9winiE8Y3MAzYUWie9CQx9syR6W7VhRyP"
    );

    let mut event = Event::new(&serde_json::json!({"foo": "bar"}), None).unwrap();
    event.timestamp = 1_609_459_200;
    let event = chain.add(event).unwrap();
    event.sign_with(&account).unwrap();

    assert_eq!(event.body, "BFragPoLCHrFeo7BPi");
    assert_eq!(
        event.hash.as_deref(),
        Some("D6t1dwBWMdjmwRu2GtRt4UGw1D332Ucq9Z1x3uJWop2a")
    );
}
