//! Proptest generators for property-based testing.

use proptest::prelude::*;

use ledgerkit::core::AccountFactory;
use ledgerkit::tx::types::{MAX_ANCHOR_LEN, MAX_ATTACHMENT_LEN, MAX_TRANSFERS};
use ledgerkit::{
    Account, Address, Anchor, Association, Binary, CancelLease, Lease, MassTransfer,
    RevokeAssociation, SetScript, Sponsorship, Transaction, Transfer, TxPayload, MAINNET, TESTNET,
};

/// A deterministic testnet account from an arbitrary seed.
pub fn account() -> impl Strategy<Value = Account> {
    any::<[u8; 32]>().prop_map(|seed| {
        AccountFactory::new(TESTNET)
            .create_from_seed_bytes(&seed)
            .expect("any 32 bytes are an ed25519 seed")
    })
}

/// A passphrase of printable words.
pub fn passphrase() -> impl Strategy<Value = String> {
    "[a-z]{3,10}( [a-z]{3,10}){0,11}".prop_map(String::from)
}

/// Either public network byte.
pub fn network() -> impl Strategy<Value = u8> {
    prop_oneof![Just(TESTNET), Just(MAINNET)]
}

/// A valid address on testnet.
pub fn address() -> impl Strategy<Value = Address> {
    any::<[u8; 32]>().prop_map(|key| Address::derive(&key, TESTNET))
}

pub fn amount() -> impl Strategy<Value = u64> {
    1u64..=u64::MAX
}

/// Attachment bytes within the protocol limit.
pub fn attachment() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=MAX_ATTACHMENT_LEN)
}

/// Millisecond timestamps between 2001 and 2286.
pub fn timestamp() -> impl Strategy<Value = i64> {
    1_000_000_000_000i64..=9_999_999_999_999i64
}

/// Any payload, valid at the default version.
pub fn tx_payload() -> impl Strategy<Value = TxPayload> {
    prop_oneof![
        (address(), amount(), attachment()).prop_map(|(to, amount, att)| -> TxPayload {
            Transfer::new(to, amount)
                .and_then(|t| t.with_attachment(att))
                .expect("generated transfer is valid")
                .into()
        }),
        (address(), amount()).prop_map(|(to, amount)| -> TxPayload {
            Lease::new(to, amount).expect("generated lease is valid").into()
        }),
        any::<[u8; 32]>().prop_map(|id| -> TxPayload {
            CancelLease::new(Binary::from(id)).expect("lease id is 32 bytes").into()
        }),
        prop::collection::vec((address(), amount()), 1..=MAX_TRANSFERS.min(8)).prop_map(
            |entries| -> TxPayload {
                let mut mass = MassTransfer::default();
                for (to, amount) in entries {
                    mass.add(to, amount).expect("generated entry is valid");
                }
                mass.into()
            }
        ),
        prop::option::of(prop::collection::vec(any::<u8>(), 1..64)).prop_map(
            |script| -> TxPayload {
                let script = match script {
                    Some(script) => SetScript::new(script),
                    None => SetScript::clear(),
                };
                script.into()
            }
        ),
        prop::collection::vec(any::<u8>(), 1..=MAX_ANCHOR_LEN).prop_map(|hash| -> TxPayload {
            Anchor::single(hash).expect("anchor hash is 1..=64 bytes").into()
        }),
        (address(), any::<u32>(), prop::option::of(prop::collection::vec(any::<u8>(), 1..=64)))
            .prop_map(|(to, kind, hash)| -> TxPayload {
                let association = Association::new(to, kind);
                let association = match hash {
                    Some(hash) => association.with_hash(hash).expect("hash within limit"),
                    None => association,
                };
                association.into()
            }),
        (address(), any::<u32>())
            .prop_map(|(to, kind)| -> TxPayload { RevokeAssociation::new(to, kind).into() }),
        address().prop_map(|to| -> TxPayload { Sponsorship::new(to).into() }),
        address().prop_map(|to| TxPayload::CancelSponsorship(Sponsorship::new(to))),
    ]
}

/// Parameters for generating a transaction.
#[derive(Debug, Clone)]
pub struct TxParams {
    pub seed: [u8; 32],
    pub network: u8,
    pub payload: TxPayload,
    pub timestamp: i64,
}

impl Arbitrary for TxParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (any::<[u8; 32]>(), network(), tx_payload(), timestamp())
            .prop_map(|(seed, network, payload, timestamp)| TxParams {
                seed,
                network,
                payload,
                timestamp,
            })
            .boxed()
    }
}

/// An unsigned transaction from parameters, sender and timestamp set.
pub fn tx_from_params(params: &TxParams) -> Transaction {
    let sender = AccountFactory::new(params.network)
        .create_from_seed_bytes(&params.seed)
        .expect("any 32 bytes are an ed25519 seed");
    let mut tx = Transaction::new(params.payload.clone())
        .expect("generated payload is valid")
        .with_timestamp(params.timestamp);
    tx.set_sender(&sender).expect("sender has a public key");
    tx
}
