//! The transaction model: header fields, proofs and a typed payload.

use ledgerkit_core::{blake2b256, Account, Address, Binary, KeyType};

use crate::codec::{self, to_u64, Header};
use crate::error::{Result, TxError};
use crate::payload::{MassTransfer, TxPayload};
use crate::types::{TxType, DEFAULT_VERSION};

/// A protocol transaction.
///
/// `version`, `fee` and the payload are guarded by setters that keep them
/// valid; the remaining header fields are plain data filled in by signing or
/// by decoding node data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    version: u8,
    pub(crate) fee: u64,
    payload: TxPayload,

    /// Unix milliseconds.
    pub timestamp: Option<i64>,
    pub sender: Option<Address>,
    pub sender_key_type: KeyType,
    pub sender_public_key: Option<Binary>,
    /// Network byte; falls back to the sender address when unset.
    pub network: Option<u8>,

    pub sponsor: Option<Address>,
    pub sponsor_key_type: Option<KeyType>,
    pub sponsor_public_key: Option<Binary>,

    /// Signatures over [`Transaction::to_binary`], in signing order.
    pub proofs: Vec<Binary>,
    /// Id reported by a node; computed from the bytes when unset.
    pub id: Option<String>,
    pub height: Option<u64>,
}

impl Transaction {
    /// A version-3 transaction paying the minimum fee.
    pub fn new(payload: impl Into<TxPayload>) -> Result<Self> {
        let payload = payload.into();
        payload.validate()?;
        Ok(Self {
            version: DEFAULT_VERSION,
            fee: payload.minimum_fee(),
            payload,
            timestamp: None,
            sender: None,
            sender_key_type: KeyType::Ed25519,
            sender_public_key: None,
            network: None,
            sponsor: None,
            sponsor_key_type: None,
            sponsor_public_key: None,
            proofs: Vec::new(),
            id: None,
            height: None,
        })
    }

    pub fn with_version(mut self, version: u8) -> Result<Self> {
        self.set_version(version)?;
        Ok(self)
    }

    pub fn with_fee(mut self, fee: u64) -> Result<Self> {
        self.set_fee(fee)?;
        Ok(self)
    }

    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn tx_type(&self) -> TxType {
        self.payload.tx_type()
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn fee(&self) -> u64 {
        self.fee
    }

    pub fn payload(&self) -> &TxPayload {
        &self.payload
    }

    pub fn set_version(&mut self, version: u8) -> Result<()> {
        let tx_type = self.tx_type();
        if !tx_type.supports_version(version) {
            return Err(TxError::UnsupportedVersion { tx_type, version });
        }
        self.version = version;
        Ok(())
    }

    /// Set the fee, refusing anything below the protocol minimum.
    pub fn set_fee(&mut self, fee: u64) -> Result<()> {
        let minimum = self.payload.minimum_fee();
        if fee < minimum {
            return Err(TxError::Validation(format!(
                "fee {fee} is below the {} minimum of {minimum}",
                self.tx_type()
            )));
        }
        self.fee = fee;
        Ok(())
    }

    /// Append a mass transfer entry and reset the fee to the new minimum.
    pub fn add_transfer(&mut self, recipient: Address, amount: u64) -> Result<()> {
        let tx_type = self.tx_type();
        let TxPayload::MassTransfer(mass) = &mut self.payload else {
            return Err(TxError::InvalidState(format!(
                "cannot add a transfer to a {tx_type} transaction"
            )));
        };
        mass.add(recipient, amount)?;
        self.fee = self.payload.minimum_fee();
        Ok(())
    }

    pub fn mass_transfer(&self) -> Option<&MassTransfer> {
        match &self.payload {
            TxPayload::MassTransfer(m) => Some(m),
            _ => None,
        }
    }

    /// Fill the sender fields from `account`.
    pub fn set_sender(&mut self, account: &Account) -> Result<()> {
        self.sender = Some(*account.address());
        self.sender_key_type = account.key_type();
        self.sender_public_key = Some(account.public_key()?.clone());
        self.network = Some(account.network());
        Ok(())
    }

    fn network_byte(&self) -> Result<u8> {
        self.network
            .or_else(|| self.sender.map(|s| s.network()))
            .ok_or_else(|| TxError::BadState("network is unknown; set a sender".into()))
    }

    /// The exact bytes hashed for the id and signed for proofs.
    pub fn to_binary(&self) -> Result<Vec<u8>> {
        let public_key = self
            .sender_public_key
            .as_ref()
            .ok_or_else(|| TxError::BadState("sender public key not set".into()))?;
        let timestamp = self
            .timestamp
            .ok_or_else(|| TxError::BadState("timestamp not set".into()))?;

        if self.sender_key_type != KeyType::Ed25519 {
            return Err(TxError::UnsupportedKeyType(self.sender_key_type));
        }
        if public_key.len() != 32 {
            return Err(TxError::Validation(format!(
                "sender public key must be 32 bytes, got {}",
                public_key.len()
            )));
        }
        self.payload.validate()?;

        let header = Header {
            tx_type: self.tx_type(),
            version: self.version,
            network: self.network_byte()?,
            timestamp: to_u64(timestamp)?,
            key_type: self.sender_key_type,
            public_key: public_key.as_bytes(),
            fee: self.fee,
        };
        codec::encode(&header, &self.payload)
    }

    /// The node-reported id if present, else `base58(blake2b256(to_binary()))`.
    pub fn id(&self) -> Result<String> {
        match &self.id {
            Some(id) => Ok(id.clone()),
            None => Ok(Binary::from(blake2b256(&self.to_binary()?)).to_base58()),
        }
    }

    pub fn is_signed(&self) -> bool {
        !self.proofs.is_empty()
    }

    /// Sign as `account`, filling sender and timestamp when unset.
    pub fn sign_with(&mut self, account: &Account) -> Result<()> {
        if account.key_type() != KeyType::Ed25519 {
            return Err(TxError::UnsupportedKeyType(account.key_type()));
        }
        if self.sender_public_key.is_none() {
            self.set_sender(account)?;
        }
        if self.timestamp.is_none() {
            self.timestamp = Some(now_millis());
        }

        let proof = account.sign(&self.to_binary()?)?;
        self.proofs.push(proof);

        tracing::debug!(
            tx_type = %self.tx_type(),
            version = self.version,
            signer = %account.address(),
            proofs = self.proofs.len(),
            "signed transaction"
        );
        Ok(())
    }

    /// Co-sign as sponsor, taking over fee responsibility.
    pub fn sponsor_with(&mut self, account: &Account) -> Result<()> {
        if !self.is_signed() {
            return Err(TxError::InvalidState(
                "transaction must be signed before it can be sponsored".into(),
            ));
        }
        let proof = account.sign(&self.to_binary()?)?;

        self.sponsor = Some(*account.address());
        self.sponsor_key_type = Some(account.key_type());
        self.sponsor_public_key = Some(account.public_key()?.clone());
        self.proofs.push(proof);

        tracing::debug!(
            tx_type = %self.tx_type(),
            sponsor = %account.address(),
            proofs = self.proofs.len(),
            "sponsored transaction"
        );
        Ok(())
    }

    /// Whether any proof verifies under `account`'s sign key.
    pub fn is_signed_by(&self, account: &Account) -> Result<bool> {
        let bytes = self.to_binary()?;
        for proof in &self.proofs {
            if account.verify(&bytes, proof)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// Current time in unix milliseconds.
fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default()
}
