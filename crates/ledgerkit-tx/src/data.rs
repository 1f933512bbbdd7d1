//! Structured data form of a transaction, as exchanged with a node's JSON API.
//!
//! Decoding names every missing required field in one error and rejects a
//! type tag that disagrees with the requested kind.

use ledgerkit_core::{Address, Binary, KeyType};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TxError};
use crate::payload::{
    Anchor, Association, CancelLease, Lease, MassTransfer, RevokeAssociation, SetScript,
    Sponsorship, Transfer, TransferEntry, TxPayload,
};
use crate::transaction::Transaction;
use crate::types::{TxType, DEFAULT_VERSION};

const SCRIPT_PREFIX: &str = "base64:";

/// One mass transfer entry in data form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferData {
    pub recipient: Address,
    pub amount: u64,
}

/// Every field any transaction kind may carry. Unused fields stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransactionData {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub tx_type: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_key_type: Option<KeyType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_public_key: Option<Binary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub proofs: Vec<Binary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sponsor: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sponsor_key_type: Option<KeyType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sponsor_public_key: Option<Binary>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Binary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lease_id: Option<Binary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lease: Option<Box<TransactionData>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transfers: Option<Vec<TransferData>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transfer_count: Option<usize>,
    /// `"base64:<script>"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchors: Option<Vec<Binary>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub association_type: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<Binary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires: Option<i64>,
}

/// Collects the names of absent required fields.
#[derive(Default)]
struct Required {
    missing: Vec<&'static str>,
}

impl Required {
    fn get<T>(&mut self, name: &'static str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.missing.push(name);
        }
        value
    }

    fn error(&self, tx_type: TxType) -> TxError {
        TxError::InvalidArgument(format!(
            "{tx_type} is missing required fields: {}",
            self.missing.join(", ")
        ))
    }
}

fn parse_script(script: &str) -> Result<Option<Binary>> {
    let encoded = script.strip_prefix(SCRIPT_PREFIX).unwrap_or(script);
    if encoded.is_empty() {
        return Ok(None);
    }
    Binary::from_base64(encoded)
        .map(Some)
        .map_err(|e| TxError::Malformed(format!("script: {e}")))
}

fn payload_from_data(tx_type: TxType, data: &mut TransactionData) -> Result<TxPayload> {
    let mut req = Required::default();

    let payload: TxPayload = match tx_type {
        TxType::Transfer => {
            let recipient = req.get("recipient", data.recipient);
            let amount = req.get("amount", data.amount);
            let (Some(recipient), Some(amount)) = (recipient, amount) else {
                return Err(req.error(tx_type));
            };
            Transfer::new(recipient, amount)?
                .with_attachment(data.attachment.take().unwrap_or_default())?
                .into()
        }
        TxType::Lease => {
            let recipient = req.get("recipient", data.recipient);
            let amount = req.get("amount", data.amount);
            let (Some(recipient), Some(amount)) = (recipient, amount) else {
                return Err(req.error(tx_type));
            };
            Lease::new(recipient, amount)?.into()
        }
        TxType::CancelLease => {
            let Some(lease_id) = req.get("leaseId", data.lease_id.take()) else {
                return Err(req.error(tx_type));
            };
            let mut cancel = CancelLease::new(lease_id)?;
            if let Some(lease) = data.lease.take() {
                cancel.lease = Some(Box::new(Transaction::from_data_as(TxType::Lease, *lease)?));
            }
            cancel.into()
        }
        TxType::MassTransfer => {
            let transfers = data
                .transfers
                .take()
                .unwrap_or_default()
                .into_iter()
                .map(|t| TransferEntry {
                    recipient: t.recipient,
                    amount: t.amount,
                })
                .collect();
            MassTransfer::new(transfers)?
                .with_attachment(data.attachment.take().unwrap_or_default())?
                .into()
        }
        TxType::SetScript => SetScript {
            script: data.script.as_deref().map(parse_script).transpose()?.flatten(),
        }
        .into(),
        TxType::Anchor => {
            let Some(anchors) = req.get("anchors", data.anchors.take()) else {
                return Err(req.error(tx_type));
            };
            Anchor::new(anchors)?.into()
        }
        TxType::Association | TxType::RevokeAssociation => {
            let recipient = req.get("recipient", data.recipient);
            let association_type = req.get("associationType", data.association_type);
            let (Some(recipient), Some(association_type)) = (recipient, association_type) else {
                return Err(req.error(tx_type));
            };
            if tx_type == TxType::Association {
                let mut association = Association::new(recipient, association_type);
                association.hash = data.hash.take();
                association.expires = data.expires;
                TxPayload::Association(association)
            } else {
                let mut revoke = RevokeAssociation::new(recipient, association_type);
                revoke.hash = data.hash.take();
                TxPayload::RevokeAssociation(revoke)
            }
        }
        TxType::Sponsorship | TxType::CancelSponsorship => {
            let Some(recipient) = req.get("recipient", data.recipient) else {
                return Err(req.error(tx_type));
            };
            if tx_type == TxType::Sponsorship {
                TxPayload::Sponsorship(Sponsorship::new(recipient))
            } else {
                TxPayload::CancelSponsorship(Sponsorship::new(recipient))
            }
        }
    };
    payload.validate()?;
    Ok(payload)
}

fn payload_to_data(payload: &TxPayload, data: &mut TransactionData) -> Result<()> {
    match payload {
        TxPayload::Transfer(t) => {
            data.recipient = Some(t.recipient);
            data.amount = Some(t.amount);
            data.attachment = Some(t.attachment.clone());
        }
        TxPayload::Lease(l) => {
            data.recipient = Some(l.recipient);
            data.amount = Some(l.amount);
        }
        TxPayload::CancelLease(c) => {
            data.lease_id = Some(c.lease_id.clone());
            data.lease = c.lease.as_ref().map(|l| l.to_data()).transpose()?.map(Box::new);
        }
        TxPayload::MassTransfer(m) => {
            data.transfers = Some(
                m.transfers
                    .iter()
                    .map(|t| TransferData {
                        recipient: t.recipient,
                        amount: t.amount,
                    })
                    .collect(),
            );
            data.transfer_count = Some(m.transfers.len());
            data.attachment = Some(m.attachment.clone());
        }
        TxPayload::SetScript(s) => {
            data.script = s
                .script
                .as_ref()
                .map(|b| format!("{SCRIPT_PREFIX}{}", b.to_base64()));
        }
        TxPayload::Anchor(a) => data.anchors = Some(a.anchors.clone()),
        TxPayload::Association(a) => {
            data.recipient = Some(a.recipient);
            data.association_type = Some(a.association_type);
            data.hash = a.hash.clone();
            data.expires = a.expires;
        }
        TxPayload::RevokeAssociation(r) => {
            data.recipient = Some(r.recipient);
            data.association_type = Some(r.association_type);
            data.hash = r.hash.clone();
        }
        TxPayload::Sponsorship(s) | TxPayload::CancelSponsorship(s) => {
            data.recipient = Some(s.recipient);
        }
    }
    Ok(())
}

impl Transaction {
    /// Decode any kind, dispatching on the `type` field.
    pub fn from_data(data: TransactionData) -> Result<Self> {
        let code = data
            .tx_type
            .ok_or_else(|| TxError::InvalidArgument("missing required fields: type".into()))?;
        let tx_type = TxType::from_u8(code)
            .ok_or_else(|| TxError::Malformed(format!("unknown transaction type {code}")))?;
        Self::from_data_as(tx_type, data)
    }

    /// Decode data that must describe a transaction of kind `expected`.
    pub fn from_data_as(expected: TxType, mut data: TransactionData) -> Result<Self> {
        if let Some(code) = data.tx_type {
            if code != expected.to_u8() {
                return Err(TxError::InvalidArgument(format!(
                    "expected {expected} (type {}), got type {code}",
                    expected.to_u8()
                )));
            }
        }
        let version = data.version.unwrap_or(DEFAULT_VERSION);
        if !expected.supports_version(version) {
            return Err(TxError::UnsupportedVersion {
                tx_type: expected,
                version,
            });
        }
        let key_type = data.sender_key_type.unwrap_or(KeyType::Ed25519);
        if version >= 3 && key_type != KeyType::Ed25519 {
            return Err(TxError::UnsupportedKeyType(key_type));
        }

        let payload = payload_from_data(expected, &mut data)?;
        let mut tx = Transaction::new(payload)?.with_version(version)?;
        // Node data may carry a fee paid under an older, lower minimum.
        if let Some(fee) = data.fee {
            tx.fee = fee;
        }
        tx.timestamp = data.timestamp;
        tx.sender = data.sender;
        tx.network = data.sender.map(|s| s.network());
        tx.sender_key_type = key_type;
        tx.sender_public_key = data.sender_public_key;
        tx.sponsor = data.sponsor;
        tx.sponsor_key_type = data.sponsor_key_type;
        tx.sponsor_public_key = data.sponsor_public_key;
        tx.proofs = data.proofs;
        tx.id = data.id;
        tx.height = data.height;

        tracing::trace!(tx_type = %expected, version, "decoded transaction data");
        Ok(tx)
    }

    /// The data form. The id is included whenever it can be computed.
    pub fn to_data(&self) -> Result<TransactionData> {
        let mut data = TransactionData {
            tx_type: Some(self.tx_type().to_u8()),
            version: Some(self.version()),
            id: self.id().ok(),
            sender: self.sender,
            sender_key_type: Some(self.sender_key_type),
            sender_public_key: self.sender_public_key.clone(),
            fee: Some(self.fee()),
            timestamp: self.timestamp,
            proofs: self.proofs.clone(),
            height: self.height,
            sponsor: self.sponsor,
            sponsor_key_type: self.sponsor_key_type,
            sponsor_public_key: self.sponsor_public_key.clone(),
            ..TransactionData::default()
        };
        payload_to_data(self.payload(), &mut data)?;
        Ok(data)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_data()?)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_data(serde_json::from_str(json)?)
    }
}
