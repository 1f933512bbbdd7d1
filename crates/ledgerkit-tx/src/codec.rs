//! Binary layouts: the exact bytes hashed for the id and signed for proofs.
//!
//! All integers are big-endian. Amounts, fees, timestamps and expiry are u64;
//! counts and length prefixes are u16. Addresses are 26 raw bytes, public keys
//! 32 raw bytes.
//!
//! Version 3 shares one header for every type:
//! `type || 3 || network || timestamp || key_type || public_key || fee`.
//! Earlier versions interleave these fields per type and carry the network
//! byte only where the layout needs it.

use bytes::{BufMut, BytesMut};
use ledgerkit_core::{Address, Binary, KeyType};

use crate::error::{Result, TxError};
use crate::payload::TxPayload;
use crate::types::TxType;

/// Header fields the codec needs, resolved from a [`Transaction`](crate::Transaction).
#[derive(Debug, Clone, Copy)]
pub(crate) struct Header<'a> {
    pub tx_type: TxType,
    pub version: u8,
    pub network: u8,
    pub timestamp: u64,
    pub key_type: KeyType,
    pub public_key: &'a [u8],
    pub fee: u64,
}

/// Encode a transaction for `(payload kind, header.version)`.
pub(crate) fn encode(header: &Header<'_>, payload: &TxPayload) -> Result<Vec<u8>> {
    let mut buf = BytesMut::with_capacity(128);
    if header.version == 3 {
        put_v3_header(&mut buf, header);
        put_v3_body(&mut buf, payload)?;
    } else {
        put_legacy(&mut buf, header, payload)?;
    }
    Ok(buf.to_vec())
}

fn put_v3_header(buf: &mut BytesMut, h: &Header<'_>) {
    buf.put_u8(h.tx_type.to_u8());
    buf.put_u8(h.version);
    buf.put_u8(h.network);
    buf.put_u64(h.timestamp);
    buf.put_u8(h.key_type.to_id());
    buf.put_slice(h.public_key);
    buf.put_u64(h.fee);
}

fn put_v3_body(buf: &mut BytesMut, payload: &TxPayload) -> Result<()> {
    match payload {
        TxPayload::Transfer(t) => {
            put_address(buf, &t.recipient);
            buf.put_u64(t.amount);
            put_prefixed(buf, t.attachment.as_bytes())?;
        }
        TxPayload::Lease(l) => {
            put_address(buf, &l.recipient);
            buf.put_u64(l.amount);
        }
        TxPayload::CancelLease(c) => buf.put_slice(c.lease_id.as_bytes()),
        TxPayload::MassTransfer(m) => {
            put_count(buf, m.transfers.len())?;
            for entry in &m.transfers {
                put_address(buf, &entry.recipient);
                buf.put_u64(entry.amount);
            }
            put_prefixed(buf, m.attachment.as_bytes())?;
        }
        TxPayload::SetScript(s) => {
            put_prefixed(buf, s.script.as_ref().map(Binary::as_bytes).unwrap_or_default())?;
        }
        TxPayload::Anchor(a) => put_anchors(buf, &a.anchors)?,
        TxPayload::Association(a) => {
            put_address(buf, &a.recipient);
            buf.put_u32(a.association_type);
            buf.put_u64(a.expires.map(to_u64).transpose()?.unwrap_or(0));
            put_prefixed(buf, a.hash.as_ref().map(Binary::as_bytes).unwrap_or_default())?;
        }
        TxPayload::RevokeAssociation(r) => {
            put_address(buf, &r.recipient);
            buf.put_u32(r.association_type);
            put_prefixed(buf, r.hash.as_ref().map(Binary::as_bytes).unwrap_or_default())?;
        }
        TxPayload::Sponsorship(s) | TxPayload::CancelSponsorship(s) => {
            put_address(buf, &s.recipient);
        }
    }
    Ok(())
}

fn put_legacy(buf: &mut BytesMut, h: &Header<'_>, payload: &TxPayload) -> Result<()> {
    buf.put_u8(h.tx_type.to_u8());
    buf.put_u8(h.version);

    match (payload, h.version) {
        (TxPayload::Transfer(t), 2) => {
            buf.put_slice(h.public_key);
            buf.put_u64(h.timestamp);
            buf.put_u64(t.amount);
            buf.put_u64(h.fee);
            put_address(buf, &t.recipient);
            put_prefixed(buf, t.attachment.as_bytes())?;
        }
        (TxPayload::Lease(l), 2) => {
            // Asset flag: leases are always in the native asset
            buf.put_u8(0);
            buf.put_slice(h.public_key);
            put_address(buf, &l.recipient);
            buf.put_u64(l.amount);
            buf.put_u64(h.fee);
            buf.put_u64(h.timestamp);
        }
        (TxPayload::CancelLease(c), 2) => {
            buf.put_u8(h.network);
            buf.put_slice(h.public_key);
            buf.put_u64(h.fee);
            buf.put_u64(h.timestamp);
            buf.put_slice(c.lease_id.as_bytes());
        }
        (TxPayload::MassTransfer(m), 1) => {
            buf.put_slice(h.public_key);
            put_count(buf, m.transfers.len())?;
            for entry in &m.transfers {
                put_address(buf, &entry.recipient);
                buf.put_u64(entry.amount);
            }
            buf.put_u64(h.timestamp);
            buf.put_u64(h.fee);
            put_prefixed(buf, m.attachment.as_bytes())?;
        }
        (TxPayload::SetScript(s), 1) => {
            buf.put_u8(h.network);
            buf.put_slice(h.public_key);
            put_optional(buf, s.script.as_ref())?;
            buf.put_u64(h.fee);
            buf.put_u64(h.timestamp);
        }
        (TxPayload::Anchor(a), 1) => {
            buf.put_slice(h.public_key);
            put_anchors(buf, &a.anchors)?;
            buf.put_u64(h.timestamp);
            buf.put_u64(h.fee);
        }
        (TxPayload::Association(a), 1) => {
            if a.expires.is_some() {
                return Err(TxError::Validation(
                    "association expiry requires version 3".into(),
                ));
            }
            put_legacy_association(buf, h, &a.recipient, a.association_type, a.hash.as_ref())?;
        }
        (TxPayload::RevokeAssociation(r), 1) => {
            put_legacy_association(buf, h, &r.recipient, r.association_type, r.hash.as_ref())?;
        }
        (TxPayload::Sponsorship(s) | TxPayload::CancelSponsorship(s), 1) => {
            buf.put_u8(h.network);
            buf.put_slice(h.public_key);
            put_address(buf, &s.recipient);
            buf.put_u64(h.timestamp);
            buf.put_u64(h.fee);
        }
        (_, version) => {
            return Err(TxError::UnsupportedVersion {
                tx_type: h.tx_type,
                version,
            })
        }
    }
    Ok(())
}

fn put_legacy_association(
    buf: &mut BytesMut,
    h: &Header<'_>,
    recipient: &Address,
    association_type: u32,
    hash: Option<&Binary>,
) -> Result<()> {
    buf.put_u8(h.network);
    buf.put_slice(h.public_key);
    put_address(buf, recipient);
    buf.put_u32(association_type);
    put_optional(buf, hash)?;
    buf.put_u64(h.timestamp);
    buf.put_u64(h.fee);
    Ok(())
}

fn put_address(buf: &mut BytesMut, address: &Address) {
    buf.put_slice(address.as_bytes());
}

fn put_count(buf: &mut BytesMut, count: usize) -> Result<()> {
    let count = u16::try_from(count)
        .map_err(|_| TxError::Validation(format!("too many entries: {count}")))?;
    buf.put_u16(count);
    Ok(())
}

/// `u16 length || bytes`.
fn put_prefixed(buf: &mut BytesMut, bytes: &[u8]) -> Result<()> {
    let len = u16::try_from(bytes.len())
        .map_err(|_| TxError::Validation(format!("field too long: {} bytes", bytes.len())))?;
    buf.put_u16(len);
    buf.put_slice(bytes);
    Ok(())
}

/// `1 || u16 length || bytes` when present, `0` when absent.
fn put_optional(buf: &mut BytesMut, value: Option<&Binary>) -> Result<()> {
    match value {
        Some(v) => {
            buf.put_u8(1);
            put_prefixed(buf, v.as_bytes())
        }
        None => {
            buf.put_u8(0);
            Ok(())
        }
    }
}

fn put_anchors(buf: &mut BytesMut, anchors: &[Binary]) -> Result<()> {
    put_count(buf, anchors.len())?;
    for hash in anchors {
        put_prefixed(buf, hash.as_bytes())?;
    }
    Ok(())
}

pub(crate) fn to_u64(value: i64) -> Result<u64> {
    u64::try_from(value).map_err(|_| TxError::Validation(format!("negative timestamp: {value}")))
}
