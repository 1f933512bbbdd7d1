//! Events: signed, hash-linked entries of an event chain.

use ledgerkit_core::{provider_for, sha256, Account, Binary, KeyType};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{EventError, Result};

/// One entry of an [`EventChain`](crate::EventChain).
///
/// `body` is the base58 encoding of the application's JSON. `previous`,
/// `signkey`, `signature` and `hash` are filled in by adding the event to a
/// chain and signing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub body: String,
    /// Unix seconds.
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signkey: Option<Binary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<Binary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

impl Event {
    /// Encode `body` as JSON and stamp the current time.
    pub fn new<T: Serialize + ?Sized>(body: &T, previous: Option<String>) -> Result<Self> {
        let json = serde_json::to_vec(body)?;
        Ok(Self {
            body: bs58::encode(json).into_string(),
            timestamp: now_secs(),
            previous,
            signkey: None,
            signature: None,
            hash: None,
        })
    }

    /// Decode the JSON body.
    pub fn decoded_body<T: DeserializeOwned>(&self) -> Result<T> {
        let json = Binary::from_base58(&self.body)?;
        Ok(serde_json::from_slice(json.as_bytes())?)
    }

    /// `body \n timestamp \n previous \n signkey`, the signed message.
    pub fn message(&self) -> Result<String> {
        let previous = self
            .previous
            .as_deref()
            .ok_or_else(|| EventError::BadState("event has no previous hash".into()))?;
        let signkey = self
            .signkey
            .as_ref()
            .ok_or_else(|| EventError::BadState("event has no sign key".into()))?;
        Ok(format!(
            "{}\n{}\n{}\n{}",
            self.body,
            self.timestamp,
            previous,
            signkey.to_base58()
        ))
    }

    /// `base58(sha256(message))`.
    pub fn compute_hash(&self) -> Result<String> {
        Ok(Binary::from(sha256(self.message()?.as_bytes())).to_base58())
    }

    /// The stored hash, or the computed one when unset.
    pub fn hash(&self) -> Result<String> {
        match &self.hash {
            Some(hash) => Ok(hash.clone()),
            None => self.compute_hash(),
        }
    }

    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }

    /// Sign as `account`. The event must already link to a previous hash.
    ///
    /// The event is left untouched when signing fails.
    pub fn sign_with(&mut self, account: &Account) -> Result<()> {
        if account.key_type() != KeyType::Ed25519 {
            return Err(EventError::UnsupportedKeyType(account.key_type()));
        }
        let mut signed = Self {
            signkey: Some(account.public_key()?.clone()),
            signature: None,
            hash: None,
            ..self.clone()
        };
        let message = signed.message()?;
        signed.signature = Some(account.sign(message.as_bytes())?);
        signed.hash = Some(signed.compute_hash()?);

        tracing::debug!(hash = ?signed.hash, signer = %account.address(), "signed event");
        *self = signed;
        Ok(())
    }

    /// Check the signature against `signkey`. Unsigned events are `false`.
    pub fn verify_signature(&self) -> Result<bool> {
        let (Some(signkey), Some(signature)) = (&self.signkey, &self.signature) else {
            return Ok(false);
        };
        let message = self.message()?;
        Ok(provider_for(KeyType::Ed25519).verify(signkey, message.as_bytes(), signature))
    }
}

fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}
