//! Event chains: append-only, hash-linked event logs anchored to an account.
//!
//! A chain's id is derived from its owner's public sign key. The first event
//! links to the chain's initial hash, `sha256(raw_id)`; every later event
//! links to its predecessor's hash. A chain whose first event links elsewhere
//! is *partial*: a suffix of a longer chain held somewhere else.

use ledgerkit_core::{sha256, Account, Binary, SecureRng};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};

use crate::error::{EventError, Result};
use crate::event::Event;
use crate::id::{
    decode_id, derive_id, is_valid_id, nonce_from_seed, random_nonce, CHAIN_ID_KIND,
    RESOURCE_ID_KIND,
};

/// An ordered list of events under one chain id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventChain {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(default)]
    events: Vec<Event>,
    /// Latest hash to report while `events` is empty. Always `None` otherwise.
    #[serde(
        default,
        rename = "latestHash",
        skip_serializing_if = "Option::is_none"
    )]
    latest_hash_override: Option<String>,
}

impl EventChain {
    /// An empty chain without an id. Call [`EventChain::init_for`] next.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty chain with an existing id.
    pub fn with_id(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        let raw = decode_id(&id)?;
        if raw[0] != CHAIN_ID_KIND {
            return Err(EventError::InvalidArgument(format!(
                "'{id}' is not an event chain id"
            )));
        }
        Ok(Self {
            id: Some(id),
            ..Self::default()
        })
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Derive this chain's id from `account`.
    ///
    /// With a `nonce_seed` the id is reproducible; without one a random nonce
    /// is drawn from the OS.
    pub fn init_for(&mut self, account: &Account, nonce_seed: Option<&str>) -> Result<()> {
        self.init_for_with_rng(account, nonce_seed, &mut OsRng)
    }

    /// [`EventChain::init_for`] with an explicit random source.
    pub fn init_for_with_rng(
        &mut self,
        account: &Account,
        nonce_seed: Option<&str>,
        rng: &mut dyn SecureRng,
    ) -> Result<()> {
        if let Some(id) = &self.id {
            return Err(EventError::BadState(format!("chain id already set to {id}")));
        }
        let public_key = account.public_key().map_err(|_| {
            EventError::InvalidArgument("account has no public sign key".into())
        })?;

        let nonce = match nonce_seed {
            Some(seed) => nonce_from_seed(seed),
            None => random_nonce(rng),
        };
        let id = derive_id(CHAIN_ID_KIND, public_key.as_bytes(), &nonce);
        tracing::debug!(chain_id = %id, owner = %account.address(), "initialized event chain");

        self.id = Some(id);
        self.latest_hash_override = Some(self.initial_hash()?);
        Ok(())
    }

    fn raw_id(&self) -> Result<[u8; crate::id::ID_LEN]> {
        let id = self
            .id
            .as_deref()
            .ok_or_else(|| EventError::BadState("chain has no id".into()))?;
        decode_id(id)
    }

    /// `base58(sha256(raw_id))`, what the first event links to.
    pub fn initial_hash(&self) -> Result<String> {
        Ok(Binary::from(sha256(&self.raw_id()?)).to_base58())
    }

    /// Hash of the last event, else the override, else the initial hash.
    pub fn latest_hash(&self) -> Result<String> {
        match (self.events.last(), &self.latest_hash_override) {
            (Some(last), _) => last.hash().map_err(|_| {
                EventError::BadState("latest event is not signed".into())
            }),
            (None, Some(hash)) => Ok(hash.clone()),
            (None, None) => self.initial_hash(),
        }
    }

    /// Link `event` to the current latest hash and append it.
    ///
    /// Returns the appended event so it can be signed in place. A signed event
    /// must already link to the latest hash.
    pub fn add(&mut self, mut event: Event) -> Result<&mut Event> {
        let latest = self.latest_hash()?;
        if event.is_signed() {
            if event.previous.as_deref() != Some(latest.as_str()) {
                return Err(EventError::BrokenLink {
                    index: self.events.len(),
                    expected: latest,
                    found: event.previous.unwrap_or_default(),
                });
            }
        } else {
            event.previous = Some(latest);
        }

        self.latest_hash_override = None;
        self.events.push(event);
        tracing::trace!(chain_id = ?self.id, len = self.events.len(), "added event");

        let index = self.events.len() - 1;
        Ok(&mut self.events[index])
    }

    /// Whether the first event links somewhere other than the initial hash.
    pub fn is_partial(&self) -> bool {
        match self.events.first() {
            Some(first) => match self.initial_hash() {
                Ok(initial) => first.previous.as_deref() != Some(initial.as_str()),
                Err(_) => true,
            },
            None => match (&self.latest_hash_override, self.initial_hash()) {
                (Some(latest), Ok(initial)) => *latest != initial,
                _ => false,
            },
        }
    }

    /// The events strictly after the one with hash `hash`, as a new chain.
    ///
    /// If `hash` is where this chain starts, the whole chain is returned.
    pub fn get_partial_after(&self, hash: &str) -> Result<EventChain> {
        let start = match self.events.first() {
            Some(first) => first.previous.clone(),
            None => Some(self.latest_hash()?),
        };
        if start.as_deref() == Some(hash) {
            return Ok(self.clone());
        }

        let position = self
            .events
            .iter()
            .position(|e| e.hash().is_ok_and(|h| h == hash))
            .ok_or_else(|| EventError::NotFound(hash.to_string()))?;

        let events = self.events[position + 1..].to_vec();
        let latest_hash_override = if events.is_empty() {
            Some(self.latest_hash()?)
        } else {
            None
        };
        tracing::debug!(
            chain_id = ?self.id,
            after = hash,
            kept = events.len(),
            "extracted partial chain"
        );
        Ok(EventChain {
            id: self.id.clone(),
            events,
            latest_hash_override,
        })
    }

    /// Derive a resource id namespaced under this chain.
    pub fn create_resource_id(&self, nonce_seed: Option<&str>) -> Result<String> {
        self.create_resource_id_with_rng(nonce_seed, &mut OsRng)
    }

    pub fn create_resource_id_with_rng(
        &self,
        nonce_seed: Option<&str>,
        rng: &mut dyn SecureRng,
    ) -> Result<String> {
        let raw = self.raw_id()?;
        let nonce = match nonce_seed {
            Some(seed) => nonce_from_seed(seed),
            None => random_nonce(rng),
        };
        Ok(derive_id(RESOURCE_ID_KIND, &raw, &nonce))
    }

    /// Whether `id` is a resource id created under this chain.
    pub fn is_valid_resource_id(&self, id: &str) -> bool {
        self.raw_id()
            .is_ok_and(|raw| is_valid_id(id, RESOURCE_ID_KIND, &raw))
    }

    /// Whether this chain's id was derived from `account`'s sign key.
    pub fn is_valid_id_for(&self, account: &Account) -> bool {
        match (&self.id, account.public_key()) {
            (Some(id), Ok(public_key)) => is_valid_id(id, CHAIN_ID_KIND, public_key.as_bytes()),
            _ => false,
        }
    }

    /// Check every link and signature, reporting the first failure.
    pub fn validate(&self) -> Result<()> {
        let mut expected = match self.events.first() {
            Some(_) if self.is_partial() => None,
            Some(_) => Some(self.initial_hash()?),
            None => return Ok(()),
        };

        for (index, event) in self.events.iter().enumerate() {
            let found = event.previous.clone().unwrap_or_default();
            if let Some(expected) = expected {
                if found != expected {
                    tracing::warn!(index, "event chain link is broken");
                    return Err(EventError::BrokenLink {
                        index,
                        expected,
                        found,
                    });
                }
            }
            if !event.verify_signature()? || event.hash.as_deref() != Some(event.compute_hash()?.as_str()) {
                tracing::warn!(index, "event signature does not verify");
                return Err(EventError::InvalidSignature { index });
            }
            expected = Some(event.compute_hash()?);
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
