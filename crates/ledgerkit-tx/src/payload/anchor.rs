//! Anchoring hashes and attaching account scripts.

use ledgerkit_core::Binary;

use crate::error::{Result, TxError};
use crate::types::MAX_ANCHOR_LEN;

/// Record one or more hashes on the ledger.
///
/// The codec accepts several hashes; consensus currently accepts exactly one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub anchors: Vec<Binary>,
}

impl Anchor {
    pub fn new(anchors: Vec<Binary>) -> Result<Self> {
        let anchor = Self { anchors };
        anchor.validate()?;
        Ok(anchor)
    }

    pub fn single(hash: impl Into<Binary>) -> Result<Self> {
        Self::new(vec![hash.into()])
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.anchors.is_empty() {
            return Err(TxError::Validation("anchor needs at least one hash".into()));
        }
        for (i, hash) in self.anchors.iter().enumerate() {
            if hash.is_empty() || hash.len() > MAX_ANCHOR_LEN {
                return Err(TxError::Validation(format!(
                    "anchor {i} is {} bytes, must be 1..={MAX_ANCHOR_LEN}",
                    hash.len()
                )));
            }
        }
        Ok(())
    }
}

/// Set or clear the account script.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetScript {
    /// Compiled script; `None` removes the current one.
    pub script: Option<Binary>,
}

impl SetScript {
    /// An empty script is the same as [`SetScript::clear`].
    pub fn new(script: impl Into<Binary>) -> Self {
        let script: Binary = script.into();
        Self {
            script: (!script.is_empty()).then_some(script),
        }
    }

    pub fn clear() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_limits() {
        assert!(Anchor::new(vec![]).is_err());
        assert!(Anchor::single(vec![0u8; MAX_ANCHOR_LEN]).is_ok());
        assert!(Anchor::single(vec![0u8; MAX_ANCHOR_LEN + 1]).is_err());
        assert!(Anchor::single(Vec::<u8>::new()).is_err());
        assert!(Anchor::new(vec![Binary::from([1u8; 32]), Binary::from([2u8; 20])]).is_ok());
    }

    #[test]
    fn test_set_script_clear() {
        assert!(SetScript::clear().script.is_none());
        assert_eq!(SetScript::new(vec![1, 2, 3]).script.unwrap().len(), 3);
        assert_eq!(SetScript::new(Vec::<u8>::new()), SetScript::clear());
    }
}
