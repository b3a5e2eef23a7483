//! Signer set configuration.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use velum_ledger::SignerId;

/// Errors building a signer set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignerSetError {
    /// A signer set must contain at least one account.
    #[error("signer set is empty")]
    Empty,

    /// Each account may appear once.
    #[error("duplicate signer {0}")]
    Duplicate(SignerId),
}

/// The ordered set of accounts whose signatures make up a quorum.
///
/// Fixed at configuration time and shared read-only by every attestation
/// pass. Order matters: attestation reports list signers in exactly this
/// order regardless of how individual ledger calls complete.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerSet {
    members: Vec<SignerId>,
}

impl SignerSet {
    /// Build a set from an ordered list of accounts.
    pub fn new(members: Vec<SignerId>) -> Result<Self, SignerSetError> {
        if members.is_empty() {
            return Err(SignerSetError::Empty);
        }
        for (i, signer) in members.iter().enumerate() {
            if members[..i].contains(signer) {
                return Err(SignerSetError::Duplicate(*signer));
            }
        }
        Ok(Self { members })
    }

    /// The reference deployment's set: five deterministic dev accounts.
    pub fn dev(count: usize) -> Self {
        Self {
            members: (0..count.max(1)).map(SignerId::dev).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, signer: SignerId) -> bool {
        self.members.contains(&signer)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SignerId> {
        self.members.iter()
    }

    /// Members in configured order.
    pub fn members(&self) -> &[SignerId] {
        &self.members
    }
}

impl fmt::Display for SignerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SignerSet[{}]", self.members.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_order() {
        let members = vec![SignerId::dev(2), SignerId::dev(0), SignerId::dev(1)];
        let set = SignerSet::new(members.clone()).unwrap();
        assert_eq!(set.members(), &members[..]);
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(SignerSet::new(vec![]), Err(SignerSetError::Empty));
    }

    #[test]
    fn rejects_duplicates() {
        let err = SignerSet::new(vec![SignerId::dev(0), SignerId::dev(0)]).unwrap_err();
        assert_eq!(err, SignerSetError::Duplicate(SignerId::dev(0)));
    }

    #[test]
    fn dev_set_has_requested_size() {
        assert_eq!(SignerSet::dev(5).len(), 5);
        // A zero-sized set is meaningless; dev clamps to one member.
        assert_eq!(SignerSet::dev(0).len(), 1);
    }
}
