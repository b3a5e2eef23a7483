//! Attestation results.

use std::fmt;

use serde::{Deserialize, Serialize};
use velum_ledger::SignerId;

/// Outcome of one signer's attestation within a single pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignerStatus {
    /// The ledger already held this signer's signature.
    AlreadySigned,
    /// The signature was recorded during this pass.
    SignedNow,
    /// The signer rejected or failed to sign during this pass.
    Unauthorized,
}

impl SignerStatus {
    /// Whether a signature exists for the signer after this pass.
    pub fn is_signed(self) -> bool {
        matches!(self, Self::AlreadySigned | Self::SignedNow)
    }
}

impl fmt::Display for SignerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AlreadySigned => "already signed",
            Self::SignedNow => "signed now",
            Self::Unauthorized => "not authorized to sign",
        })
    }
}

/// One signer's entry in an attestation report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerAttestation {
    pub signer: SignerId,
    pub status: SignerStatus,
}

/// Result of one attestation pass over a key.
///
/// Contains exactly one entry per configured signer, in signer-set order.
/// Built fresh per pass and never persisted; the durable signature bits
/// live on the ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttestationReport {
    entries: Vec<SignerAttestation>,
}

impl AttestationReport {
    pub(crate) fn new(entries: Vec<SignerAttestation>) -> Self {
        Self { entries }
    }

    /// Entries in signer-set order.
    pub fn entries(&self) -> &[SignerAttestation] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Status for a specific signer, if it is part of the set.
    pub fn status_of(&self, signer: SignerId) -> Option<SignerStatus> {
        self.entries
            .iter()
            .find(|entry| entry.signer == signer)
            .map(|entry| entry.status)
    }

    /// Number of signers with a signature on the ledger after this pass.
    pub fn signed_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.status.is_signed())
            .count()
    }

    /// True iff every configured signer has a recorded signature.
    pub fn quorum_complete(&self) -> bool {
        self.entries.iter().all(|entry| entry.status.is_signed())
    }
}
