//! VELUM Quorum Attestation
//!
//! A record is trustworthy once every member of a fixed signer set has a
//! recorded signature for its key on the ledger. This crate drives that
//! quorum: each attestation pass reads the per-signer signature bit and
//! makes any signer that has not yet signed do so on the spot.
//!
//! Passes are idempotent and self-healing. A signer that signed earlier
//! reports as already signed; a signer that failed earlier is simply
//! retried on the next pass. Partial progress is kept by the ledger, so
//! repeated invocation converges toward a complete quorum without any
//! retry machinery here.

pub mod engine;
pub mod report;
pub mod signer;

pub use engine::QuorumEngine;
pub use report::{AttestationReport, SignerAttestation, SignerStatus};
pub use signer::{SignerSet, SignerSetError};

use std::time::Duration;

/// Quorum attestation configuration.
#[derive(Clone, Debug)]
pub struct QuorumConfig {
    /// Bound on each ledger round trip (signature query or write). A
    /// timed-out write counts as a signing failure, never left pending.
    pub sign_timeout: Duration,
}

impl Default for QuorumConfig {
    fn default() -> Self {
        Self {
            sign_timeout: Duration::from_secs(5),
        }
    }
}
