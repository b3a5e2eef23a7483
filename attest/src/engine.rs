//! The attestation pass.

use std::sync::Arc;

use tokio::time::timeout;
use tracing::{debug, info, warn};

use velum_cipher::IndexKey;
use velum_ledger::{LedgerError, LedgerResult, RecordLedger, SignerId};

use crate::report::{AttestationReport, SignerAttestation, SignerStatus};
use crate::signer::SignerSet;
use crate::QuorumConfig;

/// Drives signature quorum for index keys against the record ledger.
///
/// One engine is built at startup from the configured signer set and shared
/// by all flows; it holds no per-key state of its own.
pub struct QuorumEngine {
    signers: SignerSet,
    config: QuorumConfig,
    ledger: Arc<dyn RecordLedger>,
}

impl QuorumEngine {
    pub fn new(signers: SignerSet, config: QuorumConfig, ledger: Arc<dyn RecordLedger>) -> Self {
        Self {
            signers,
            config,
            ledger,
        }
    }

    /// The configured signer set.
    pub fn signers(&self) -> &SignerSet {
        &self.signers
    }

    /// Run one attestation pass over `key`.
    ///
    /// Signers are visited sequentially in configured order: query the
    /// signature bit, and if it is absent record a signature and wait for
    /// the commit. A signer whose write fails or times out is reported
    /// `Unauthorized` for this pass and the loop moves on, so the report
    /// always holds one entry per signer. The pass is not atomic across
    /// signers; whatever signatures did commit stay on the ledger, and a
    /// later pass picks up from there.
    pub async fn attest(&self, key: IndexKey) -> AttestationReport {
        let mut entries = Vec::with_capacity(self.signers.len());
        for &signer in self.signers.iter() {
            let status = self.attest_one(key, signer).await;
            entries.push(SignerAttestation { signer, status });
        }
        let report = AttestationReport::new(entries);

        if report.quorum_complete() {
            info!(key = %key, signers = report.len(), "quorum complete");
        } else {
            warn!(
                key = %key,
                signed = report.signed_count(),
                signers = report.len(),
                "quorum incomplete"
            );
        }
        report
    }

    async fn attest_one(&self, key: IndexKey, signer: SignerId) -> SignerStatus {
        // A failed or timed-out query funnels into the signing attempt:
        // the signer is treated as unsigned and the write decides its
        // status for this pass.
        match self.query_signed(key, signer).await {
            Ok(true) => {
                debug!(key = %key, signer = %signer, "signature already on ledger");
                return SignerStatus::AlreadySigned;
            }
            Ok(false) => {}
            Err(err) => {
                warn!(key = %key, signer = %signer, error = %err, "signature query failed, attempting to sign");
            }
        }

        match timeout(self.config.sign_timeout, self.ledger.sign(key, signer)).await {
            Ok(Ok(receipt)) => {
                debug!(key = %key, signer = %signer, receipt = %receipt.to_hex(), "signature committed");
                SignerStatus::SignedNow
            }
            Ok(Err(err)) => {
                warn!(key = %key, signer = %signer, error = %err, "signing failed");
                SignerStatus::Unauthorized
            }
            Err(_) => {
                warn!(key = %key, signer = %signer, "signing timed out");
                SignerStatus::Unauthorized
            }
        }
    }

    async fn query_signed(&self, key: IndexKey, signer: SignerId) -> LedgerResult<bool> {
        match timeout(self.config.sign_timeout, self.ledger.has_signed(key, signer)).await {
            Ok(result) => result,
            Err(_) => Err(LedgerError::Communication(
                "signature query timed out".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::time::Duration;
    use velum_ledger::{MemoryLedger, Receipt};

    fn key(text: &str) -> IndexKey {
        IndexKey::from_text_digest(text).unwrap()
    }

    fn engine_with(signers: SignerSet, ledger: Arc<dyn RecordLedger>) -> QuorumEngine {
        QuorumEngine::new(signers, QuorumConfig::default(), ledger)
    }

    #[tokio::test]
    async fn pass_reports_every_signer_in_order() {
        let signers = SignerSet::dev(5);
        let ledger = Arc::new(MemoryLedger::with_accounts(signers.members()));
        let engine = engine_with(signers.clone(), ledger);

        let report = engine.attest(key("khoor")).await;
        assert_eq!(report.len(), 5);
        for (entry, expected) in report.entries().iter().zip(signers.iter()) {
            assert_eq!(entry.signer, *expected);
            assert_eq!(entry.status, SignerStatus::SignedNow);
        }
        assert!(report.quorum_complete());
    }

    #[tokio::test]
    async fn second_pass_sees_existing_signatures() {
        let signers = SignerSet::dev(5);
        let ledger = Arc::new(MemoryLedger::with_accounts(signers.members()));
        let engine = engine_with(signers, Arc::clone(&ledger) as Arc<dyn RecordLedger>);

        engine.attest(key("khoor")).await;
        assert_eq!(ledger.sign_writes(), 5);

        let second = engine.attest(key("khoor")).await;
        assert!(second
            .entries()
            .iter()
            .all(|entry| entry.status == SignerStatus::AlreadySigned));
        // Idempotent: repeating the pass commits no further writes.
        assert_eq!(ledger.sign_writes(), 5);
    }

    #[tokio::test]
    async fn unauthorized_signer_degrades_without_stopping_the_pass() {
        let signers = SignerSet::dev(5);
        let denied = signers.members()[2];
        let ledger = Arc::new(MemoryLedger::with_accounts(signers.members()));
        ledger.revoke(denied);
        let engine = engine_with(signers, Arc::clone(&ledger) as Arc<dyn RecordLedger>);

        let report = engine.attest(key("khoor")).await;
        assert_eq!(report.signed_count(), 4);
        assert_eq!(report.status_of(denied), Some(SignerStatus::Unauthorized));
        assert!(!report.quorum_complete());

        // Re-authorizing and re-running heals the quorum.
        ledger.authorize(denied);
        let healed = engine.attest(key("khoor")).await;
        assert_eq!(healed.status_of(denied), Some(SignerStatus::SignedNow));
        assert!(healed.quorum_complete());
    }

    #[tokio::test]
    async fn read_failure_funnels_into_signing() {
        let signers = SignerSet::dev(3);
        let faulty = signers.members()[1];
        let ledger = Arc::new(MemoryLedger::with_accounts(signers.members()));
        ledger.inject_read_fault(faulty);
        let engine = engine_with(signers, Arc::clone(&ledger) as Arc<dyn RecordLedger>);

        // The query fails, so the engine signs anyway.
        let report = engine.attest(key("khoor")).await;
        assert_eq!(report.status_of(faulty), Some(SignerStatus::SignedNow));
        assert!(report.quorum_complete());

        // With the fault still in place the next pass cannot read the bit
        // either, but signing stays a no-op on the ledger side.
        let again = engine.attest(key("khoor")).await;
        assert_eq!(again.status_of(faulty), Some(SignerStatus::SignedNow));
        assert_eq!(ledger.sign_writes(), 3);
    }

    /// Ledger whose signature writes never complete.
    struct StalledLedger;

    #[async_trait]
    impl RecordLedger for StalledLedger {
        async fn put_record(&self, _: IndexKey, _: &str) -> LedgerResult<Receipt> {
            unimplemented!("not used by this test")
        }

        async fn get_record(&self, _: IndexKey) -> LedgerResult<String> {
            unimplemented!("not used by this test")
        }

        async fn has_signed(&self, _: IndexKey, _: SignerId) -> LedgerResult<bool> {
            Ok(false)
        }

        async fn sign(&self, _: IndexKey, _: SignerId) -> LedgerResult<Receipt> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn stalled_write_times_out_as_unauthorized() {
        let engine = QuorumEngine::new(
            SignerSet::dev(2),
            QuorumConfig {
                sign_timeout: Duration::from_millis(20),
            },
            Arc::new(StalledLedger),
        );

        let report = engine.attest(key("khoor")).await;
        assert_eq!(report.len(), 2);
        assert!(report
            .entries()
            .iter()
            .all(|entry| entry.status == SignerStatus::Unauthorized));
        assert!(!report.quorum_complete());
    }
}
