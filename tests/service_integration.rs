//! Service Integration Tests for VELUM
//!
//! End-to-end coverage of the core flows against the in-memory ledger:
//! - key derivation symmetry between ingestion and lookup
//! - duplicate and not-found handling
//! - quorum attestation (complete, partial, self-healing, idempotent)
//! - the blob-backed image flow

use std::sync::Arc;

use velum::prelude::*;
use velum::service::IMAGE_METADATA_PAYLOAD;

fn build_service(
    signers: &SignerSet,
) -> (Arc<MemoryLedger>, Arc<MemoryBlobStore>, VelumService) {
    let ledger = Arc::new(MemoryLedger::with_accounts(signers.members()));
    let blobs = Arc::new(MemoryBlobStore::new("velum-images"));
    let service = VelumService::new(
        ServiceConfig::default(),
        signers.clone(),
        Arc::clone(&ledger) as Arc<dyn RecordLedger>,
        Arc::clone(&blobs) as Arc<dyn BlobStore>,
    );
    (ledger, blobs, service)
}

// =============================================================================
// INGESTION AND LOOKUP
// =============================================================================

mod flow_tests {
    use super::*;

    #[tokio::test]
    async fn ingest_stores_obfuscated_text_under_its_digest() {
        let signers = SignerSet::dev(5);
        let (ledger, _, service) = build_service(&signers);

        let outcome = service.ingest_text("hello").await.unwrap();
        assert_eq!(outcome.payload, "khoor");
        assert_eq!(outcome.key, IndexKey::from_text_digest("khoor").unwrap());
        assert_eq!(outcome.key, derive_key("hello", DEFAULT_SHIFT).unwrap());

        // The ledger holds the obfuscated payload, not the raw text.
        assert_eq!(ledger.get_record(outcome.key).await.unwrap(), "khoor");
        assert_eq!(ledger.record_count(), 1);
    }

    #[tokio::test]
    async fn lookup_uses_the_identical_derivation() {
        let signers = SignerSet::dev(5);
        let (_, _, service) = build_service(&signers);

        let ingested = service.ingest_text("hello").await.unwrap();
        let found = service.lookup_text("hello").await.unwrap();

        assert_eq!(found.key, ingested.key);
        assert_eq!(found.pointer, "khoor");
    }

    #[tokio::test]
    async fn reingesting_the_same_text_is_a_duplicate() {
        let signers = SignerSet::dev(5);
        let (ledger, _, service) = build_service(&signers);

        service.ingest_text("hello").await.unwrap();
        let err = service.ingest_text("hello").await.unwrap_err();
        assert!(matches!(err, ServiceError::Duplicate));

        // No second record was written.
        assert_eq!(ledger.record_count(), 1);
    }

    #[tokio::test]
    async fn lookup_of_unknown_text_reports_not_found() {
        let signers = SignerSet::dev(5);
        let (ledger, _, service) = build_service(&signers);

        let err = service.lookup_text("never ingested").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound));

        // A miss drives no signatures.
        assert_eq!(ledger.signature_count(), 0);
    }

    #[tokio::test]
    async fn empty_inputs_are_rejected_before_any_store_interaction() {
        let signers = SignerSet::dev(5);
        let (ledger, _, service) = build_service(&signers);

        assert!(matches!(
            service.ingest_text("").await.unwrap_err(),
            ServiceError::EmptyInput("user data")
        ));
        assert!(matches!(
            service.lookup_text("").await.unwrap_err(),
            ServiceError::EmptyInput("search word")
        ));
        assert!(matches!(
            service.ingest_image(b"").await.unwrap_err(),
            ServiceError::EmptyInput("image data")
        ));
        assert_eq!(ledger.record_count(), 0);
        assert_eq!(ledger.signature_count(), 0);
    }
}

// =============================================================================
// QUORUM ATTESTATION
// =============================================================================

mod attestation_tests {
    use super::*;

    #[tokio::test]
    async fn fresh_ingestion_reaches_full_quorum() {
        let signers = SignerSet::dev(5);
        let (ledger, _, service) = build_service(&signers);

        let outcome = service.ingest_text("hello").await.unwrap();
        let report = &outcome.attestation;

        assert_eq!(report.len(), 5);
        assert!(report.quorum_complete());
        assert!(report
            .entries()
            .iter()
            .all(|entry| entry.status == SignerStatus::SignedNow));
        assert_eq!(ledger.signature_count(), 5);
    }

    #[tokio::test]
    async fn report_preserves_signer_set_order() {
        let signers = SignerSet::new(vec![
            SignerId::dev(4),
            SignerId::dev(1),
            SignerId::dev(3),
        ])
        .unwrap();
        let (_, _, service) = build_service(&signers);

        let outcome = service.ingest_text("hello").await.unwrap();
        let reported: Vec<_> = outcome
            .attestation
            .entries()
            .iter()
            .map(|entry| entry.signer)
            .collect();
        assert_eq!(reported, signers.members());
    }

    #[tokio::test]
    async fn lookup_attestation_is_idempotent() {
        let signers = SignerSet::dev(5);
        let (ledger, _, service) = build_service(&signers);

        service.ingest_text("hello").await.unwrap();
        assert_eq!(ledger.sign_writes(), 5);

        let found = service.lookup_text("hello").await.unwrap();
        assert!(found
            .attestation
            .entries()
            .iter()
            .all(|entry| entry.status == SignerStatus::AlreadySigned));

        // The refresh committed nothing new.
        assert_eq!(ledger.sign_writes(), 5);
        assert_eq!(ledger.signature_count(), 5);
    }

    #[tokio::test]
    async fn one_failing_signer_degrades_without_failing_the_flow() {
        let signers = SignerSet::dev(5);
        let denied = signers.members()[2];
        let (ledger, _, service) = build_service(&signers);
        ledger.revoke(denied);

        let outcome = service.ingest_text("hello").await.unwrap();
        let report = &outcome.attestation;

        assert_eq!(report.len(), 5);
        assert_eq!(report.signed_count(), 4);
        assert_eq!(report.status_of(denied), Some(SignerStatus::Unauthorized));
        assert!(!report.quorum_complete());
    }

    #[tokio::test]
    async fn quorum_heals_once_the_signer_recovers() {
        let signers = SignerSet::dev(5);
        let denied = signers.members()[2];
        let (ledger, _, service) = build_service(&signers);
        ledger.revoke(denied);

        service.ingest_text("hello").await.unwrap();
        ledger.authorize(denied);

        let found = service.lookup_text("hello").await.unwrap();
        assert_eq!(found.attestation.status_of(denied), Some(SignerStatus::SignedNow));
        assert!(found.attestation.quorum_complete());
        assert_eq!(ledger.signature_count(), 5);
    }

    #[tokio::test]
    async fn signature_read_failure_funnels_into_signing() {
        let signers = SignerSet::dev(5);
        let faulty = signers.members()[0];
        let (ledger, _, service) = build_service(&signers);
        ledger.inject_read_fault(faulty);

        let outcome = service.ingest_text("hello").await.unwrap();
        assert_eq!(
            outcome.attestation.status_of(faulty),
            Some(SignerStatus::SignedNow)
        );
        assert!(outcome.attestation.quorum_complete());
    }
}

// =============================================================================
// IMAGE FLOW
// =============================================================================

mod image_tests {
    use super::*;
    use sha2::{Digest, Sha256};

    #[tokio::test]
    async fn image_is_stored_off_chain_under_a_content_derived_name() {
        let signers = SignerSet::dev(5);
        let (ledger, blobs, service) = build_service(&signers);
        let bytes = b"jpeg bytes".to_vec();

        let outcome = service.ingest_image(&bytes).await.unwrap();

        let digest_prefix = &hex::encode(Sha256::digest(&bytes))[..10];
        assert_eq!(outcome.object_name, format!("image_{digest_prefix}.jpg"));
        assert_eq!(
            outcome.object_uri,
            format!("mem://velum-images/{}", outcome.object_name)
        );
        assert_eq!(blobs.get(&outcome.object_name).unwrap(), bytes);

        // The ledger key is the digest of the URI, and the record carries
        // only the off-chain marker.
        assert_eq!(
            outcome.key,
            IndexKey::from_text_digest(&outcome.object_uri).unwrap()
        );
        assert_eq!(
            ledger.get_record(outcome.key).await.unwrap(),
            IMAGE_METADATA_PAYLOAD
        );
    }

    #[tokio::test]
    async fn reingesting_the_same_image_is_a_duplicate() {
        let signers = SignerSet::dev(5);
        let (ledger, _, service) = build_service(&signers);

        service.ingest_image(b"jpeg bytes").await.unwrap();
        let err = service.ingest_image(b"jpeg bytes").await.unwrap_err();
        assert!(matches!(err, ServiceError::Duplicate));
        assert_eq!(ledger.record_count(), 1);
    }
}
