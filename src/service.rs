//! Record ingestion and lookup flows.
//!
//! `VelumService` ties the three core pieces together: key derivation
//! (pure), the record ledger (network-bound), and quorum attestation.
//! Each flow is logically sequential: derive the key, perform one store
//! round trip, then drive up to one signature per configured signer.

use std::sync::Arc;

use serde::Serialize;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{debug, info};

use velum_attest::{AttestationReport, QuorumConfig, QuorumEngine, SignerSet};
use velum_cipher::{obfuscate, IndexKey, KeyError};
use velum_ledger::{BlobStore, LedgerError, Receipt, RecordLedger};

/// Payload stored on-chain for records whose content lives in the blob
/// store. The record itself only proves existence; the URI-derived key is
/// what links it to the object.
pub const IMAGE_METADATA_PAYLOAD: &str = "image metadata (stored off-chain)";

/// Length of the digest prefix used in blob object names.
const OBJECT_NAME_DIGEST_LEN: usize = 10;

/// Errors from the ingestion and lookup flows.
///
/// `Duplicate` and `NotFound` are soft outcomes the surface layer reports
/// as messages; the remaining variants are hard failures.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request carried no usable input.
    #[error("missing {0}")]
    EmptyInput(&'static str),

    /// A record with the same derived key already exists.
    #[error("record already exists")]
    Duplicate,

    /// No record is stored under the derived key.
    #[error("record not found")]
    NotFound,

    /// Key derivation failed.
    #[error(transparent)]
    Key(#[from] KeyError),

    /// Record ledger interaction failed.
    #[error("ledger error: {0}")]
    Ledger(LedgerError),

    /// Blob store interaction failed.
    #[error("blob store error: {0}")]
    Blob(String),
}

/// Service configuration, fixed at startup and shared read-only.
#[derive(Clone, Debug)]
pub struct ServiceConfig {
    /// Cipher shift applied before hashing and storage. Lookups only match
    /// records ingested with the same shift.
    pub shift: u8,
    /// Attestation settings.
    pub quorum: QuorumConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            shift: velum_cipher::DEFAULT_SHIFT,
            quorum: QuorumConfig::default(),
        }
    }
}

/// Outcome of a text ingestion.
#[derive(Clone, Debug, Serialize)]
pub struct TextIngested {
    pub key: IndexKey,
    /// The obfuscated text as stored on the ledger.
    pub payload: String,
    pub receipt: Receipt,
    pub attestation: AttestationReport,
}

/// Outcome of a text lookup.
#[derive(Clone, Debug, Serialize)]
pub struct TextFound {
    pub key: IndexKey,
    /// The stored payload the key points at.
    pub pointer: String,
    pub attestation: AttestationReport,
}

/// Outcome of an image ingestion.
#[derive(Clone, Debug, Serialize)]
pub struct ImageStored {
    pub key: IndexKey,
    pub object_name: String,
    pub object_uri: String,
    pub receipt: Receipt,
}

/// The VELUM service: ingestion and lookup over ledger and blob store.
pub struct VelumService {
    config: ServiceConfig,
    ledger: Arc<dyn RecordLedger>,
    blobs: Arc<dyn BlobStore>,
    engine: QuorumEngine,
}

impl VelumService {
    pub fn new(
        config: ServiceConfig,
        signers: SignerSet,
        ledger: Arc<dyn RecordLedger>,
        blobs: Arc<dyn BlobStore>,
    ) -> Self {
        let engine = QuorumEngine::new(signers, config.quorum.clone(), Arc::clone(&ledger));
        Self {
            config,
            ledger,
            blobs,
            engine,
        }
    }

    /// The configured signer set.
    pub fn signers(&self) -> &SignerSet {
        self.engine.signers()
    }

    /// The configured cipher shift.
    pub fn shift(&self) -> u8 {
        self.config.shift
    }

    /// Ingest raw text: obfuscate, store under the derived key, attest.
    ///
    /// A key collision means the same obfuscated text was stored before;
    /// the flow stops there without touching signatures. Partial quorum on
    /// a fresh record is reported, not treated as failure.
    pub async fn ingest_text(&self, raw: &str) -> Result<TextIngested, ServiceError> {
        if raw.is_empty() {
            return Err(ServiceError::EmptyInput("user data"));
        }

        let payload = obfuscate(raw, self.config.shift);
        let key = IndexKey::from_text_digest(&payload)?;
        debug!(key = %key, "derived ingestion key");

        let receipt = match self.ledger.put_record(key, &payload).await {
            Ok(receipt) => receipt,
            Err(LedgerError::DuplicateKey(_)) => {
                info!(key = %key, "record already present, skipping store");
                return Err(ServiceError::Duplicate);
            }
            Err(err) => return Err(ServiceError::Ledger(err)),
        };
        info!(key = %key, receipt = %receipt.to_hex(), "record stored on ledger");

        let attestation = self.engine.attest(key).await;
        Ok(TextIngested {
            key,
            payload,
            receipt,
            attestation,
        })
    }

    /// Look up raw query text: derive the identical key, fetch the stored
    /// pointer, and refresh the signature quorum for it.
    pub async fn lookup_text(&self, raw: &str) -> Result<TextFound, ServiceError> {
        if raw.is_empty() {
            return Err(ServiceError::EmptyInput("search word"));
        }

        let key = IndexKey::from_text_digest(&obfuscate(raw, self.config.shift))?;
        debug!(key = %key, "derived lookup key");

        let pointer = match self.ledger.get_record(key).await {
            Ok(pointer) => pointer,
            Err(LedgerError::NotFound(_)) => {
                info!(key = %key, "no record under key");
                return Err(ServiceError::NotFound);
            }
            Err(err) => return Err(ServiceError::Ledger(err)),
        };

        let attestation = self.engine.attest(key).await;
        Ok(TextFound {
            key,
            pointer,
            attestation,
        })
    }

    /// Ingest an image: upload the bytes to the blob store under a
    /// content-derived name, then record the URI's digest on the ledger
    /// with a fixed marker payload.
    ///
    /// The URI is already opaque, so no cipher step is applied to it. The
    /// record carries no attestation pass of its own; a later lookup of
    /// the URI drives the quorum like any other key.
    pub async fn ingest_image(&self, bytes: &[u8]) -> Result<ImageStored, ServiceError> {
        if bytes.is_empty() {
            return Err(ServiceError::EmptyInput("image data"));
        }

        let digest = hex::encode(Sha256::digest(bytes));
        let object_name = format!("image_{}.jpg", &digest[..OBJECT_NAME_DIGEST_LEN]);
        let object_uri = self
            .blobs
            .put_object(&object_name, bytes)
            .await
            .map_err(|err| ServiceError::Blob(err.to_string()))?;
        info!(object = %object_name, uri = %object_uri, "image uploaded to blob store");

        let key = IndexKey::from_text_digest(&object_uri)?;
        let receipt = match self.ledger.put_record(key, IMAGE_METADATA_PAYLOAD).await {
            Ok(receipt) => receipt,
            Err(LedgerError::DuplicateKey(_)) => {
                info!(key = %key, "image metadata already recorded");
                return Err(ServiceError::Duplicate);
            }
            Err(err) => return Err(ServiceError::Ledger(err)),
        };
        info!(key = %key, "image metadata recorded on ledger");

        Ok(ImageStored {
            key,
            object_name,
            object_uri,
            receipt,
        })
    }
}
