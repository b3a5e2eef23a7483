//! VELUM Ledger Interfaces
//!
//! Abstracts the two external stores the service talks to:
//!
//! - the **record ledger**, which durably holds `(key -> payload)` records
//!   and a per-key signature bitmap, addressed by 256-bit [`IndexKey`]s;
//! - the **blob store**, which holds large payloads off-chain and hands
//!   back a URI.
//!
//! The durable implementations live outside this repository (a contract
//! ledger, an object store). This crate carries the traits plus in-memory
//! implementations used by local development mode and tests.

pub mod account;
mod error;
pub mod memory;

pub use account::{ParseSignerIdError, SignerId};
pub use error::{LedgerError, LedgerResult};
pub use memory::{MemoryBlobStore, MemoryLedger};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use velum_cipher::IndexKey;

/// Receipt for a committed ledger write.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt(pub [u8; 32]);

impl Receipt {
    /// Receipt hash over the write's identifying fields and a sequence
    /// number.
    pub fn compute(tag: &str, parts: &[&[u8]], seq: u64) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(tag.as_bytes());
        for part in parts {
            hasher.update(part);
        }
        hasher.update(seq.to_be_bytes());
        Self(hasher.finalize().into())
    }

    /// Lowercase `0x`-prefixed hex encoding.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

/// Interface to the record ledger.
///
/// Implementations must make `sign` an atomic check-then-write per
/// `(key, signer)` and idempotent: signing an already-signed key commits
/// nothing new. Concurrent attestation passes over the same key rely on
/// this to never produce duplicate signature entries.
#[async_trait]
pub trait RecordLedger: Send + Sync {
    /// Store a new record under `key`.
    ///
    /// Fails with [`LedgerError::DuplicateKey`] when the key is already
    /// taken; the existing record is left untouched.
    async fn put_record(&self, key: IndexKey, payload: &str) -> LedgerResult<Receipt>;

    /// Fetch the payload stored under `key`, or [`LedgerError::NotFound`].
    async fn get_record(&self, key: IndexKey) -> LedgerResult<String>;

    /// Whether `signer` has a recorded signature for `key`.
    async fn has_signed(&self, key: IndexKey, signer: SignerId) -> LedgerResult<bool>;

    /// Record a signature from `signer` against `key`, waiting for the
    /// write to commit durably before returning.
    async fn sign(&self, key: IndexKey, signer: SignerId) -> LedgerResult<Receipt>;
}

/// Interface to the off-chain blob store.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store an object under `name` and return the URI it is reachable at.
    async fn put_object(&self, name: &str, bytes: &[u8]) -> LedgerResult<String>;
}
