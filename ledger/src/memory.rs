//! In-memory ledger and blob store.
//!
//! Backs local development mode and tests. The signature path mirrors the
//! contract the durable ledger must provide: `sign` is an atomic
//! check-then-write under a single lock, and re-signing an already-signed
//! key commits nothing new.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use parking_lot::RwLock;
use velum_cipher::IndexKey;

use crate::account::SignerId;
use crate::error::{LedgerError, LedgerResult};
use crate::{BlobStore, Receipt, RecordLedger};

#[derive(Default)]
struct LedgerState {
    records: HashMap<IndexKey, String>,
    signatures: HashSet<(IndexKey, SignerId)>,
    authorized: HashSet<SignerId>,
    read_faults: HashSet<SignerId>,
    sign_writes: u64,
    seq: u64,
}

/// In-memory record ledger.
pub struct MemoryLedger {
    state: RwLock<LedgerState>,
}

impl MemoryLedger {
    /// Empty ledger with no authorized accounts.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(LedgerState::default()),
        }
    }

    /// Ledger with the given accounts authorized to sign.
    pub fn with_accounts(accounts: &[SignerId]) -> Self {
        let ledger = Self::new();
        ledger.state.write().authorized.extend(accounts.iter().copied());
        ledger
    }

    /// Authorize an account to sign.
    pub fn authorize(&self, signer: SignerId) {
        self.state.write().authorized.insert(signer);
    }

    /// Withdraw an account's signing authorization.
    pub fn revoke(&self, signer: SignerId) {
        self.state.write().authorized.remove(&signer);
    }

    /// Make signature queries for `signer` fail until cleared. Lets tests
    /// exercise the read-failure path without a real transport.
    pub fn inject_read_fault(&self, signer: SignerId) {
        self.state.write().read_faults.insert(signer);
    }

    /// Clear an injected read fault.
    pub fn clear_read_fault(&self, signer: SignerId) {
        self.state.write().read_faults.remove(&signer);
    }

    /// Number of stored records.
    pub fn record_count(&self) -> usize {
        self.state.read().records.len()
    }

    /// Number of recorded `(key, signer)` signatures.
    pub fn signature_count(&self) -> usize {
        self.state.read().signatures.len()
    }

    /// Number of signature writes actually committed. Stays flat across
    /// repeated attestation of an already-signed key.
    pub fn sign_writes(&self) -> u64 {
        self.state.read().sign_writes
    }
}

impl Default for MemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordLedger for MemoryLedger {
    async fn put_record(&self, key: IndexKey, payload: &str) -> LedgerResult<Receipt> {
        let mut state = self.state.write();
        if state.records.contains_key(&key) {
            return Err(LedgerError::DuplicateKey(key));
        }
        state.records.insert(key, payload.to_string());
        state.seq += 1;
        Ok(Receipt::compute(
            "record",
            &[key.as_bytes(), payload.as_bytes()],
            state.seq,
        ))
    }

    async fn get_record(&self, key: IndexKey) -> LedgerResult<String> {
        self.state
            .read()
            .records
            .get(&key)
            .cloned()
            .ok_or(LedgerError::NotFound(key))
    }

    async fn has_signed(&self, key: IndexKey, signer: SignerId) -> LedgerResult<bool> {
        let state = self.state.read();
        if state.read_faults.contains(&signer) {
            return Err(LedgerError::Communication(format!(
                "signature query for {signer} failed"
            )));
        }
        Ok(state.signatures.contains(&(key, signer)))
    }

    async fn sign(&self, key: IndexKey, signer: SignerId) -> LedgerResult<Receipt> {
        let mut state = self.state.write();
        if !state.authorized.contains(&signer) {
            return Err(LedgerError::NotAuthorized(signer));
        }
        // Atomic check-then-write: the lock spans both, and an existing
        // signature commits nothing new.
        if state.signatures.insert((key, signer)) {
            state.sign_writes += 1;
        }
        state.seq += 1;
        Ok(Receipt::compute(
            "signature",
            &[key.as_bytes(), signer.as_bytes()],
            state.seq,
        ))
    }
}

/// In-memory blob store with `mem://` URIs.
pub struct MemoryBlobStore {
    bucket: String,
    objects: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryBlobStore {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            objects: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored objects.
    pub fn object_count(&self) -> usize {
        self.objects.read().len()
    }

    /// Fetch a stored object's bytes.
    pub fn get(&self, name: &str) -> Option<Vec<u8>> {
        self.objects.read().get(name).cloned()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put_object(&self, name: &str, bytes: &[u8]) -> LedgerResult<String> {
        self.objects.write().insert(name.to_string(), bytes.to_vec());
        Ok(format!("mem://{}/{}", self.bucket, name))
    }
}
