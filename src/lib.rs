//! VELUM: Quorum-Attested Searchable Ledger
//!
//! Text records are obfuscated with a fixed-shift cipher, indexed under the
//! SHA-256 digest of the obfuscated text, stored on an external record
//! ledger, and attested by a fixed set of signer accounts. Lookups derive
//! the same key from the query text and re-drive the signature quorum, so
//! attestation is self-healing under repeated access.
//!
//! ## Crate Organization
//!
//! - `velum-cipher`: shift-cipher obfuscation and index key derivation
//! - `velum-ledger`: record ledger and blob store interfaces plus the
//!   in-memory implementations behind local development mode
//! - `velum-attest`: the quorum attestation engine
//! - `velum` (this crate): the service tying derivation, storage, and
//!   attestation into the ingestion and lookup flows
//! - `velum-rpc`: JSON-RPC surface
//! - `velum-cli`: node binary (init / serve / status / store / search)

pub mod service;

pub use service::{
    ImageStored, ServiceConfig, ServiceError, TextFound, TextIngested, VelumService,
};

// Re-export component crates for integration tests and downstream use.
pub use velum_attest as attest;
pub use velum_cipher as cipher;
pub use velum_ledger as ledger;

/// VELUM protocol version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::service::{ServiceConfig, ServiceError, VelumService};
    pub use velum_attest::{AttestationReport, QuorumConfig, QuorumEngine, SignerSet, SignerStatus};
    pub use velum_cipher::{derive_key, obfuscate, IndexKey, DEFAULT_SHIFT};
    pub use velum_ledger::{
        BlobStore, LedgerError, MemoryBlobStore, MemoryLedger, RecordLedger, SignerId,
    };
}
