//! Ledger errors.

use thiserror::Error;
use velum_cipher::IndexKey;

use crate::account::SignerId;

/// Ledger result type.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Errors from record ledger and blob store operations.
///
/// `DuplicateKey` and `NotFound` are business outcomes callers are expected
/// to match on; `Communication` covers transport and ledger-node failures
/// and is the only variant flows treat as fatal.
#[derive(Debug, Clone, Error)]
pub enum LedgerError {
    /// A record already exists under this key.
    #[error("record already exists for key {0}")]
    DuplicateKey(IndexKey),

    /// No record is stored under this key.
    #[error("no record found for key {0}")]
    NotFound(IndexKey),

    /// The account is not authorized to sign on this ledger.
    #[error("account {0} is not authorized to sign")]
    NotAuthorized(SignerId),

    /// Transport or ledger-node failure.
    #[error("ledger communication failed: {0}")]
    Communication(String),
}
