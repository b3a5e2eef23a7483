//! RPC Error Types

use jsonrpsee::types::ErrorObjectOwned;
use thiserror::Error;
use velum::ServiceError;

/// RPC error codes following JSON-RPC 2.0 plus custom VELUM codes.
#[derive(Debug, Clone, Copy)]
pub enum RpcErrorCode {
    // Standard JSON-RPC errors
    InvalidParams = -32602,
    InternalError = -32603,

    // VELUM custom errors (-32000 to -32099)
    StoreFailed = -32000,
    SearchFailed = -32001,
    BlobStoreFailed = -32002,
}

impl RpcErrorCode {
    pub fn code(self) -> i32 {
        self as i32
    }
}

/// RPC errors.
#[derive(Debug, Error)]
pub enum RpcError {
    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Store failed: {0}")]
    StoreFailed(String),

    #[error("Search failed: {0}")]
    SearchFailed(String),

    #[error("Blob store failed: {0}")]
    BlobStoreFailed(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Server error: {0}")]
    ServerError(String),
}

impl RpcError {
    /// Map a hard service failure during a store flow.
    ///
    /// Soft outcomes (`Duplicate`, `NotFound`) are handled before this
    /// point; seeing one here is an internal inconsistency.
    pub fn from_store_failure(err: ServiceError) -> Self {
        match err {
            ServiceError::EmptyInput(field) => Self::InvalidParams(format!("missing {field}")),
            ServiceError::Blob(msg) => Self::BlobStoreFailed(msg),
            other => Self::StoreFailed(other.to_string()),
        }
    }

    /// Map a hard service failure during a search flow.
    pub fn from_search_failure(err: ServiceError) -> Self {
        match err {
            ServiceError::EmptyInput(field) => Self::InvalidParams(format!("missing {field}")),
            other => Self::SearchFailed(other.to_string()),
        }
    }
}

impl From<RpcError> for ErrorObjectOwned {
    fn from(err: RpcError) -> Self {
        let (code, message) = match &err {
            RpcError::InvalidParams(msg) => (RpcErrorCode::InvalidParams.code(), msg.clone()),
            RpcError::StoreFailed(msg) => (RpcErrorCode::StoreFailed.code(), msg.clone()),
            RpcError::SearchFailed(msg) => (RpcErrorCode::SearchFailed.code(), msg.clone()),
            RpcError::BlobStoreFailed(msg) => (RpcErrorCode::BlobStoreFailed.code(), msg.clone()),
            RpcError::InternalError(msg) => (RpcErrorCode::InternalError.code(), msg.clone()),
            RpcError::ServerError(msg) => (RpcErrorCode::InternalError.code(), msg.clone()),
        };

        ErrorObjectOwned::owned(code, message, None::<()>)
    }
}
