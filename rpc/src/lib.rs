//! VELUM JSON-RPC Server
//!
//! Exposes the ingestion and lookup flows over JSON-RPC in the `velum`
//! namespace.
//!
//! # Supported Methods
//!
//! - `velum_storeText` - Obfuscate and store text, then drive the quorum
//! - `velum_searchText` - Derive the key for a query and fetch its record
//! - `velum_storeImage` - Store image bytes off-chain, record the URI digest
//! - `velum_nodeInfo` - Service version, network, and signer set
//!
//! Duplicate and not-found outcomes come back as success-shaped responses
//! whose `message` says so; only unexpected store, blob, or input failures
//! map to JSON-RPC error objects.

pub mod errors;
pub mod methods;
pub mod server;
pub mod types;

pub use errors::{RpcError, RpcErrorCode};
pub use methods::VelumApiServer;
pub use server::{RpcConfig, RpcServer};
pub use types::*;

/// RPC API version.
pub const RPC_VERSION: &str = "1.0.0";

/// Default RPC port.
pub const DEFAULT_RPC_PORT: u16 = 8650;
