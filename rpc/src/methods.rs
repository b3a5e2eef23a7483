//! RPC Method Definitions
//!
//! Defines the JSON-RPC API using jsonrpsee macros.

use jsonrpsee::core::RpcResult;
use jsonrpsee::proc_macros::rpc;

use crate::types::{NodeInfo, SearchTextResponse, StoreImageResponse, StoreTextResponse};

/// VELUM RPC API trait
///
/// All methods are prefixed with the `velum_` namespace.
#[rpc(server, namespace = "velum")]
pub trait VelumApi {
    /// Obfuscate and store text on the ledger, then drive the signature
    /// quorum for the derived key.
    #[method(name = "storeText")]
    async fn store_text(&self, text: String) -> RpcResult<StoreTextResponse>;

    /// Derive the key for a query, fetch its record, and refresh the
    /// signature quorum.
    #[method(name = "searchText")]
    async fn search_text(&self, query: String) -> RpcResult<SearchTextResponse>;

    /// Store base64-encoded image bytes off-chain and record the object
    /// URI's digest on the ledger.
    #[method(name = "storeImage")]
    async fn store_image(&self, data: String) -> RpcResult<StoreImageResponse>;

    /// Service version, network, and signer configuration.
    #[method(name = "nodeInfo")]
    async fn node_info(&self) -> RpcResult<NodeInfo>;
}
