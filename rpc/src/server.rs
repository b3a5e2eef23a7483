//! RPC Server Implementation

use std::net::SocketAddr;
use std::sync::Arc;

use base64::Engine as _;
use jsonrpsee::core::{async_trait, RpcResult};
use jsonrpsee::server::{Server, ServerHandle};
use tracing::{error, info};

use velum::{ServiceError, VelumService};

use crate::errors::RpcError;
use crate::methods::VelumApiServer;
use crate::types::{
    AttestationSummary, NodeInfo, SearchTextResponse, StoreImageResponse, StoreTextResponse,
};
use crate::RPC_VERSION;

/// RPC server configuration.
#[derive(Debug, Clone)]
pub struct RpcConfig {
    /// HTTP bind address
    pub http_addr: SocketAddr,
    /// Maximum request size in bytes
    pub max_request_size: u32,
    /// Maximum response size in bytes
    pub max_response_size: u32,
    /// Maximum concurrent connections
    pub max_connections: u32,
    /// Network name
    pub network: String,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            http_addr: format!("127.0.0.1:{}", crate::DEFAULT_RPC_PORT)
                .parse()
                .expect("default RPC address is well-formed"),
            max_request_size: 10 * 1024 * 1024, // room for base64 image payloads
            max_response_size: 2 * 1024 * 1024,
            max_connections: 100,
            network: "local".to_string(),
        }
    }
}

impl RpcConfig {
    /// Config for local development.
    pub fn local() -> Self {
        Self::default()
    }
}

/// The RPC server.
pub struct RpcServer {
    config: RpcConfig,
    service: Arc<VelumService>,
    handle: Option<ServerHandle>,
}

impl RpcServer {
    pub fn new(config: RpcConfig, service: Arc<VelumService>) -> Self {
        Self {
            config,
            service,
            handle: None,
        }
    }

    /// Start the HTTP RPC server.
    pub async fn start(&mut self) -> Result<(), RpcError> {
        let server = Server::builder()
            .max_request_body_size(self.config.max_request_size)
            .max_response_body_size(self.config.max_response_size)
            .max_connections(self.config.max_connections)
            .build(self.config.http_addr)
            .await
            .map_err(|e| RpcError::ServerError(e.to_string()))?;

        let handler = RpcHandler {
            service: Arc::clone(&self.service),
            config: self.config.clone(),
        };

        info!("Starting RPC server on {}", self.config.http_addr);

        let handle = server.start(handler.into_rpc());
        self.handle = Some(handle);

        Ok(())
    }

    /// Stop the RPC server.
    pub async fn stop(&mut self) -> Result<(), RpcError> {
        if let Some(handle) = self.handle.take() {
            info!("Stopping RPC server");
            handle
                .stop()
                .map_err(|e| RpcError::ServerError(format!("{e:?}")))?;
            handle.stopped().await;
        }
        Ok(())
    }

    /// The configured bind address.
    pub fn addr(&self) -> SocketAddr {
        self.config.http_addr
    }
}

/// Handler implementing the RPC trait over the service.
pub struct RpcHandler {
    pub service: Arc<VelumService>,
    pub config: RpcConfig,
}

#[async_trait]
impl VelumApiServer for RpcHandler {
    async fn store_text(&self, text: String) -> RpcResult<StoreTextResponse> {
        match self.service.ingest_text(&text).await {
            Ok(outcome) => Ok(StoreTextResponse {
                message: "Data stored on-chain.".to_string(),
                key: Some(outcome.key),
                attestation: Some(AttestationSummary::from(&outcome.attestation)),
            }),
            Err(ServiceError::Duplicate) => Ok(StoreTextResponse {
                message: "Data already exists.".to_string(),
                key: None,
                attestation: None,
            }),
            Err(err) => {
                error!(error = %err, "storeText failed");
                Err(RpcError::from_store_failure(err).into())
            }
        }
    }

    async fn search_text(&self, query: String) -> RpcResult<SearchTextResponse> {
        match self.service.lookup_text(&query).await {
            Ok(outcome) => Ok(SearchTextResponse {
                message: "Data found on-chain.".to_string(),
                key: Some(outcome.key),
                pointer: Some(outcome.pointer),
                attestation: Some(AttestationSummary::from(&outcome.attestation)),
            }),
            Err(ServiceError::NotFound) => Ok(SearchTextResponse {
                message: "Data not found.".to_string(),
                key: None,
                pointer: None,
                attestation: None,
            }),
            Err(err) => {
                error!(error = %err, "searchText failed");
                Err(RpcError::from_search_failure(err).into())
            }
        }
    }

    async fn store_image(&self, data: String) -> RpcResult<StoreImageResponse> {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(data.as_bytes())
            .map_err(|e| RpcError::InvalidParams(format!("invalid base64 image data: {e}")))?;

        match self.service.ingest_image(&bytes).await {
            Ok(outcome) => Ok(StoreImageResponse {
                message: "Image stored off-chain.".to_string(),
                object_uri: Some(outcome.object_uri),
                key: Some(outcome.key),
            }),
            Err(ServiceError::Duplicate) => Ok(StoreImageResponse {
                message: "Image already exists.".to_string(),
                object_uri: None,
                key: None,
            }),
            Err(err) => {
                error!(error = %err, "storeImage failed");
                Err(RpcError::from_store_failure(err).into())
            }
        }
    }

    async fn node_info(&self) -> RpcResult<NodeInfo> {
        Ok(NodeInfo {
            version: velum::VERSION.to_string(),
            rpc_version: RPC_VERSION.to_string(),
            network: self.config.network.clone(),
            signers: self
                .service
                .signers()
                .iter()
                .map(|signer| signer.to_hex())
                .collect(),
            shift: self.service.shift(),
        })
    }
}
