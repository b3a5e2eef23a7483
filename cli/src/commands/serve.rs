//! Serve Command - Run the service

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use tracing::info;

use velum::ledger::{MemoryBlobStore, MemoryLedger};
use velum::VelumService;
use velum_rpc::RpcServer;

use crate::config::load_or_default;

/// Run the service with the in-memory development ledger
#[derive(Args)]
pub struct ServeCommand {}

impl ServeCommand {
    pub async fn execute(self, config_path: Option<PathBuf>) -> anyhow::Result<()> {
        let config = load_or_default(config_path)?;
        config.validate()?;

        let signers = config.signer_set()?;
        info!(
            signers = signers.len(),
            shift = config.cipher.shift,
            network = %config.node.network,
            "starting VELUM service"
        );

        // Development mode: the record ledger and blob store live in
        // process. A deployment against a durable ledger swaps these for
        // adapters speaking to the external systems.
        let ledger = Arc::new(MemoryLedger::with_accounts(signers.members()));
        let blobs = Arc::new(MemoryBlobStore::new(config.node.blob_bucket.clone()));

        let service = Arc::new(VelumService::new(
            config.service_config(),
            signers,
            ledger,
            blobs,
        ));

        let mut server = RpcServer::new(config.rpc_config()?, service);
        server.start().await?;
        info!(addr = %server.addr(), "RPC server listening");

        tokio::signal::ctrl_c().await?;
        info!("shutting down");
        server.stop().await?;
        Ok(())
    }
}
