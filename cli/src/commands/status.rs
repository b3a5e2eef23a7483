//! Status Command - Show service status

use clap::Args;
use serde_json::json;

use velum_rpc::NodeInfo;

use crate::client;

/// Show service status
#[derive(Args)]
pub struct StatusCommand {
    /// RPC endpoint to query
    #[arg(short, long, default_value = "http://127.0.0.1:8650")]
    rpc: String,
}

impl StatusCommand {
    pub async fn execute(self) -> anyhow::Result<()> {
        println!("Querying service at {}...", self.rpc);
        println!();

        match client::call::<NodeInfo>(&self.rpc, "velum_nodeInfo", json!([])).await {
            Ok(info) => {
                println!("Service is running");
                println!();
                println!("Version:      {}", info.version);
                println!("RPC version:  {}", info.rpc_version);
                println!("Network:      {}", info.network);
                println!("Cipher shift: {}", info.shift);
                println!("Signers:      {}", info.signers.len());
                for signer in &info.signers {
                    println!("  {signer}");
                }
            }
            Err(e) => {
                println!("Could not reach the service");
                println!();
                println!("Error: {e}");
                println!();
                println!("Is it running? Start it with:");
                println!("  velum serve");
            }
        }

        Ok(())
    }
}
