//! Store Command - Store text on the ledger via a running service

use clap::Args;
use serde_json::json;

use velum_rpc::StoreTextResponse;

use crate::client;

/// Store text on the ledger
#[derive(Args)]
pub struct StoreCommand {
    /// Text to obfuscate and store
    #[arg(short, long)]
    text: String,

    /// RPC endpoint to use
    #[arg(short, long, default_value = "http://127.0.0.1:8650")]
    rpc: String,
}

impl StoreCommand {
    pub async fn execute(self) -> anyhow::Result<()> {
        let response: StoreTextResponse =
            client::call(&self.rpc, "velum_storeText", json!([self.text])).await?;

        println!("{}", response.message);
        if let Some(key) = response.key {
            println!("Key: {key}");
        }
        if let Some(attestation) = response.attestation {
            println!();
            for entry in &attestation.signers {
                println!("  {}: {}", entry.signer, entry.status);
            }
            println!(
                "Quorum: {}",
                if attestation.quorum_complete {
                    "complete"
                } else {
                    "incomplete"
                }
            );
        }
        Ok(())
    }
}
