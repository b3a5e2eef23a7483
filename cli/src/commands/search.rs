//! Search Command - Look up a record via a running service

use clap::Args;
use serde_json::json;

use velum_rpc::SearchTextResponse;

use crate::client;

/// Search the ledger for previously stored text
#[derive(Args)]
pub struct SearchCommand {
    /// Query text (must match the ingested text exactly)
    #[arg(short, long)]
    word: String,

    /// RPC endpoint to use
    #[arg(short, long, default_value = "http://127.0.0.1:8650")]
    rpc: String,
}

impl SearchCommand {
    pub async fn execute(self) -> anyhow::Result<()> {
        let response: SearchTextResponse =
            client::call(&self.rpc, "velum_searchText", json!([self.word])).await?;

        println!("{}", response.message);
        if let Some(key) = response.key {
            println!("Key:     {key}");
        }
        if let Some(pointer) = response.pointer {
            println!("Pointer: {pointer}");
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
