//! Init Command - Write a default configuration file

use std::path::PathBuf;

use clap::Args;

use crate::config::{default_config_path, VelumConfig};

/// Write a default configuration file
#[derive(Args)]
pub struct InitCommand {
    /// Overwrite an existing file
    #[arg(long)]
    force: bool,
}

impl InitCommand {
    pub async fn execute(self, config_path: Option<PathBuf>) -> anyhow::Result<()> {
        let path = config_path.unwrap_or_else(default_config_path);

        if path.exists() && !self.force {
            anyhow::bail!(
                "{} already exists (use --force to overwrite)",
                path.display()
            );
        }

        let config = VelumConfig::local();
        config.save(&path)?;

        println!("Wrote configuration to {}", path.display());
        println!("Signers: {}", config.signers.accounts.len());
        println!("Cipher shift: {}", config.cipher.shift);
        println!("RPC address: {}", config.rpc.http_addr);
        Ok(())
    }
}
