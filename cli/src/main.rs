//! VELUM CLI
//!
//! Command-line interface for running and querying the VELUM service.
//!
//! # Usage
//!
//! ```bash
//! # Write a default configuration file
//! velum init
//!
//! # Start the service with the in-memory development ledger
//! velum serve
//!
//! # Query a running service
//! velum status
//! velum store --text "hello"
//! velum search --word "hello"
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod client;
mod commands;
mod config;
mod logging;

use commands::{InitCommand, SearchCommand, ServeCommand, StatusCommand, StoreCommand};

/// VELUM Quorum-Attested Searchable Ledger
#[derive(Parser)]
#[command(name = "velum")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Quorum-Attested Searchable Ledger Service", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, env = "VELUM_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init(InitCommand),

    /// Run the service
    Serve(ServeCommand),

    /// Show service status
    Status(StatusCommand),

    /// Store text on the ledger via a running service
    Store(StoreCommand),

    /// Search the ledger via a running service
    Search(SearchCommand),

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init(&cli.log_level, cli.json_logs)?;

    match cli.command {
        Commands::Init(cmd) => cmd.execute(cli.config).await,
        Commands::Serve(cmd) => cmd.execute(cli.config).await,
        Commands::Status(cmd) => cmd.execute().await,
        Commands::Store(cmd) => cmd.execute().await,
        Commands::Search(cmd) => cmd.execute().await,
        Commands::Version => {
            println!("velum {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
