//! Insights Bridge CLI
//!
//! Command-line interface for the Insights query proxy and data connector.

use clap::Parser;
use insights_cli::{Cli, Commands};
use insights_core::InsightsError;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(if e.is_client_error() { 2 } else { 1 });
    }
}

async fn run() -> Result<(), InsightsError> {
    // Load .env before clap reads its env fallbacks (ignores errors)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    // Execute command
    match cli.command {
        Commands::Serve(cmd) => {
            cmd.execute().await?;
        }
        Commands::Schema(cmd) => {
            cmd.execute().await?;
        }
        Commands::Fetch(cmd) => {
            cmd.execute().await?;
        }
    }

    Ok(())
}
