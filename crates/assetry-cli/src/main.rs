//! Assetry CLI
//!
//! Browse dropdown options, resolve identifiers, and fetch master records
//! from the command line.

#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use assetry_cli::Cli;

const DEFAULT_FILTER: &str = "info,assetry=debug";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = assetry_cli::run(cli).await {
        if e.is_retryable() {
            tracing::warn!("{e} (the request may succeed if retried)");
        }
        return Err(e.into());
    }
    Ok(())
}
