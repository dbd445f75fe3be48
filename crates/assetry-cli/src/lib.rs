#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! # assetry-cli
//!
//! Library half of the `assetry` binary:
//! - [`cli`]: clap argument types
//! - [`config`]: `AssetryConfig` file and environment handling
//! - [`config_handlers`]: the `config` subcommands
//! - [`commands`]: `options`, `resolve`, and `master`

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_handlers;
pub mod error;

pub use cli::{Cli, Command};
pub use config::AssetryConfig;
pub use error::{Error, Result};

use assetry_client::MastersClient;
use serde_json::Value;

/// Run a parsed command line.
pub async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();

    let output = match cli.command {
        Command::Config { action } => {
            return config_handlers::handle_config_command(config_path, action);
        }
        Command::Options { hierarchy, path } => {
            let (client, _) = connect(config_path)?;
            commands::options(client, hierarchy, &path).await?
        }
        Command::Resolve { target } => {
            let (client, config) = connect(config_path)?;
            commands::resolve(client, &target, config.picker.require_identifier).await?
        }
        Command::Master { hierarchy, id } => {
            let (client, _) = connect(config_path)?;
            commands::master(client, hierarchy, &id).await?
        }
    };

    print_json(&output)
}

fn connect(config_path: Option<&str>) -> Result<(MastersClient, AssetryConfig)> {
    let config = AssetryConfig::load(config_path)?;
    tracing::debug!(base_url = %config.api.base_url, "connecting to masters API");
    let client = MastersClient::new(config.to_client_config())?;
    Ok((client, config))
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
