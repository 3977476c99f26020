//! tokenctl binary.
//!
//! Issues, inspects and refreshes identity tokens using the layered
//! configuration of the token service.

mod commands;
mod handlers;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use commands::Cli;
use idt_shared::{AppConfig, Environment};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match (cli.environment, cli.config.as_deref()) {
        (None, None) => AppConfig::load(),
        (environment, file) => {
            AppConfig::load_for(environment.unwrap_or_else(Environment::from_env), file)
        }
    }
    .context("Failed to load configuration")?;

    logging::init(&config.logging);
    info!(environment = %config.environment, "tokenctl starting");

    let output = handlers::execute(cli.command, &config.token).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
