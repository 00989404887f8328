mod cli;
mod tui;

use clap::Parser;
use cli::Cli;
use saraos_core::{ChatClient, LinkConfig, Uplink};
use serde_json::json;
use std::error::Error;
use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;
    info!("Starting saraos");

    let config_path = cli.config.as_deref().map(Path::new);
    let file_config = LinkConfig::load(config_path)?;
    if let Some(path) = config_path {
        info!(path = %path.display(), "Loaded configuration from file");
    }
    let endpoint = cli.endpoint.unwrap_or(file_config.endpoint);
    debug!(endpoint = %endpoint, "Resolved uplink endpoint");
    let client = Arc::new(ChatClient::new(endpoint));

    if cli.probe {
        info!("Running one-shot health probe");
        let status = client.probe().await?;
        let output = json!({
            "endpoint": client.endpoint(),
            "status": status,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    info!("Entering HUD");
    tui::hud::run_hud(client).await?;
    info!("HUD session finished");
    Ok(())
}

/// The HUD owns the terminal, so tracing output goes to the optional log
/// file or is discarded entirely.
fn init_tracing(log_file: Option<&Path>) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false)
                .with_level(true)
                .init();
        }
        None => {
            fmt()
                .with_env_filter(filter)
                .with_writer(io::sink)
                .init();
        }
    }
    Ok(())
}
