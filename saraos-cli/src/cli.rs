use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "saraos",
    version,
    about = "SARA_OS terminal HUD client"
)]
pub struct Cli {
    /// Override the uplink endpoint from the config file
    #[arg(long)]
    pub endpoint: Option<String>,
    #[arg(long)]
    pub config: Option<String>,
    /// Check backend health, print the result, and exit
    #[arg(long)]
    pub probe: bool,
    /// Write tracing output to this file instead of discarding it
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
