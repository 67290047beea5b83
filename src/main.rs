mod auth;
mod cli;
mod config;
mod error;
mod issues;
mod output;
mod providers;
mod report;

use clap::Parser;
use cli::Cli;
use log::{error, info};

#[tokio::main]
async fn main() {
    env_logger::init();

    output::print_banner();

    let cli = Cli::parse();
    info!("Starting issuelens - Jira issue report exporter");
    if let Err(e) = cli.execute().await {
        error!("Export failed: {e:#}");
        std::process::exit(1);
    }
}
