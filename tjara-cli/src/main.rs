//! ## tjara-cli
//! **Operational entrypoint for the tarpit telemetry exporter**
//!
//! Binds the tarpit notification socket, serves the Prometheus scrape
//! endpoint, and keeps both running until the process is stopped.

use clap::Parser;
use tjara_telemetry::EventLogger;

mod commands;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    EventLogger::init();
    let cli = Cli::parse();
    commands::run_command(cli).await
}
