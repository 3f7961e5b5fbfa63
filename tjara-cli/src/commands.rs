use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use tjara_config::TjaraConfig;
use tjara_engine::ExporterRuntime;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the exporter (ingestion socket + scrape endpoint)
    Run(RunArgs),
    /// Load and validate the configuration, then exit
    CheckConfig(CheckConfigArgs),
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Configuration file; defaults to the config/ hierarchy plus TJARA_*
    /// environment variables.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct CheckConfigArgs {
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

fn load(config: Option<&PathBuf>) -> Result<TjaraConfig, tjara_config::ConfigError> {
    match config {
        Some(path) => TjaraConfig::load_from_path(path),
        None => TjaraConfig::load(),
    }
}

pub async fn run_command(cli: Cli) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    match cli.command {
        Commands::Run(args) => {
            let config = load(args.config.as_ref())?;
            ExporterRuntime::new(config).run().await?;
            Ok(())
        }
        Commands::CheckConfig(args) => {
            let config = load(args.config.as_ref())?;
            info!(
                socket = %config.ingest.socket_path.display(),
                listen = %config.exporter.listen_addr,
                geo_db = %config.geo.database_path.display(),
                raw_labels = config.labels.raw,
                "configuration is valid"
            );
            Ok(())
        }
    }
}
