//! Oncolens — educational tumour malignancy estimates.
//! Entry point for the CLI binary.

mod cli;
mod commands;
mod config;
mod render;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use oncolens_ranker::Scorer;

use crate::cli::{Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = config::Config::load(cli.config.as_deref())?;

    // Logs go to stderr so stdout stays clean for JSON and CSV output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    debug!("Version: {}", env!("CARGO_PKG_VERSION"));
    match &config.source {
        Some(path) => info!("Configuration loaded from {}", path.display()),
        None => debug!("No config file, using defaults"),
    }

    let format = cli.format.unwrap_or(config.output.format);
    let scorer = Scorer::default();

    match &cli.command {
        Command::Predict(args) => commands::predict(&scorer, args, &config, format).await,
        Command::Batch(args) => commands::batch(&scorer, args, &config, format).await,
        Command::Sample { output } => commands::sample(output.as_deref()).await,
        Command::ModelInfo => commands::model_info(&scorer, format),
    }
}
