mod commands;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use etl_core::StageKind;
use etl_stages::{Pipeline, PipelineConfig};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "etl")]
#[command(version, about = "Batch ETL pipeline CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Pipeline configuration file (YAML, TOML or JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the raw sample dataset
    Generate,

    /// Publish the latest raw dataset, creating the bucket if needed
    UploadRaw,

    /// Compute observability metrics for the latest dataset
    Observe,

    /// Coerce the latest dataset to the clean schema
    Clean,

    /// Validate the latest dataset and write an HTML report
    Validate,

    /// Add the salary band column
    Enrich,

    /// Mask the name column
    Mask,

    /// Run every stage in order, stopping at the first failure
    Run,
}

impl Commands {
    fn stage(&self) -> Option<StageKind> {
        match self {
            Commands::Generate => Some(StageKind::Generate),
            Commands::UploadRaw => Some(StageKind::UploadRaw),
            Commands::Observe => Some(StageKind::Observe),
            Commands::Clean => Some(StageKind::Clean),
            Commands::Validate => Some(StageKind::Validate),
            Commands::Enrich => Some(StageKind::Enrich),
            Commands::Mask => Some(StageKind::Mask),
            Commands::Run => None,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    let config = PipelineConfig::load(cli.config.as_deref())
        .context("Failed to load pipeline configuration")?;
    let pipeline = Pipeline::local(config);

    match cli.command.stage() {
        Some(kind) => commands::stage::execute(&pipeline, kind),
        None => commands::run::execute(&pipeline),
    }
}
