//! GBL Ingest - GeoBlacklight metadata ingestion tool

use anyhow::Result;
use clap::Parser;
use gbl_common::logging::{init_logging, LogConfig, LogLevel};
use gbl_ingest::{IngestConfig, IngestOrchestrator};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "gbl-ingest")]
#[command(author, version, about = "GeoBlacklight metadata ingestion tool")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Parser, Debug)]
enum Command {
    /// Process every upload file in the intake directory
    Run {
        /// Base directory holding Upload/, Archive/, and Report/
        #[arg(long)]
        base_dir: Option<String>,

        /// Solr core URL documents are submitted to
        #[arg(long)]
        solr_url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbose flag
    let log_level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };

    let log_config = LogConfig::builder()
        .level(log_level)
        .log_file_prefix("gbl-ingest".to_string())
        .build();

    // Merge with environment variables (they take precedence)
    let log_config = LogConfig::from_env().unwrap_or(log_config);

    init_logging(&log_config)?;

    match cli.command {
        Command::Run { base_dir, solr_url } => {
            let mut config = IngestConfig::load()?;
            if let Some(base_dir) = base_dir {
                config.base_dir = base_dir.into();
            }
            if let Some(solr_url) = solr_url {
                config.solr_url = solr_url;
            }
            config.validate()?;

            info!("Ingesting upload files");
            let summary = IngestOrchestrator::new(config)?.run().await?;

            info!(
                files = summary.files_processed,
                ingested = summary.ingested_records,
                "Ingestion complete"
            );
        },
    }

    Ok(())
}
