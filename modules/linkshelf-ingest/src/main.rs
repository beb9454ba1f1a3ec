use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use linkshelf_archive::{classify, ExtractSettings, Extractor, ReqwestFetcher};
use linkshelf_common::{normalize_url, Config};
use linkshelf_ingest::{clear_batch, read_batch, IngestReport, Ingestor, JsonFileStore};

#[derive(Parser)]
#[command(name = "linkshelf", about = "Save links with their titles, descriptions and previews")]
struct Cli {
    /// Path to the saved collection (overrides LINKSHELF_STORE)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Ingest every URL listed in a batch file
    Ingest {
        /// Batch file, one URL per line (overrides LINKSHELF_BATCH)
        #[arg(long)]
        batch: Option<PathBuf>,

        /// Empty the batch file after a successful save
        #[arg(long)]
        clear: bool,
    },
    /// Ingest URLs given on the command line
    Add {
        #[arg(required = true)]
        urls: Vec<String>,
    },
    /// Print the comparison key and source of a URL without fetching it
    Check { url: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json);

    let mut config = Config::from_env().context("Invalid configuration")?;
    if let Some(store) = cli.store {
        config.store_path = store;
    }

    match cli.command {
        Command::Ingest { batch, clear } => {
            if let Some(batch) = batch {
                config.batch_path = batch;
            }
            config.log_summary();

            let urls = read_batch(&config.batch_path).with_context(|| {
                format!("Failed to read batch file {}", config.batch_path.display())
            })?;
            let saved = ingest(&config, &urls).await?;

            if clear && saved {
                clear_batch(&config.batch_path).context("Failed to clear batch file")?;
            }
        }
        Command::Add { urls } => {
            config.log_summary();
            ingest(&config, &urls).await?;
        }
        Command::Check { url } => {
            let key = normalize_url(&url).with_context(|| format!("Cannot normalize {url}"))?;
            println!("key:    {key}");
            println!("source: {}", classify(&url));
        }
    }

    Ok(())
}

fn init_tracing(json: bool) {
    // Covers every linkshelf_* crate: target matching is by prefix.
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("linkshelf=info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Run one batch end to end. Returns whether anything was saved.
async fn ingest(config: &Config, urls: &[String]) -> Result<bool> {
    let store = JsonFileStore::new(&config.store_path);
    let known = store
        .load()
        .with_context(|| format!("Failed to load {}", store.path().display()))?;

    let http = Arc::new(ReqwestFetcher::new().context("Failed to build HTTP client")?);
    let extractor = Arc::new(Extractor::new(http, ExtractSettings::from_config(config)));
    let ingestor = Ingestor::with_default_factory(extractor);

    let report = ingestor.run(urls, known).await;
    print_report(&report);

    if !report.has_additions() {
        info!("Nothing new to save");
        return Ok(false);
    }

    store
        .save(&report.collection)
        .with_context(|| format!("Failed to save {}", store.path().display()))?;
    info!(
        added = report.stats.added,
        total = report.collection.len(),
        "Collection saved"
    );
    Ok(true)
}

fn print_report(report: &IngestReport) {
    for item in &report.outcomes {
        println!("{} -> {}", item.url, item.outcome);
    }
    println!("{}", report.stats);
}
