//! Page-Harvest main entry point
//!
//! This is the command-line interface for the Page-Harvest service.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use page_harvest::config::{load_config_with_hash, Config};
use page_harvest::output::{load_statistics, print_statistics};
use page_harvest::storage::open_storage;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Page-Harvest: a same-domain page and image harvester
///
/// Crawls a site breadth-first without leaving its domain, saving page text
/// and images as content-addressed files and recording every scraped page.
#[derive(Parser, Debug)]
#[command(name = "page-harvest")]
#[command(version)]
#[command(about = "A same-domain page and image harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP service
    Serve,

    /// Crawl once from URL and print the report as JSON
    Crawl {
        /// Start URL
        url: String,

        /// Maximum number of pages to scrape (defaults to the configured budget)
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        max_pages: Option<u64>,
    },

    /// Show record counts from the database and exit
    Stats,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    match cli.command {
        Command::Serve => handle_serve(&config).await,
        Command::Crawl { url, max_pages } => {
            let max_pages = max_pages.map(|n| n as usize);
            handle_crawl(&config, &url, max_pages).await
        }
        Command::Stats => handle_stats(&config),
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("page_harvest=info,tower_http=info,warn"),
            1 => EnvFilter::new("page_harvest=debug,tower_http=debug,info"),
            2 => EnvFilter::new("page_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn handle_serve(config: &Config) -> Result<()> {
    tracing::info!("Starting HTTP service on {}", config.server.bind_address);
    page_harvest::server::serve(config)
        .await
        .context("Server error")
}

async fn handle_crawl(config: &Config, url: &str, max_pages: Option<usize>) -> Result<()> {
    let report = page_harvest::crawler::crawl(config, url, max_pages)
        .await
        .with_context(|| format!("Crawl of {} failed", url))?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn handle_stats(config: &Config) -> Result<()> {
    println!("Database: {}\n", config.storage.database_path);

    let storage = open_storage(Path::new(&config.storage.database_path))
        .context("Failed to open database")?;
    let stats = load_statistics(&storage)?;
    print_statistics(&stats);

    Ok(())
}
