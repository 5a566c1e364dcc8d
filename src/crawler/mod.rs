//! Crawler module for page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching of pages and images
//! - HTML extraction of text, image references and links
//! - The breadth-first crawl loop that ties them to storage

mod engine;
mod fetcher;
mod parser;

pub use engine::CrawlEngine;
pub use fetcher::{build_http_client, fetch_url, FetchError, FetchedResource};
pub use parser::{extract_page, ExtractedPage};

use crate::config::Config;
use crate::output::CrawlReport;
use crate::HarvestError;

/// Runs a single crawl straight from configuration
///
/// This opens the artifact directory and the database named in `config`,
/// then crawls from `start_url`. When `max_pages` is `None` the configured
/// default budget is used.
///
/// # Example
///
/// ```no_run
/// use page_harvest::config::load_config;
/// use page_harvest::crawler::crawl;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("harvest.toml"))?;
/// let report = crawl(&config, "https://example.com/", Some(5)).await?;
/// println!("{} pages scraped", report.scraped_pages);
/// # Ok(())
/// # }
/// ```
pub async fn crawl(
    config: &Config,
    start_url: &str,
    max_pages: Option<usize>,
) -> Result<CrawlReport, HarvestError> {
    let engine = CrawlEngine::from_config(config)?;
    let budget = max_pages.unwrap_or(config.crawler.default_max_pages);
    engine.crawl(start_url, budget).await
}
