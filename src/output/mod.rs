//! Output module for crawl reports and statistics
//!
//! This module handles:
//! - The per-crawl report returned to callers
//! - Statistics read back from the crawl database

mod report;
pub mod stats;

pub use report::{CrawlFailure, CrawlReport, FailureScope, ImageSummary, PageSummary};
pub use stats::{load_statistics, print_statistics, CrawlStatistics};
