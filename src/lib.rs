//! Page-Harvest: a same-domain page and image harvester
//!
//! This crate implements a breadth-first crawler that stays on the domain of
//! its start URL, stores each page's text and images as content-addressed
//! artifacts, records what it scraped in SQLite, and serves both the crawl
//! trigger and the stored artifacts over HTTP.

pub mod config;
pub mod content;
pub mod crawler;
pub mod output;
pub mod server;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Page-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] crawler::FetchError),

    #[error("Artifact error: {0}")]
    Artifact(#[from] content::ArtifactError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl HarvestError {
    /// Returns true for failures that must abort a whole crawl instead of
    /// being recorded against a single page or image.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Storage(storage::StorageError::LockPoisoned))
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Page-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use content::ContentStore;
pub use crawler::CrawlEngine;
pub use output::CrawlReport;
pub use crate::url::same_domain;
