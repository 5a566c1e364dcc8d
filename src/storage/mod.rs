//! Storage module for persisting crawl results
//!
//! This module handles all database operations for the harvester, including:
//! - SQLite database initialization and schema management
//! - Page records for every successfully scraped page
//! - Image records owned by those pages

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteStorage;
pub use traits::{Storage, StorageError, StorageResult};

use std::path::Path;
use std::sync::{Arc, Mutex};

/// Storage handle shared between the crawl engine and its callers
pub type SharedStorage = Arc<Mutex<dyn Storage + Send>>;

/// Wraps a backend so it can be handed to a `CrawlEngine`
pub fn shared(storage: impl Storage + Send + 'static) -> SharedStorage {
    Arc::new(Mutex::new(storage))
}

/// Initializes or opens a storage database
///
/// # Arguments
///
/// * `path` - Path to the SQLite database file
pub fn open_storage(path: &Path) -> StorageResult<SqliteStorage> {
    SqliteStorage::new(path)
}

/// A successfully scraped page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    pub id: i64,
    pub url: String,
    /// Artifact name of the page's extracted text
    pub text_file: String,
    pub created_at: String,
}

/// An image downloaded while scraping a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    pub id: i64,
    /// The owning page record
    pub page_id: i64,
    pub url: String,
    /// Artifact name of the image bytes
    pub filename: String,
}

/// An image to record alongside its page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewImage {
    pub url: String,
    pub filename: String,
}
