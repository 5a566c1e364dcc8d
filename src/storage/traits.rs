//! Storage traits and error types
//!
//! This module defines the trait interface for storage backends and
//! associated error types.

use crate::storage::{ImageRecord, NewImage, PageRecord};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Page record not found: {0}")]
    PageNotFound(i64),

    #[error("Storage lock poisoned")]
    LockPoisoned,
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for storage backend implementations
///
/// Every write is durable once the call returns.
pub trait Storage {
    // ===== Page Records =====

    /// Creates a page record and returns its ID
    fn create_page_record(&mut self, url: &str, text_file: &str) -> StorageResult<i64>;

    /// Creates an image record owned by `page_id` and returns its ID
    ///
    /// Fails if `page_id` does not name a committed page record.
    fn create_image_record(&mut self, page_id: i64, url: &str, filename: &str)
        -> StorageResult<i64>;

    /// Records a page and all of its images atomically
    ///
    /// Either the page and every image are committed, or nothing is.
    fn record_page(&mut self, url: &str, text_file: &str, images: &[NewImage])
        -> StorageResult<i64>;

    /// Gets a page record by ID
    fn get_page_record(&self, page_id: i64) -> StorageResult<PageRecord>;

    /// Lists all page records in insertion order
    fn list_page_records(&self) -> StorageResult<Vec<PageRecord>>;

    // ===== Image Records =====

    /// Lists the image records owned by a page
    fn list_image_records(&self, page_id: i64) -> StorageResult<Vec<ImageRecord>>;

    // ===== Statistics =====

    /// Counts all page records
    fn count_page_records(&self) -> StorageResult<u64>;

    /// Counts all image records
    fn count_image_records(&self) -> StorageResult<u64>;
}
