//! Statistics generation from the crawl database
//!
//! This module provides functionality for extracting and displaying
//! harvest statistics from the storage layer.

use crate::storage::{PageRecord, Storage};
use crate::HarvestError;

/// Harvest statistics summary
#[derive(Debug, Clone)]
pub struct CrawlStatistics {
    /// Total number of page records
    pub total_pages: u64,

    /// Total number of image records
    pub total_images: u64,

    /// Number of distinct page URLs ever scraped
    pub distinct_urls: u64,

    /// The most recently recorded page
    pub latest_page: Option<PageRecord>,
}

/// Loads statistics from storage
pub fn load_statistics(storage: &dyn Storage) -> Result<CrawlStatistics, HarvestError> {
    let total_pages = storage.count_page_records()?;
    let total_images = storage.count_image_records()?;

    let pages = storage.list_page_records()?;
    let mut urls: Vec<&str> = pages.iter().map(|page| page.url.as_str()).collect();
    urls.sort_unstable();
    urls.dedup();
    let distinct_urls = urls.len() as u64;

    let latest_page = pages.last().cloned();

    Ok(CrawlStatistics {
        total_pages,
        total_images,
        distinct_urls,
        latest_page,
    })
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Harvest Statistics ===\n");

    println!("Overview:");
    println!("  Page records: {}", stats.total_pages);
    println!("  Distinct page URLs: {}", stats.distinct_urls);
    println!("  Image records: {}", stats.total_images);

    let images_per_page = if stats.total_pages > 0 {
        stats.total_images as f64 / stats.total_pages as f64
    } else {
        0.0
    };
    println!("  Images per page: {:.2}", images_per_page);
    println!();

    match &stats.latest_page {
        Some(page) => {
            println!("Latest page:");
            println!("  {} ({})", page.url, page.created_at);
            println!("  text: {}", page.text_file);
        }
        None => println!("No pages scraped yet."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{NewImage, SqliteStorage};

    #[test]
    fn test_statistics_on_empty_storage() {
        let storage = SqliteStorage::new_in_memory().unwrap();
        let stats = load_statistics(&storage).unwrap();

        assert_eq!(stats.total_pages, 0);
        assert_eq!(stats.total_images, 0);
        assert_eq!(stats.distinct_urls, 0);
        assert!(stats.latest_page.is_none());
    }

    #[test]
    fn test_statistics_counts_records() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        let image = NewImage {
            url: "http://example.com/a.png".to_string(),
            filename: "a.png".to_string(),
        };
        storage
            .record_page("http://example.com/", "1.txt", &[image])
            .unwrap();
        storage.record_page("http://example.com/", "1.txt", &[]).unwrap();
        storage.record_page("http://example.com/b", "2.txt", &[]).unwrap();

        let stats = load_statistics(&storage).unwrap();
        assert_eq!(stats.total_pages, 3);
        assert_eq!(stats.total_images, 1);
        assert_eq!(stats.distinct_urls, 2);
        assert_eq!(stats.latest_page.unwrap().url, "http://example.com/b");
    }
}
