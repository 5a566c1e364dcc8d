//! Crawl report returned to callers
//!
//! The report is built while a crawl runs and serialized as the response of
//! the scrape endpoint. It is never persisted itself.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Aggregate result of one crawl
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlReport {
    /// Number of pages whose records were committed
    pub scraped_pages: usize,

    /// One entry per committed page, in crawl order
    pub data: Vec<PageSummary>,

    /// Pages and images that were skipped because of an error
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<CrawlFailure>,
}

/// A scraped page and the images saved from it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSummary {
    pub url: String,
    pub text_file: String,
    pub images: Vec<ImageSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSummary {
    pub url: String,
    pub filename: String,
}

/// Whether a failure cost a whole page or a single image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureScope {
    Page,
    Image,
}

/// A URL that could not be harvested
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlFailure {
    pub url: String,
    pub scope: FailureScope,
    pub error: String,
}

impl CrawlFailure {
    pub fn new(url: impl Into<String>, scope: FailureScope, error: impl Display) -> Self {
        Self {
            url: url.into(),
            scope,
            error: error.to_string(),
        }
    }
}

impl CrawlReport {
    /// Appends a committed page, keeping `scraped_pages` in step with `data`
    pub fn push_page(&mut self, page: PageSummary) {
        self.data.push(page);
        self.scraped_pages = self.data.len();
    }

    pub fn push_failure(&mut self, failure: CrawlFailure) {
        self.failures.push(failure);
    }

    /// Failures that cost a whole page
    pub fn page_failures(&self) -> impl Iterator<Item = &CrawlFailure> {
        self.failures
            .iter()
            .filter(|failure| failure.scope == FailureScope::Page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page(url: &str) -> PageSummary {
        PageSummary {
            url: url.to_string(),
            text_file: "abc.txt".to_string(),
            images: vec![ImageSummary {
                url: format!("{}logo.png", url),
                filename: "def.png".to_string(),
            }],
        }
    }

    #[test]
    fn test_push_page_counts() {
        let mut report = CrawlReport::default();
        report.push_page(page("http://example.com/"));
        report.push_page(page("http://example.com/a/"));
        assert_eq!(report.scraped_pages, 2);
        assert_eq!(report.data.len(), 2);
    }

    #[test]
    fn test_serialized_shape_without_failures() {
        let mut report = CrawlReport::default();
        report.push_page(page("http://example.com/"));

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(
            value,
            json!({
                "scraped_pages": 1,
                "data": [{
                    "url": "http://example.com/",
                    "text_file": "abc.txt",
                    "images": [{"url": "http://example.com/logo.png", "filename": "def.png"}]
                }]
            })
        );
    }

    #[test]
    fn test_failures_are_serialized_when_present() {
        let mut report = CrawlReport::default();
        report.push_failure(CrawlFailure::new(
            "http://example.com/broken.png",
            FailureScope::Image,
            "HTTP 404",
        ));

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["scraped_pages"], 0);
        assert_eq!(value["failures"][0]["scope"], "image");
        assert_eq!(value["failures"][0]["error"], "HTTP 404");
        assert_eq!(report.page_failures().count(), 0);
    }

    #[test]
    fn test_deserialize_without_failures_field() {
        let report: CrawlReport =
            serde_json::from_str(r#"{"scraped_pages": 0, "data": []}"#).unwrap();
        assert!(report.failures.is_empty());
    }
}
