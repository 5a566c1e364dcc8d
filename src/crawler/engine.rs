//! Crawl engine - the breadth-first crawl loop
//!
//! One crawl call owns its frontier and visited set. Pages are processed
//! strictly one after another:
//! - fetch the page
//! - extract text, images and links
//! - store the text artifact, then fetch and store each image
//! - commit the page record together with its image records
//! - queue same-domain links that have not been visited

use crate::config::Config;
use crate::content::ContentStore;
use crate::crawler::{build_http_client, extract_page, fetch_url};
use crate::output::{CrawlFailure, CrawlReport, FailureScope, ImageSummary, PageSummary};
use crate::storage::{self, NewImage, SharedStorage, SqliteStorage, StorageError};
use crate::url::same_domain;
use crate::HarvestError;
use reqwest::Client;
use std::collections::{HashSet, VecDeque};
use std::path::Path;
use tracing::{debug, error, info, warn};
use url::Url;

/// Runs crawls against a shared content store and record storage
pub struct CrawlEngine {
    client: Client,
    store: ContentStore,
    storage: SharedStorage,
}

/// What a successfully processed page contributes to the crawl
struct PageOutcome {
    summary: PageSummary,
    links: Vec<String>,
    image_failures: Vec<CrawlFailure>,
}

impl CrawlEngine {
    pub fn new(client: Client, store: ContentStore, storage: SharedStorage) -> Self {
        Self {
            client,
            store,
            storage,
        }
    }

    /// Builds the HTTP client, opens the artifact directory and the database
    pub fn from_config(config: &Config) -> Result<Self, HarvestError> {
        let client = build_http_client(&config.user_agent, &config.crawler)?;
        let store = ContentStore::open(&config.storage.artifact_dir)?;
        let database = SqliteStorage::new(Path::new(&config.storage.database_path))?;

        info!(
            "Artifacts in {}, records in {}",
            config.storage.artifact_dir, config.storage.database_path
        );

        Ok(Self::new(client, store, storage::shared(database)))
    }

    pub fn content_store(&self) -> &ContentStore {
        &self.store
    }

    pub fn storage(&self) -> SharedStorage {
        self.storage.clone()
    }

    /// Crawls from `start_url`, scraping at most `page_limit` pages
    ///
    /// Failures of individual pages and images are logged, listed in the
    /// report and otherwise ignored. A failed page is not marked visited, so
    /// it is fetched again if another page links to it later. Only fatal
    /// errors (see [`HarvestError::is_fatal`]) abort the crawl.
    pub async fn crawl(
        &self,
        start_url: &str,
        page_limit: usize,
    ) -> Result<CrawlReport, HarvestError> {
        let mut frontier: VecDeque<String> = VecDeque::from([start_url.to_string()]);
        let mut visited: HashSet<String> = HashSet::new();
        let mut report = CrawlReport::default();

        info!("Starting crawl of {} (budget: {} pages)", start_url, page_limit);

        while visited.len() < page_limit {
            let Some(url) = frontier.pop_front() else {
                debug!("Frontier is empty");
                break;
            };

            if visited.contains(&url) {
                continue;
            }

            debug!("Processing URL: {}", url);

            match self.process_page(&url).await {
                Ok(outcome) => {
                    visited.insert(url.clone());

                    for link in outcome.links {
                        if same_domain(&url, &link) && !visited.contains(&link) {
                            frontier.push_back(link);
                        }
                    }

                    report.push_page(outcome.summary);
                    for failure in outcome.image_failures {
                        report.push_failure(failure);
                    }
                }
                Err(e) if e.is_fatal() => {
                    error!("Aborting crawl of {}: {}", start_url, e);
                    return Err(e);
                }
                Err(e) => {
                    warn!("Error scraping {}: {}", url, e);
                    report.push_failure(CrawlFailure::new(url, FailureScope::Page, e));
                }
            }
        }

        info!(
            "Crawl of {} finished: {} pages scraped, {} failures, {} URLs left in frontier",
            start_url,
            report.scraped_pages,
            report.failures.len(),
            frontier.len()
        );

        Ok(report)
    }

    /// Fetches, extracts, stores and records one page
    async fn process_page(&self, url: &str) -> Result<PageOutcome, HarvestError> {
        let page = fetch_url(&self.client, url).await?.require_success()?;
        if page.final_url != page.url {
            // Links still resolve against the requested URL
            debug!("{} redirected to {}", page.url, page.final_url);
        }
        let base_url = Url::parse(url)?;
        let extracted = extract_page(&page.body, &base_url);

        let text_file = self.store.store_text(url, &extracted.text).await?;

        let mut images = Vec::new();
        let mut image_failures = Vec::new();
        for image_url in extracted.images {
            match self.harvest_image(&image_url).await {
                Ok(filename) => images.push(ImageSummary {
                    url: image_url,
                    filename,
                }),
                Err(e) => {
                    warn!("Error saving image {}: {}", image_url, e);
                    image_failures.push(CrawlFailure::new(image_url, FailureScope::Image, e));
                }
            }
        }

        let page_id = self.record(url, &text_file, &images)?;
        debug!(
            "Recorded page {} as #{} with {} images",
            url,
            page_id,
            images.len()
        );

        Ok(PageOutcome {
            summary: PageSummary {
                url: url.to_string(),
                text_file,
                images,
            },
            links: extracted.links,
            image_failures,
        })
    }

    /// Downloads one image and stores it, returning the artifact name
    async fn harvest_image(&self, image_url: &str) -> Result<String, HarvestError> {
        let image = fetch_url(&self.client, image_url)
            .await?
            .require_success()?;
        let filename = self.store.store_image(image_url, &image.body).await?;
        Ok(filename)
    }

    /// Commits the page record and its image records in one transaction
    fn record(
        &self,
        url: &str,
        text_file: &str,
        images: &[ImageSummary],
    ) -> Result<i64, HarvestError> {
        let new_images: Vec<NewImage> = images
            .iter()
            .map(|image| NewImage {
                url: image.url.clone(),
                filename: image.filename.clone(),
            })
            .collect();

        let mut storage = self
            .storage
            .lock()
            .map_err(|_| StorageError::LockPoisoned)?;
        let page_id = storage.record_page(url, text_file, &new_images)?;
        Ok(page_id)
    }
}
