//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the harvester:
//! - Building HTTP clients with proper user agent strings and timeouts
//! - Single GET requests for pages and images, with no retry
//! - Error classification

use crate::config::{CrawlerConfig, UserAgentConfig};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Errors produced while fetching a page or image
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request to {url} failed: {source}")]
    Request { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to read body of {url}: {source}")]
    Body { url: String, source: reqwest::Error },
}

impl FetchError {
    /// The URL whose fetch failed
    pub fn url(&self) -> &str {
        match self {
            Self::Request { url, .. }
            | Self::Timeout { url }
            | Self::Status { url, .. }
            | Self::Body { url, .. } => url,
        }
    }
}

/// A completed HTTP exchange
#[derive(Debug, Clone)]
pub struct FetchedResource {
    /// URL that was requested
    pub url: String,
    /// URL after following redirects
    pub final_url: String,
    /// HTTP status code
    pub status: u16,
    /// Raw response body
    pub body: Vec<u8>,
}

impl FetchedResource {
    /// Returns true for 2xx responses
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turns a non-2xx response into `FetchError::Status`
    pub fn require_success(self) -> Result<Self, FetchError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(FetchError::Status {
                url: self.url,
                status: self.status,
            })
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// Redirects follow reqwest's default policy. Both timeouts come from the
/// crawler configuration so that one unresponsive host cannot stall a crawl.
///
/// # Example
///
/// ```no_run
/// use page_harvest::config::{CrawlerConfig, UserAgentConfig};
/// use page_harvest::crawler::build_http_client;
///
/// let user_agent = UserAgentConfig {
///     crawler_name: "PageHarvest".to_string(),
///     crawler_version: "0.1".to_string(),
///     contact_url: "https://example.com/about".to_string(),
///     contact_email: "admin@example.com".to_string(),
/// };
///
/// let client = build_http_client(&user_agent, &CrawlerConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    crawler: &CrawlerConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_secs(crawler.request_timeout_secs))
        .connect_timeout(Duration::from_secs(crawler.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL with a single GET request
///
/// Any HTTP response, whatever its status, is returned as a
/// `FetchedResource`; callers decide which statuses they accept. Transport
/// failures (DNS, refused connections, malformed URLs, timeouts) and body
/// read failures become a `FetchError`.
pub async fn fetch_url(client: &Client, url: &str) -> Result<FetchedResource, FetchError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| classify_error(url, e))?;

    let status = response.status().as_u16();
    let final_url = response.url().to_string();

    let body = response.bytes().await.map_err(|e| {
        if e.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else {
            FetchError::Body {
                url: url.to_string(),
                source: e,
            }
        }
    })?;

    tracing::debug!("GET {} -> {} ({} bytes)", url, status, body.len());

    Ok(FetchedResource {
        url: url.to_string(),
        final_url,
        status,
        body: body.to_vec(),
    })
}

fn classify_error(url: &str, e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Request {
            url: url.to_string(),
            source: e,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_test_user_agent() -> UserAgentConfig {
        UserAgentConfig {
            crawler_name: "TestHarvester".to_string(),
            crawler_version: "1.0".to_string(),
            contact_url: "https://example.com/about".to_string(),
            contact_email: "admin@example.com".to_string(),
        }
    }

    fn test_client() -> Client {
        build_http_client(&create_test_user_agent(), &CrawlerConfig::default()).unwrap()
    }

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(&create_test_user_agent(), &CrawlerConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_require_success() {
        let ok = FetchedResource {
            url: "http://example.com/".to_string(),
            final_url: "http://example.com/".to_string(),
            status: 204,
            body: vec![],
        };
        assert!(ok.require_success().is_ok());

        let missing = FetchedResource {
            url: "http://example.com/gone".to_string(),
            final_url: "http://example.com/gone".to_string(),
            status: 404,
            body: b"not here".to_vec(),
        };
        match missing.require_success() {
            Err(FetchError::Status { url, status }) => {
                assert_eq!(url, "http://example.com/gone");
                assert_eq!(status, 404);
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_returns_body_and_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
            .mount(&server)
            .await;

        let url = format!("{}/page", server.uri());
        let fetched = fetch_url(&test_client(), &url).await.unwrap();

        assert_eq!(fetched.status, 200);
        assert_eq!(fetched.body, b"hello");
        assert_eq!(fetched.url, url);
    }

    #[tokio::test]
    async fn test_fetch_keeps_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let fetched = fetch_url(&test_client(), &server.uri()).await.unwrap();
        assert_eq!(fetched.status, 500);
        assert!(!fetched.is_success());
    }

    #[tokio::test]
    async fn test_fetch_follows_redirects() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/old"))
            .respond_with(
                ResponseTemplate::new(301).insert_header("location", "/new"),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/new"))
            .respond_with(ResponseTemplate::new(200).set_body_string("moved"))
            .mount(&server)
            .await;

        let url = format!("{}/old", server.uri());
        let fetched = fetch_url(&test_client(), &url).await.unwrap();

        assert_eq!(fetched.status, 200);
        assert_eq!(fetched.url, url);
        assert!(fetched.final_url.ends_with("/new"));
    }

    #[tokio::test]
    async fn test_connection_refused_is_request_error() {
        let result = fetch_url(&test_client(), "http://127.0.0.1:1/").await;
        match result {
            Err(err @ FetchError::Request { .. }) => assert_eq!(err.url(), "http://127.0.0.1:1/"),
            other => panic!("expected request error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_url_is_request_error() {
        let result = fetch_url(&test_client(), "not a url").await;
        assert!(matches!(result, Err(FetchError::Request { .. })));
    }

    #[tokio::test]
    async fn test_slow_response_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&server)
            .await;

        let crawler = CrawlerConfig {
            request_timeout_secs: 1,
            ..CrawlerConfig::default()
        };
        let client = build_http_client(&create_test_user_agent(), &crawler).unwrap();

        let result = fetch_url(&client, &server.uri()).await;
        assert!(matches!(result, Err(FetchError::Timeout { .. })));
    }
}
