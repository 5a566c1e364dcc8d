use serde::Deserialize;

/// Main configuration structure for Page-Harvest
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    pub server: ServerConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Page budget used when a crawl request does not name one
    #[serde(rename = "default-max-pages", default = "default_max_pages")]
    pub default_max_pages: usize,

    /// Upper bound on a single request, including reading the body (seconds)
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Upper bound on establishing a connection (seconds)
    #[serde(rename = "connect-timeout-secs", default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            default_max_pages: default_max_pages(),
            request_timeout_secs: default_request_timeout(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl UserAgentConfig {
    /// Formats the header value as `Name/Version (+ContactURL; ContactEmail)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}

/// Where artifacts and crawl records live
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding text and image artifacts
    #[serde(rename = "artifact-dir", default = "default_artifact_dir")]
    pub artifact_dir: String,

    /// Path to the SQLite database file
    #[serde(rename = "database-path", default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            artifact_dir: default_artifact_dir(),
            database_path: default_database_path(),
        }
    }
}

/// HTTP service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Socket address to listen on
    #[serde(rename = "bind-address", default = "default_bind_address")]
    pub bind_address: String,

    /// Shared secret expected in the `X-API-Key` header
    #[serde(rename = "api-key")]
    pub api_key: String,
}

fn default_max_pages() -> usize {
    10
}

fn default_request_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_artifact_dir() -> String {
    "scraped_files".to_string()
}

fn default_database_path() -> String {
    "harvest.db".to_string()
}

fn default_bind_address() -> String {
    "127.0.0.1:5000".to_string()
}
