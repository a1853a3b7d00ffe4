use serde::Deserialize;

/// Main configuration structure for Shelf-Harvest
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// Target site configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Catalog root URL; listing pages and media paths resolve against it
    #[serde(rename = "base-url")]
    pub base_url: String,
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum number of listing pages fetched concurrently
    #[serde(rename = "listing-concurrency")]
    pub listing_concurrency: usize,

    /// Maximum number of detail pages fetched concurrently
    #[serde(rename = "detail-concurrency")]
    pub detail_concurrency: usize,

    /// Per-request timeout in seconds
    #[serde(rename = "fetch-timeout-secs")]
    pub fetch_timeout_secs: u64,

    /// Overall deadline for one harvest job in seconds
    #[serde(rename = "job-deadline-secs")]
    pub job_deadline_secs: u64,
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
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path the CSV snapshot is written to and reloaded from
    #[serde(rename = "snapshot-path")]
    pub snapshot_path: String,
}
