//! Shelf-Harvest: a catalog snapshot harvester
//!
//! This crate crawls a paginated book catalog into a flat record set,
//! persists it as a CSV snapshot, and refreshes an in-memory serving copy
//! from that snapshot. The crawl runs as a single-flight background job
//! with observable state.

pub mod config;
pub mod crawler;
pub mod dataset;
pub mod job;

use std::time::Duration;
use thiserror::Error;

/// Main error type for Shelf-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch failed for {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Parse error for {url}: {message}")]
    Parse { url: String, message: String },

    #[error("Snapshot write failed for {path}: {message}")]
    Persist { path: String, message: String },

    #[error("A crawl job is already running")]
    Conflict,

    #[error("Job deadline of {0:?} exceeded")]
    Deadline(Duration),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
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

/// Result type alias for Shelf-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use dataset::{BookRecord, BookSummary, CatalogStore};
pub use job::{CrawlJob, JobStatus};
