//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the harvester:
//! - Building the HTTP client with a proper user agent string and timeouts
//! - GET requests returning document bodies
//! - Error classification (timeout, connection, non-2xx status)

use crate::config::Config;
use crate::HarvestError;
use reqwest::Client;
use std::time::Duration;

/// Builds the HTTP client used by every pipeline stage
///
/// The client carries the user agent string `"{crawler-name}/{crawler-version}"`
/// and the per-request timeout from configuration. Cloning the returned
/// client is cheap; fan-out tasks each hold a clone.
///
/// # Arguments
///
/// * `config` - The harvester configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    let user_agent = format!(
        "{}/{}",
        config.user_agent.crawler_name, config.user_agent.crawler_version
    );

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(config.crawler.fetch_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and returns its body as text
///
/// Any non-2xx status is treated as a fetch failure; callers decide whether
/// that failure is fatal (pagination discovery) or absorbed (listing and
/// detail pages).
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
///
/// # Returns
///
/// * `Ok(String)` - The response body
/// * `Err(HarvestError)` - `Timeout` for timed-out requests, `Fetch` otherwise
pub async fn fetch_html(client: &Client, url: &str) -> Result<String, HarvestError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| classify_error(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(HarvestError::Fetch {
            url: url.to_string(),
            message: format!("HTTP {}", status),
        });
    }

    response.text().await.map_err(|e| classify_error(url, e))
}

/// Maps a reqwest error onto the harvest error taxonomy
fn classify_error(url: &str, error: reqwest::Error) -> HarvestError {
    if error.is_timeout() {
        HarvestError::Timeout {
            url: url.to_string(),
        }
    } else if error.is_connect() {
        HarvestError::Fetch {
            url: url.to_string(),
            message: "connection failed".to_string(),
        }
    } else {
        HarvestError::Fetch {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}
