use crate::config::types::Config;
use crate::ConfigError;
use url::Url;

/// Validates a parsed configuration semantically
///
/// Checks that TOML-level parsing cannot express:
/// - The base URL must be an absolute http(s) URL
/// - Concurrency limits must be at least 1
/// - The fetch timeout must be non-zero and fit inside the job deadline
/// - The snapshot path and user-agent identification must be non-empty
///
/// # Arguments
///
/// * `config` - The configuration to validate
///
/// # Returns
///
/// * `Ok(())` - Configuration is valid
/// * `Err(ConfigError)` - The first validation failure found
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_base_url(&config.site.base_url)?;

    if config.crawler.listing_concurrency == 0 {
        return Err(ConfigError::Validation(
            "listing-concurrency must be at least 1".to_string(),
        ));
    }

    if config.crawler.detail_concurrency == 0 {
        return Err(ConfigError::Validation(
            "detail-concurrency must be at least 1".to_string(),
        ));
    }

    if config.crawler.fetch_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "fetch-timeout-secs must be at least 1".to_string(),
        ));
    }

    if config.crawler.job_deadline_secs <= config.crawler.fetch_timeout_secs {
        return Err(ConfigError::Validation(format!(
            "job-deadline-secs ({}) must exceed fetch-timeout-secs ({})",
            config.crawler.job_deadline_secs, config.crawler.fetch_timeout_secs
        )));
    }

    if config.output.snapshot_path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "snapshot-path must not be empty".to_string(),
        ));
    }

    if config.user_agent.crawler_name.trim().is_empty() {
        return Err(ConfigError::Validation(
            "crawler-name must not be empty".to_string(),
        ));
    }

    if config.user_agent.crawler_version.trim().is_empty() {
        return Err(ConfigError::Validation(
            "crawler-version must not be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates that the base URL is an absolute http(s) URL
fn validate_base_url(base_url: &str) -> Result<(), ConfigError> {
    let url =
        Url::parse(base_url).map_err(|e| ConfigError::InvalidUrl(format!("{}: {}", base_url, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{}: expected http or https scheme",
            base_url
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::{CrawlerConfig, OutputConfig, SiteConfig, UserAgentConfig};

    fn valid_config() -> Config {
        Config {
            site: SiteConfig {
                base_url: "https://books.toscrape.com/".to_string(),
            },
            crawler: CrawlerConfig {
                listing_concurrency: 8,
                detail_concurrency: 16,
                fetch_timeout_secs: 30,
                job_deadline_secs: 600,
            },
            user_agent: UserAgentConfig {
                crawler_name: "ShelfHarvest".to_string(),
                crawler_version: "1.0".to_string(),
            },
            output: OutputConfig {
                snapshot_path: "./data/catalog.csv".to_string(),
            },
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        let mut config = valid_config();
        config.site.base_url = "ftp://books.toscrape.com/".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_rejects_unparseable_base_url() {
        let mut config = valid_config();
        config.site.base_url = "not a url".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_rejects_zero_listing_concurrency() {
        let mut config = valid_config();
        config.crawler.listing_concurrency = 0;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_zero_detail_concurrency() {
        let mut config = valid_config();
        config.crawler.detail_concurrency = 0;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_deadline_not_exceeding_fetch_timeout() {
        let mut config = valid_config();
        config.crawler.job_deadline_secs = 30;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_empty_snapshot_path() {
        let mut config = valid_config();
        config.output.snapshot_path = "  ".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_empty_crawler_name() {
        let mut config = valid_config();
        config.user_agent.crawler_name = String::new();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }
}
