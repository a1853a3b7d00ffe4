//! The full harvest pipeline
//!
//! Runs discovery, the listing stage, and the enrichment stage as one
//! sequence. Persisting and serving the result belongs to the job
//! orchestrator; this module only produces the record set.

use crate::config::Config;
use crate::crawler::enrich::enrich_categories;
use crate::crawler::listing::fetch_listing_pages;
use crate::crawler::pagination::{discover_total_pages, listing_page_urls};
use crate::dataset::BookRecord;
use crate::HarvestError;
use reqwest::Client;
use url::Url;

/// Result of one harvest run
#[derive(Debug)]
pub struct HarvestOutcome {
    /// All enriched records, in page order then document order
    pub records: Vec<BookRecord>,

    /// Total listing pages discovered
    pub pages_total: usize,

    /// Listing pages that failed to fetch and contributed no records
    pub pages_dropped: usize,
}

/// Runs the crawl pipeline end to end
///
/// Discovery failure (root unreachable, malformed pager) is fatal; listing
/// and detail failures degrade per page or per book as documented in the
/// stage modules.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `config` - The harvester configuration
///
/// # Returns
///
/// * `Ok(HarvestOutcome)` - Records plus page accounting
/// * `Err(HarvestError)` - A fatal discovery failure
pub async fn harvest(client: &Client, config: &Config) -> Result<HarvestOutcome, HarvestError> {
    let base_url = Url::parse(&config.site.base_url)?;

    let pages_total = discover_total_pages(client, &base_url).await?;
    let page_urls = listing_page_urls(&base_url, pages_total)?;

    let (summaries, pages_dropped) =
        fetch_listing_pages(client, page_urls, config.crawler.listing_concurrency).await;
    if pages_dropped > 0 {
        tracing::warn!(
            "{} of {} listing page(s) dropped this run",
            pages_dropped,
            pages_total
        );
    }
    tracing::info!("Listing stage produced {} book(s)", summaries.len());

    let records =
        enrich_categories(client, summaries, config.crawler.detail_concurrency).await;
    tracing::info!("Enrichment stage produced {} record(s)", records.len());

    Ok(HarvestOutcome {
        records,
        pages_total,
        pages_dropped,
    })
}
