//! Category enrichment stage
//!
//! Each book's detail page carries a breadcrumb whose third entry is the
//! book's category. The stage fans out one detail fetch per summary under a
//! semaphore and fans back in a [`BookRecord`] per summary. The stage is
//! error-transparent: a failed fetch, a missing breadcrumb, or even a
//! panicked task degrades that book to the `"N/A"` category instead of
//! dropping it, so output length always equals input length.

use crate::crawler::fetcher::fetch_html;
use crate::dataset::{BookRecord, BookSummary};
use reqwest::Client;
use scraper::{Html, Selector};
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Category recorded when the detail page cannot supply one
pub const UNCATEGORIZED: &str = "N/A";

/// Enriches every summary with its category
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `summaries` - Listing stage output, in page order
/// * `concurrency` - Maximum number of in-flight detail fetches
///
/// # Returns
///
/// One record per input summary, same order and cardinality
pub async fn enrich_categories(
    client: &Client,
    summaries: Vec<BookSummary>,
    concurrency: usize,
) -> Vec<BookRecord> {
    let semaphore = Arc::new(Semaphore::new(concurrency));
    let mut handles = Vec::with_capacity(summaries.len());

    for summary in &summaries {
        let client = client.clone();
        let semaphore = semaphore.clone();
        let detail_url = summary.detail_url.clone();

        handles.push(tokio::spawn(async move {
            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => return UNCATEGORIZED.to_string(),
            };

            fetch_category(&client, detail_url.as_str()).await
        }));
    }

    let mut records = Vec::with_capacity(summaries.len());
    for (summary, handle) in summaries.into_iter().zip(handles) {
        let category = handle.await.unwrap_or_else(|e| {
            tracing::warn!("Detail fetch task for {} failed: {}", summary.detail_url, e);
            UNCATEGORIZED.to_string()
        });
        records.push(summary.into_record(category));
    }

    records
}

/// Fetches one detail page and extracts its category
async fn fetch_category(client: &Client, url: &str) -> String {
    match fetch_html(client, url).await {
        Ok(body) => parse_breadcrumb_category(&body).unwrap_or_else(|| {
            tracing::debug!("No breadcrumb category on {}", url);
            UNCATEGORIZED.to_string()
        }),
        Err(e) => {
            tracing::warn!("Failed to fetch detail page {}: {}", url, e);
            UNCATEGORIZED.to_string()
        }
    }
}

/// Extracts the category from a detail-page breadcrumb
///
/// The breadcrumb lists `Home / <section> / <category> / <title>`; the third
/// entry's anchor text is the category. Returns `None` when the breadcrumb
/// is missing, has fewer than three entries, or the third entry carries no
/// anchor.
pub fn parse_breadcrumb_category(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let item_selector = Selector::parse("ul.breadcrumb li").ok()?;
    let anchor_selector = Selector::parse("a").ok()?;

    let third = document.select(&item_selector).nth(2)?;
    let anchor = third.select(&anchor_selector).next()?;

    let category = anchor.text().collect::<String>().trim().to_string();
    if category.is_empty() {
        return None;
    }
    Some(category)
}
