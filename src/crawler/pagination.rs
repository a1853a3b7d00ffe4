//! Pagination discovery
//!
//! The catalog root carries an optional pager control whose current entry
//! reads "Page X of Y". Discovery fetches the root, reads Y, and builds the
//! full set of listing-page URLs. Fetching the root is the one
//! unconditionally fatal step of a harvest: without it there is nothing to
//! crawl.

use crate::crawler::fetcher::fetch_html;
use crate::HarvestError;
use reqwest::Client;
use scraper::{Html, Selector};
use url::Url;

/// Fetches the catalog root and returns the total listing-page count
///
/// A catalog without a pager element is a valid single-page catalog and
/// yields 1. A pager whose trailing token is not an integer fails the
/// harvest, matching the strictness of the page-count contract.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `base_url` - The catalog root URL
///
/// # Returns
///
/// * `Ok(usize)` - Total page count, always >= 1
/// * `Err(HarvestError)` - Root fetch failed or the pager text was malformed
pub async fn discover_total_pages(client: &Client, base_url: &Url) -> Result<usize, HarvestError> {
    let body = fetch_html(client, base_url.as_str()).await?;
    let total = parse_total_pages(&body).ok_or_else(|| HarvestError::Parse {
        url: base_url.to_string(),
        message: "pager text did not end in a page count".to_string(),
    })?;

    tracing::info!("Discovered {} listing page(s)", total);
    Ok(total)
}

/// Parses the total page count from a catalog root document
///
/// Returns `Some(1)` when no pager element is present, `Some(n)` when the
/// pager's current entry ends in an integer token, and `None` when a pager
/// exists but its text is malformed.
pub fn parse_total_pages(html: &str) -> Option<usize> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("ul.pager li.current").ok()?;

    let current = match document.select(&selector).next() {
        Some(element) => element,
        None => return Some(1),
    };

    // Pager text has the shape "Page X of Y"
    let text = current.text().collect::<String>();
    let total: usize = text.rsplit("of").next()?.trim().parse().ok()?;

    if total == 0 {
        return None;
    }
    Some(total)
}

/// Builds the URL for every listing page
///
/// Page 1 is the catalog root itself; pages 2..N live under
/// `catalogue/page-{n}.html` relative to the root.
///
/// # Arguments
///
/// * `base_url` - The catalog root URL
/// * `total_pages` - Total page count from discovery
///
/// # Returns
///
/// One URL per listing page, in page order
pub fn listing_page_urls(base_url: &Url, total_pages: usize) -> Result<Vec<Url>, HarvestError> {
    let mut urls = Vec::with_capacity(total_pages);
    urls.push(base_url.clone());

    for page in 2..=total_pages {
        let url = base_url.join(&format!("catalogue/page-{}.html", page))?;
        urls.push(url);
    }

    Ok(urls)
}
