//! Listing-page parsing and the listing fetch stage
//!
//! A listing page carries one `article.product_pod` block per book. The
//! parser turns each block into a [`BookSummary`]; the stage fans out one
//! fetch per page under a semaphore and fans the results back in, in page
//! order.

use crate::crawler::fetcher::fetch_html;
use crate::dataset::BookSummary;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::sync::Arc;
use tokio::sync::Semaphore;
use url::Url;

/// Fetches every listing page and concatenates their book summaries
///
/// Fetches run concurrently, bounded by `concurrency`. A page that fails to
/// fetch is dropped: it contributes no summaries and does not fail the
/// harvest, but it is logged and counted. Output order is page order then
/// within-page document order; join handles are awaited in spawn order so
/// completion order never leaks into the result.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `page_urls` - Listing page URLs, in page order
/// * `concurrency` - Maximum number of in-flight page fetches
///
/// # Returns
///
/// The concatenated summaries and the number of pages that were dropped
pub async fn fetch_listing_pages(
    client: &Client,
    page_urls: Vec<Url>,
    concurrency: usize,
) -> (Vec<BookSummary>, usize) {
    let semaphore = Arc::new(Semaphore::new(concurrency));
    let mut handles = Vec::with_capacity(page_urls.len());

    for url in page_urls {
        let client = client.clone();
        let semaphore = semaphore.clone();

        handles.push(tokio::spawn(async move {
            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => return None,
            };

            match fetch_html(&client, url.as_str()).await {
                Ok(body) => Some(parse_listing_page(&body, &url)),
                Err(e) => {
                    tracing::warn!("Dropping listing page {}: {}", url, e);
                    None
                }
            }
        }));
    }

    let mut summaries = Vec::new();
    let mut dropped = 0;

    for handle in handles {
        match handle.await {
            Ok(Some(page_books)) => summaries.extend(page_books),
            Ok(None) => dropped += 1,
            Err(e) => {
                tracing::warn!("Listing fetch task failed: {}", e);
                dropped += 1;
            }
        }
    }

    (summaries, dropped)
}

/// Parses every book block on one listing page
///
/// A page with zero blocks yields an empty list. A malformed block is
/// skipped with a warning rather than failing the page.
///
/// # Arguments
///
/// * `html` - The listing page document
/// * `page_url` - The URL the document was fetched from, for resolving
///   relative links
pub fn parse_listing_page(html: &str, page_url: &Url) -> Vec<BookSummary> {
    let document = Html::parse_document(html);

    let pod_selector = match Selector::parse("article.product_pod") {
        Ok(selector) => selector,
        Err(_) => return Vec::new(),
    };

    let mut books = Vec::new();
    for article in document.select(&pod_selector) {
        match parse_book_pod(article, page_url) {
            Some(book) => books.push(book),
            None => {
                tracing::warn!("Skipping malformed book block on {}", page_url);
            }
        }
    }

    books
}

/// Parses a single `article.product_pod` block
fn parse_book_pod(article: ElementRef, page_url: &Url) -> Option<BookSummary> {
    let link_selector = Selector::parse("h3 a").ok()?;
    let price_selector = Selector::parse("p.price_color").ok()?;
    let rating_selector = Selector::parse("p.star-rating").ok()?;
    let availability_selector = Selector::parse("p.instock.availability").ok()?;
    let image_selector = Selector::parse("img").ok()?;

    let link = article.select(&link_selector).next()?;
    let title = link.value().attr("title")?.trim().to_string();
    if title.is_empty() {
        return None;
    }

    let detail_url = page_url.join(link.value().attr("href")?).ok()?;

    let price_text = article
        .select(&price_selector)
        .next()?
        .text()
        .collect::<String>();
    let price = parse_price(&price_text)?;

    let rating = article
        .select(&rating_selector)
        .next()
        .and_then(|element| {
            element
                .value()
                .classes()
                .find(|class| !class.eq_ignore_ascii_case("star-rating"))
                .map(str::to_string)
        })
        .and_then(|word| rating_from_word(&word));

    let availability = article
        .select(&availability_selector)
        .next()?
        .text()
        .collect::<String>()
        .trim()
        .to_string();

    let image_src = article.select(&image_selector).next()?.value().attr("src")?;
    let image_url = page_url.join(image_src).ok()?.to_string();

    Some(BookSummary {
        id: extract_book_id(&detail_url),
        title,
        price,
        rating,
        availability,
        image_url,
        detail_url,
    })
}

/// Parses a price display string by stripping the leading currency glyph
///
/// `"£51.77"` parses to `51.77`. Negative prices cannot arise because only
/// digit-led remainders parse.
pub fn parse_price(text: &str) -> Option<f64> {
    let digits = text
        .trim()
        .trim_start_matches(|c: char| !c.is_ascii_digit());
    let price: f64 = digits.parse().ok()?;
    if !price.is_finite() || price < 0.0 {
        return None;
    }
    Some(price)
}

/// Maps a rating word token onto its numeric value
///
/// The token comes from the second class of `p.star-rating` and is matched
/// case-insensitively; unmapped tokens yield `None` rather than an error.
pub fn rating_from_word(word: &str) -> Option<u8> {
    match word.to_ascii_lowercase().as_str() {
        "one" => Some(1),
        "two" => Some(2),
        "three" => Some(3),
        "four" => Some(4),
        "five" => Some(5),
        _ => None,
    }
}

/// Extracts the numeric book id from a detail URL
///
/// Detail URLs end in `<slug>_<id>/index.html`; anything else yields `None`.
fn extract_book_id(detail_url: &Url) -> Option<u32> {
    let segments: Vec<&str> = detail_url.path_segments()?.collect();
    if segments.last() != Some(&"index.html") {
        return None;
    }

    let slug = segments.get(segments.len().checked_sub(2)?)?;
    let (_, id) = slug.rsplit_once('_')?;
    id.parse().ok()
}
