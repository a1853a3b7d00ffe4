//! Crawl pipeline: fetching, pagination discovery, listing and enrichment
//! stages
//!
//! The pipeline runs two sequential fan-out/fan-in barriers: all listing
//! pages are fetched together, then all detail pages are fetched together.
//! Each stage is bounded by a semaphore sized from configuration, and each
//! stage re-associates results with their spawn order so output order never
//! depends on completion order.

mod enrich;
mod fetcher;
mod listing;
mod pagination;
mod pipeline;

pub use enrich::{enrich_categories, parse_breadcrumb_category, UNCATEGORIZED};
pub use fetcher::{build_http_client, fetch_html};
pub use listing::{fetch_listing_pages, parse_listing_page, parse_price, rating_from_word};
pub use pagination::{discover_total_pages, listing_page_urls, parse_total_pages};
pub use pipeline::{harvest, HarvestOutcome};
