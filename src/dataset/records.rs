use serde::{Deserialize, Serialize};
use url::Url;

/// A book as parsed from one listing-page item block
///
/// The detail URL only exists to drive category enrichment; it is dropped
/// before persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct BookSummary {
    /// Numeric suffix of the detail URL slug, when present
    pub id: Option<u32>,

    /// Book title
    pub title: String,

    /// Price with the currency glyph stripped
    pub price: f64,

    /// Star rating 1-5, when the rating class token maps to one
    pub rating: Option<u8>,

    /// Availability text as displayed on the listing page
    pub availability: String,

    /// Absolute cover image URL
    pub image_url: String,

    /// Absolute URL of the book's detail page
    pub detail_url: Url,
}

/// A fully enriched book, as persisted in the snapshot
///
/// Field order defines the CSV column order:
/// `id,title,price,rating,availability,category,image_url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookRecord {
    pub id: Option<u32>,
    pub title: String,
    pub price: f64,
    pub rating: Option<u8>,
    pub availability: String,
    pub category: String,
    pub image_url: String,
}

impl BookSummary {
    /// Attaches a category, dropping the detail URL
    pub fn into_record(self, category: String) -> BookRecord {
        BookRecord {
            id: self.id,
            title: self.title,
            price: self.price,
            rating: self.rating,
            availability: self.availability,
            category,
            image_url: self.image_url,
        }
    }
}
