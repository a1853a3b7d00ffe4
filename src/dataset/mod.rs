//! Dataset model, snapshot persistence, and the in-memory serving copy
//!
//! The crawl pipeline produces [`BookSummary`] values, enrichment turns them
//! into [`BookRecord`]s, the writer persists them as a CSV snapshot, the
//! loader reads a snapshot back, and [`CatalogStore`] holds the copy that
//! queries are served from.

mod loader;
mod records;
mod store;
mod writer;

pub use loader::load_snapshot;
pub use records::{BookRecord, BookSummary};
pub use store::{CatalogStats, CatalogStore};
pub use writer::write_snapshot;
