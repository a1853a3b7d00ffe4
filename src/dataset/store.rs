//! In-memory serving copy of the catalog
//!
//! Queries serve from an `Arc<Vec<BookRecord>>` that is swapped wholesale
//! when a harvest succeeds. Readers clone the current Arc and scan it
//! outside the lock, so they always observe one complete dataset, never a
//! half-replaced one. The store is the only data a failed harvest must
//! leave untouched.

use crate::dataset::BookRecord;
use std::collections::BTreeSet;
use std::sync::{Arc, RwLock};

/// Shared, swappable catalog dataset
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    inner: Arc<RwLock<Arc<Vec<BookRecord>>>>,
}

/// Aggregates over the current dataset
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogStats {
    /// Total record count
    pub total: usize,

    /// Mean price, 0.0 for an empty dataset
    pub average_price: f64,

    /// Count of records per rating 1-5; unrated records are not counted
    pub rating_distribution: [usize; 5],
}

impl CatalogStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a new dataset, replacing the previous one atomically
    pub fn swap(&self, records: Vec<BookRecord>) {
        let mut guard = self.inner.write().unwrap();
        *guard = Arc::new(records);
    }

    /// Hands out the current dataset
    pub fn snapshot(&self) -> Arc<Vec<BookRecord>> {
        self.inner.read().unwrap().clone()
    }

    /// Number of records currently served
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    /// Whether the store currently serves no records
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Finds the record with the given id
    pub fn get(&self, id: u32) -> Option<BookRecord> {
        self.snapshot()
            .iter()
            .find(|record| record.id == Some(id))
            .cloned()
    }

    /// Filters records by title substring and/or exact category, both
    /// case-insensitive; `None` filters match everything
    pub fn search(&self, title: Option<&str>, category: Option<&str>) -> Vec<BookRecord> {
        let title = title.map(str::to_lowercase);
        let category = category.map(str::to_lowercase);

        self.snapshot()
            .iter()
            .filter(|record| match &title {
                Some(needle) => record.title.to_lowercase().contains(needle),
                None => true,
            })
            .filter(|record| match &category {
                Some(wanted) => record.category.to_lowercase() == *wanted,
                None => true,
            })
            .cloned()
            .collect()
    }

    /// Distinct categories in the current dataset, sorted
    pub fn categories(&self) -> Vec<String> {
        self.snapshot()
            .iter()
            .map(|record| record.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Computes aggregates over the current dataset
    pub fn stats(&self) -> CatalogStats {
        let snapshot = self.snapshot();
        let total = snapshot.len();

        let average_price = if total == 0 {
            0.0
        } else {
            snapshot.iter().map(|record| record.price).sum::<f64>() / total as f64
        };

        let mut rating_distribution = [0usize; 5];
        for record in snapshot.iter() {
            if let Some(rating @ 1..=5) = record.rating {
                rating_distribution[rating as usize - 1] += 1;
            }
        }

        CatalogStats {
            total,
            average_price,
            rating_distribution,
        }
    }
}
