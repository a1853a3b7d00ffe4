//! CSV snapshot loader
//!
//! Reads a snapshot back into records for the serving copy. A missing or
//! empty snapshot is an empty dataset, not an error, so the process can
//! start before any harvest has run. Rows that fail to deserialize are
//! skipped with an error log rather than rejecting the whole file.

use crate::dataset::BookRecord;
use crate::HarvestError;
use std::path::Path;

/// Loads a CSV snapshot into records
///
/// # Arguments
///
/// * `path` - The snapshot path
///
/// # Returns
///
/// * `Ok(Vec<BookRecord>)` - All well-formed rows, possibly empty
/// * `Err(HarvestError)` - The file exists but could not be opened or read
pub fn load_snapshot(path: &Path) -> Result<Vec<BookRecord>, HarvestError> {
    if !path.exists() {
        tracing::warn!("Snapshot not found: {}", path.display());
        return Ok(Vec::new());
    }

    if std::fs::metadata(path)?.len() == 0 {
        tracing::warn!("Snapshot is empty: {}", path.display());
        return Ok(Vec::new());
    }

    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();

    for row in reader.deserialize::<BookRecord>() {
        match row {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::error!("Invalid snapshot row skipped: {}", e);
            }
        }
    }

    tracing::info!(
        "Loaded {} record(s) from {}",
        records.len(),
        path.display()
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::write_snapshot;
    use std::io::Write;

    fn sample_records() -> Vec<BookRecord> {
        vec![
            BookRecord {
                id: Some(1000),
                title: "A Light in the Attic".to_string(),
                price: 51.77,
                rating: Some(3),
                availability: "In stock".to_string(),
                category: "Poetry".to_string(),
                image_url: "https://books.toscrape.com/media/a.jpg".to_string(),
            },
            BookRecord {
                id: None,
                title: "Untracked, But Real".to_string(),
                price: 12.5,
                rating: None,
                availability: "In stock (3 available)".to_string(),
                category: "N/A".to_string(),
                image_url: "https://books.toscrape.com/media/b.jpg".to_string(),
            },
        ]
    }

    #[test]
    fn test_round_trip_preserves_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.csv");

        let records = sample_records();
        write_snapshot(&records, &path).unwrap();
        let loaded = load_snapshot(&path).unwrap();

        assert_eq!(loaded, records);
    }

    #[test]
    fn test_missing_file_is_empty_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_snapshot(&dir.path().join("absent.csv")).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_empty_file_is_empty_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        std::fs::File::create(&path).unwrap();

        let loaded = load_snapshot(&path).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_invalid_rows_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.csv");

        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "id,title,price,rating,availability,category,image_url").unwrap();
        writeln!(file, "1,Good Row,9.99,4,In stock,Fiction,https://x/a.jpg").unwrap();
        writeln!(file, "2,Bad Row,not-a-price,4,In stock,Fiction,https://x/b.jpg").unwrap();
        drop(file);

        let loaded = load_snapshot(&path).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].title, "Good Row");
    }
}
