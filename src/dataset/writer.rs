//! CSV snapshot writer
//!
//! Serializes the enriched record set as a header-first CSV file. The write
//! goes to a sibling temp file first and is renamed over the target, so a
//! concurrent reader of the path sees either the old snapshot or the new
//! one in full, never a partial file.

use crate::dataset::BookRecord;
use crate::HarvestError;
use std::path::{Path, PathBuf};

/// Writes all records to a CSV snapshot at `path`, replacing any previous
/// snapshot
///
/// Parent directories are created as needed. The header row and column
/// order come from the [`BookRecord`] field order:
/// `id,title,price,rating,availability,category,image_url`.
///
/// # Arguments
///
/// * `records` - The enriched record set
/// * `path` - The snapshot target path
///
/// # Returns
///
/// * `Ok(PathBuf)` - The written path, for the job to record
/// * `Err(HarvestError)` - `Persist` on any I/O or serialization failure
pub fn write_snapshot(records: &[BookRecord], path: &Path) -> Result<PathBuf, HarvestError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| persist_error(path, e))?;
        }
    }

    let tmp_path = temp_path(path);

    let mut writer = csv::Writer::from_path(&tmp_path).map_err(|e| persist_error(path, e))?;
    for record in records {
        writer.serialize(record).map_err(|e| persist_error(path, e))?;
    }
    writer.flush().map_err(|e| persist_error(path, e))?;
    drop(writer);

    std::fs::rename(&tmp_path, path).map_err(|e| persist_error(path, e))?;

    tracing::info!("Snapshot written to {} ({} records)", path.display(), records.len());
    Ok(path.to_path_buf())
}

/// Sibling temp path used for the atomic replace
fn temp_path(path: &Path) -> PathBuf {
    let mut file_name = path.file_name().unwrap_or_default().to_os_string();
    file_name.push(".tmp");
    path.with_file_name(file_name)
}

fn persist_error(path: &Path, error: impl std::fmt::Display) -> HarvestError {
    HarvestError::Persist {
        path: path.display().to_string(),
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> BookRecord {
        BookRecord {
            id: Some(1000),
            title: "A Light in the Attic".to_string(),
            price: 51.77,
            rating: Some(3),
            availability: "In stock".to_string(),
            category: "Poetry".to_string(),
            image_url: "https://books.toscrape.com/media/cover.jpg".to_string(),
        }
    }

    #[test]
    fn test_write_snapshot_header_and_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.csv");

        let written = write_snapshot(&[sample_record()], &path).unwrap();
        assert_eq!(written, path);

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next(),
            Some("id,title,price,rating,availability,category,image_url")
        );
        assert_eq!(
            lines.next(),
            Some("1000,A Light in the Attic,51.77,3,In stock,Poetry,https://books.toscrape.com/media/cover.jpg")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_write_snapshot_quotes_embedded_commas() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.csv");

        let mut record = sample_record();
        record.title = "One, Two, Three".to_string();
        write_snapshot(&[record], &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"One, Two, Three\""));
    }

    #[test]
    fn test_write_snapshot_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/catalog.csv");

        write_snapshot(&[sample_record()], &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_write_snapshot_overwrites_previous() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.csv");

        write_snapshot(&[sample_record(), sample_record()], &path).unwrap();
        write_snapshot(&[sample_record()], &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        // Header plus exactly one row survives
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn test_write_snapshot_missing_fields_serialize_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.csv");

        let mut record = sample_record();
        record.id = None;
        record.rating = None;
        write_snapshot(&[record], &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let row = content.lines().nth(1).unwrap();
        assert!(row.starts_with(",A Light in the Attic,51.77,,"));
    }

    #[test]
    fn test_write_snapshot_unwritable_path_is_persist_error() {
        let result = write_snapshot(&[sample_record()], Path::new("/proc/nope/catalog.csv"));
        assert!(matches!(result, Err(HarvestError::Persist { .. })));
    }
}
