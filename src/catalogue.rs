//! Catalogue documents: persisted, ordered snapshots of discovered files.
//!
//! A catalogue is a JSON object with a single `files` array; each entry is
//! a serialized [`FileRecord`]. Array order is semantically meaningful: it
//! becomes the `none` sort order when the catalogue is replayed as a
//! discovery source. [`CatalogueBuilder`] is the writing dual of catalogue
//! replay: it accumulates records and performs one whole-document write.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{Error, Result};
use crate::iterator::FileIterator;
use crate::record::FileRecord;

/// The catalogue document format.
#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogueDoc {
    pub files: Vec<FileRecord>,
}

/// Parse a catalogue document into records.
///
/// The catalogue is a frozen snapshot: records are yielded exactly as
/// written, with no filesystem re-validation, so a catalogue remains usable
/// after the files it lists have moved or disappeared. A missing catalogue
/// file fails with [`Error::NotFound`]; anything unparsable fails with
/// [`Error::MalformedCatalogue`].
pub fn load_catalogue(path: &Path) -> Result<Vec<FileRecord>> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => Error::NotFound(path.to_path_buf()),
        _ => Error::Access {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let doc: CatalogueDoc =
        serde_json::from_str(&content).map_err(|e| Error::MalformedCatalogue {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    Ok(doc.files)
}

/// Accumulates records and writes them out as one catalogue document.
pub struct CatalogueBuilder {
    output_path: PathBuf,
    files: Vec<FileRecord>,
}

impl CatalogueBuilder {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        CatalogueBuilder {
            output_path: output_path.into(),
            files: Vec::new(),
        }
    }

    /// Append one record. The only validation is a non-empty path.
    pub fn add_file(&mut self, record: FileRecord) -> Result<()> {
        if record.path.as_os_str().is_empty() {
            return Err(Error::EmptyPath);
        }
        self.files.push(record);
        Ok(())
    }

    /// Drain an iterator's full result set, forcing its load.
    pub fn add_files(&mut self, iterator: &mut FileIterator) -> Result<()> {
        for record in iterator.get_files()? {
            self.add_file(record)?;
        }
        Ok(())
    }

    /// Number of records pending serialization.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Serialize the pending records to the destination path.
    ///
    /// One whole-document write; there are no incremental appends. Write
    /// failures (permissions, missing parent directory) surface as
    /// [`Error::IoWrite`]; a partial write is possible but never silent.
    pub fn save(&self) -> Result<()> {
        let doc = CatalogueDoc {
            files: self.files.clone(),
        };
        let json = serde_json::to_string_pretty(&doc).map_err(|e| Error::IoWrite {
            path: self.output_path.clone(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        })?;

        std::fs::write(&self.output_path, json).map_err(|e| Error::IoWrite {
            path: self.output_path.clone(),
            source: e,
        })?;

        info!(
            count = self.files.len(),
            path = %self.output_path.display(),
            "saved catalogue"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn record(path: &str, size: u64, modified: f64, extension: &str) -> FileRecord {
        FileRecord {
            path: PathBuf::from(path),
            size,
            modified,
            extension: extension.to_string(),
        }
    }

    #[test]
    fn test_save_and_load_preserve_order_and_fields() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("catalogue.json");

        let mut builder = CatalogueBuilder::new(&out);
        builder.add_file(record("/docs/z.md", 3, 30.5, ".md")).unwrap();
        builder.add_file(record("/docs/a.txt", 1, 10.0, ".txt")).unwrap();
        builder.save().unwrap();

        let records = load_catalogue(&out).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].path, PathBuf::from("/docs/z.md"));
        assert_eq!(records[0].modified, 30.5);
        assert_eq!(records[1].extension, ".txt");
    }

    #[test]
    fn test_load_does_not_revalidate_paths() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("catalogue.json");
        fs::write(
            &out,
            r#"{"files": [{"path": "/long/gone/file.md", "size": 9, "modified": 1.0, "extension": ".md"}]}"#,
        )
        .unwrap();

        let records = load_catalogue(&out).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].size, 9);
    }

    #[test]
    fn test_empty_files_array_is_valid() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("catalogue.json");
        fs::write(&out, r#"{"files": []}"#).unwrap();
        assert!(load_catalogue(&out).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("catalogue.json");
        fs::write(&out, "{broken").unwrap();
        assert!(matches!(
            load_catalogue(&out),
            Err(Error::MalformedCatalogue { .. })
        ));
    }

    #[test]
    fn test_missing_fields_are_malformed() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("catalogue.json");
        fs::write(&out, r#"{"files": [{"path": "/a.md"}]}"#).unwrap();
        assert!(matches!(
            load_catalogue(&out),
            Err(Error::MalformedCatalogue { .. })
        ));
    }

    #[test]
    fn test_string_entries_are_malformed() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("catalogue.json");
        fs::write(&out, r#"{"files": ["/a.md"]}"#).unwrap();
        assert!(matches!(
            load_catalogue(&out),
            Err(Error::MalformedCatalogue { .. })
        ));
    }

    #[test]
    fn test_missing_catalogue_is_not_found() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(
            load_catalogue(&tmp.path().join("absent.json")),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_add_file_rejects_empty_path() {
        let mut builder = CatalogueBuilder::new("/tmp/out.json");
        let err = builder.add_file(record("", 1, 1.0, "")).unwrap_err();
        assert!(matches!(err, Error::EmptyPath));
    }

    #[test]
    fn test_save_into_missing_parent_is_io_write() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("no_such_dir").join("catalogue.json");
        let builder = CatalogueBuilder::new(&out);
        assert!(matches!(builder.save(), Err(Error::IoWrite { .. })));
    }
}
