//! Core record type flowing through the discovery pipeline.
//!
//! A [`FileRecord`] is an immutable metadata snapshot taken once at discovery
//! time: path, size, modification time, and extension. Records are plain
//! value copies, safe to clone and share; nothing re-derives a record from a
//! stale path after construction.
//!
//! The serde field names are the catalogue document contract: a serialized
//! record is exactly one entry of the `files` array.

use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Immutable metadata snapshot for one file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Absolute path to the file.
    pub path: PathBuf,
    /// Size in bytes.
    pub size: u64,
    /// Last-modified time, seconds since the Unix epoch.
    pub modified: f64,
    /// Lower-cased extension including the leading dot, empty if none.
    pub extension: String,
}

impl FileRecord {
    /// Build a record from a path that must exist and be a regular file.
    ///
    /// Fails with [`Error::NotFound`](crate::error::Error::NotFound) if the
    /// path does not resolve to a regular file, and with
    /// [`Error::Access`](crate::error::Error::Access) if its metadata cannot
    /// be read.
    pub fn from_path(path: &Path) -> crate::error::Result<Self> {
        let metadata = std::fs::metadata(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => crate::error::Error::NotFound(path.to_path_buf()),
            _ => crate::error::Error::Access {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        if !metadata.is_file() {
            return Err(crate::error::Error::NotFound(path.to_path_buf()));
        }

        let modified = metadata
            .modified()
            .map_err(|e| crate::error::Error::Access {
                path: path.to_path_buf(),
                source: e,
            })?
            .duration_since(std::time::SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs_f64();

        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().unwrap_or_default().join(path)
        };

        Ok(FileRecord {
            extension: extension_of(&absolute),
            size: metadata.len(),
            modified,
            path: absolute,
        })
    }

    /// The path's final component.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    /// The absolute path as a string.
    pub fn absolute_path(&self) -> String {
        self.path.to_string_lossy().to_string()
    }
}

/// Lower-cased extension with leading dot, or empty for extension-less names.
fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}
