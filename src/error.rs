//! Error taxonomy for the discovery engine.
//!
//! Filter-construction and sort-resolution failures surface when a
//! [`FileIterator`](crate::iterator::FileIterator) first loads, before any
//! record is yielded. Per-entry failures during a directory walk are
//! recovered locally and never appear here.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A configured path does not exist or is not a regular file.
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// File metadata could not be read due to permissions.
    #[error("cannot read metadata for {path}: {source}")]
    Access {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A glob or regular expression failed to compile at filter build time.
    #[error("invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// The configured sort key is not one of `name`, `date`, `size`.
    #[error("invalid sort key '{0}' (expected name, date, or size)")]
    InvalidSortKey(String),

    /// The catalogue document is not valid JSON or is missing required fields.
    #[error("malformed catalogue {path}: {message}")]
    MalformedCatalogue { path: PathBuf, message: String },

    /// Writing a catalogue document failed.
    #[error("failed to write catalogue {path}: {source}")]
    IoWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A record with an empty path was handed to the catalogue builder.
    #[error("refusing to catalogue a record with an empty path")]
    EmptyPath,
}

pub type Result<T> = std::result::Result<T, Error>;
