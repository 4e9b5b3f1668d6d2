//! Discovery strategies: producers of the raw, unfiltered record sequence.
//!
//! Three interchangeable sources, selected by priority: a catalogue document
//! (replayed as-is), a single named file, or a directory walk rooted at the
//! configured source folder. The schema validator keeps the three mutually
//! exclusive upstream; if more than one slips through, the stated priority
//! decides.

use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use crate::catalogue;
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::record::FileRecord;

/// Run the discovery strategy selected by the settings.
///
/// Priority: `catalogue` > `file_name` > `source_folder` (defaulting to the
/// current directory). The returned order is the `none` sort order.
pub fn discover(settings: &Settings) -> Result<Vec<FileRecord>> {
    if let Some(path) = &settings.catalogue {
        return catalogue::load_catalogue(path);
    }

    if let Some(path) = &settings.file_name {
        return Ok(vec![FileRecord::from_path(path)?]);
    }

    let root = settings
        .source_folder
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    scan_directory(
        &root,
        settings.recursive,
        settings.max_depth,
        settings.include_hidden,
    )
}

/// Depth-first walk of `root`, yielding a record per regular file.
///
/// With `recursive` disabled only the top-level entries are considered;
/// otherwise descent continues until `max_depth` (0 = the starting
/// directory's direct children). Hidden entries, both files and the
/// directories used for further descent, are skipped unless `include_hidden`.
/// Unreadable subdirectories are skipped with a warning. Directory symlinks
/// are not followed, which also rules out traversal cycles.
pub fn scan_directory(
    root: &Path,
    recursive: bool,
    max_depth: Option<usize>,
    include_hidden: bool,
) -> Result<Vec<FileRecord>> {
    if !root.is_dir() {
        return Err(Error::NotFound(root.to_path_buf()));
    }

    // walkdir depth 1 is the starting directory's direct children.
    let walk_depth = if !recursive {
        1
    } else {
        max_depth.map(|d| d.saturating_add(1)).unwrap_or(usize::MAX)
    };

    let walker = WalkDir::new(root)
        .follow_links(false)
        .min_depth(1)
        .max_depth(walk_depth)
        .into_iter()
        .filter_entry(move |entry| include_hidden || !is_hidden(entry.file_name()));

    let mut records = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        match FileRecord::from_path(entry.path()) {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!(path = %entry.path().display(), error = %e, "skipping unreadable file");
            }
        }
    }
    Ok(records)
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}
