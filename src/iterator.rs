//! The discovery pipeline orchestrator.
//!
//! [`FileIterator`] ties the engine together: it selects a discovery
//! strategy from its settings snapshot, applies the composite filter and
//! the resolved sort, truncates to the configured limit, and caches the
//! result as a materialized list. The lifecycle is explicit: construction
//! does no I/O; the first access (or [`FileIterator::load`]) materializes
//! the list once; iteration then consumes a cursor that [`reset`] rewinds
//! without rediscovering. Only [`reload`] runs discovery again, which is
//! also what keeps a random-sorted order stable across replays.
//!
//! [`reset`]: FileIterator::reset
//! [`reload`]: FileIterator::reload

use crate::config::Settings;
use crate::discover;
use crate::error::Result;
use crate::filter::{self, FileFilter};
use crate::record::FileRecord;
use crate::sort;

/// Lazy, resumable iterator over discovered files.
pub struct FileIterator {
    settings: Settings,
    files: Vec<FileRecord>,
    cursor: usize,
    loaded: bool,
}

impl FileIterator {
    /// Construct from a resolved settings snapshot. No I/O happens here.
    pub fn new(settings: Settings) -> Self {
        FileIterator {
            settings,
            files: Vec::new(),
            cursor: 0,
            loaded: false,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Discover, filter, sort, and limit. Idempotent: a loaded iterator is
    /// left untouched; use [`FileIterator::reload`] to force rediscovery.
    ///
    /// Filter-construction and sort-resolution errors surface here, before
    /// any record is yielded, and a failed load leaves the iterator
    /// unloaded so a corrected retry can succeed.
    pub fn load(&mut self) -> Result<()> {
        if self.loaded {
            return Ok(());
        }

        // Resolve filter and sort before discovery so a misconfigured
        // iterator fails without walking anything.
        let filter = filter::build_filter(&self.settings)?;
        let mode = sort::resolve_sort(&self.settings)?;

        let mut files = discover::discover(&self.settings)?;
        files.retain(|record| filter.matches(record));
        sort::apply_sort(&mut files, mode);
        if let Some(limit) = self.settings.limit {
            files.truncate(limit);
        }

        self.files = files;
        self.cursor = 0;
        self.loaded = true;
        Ok(())
    }

    /// Discard the materialized list and run discovery again.
    pub fn reload(&mut self) -> Result<()> {
        self.loaded = false;
        self.files.clear();
        self.cursor = 0;
        self.load()
    }

    /// Pull the next record, loading first if needed. `Ok(None)` signals
    /// exhaustion.
    pub fn next_file(&mut self) -> Result<Option<FileRecord>> {
        self.load()?;
        let record = self.files.get(self.cursor).cloned();
        if record.is_some() {
            self.cursor += 1;
        }
        Ok(record)
    }

    /// Rewind the cursor to the start of the materialized list.
    ///
    /// This replays the same list (same records, same order) without
    /// rerunning discovery, so even a random-sorted sequence repeats.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// The full materialized list, as a defensive copy.
    pub fn get_files(&mut self) -> Result<Vec<FileRecord>> {
        self.load()?;
        Ok(self.files.clone())
    }

    /// Number of records in the materialized list.
    pub fn count(&mut self) -> Result<usize> {
        self.load()?;
        Ok(self.files.len())
    }
}
