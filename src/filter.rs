//! Predicate filters over [`FileRecord`]s.
//!
//! Filters are pure, stateless predicates behind a single capability,
//! [`FileFilter::matches`]. The composite filter AND-combines an ordered
//! list of children, so the whole filter chain for a run is one trait
//! object built once by [`build_filter`].

use globset::{GlobBuilder, GlobMatcher};
use regex::Regex;

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::record::FileRecord;

/// Capability shared by every filter variant.
pub trait FileFilter {
    fn matches(&self, record: &FileRecord) -> bool;
}

/// Accepts records whose extension is in an allowed set.
///
/// Extensions are normalized at construction: lower-cased, leading dot
/// added when missing.
pub struct ExtensionFilter {
    extensions: Vec<String>,
}

impl ExtensionFilter {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions = extensions
            .into_iter()
            .map(|ext| {
                let ext = ext.as_ref().to_lowercase();
                if ext.starts_with('.') {
                    ext
                } else {
                    format!(".{ext}")
                }
            })
            .collect();
        ExtensionFilter { extensions }
    }
}

impl FileFilter for ExtensionFilter {
    fn matches(&self, record: &FileRecord) -> bool {
        self.extensions.iter().any(|ext| *ext == record.extension)
    }
}

#[derive(Debug)]
enum PatternMatcher {
    Glob(GlobMatcher),
    Regex(Regex),
}

/// Matches a record's display name against a glob or regular expression.
///
/// The expression is compiled once here; a malformed pattern fails the
/// whole filter build rather than the first match.
#[derive(Debug)]
pub struct PatternFilter {
    matcher: PatternMatcher,
}

impl PatternFilter {
    /// Glob mode: `*` matches any run of characters except separators,
    /// `?` one character, `[...]` a character class.
    pub fn glob(pattern: &str) -> Result<Self> {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|e| Error::InvalidPattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })?;
        Ok(PatternFilter {
            matcher: PatternMatcher::Glob(glob.compile_matcher()),
        })
    }

    /// Regex mode: unanchored search over the display name.
    pub fn regex(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|e| Error::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        Ok(PatternFilter {
            matcher: PatternMatcher::Regex(regex),
        })
    }
}

impl FileFilter for PatternFilter {
    fn matches(&self, record: &FileRecord) -> bool {
        let name = record.name();
        match &self.matcher {
            PatternMatcher::Glob(glob) => glob.is_match(&name),
            PatternMatcher::Regex(regex) => regex.is_match(&name),
        }
    }
}

/// Inclusive size bounds in bytes; an absent bound is unconstrained.
///
/// min > max is accepted and matches nothing, keeping construction total.
pub struct SizeFilter {
    min_size: Option<u64>,
    max_size: Option<u64>,
}

impl SizeFilter {
    pub fn new(min_size: Option<u64>, max_size: Option<u64>) -> Self {
        SizeFilter { min_size, max_size }
    }
}

impl FileFilter for SizeFilter {
    fn matches(&self, record: &FileRecord) -> bool {
        if let Some(min) = self.min_size {
            if record.size < min {
                return false;
            }
        }
        if let Some(max) = self.max_size {
            if record.size > max {
                return false;
            }
        }
        true
    }
}

/// Inclusive modification-time bounds, seconds since the epoch.
pub struct DateFilter {
    min_date: Option<f64>,
    max_date: Option<f64>,
}

impl DateFilter {
    pub fn new(min_date: Option<f64>, max_date: Option<f64>) -> Self {
        DateFilter { min_date, max_date }
    }
}

impl FileFilter for DateFilter {
    fn matches(&self, record: &FileRecord) -> bool {
        if let Some(min) = self.min_date {
            if record.modified < min {
                return false;
            }
        }
        if let Some(max) = self.max_date {
            if record.modified > max {
                return false;
            }
        }
        true
    }
}

/// Logical AND over an ordered list of child filters.
///
/// An empty list matches every record.
pub struct CompositeFilter {
    filters: Vec<Box<dyn FileFilter>>,
}

impl CompositeFilter {
    pub fn new(filters: Vec<Box<dyn FileFilter>>) -> Self {
        CompositeFilter { filters }
    }
}

impl FileFilter for CompositeFilter {
    fn matches(&self, record: &FileRecord) -> bool {
        self.filters.iter().all(|f| f.matches(record))
    }
}

/// Build the composite filter implied by the settings.
///
/// Sub-filters are added in a fixed order (extension, pattern, size, date)
/// so filter construction is reproducible. Settings with no filtering
/// options produce an empty composite that matches everything.
pub fn build_filter(settings: &Settings) -> Result<CompositeFilter> {
    let mut filters: Vec<Box<dyn FileFilter>> = Vec::new();

    if let Some(extensions) = &settings.extensions {
        if !extensions.is_empty() {
            filters.push(Box::new(ExtensionFilter::new(extensions)));
        }
    }

    if let Some(pattern) = &settings.pattern {
        let filter = if settings.use_regex {
            PatternFilter::regex(pattern)?
        } else {
            PatternFilter::glob(pattern)?
        };
        filters.push(Box::new(filter));
    }

    if settings.min_size.is_some() || settings.max_size.is_some() {
        filters.push(Box::new(SizeFilter::new(settings.min_size, settings.max_size)));
    }

    if settings.min_date.is_some() || settings.max_date.is_some() {
        filters.push(Box::new(DateFilter::new(settings.min_date, settings.max_date)));
    }

    Ok(CompositeFilter::new(filters))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn record(name: &str, size: u64, modified: f64) -> FileRecord {
        let path = PathBuf::from(format!("/docs/{name}"));
        FileRecord {
            extension: path
                .extension()
                .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
                .unwrap_or_default(),
            path,
            size,
            modified,
        }
    }

    #[test]
    fn test_extension_filter_normalizes() {
        let filter = ExtensionFilter::new(["MD", ".Txt"]);
        assert!(filter.matches(&record("a.md", 1, 0.0)));
        assert!(filter.matches(&record("b.txt", 1, 0.0)));
        assert!(!filter.matches(&record("c.rs", 1, 0.0)));
        assert!(!filter.matches(&record("no_extension", 1, 0.0)));
    }

    #[test]
    fn test_glob_pattern_semantics() {
        let filter = PatternFilter::glob("*.md").unwrap();
        assert!(filter.matches(&record("notes.md", 1, 0.0)));
        assert!(!filter.matches(&record("notes.txt", 1, 0.0)));

        let single = PatternFilter::glob("a?.md").unwrap();
        assert!(single.matches(&record("a1.md", 1, 0.0)));
        assert!(!single.matches(&record("a12.md", 1, 0.0)));

        let class = PatternFilter::glob("[ab].md").unwrap();
        assert!(class.matches(&record("a.md", 1, 0.0)));
        assert!(!class.matches(&record("c.md", 1, 0.0)));
    }

    #[test]
    fn test_regex_pattern_is_unanchored() {
        let filter = PatternFilter::regex(r"\d{4}").unwrap();
        assert!(filter.matches(&record("report-2024.md", 1, 0.0)));
        assert!(!filter.matches(&record("report.md", 1, 0.0)));
    }

    #[test]
    fn test_malformed_regex_fails_at_construction() {
        let err = PatternFilter::regex("[unclosed").unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { .. }));
    }

    #[test]
    fn test_malformed_glob_fails_at_construction() {
        let err = PatternFilter::glob("a{b").unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { .. }));
    }

    #[test]
    fn test_size_bounds_inclusive() {
        let filter = SizeFilter::new(Some(10), Some(20));
        assert!(filter.matches(&record("a.md", 10, 0.0)));
        assert!(filter.matches(&record("a.md", 20, 0.0)));
        assert!(!filter.matches(&record("a.md", 9, 0.0)));
        assert!(!filter.matches(&record("a.md", 21, 0.0)));
    }

    #[test]
    fn test_inverted_size_bounds_match_nothing() {
        let filter = SizeFilter::new(Some(100), Some(50));
        for size in [0, 50, 75, 100, 1000] {
            assert!(!filter.matches(&record("a.md", size, 0.0)));
        }
    }

    #[test]
    fn test_date_bounds() {
        let filter = DateFilter::new(Some(100.0), None);
        assert!(filter.matches(&record("a.md", 1, 100.0)));
        assert!(filter.matches(&record("a.md", 1, 500.0)));
        assert!(!filter.matches(&record("a.md", 1, 99.9)));
    }

    #[test]
    fn test_empty_composite_matches_everything() {
        let composite = CompositeFilter::new(Vec::new());
        assert!(composite.matches(&record("anything.xyz", 0, 0.0)));
    }

    #[test]
    fn test_composite_is_logical_and() {
        let composite = CompositeFilter::new(vec![
            Box::new(PatternFilter::glob("*.md").unwrap()),
            Box::new(SizeFilter::new(Some(10), None)),
        ]);
        assert!(composite.matches(&record("a.md", 50, 0.0)));
        assert!(!composite.matches(&record("a.md", 5, 0.0)));
        assert!(!composite.matches(&record("a.txt", 50, 0.0)));
    }

    #[test]
    fn test_build_filter_with_no_options_matches_all() {
        let settings = Settings::default();
        let filter = build_filter(&settings).unwrap();
        assert!(filter.matches(&record("a.bin", 12345, 99.0)));
    }

    #[test]
    fn test_build_filter_propagates_bad_pattern() {
        let settings = Settings {
            pattern: Some("[unclosed".to_string()),
            use_regex: true,
            ..Settings::default()
        };
        assert!(matches!(
            build_filter(&settings),
            Err(Error::InvalidPattern { .. })
        ));
    }
}
