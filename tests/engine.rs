//! Library-level integration tests for the discovery engine: the full
//! discover → filter → sort → limit pipeline, catalogue round-trips, and
//! the iterator replay contract.

use std::fs;
use std::path::Path;

use filetime::{set_file_mtime, FileTime};
use tempfile::TempDir;

use doc_indexer::catalogue::{load_catalogue, CatalogueBuilder};
use doc_indexer::config::Settings;
use doc_indexer::error::Error;
use doc_indexer::iterator::FileIterator;

fn write_sized(path: &Path, bytes: usize) {
    fs::write(path, "x".repeat(bytes)).unwrap();
}

/// The /docs fixture from the engine's acceptance scenarios: a.md (100 B),
/// b.txt (50 B), .hidden.md (10 B).
fn docs_fixture() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write_sized(&tmp.path().join("a.md"), 100);
    write_sized(&tmp.path().join("b.txt"), 50);
    write_sized(&tmp.path().join(".hidden.md"), 10);
    tmp
}

fn folder_settings(root: &Path) -> Settings {
    Settings {
        source_folder: Some(root.to_path_buf()),
        ..Settings::default()
    }
}

fn names(records: &[doc_indexer::record::FileRecord]) -> Vec<String> {
    records.iter().map(|r| r.name()).collect()
}

#[test]
fn pattern_excludes_hidden_by_default() {
    let tmp = docs_fixture();
    let mut it = FileIterator::new(Settings {
        pattern: Some("*.md".to_string()),
        recursive: false,
        ..folder_settings(tmp.path())
    });
    assert_eq!(names(&it.get_files().unwrap()), ["a.md"]);
}

#[test]
fn include_hidden_with_size_descending() {
    let tmp = docs_fixture();
    let mut it = FileIterator::new(Settings {
        include_hidden: true,
        sort_by: Some("size".to_string()),
        sort_desc: true,
        ..folder_settings(tmp.path())
    });
    assert_eq!(
        names(&it.get_files().unwrap()),
        ["a.md", "b.txt", ".hidden.md"]
    );
}

#[test]
fn min_size_above_everything_yields_empty_without_error() {
    let tmp = docs_fixture();
    let mut it = FileIterator::new(Settings {
        min_size: Some(1_000_000),
        ..folder_settings(tmp.path())
    });
    assert!(it.get_files().unwrap().is_empty());
}

#[test]
fn inverted_size_bounds_match_zero_records() {
    let tmp = docs_fixture();
    let mut it = FileIterator::new(Settings {
        min_size: Some(90),
        max_size: Some(20),
        include_hidden: true,
        ..folder_settings(tmp.path())
    });
    assert_eq!(it.count().unwrap(), 0);
}

#[test]
fn limit_keeps_first_k_of_sorted_order() {
    let tmp = TempDir::new().unwrap();
    for i in 0..10 {
        write_sized(&tmp.path().join(format!("f{i}.md")), (i + 1) * 10);
    }
    let mut it = FileIterator::new(Settings {
        sort_by: Some("size".to_string()),
        sort_desc: true,
        limit: Some(3),
        ..folder_settings(tmp.path())
    });
    let files = it.get_files().unwrap();
    assert_eq!(names(&files), ["f9.md", "f8.md", "f7.md"]);
}

#[test]
fn non_recursive_scan_never_yields_subdirectory_records() {
    let tmp = TempDir::new().unwrap();
    write_sized(&tmp.path().join("top.md"), 10);
    fs::create_dir_all(tmp.path().join("a/b")).unwrap();
    write_sized(&tmp.path().join("a").join("one.md"), 10);
    write_sized(&tmp.path().join("a/b").join("two.md"), 10);

    let mut it = FileIterator::new(Settings {
        recursive: false,
        ..folder_settings(tmp.path())
    });
    assert_eq!(names(&it.get_files().unwrap()), ["top.md"]);
}

#[test]
fn date_filter_and_date_sort() {
    let tmp = TempDir::new().unwrap();
    let old = tmp.path().join("old.md");
    let mid = tmp.path().join("mid.md");
    let new = tmp.path().join("new.md");
    for path in [&old, &mid, &new] {
        write_sized(path, 10);
    }
    set_file_mtime(&old, FileTime::from_unix_time(1_000, 0)).unwrap();
    set_file_mtime(&mid, FileTime::from_unix_time(2_000, 0)).unwrap();
    set_file_mtime(&new, FileTime::from_unix_time(3_000, 0)).unwrap();

    let mut it = FileIterator::new(Settings {
        min_date: Some(1_500.0),
        sort_by: Some("date".to_string()),
        sort_desc: true,
        ..folder_settings(tmp.path())
    });
    assert_eq!(names(&it.get_files().unwrap()), ["new.md", "mid.md"]);
}

#[test]
fn catalogue_round_trip_preserves_order_and_fields() {
    let tmp = TempDir::new().unwrap();
    write_sized(&tmp.path().join("gamma.md"), 30);
    write_sized(&tmp.path().join("alpha.md"), 10);
    write_sized(&tmp.path().join("beta.md"), 20);

    let mut source = FileIterator::new(Settings {
        sort_by: Some("size".to_string()),
        sort_desc: true,
        ..folder_settings(tmp.path())
    });
    let original = source.get_files().unwrap();

    let out = tmp.path().join("snapshot.json");
    let mut builder = CatalogueBuilder::new(&out);
    builder.add_files(&mut source).unwrap();
    builder.save().unwrap();

    // Replay with no further filters, sort, or limit.
    let mut replay = FileIterator::new(Settings {
        catalogue: Some(out),
        ..Settings::default()
    });
    let replayed = replay.get_files().unwrap();
    assert_eq!(replayed, original);
}

#[test]
fn catalogue_replay_survives_deleted_files() {
    let tmp = TempDir::new().unwrap();
    let doomed = tmp.path().join("doomed.md");
    write_sized(&doomed, 10);

    let mut source = FileIterator::new(folder_settings(tmp.path()));
    let out = tmp.path().join("snapshot.json");
    let mut builder = CatalogueBuilder::new(&out);
    builder.add_files(&mut source).unwrap();
    builder.save().unwrap();

    fs::remove_file(&doomed).unwrap();

    // The catalogue is a frozen snapshot, not re-validated.
    let records = load_catalogue(&out).unwrap();
    assert_eq!(names(&records), ["doomed.md"]);
}

#[test]
fn empty_catalogue_yields_zero_records_and_immediate_exhaustion() {
    let tmp = TempDir::new().unwrap();
    let cat = tmp.path().join("empty.json");
    fs::write(&cat, r#"{"files": []}"#).unwrap();

    let mut it = FileIterator::new(Settings {
        catalogue: Some(cat),
        ..Settings::default()
    });
    assert_eq!(it.count().unwrap(), 0);
    assert!(it.next_file().unwrap().is_none());
}

#[test]
fn reset_replays_identical_sequence_under_random_sort() {
    let tmp = TempDir::new().unwrap();
    for i in 0..12 {
        write_sized(&tmp.path().join(format!("f{i:02}.md")), 10);
    }

    let mut it = FileIterator::new(Settings {
        random: true,
        ..folder_settings(tmp.path())
    });

    let mut first = Vec::new();
    while let Some(record) = it.next_file().unwrap() {
        first.push(record.name());
    }
    assert_eq!(first.len(), 12);

    it.reset();
    let mut second = Vec::new();
    while let Some(record) = it.next_file().unwrap() {
        second.push(record.name());
    }
    assert_eq!(first, second);
}

#[test]
fn misconfiguration_yields_no_partial_results() {
    let tmp = docs_fixture();
    let mut it = FileIterator::new(Settings {
        pattern: Some("[bad".to_string()),
        use_regex: true,
        ..folder_settings(tmp.path())
    });
    assert!(matches!(it.load(), Err(Error::InvalidPattern { .. })));
    assert!(it.next_file().is_err());
}

#[test]
fn extension_filter_from_settings() {
    let tmp = docs_fixture();
    let mut it = FileIterator::new(Settings {
        extensions: Some(vec!["txt".to_string()]),
        ..folder_settings(tmp.path())
    });
    assert_eq!(names(&it.get_files().unwrap()), ["b.txt"]);
}
