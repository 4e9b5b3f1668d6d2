//! Sort key resolution and ordering of discovered records.
//!
//! Two configuration inputs (a sort-key name and a descending flag) plus a
//! random override resolve into one [`SortMode`] per run. Ordering is
//! applied once, at load time; the random permutation in particular is
//! generated exactly once per discovery, so replaying a loaded iterator
//! preserves it.

use std::cmp::Ordering;

use rand::seq::SliceRandom;

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::record::FileRecord;

/// The eight resolved ordering modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    NameAsc,
    NameDesc,
    DateAsc,
    DateDesc,
    SizeAsc,
    SizeDesc,
    Random,
    None,
}

/// Resolve a sort mode from the settings.
///
/// The random flag wins over any key/direction combination; a configured
/// key wins over absence. Unrecognized keys fail with
/// [`Error::InvalidSortKey`].
pub fn resolve_sort(settings: &Settings) -> Result<SortMode> {
    if settings.random {
        return Ok(SortMode::Random);
    }

    let key = match &settings.sort_by {
        Some(key) => key.to_lowercase(),
        None => return Ok(SortMode::None),
    };

    let mode = match key.as_str() {
        "name" => {
            if settings.sort_desc {
                SortMode::NameDesc
            } else {
                SortMode::NameAsc
            }
        }
        "date" => {
            if settings.sort_desc {
                SortMode::DateDesc
            } else {
                SortMode::DateAsc
            }
        }
        "size" => {
            if settings.sort_desc {
                SortMode::SizeDesc
            } else {
                SortMode::SizeAsc
            }
        }
        _ => return Err(Error::InvalidSortKey(key)),
    };
    Ok(mode)
}

/// Order records in place according to the resolved mode.
///
/// Name comparisons break ties on the full path; date and size break ties
/// on the display name ascending, regardless of direction, so every
/// non-random ordering is deterministic. `None` preserves discovery order.
pub fn apply_sort(records: &mut [FileRecord], mode: SortMode) {
    match mode {
        SortMode::NameAsc => records.sort_by(compare_name),
        SortMode::NameDesc => records.sort_by(|a, b| compare_name(b, a)),
        SortMode::DateAsc => records.sort_by(|a, b| compare_keyed(a, b, false, |r| r.modified)),
        SortMode::DateDesc => records.sort_by(|a, b| compare_keyed(a, b, true, |r| r.modified)),
        SortMode::SizeAsc => records.sort_by(|a, b| compare_keyed(a, b, false, |r| r.size as f64)),
        SortMode::SizeDesc => records.sort_by(|a, b| compare_keyed(a, b, true, |r| r.size as f64)),
        SortMode::Random => {
            let mut rng = rand::rng();
            records.shuffle(&mut rng);
        }
        SortMode::None => {}
    }
}

fn compare_name(a: &FileRecord, b: &FileRecord) -> Ordering {
    a.name().cmp(&b.name()).then_with(|| a.path.cmp(&b.path))
}

fn compare_keyed<F>(a: &FileRecord, b: &FileRecord, desc: bool, key: F) -> Ordering
where
    F: Fn(&FileRecord) -> f64,
{
    // Only the primary key reverses; the name tie-break stays ascending.
    let primary = if desc {
        key(b).total_cmp(&key(a))
    } else {
        key(a).total_cmp(&key(b))
    };
    primary.then_with(|| compare_name(a, b))
}
