//! The `docidx catalogue` command: persist a discovery run as a catalogue
//! document that later runs can replay with `--catalogue`.

use anyhow::Result;
use std::path::Path;

use crate::catalogue::CatalogueBuilder;
use crate::config::Settings;
use crate::iterator::FileIterator;

/// Run discovery and save the result set to `output`.
///
/// With `dry_run`, reports the would-be record count without writing.
pub fn run_catalogue(settings: Settings, output: &Path, dry_run: bool) -> Result<()> {
    let mut iterator = FileIterator::new(settings);
    let count = iterator.count()?;

    if dry_run {
        println!(
            "Dry run: would save {} record{} to {}",
            count,
            if count == 1 { "" } else { "s" },
            output.display()
        );
        return Ok(());
    }

    let mut builder = CatalogueBuilder::new(output);
    builder.add_files(&mut iterator)?;
    builder.save()?;

    println!(
        "Saved catalogue with {} record{} to {}",
        count,
        if count == 1 { "" } else { "s" },
        output.display()
    );
    Ok(())
}
