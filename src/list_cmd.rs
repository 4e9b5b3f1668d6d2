//! The `docidx list` command: discover files and print them as a table.

use anyhow::Result;

use crate::config::Settings;
use crate::iterator::FileIterator;

/// Run the list command: load the iterator and print one row per record.
pub fn run_list(settings: Settings) -> Result<()> {
    let mut iterator = FileIterator::new(settings);
    let count = iterator.count()?;

    if count == 0 {
        println!("No files found matching the criteria.");
        return Ok(());
    }

    println!("Found {} file{}", count, if count == 1 { "" } else { "s" });
    println!(
        "{:<32} {:>10}  {:<19}  {}",
        "NAME", "SIZE", "MODIFIED", "DIRECTORY"
    );
    println!("{}", "-".repeat(88));

    while let Some(record) = iterator.next_file()? {
        let directory = record
            .path
            .parent()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        println!(
            "{:<32} {:>10}  {:<19}  {}",
            record.name(),
            format_bytes(record.size),
            format_timestamp(record.modified),
            directory
        );
    }

    Ok(())
}

/// Format a byte count as a human-readable string.
pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else if bytes < 1024 * 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.2} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}

/// Format an epoch-seconds timestamp as `YYYY-MM-DD HH:MM:SS`.
pub fn format_timestamp(seconds: f64) -> String {
    chrono::DateTime::from_timestamp(seconds as i64, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| seconds.to_string())
}
