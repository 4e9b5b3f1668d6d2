//! # DocIndexer CLI (`docidx`)
//!
//! The `docidx` binary discovers files under a configured source, filters
//! and orders them, and can persist the result as a reusable catalogue.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `docidx list` | List the files a configuration would process |
//! | `docidx catalogue -o <path>` | Save the discovered file list as a catalogue document |
//! | `docidx config` | Display global / local / effective configuration |
//! | `docidx schema` | Visualize the CLI schema structure |
//!
//! ## Examples
//!
//! ```bash
//! # List markdown files under ./docs, largest first
//! docidx list -s ./docs -p '*.md' --sort-by size --desc
//!
//! # Snapshot a scan for later replay
//! docidx catalogue -s ./docs -o docs.catalogue.json
//!
//! # Replay the snapshot without touching the filesystem
//! docidx list -c docs.catalogue.json
//! ```
//!
//! Options merge with config files (`./config.json`, then
//! `~/.docindexer/config.json`); the command line always wins.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use serde_json::{Map, Value};
use std::path::PathBuf;

use doc_indexer::config::Config;
use doc_indexer::schema::{self, Schema};
use doc_indexer::{catalogue_cmd, config_cmd, list_cmd, schema_cmd};

/// DocIndexer: file discovery, filtering, and cataloguing.
#[derive(Parser)]
#[command(
    name = "docidx",
    about = "Discover, filter, sort, and catalogue files",
    version
)]
struct Cli {
    /// Enable debug logging.
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// List files that would be processed based on configuration.
    List {
        #[command(flatten)]
        discovery: DiscoveryArgs,

        /// Show the effective configuration before listing.
        #[arg(long)]
        show_config: bool,

        /// Write the effective configuration to ./config.json.
        #[arg(long)]
        create_local_config: bool,

        /// Write the effective configuration to ~/.docindexer/config.json.
        #[arg(long)]
        create_global_config: bool,
    },

    /// Save the discovered file list as a catalogue document.
    ///
    /// The catalogue records each file's path, size, modification time, and
    /// extension, in the discovered order. A later run can replay it with
    /// `--catalogue` without touching the filesystem.
    Catalogue {
        /// Destination path for the catalogue document.
        #[arg(short, long)]
        output: PathBuf,

        /// Report what would be written without saving.
        #[arg(long)]
        dry_run: bool,

        #[command(flatten)]
        discovery: DiscoveryArgs,
    },

    /// Display configuration settings.
    Config {
        /// Which configuration source to display: all, global, local, or
        /// effective.
        #[arg(long, default_value = "effective")]
        source: String,
    },

    /// Visualize the CLI schema structure.
    Schema,
}

/// Discovery and filtering options shared by `list` and `catalogue`.
///
/// Only options given on the command line are overlaid onto the config
/// files, so an unset flag never masks a configured value.
#[derive(Args)]
struct DiscoveryArgs {
    /// Folder containing the files to process.
    #[arg(short, long)]
    source_folder: Option<PathBuf>,

    /// Catalogue JSON file to replay instead of scanning.
    #[arg(short, long)]
    catalogue: Option<PathBuf>,

    /// A single file to process.
    #[arg(short = 'n', long)]
    file_name: Option<PathBuf>,

    /// Pattern to match file names (glob by default; quote it).
    #[arg(short, long)]
    pattern: Option<String>,

    /// Treat the pattern as a regular expression.
    #[arg(long = "regex")]
    use_regex: bool,

    /// Accepted file extension (repeatable).
    #[arg(long = "ext")]
    extensions: Vec<String>,

    /// Minimum file size in bytes (inclusive).
    #[arg(long)]
    min_size: Option<u64>,

    /// Maximum file size in bytes (inclusive).
    #[arg(long)]
    max_size: Option<u64>,

    /// Only files modified on or after this date (YYYY-MM-DD).
    #[arg(long)]
    min_date: Option<String>,

    /// Only files modified on or before this date (YYYY-MM-DD).
    #[arg(long)]
    max_date: Option<String>,

    /// Sort files by: name, date, or size.
    #[arg(long, value_parser = ["name", "date", "size"])]
    sort_by: Option<String>,

    /// Sort in descending order.
    #[arg(long = "desc")]
    sort_desc: bool,

    /// Process files in random order.
    #[arg(short, long)]
    random: bool,

    /// Process files in subfolders recursively (default).
    #[arg(short = 'R', long, conflicts_with = "no_recursive")]
    recursive: bool,

    /// Only consider the top-level directory.
    #[arg(long)]
    no_recursive: bool,

    /// Maximum directory depth for recursive search (0 = direct children).
    #[arg(long)]
    max_depth: Option<usize>,

    /// Include hidden files and directories (starting with a dot).
    #[arg(long)]
    include_hidden: bool,

    /// Limit the number of files to be processed.
    #[arg(short, long)]
    limit: Option<usize>,
}

impl DiscoveryArgs {
    /// Collect the options the user actually set into a JSON argument map
    /// for schema validation and config overlay.
    fn to_cli_map(&self) -> Result<Map<String, Value>> {
        let mut map = Map::new();

        if let Some(path) = &self.source_folder {
            map.insert("source_folder".into(), json_path(path));
        }
        if let Some(path) = &self.catalogue {
            map.insert("catalogue".into(), json_path(path));
        }
        if let Some(path) = &self.file_name {
            map.insert("file_name".into(), json_path(path));
        }
        if let Some(pattern) = &self.pattern {
            map.insert("pattern".into(), Value::String(pattern.clone()));
        }
        if self.use_regex {
            map.insert("use_regex".into(), Value::Bool(true));
        }
        if !self.extensions.is_empty() {
            map.insert(
                "extensions".into(),
                Value::Array(
                    self.extensions
                        .iter()
                        .map(|e| Value::String(e.clone()))
                        .collect(),
                ),
            );
        }
        if let Some(size) = self.min_size {
            map.insert("min_size".into(), size.into());
        }
        if let Some(size) = self.max_size {
            map.insert("max_size".into(), size.into());
        }
        if let Some(date) = &self.min_date {
            map.insert("min_date".into(), parse_date(date, false)?.into());
        }
        if let Some(date) = &self.max_date {
            map.insert("max_date".into(), parse_date(date, true)?.into());
        }
        if let Some(key) = &self.sort_by {
            map.insert("sort_by".into(), Value::String(key.clone()));
        }
        if self.sort_desc {
            map.insert("sort_desc".into(), Value::Bool(true));
        }
        if self.random {
            map.insert("random".into(), Value::Bool(true));
        }
        if self.recursive {
            map.insert("recursive".into(), Value::Bool(true));
        }
        if self.no_recursive {
            map.insert("recursive".into(), Value::Bool(false));
        }
        if let Some(depth) = self.max_depth {
            map.insert("max_depth".into(), depth.into());
        }
        if self.include_hidden {
            map.insert("include_hidden".into(), Value::Bool(true));
        }
        if let Some(limit) = self.limit {
            map.insert("limit".into(), limit.into());
        }

        Ok(map)
    }
}

fn json_path(path: &std::path::Path) -> Value {
    Value::String(path.to_string_lossy().to_string())
}

/// Parse `YYYY-MM-DD` into epoch seconds; the upper bound of a range maps
/// to the end of that day so the day itself stays included.
fn parse_date(input: &str, end_of_day: bool) -> Result<f64> {
    let date = chrono::NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|e| anyhow::anyhow!("invalid date '{input}' (expected YYYY-MM-DD): {e}"))?;
    let time = if end_of_day {
        chrono::NaiveTime::from_hms_opt(23, 59, 59).unwrap()
    } else {
        chrono::NaiveTime::from_hms_opt(0, 0, 0).unwrap()
    };
    Ok(date.and_time(time).and_utc().timestamp() as f64)
}

fn init_tracing(debug: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if debug {
            tracing_subscriber::EnvFilter::new("debug")
        } else {
            tracing_subscriber::EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let schema = Schema::embedded()?;
    let mut config = Config::new();

    match cli.command {
        Commands::List {
            discovery,
            show_config,
            create_local_config,
            create_global_config,
        } => {
            let args = discovery.to_cli_map()?;
            let settings = schema::resolve_settings(&schema, "list", args, &mut config)?;

            if create_local_config {
                config.create_local_config()?;
                println!("Created local configuration file: {}", config.local_path().display());
            }
            if create_global_config {
                config.create_global_config()?;
                println!("Created global configuration file: {}", config.global_path().display());
            }
            if show_config {
                println!("Effective configuration:");
                println!("{}", serde_json::to_string_pretty(&Value::Object(config.merged()))?);
            }

            list_cmd::run_list(settings)?;
        }
        Commands::Catalogue {
            output,
            dry_run,
            discovery,
        } => {
            let mut args = discovery.to_cli_map()?;
            args.insert("output".into(), json_path(&output));
            if dry_run {
                args.insert("dry_run".into(), Value::Bool(true));
            }
            let settings = schema::resolve_settings(&schema, "catalogue", args, &mut config)?;
            catalogue_cmd::run_catalogue(settings, &output, dry_run)?;
        }
        Commands::Config { source } => {
            config_cmd::run_config(&mut config, &source)?;
        }
        Commands::Schema => {
            schema_cmd::run_schema(&schema)?;
        }
    }

    Ok(())
}
