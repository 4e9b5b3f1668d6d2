//! Configuration loading and merging.
//!
//! Settings come from three sources, merged with increasing precedence:
//!
//! 1. Global config file (`~/.docindexer/config.json`)
//! 2. Local config file (`./config.json`)
//! 3. Command-line arguments
//!
//! Merging happens on raw JSON maps so a layer only overrides the keys it
//! actually sets; the merged map is then deserialized into one immutable
//! [`Settings`] snapshot, which is the only thing the discovery engine ever
//! sees. Unreadable or unparsable config files are skipped with a warning,
//! never fatal.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Fully resolved, immutable configuration snapshot consumed by the core.
///
/// All keys are optional; `recursive` alone defaults to true. The three
/// source keys (`catalogue`, `file_name`, `source_folder`) are expected to
/// be mutually exclusive by the time a snapshot reaches the engine; the
/// schema validator enforces that upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Folder to scan; current directory when unset.
    pub source_folder: Option<PathBuf>,
    /// Catalogue document to replay instead of touching the filesystem.
    pub catalogue: Option<PathBuf>,
    /// Single file to discover.
    pub file_name: Option<PathBuf>,

    /// Display-name pattern (glob unless `use_regex`).
    pub pattern: Option<String>,
    pub use_regex: bool,
    /// Accepted extensions; unset means no extension filtering.
    pub extensions: Option<Vec<String>>,
    pub min_size: Option<u64>,
    pub max_size: Option<u64>,
    pub min_date: Option<f64>,
    pub max_date: Option<f64>,

    /// One of `name`, `date`, `size`; unset preserves discovery order.
    pub sort_by: Option<String>,
    pub sort_desc: bool,
    /// Overrides `sort_by`/`sort_desc` with a per-load shuffle.
    pub random: bool,

    pub recursive: bool,
    pub max_depth: Option<usize>,
    pub include_hidden: bool,
    pub limit: Option<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            source_folder: None,
            catalogue: None,
            file_name: None,
            pattern: None,
            use_regex: false,
            extensions: None,
            min_size: None,
            max_size: None,
            min_date: None,
            max_date: None,
            sort_by: None,
            sort_desc: false,
            random: false,
            recursive: true,
            max_depth: None,
            include_hidden: false,
            limit: None,
        }
    }
}

/// Layered configuration manager.
pub struct Config {
    global_path: PathBuf,
    local_path: PathBuf,
    global: Map<String, Value>,
    local: Map<String, Value>,
    cli: Map<String, Value>,
}

impl Config {
    pub fn new() -> Self {
        Config::with_paths(global_config_path(), PathBuf::from("./config.json"))
    }

    pub fn with_paths(global_path: PathBuf, local_path: PathBuf) -> Self {
        Config {
            global_path,
            local_path,
            global: Map::new(),
            local: Map::new(),
            cli: Map::new(),
        }
    }

    /// Load both config files. Missing or broken files leave their layer
    /// empty.
    pub fn load(&mut self) {
        self.global = read_layer(&self.global_path);
        self.local = read_layer(&self.local_path);
    }

    /// Overlay command-line arguments (highest precedence). Null values are
    /// dropped so unset flags never mask file-level settings.
    pub fn set_cli_args(&mut self, args: Map<String, Value>) {
        self.cli = args.into_iter().filter(|(_, v)| !v.is_null()).collect();
    }

    pub fn global_layer(&self) -> &Map<String, Value> {
        &self.global
    }

    pub fn local_layer(&self) -> &Map<String, Value> {
        &self.local
    }

    /// The merged configuration as a raw JSON map.
    pub fn merged(&self) -> Map<String, Value> {
        let mut merged = self.global.clone();
        for (key, value) in &self.local {
            merged.insert(key.clone(), value.clone());
        }
        for (key, value) in &self.cli {
            merged.insert(key.clone(), value.clone());
        }
        merged
    }

    /// Deserialize the merged map into the immutable snapshot the engine
    /// consumes. Unknown keys are ignored.
    pub fn effective(&self) -> Result<Settings> {
        serde_json::from_value(Value::Object(self.merged()))
            .context("invalid configuration values")
    }

    /// Persist the effective configuration as the local config file.
    pub fn create_local_config(&self) -> Result<()> {
        write_layer(&self.local_path, &self.merged())
    }

    /// Persist the effective configuration as the global config file,
    /// creating its directory if needed.
    pub fn create_global_config(&self) -> Result<()> {
        if let Some(parent) = self.global_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        write_layer(&self.global_path, &self.merged())
    }

    pub fn local_path(&self) -> &Path {
        &self.local_path
    }

    pub fn global_path(&self) -> &Path {
        &self.global_path
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

/// `~/.docindexer/config.json`, or a relative fallback when the home
/// directory cannot be determined.
pub fn global_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".docindexer")
        .join("config.json")
}

fn read_layer(path: &Path) -> Map<String, Value> {
    if !path.exists() {
        return Map::new();
    }
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read config file");
            return Map::new();
        }
    };
    match serde_json::from_str::<Value>(&content) {
        Ok(Value::Object(map)) => {
            debug!(path = %path.display(), "loaded config layer");
            map
        }
        Ok(_) => {
            warn!(path = %path.display(), "config file is not a JSON object");
            Map::new()
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to parse config file");
            Map::new()
        }
    }
}

fn write_layer(path: &Path, map: &Map<String, Value>) -> Result<()> {
    let json = serde_json::to_string_pretty(&Value::Object(map.clone()))?;
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    debug!(path = %path.display(), "wrote config file");
    Ok(())
}
