//! The `docidx config` command: display configuration layers.

use anyhow::{bail, Result};
use serde_json::{Map, Value};

use crate::config::Config;

/// Print the requested configuration source(s) as pretty JSON.
pub fn run_config(config: &mut Config, source: &str) -> Result<()> {
    config.load();

    match source {
        "global" => print_layer(
            &format!("Global configuration ({})", config.global_path().display()),
            config.global_layer(),
        )?,
        "local" => print_layer(
            &format!("Local configuration ({})", config.local_path().display()),
            config.local_layer(),
        )?,
        "effective" => print_layer("Effective configuration", &config.merged())?,
        "all" => {
            print_layer(
                &format!("Global configuration ({})", config.global_path().display()),
                config.global_layer(),
            )?;
            print_layer(
                &format!("Local configuration ({})", config.local_path().display()),
                config.local_layer(),
            )?;
            print_layer("Effective configuration", &config.merged())?;
        }
        other => bail!("unknown configuration source: '{other}' (expected all, global, local, or effective)"),
    }

    Ok(())
}

fn print_layer(title: &str, layer: &Map<String, Value>) -> Result<()> {
    println!("{title}");
    if layer.is_empty() {
        println!("  (empty)");
    } else {
        let json = serde_json::to_string_pretty(&Value::Object(layer.clone()))?;
        for line in json.lines() {
            println!("  {line}");
        }
    }
    println!();
    Ok(())
}
