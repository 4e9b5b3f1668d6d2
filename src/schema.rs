//! Schema-driven validation of command options.
//!
//! The CLI schema (embedded at build time from `schema/cli_schema.json`)
//! declares every command, its options, their types, defaults, required
//! flags, dependency (`requires`) and mutual-exclusion relationships, and
//! the configuration sources with their precedence. Validation happens on
//! the raw JSON argument map before a [`Settings`](crate::config::Settings)
//! snapshot is built, so the engine only ever sees vetted configuration.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Embedded schema document.
pub const SCHEMA_JSON: &str = include_str!("../schema/cli_schema.json");

#[derive(Debug, Deserialize)]
pub struct Schema {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "globalOptions", default)]
    pub global_options: Vec<SchemaOption>,
    #[serde(rename = "commonOptions", default)]
    pub common_options: Vec<SchemaOption>,
    #[serde(default)]
    pub commands: Vec<SchemaCommand>,
    #[serde(rename = "configurationSources", default)]
    pub config_sources: Vec<ConfigSource>,
}

#[derive(Debug, Deserialize)]
pub struct SchemaCommand {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "inheritsCommonOptions", default)]
    pub inherits_common_options: bool,
    #[serde(default)]
    pub options: Vec<SchemaOption>,
}

#[derive(Debug, Deserialize)]
pub struct SchemaOption {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default = "default_type")]
    pub value_type: String,
    #[serde(default)]
    pub flag: String,
    #[serde(rename = "alternative-flag", default)]
    pub alt_flag: String,
    #[serde(default)]
    pub required: bool,
    #[serde(rename = "default-value", default)]
    pub default: Option<Value>,
    #[serde(default)]
    pub requires: Vec<String>,
    #[serde(rename = "mutually-exclusive-with", default)]
    pub mutually_exclusive_with: Vec<String>,
}

fn default_type() -> String {
    "string".to_string()
}

#[derive(Debug, Deserialize)]
pub struct ConfigSource {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: i64,
}

impl SchemaOption {
    /// Check a value against this option's declared type.
    fn check_type(&self, value: &Value) -> Option<String> {
        let ok = match self.value_type.as_str() {
            "string" => value.is_string(),
            "integer" => value.is_i64() || value.is_u64(),
            "float" => value.is_number(),
            "boolean" => value.is_boolean(),
            "array" => value.is_array(),
            _ => true,
        };
        if ok {
            None
        } else {
            Some(format!(
                "value for {} must be a {}",
                self.name, self.value_type
            ))
        }
    }
}

impl Schema {
    /// Parse the embedded schema document.
    pub fn embedded() -> Result<Self> {
        serde_json::from_str(SCHEMA_JSON).context("embedded CLI schema is invalid")
    }

    pub fn command(&self, name: &str) -> Option<&SchemaCommand> {
        self.commands.iter().find(|c| c.name == name)
    }

    /// All options visible to a command: its own, the common set when
    /// inherited, and the global set. Command-specific options win on a
    /// name collision.
    pub fn options_for(&self, command: &str) -> Result<BTreeMap<&str, &SchemaOption>> {
        let Some(cmd) = self.command(command) else {
            bail!("unknown command: {command}");
        };

        let mut options: BTreeMap<&str, &SchemaOption> = BTreeMap::new();
        for opt in &self.global_options {
            options.insert(opt.name.as_str(), opt);
        }
        if cmd.inherits_common_options {
            for opt in &self.common_options {
                options.insert(opt.name.as_str(), opt);
            }
        }
        for opt in &cmd.options {
            options.insert(opt.name.as_str(), opt);
        }
        Ok(options)
    }

    /// Insert schema defaults for options the map does not set.
    pub fn apply_defaults(&self, command: &str, args: &mut Map<String, Value>) -> Result<()> {
        for (name, option) in self.options_for(command)? {
            if args.contains_key(name) {
                continue;
            }
            if let Some(default) = &option.default {
                args.insert(name.to_string(), default.clone());
            }
        }
        Ok(())
    }

    /// Validate an argument map for a command. Returns every problem found
    /// rather than stopping at the first.
    pub fn validate_command(&self, command: &str, args: &Map<String, Value>) -> Result<Vec<String>> {
        let options = self.options_for(command)?;
        let mut errors = Vec::new();

        let is_set =
            |name: &str| -> bool { args.get(name).map(|v| !v.is_null()).unwrap_or(false) };

        for (name, value) in args {
            if value.is_null() {
                continue;
            }
            match options.get(name.as_str()) {
                Some(option) => {
                    if let Some(error) = option.check_type(value) {
                        errors.push(error);
                    }
                }
                None => errors.push(format!("unknown option for command '{command}': {name}")),
            }
        }

        for (&name, option) in &options {
            if option.required && !is_set(name) {
                errors.push(format!("required option missing: {}", option.flag));
            }
            if !is_set(name) {
                continue;
            }
            for other in &option.mutually_exclusive_with {
                // Report each exclusive pair once.
                if is_set(other) && name < other.as_str() {
                    let other_flag = options
                        .get(other.as_str())
                        .map(|o| o.flag.as_str())
                        .unwrap_or(other);
                    errors.push(format!(
                        "options {} and {} cannot be used together",
                        option.flag, other_flag
                    ));
                }
            }
            for requirement in &option.requires {
                // `requires` on an option with a true default (e.g. recursive)
                // is only violated when the requirement is explicitly false.
                let satisfied = match args.get(requirement.as_str()) {
                    Some(Value::Bool(b)) => *b,
                    Some(v) => !v.is_null(),
                    None => options
                        .get(requirement.as_str())
                        .and_then(|o| o.default.as_ref())
                        .map(|d| d != &Value::Bool(false))
                        .unwrap_or(false),
                };
                if !satisfied {
                    let req_flag = options
                        .get(requirement.as_str())
                        .map(|o| o.flag.as_str())
                        .unwrap_or(requirement);
                    errors.push(format!("option {} requires {}", option.flag, req_flag));
                }
            }
        }

        Ok(errors)
    }
}

/// Validate CLI arguments, merge the configuration layers, apply schema
/// defaults to whatever is still unset, and produce the immutable
/// [`Settings`] snapshot the engine consumes.
///
/// Schema defaults sit below every explicit source, so a config file can
/// still override them; only genuinely unset options fall back.
pub fn resolve_settings(
    schema: &Schema,
    command: &str,
    cli_args: Map<String, Value>,
    config: &mut crate::config::Config,
) -> Result<crate::config::Settings> {
    let errors = schema.validate_command(command, &cli_args)?;
    if !errors.is_empty() {
        bail!("validation failed:\n  {}", errors.join("\n  "));
    }

    config.load();
    config.set_cli_args(cli_args);

    let mut merged = config.merged();
    schema.apply_defaults(command, &mut merged)?;
    serde_json::from_value(Value::Object(merged)).context("invalid configuration values")
}
