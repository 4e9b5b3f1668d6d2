//! The `docidx schema` command: print the CLI schema as an indented tree.

use anyhow::Result;

use crate::schema::{Schema, SchemaOption};

pub fn run_schema(schema: &Schema) -> Result<()> {
    println!("{} CLI", schema.name);

    if !schema.global_options.is_empty() {
        println!("├── Global options");
        for option in &schema.global_options {
            println!("│   ├── {}", option_line(option));
        }
    }

    if !schema.commands.is_empty() {
        println!("├── Commands");
        for command in &schema.commands {
            println!("│   ├── {}: {}", command.name, command.description);
            for option in &command.options {
                println!("│   │   ├── {}", option_line(option));
            }
            if command.inherits_common_options {
                println!("│   │   └── (also accepts the common options)");
            }
        }
    }

    if !schema.common_options.is_empty() {
        println!("├── Common options");
        for option in &schema.common_options {
            println!("│   ├── {}", option_line(option));
        }
    }

    if !schema.config_sources.is_empty() {
        println!("└── Configuration sources");
        for source in &schema.config_sources {
            println!("    ├── {}. {}: {}", source.priority, source.name, source.description);
        }
    }

    Ok(())
}

fn option_line(option: &SchemaOption) -> String {
    let required = if option.required { "* " } else { "" };
    format!("{}{}: {}", required, option.flag, option.description)
}
