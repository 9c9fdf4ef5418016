//! Command implementations for the layered-config CLI.
//!
//! Responsibilities:
//! - Render keys, single values and full dumps of a loaded `ConfigStore`.
//!
//! Does NOT handle:
//! - Loading configuration or installing logging (done in `main()`).
//!
//! Invariants:
//! - Commands only write to the provided writer; diagnostics go to stderr via tracing.
//! - A `--prefix` re-roots the store with `sub_config` before rendering.

use std::io::Write;

use anyhow::{Context, Result};
use layered_config::{ConfigStore, Scalar};

use crate::args::{Commands, DumpFormat, ValueKind};
use crate::error::CommandError;

/// Execute `command` against `store`, writing its output to `out`.
pub fn run_command(command: &Commands, store: &ConfigStore, out: &mut impl Write) -> Result<()> {
    match command {
        Commands::Keys {
            first_level,
            prefix,
        } => {
            let scoped = scope(store, prefix.as_deref());
            if *first_level {
                for key in scoped.first_level_keys() {
                    writeln!(out, "{key}")?;
                }
            } else {
                for key in scoped.keys() {
                    writeln!(out, "{key}")?;
                }
            }
        }
        Commands::Get { key, kind, default } => {
            let value = get_value(store, key, *kind, default.as_deref())?;
            writeln!(out, "{value}")?;
        }
        Commands::Dump { prefix, format } => {
            let scoped = scope(store, prefix.as_deref());
            let rendered = match format {
                DumpFormat::Json => serde_json::to_string_pretty(&scoped)
                    .context("Failed to serialize configuration as JSON")?,
                DumpFormat::Yaml => serde_yaml::to_string(&scoped)
                    .context("Failed to serialize configuration as YAML")?,
            };
            writeln!(out, "{}", rendered.trim_end())?;
        }
    }
    Ok(())
}

fn scope(store: &ConfigStore, prefix: Option<&str>) -> ConfigStore {
    match prefix {
        Some(prefix) => store.sub_config(prefix),
        None => store.clone(),
    }
}

fn get_value(
    store: &ConfigStore,
    key: &str,
    kind: ValueKind,
    default: Option<&str>,
) -> Result<Scalar> {
    let context = || format!("Failed to read key '{key}'");

    let value = match kind {
        ValueKind::Any => match (store.get(key), default) {
            (Some(value), _) => value.clone(),
            (None, Some(default)) => Scalar::from(default),
            (None, None) => return Err(CommandError::KeyNotFound(key.to_string()).into()),
        },
        ValueKind::String => {
            let default = default.unwrap_or_default();
            Scalar::from(store.get_string_or(key, default).with_context(context)?)
        }
        ValueKind::Integer => {
            let default = match default {
                Some(raw) => raw.trim().parse().map_err(|_| CommandError::InvalidDefault {
                    value: raw.to_string(),
                    kind: "integer",
                })?,
                None => 0,
            };
            Scalar::from(store.get_integer_or(key, default).with_context(context)?)
        }
        ValueKind::Boolean => {
            let default = match default {
                Some(raw) => raw.trim().parse().map_err(|_| CommandError::InvalidDefault {
                    value: raw.to_string(),
                    kind: "boolean",
                })?,
                None => false,
            };
            Scalar::from(store.get_boolean_or(key, default).with_context(context)?)
        }
    };
    Ok(value)
}
