//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Parse command-line arguments and their environment variable fallbacks.
//!
//! Non-responsibilities:
//! - Does not load configuration or execute commands (see `commands` module).

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use layered_config::LogLevel;
use layered_config::constants::{ENV_CONFIG_DIR, ENV_LOG_LEVEL, ENV_PROFILE};

#[derive(Parser, Debug)]
#[command(name = "layered-config")]
#[command(about = "Inspect merged base + profile YAML configuration", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  layered-config --profile development keys\n  layered-config --config-dir conf get server.port --kind integer\n  layered-config --profile development dump --prefix tenants.tenant1 --format json\n"
)]
pub struct Cli {
    /// Profile whose application-<profile>.yaml overrides the base document
    #[arg(short, long, global = true, env = ENV_PROFILE, default_value = "")]
    pub profile: String,

    /// Directory containing application.yaml
    #[arg(short = 'd', long, global = true, env = ENV_CONFIG_DIR, default_value = ".")]
    pub config_dir: PathBuf,

    /// Diagnostic threshold (debug, info, warn, error)
    #[arg(short, long, global = true, env = ENV_LOG_LEVEL, default_value = "warn")]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List key paths
    Keys {
        /// Only list distinct first segments
        #[arg(long)]
        first_level: bool,

        /// Only list keys under this prefix (re-rooted)
        #[arg(long)]
        prefix: Option<String>,
    },

    /// Print the value stored at a key path
    Get {
        /// Dotted key path, e.g. server.port
        key: String,

        /// Require the value to be of this kind
        #[arg(long, value_enum, default_value_t = ValueKind::Any)]
        kind: ValueKind,

        /// Value printed when the key is absent
        #[arg(long)]
        default: Option<String>,
    },

    /// Print the flattened configuration
    Dump {
        /// Only dump keys under this prefix (re-rooted)
        #[arg(long)]
        prefix: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = DumpFormat::Yaml)]
        format: DumpFormat,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Any,
    String,
    Integer,
    Boolean,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DumpFormat {
    Json,
    Yaml,
}
