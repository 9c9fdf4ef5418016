//! layered-config - inspect merged base + profile YAML configuration.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Install the tracing subscriber at the requested diagnostic threshold.
//! - Load the configuration directory and run the selected command.
//!
//! Does NOT handle:
//! - Merge semantics or typed lookups (see `crates/config`).
//!
//! Invariants:
//! - Results go to stdout; diagnostics and errors go to stderr.
//! - `RUST_LOG` overrides `--log-level` for the subscriber, but the library's own
//!   threshold still follows `--log-level`.

mod args;
mod commands;
mod error;

use std::io::IsTerminal;

use args::Cli;
use clap::Parser;
use commands::run_command;
use error::ExitCodeExt;
use layered_config::{ConfigLoader, LogLevel};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    let cli = Cli::parse();

    init_tracing(cli.log_level);

    let store = ConfigLoader::new()
        .with_profile(cli.profile.as_str())
        .with_config_dir(&cli.config_dir)
        .with_log_level(cli.log_level)
        .load();
    tracing::debug!(keys = store.len(), "Configuration loaded");

    let stdout = std::io::stdout();
    if let Err(e) = run_command(&cli.command, &store, &mut stdout.lock()) {
        eprintln!("Error: {:#}", e);
        std::process::exit(e.exit_code().as_i32());
    }
}

fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from(level).into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false),
        )
        .init();
}
