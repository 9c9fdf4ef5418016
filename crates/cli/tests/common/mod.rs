//! Shared test utilities for layered-config integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory.
//! - Write base/profile fixture documents into a temporary directory.
//!
//! Invariants / Assumptions:
//! - `APP_*` and `RUST_LOG` variables from the host never leak into tests.

use std::path::Path;

use assert_cmd::Command;
use tempfile::TempDir;

/// Returns a hermetic `layered-config` command for integration testing.
pub fn layered_config_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("layered-config");

    cmd.env_remove("APP_PROFILE")
        .env_remove("APP_CONFIG_DIR")
        .env_remove("APP_LOG_LEVEL")
        .env_remove("RUST_LOG");

    cmd
}

/// Creates a config directory with a base and a `development` profile document.
pub fn config_dir() -> TempDir {
    let temp_dir = TempDir::new().expect("temp dir");
    write(
        temp_dir.path(),
        "application.yaml",
        "server:\n  port: 8888\nauth:\n  enabled: false\ndatabase:\n  settingsCollection: settings\ntenants:\n  tenant1:\n    id: t1\n    name: n\n",
    );
    write(
        temp_dir.path(),
        "application-development.yaml",
        "database:\n  settingsCollection: dev_table\n",
    );
    temp_dir
}

pub fn write(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).expect("write fixture");
}
