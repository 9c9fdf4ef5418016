//! Centralized constants for the layered configuration workspace.
//!
//! This module contains file naming conventions and environment variable
//! names shared by the library and the CLI.

// =============================================================================
// File Layout
// =============================================================================

/// File name of the base configuration document.
pub const BASE_CONFIG_FILE: &str = "application.yaml";

/// Prefix of profile configuration documents (`application-{profile}.yaml`).
pub const PROFILE_CONFIG_FILE_PREFIX: &str = "application-";

/// Extension shared by all configuration documents.
pub const CONFIG_FILE_EXTENSION: &str = "yaml";

// =============================================================================
// Environment Variables
// =============================================================================

/// Environment variable naming the active profile.
pub const ENV_PROFILE: &str = "APP_PROFILE";

/// Environment variable naming the configuration directory.
pub const ENV_CONFIG_DIR: &str = "APP_CONFIG_DIR";

/// Environment variable naming the diagnostic log threshold.
pub const ENV_LOG_LEVEL: &str = "APP_LOG_LEVEL";

/// Returns the file name of the profile document for `profile`.
pub fn profile_config_file(profile: &str) -> String {
    format!("{PROFILE_CONFIG_FILE_PREFIX}{profile}.{CONFIG_FILE_EXTENSION}")
}
