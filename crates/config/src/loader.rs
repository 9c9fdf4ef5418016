//! Configuration loader for base and profile YAML documents.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` (profile, directory, log threshold).
//! - Resolve `application.yaml` and `application-{profile}.yaml` in the config directory.
//! - Read both documents and merge them into a fresh `ConfigStore`.
//!
//! Does NOT handle:
//! - Parsing details (see `document.rs`) or merge rules (see `merge.rs`).
//! - Process-wide state (see `ambient.rs`).
//!
//! Invariants / Assumptions:
//! - Loading never fails: missing or broken documents are logged and treated as empty.
//! - Each `load()` produces a new store; nothing accumulates across calls.
//! - An empty profile name means "no profile document".
//! - An empty config directory means the current working directory.

use std::path::{Path, PathBuf};

use crate::constants::{BASE_CONFIG_FILE, profile_config_file};
use crate::diagnostics::{Diagnostics, LogLevel, diag};
use crate::document::load_or_empty;
use crate::store::ConfigStore;

/// Builds a [`ConfigStore`] from the documents in a configuration directory.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    profile: Option<String>,
    config_dir: PathBuf,
    log_level: LogLevel,
}

impl ConfigLoader {
    /// Create a loader for the current directory, no profile, `info` threshold.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the active profile; an empty name disables the profile document.
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        let profile = profile.into();
        self.profile = (!profile.is_empty()).then_some(profile);
        self
    }

    /// Set the directory containing the configuration documents.
    pub fn with_config_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config_dir = dir.into();
        self
    }

    /// Set the diagnostic threshold for loading and for later merges on the store.
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    pub fn profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }

    /// Path of the base document.
    pub fn base_path(&self) -> PathBuf {
        self.config_dir.join(BASE_CONFIG_FILE)
    }

    /// Path of the profile document, if a profile is set.
    pub fn profile_path(&self) -> Option<PathBuf> {
        self.profile
            .as_deref()
            .map(|profile| self.config_dir.join(profile_config_file(profile)))
    }

    /// Read and merge the base and profile documents into a new store.
    pub fn load(&self) -> ConfigStore {
        let diagnostics = Diagnostics::new(self.log_level);

        diag!(
            diagnostics,
            info,
            profile = self.profile().unwrap_or(""),
            config_dir = %self.config_dir.display(),
            "Loading configuration"
        );

        let general = load_or_empty(&self.base_path(), diagnostics);
        let profile = match self.profile_path() {
            Some(path) => load_or_empty(&path, diagnostics),
            None => {
                diag!(diagnostics, debug, "No profile set, using base configuration only");
                Default::default()
            }
        };

        let store = ConfigStore::from_documents(&general, Some(&profile), diagnostics);
        diag!(
            diagnostics,
            debug,
            keys = store.len(),
            "Processing of configuration finished"
        );
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) {
        std::fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_paths() {
        let loader = ConfigLoader::new()
            .with_profile("development")
            .with_config_dir("conf");
        assert_eq!(loader.base_path(), Path::new("conf").join("application.yaml"));
        assert_eq!(
            loader.profile_path(),
            Some(Path::new("conf").join("application-development.yaml"))
        );
    }

    #[test]
    fn test_trailing_slash_is_irrelevant() {
        let with_slash = ConfigLoader::new().with_config_dir("conf/");
        let without = ConfigLoader::new().with_config_dir("conf");
        assert_eq!(with_slash.base_path(), without.base_path());
    }

    #[test]
    fn test_empty_dir_is_current_directory() {
        let loader = ConfigLoader::new().with_config_dir("");
        assert_eq!(loader.base_path(), Path::new("application.yaml"));
    }

    #[test]
    fn test_empty_profile_disables_profile_document() {
        let loader = ConfigLoader::new().with_profile("");
        assert!(loader.profile().is_none());
        assert!(loader.profile_path().is_none());
    }

    #[test]
    fn test_load_merges_base_and_profile() {
        let temp_dir = TempDir::new().unwrap();
        write(
            temp_dir.path(),
            "application.yaml",
            "server:\n  port: 8888\n  host: localhost\n",
        );
        write(
            temp_dir.path(),
            "application-test.yaml",
            "server:\n  host: test.local\n",
        );

        let store = ConfigLoader::new()
            .with_profile("test")
            .with_config_dir(temp_dir.path())
            .with_log_level(LogLevel::Debug)
            .load();

        assert_eq!(store.get_integer("server.port").unwrap(), 8888);
        assert_eq!(store.get_string("server.host").unwrap(), "test.local");
        assert_eq!(store.diagnostics().threshold(), LogLevel::Debug);
    }

    #[test]
    fn test_load_without_profile_file_uses_base() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "application.yaml", "a: 1\n");

        let store = ConfigLoader::new()
            .with_profile("missing")
            .with_config_dir(temp_dir.path())
            .load();

        assert_eq!(store.get_integer("a").unwrap(), 1);
    }

    #[test]
    fn test_load_with_nothing_on_disk_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = ConfigLoader::new()
            .with_profile("development")
            .with_config_dir(temp_dir.path())
            .load();
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_resolves_anchors_and_merge_keys() {
        let temp_dir = TempDir::new().unwrap();
        write(
            temp_dir.path(),
            "application.yaml",
            "defaults: &defaults\n  timeout: 5\n  retries: 3\nservice:\n  <<: *defaults\n  retries: 9\n",
        );

        let store = ConfigLoader::new().with_config_dir(temp_dir.path()).load();

        assert_eq!(store.get_integer("service.timeout").unwrap(), 5);
        assert_eq!(store.get_integer("service.retries").unwrap(), 9);
        assert_eq!(store.get_integer("defaults.retries").unwrap(), 3);
        assert!(store.keys().all(|key| !key.contains("<<")));
    }

    #[test]
    fn test_multi_document_file_uses_first_document() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "application.yaml", "a: 1\n---\nb: 2\n");

        let store = ConfigLoader::new().with_config_dir(temp_dir.path()).load();

        assert_eq!(store.keys().collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn test_broken_profile_falls_back_to_base() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "application.yaml", "a: 1\n");
        write(temp_dir.path(), "application-dev.yaml", "a: [2\n");

        let store = ConfigLoader::new()
            .with_profile("dev")
            .with_config_dir(temp_dir.path())
            .load();

        assert_eq!(store.get_integer("a").unwrap(), 1);
    }
}
