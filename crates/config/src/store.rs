//! Flattened configuration store.
//!
//! Responsibilities:
//! - Own the `dotted.key.path -> Scalar` table produced by the merge engine.
//! - Provide raw, defaulted and typed lookups.
//! - Support augmentation (`add_map`) and prefix-scoped sub-stores (`sub_config`).
//!
//! Does NOT handle:
//! - Reading files (see `loader.rs`).
//! - Process-wide sharing (see `ambient.rs`).
//!
//! Invariants:
//! - Every stored value is a `Scalar`; no nested structure survives flattening.
//! - Writes for an existing key replace the previous value; there is no removal.
//! - A sub-store is an independent copy of its parent's matching entries.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::Bound;

use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;

use crate::diagnostics::{Diagnostics, diag};
use crate::error::ConfigError;
use crate::merge::MergeEngine;
use crate::value::{FromScalar, Scalar};

/// A flat mapping from key paths to scalar values.
///
/// Stores are plain owned data (`Send + Sync`). Share one across threads only
/// after initialization is complete, or behind a lock if it is still being
/// augmented (see [`crate::ambient`]).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigStore {
    entries: BTreeMap<String, Scalar>,
    #[serde(skip)]
    diagnostics: Diagnostics,
}

impl ConfigStore {
    /// Create an empty store reporting at the default (`info`) threshold.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store reporting at the given threshold.
    pub fn with_diagnostics(diagnostics: Diagnostics) -> Self {
        Self {
            entries: BTreeMap::new(),
            diagnostics,
        }
    }

    /// Build a store by merging a base document with an optional profile document.
    pub fn from_documents(
        general: &Mapping,
        profile: Option<&Mapping>,
        diagnostics: Diagnostics,
    ) -> Self {
        let mut store = Self::with_diagnostics(diagnostics);
        store.merge("", general, profile);
        store
    }

    pub fn diagnostics(&self) -> Diagnostics {
        self.diagnostics
    }

    /// Merge `general`, overridden by `profile`, into this store under `prefix`.
    ///
    /// `prefix` is either empty or a key path ending in `.`.
    pub fn merge(&mut self, prefix: &str, general: &Mapping, profile: Option<&Mapping>) {
        MergeEngine::new(&mut self.entries, self.diagnostics).merge(prefix, general, profile);
    }

    /// Merge an in-memory map into the store as if it were a base document
    /// without a profile.
    ///
    /// An empty `prefix` merges at the root; otherwise keys are placed under
    /// `prefix.` (a trailing dot on `prefix` is accepted).
    pub fn add_map(&mut self, prefix: &str, custom: &Mapping) {
        let prefix = normalize_prefix(prefix);
        diag!(
            self.diagnostics,
            debug,
            prefix = %prefix,
            keys = custom.len(),
            "Adding custom map to configuration"
        );
        self.merge(&prefix, custom, None);
    }

    /// Insert a single value at a key path, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Scalar>) -> Option<Scalar> {
        self.entries.insert(key.into(), value.into())
    }

    /// Raw lookup.
    pub fn get(&self, key: &str) -> Option<&Scalar> {
        self.entries.get(key)
    }

    /// Raw lookup with a fallback for absent keys.
    pub fn get_or(&self, key: &str, default: impl Into<Scalar>) -> Scalar {
        self.get(key).cloned().unwrap_or_else(|| default.into())
    }

    /// Typed lookup: `Ok(None)` if absent, an error if present with another kind.
    pub fn get_as<T: FromScalar>(&self, key: &str) -> Result<Option<T>, ConfigError> {
        let Some(scalar) = self.get(key) else {
            return Ok(None);
        };
        T::from_scalar(scalar)
            .map(Some)
            .ok_or_else(|| ConfigError::TypeMismatch {
                key: key.to_string(),
                expected: T::KIND,
                found: scalar.kind(),
            })
    }

    /// String value, or `""` if absent.
    pub fn get_string(&self, key: &str) -> Result<String, ConfigError> {
        Ok(self.get_as(key)?.unwrap_or_default())
    }

    pub fn get_string_or(&self, key: &str, default: &str) -> Result<String, ConfigError> {
        Ok(self.get_as(key)?.unwrap_or_else(|| default.to_string()))
    }

    /// Integer value, or `0` if absent.
    pub fn get_integer(&self, key: &str) -> Result<i64, ConfigError> {
        Ok(self.get_as(key)?.unwrap_or_default())
    }

    pub fn get_integer_or(&self, key: &str, default: i64) -> Result<i64, ConfigError> {
        Ok(self.get_as(key)?.unwrap_or(default))
    }

    /// Boolean value, or `false` if absent.
    pub fn get_boolean(&self, key: &str) -> Result<bool, ConfigError> {
        Ok(self.get_as(key)?.unwrap_or_default())
    }

    pub fn get_boolean_or(&self, key: &str, default: bool) -> Result<bool, ConfigError> {
        Ok(self.get_as(key)?.unwrap_or(default))
    }

    /// Derive an independent store holding every entry under `prefix.`,
    /// re-keyed with that prefix stripped.
    ///
    /// An empty prefix copies the whole store. No match yields an empty store.
    /// A parent key ending in `.` would strip to an empty key and is skipped.
    pub fn sub_config(&self, prefix: &str) -> ConfigStore {
        let needle = normalize_prefix(prefix);
        let entries = self
            .entries
            .range::<str, _>((Bound::Included(needle.as_str()), Bound::Unbounded))
            .map_while(|(key, value)| {
                key.strip_prefix(needle.as_str())
                    .map(|sub_key| (sub_key, value))
            })
            .filter(|(sub_key, _)| needle.is_empty() || !sub_key.is_empty())
            .map(|(sub_key, value)| (sub_key.to_string(), value.clone()))
            .collect();

        ConfigStore {
            entries,
            diagnostics: self.diagnostics,
        }
    }

    /// All key paths, in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    /// Distinct first segments of all key paths.
    pub fn first_level_keys(&self) -> BTreeSet<&str> {
        self.keys()
            .map(|key| key.split_once('.').map_or(key, |(first, _)| first))
            .collect()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scalar)> + '_ {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The underlying flat table.
    pub fn as_map(&self) -> &BTreeMap<String, Scalar> {
        &self.entries
    }
}

impl<K, V> FromIterator<(K, V)> for ConfigStore
where
    K: Into<String>,
    V: Into<Scalar>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        ConfigStore {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
            diagnostics: Diagnostics::default(),
        }
    }
}

/// `""` stays empty, anything else ends with exactly one `.`.
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_end_matches('.');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{trimmed}.")
    }
}
