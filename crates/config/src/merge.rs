//! Merge-and-flatten engine.
//!
//! Responsibilities:
//! - Walk a base (`general`) tree and an optional override (`profile`) tree in parallel.
//! - Write one `dotted.key.path -> Scalar` entry per base leaf into the target table.
//! - Normalize every map node to string keys before descending into it.
//!
//! Does NOT handle:
//! - Reading or parsing documents (see `document.rs`).
//! - Lookups on the flattened table (see `store.rs`).
//!
//! Invariants:
//! - Only keys present in `general` reach the table; profile-only keys are reported and dropped.
//! - A profile scalar overrides the base scalar at the same path, whatever its scalar kind.
//! - When the kinds disagree structurally, the base shape wins:
//!   - base map vs. profile non-map: descend into the base map with an empty profile side;
//!   - base scalar vs. profile non-scalar: keep the base scalar.
//!   Both cases are logged at WARN.
//! - Nulls, floats, sequences and tagged values in `general` are logged at ERROR and skipped.
//! - Merging never fails and never panics.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde_yaml::{Mapping, Value};

use crate::diagnostics::{Diagnostics, diag};
use crate::value::{Scalar, yaml_kind};

/// A map node after normalization: string keys, borrowed values.
type Section<'v> = BTreeMap<Cow<'v, str>, &'v Value>;

/// Flattens documents into a borrowed key/value table.
pub(crate) struct MergeEngine<'t> {
    entries: &'t mut BTreeMap<String, Scalar>,
    diagnostics: Diagnostics,
}

impl<'t> MergeEngine<'t> {
    pub(crate) fn new(entries: &'t mut BTreeMap<String, Scalar>, diagnostics: Diagnostics) -> Self {
        Self {
            entries,
            diagnostics,
        }
    }

    /// Merge `general` (overridden by `profile`) under `prefix`.
    ///
    /// `prefix` must be empty or end with `.`.
    pub(crate) fn merge(&mut self, prefix: &str, general: &Mapping, profile: Option<&Mapping>) {
        let general = normalize_mapping(general, prefix, self.diagnostics);
        let profile = profile.map(|p| normalize_mapping(p, prefix, self.diagnostics));
        self.merge_sections(prefix, &general, profile.as_ref());
    }

    fn merge_sections(&mut self, prefix: &str, general: &Section<'_>, profile: Option<&Section<'_>>) {
        for (key, &value) in general {
            let key: &str = key;
            let cfg_key = format!("{prefix}{key}");
            let profile_value = profile.and_then(|p| p.get(key)).copied();

            if let Value::Mapping(_) = value {
                self.merge_nested(&cfg_key, value, profile_value);
            } else if let Some(scalar) = Scalar::from_yaml(value) {
                self.merge_leaf(cfg_key, scalar, profile_value);
            } else {
                diag!(
                    self.diagnostics,
                    error,
                    key = %cfg_key,
                    found = yaml_kind(value),
                    "Unrecognized configuration value type, skipping key"
                );
            }
        }

        if let Some(profile) = profile {
            for key in profile.keys() {
                let key: &str = key;
                if general.contains_key(key) {
                    continue;
                }
                diag!(
                    self.diagnostics,
                    warn,
                    key = %format!("{prefix}{key}"),
                    "Profile key has no counterpart in the base configuration, ignoring"
                );
            }
        }
    }

    fn merge_nested(&mut self, cfg_key: &str, general: &Value, profile: Option<&Value>) {
        let general = normalize(general, cfg_key, self.diagnostics);
        let profile = match profile {
            None => Section::new(),
            Some(value) if value.is_mapping() => normalize(value, cfg_key, self.diagnostics),
            Some(other) => {
                diag!(
                    self.diagnostics,
                    warn,
                    key = %cfg_key,
                    found = yaml_kind(other),
                    "Profile value is not a map where the base configuration has one, ignoring override"
                );
                Section::new()
            }
        };
        self.merge_sections(&format!("{cfg_key}."), &general, Some(&profile));
    }

    fn merge_leaf(&mut self, cfg_key: String, general: Scalar, profile: Option<&Value>) {
        let overridden = match profile {
            None => None,
            Some(value) => match Scalar::from_yaml(value) {
                Some(scalar) => Some(scalar),
                None => {
                    diag!(
                        self.diagnostics,
                        warn,
                        key = %cfg_key,
                        found = yaml_kind(value),
                        "Profile value is not a scalar where the base configuration has one, ignoring override"
                    );
                    None
                }
            },
        };

        match overridden {
            Some(scalar) => {
                diag!(self.diagnostics, debug, key = %cfg_key, value = %scalar, "New profile config value");
                self.entries.insert(cfg_key, scalar);
            }
            None => {
                diag!(self.diagnostics, debug, key = %cfg_key, value = %general, "New global config value");
                self.entries.insert(cfg_key, general);
            }
        }
    }
}

/// Normalize any map-shaped node into a string-keyed section.
///
/// Non-map nodes yield an empty section.
fn normalize<'v>(node: &'v Value, path: &str, diagnostics: Diagnostics) -> Section<'v> {
    match node {
        Value::Mapping(mapping) => normalize_mapping(mapping, path, diagnostics),
        other => {
            diag!(
                diagnostics,
                warn,
                key = %path,
                found = yaml_kind(other),
                "Value is not a valid map"
            );
            Section::new()
        }
    }
}

/// Re-key a mapping by string.
///
/// If any key cannot be represented as a string the whole map is replaced
/// by an empty section.
fn normalize_mapping<'v>(mapping: &'v Mapping, path: &str, diagnostics: Diagnostics) -> Section<'v> {
    let mut section = Section::new();
    for (key, value) in mapping {
        match key_to_string(key) {
            Some(key) => {
                section.insert(key, value);
            }
            None => {
                diag!(
                    diagnostics,
                    warn,
                    key = %path,
                    found = yaml_kind(key),
                    "Map key is not representable as a string, substituting an empty map"
                );
                return Section::new();
            }
        }
    }
    section
}

fn key_to_string(key: &Value) -> Option<Cow<'_, str>> {
    match key {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        Value::Number(n) if !n.is_f64() => Some(Cow::Owned(n.to_string())),
        _ => None,
    }
}
