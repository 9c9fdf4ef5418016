//! Error types for configuration documents and typed lookups.
//!
//! Responsibilities:
//! - `ConfigError`: caller-contract violations raised by typed accessors.
//! - `DocumentError`: strict failures of the document reader.
//!
//! Does NOT handle:
//! - Degrading document failures into empty documents (see `document::load_or_empty`).
//!
//! Invariants:
//! - Every variant carries the key or path it concerns.
//! - Nothing in this crate panics on malformed configuration; only typed
//!   accessors surface an error, and only on a kind mismatch.

use std::path::PathBuf;

use thiserror::Error;

use crate::value::ScalarKind;

/// Errors returned by typed accessors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The key exists but holds a value of a different kind than requested.
    #[error("Invalid cast for key '{key}': expected {expected}, found {found}")]
    TypeMismatch {
        key: String,
        expected: ScalarKind,
        found: ScalarKind,
    },
}

/// Errors that can occur while reading a single configuration document.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Failed to read configuration file at {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration file at {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Configuration file at {path} must contain a mapping at the top level, found {found}")]
    NotAMapping { path: PathBuf, found: &'static str },
}

impl DocumentError {
    /// True if the document could not be read because the file does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DocumentError::Read { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}
