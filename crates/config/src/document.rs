//! Reading YAML configuration documents into generic trees.
//!
//! Responsibilities:
//! - Read a file and parse it into a top-level `serde_yaml::Mapping`.
//! - Offer a strict reader (`read_document`) and a degrading one (`load_or_empty`).
//!
//! Does NOT handle:
//! - Choosing which files to read (see `loader.rs`).
//! - Interpreting the tree (see `merge.rs`).
//!
//! Invariants:
//! - An empty file (or one containing only `~`) is an empty document, not an error.
//! - Only the first document of a multi-document stream is read; the rest is ignored.
//! - Merge keys (`<<: *anchor`) are resolved before the tree is handed to the merge.
//! - `load_or_empty` never fails: missing files are logged at WARN, every other
//!   failure at ERROR, and an empty mapping is returned.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_yaml::{Mapping, Value};

use crate::diagnostics::{Diagnostics, diag};
use crate::error::DocumentError;
use crate::value::yaml_kind;

/// A parsed configuration document: the top-level mapping of a YAML file.
pub type Document = Mapping;

/// Parse YAML text into a document.
///
/// `path` is only used to annotate errors.
pub fn parse_document(content: &str, path: &Path) -> Result<Document, DocumentError> {
    if is_blank(content) {
        return Ok(Mapping::new());
    }

    let parse_error = |source: serde_yaml::Error| DocumentError::Parse {
        path: path.to_path_buf(),
        source,
    };
    let mut value = match serde_yaml::Deserializer::from_str(content).next() {
        Some(document) => Value::deserialize(document).map_err(parse_error)?,
        None => Value::Null,
    };
    value.apply_merge().map_err(parse_error)?;

    match value {
        Value::Mapping(mapping) => Ok(mapping),
        Value::Null => Ok(Mapping::new()),
        other => Err(DocumentError::NotAMapping {
            path: path.to_path_buf(),
            found: yaml_kind(&other),
        }),
    }
}

/// Only whitespace, comments and document markers.
fn is_blank(content: &str) -> bool {
    content.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#') || line == "---"
    })
}

/// Read and parse a configuration file.
pub fn read_document(path: &Path) -> Result<Document, DocumentError> {
    let content = fs::read_to_string(path).map_err(|source| DocumentError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_document(&content, path)
}

/// Read a configuration file, substituting an empty document on any failure.
pub(crate) fn load_or_empty(path: &Path, diagnostics: Diagnostics) -> Document {
    match read_document(path) {
        Ok(document) => {
            diag!(
                diagnostics,
                debug,
                path = %path.display(),
                keys = document.len(),
                "Loaded configuration file"
            );
            document
        }
        Err(DocumentError::Read { path, source }) => {
            diag!(
                diagnostics,
                warn,
                path = %path.display(),
                error = %source,
                "Could not open configuration file, using an empty document"
            );
            Mapping::new()
        }
        Err(DocumentError::Parse { path, source }) => {
            diag!(
                diagnostics,
                error,
                path = %path.display(),
                error = %source,
                "Could not parse configuration file, using an empty document"
            );
            Mapping::new()
        }
        Err(e @ DocumentError::NotAMapping { .. }) => {
            diag!(diagnostics, error, error = %e, "Ignoring configuration file");
            Mapping::new()
        }
    }
}
