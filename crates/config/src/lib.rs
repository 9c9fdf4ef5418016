//! Layered YAML configuration.
//!
//! This crate loads a base document (`application.yaml`) and an optional
//! profile document (`application-{profile}.yaml`), merges them with the
//! profile taking precedence at every leaf, and exposes the result as a flat
//! table of dotted key paths with typed accessors and scoped sub-stores.
//!
//! Prefer an owned [`ConfigStore`] built by [`ConfigLoader`]; the [`ambient`]
//! module offers the same operations on a process-wide store.

pub mod ambient;
pub mod constants;
mod diagnostics;
mod document;
mod error;
mod loader;
mod merge;
mod store;
mod value;

pub use diagnostics::{Diagnostics, LogLevel, ParseLogLevelError};
pub use document::{Document, parse_document, read_document};
pub use error::{ConfigError, DocumentError};
pub use loader::ConfigLoader;
pub use store::ConfigStore;
pub use value::{FromScalar, Scalar, ScalarKind};
