//! Scalar values held by the flattened configuration store.
//!
//! Responsibilities:
//! - Define `Scalar`, the only value kind that survives flattening.
//! - Convert parser output (`serde_yaml::Value`) into scalars where the kind is supported.
//! - Provide the `FromScalar` bridge used by typed accessors.
//!
//! Does NOT handle:
//! - Maps or sequences (the merge engine flattens or rejects those).
//! - Coercion between kinds: `"8888"` is a string, never an integer.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

/// A leaf configuration value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Boolean(bool),
    Integer(i64),
    String(String),
}

/// The kind of a [`Scalar`], used in type-mismatch errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    String,
    Integer,
    Boolean,
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ScalarKind::String => "string",
            ScalarKind::Integer => "integer",
            ScalarKind::Boolean => "boolean",
        })
    }
}

impl Scalar {
    pub fn kind(&self) -> ScalarKind {
        match self {
            Scalar::Boolean(_) => ScalarKind::Boolean,
            Scalar::Integer(_) => ScalarKind::Integer,
            Scalar::String(_) => ScalarKind::String,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Scalar::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Scalar::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Convert a parsed YAML node into a scalar.
    ///
    /// Returns `None` for nulls, floats, integers outside the `i64` range,
    /// sequences, mappings and tagged values.
    pub fn from_yaml(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Scalar::String(s.clone())),
            Value::Bool(b) => Some(Scalar::Boolean(*b)),
            Value::Number(n) => n.as_i64().map(Scalar::Integer),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Boolean(b) => write!(f, "{b}"),
            Scalar::Integer(i) => write!(f, "{i}"),
            Scalar::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::String(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::String(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Integer(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Integer(i64::from(value))
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Boolean(value)
    }
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Boolean(b) => Value::Bool(b),
            Scalar::Integer(i) => Value::Number(i.into()),
            Scalar::String(s) => Value::String(s),
        }
    }
}

/// Types a typed accessor can extract from a [`Scalar`].
///
/// `Default::default()` is the zero value returned for absent keys.
pub trait FromScalar: Sized + Default {
    const KIND: ScalarKind;

    fn from_scalar(scalar: &Scalar) -> Option<Self>;
}

impl FromScalar for String {
    const KIND: ScalarKind = ScalarKind::String;

    fn from_scalar(scalar: &Scalar) -> Option<Self> {
        scalar.as_str().map(str::to_string)
    }
}

impl FromScalar for i64 {
    const KIND: ScalarKind = ScalarKind::Integer;

    fn from_scalar(scalar: &Scalar) -> Option<Self> {
        scalar.as_integer()
    }
}

impl FromScalar for bool {
    const KIND: ScalarKind = ScalarKind::Boolean;

    fn from_scalar(scalar: &Scalar) -> Option<Self> {
        scalar.as_bool()
    }
}

/// Short human-readable name of a YAML node's kind, for diagnostics.
pub(crate) fn yaml_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}
