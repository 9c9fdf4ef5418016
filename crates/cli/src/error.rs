//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map library and command errors to the appropriate exit code.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - Missing keys and kind mismatches have dedicated codes; everything else is 1.

use layered_config::ConfigError;
use thiserror::Error;

/// Errors raised by the CLI commands themselves.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Key '{0}' not found")]
    KeyNotFound(String),

    #[error("Invalid default value '{value}' for a {kind} key")]
    InvalidDefault { value: String, kind: &'static str },
}

/// Structured exit codes for layered-config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    #[allow(dead_code)]
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// Key not found and no default given.
    NotFound = 4,

    /// Stored value has a different kind than requested, or the default does not parse.
    ValidationError = 5,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(err) = cause.downcast_ref::<CommandError>() {
                return match err {
                    CommandError::KeyNotFound(_) => ExitCode::NotFound,
                    CommandError::InvalidDefault { .. } => ExitCode::ValidationError,
                };
            }
            if let Some(ConfigError::TypeMismatch { .. }) = cause.downcast_ref::<ConfigError>() {
                return ExitCode::ValidationError;
            }
        }
        ExitCode::GeneralError
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use layered_config::ScalarKind;

    #[test]
    fn test_exit_code_as_i32() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::GeneralError.as_i32(), 1);
        assert_eq!(ExitCode::NotFound.as_i32(), 4);
        assert_eq!(ExitCode::ValidationError.as_i32(), 5);
    }

    #[test]
    fn test_key_not_found_maps_to_not_found() {
        let err = anyhow::Error::new(CommandError::KeyNotFound("a.b".to_string()));
        assert_eq!(err.exit_code(), ExitCode::NotFound);
    }

    #[test]
    fn test_type_mismatch_maps_to_validation_error() {
        let err = anyhow::Error::new(ConfigError::TypeMismatch {
            key: "server.port".to_string(),
            expected: ScalarKind::Boolean,
            found: ScalarKind::Integer,
        })
        .context("Failed to read key");
        assert_eq!(err.exit_code(), ExitCode::ValidationError);
    }

    #[test]
    fn test_other_errors_are_general() {
        let err = anyhow::anyhow!("boom");
        assert_eq!(err.exit_code(), ExitCode::GeneralError);
    }
}
