//! Leveled diagnostics for configuration loading and merging.
//!
//! Responsibilities:
//! - Define the `LogLevel` threshold accepted by initialization.
//! - Gate diagnostic events below the configured threshold before they reach `tracing`.
//!
//! Does NOT handle:
//! - Installing a subscriber (binaries own that, see `crates/cli`).
//! - Any control flow: diagnostics are purely observational.
//!
//! Invariants:
//! - `Debug < Info < Warn < Error`; a message is emitted iff `level >= threshold`.
//! - All events use the `layered_config` target.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::level_filters::LevelFilter;

/// Severity of a diagnostic message, ordered from most to least verbose.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub const ALL: [LogLevel; 4] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    /// The equivalent `tracing` level.
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        LevelFilter::from_level(level.to_tracing_level())
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a known log level.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown log level '{0}' (expected one of: debug, info, warn, error)")]
pub struct ParseLogLevelError(String);

impl FromStr for LogLevel {
    type Err = ParseLogLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ParseLogLevelError(s.to_string())),
        }
    }
}

/// Threshold carried by every store so that merges triggered later
/// (e.g. `add_map`) report at the level chosen during initialization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Diagnostics {
    threshold: LogLevel,
}

impl Diagnostics {
    pub const fn new(threshold: LogLevel) -> Self {
        Self { threshold }
    }

    pub const fn threshold(self) -> LogLevel {
        self.threshold
    }

    /// Returns true if a message at `level` passes the threshold.
    pub fn allows(self, level: LogLevel) -> bool {
        level >= self.threshold
    }
}

/// Emit a `tracing` event if the given `Diagnostics` allows its level.
///
/// Usage: `diag!(diagnostics, warn, key = %key, "message")`.
macro_rules! diag {
    ($diag:expr, debug, $($arg:tt)+) => {
        if $diag.allows($crate::diagnostics::LogLevel::Debug) {
            ::tracing::debug!(target: "layered_config", $($arg)+);
        }
    };
    ($diag:expr, info, $($arg:tt)+) => {
        if $diag.allows($crate::diagnostics::LogLevel::Info) {
            ::tracing::info!(target: "layered_config", $($arg)+);
        }
    };
    ($diag:expr, warn, $($arg:tt)+) => {
        if $diag.allows($crate::diagnostics::LogLevel::Warn) {
            ::tracing::warn!(target: "layered_config", $($arg)+);
        }
    };
    ($diag:expr, error, $($arg:tt)+) => {
        if $diag.allows($crate::diagnostics::LogLevel::Error) {
            ::tracing::error!(target: "layered_config", $($arg)+);
        }
    };
}

pub(crate) use diag;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_ordered() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
    }

    #[test]
    fn test_threshold_suppresses_lower_levels() {
        let diagnostics = Diagnostics::new(LogLevel::Warn);
        assert!(!diagnostics.allows(LogLevel::Debug));
        assert!(!diagnostics.allows(LogLevel::Info));
        assert!(diagnostics.allows(LogLevel::Warn));
        assert!(diagnostics.allows(LogLevel::Error));
    }

    #[test]
    fn test_debug_threshold_allows_everything() {
        let diagnostics = Diagnostics::new(LogLevel::Debug);
        for level in LogLevel::ALL {
            assert!(diagnostics.allows(level), "{level} should pass a debug threshold");
        }
    }

    #[test]
    fn test_parse_log_level() {
        assert_eq!("DEBUG".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!(" info ".parse::<LogLevel>().unwrap(), LogLevel::Info);
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!("Error".parse::<LogLevel>().unwrap(), LogLevel::Error);
        assert!("verbose".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for level in LogLevel::ALL {
            assert_eq!(level.to_string().parse::<LogLevel>().unwrap(), level);
        }
    }

    #[test]
    fn test_level_filter_conversion() {
        assert_eq!(LevelFilter::from(LogLevel::Warn), LevelFilter::WARN);
        assert_eq!(LevelFilter::from(LogLevel::Debug), LevelFilter::DEBUG);
    }

    #[test]
    fn test_default_threshold_is_info() {
        assert_eq!(Diagnostics::default().threshold(), LogLevel::Info);
    }
}
