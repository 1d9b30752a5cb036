//! Unified error types for Herbarium.
//!
//! Command errors (unknown verbs, unknown plant kinds, malformed records or
//! conditions) are never fatal: the dispatcher turns them into a diagnostic
//! line and the session moves on to the next command. Storage and config
//! errors come from the shell around the core and are handled fail-open.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for Herbarium operations.
#[derive(Error, Debug)]
pub enum HerbariumError {
    /// A command line started with a verb the grammar does not know.
    #[error("Unknown command: {verb}")]
    UnknownCommand { verb: String },

    /// ADD named a plant kind outside tree/shrub/cactus.
    #[error("Unknown plant type: {kind}")]
    UnknownPlantKind { kind: String },

    /// REM carried a condition that could not be parsed.
    #[error("Malformed condition: {message}")]
    MalformedCondition { message: String },

    /// ADD carried a missing or unparseable field.
    #[error("Malformed record: {message}")]
    MalformedRecord { message: String },

    /// I/O errors from help, script, or config files.
    #[error("storage error at {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Configuration loading errors.
    #[error("config error: {message}")]
    Config { message: String },
}

/// A specialized Result type for Herbarium operations.
pub type Result<T> = std::result::Result<T, HerbariumError>;

impl HerbariumError {
    /// Create an unknown command error.
    pub fn unknown_command(verb: impl Into<String>) -> Self {
        Self::UnknownCommand { verb: verb.into() }
    }

    /// Create an unknown plant kind error.
    pub fn unknown_plant_kind(kind: impl Into<String>) -> Self {
        Self::UnknownPlantKind { kind: kind.into() }
    }

    /// Create a malformed condition error.
    pub fn malformed_condition(message: impl Into<String>) -> Self {
        Self::MalformedCondition {
            message: message.into(),
        }
    }

    /// Create a malformed record error.
    pub fn malformed_record(message: impl Into<String>) -> Self {
        Self::MalformedRecord {
            message: message.into(),
        }
    }

    /// Create a storage error from an I/O error.
    pub fn storage(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// The diagnostic line written to the report stream for this error.
    ///
    /// Unknown verbs and kinds keep the short fixed wording of the command
    /// grammar; everything else uses the full error message.
    pub fn diagnostic(&self) -> String {
        match self {
            Self::UnknownCommand { .. } => "Unknown command.".to_string(),
            Self::UnknownPlantKind { .. } => "Unknown plant type.".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<io::Error> for HerbariumError {
    fn from(err: io::Error) -> Self {
        Self::Storage {
            path: PathBuf::from("<input>"),
            source: err,
        }
    }
}

impl From<toml::de::Error> for HerbariumError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config {
            message: err.to_string(),
        }
    }
}

/// Trait for fail-open error handling.
///
/// Log the error as a warning and carry on with a safe value instead of
/// ending the session.
pub trait FailOpen<T> {
    /// Handle an error by logging a warning and returning the default value.
    fn fail_open_default(self, context: &str) -> T
    where
        T: Default;
}

impl<T> FailOpen<T> for Result<T> {
    fn fail_open_default(self, context: &str) -> T
    where
        T: Default,
    {
        match self {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!("{}: {} (fail-open: using default)", context, err);
                T::default()
            }
        }
    }
}

/// Exit codes for the Herbarium binary.
pub mod exit_codes {
    /// Every command ran (command errors in an interactive session included).
    pub const OK: i32 = 0;

    /// A script finished but at least one of its commands failed.
    pub const COMMAND_FAILED: i32 = 1;

    /// The process panicked.
    pub const CRASH: i32 = 3;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_command_display() {
        let err = HerbariumError::unknown_command("GROW");
        assert_eq!(err.to_string(), "Unknown command: GROW");
        assert_eq!(err.diagnostic(), "Unknown command.");
    }

    #[test]
    fn test_unknown_plant_kind_display() {
        let err = HerbariumError::unknown_plant_kind("fern");
        assert_eq!(err.to_string(), "Unknown plant type: fern");
        assert_eq!(err.diagnostic(), "Unknown plant type.");
    }

    #[test]
    fn test_malformed_condition_display() {
        let err = HerbariumError::malformed_condition("missing operator");
        assert_eq!(err.to_string(), "Malformed condition: missing operator");
        assert_eq!(err.diagnostic(), err.to_string());
    }

    #[test]
    fn test_malformed_record_display() {
        let err = HerbariumError::malformed_record("age must be a whole number");
        assert_eq!(
            err.to_string(),
            "Malformed record: age must be a whole number"
        );
    }

    #[test]
    fn test_storage_error_display() {
        let err = HerbariumError::storage(
            "/tmp/plants.txt",
            io::Error::new(io::ErrorKind::NotFound, "file not found"),
        );
        assert!(err.to_string().contains("storage error"));
        assert!(err.to_string().contains("/tmp/plants.txt"));
    }

    #[test]
    fn test_config_error_display() {
        let err = HerbariumError::config("invalid TOML");
        assert_eq!(err.to_string(), "config error: invalid TOML");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let err: HerbariumError = io_err.into();
        assert!(matches!(err, HerbariumError::Storage { .. }));
        assert_eq!(err.to_string(), "storage error at <input>: access denied");
    }

    #[test]
    fn test_from_toml_error() {
        let toml_err = toml::from_str::<toml::Table>("not = = toml").unwrap_err();
        let err: HerbariumError = toml_err.into();
        assert!(matches!(err, HerbariumError::Config { .. }));
    }

    #[test]
    fn test_fail_open_default() {
        let result: Result<Vec<String>> = Err(HerbariumError::config("test"));
        let value = result.fail_open_default("test context");
        assert!(value.is_empty());
    }

    #[test]
    fn test_fail_open_success() {
        let result: Result<i32> = Ok(100);
        assert_eq!(result.fail_open_default("test context"), 100);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_codes::OK, 0);
        assert_eq!(exit_codes::COMMAND_FAILED, 1);
        assert_eq!(exit_codes::CRASH, 3);
    }
}
