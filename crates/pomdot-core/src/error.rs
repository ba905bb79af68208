//! Core error types for pomdot-core.
//!
//! Parsing, configuration and rendering each get their own thiserror enum;
//! [`CoreError`] ties them together for callers that do not care which
//! stage failed.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for pomdot-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Malformed duration, repeat or bar width token
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Output sink failure during a run
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Token parsing errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid time format '{token}'. Use N, Ns, or Nm (examples: 25, 25m, 1500s)")]
    InvalidDurationFormat { token: String },

    #[error("time '{token}' must be greater than zero")]
    DurationTooSmall { token: String },

    #[error("repeat count '{token}' must be a non-negative integer")]
    InvalidRepeatFormat { token: String },

    #[error("bar width '{token}' must be an integer")]
    InvalidBarWidth { token: String },

    #[error("bar width must be at least {min} (got {width})")]
    BarWidthTooSmall { width: i64, min: u16 },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A config-file field is out of range or has the wrong type
    #[error("invalid '{field}' in config file: {reason}")]
    InvalidConfigValue { field: String, reason: String },

    /// The file is not valid TOML or not a table
    #[error("invalid TOML in config file {path}: {message}")]
    ParseFailed { path: PathBuf, message: String },

    #[error("unknown config key(s) in {path}: {}", keys.join(", "))]
    UnknownKeys { path: PathBuf, keys: Vec<String> },

    #[error("config file already exists: {path} (use --force to overwrite)")]
    AlreadyExists { path: PathBuf },

    #[error("cannot access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: &str, reason: impl ToString) -> Self {
        ConfigError::InvalidConfigValue {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Name of the offending field, when the error concerns one.
    pub fn field(&self) -> Option<&str> {
        match self {
            ConfigError::InvalidConfigValue { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// The output sink could not be written to.
#[derive(Error, Debug)]
#[error("cannot write to terminal: {0}")]
pub struct RenderError(#[from] pub std::io::Error);

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
