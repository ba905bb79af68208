//! TOML-based settings file.
//!
//! Recognised keys:
//! - `time`: `[FOCUS, REST, REPEAT]`, each a string or integer
//! - `compact`: boolean
//! - `no_bell`: boolean
//! - `bar_width`: integer
//!
//! Stored at `~/.config/pomdot/config.toml` unless `--config` says otherwise.
//! Loading only type-checks; range checks happen during resolution so the
//! error can name the field that was actually selected.

use serde::Deserialize;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::duration::{format_duration_token, MIN_BAR_WIDTH};
use crate::error::ConfigError;
use crate::settings::{
    DEFAULT_BAR_WIDTH, DEFAULT_COMPACT, DEFAULT_FOCUS_SECONDS, DEFAULT_NO_BELL, DEFAULT_REPEAT,
    DEFAULT_REST_SECONDS,
};

pub const CONFIG_FILENAME: &str = "config.toml";

/// Values read from the config file. Absent keys stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigValues {
    pub time: Option<[String; 3]>,
    pub compact: Option<bool>,
    pub no_bell: Option<bool>,
    pub bar_width: Option<i64>,
}

/// A complete record, as written by `--write-config` and `--save-config`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigRecord {
    pub time: [String; 3],
    pub compact: bool,
    pub no_bell: bool,
    pub bar_width: u16,
}

impl Default for ConfigRecord {
    fn default() -> Self {
        Self {
            time: [
                format_duration_token(DEFAULT_FOCUS_SECONDS),
                format_duration_token(DEFAULT_REST_SECONDS),
                DEFAULT_REPEAT.to_string(),
            ],
            compact: DEFAULT_COMPACT,
            no_bell: DEFAULT_NO_BELL,
            bar_width: DEFAULT_BAR_WIDTH,
        }
    }
}

impl ConfigRecord {
    /// Render the commented file body.
    pub fn render(&self) -> String {
        let [focus, rest, repeat] = &self.time;
        let focus = toml::Value::String(focus.clone());
        let rest = toml::Value::String(rest.clone());
        let repeat = toml::Value::String(repeat.clone());
        indoc::formatdoc! {"
            # Pomdot config file
            # Default location: ~/.config/pomdot/{filename}
            # Command-line flags override these values.

            # time = [FOCUS, REST, REPEAT]
            # FOCUS and REST formats:
            # - N  -> minutes
            # - Nm -> minutes
            # - Ns -> seconds
            # - minimum value: 1
            # - maximum value: none
            # REPEAT format:
            # - non-negative integer
            # - minimum value: 0
            # - maximum value: none
            time = [{focus}, {rest}, {repeat}]

            # Compact output mode
            # - expected values: true or false
            compact = {compact}

            # Disable completion bell
            # - expected values: true or false
            no_bell = {no_bell}

            # Countdown bar width
            # - expected value: integer
            # - minimum value: {min_width}
            # - maximum value: none
            bar_width = {bar_width}
            ",
            filename = CONFIG_FILENAME,
            focus = focus,
            rest = rest,
            repeat = repeat,
            compact = self.compact,
            no_bell = self.no_bell,
            min_width = MIN_BAR_WIDTH,
            bar_width = self.bar_width,
        }
    }
}

/// Shape of the file on disk. Every key is kept as a raw value so type
/// errors can be reported against the key that caused them.
#[derive(Debug, Deserialize)]
struct ConfigFile {
    time: Option<toml::Value>,
    compact: Option<toml::Value>,
    no_bell: Option<toml::Value>,
    bar_width: Option<toml::Value>,
    #[serde(flatten)]
    unknown: toml::Table,
}

/// Reads and writes the settings file at a fixed path.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `~/.config/pomdot/config.toml`.
    pub fn at_default_location() -> Self {
        Self::new(super::default_config_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the file. A missing file is an empty layer, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML,
    /// contains unknown keys, or holds a value of the wrong type.
    pub fn load(&self) -> Result<ConfigValues, ConfigError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no config file, using empty layer");
                return Ok(ConfigValues::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let file: ConfigFile = toml::from_str(&content).map_err(|err| ConfigError::ParseFailed {
            path: self.path.clone(),
            message: err.message().to_string(),
        })?;

        if !file.unknown.is_empty() {
            let mut keys: Vec<String> = file.unknown.keys().cloned().collect();
            keys.sort();
            return Err(ConfigError::UnknownKeys {
                path: self.path.clone(),
                keys,
            });
        }

        let values = ConfigValues {
            time: file.time.map(time_values).transpose()?,
            compact: file.compact.map(|v| boolean("compact", v)).transpose()?,
            no_bell: file.no_bell.map(|v| boolean("no_bell", v)).transpose()?,
            bar_width: file.bar_width.map(integer_bar_width).transpose()?,
        };
        tracing::debug!(path = %self.path.display(), ?values, "loaded config file");
        Ok(values)
    }

    /// Write `record`, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::AlreadyExists`] if the file exists and
    /// `overwrite` is false, or [`ConfigError::Io`] on any filesystem failure.
    pub fn write(&self, record: &ConfigRecord, overwrite: bool) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let content = record.render();
        if overwrite {
            fs::write(&self.path, content).map_err(io_err)?;
        } else {
            let mut file = fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&self.path)
                .map_err(|err| match err.kind() {
                    ErrorKind::AlreadyExists => ConfigError::AlreadyExists {
                        path: self.path.clone(),
                    },
                    _ => io_err(err),
                })?;
            file.write_all(content.as_bytes()).map_err(io_err)?;
        }

        tracing::info!(path = %self.path.display(), overwrite, "wrote config file");
        Ok(())
    }
}

fn time_values(value: toml::Value) -> Result<[String; 3], ConfigError> {
    let shape = "expected an array with 3 values (focus, rest, repeat)";
    let toml::Value::Array(items) = value else {
        return Err(ConfigError::invalid("time", shape));
    };
    let items: Vec<String> = items
        .into_iter()
        .map(|item| match item {
            toml::Value::String(s) => Ok(s),
            toml::Value::Integer(n) => Ok(n.to_string()),
            _ => Err(ConfigError::invalid(
                "time",
                "each value must be a string or integer",
            )),
        })
        .collect::<Result<_, _>>()?;
    <[String; 3]>::try_from(items).map_err(|_| ConfigError::invalid("time", shape))
}

fn boolean(field: &str, value: toml::Value) -> Result<bool, ConfigError> {
    value
        .as_bool()
        .ok_or_else(|| ConfigError::invalid(field, "expected true or false"))
}

fn integer_bar_width(value: toml::Value) -> Result<i64, ConfigError> {
    value
        .as_integer()
        .ok_or_else(|| ConfigError::invalid("bar_width", "expected an integer"))
}
