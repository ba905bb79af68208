use super::source::{SettingsLayer, Source, Sourced};
use super::{
    DEFAULT_BAR_WIDTH, DEFAULT_COMPACT, DEFAULT_FOCUS_SECONDS, DEFAULT_NO_BELL, DEFAULT_REPEAT,
    DEFAULT_REST_SECONDS,
};
use crate::duration::{
    format_duration_token, format_hhmmss, parse_focus_or_rest, parse_repeat, validate_bar_width,
};
use crate::error::{ConfigError, ParseError};
use crate::storage::{ConfigRecord, ConfigValues};

/// The built-in layer. Always complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Defaults {
    pub focus_seconds: u64,
    pub rest_seconds: u64,
    pub repeat_count: u64,
    pub compact: bool,
    pub bell_enabled: bool,
    pub bar_width: u16,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            focus_seconds: DEFAULT_FOCUS_SECONDS,
            rest_seconds: DEFAULT_REST_SECONDS,
            repeat_count: DEFAULT_REPEAT,
            compact: DEFAULT_COMPACT,
            bell_enabled: !DEFAULT_NO_BELL,
            bar_width: DEFAULT_BAR_WIDTH,
        }
    }
}

/// Fully resolved, validated settings. Built once, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectiveSettings {
    focus_seconds: Sourced<u64>,
    rest_seconds: Sourced<u64>,
    repeat_count: Sourced<u64>,
    compact: Sourced<bool>,
    bell_enabled: Sourced<bool>,
    bar_width: Sourced<u16>,
}

/// One line of `--status` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldReport {
    pub name: &'static str,
    pub value: String,
    pub source: Source,
}

impl EffectiveSettings {
    pub fn focus_seconds(&self) -> u64 {
        self.focus_seconds.value
    }

    pub fn rest_seconds(&self) -> u64 {
        self.rest_seconds.value
    }

    pub fn repeat_count(&self) -> u64 {
        self.repeat_count.value
    }

    pub fn compact(&self) -> bool {
        self.compact.value
    }

    pub fn bell_enabled(&self) -> bool {
        self.bell_enabled.value
    }

    pub fn bar_width(&self) -> u16 {
        self.bar_width.value
    }

    /// Source tags for every field, in display order.
    pub fn sources(&self) -> [(&'static str, Source); 6] {
        [
            ("focus", self.focus_seconds.source),
            ("rest", self.rest_seconds.source),
            ("repeat", self.repeat_count.source),
            ("compact", self.compact.source),
            ("bell", self.bell_enabled.source),
            ("bar_width", self.bar_width.source),
        ]
    }

    /// Human-readable value and source for each field.
    pub fn report(&self) -> Vec<FieldReport> {
        let duration =
            |s: u64| format!("\"{}\" ({})", format_duration_token(s), format_hhmmss(s));
        let values = [
            duration(self.focus_seconds()),
            duration(self.rest_seconds()),
            self.repeat_count().to_string(),
            self.compact().to_string(),
            self.bell_enabled().to_string(),
            self.bar_width().to_string(),
        ];
        self.sources()
            .into_iter()
            .zip(values)
            .map(|((name, source), value)| FieldReport { name, value, source })
            .collect()
    }

    /// The record to persist for these settings.
    pub fn to_config_record(&self) -> ConfigRecord {
        ConfigRecord {
            time: [
                format_duration_token(self.focus_seconds()),
                format_duration_token(self.rest_seconds()),
                self.repeat_count().to_string(),
            ],
            compact: self.compact(),
            no_bell: !self.bell_enabled(),
            bar_width: self.bar_width(),
        }
    }
}

/// Merge command line, config file and defaults.
///
/// Config values are validated only when selected; a bad one fails the
/// whole resolution instead of falling back to the default.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidConfigValue`] naming the config key whose
/// value was selected but is out of range or malformed.
pub fn resolve(
    cli: &SettingsLayer,
    config: &ConfigValues,
    defaults: &Defaults,
) -> Result<EffectiveSettings, ConfigError> {
    let [focus, rest, repeat] = match &config.time {
        Some([focus, rest, repeat]) => [Some(focus), Some(rest), Some(repeat)],
        None => [None, None, None],
    };

    let settings = EffectiveSettings {
        focus_seconds: select(
            "time",
            cli.focus_seconds,
            focus,
            defaults.focus_seconds,
            |token| parse_focus_or_rest(token).map_err(|e| time_error("focus", e)),
        )?,
        rest_seconds: select(
            "time",
            cli.rest_seconds,
            rest,
            defaults.rest_seconds,
            |token| parse_focus_or_rest(token).map_err(|e| time_error("rest", e)),
        )?,
        repeat_count: select(
            "time",
            cli.repeat_count,
            repeat,
            defaults.repeat_count,
            |token| parse_repeat(token).map_err(|e| time_error("repeat", e)),
        )?,
        compact: select("compact", cli.compact, config.compact, defaults.compact, Ok)?,
        bell_enabled: select(
            "no_bell",
            cli.bell_enabled,
            config.no_bell,
            defaults.bell_enabled,
            |no_bell| Ok(!no_bell),
        )?,
        bar_width: select(
            "bar_width",
            cli.bar_width,
            config.bar_width,
            defaults.bar_width,
            |width| validate_bar_width(width).map_err(|e| e.to_string()),
        )?,
    };

    for (field, source) in settings.sources() {
        tracing::debug!(field, %source, "resolved setting");
    }
    Ok(settings)
}

/// Merge command line and defaults only, for `--save-config`.
///
/// The config file is never consulted, so saving cannot quietly carry
/// forward values that are already on disk.
pub fn resolve_for_save(cli: &SettingsLayer, defaults: &Defaults) -> EffectiveSettings {
    fn either<T>(cli: Option<T>, default: T) -> Sourced<T> {
        match cli {
            Some(value) => Sourced::new(value, Source::Cli),
            None => Sourced::new(default, Source::Default),
        }
    }

    EffectiveSettings {
        focus_seconds: either(cli.focus_seconds, defaults.focus_seconds),
        rest_seconds: either(cli.rest_seconds, defaults.rest_seconds),
        repeat_count: either(cli.repeat_count, defaults.repeat_count),
        compact: either(cli.compact, defaults.compact),
        bell_enabled: either(cli.bell_enabled, defaults.bell_enabled),
        bar_width: either(cli.bar_width, defaults.bar_width),
    }
}

fn select<T, R>(
    field: &str,
    cli: Option<T>,
    config: Option<R>,
    default: T,
    validate: impl FnOnce(R) -> Result<T, String>,
) -> Result<Sourced<T>, ConfigError> {
    if let Some(value) = cli {
        return Ok(Sourced::new(value, Source::Cli));
    }
    if let Some(raw) = config {
        let value = validate(raw).map_err(|reason| ConfigError::invalid(field, reason))?;
        return Ok(Sourced::new(value, Source::Config));
    }
    Ok(Sourced::new(default, Source::Default))
}

fn time_error(part: &str, err: ParseError) -> String {
    format!("{part} value: {err}")
}
