use std::fmt;

/// The layer a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    Cli,
    Config,
    Default,
}

impl Source {
    pub fn as_str(self) -> &'static str {
        match self {
            Source::Cli => "cli",
            Source::Config => "config",
            Source::Default => "default",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved value tagged with its source layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sourced<T> {
    pub value: T,
    pub source: Source,
}

impl<T> Sourced<T> {
    pub fn new(value: T, source: Source) -> Self {
        Self { value, source }
    }
}

/// One already-validated settings layer; `None` means the layer is silent
/// about that field.
///
/// The command line arrives in this form because clap runs the duration
/// parser on each token before resolution starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettingsLayer {
    pub focus_seconds: Option<u64>,
    pub rest_seconds: Option<u64>,
    pub repeat_count: Option<u64>,
    pub compact: Option<bool>,
    pub bell_enabled: Option<bool>,
    pub bar_width: Option<u16>,
}

impl SettingsLayer {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
