//! Effective settings and the three-layer resolution that produces them.
//!
//! Every field is taken from the first layer that has it, in the order
//! command line, config file, built-in default. The winning layer is kept
//! next to the value so `--status` can report it.

mod resolver;
mod source;

pub use resolver::{resolve, resolve_for_save, Defaults, EffectiveSettings, FieldReport};
pub use source::{SettingsLayer, Source, Sourced};

/// Built-in focus length, 30 minutes.
pub const DEFAULT_FOCUS_SECONDS: u64 = 30 * 60;
/// Built-in rest length, 5 minutes.
pub const DEFAULT_REST_SECONDS: u64 = 5 * 60;
pub const DEFAULT_REPEAT: u64 = 0;
pub const DEFAULT_COMPACT: bool = false;
pub const DEFAULT_NO_BELL: bool = false;
pub const DEFAULT_BAR_WIDTH: u16 = 30;
