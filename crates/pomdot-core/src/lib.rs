//! # Pomdot Core Library
//!
//! The logic behind the `pomdot` terminal timer. The CLI is a thin layer
//! that parses arguments, owns the terminal and forwards Ctrl-C.
//!
//! ## Architecture
//!
//! - **Settings**: three-layer resolution (command line, config file,
//!   built-in defaults) with a source tag per field
//! - **Storage**: the TOML config file
//! - **Timer**: stage sequencer, a pure countdown state machine, and the
//!   tokio loop that ticks it once per second
//! - **Render**: compact/full terminal layout over an output sink trait
//!
//! ## Key Components
//!
//! - [`resolve`] / [`resolve_for_save`]: build [`EffectiveSettings`]
//! - [`build_sequence`]: focus/rest stages ending on rest
//! - [`CountdownEngine`]: countdown state machine
//! - [`run_countdown`]: real-time driver with cancellation

pub mod duration;
pub mod error;
pub mod events;
pub mod render;
pub mod settings;
pub mod storage;
pub mod timer;

pub use duration::{parse_bar_width, parse_focus_or_rest, parse_repeat};
pub use error::{ConfigError, CoreError, ParseError, RenderError};
pub use events::{AlertKind, Event};
pub use render::{OutputSink, Renderer};
pub use settings::{
    resolve, resolve_for_save, Defaults, EffectiveSettings, SettingsLayer, Source, Sourced,
};
pub use storage::{ConfigRecord, ConfigStore, ConfigValues};
pub use timer::{
    build_sequence, run_countdown, CountdownEngine, RunOutcome, Stage, StageKind, StageSequence,
    TimerState,
};
