mod engine;
mod progress;
mod runner;
mod sequence;

pub use engine::{CountdownEngine, CountdownState, TimerState};
pub use progress::{filled_cells, render_bar};
pub use runner::{run_countdown, RunOutcome};
pub use sequence::{build_sequence, Stage, StageKind, StageSequence};
