use crate::timer::Stage;

/// Audible cues. Only emitted when the bell is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    /// A stage ended and the next one begins.
    StageTransition,
    /// The last stage ended.
    RunComplete,
}

/// Every state change of the countdown engine produces an Event.
/// The renderer turns them into terminal output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    StageStarted {
        stage: Stage,
    },
    Tick {
        stage: Stage,
        remaining_secs: u64,
        elapsed_secs: u64,
    },
    StageFinished {
        stage: Stage,
    },
    Alert {
        kind: AlertKind,
    },
    RunCompleted,
    RunCancelled {
        stage_index: u128,
        remaining_secs: u64,
    },
}
