//! Countdown engine.
//!
//! A pure state machine over a [`StageSequence`]. It never sleeps or reads
//! a clock: the runner calls `tick()` once per elapsed second and forwards
//! the returned events to the renderer.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running(0) -> Running(1) -> ... -> Completed
//!            \______________\_______________-> Cancelled
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = CountdownEngine::new(sequence, bell_enabled);
//! engine.start();
//! // once per second:
//! engine.tick();
//! ```

use super::sequence::{Stage, StageSequence};
use crate::events::{AlertKind, Event};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running { stage_index: u128 },
    Completed,
    Cancelled,
}

impl TimerState {
    pub fn is_terminal(self) -> bool {
        matches!(self, TimerState::Completed | TimerState::Cancelled)
    }
}

/// Progress through the current stage. Exists only while running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownState {
    pub stage_index: u128,
    pub remaining_secs: u64,
    pub elapsed_secs: u64,
}

#[derive(Debug, Clone)]
pub struct CountdownEngine {
    sequence: StageSequence,
    bell_enabled: bool,
    state: TimerState,
    countdown: Option<CountdownState>,
}

impl CountdownEngine {
    pub fn new(sequence: StageSequence, bell_enabled: bool) -> Self {
        Self {
            sequence,
            bell_enabled,
            state: TimerState::Idle,
            countdown: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn countdown(&self) -> Option<&CountdownState> {
        self.countdown.as_ref()
    }

    pub fn current_stage(&self) -> Option<Stage> {
        self.countdown
            .as_ref()
            .and_then(|c| self.sequence.get(c.stage_index))
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Enter the first stage. No alert: nothing precedes it.
    pub fn start(&mut self) -> Vec<Event> {
        if self.state != TimerState::Idle {
            return Vec::new();
        }
        match self.enter_stage(0) {
            Some(event) => vec![event],
            None => {
                self.state = TimerState::Completed;
                vec![Event::RunCompleted]
            }
        }
    }

    /// Apply one second of progress.
    pub fn tick(&mut self) -> Vec<Event> {
        let TimerState::Running { stage_index } = self.state else {
            return Vec::new();
        };
        let Some(stage) = self.current_stage() else {
            return Vec::new();
        };
        let Some(countdown) = self.countdown.as_mut() else {
            return Vec::new();
        };

        countdown.remaining_secs = countdown.remaining_secs.saturating_sub(1);
        countdown.elapsed_secs += 1;
        let mut events = vec![Event::Tick {
            stage,
            remaining_secs: countdown.remaining_secs,
            elapsed_secs: countdown.elapsed_secs,
        }];
        if countdown.remaining_secs > 0 {
            return events;
        }

        events.push(Event::StageFinished { stage });
        if self.sequence.is_last(stage_index) {
            self.state = TimerState::Completed;
            self.countdown = None;
            tracing::info!(stages = self.sequence.len(), "run completed");
            events.push(Event::RunCompleted);
            if self.bell_enabled {
                events.push(Event::Alert {
                    kind: AlertKind::RunComplete,
                });
            }
        } else {
            if self.bell_enabled {
                events.push(Event::Alert {
                    kind: AlertKind::StageTransition,
                });
            }
            events.extend(self.enter_stage(stage_index + 1));
        }
        events
    }

    /// Abort the run. Progress is dropped.
    pub fn cancel(&mut self) -> Option<Event> {
        if self.state.is_terminal() {
            return None;
        }
        let (stage_index, remaining_secs) = self
            .countdown
            .take()
            .map(|c| (c.stage_index, c.remaining_secs))
            .unwrap_or((0, 0));
        self.state = TimerState::Cancelled;
        tracing::info!(stage_index, remaining_secs, "run cancelled");
        Some(Event::RunCancelled {
            stage_index,
            remaining_secs,
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn enter_stage(&mut self, index: u128) -> Option<Event> {
        let stage = self.sequence.get(index)?;
        self.state = TimerState::Running { stage_index: index };
        self.countdown = Some(CountdownState {
            stage_index: index,
            remaining_secs: stage.duration_secs,
            elapsed_secs: 0,
        });
        tracing::debug!(stage = %stage.label(), duration_secs = stage.duration_secs, "stage started");
        Some(Event::StageStarted { stage })
    }
}
