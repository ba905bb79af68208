//! Real-time driver for the countdown engine.
//!
//! One loop owns both the one-second tick clock and the renderer. Ticks are
//! scheduled on a fixed grid anchored at the run start, so time spent
//! rendering never accumulates as drift. Every iteration waits on either the
//! next tick or the cancellation token; all output for a tick is written
//! before the next wait begins.

use std::time::Duration;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use super::engine::{CountdownEngine, TimerState};
use crate::error::RenderError;
use crate::events::Event;
use crate::render::{OutputSink, Renderer};

const TICK: Duration = Duration::from_secs(1);

/// How a run ended. Cancellation is an outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    Cancelled,
}

impl RunOutcome {
    /// Process exit status: 0, or 130 as for SIGINT.
    pub fn exit_code(self) -> i32 {
        match self {
            RunOutcome::Completed => 0,
            RunOutcome::Cancelled => 130,
        }
    }
}

/// Drive `engine` to completion or cancellation, rendering as it goes.
///
/// # Errors
///
/// Returns [`RenderError`] as soon as the sink refuses a write; the run is
/// abandoned at that point.
pub async fn run_countdown<S: OutputSink>(
    engine: &mut CountdownEngine,
    renderer: &mut Renderer<S>,
    cancel: &CancellationToken,
) -> Result<RunOutcome, RenderError> {
    renderer.banner()?;
    render_all(renderer, &engine.start())?;

    let mut ticker = time::interval_at(Instant::now() + TICK, TICK);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);

    loop {
        if engine.state() == TimerState::Completed {
            return Ok(RunOutcome::Completed);
        }
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                if let Some(event) = engine.cancel() {
                    renderer.handle(&event)?;
                }
                return Ok(RunOutcome::Cancelled);
            }
            _ = ticker.tick() => {
                render_all(renderer, &engine.tick())?;
            }
        }
    }
}

fn render_all<S: OutputSink>(renderer: &mut Renderer<S>, events: &[Event]) -> Result<(), RenderError> {
    events.iter().try_for_each(|event| renderer.handle(event))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{RecordingSink, SinkOp};
    use crate::timer::build_sequence;

    fn updates(sink: &RecordingSink) -> usize {
        sink.ops()
            .iter()
            .filter(|op| matches!(op, SinkOp::Update(_)))
            .count()
    }

    #[tokio::test(start_paused = true)]
    async fn completes_after_total_duration() {
        let mut engine = CountdownEngine::new(build_sequence(3, 2, 0), true);
        let mut renderer = Renderer::new(RecordingSink::new(), true, 10);
        let started = Instant::now();

        let outcome = run_countdown(&mut engine, &mut renderer, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(outcome, RunOutcome::Completed);
        assert_eq!(started.elapsed(), Duration::from_secs(5));
        // one initial line per stage plus one per tick
        assert_eq!(updates(renderer.sink()), 2 + 5);
        assert_eq!(renderer.sink().bells(), 2);
        assert_eq!(renderer.sink().screen().last().map(String::as_str), Some("Done!"));
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_stops_at_tick_boundary() {
        let mut engine = CountdownEngine::new(build_sequence(60, 5, 0), true);
        let mut renderer = Renderer::new(RecordingSink::new(), true, 10);
        let cancel = CancellationToken::new();

        let trigger = cancel.clone();
        tokio::spawn(async move {
            time::sleep(Duration::from_millis(2500)).await;
            trigger.cancel();
        });

        let outcome = run_countdown(&mut engine, &mut renderer, &cancel).await.unwrap();

        assert_eq!(outcome, RunOutcome::Cancelled);
        assert_ne!(outcome.exit_code(), RunOutcome::Completed.exit_code());
        assert_eq!(engine.state(), TimerState::Cancelled);
        assert_eq!(updates(renderer.sink()), 1 + 2);
        assert_eq!(renderer.sink().screen().last().map(String::as_str), Some("Cancelled."));
    }

    #[tokio::test(start_paused = true)]
    async fn already_cancelled_token_stops_before_first_tick() {
        let mut engine = CountdownEngine::new(build_sequence(1, 1, 0), true);
        let mut renderer = Renderer::new(RecordingSink::new(), true, 10);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let outcome = run_countdown(&mut engine, &mut renderer, &cancel).await.unwrap();
        assert_eq!(outcome, RunOutcome::Cancelled);
        assert_eq!(updates(renderer.sink()), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn render_failure_is_fatal() {
        let mut engine = CountdownEngine::new(build_sequence(60, 5, 0), true);
        // banner, blank line, first live line, then the first tick fails
        let mut renderer = Renderer::new(RecordingSink::failing_after(3), true, 10);

        let result = run_countdown(&mut engine, &mut renderer, &CancellationToken::new()).await;
        assert!(result.is_err());
        assert_eq!(renderer.sink().ops().len(), 3);
    }
}
