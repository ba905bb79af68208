use std::future::Future;
use std::io;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use pomdot_core::{
    build_sequence, resolve, run_countdown, ConfigStore, CoreError, CountdownEngine, Defaults,
    RenderError, Renderer, SettingsLayer,
};

use crate::terminal::TerminalSink;

/// Default mode: resolve settings and count down through every stage.
///
/// Returns the exit code: 0 when completed, 130 when cancelled.
pub async fn run(store: &ConfigStore, cli: &SettingsLayer) -> Result<i32, CoreError> {
    let config = store.load()?;
    let settings = resolve(cli, &config, &Defaults::default())?;

    let sequence = build_sequence(
        settings.focus_seconds(),
        settings.rest_seconds(),
        settings.repeat_count(),
    );
    tracing::info!(
        stages = sequence.len(),
        total_secs = sequence.total_duration_secs(),
        "starting run"
    );
    let mut engine = CountdownEngine::new(sequence, settings.bell_enabled());

    let cancel = CancellationToken::new();
    // Must be armed before the cursor is hidden.
    let watcher = arm_watcher(cancel.clone(), tokio::signal::ctrl_c()).await;

    // The sink restores the cursor when dropped, on every path out of here.
    let sink = TerminalSink::new(std::io::stdout()).map_err(RenderError::from)?;
    let mut renderer = Renderer::new(sink, settings.compact(), settings.bar_width());
    let outcome = run_countdown(&mut engine, &mut renderer, &cancel).await;
    watcher.abort();

    Ok(outcome?.exit_code())
}

/// Spawn a task that cancels `cancel` when `signal` fires.
///
/// Returns only after the task has been polled once, so a signal handler
/// installed by that first poll is already in place.
async fn arm_watcher<F>(cancel: CancellationToken, signal: F) -> JoinHandle<()>
where
    F: Future<Output = io::Result<()>> + Send + 'static,
{
    let handle = tokio::spawn(async move {
        match signal.await {
            Ok(()) => cancel.cancel(),
            Err(e) => tracing::warn!(error = %e, "cannot listen for Ctrl-C"),
        }
    });
    tokio::task::yield_now().await;
    handle
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::task::Poll;

    #[tokio::test]
    async fn watcher_is_polled_before_returning() {
        let polled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&polled);
        let signal = std::future::poll_fn(move |_| {
            flag.store(true, Ordering::SeqCst);
            Poll::<io::Result<()>>::Pending
        });

        let cancel = CancellationToken::new();
        let watcher = arm_watcher(cancel.clone(), signal).await;
        assert!(polled.load(Ordering::SeqCst));
        assert!(!cancel.is_cancelled());
        watcher.abort();
    }

    #[tokio::test]
    async fn signal_cancels_token() {
        let cancel = CancellationToken::new();
        let watcher = arm_watcher(cancel.clone(), async { Ok(()) }).await;
        watcher.await.unwrap();
        assert!(cancel.is_cancelled());
    }

    #[tokio::test]
    async fn listener_error_leaves_token_alone() {
        let cancel = CancellationToken::new();
        let failed = async { Err(io::Error::new(io::ErrorKind::Unsupported, "no signals")) };
        let watcher = arm_watcher(cancel.clone(), failed).await;
        watcher.await.unwrap();
        assert!(!cancel.is_cancelled());
    }
}
