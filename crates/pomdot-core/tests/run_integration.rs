//! Integration tests for the settings-to-countdown pipeline.
//!
//! Exercises the config file, resolution, sequencing and the tick loop
//! together, with tokio's paused clock standing in for wall time.

use std::fs;
use std::time::Duration;

use pomdot_core::render::{RecordingSink, SinkOp};
use pomdot_core::{
    build_sequence, resolve, run_countdown, ConfigError, ConfigStore, CountdownEngine, Defaults,
    Renderer, RunOutcome, SettingsLayer, Source, StageKind,
};
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

fn store_with(content: &str) -> (TempDir, ConfigStore) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, content).unwrap();
    (dir, ConfigStore::new(path))
}

#[test]
fn test_config_minutes_become_stages() {
    let (_dir, store) = store_with("time = [\"25\", \"5\", \"0\"]\n");
    let config = store.load().unwrap();
    let settings = resolve(&SettingsLayer::default(), &config, &Defaults::default()).unwrap();

    let sequence = build_sequence(
        settings.focus_seconds(),
        settings.rest_seconds(),
        settings.repeat_count(),
    );
    let shape: Vec<(StageKind, u64)> = sequence
        .iter()
        .map(|s| (s.kind, s.duration_secs))
        .collect();
    assert_eq!(shape, [(StageKind::Focus, 1500), (StageKind::Rest, 300)]);
    assert_eq!(settings.sources()[0].1, Source::Config);
}

#[test]
fn test_small_bar_width_in_config_is_rejected() {
    let (_dir, store) = store_with("bar_width = 5\n");
    let config = store.load().unwrap();
    let err = resolve(&SettingsLayer::default(), &config, &Defaults::default()).unwrap_err();
    assert!(matches!(
        &err,
        ConfigError::InvalidConfigValue { field, .. } if field == "bar_width"
    ));
}

#[tokio::test(start_paused = true)]
async fn test_half_way_bar_in_full_run() {
    let cli = SettingsLayer {
        focus_seconds: Some(10),
        rest_seconds: Some(5),
        repeat_count: Some(0),
        bar_width: Some(40),
        bell_enabled: Some(true),
        compact: Some(false),
    };
    let (_dir, store) = store_with("");
    let settings = resolve(&cli, &store.load().unwrap(), &Defaults::default()).unwrap();

    let mut engine = CountdownEngine::new(
        build_sequence(
            settings.focus_seconds(),
            settings.rest_seconds(),
            settings.repeat_count(),
        ),
        settings.bell_enabled(),
    );
    let mut renderer = Renderer::new(
        RecordingSink::new(),
        settings.compact(),
        settings.bar_width(),
    );

    let outcome = run_countdown(&mut engine, &mut renderer, &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(outcome, RunOutcome::Completed);

    let half = format!(
        "Stage: Focus 1/1 | Remaining: 00:00:05 [{}{}]",
        "#".repeat(20),
        "-".repeat(20)
    );
    let sink = renderer.sink();
    assert!(sink.ops().contains(&SinkOp::Update(half)));
    assert_eq!(sink.bells(), 2);

    let screen = sink.screen();
    assert_eq!(screen[0], "Pomdot v1.0.0");
    assert!(screen.iter().any(|l| l == "Stage:     Rest 1/1"));
    assert_eq!(screen.last().map(String::as_str), Some("Done!"));
}

#[tokio::test(start_paused = true)]
async fn test_cancel_leaves_config_untouched() {
    let (_dir, store) = store_with("compact = true\n");
    let before = fs::read_to_string(store.path()).unwrap();
    let settings =
        resolve(&SettingsLayer::default(), &store.load().unwrap(), &Defaults::default()).unwrap();

    let mut engine = CountdownEngine::new(
        build_sequence(
            settings.focus_seconds(),
            settings.rest_seconds(),
            settings.repeat_count(),
        ),
        settings.bell_enabled(),
    );
    let mut renderer = Renderer::new(RecordingSink::new(), settings.compact(), settings.bar_width());
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(90)).await;
        trigger.cancel();
    });

    let outcome = run_countdown(&mut engine, &mut renderer, &cancel).await.unwrap();
    assert_eq!(outcome, RunOutcome::Cancelled);
    assert_ne!(outcome.exit_code(), 0);
    assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
}
