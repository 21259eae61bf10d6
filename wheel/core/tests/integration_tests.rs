//! Integration tests for the wheel session
//!
//! These tests drive a full session the way a surface would:
//! - Mood filtering feeding the selector
//! - The complete spin choreography and its ordering
//! - Re-entrancy of spin and reset
//! - Share with primary and fallback clipboards
//! - The driver actor under paused tokio time

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::NamedTempFile;
use tokio::sync::mpsc;
use tokio::time::Instant;

use wheel_core::{
    load_config_from_path, spawn_wheel, CardMarkup, Catalog, ExportOutcome, ItemId,
    MemoryClipboard, Mood, NoClipboard, Phase, ShareExporter, Wheel, WheelConfig, WheelEvent,
    WheelMessage, COPY_FAILED_MESSAGE, SPIN_LABEL,
};

// =============================================================================
// Helpers
// =============================================================================

fn pancakes_and_oats() -> Catalog {
    Catalog::from_markup(vec![
        CardMarkup::new("Pancakes", Some("comfort")).with_meta("Comfort • 520 kcal"),
        CardMarkup::new("Oats", Some("healthy")).with_meta("Healthy • 310 kcal"),
    ])
    .unwrap()
}

fn session(catalog: Catalog, exporter: ShareExporter) -> (Wheel, mpsc::Receiver<WheelMessage>) {
    let (tx, rx) = mpsc::channel(4096);
    let wheel = Wheel::new(catalog, WheelConfig::default(), exporter, tx)
        .with_rng(StdRng::seed_from_u64(2024));
    (wheel, rx)
}

fn drain(rx: &mut mpsc::Receiver<WheelMessage>) -> Vec<WheelMessage> {
    let mut out = Vec::new();
    while let Ok(msg) = rx.try_recv() {
        out.push(msg);
    }
    out
}

fn end_of_spin(t0: Instant) -> Instant {
    t0 + WheelConfig::default().timing.sequence_length()
}

fn phases(messages: &[WheelMessage]) -> Vec<Phase> {
    messages
        .iter()
        .filter_map(|m| match m {
            WheelMessage::PhaseChanged { phase } => Some(*phase),
            _ => None,
        })
        .collect()
}

fn count(messages: &[WheelMessage], wanted: fn(&WheelMessage) -> bool) -> usize {
    messages.iter().filter(|m| wanted(m)).count()
}

// =============================================================================
// Selection Scenarios
// =============================================================================

#[tokio::test]
async fn test_healthy_mood_always_picks_oats() {
    for seed in 0..20 {
        let (tx, mut rx) = mpsc::channel(4096);
        let mut wheel = Wheel::new(
            pancakes_and_oats(),
            WheelConfig::default(),
            ShareExporter::disabled(),
            tx,
        )
        .with_rng(StdRng::seed_from_u64(seed));

        let t0 = Instant::now();
        wheel
            .handle_event_at(WheelEvent::MoodChanged { mood: Mood::new("healthy") }, t0)
            .await
            .unwrap();
        wheel
            .handle_event_at(WheelEvent::SpinRequested, t0)
            .await
            .unwrap();
        assert_eq!(wheel.selection(), Some(ItemId(1)));

        wheel.poll(end_of_spin(t0)).await;
        let shown = drain(&mut rx)
            .into_iter()
            .find_map(|m| match m {
                WheelMessage::ShowResult { card, .. } => Some(card),
                _ => None,
            })
            .unwrap();
        assert_eq!(shown.name, "Oats");
        assert_eq!(shown.meta, "Healthy • 310 kcal");
    }
}

#[tokio::test]
async fn test_unmatched_mood_falls_back_to_full_catalog() {
    let (mut wheel, mut rx) = session(pancakes_and_oats(), ShareExporter::disabled());

    wheel.set_mood(Mood::new("relaxed")).await;
    assert_eq!(
        drain(&mut rx),
        vec![WheelMessage::CardsFiltered {
            mood: Mood::new("relaxed"),
            visible: vec![ItemId(0), ItemId(1)],
            fallback: true,
        }]
    );

    assert!(wheel.request_spin(Instant::now()).await);
    assert!(wheel.selection().is_some());
    assert!(drain(&mut rx).iter().any(|m| matches!(
        m,
        WheelMessage::Notify { message, .. } if message.contains("Relaxed")
    )));
}

// =============================================================================
// Choreography
// =============================================================================

#[tokio::test]
async fn test_full_spin_message_order() {
    let (mut wheel, mut rx) = session(pancakes_and_oats(), ShareExporter::disabled());
    let t0 = Instant::now();

    wheel.request_spin(t0).await;
    wheel.poll(end_of_spin(t0)).await;
    let messages = drain(&mut rx);

    assert_eq!(
        messages.first(),
        Some(&WheelMessage::SpinControl {
            enabled: false,
            label: "Spinning...".to_string(),
        })
    );
    assert_eq!(
        phases(&messages),
        vec![
            Phase::Pulsing,
            Phase::Scrolling,
            Phase::Settling,
            Phase::Revealing,
            Phase::Resetting,
            Phase::Idle,
        ]
    );

    // Exactly one result, strictly after the settle
    assert_eq!(
        count(&messages, |m| matches!(m, WheelMessage::ShowResult { .. })),
        1
    );
    let settle = messages
        .iter()
        .position(|m| matches!(m, WheelMessage::Settle { .. }))
        .unwrap();
    let reveal = messages
        .iter()
        .position(|m| matches!(m, WheelMessage::ShowResult { .. }))
        .unwrap();
    assert!(reveal > settle);

    // No motion after the track stopped
    assert!(messages[settle..]
        .iter()
        .all(|m| !matches!(m, WheelMessage::PulseTick { .. } | WheelMessage::ScrollTo { .. })));

    // Spin control comes back last
    assert_eq!(
        messages.last(),
        Some(&WheelMessage::SpinControl {
            enabled: true,
            label: SPIN_LABEL.to_string(),
        })
    );
    assert!(!wheel.is_busy());
}

#[tokio::test]
async fn test_double_spin_within_ten_ms_runs_once() {
    let (mut wheel, mut rx) = session(pancakes_and_oats(), ShareExporter::disabled());
    let t0 = Instant::now();

    wheel
        .handle_event_at(WheelEvent::SpinRequested, t0)
        .await
        .unwrap();
    let first = wheel.selection();
    wheel
        .handle_event_at(WheelEvent::SpinRequested, t0 + Duration::from_millis(10))
        .await
        .unwrap();
    assert_eq!(wheel.selection(), first);

    wheel.poll(end_of_spin(t0) + Duration::from_secs(5)).await;
    let messages = drain(&mut rx);
    assert_eq!(
        count(&messages, |m| matches!(m, WheelMessage::Settle { .. })),
        1
    );
    assert_eq!(
        count(&messages, |m| matches!(m, WheelMessage::ShowResult { .. })),
        1
    );
    assert_eq!(
        count(&messages, |m| matches!(m, WheelMessage::SpinControl { enabled: false, .. })),
        1
    );
}

#[tokio::test]
async fn test_spin_rejected_during_reset_phase() {
    let (mut wheel, _rx) = session(pancakes_and_oats(), ShareExporter::disabled());
    let t0 = Instant::now();
    wheel.request_spin(t0).await;

    // 3500 spin + 1200 reveal + 500 delay puts us inside the reset transition
    wheel.poll(t0 + Duration::from_millis(5300)).await;
    assert_eq!(wheel.phase(), Phase::Resetting);
    assert!(!wheel.request_spin(t0 + Duration::from_millis(5300)).await);
}

// =============================================================================
// Reset
// =============================================================================

#[tokio::test]
async fn test_reset_twice_is_harmless() {
    let (mut wheel, mut rx) = session(pancakes_and_oats(), ShareExporter::disabled());
    let t0 = Instant::now();
    wheel.request_spin(t0).await;
    wheel.poll(end_of_spin(t0)).await;
    drain(&mut rx);
    assert!(wheel.current_result().is_some());

    wheel
        .handle_event(WheelEvent::ResetRequested)
        .await
        .unwrap();
    wheel
        .handle_event(WheelEvent::ResetRequested)
        .await
        .unwrap();

    let messages = drain(&mut rx);
    assert_eq!(
        count(&messages, |m| matches!(m, WheelMessage::ShowSelection { .. })),
        1
    );
    assert_eq!(wheel.selection(), None);
    assert!(wheel.current_result().is_none());
}

#[tokio::test]
async fn test_reset_without_result_sends_nothing() {
    let (mut wheel, mut rx) = session(pancakes_and_oats(), ShareExporter::disabled());
    wheel.reset().await;
    assert!(drain(&mut rx).is_empty());
}

// =============================================================================
// Share
// =============================================================================

#[tokio::test]
async fn test_share_copies_result_text() {
    let clipboard = Arc::new(MemoryClipboard::new());
    let exporter = ShareExporter::new(clipboard.clone(), Arc::new(NoClipboard));
    let (mut wheel, mut rx) = session(pancakes_and_oats(), exporter);

    wheel.set_mood(Mood::new("comfort")).await;
    let t0 = Instant::now();
    wheel.request_spin(t0).await;
    wheel.poll(end_of_spin(t0)).await;
    drain(&mut rx);

    wheel
        .handle_event(WheelEvent::ShareRequested)
        .await
        .unwrap();

    assert_eq!(
        clipboard.last().await.as_deref(),
        Some("🍳 My Breakfast Choice: Pancakes\nComfort • 520 kcal\n\nTry the Breakfast Wheel!")
    );
    assert_eq!(
        drain(&mut rx),
        vec![WheelMessage::ShareCopied {
            method: ExportOutcome::Primary,
            feedback: Duration::from_secs(2),
        }]
    );
}

#[tokio::test]
async fn test_share_uses_fallback_then_alerts() {
    let fallback = Arc::new(MemoryClipboard::new());
    let exporter = ShareExporter::new(Arc::new(NoClipboard), fallback.clone());
    let (mut wheel, mut rx) = session(pancakes_and_oats(), exporter);
    let t0 = Instant::now();
    wheel.request_spin(t0).await;
    wheel.poll(end_of_spin(t0)).await;
    drain(&mut rx);

    wheel.share().await;
    assert!(matches!(
        drain(&mut rx).as_slice(),
        [WheelMessage::ShareCopied {
            method: ExportOutcome::Fallback,
            ..
        }]
    ));
    assert_eq!(fallback.write_count().await, 1);

    let (mut wheel, mut rx) = session(pancakes_and_oats(), ShareExporter::disabled());
    wheel.request_spin(t0).await;
    wheel.poll(end_of_spin(t0)).await;
    drain(&mut rx);

    wheel.share().await;
    assert_eq!(
        drain(&mut rx),
        vec![WheelMessage::Alert {
            message: COPY_FAILED_MESSAGE.to_string(),
        }]
    );
}

#[tokio::test]
async fn test_share_without_result_is_noop() {
    let clipboard = Arc::new(MemoryClipboard::new());
    let exporter = ShareExporter::new(clipboard.clone(), Arc::new(NoClipboard));
    let (mut wheel, mut rx) = session(pancakes_and_oats(), exporter);

    wheel.share().await;
    assert!(drain(&mut rx).is_empty());
    assert_eq!(clipboard.write_count().await, 0);
}

// =============================================================================
// Configuration
// =============================================================================

#[tokio::test]
async fn test_config_and_catalog_files_drive_a_session() {
    let mut cards = NamedTempFile::new().unwrap();
    writeln!(
        cards,
        "[[card]]\ntitle = \"Shakshuka\"\nmood = \"relaxed\"\n\n[[card]]\ntitle = \"Granola\"\nmood = \"healthy\""
    )
    .unwrap();

    let mut config_file = NamedTempFile::new().unwrap();
    writeln!(
        config_file,
        "[timing]\nspin_duration_ms = 1000\nreveal_pause_ms = 100\nreset_delay_ms = 100\nreset_transition_ms = 100\n\n[catalog]\npath = \"{}\"",
        cards.path().display()
    )
    .unwrap();

    let config = load_config_from_path(Some(config_file.path().to_path_buf())).unwrap();
    let catalog = Catalog::load_or_builtin(config.catalog_path.as_deref()).unwrap();
    assert_eq!(catalog.len(), 2);

    let (tx, mut rx) = mpsc::channel(4096);
    let mut wheel = Wheel::new(catalog, config, ShareExporter::disabled(), tx)
        .with_mood(Mood::new("relaxed"));
    let t0 = Instant::now();
    wheel.request_spin(t0).await;
    wheel.poll(t0 + Duration::from_millis(1300)).await;

    assert!(!wheel.is_busy());
    let shown = drain(&mut rx)
        .into_iter()
        .find_map(|m| match m {
            WheelMessage::ShowResult { card, .. } => Some(card.name),
            _ => None,
        });
    assert_eq!(shown.as_deref(), Some("Shakshuka"));
}

// =============================================================================
// Driver
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_driver_runs_a_spin_on_virtual_time() {
    let (tx, mut rx) = mpsc::channel(4096);
    let wheel = Wheel::new(
        pancakes_and_oats(),
        WheelConfig::default(),
        ShareExporter::disabled(),
        tx,
    )
    .with_rng(StdRng::seed_from_u64(5));
    let handle = spawn_wheel(wheel);
    let started = Instant::now();

    handle.send(WheelEvent::Connected).await.unwrap();
    handle
        .send(WheelEvent::MoodChanged { mood: Mood::new("healthy") })
        .await
        .unwrap();
    handle.send(WheelEvent::SpinRequested).await.unwrap();

    let mut revealed = None;
    loop {
        match rx.recv().await.unwrap() {
            WheelMessage::ShowResult { card, .. } => revealed = Some(card.name),
            WheelMessage::SpinControl { enabled: true, .. } if revealed.is_some() => break,
            _ => {}
        }
    }

    assert_eq!(revealed.as_deref(), Some("Oats"));
    assert!(started.elapsed() >= WheelConfig::default().timing.sequence_length());

    handle.shutdown().await.unwrap();
    let mut quit = false;
    while let Some(msg) = rx.recv().await {
        if matches!(msg, WheelMessage::Quit { .. }) {
            quit = true;
        }
    }
    assert!(quit);
}
