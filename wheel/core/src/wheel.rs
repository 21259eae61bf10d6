//! Wheel - The Session Core
//!
//! One `Wheel` is one session: it owns the catalog, the current mood, the
//! selection, the sequencer and the outbound message channel. Nothing about
//! a session lives in globals.
//!
//! # Driving a Wheel
//!
//! ```text
//!   WheelEvent ──► handle_event() ──┐
//!                                   ├──► WheelMessage ──► surface
//!   clock ───────► poll(now) ───────┘
//! ```
//!
//! Surfaces forward user input through [`Wheel::handle_event`] and call
//! [`Wheel::poll`] whenever [`Wheel::next_deadline`] has passed (the TUI
//! polls once per frame; [`crate::driver::spawn_wheel`] sleeps until the
//! deadline). All state changes happen through `&mut self`, so a session
//! never needs a lock.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::animation::{ScrollPath, TrackGeometry};
use crate::catalog::{Catalog, ItemId};
use crate::config::WheelConfig;
use crate::events::WheelEvent;
use crate::filter::candidates;
use crate::messages::{NotifyLevel, WheelMessage, SPINNING_LABEL, SPIN_LABEL};
use crate::mood::Mood;
use crate::presenter::{ResultCard, ResultPresenter};
use crate::selector::pick;
use crate::sequencer::{Cue, Phase, Sequencer};
use crate::share::{export_text, ShareExporter, COPY_FAILED_MESSAGE};

/// Goodbye line sent with [`WheelMessage::Quit`]
const GOODBYE: &str = "Enjoy your breakfast!";

/// The Breakfast Wheel session
pub struct Wheel {
    config: WheelConfig,
    catalog: Catalog,
    /// Live filter criterion, used by the next spin
    mood: Mood,
    geometry: TrackGeometry,
    sequencer: Sequencer,
    presenter: ResultPresenter,
    exporter: ShareExporter,
    /// The chosen item, set when a spin is accepted
    selection: Option<ItemId>,
    /// A mood change arrived mid-spin; re-filter once the wheel is idle
    filter_deferred: bool,
    rng: StdRng,
    tx: MessageSink,
}

/// Where a wheel sends its [`WheelMessage`]s
///
/// A wheel on its own task can use a bounded channel and apply
/// backpressure. A wheel polled on the same task that drains it must use
/// an unbounded one: a late poll replays every overdue cue at once and
/// nothing frees space until the poll returns.
#[derive(Debug, Clone)]
pub enum MessageSink {
    /// Bounded channel; sends wait for space
    Bounded(mpsc::Sender<WheelMessage>),
    /// Unbounded channel; sends never wait
    Unbounded(mpsc::UnboundedSender<WheelMessage>),
}

impl MessageSink {
    async fn send(&self, msg: WheelMessage) -> Result<(), mpsc::error::SendError<WheelMessage>> {
        match self {
            Self::Bounded(tx) => tx.send(msg).await,
            Self::Unbounded(tx) => tx.send(msg),
        }
    }
}

impl From<mpsc::Sender<WheelMessage>> for MessageSink {
    fn from(tx: mpsc::Sender<WheelMessage>) -> Self {
        Self::Bounded(tx)
    }
}

impl From<mpsc::UnboundedSender<WheelMessage>> for MessageSink {
    fn from(tx: mpsc::UnboundedSender<WheelMessage>) -> Self {
        Self::Unbounded(tx)
    }
}

impl std::fmt::Debug for Wheel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wheel")
            .field("mood", &self.mood)
            .field("phase", &self.sequencer.phase())
            .field("selection", &self.selection)
            .field("cards", &self.catalog.len())
            .finish_non_exhaustive()
    }
}

impl Wheel {
    /// Create a new session
    pub fn new(
        catalog: Catalog,
        config: WheelConfig,
        exporter: ShareExporter,
        tx: impl Into<MessageSink>,
    ) -> Self {
        Self {
            geometry: config.layout,
            sequencer: Sequencer::new(config.timing.clone()),
            config,
            catalog,
            mood: Mood::any(),
            presenter: ResultPresenter::new(),
            exporter,
            selection: None,
            filter_deferred: false,
            rng: StdRng::from_entropy(),
            tx: tx.into(),
        }
    }

    /// Replace the random source (tests use a seeded one)
    #[must_use]
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Start with a mood other than the wildcard
    #[must_use]
    pub fn with_mood(mut self, mood: Mood) -> Self {
        self.mood = mood;
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The catalog
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Current mood
    #[must_use]
    pub fn mood(&self) -> &Mood {
        &self.mood
    }

    /// Current sequencer phase
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.sequencer.phase()
    }

    /// Whether a spin is in flight
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.sequencer.is_busy()
    }

    /// The selected item, if any
    #[must_use]
    pub fn selection(&self) -> Option<ItemId> {
        self.selection
    }

    /// The result on screen, if any
    #[must_use]
    pub fn current_result(&self) -> Option<&ResultCard> {
        self.presenter.current()
    }

    /// Geometry the next spin will use
    #[must_use]
    pub fn geometry(&self) -> &TrackGeometry {
        &self.geometry
    }

    /// Session configuration
    #[must_use]
    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    /// When [`Wheel::poll`] next has work to do
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.sequencer.next_deadline()
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// Handle an event from the surface
    ///
    /// # Errors
    ///
    /// Currently infallible; the signature leaves room for events whose
    /// handling can fail.
    pub async fn handle_event(&mut self, event: WheelEvent) -> anyhow::Result<()> {
        self.handle_event_at(event, Instant::now()).await
    }

    /// Handle an event as if it arrived at `now`
    ///
    /// # Errors
    ///
    /// See [`Wheel::handle_event`].
    pub async fn handle_event_at(&mut self, event: WheelEvent, now: Instant) -> anyhow::Result<()> {
        match event {
            WheelEvent::Connected => {
                self.send(WheelMessage::CatalogLoaded {
                    cards: self.catalog.items().to_vec(),
                })
                .await;
                self.send_filter().await;
                let (enabled, label) = if self.is_busy() {
                    (false, SPINNING_LABEL)
                } else {
                    (true, SPIN_LABEL)
                };
                self.send(WheelMessage::SpinControl {
                    enabled,
                    label: label.to_string(),
                })
                .await;
            }

            WheelEvent::MoodChanged { mood } => self.set_mood(mood).await,

            WheelEvent::SpinRequested => {
                self.request_spin(now).await;
            }

            WheelEvent::ResetRequested => self.reset().await,

            WheelEvent::ShareRequested => self.share().await,

            WheelEvent::Resized { geometry } => {
                tracing::debug!(?geometry, "Track geometry updated");
                self.geometry = geometry;
            }

            WheelEvent::QuitRequested => {
                self.send(WheelMessage::Quit {
                    message: Some(GOODBYE.to_string()),
                })
                .await;
            }
        }
        Ok(())
    }

    /// Change the mood
    ///
    /// Outside a spin the track is re-filtered at once. During a spin the
    /// mood still applies to the next spin, but the track keeps its cards
    /// until the wheel is idle again.
    pub async fn set_mood(&mut self, mood: Mood) {
        tracing::debug!(mood = %mood, "Mood changed");
        self.mood = mood;
        if self.is_busy() {
            self.filter_deferred = true;
        } else {
            self.send_filter().await;
        }
    }

    /// Request a spin at `now`
    ///
    /// Returns `false` when a spin is already in flight; the running spin
    /// is not touched.
    pub async fn request_spin(&mut self, now: Instant) -> bool {
        if self.is_busy() {
            tracing::debug!(phase = %self.phase(), "Spin request ignored, already spinning");
            return false;
        }

        // Spinning from the result view goes back to selection first
        if self.presenter.current().is_some() {
            self.reset().await;
        }

        let pool = candidates(&self.catalog, &self.mood);
        let Some(winner) = pick(&pool.items, &mut self.rng) else {
            return false;
        };
        let winner_id = winner.id;
        let winner_name = winner.name.clone();
        let slot = pool.position(winner_id).unwrap_or_default();
        let timing = self.sequencer.timing();
        let path = ScrollPath::new(
            &self.geometry,
            slot,
            pool.len(),
            timing.overshoot_passes,
            timing.scroll_easing,
        );
        let (pool_len, fallback) = (pool.len(), pool.fallback);

        let Some(phase) = self.sequencer.start(now, path) else {
            return false;
        };
        self.selection = Some(winner_id);

        tracing::info!(
            winner = %winner_name,
            mood = %self.mood,
            candidates = pool_len,
            fallback,
            "Spin accepted"
        );

        self.send(WheelMessage::SpinControl {
            enabled: false,
            label: SPINNING_LABEL.to_string(),
        })
        .await;
        self.send(WheelMessage::PhaseChanged { phase }).await;
        if fallback {
            self.send(WheelMessage::Notify {
                level: NotifyLevel::Info,
                message: format!(
                    "Nothing on the menu for {}, spinning everything",
                    self.mood.label()
                ),
            })
            .await;
        }
        true
    }

    /// Return from the result view to the selection view
    ///
    /// Safe to call at any time; does nothing without a result on screen.
    pub async fn reset(&mut self) {
        if let Some(transition) = self.presenter.reset() {
            self.selection = None;
            self.send(WheelMessage::ShowSelection { transition }).await;
        }
    }

    /// Copy the current result
    pub async fn share(&mut self) {
        let Some(card) = self.presenter.current() else {
            tracing::warn!("Share requested with no result");
            return;
        };

        let text = export_text(card, &self.config.share.call_to_action);
        match self.exporter.export(&text).await {
            Ok(method) => {
                self.send(WheelMessage::ShareCopied {
                    method,
                    feedback: self.config.share.copied_feedback,
                })
                .await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Share failed");
                self.send(WheelMessage::Alert {
                    message: COPY_FAILED_MESSAGE.to_string(),
                })
                .await;
            }
        }
    }

    // ========================================================================
    // Clock
    // ========================================================================

    /// Run every sequencer deadline due at `now`
    ///
    /// Returns true if anything happened.
    pub async fn poll(&mut self, now: Instant) -> bool {
        let cues = self.sequencer.advance(now);
        let any = !cues.is_empty();
        for cue in cues {
            self.dispatch(cue).await;
        }
        any
    }

    async fn dispatch(&mut self, cue: Cue) {
        match cue {
            Cue::Entered(phase) => {
                self.send(WheelMessage::PhaseChanged { phase }).await;
                if phase == Phase::Idle {
                    self.send(WheelMessage::SpinControl {
                        enabled: true,
                        label: SPIN_LABEL.to_string(),
                    })
                    .await;
                    if std::mem::take(&mut self.filter_deferred) {
                        self.send_filter().await;
                    }
                }
            }
            Cue::Pulse => {
                let p = self.sequencer.timing().pulse_hot_probability;
                let hot = self
                    .catalog
                    .ids()
                    .into_iter()
                    .filter(|_| self.rng.gen::<f64>() < p)
                    .collect();
                self.send(WheelMessage::PulseTick { hot }).await;
            }
            Cue::Scroll(offset) => {
                self.send(WheelMessage::ScrollTo { offset }).await;
            }
            Cue::Settle => {
                if let Some(winner) = self.selection {
                    self.send(WheelMessage::Settle { winner }).await;
                }
            }
            Cue::Reveal => {
                let Some(item) = self.selection.and_then(|id| self.catalog.get(id)) else {
                    tracing::debug!("Nothing to reveal, selection was cleared");
                    return;
                };
                let (card, transition) = self.presenter.present(item, &mut self.rng);
                self.send(WheelMessage::ShowResult { card, transition }).await;
            }
            Cue::ClearStage => self.send(WheelMessage::ClearStage).await,
        }
    }

    async fn send_filter(&self) {
        let pool = candidates(&self.catalog, &self.mood);
        self.send(WheelMessage::CardsFiltered {
            mood: self.mood.clone(),
            visible: pool.ids(),
            fallback: pool.fallback,
        })
        .await;
    }

    /// Send a message to the UI surface
    async fn send(&self, msg: WheelMessage) {
        if let Err(e) = self.tx.send(msg).await {
            tracing::debug!("Failed to send message to surface: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CardMarkup;
    use crate::config::TimingConfig;
    use std::time::Duration;

    fn wheel(cards: Vec<CardMarkup>) -> (Wheel, mpsc::Receiver<WheelMessage>) {
        let (tx, rx) = mpsc::channel(4096);
        let catalog = Catalog::from_markup(cards).unwrap();
        let wheel = Wheel::new(catalog, WheelConfig::default(), ShareExporter::disabled(), tx)
            .with_rng(StdRng::seed_from_u64(11));
        (wheel, rx)
    }

    fn drain(rx: &mut mpsc::Receiver<WheelMessage>) -> Vec<WheelMessage> {
        let mut out = Vec::new();
        while let Ok(msg) = rx.try_recv() {
            out.push(msg);
        }
        out
    }

    #[tokio::test]
    async fn test_spin_guard_keeps_state() {
        let (mut wheel, _rx) = wheel(vec![
            CardMarkup::new("Pancakes", Some("comfort")),
            CardMarkup::new("Oats", Some("healthy")),
        ]);
        let t0 = Instant::now();

        assert!(wheel.request_spin(t0).await);
        let selection = wheel.selection();
        let phase = wheel.phase();

        assert!(!wheel.request_spin(t0 + Duration::from_millis(5)).await);
        assert_eq!(wheel.selection(), selection);
        assert_eq!(wheel.phase(), phase);
        assert!(wheel.is_busy());
    }

    #[tokio::test]
    async fn test_settle_message_names_selection() {
        let (mut wheel, mut rx) = wheel(vec![CardMarkup::new("Oats", Some("healthy"))]);
        let t0 = Instant::now();
        wheel.request_spin(t0).await;
        wheel
            .poll(t0 + TimingConfig::default().sequence_length())
            .await;

        let settled: Vec<_> = drain(&mut rx)
            .into_iter()
            .filter_map(|m| match m {
                WheelMessage::Settle { winner } => Some(winner),
                _ => None,
            })
            .collect();
        assert_eq!(settled, vec![ItemId(0)]);
    }

    #[tokio::test]
    async fn test_deferred_mood_filter() {
        let (mut wheel, mut rx) = wheel(vec![
            CardMarkup::new("Pancakes", Some("comfort")),
            CardMarkup::new("Oats", Some("healthy")),
        ]);
        let t0 = Instant::now();
        wheel.request_spin(t0).await;
        drain(&mut rx);

        wheel.set_mood(Mood::new("healthy")).await;
        assert_eq!(wheel.mood().as_str(), "healthy");
        assert!(
            drain(&mut rx).is_empty(),
            "track must not change during a spin"
        );

        wheel
            .poll(t0 + TimingConfig::default().sequence_length())
            .await;
        let last = drain(&mut rx).pop().unwrap();
        assert_eq!(
            last,
            WheelMessage::CardsFiltered {
                mood: Mood::new("healthy"),
                visible: vec![ItemId(1)],
                fallback: false,
            }
        );
    }

    #[tokio::test]
    async fn test_pulse_probability_extremes() {
        let (tx, mut rx) = mpsc::channel(4096);
        let catalog = Catalog::from_markup(vec![
            CardMarkup::new("A", None),
            CardMarkup::new("B", None),
        ])
        .unwrap();
        let mut config = WheelConfig::default();
        config.timing.pulse_hot_probability = 1.0;
        let mut wheel = Wheel::new(catalog, config, ShareExporter::disabled(), tx);

        let t0 = Instant::now();
        wheel.request_spin(t0).await;
        wheel.poll(t0 + Duration::from_millis(120)).await;

        let hot = drain(&mut rx)
            .into_iter()
            .find_map(|m| match m {
                WheelMessage::PulseTick { hot } => Some(hot),
                _ => None,
            })
            .unwrap();
        assert_eq!(hot, vec![ItemId(0), ItemId(1)]);
    }
}
