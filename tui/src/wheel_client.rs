//! Wheel Client
//!
//! Embeds a [`Wheel`] session directly in the TUI (no task, no network)
//! and gives the app one method per user action.
//!
//! The TUI is a thin client. Its job is to:
//! 1. Turn key presses and mouse clicks into [`WheelEvent`]s
//! 2. Poll the wheel's clock once per frame
//! 3. Drain [`WheelMessage`]s into the display state

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc;
use tokio::time::Instant;

use wheel_core::{
    Catalog, Mood, Phase, ShareExporter, TrackGeometry, Wheel, WheelConfig, WheelEvent,
    WheelMessage,
};

/// Client for the embedded wheel
pub struct WheelClient {
    wheel: Wheel,
    rx: mpsc::UnboundedReceiver<WheelMessage>,
}

impl WheelClient {
    /// Create a client around a fresh session
    pub fn new(catalog: Catalog, config: WheelConfig, exporter: ShareExporter) -> Self {
        // The wheel and the app share one task, so a late frame's backlog
        // must fit without waiting on the reader
        let (tx, rx) = mpsc::unbounded_channel();
        let wheel = Wheel::new(catalog, config, exporter, tx);
        Self { wheel, rx }
    }

    /// Use a fixed random source (for reproducible sessions)
    #[must_use]
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.wheel = self.wheel.with_rng(rng);
        self
    }

    /// Seed the random source so the same seed replays the same spins
    #[must_use]
    pub fn with_seed(self, seed: u64) -> Self {
        self.with_rng(StdRng::seed_from_u64(seed))
    }

    /// Announce this surface; the wheel answers with the catalog and filter
    pub async fn connect(&mut self) -> anyhow::Result<()> {
        self.wheel.handle_event(WheelEvent::Connected).await
    }

    /// Pick a new mood
    pub async fn change_mood(&mut self, mood: Mood) -> anyhow::Result<()> {
        self.wheel
            .handle_event(WheelEvent::MoodChanged { mood })
            .await
    }

    /// Cycle to the next mood in the selector
    pub async fn next_mood(&mut self) -> anyhow::Result<()> {
        let mood = self.wheel.mood().next_choice();
        self.change_mood(mood).await
    }

    /// Cycle to the previous mood in the selector
    pub async fn prev_mood(&mut self) -> anyhow::Result<()> {
        let mood = self.wheel.mood().prev_choice();
        self.change_mood(mood).await
    }

    /// Press the spin control
    pub async fn spin(&mut self) -> anyhow::Result<()> {
        self.wheel.handle_event(WheelEvent::SpinRequested).await
    }

    /// Press "spin again"
    pub async fn reset(&mut self) -> anyhow::Result<()> {
        self.wheel.handle_event(WheelEvent::ResetRequested).await
    }

    /// Press share
    pub async fn share(&mut self) -> anyhow::Result<()> {
        self.wheel.handle_event(WheelEvent::ShareRequested).await
    }

    /// Tell the wheel how wide the track is now
    pub async fn resized(&mut self, geometry: TrackGeometry) -> anyhow::Result<()> {
        self.wheel
            .handle_event(WheelEvent::Resized { geometry })
            .await
    }

    /// Notify the wheel that the user wants to quit
    pub async fn request_quit(&mut self) -> anyhow::Result<()> {
        self.wheel.handle_event(WheelEvent::QuitRequested).await
    }

    /// Run due sequencer deadlines (call once per frame)
    pub async fn poll(&mut self, now: Instant) -> bool {
        self.wheel.poll(now).await
    }

    /// Receive all pending messages (non-blocking)
    pub fn recv_all(&mut self) -> Vec<WheelMessage> {
        let mut messages = Vec::new();
        while let Ok(msg) = self.rx.try_recv() {
            messages.push(msg);
        }
        messages
    }

    /// Current sequencer phase
    pub fn phase(&self) -> Phase {
        self.wheel.phase()
    }

    /// Current mood
    pub fn mood(&self) -> &Mood {
        self.wheel.mood()
    }

    /// Geometry the next spin will use
    pub fn geometry(&self) -> &TrackGeometry {
        self.wheel.geometry()
    }

    /// When the wheel next has work to do
    pub fn next_deadline(&self) -> Option<Instant> {
        self.wheel.next_deadline()
    }
}
