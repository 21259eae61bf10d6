//! Spin Sequencer
//!
//! The timed phase machine behind one spin. It owns no channels and no
//! timers: callers feed it the current time through [`Sequencer::advance`]
//! and get back the cues that became due, in chronological order. Drivers
//! sleep until [`Sequencer::next_deadline`].
//!
//! # Phases
//!
//! ```text
//!          start()
//!  Idle ───────────► Pulsing ──► Scrolling ──► Settling ──► Revealing ──► Resetting ──► Idle
//!                    │◄──── spin_duration ────►│◄ reveal ►│◄ reset_delay ►│◄ transition ►│
//!                    pulse + scroll ticks        pause
//! ```
//!
//! Every deadline is derived from the spin's start instant, never from the
//! time a cue was processed, so a late `advance()` replays each phase in
//! order instead of skipping any. Entering `Settling` is the single
//! cancellation point for tick deadlines: no pulse or scroll cue is ever
//! produced after it.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use crate::animation::{progress, ScrollPath};
use crate::config::TimingConfig;

/// Spin choreography phase
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// No spin in flight; spin requests are accepted
    #[default]
    Idle,
    /// Pulse highlights and the scroll are both running
    Pulsing,
    /// Pulse highlights are exhausted, the scroll continues
    Scrolling,
    /// The track has stopped on the winner
    Settling,
    /// The result is on screen
    Revealing,
    /// The stage is returning to rest
    Resetting,
}

impl Phase {
    /// Whether a spin is in flight
    #[must_use]
    pub fn is_busy(self) -> bool {
        self != Self::Idle
    }

    /// Short lowercase name for logs
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pulsing => "pulsing",
            Self::Scrolling => "scrolling",
            Self::Settling => "settling",
            Self::Revealing => "revealing",
            Self::Resetting => "resetting",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Something that became due during [`Sequencer::advance`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Cue {
    /// The machine moved into a new phase
    Entered(Phase),
    /// Time for a pulse highlight
    Pulse,
    /// Move the track to this offset
    Scroll(f32),
    /// The track has stopped; emphasize the winner
    Settle,
    /// Present the result
    Reveal,
    /// Clear per-card styling and return the track to origin
    ClearStage,
}

/// Deadlines the machine can be waiting on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Due {
    Pulse,
    Scroll,
    Settle,
    Reveal,
    Clear,
    Finish,
}

/// Bookkeeping for the spin in flight
#[derive(Clone, Debug)]
struct Spin {
    started: Instant,
    path: ScrollPath,
    pulses_sent: u32,
    scrolls_sent: u32,
}

/// Deadline-driven phase machine for one spin at a time
#[derive(Clone, Debug)]
pub struct Sequencer {
    timing: TimingConfig,
    phase: Phase,
    spin: Option<Spin>,
}

impl Sequencer {
    /// Create an idle sequencer
    #[must_use]
    pub fn new(timing: TimingConfig) -> Self {
        Self {
            timing,
            phase: Phase::Idle,
            spin: None,
        }
    }

    /// Current phase
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether a spin is in flight
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.phase.is_busy()
    }

    /// Timing in use
    #[must_use]
    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    /// Replace the timing used by the next spin
    ///
    /// Ignored while a spin is in flight.
    pub fn set_timing(&mut self, timing: TimingConfig) {
        if self.is_busy() {
            tracing::debug!("Timing change ignored while spinning");
            return;
        }
        self.timing = timing;
    }

    /// Start a spin at `now`
    ///
    /// Returns the phase the machine entered, or `None` if a spin is
    /// already in flight (the running spin is left untouched).
    pub fn start(&mut self, now: Instant, path: ScrollPath) -> Option<Phase> {
        if self.is_busy() {
            return None;
        }

        self.spin = Some(Spin {
            started: now,
            path,
            pulses_sent: 0,
            scrolls_sent: 0,
        });
        self.phase = if self.pulse_due().is_some() {
            Phase::Pulsing
        } else {
            Phase::Scrolling
        };
        Some(self.phase)
    }

    /// When the next cue is due, or `None` when idle
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.next_due().map(|(at, _)| at)
    }

    /// Process every deadline at or before `now`, oldest first
    pub fn advance(&mut self, now: Instant) -> Vec<Cue> {
        let mut cues = Vec::new();
        while let Some((at, due)) = self.next_due() {
            if at > now {
                break;
            }
            self.fire(at, due, &mut cues);
        }
        cues
    }

    fn fire(&mut self, at: Instant, due: Due, cues: &mut Vec<Cue>) {
        let Some(spin) = self.spin.as_mut() else {
            return;
        };

        match due {
            Due::Pulse => {
                spin.pulses_sent += 1;
                cues.push(Cue::Pulse);
                if self.pulse_due().is_none() {
                    self.enter(Phase::Scrolling, cues);
                }
            }
            Due::Scroll => {
                spin.scrolls_sent += 1;
                let elapsed = at.saturating_duration_since(spin.started);
                let offset = spin
                    .path
                    .offset_at(progress(elapsed, self.timing.spin_duration));
                cues.push(Cue::Scroll(offset));
            }
            Due::Settle => {
                let total = spin.path.total();
                self.enter(Phase::Settling, cues);
                cues.push(Cue::Scroll(total));
                cues.push(Cue::Settle);
            }
            Due::Reveal => {
                self.enter(Phase::Revealing, cues);
                cues.push(Cue::Reveal);
            }
            Due::Clear => {
                self.enter(Phase::Resetting, cues);
                cues.push(Cue::ClearStage);
            }
            Due::Finish => {
                self.spin = None;
                self.enter(Phase::Idle, cues);
            }
        }
    }

    fn enter(&mut self, phase: Phase, cues: &mut Vec<Cue>) {
        if self.phase != phase {
            tracing::debug!(from = %self.phase, to = %phase, "Sequencer phase change");
            self.phase = phase;
            cues.push(Cue::Entered(phase));
        }
    }

    fn settle_at(&self, spin: &Spin) -> Instant {
        spin.started + self.timing.spin_duration
    }

    fn pulse_due(&self) -> Option<Instant> {
        let spin = self.spin.as_ref()?;
        if !matches!(self.phase, Phase::Idle | Phase::Pulsing)
            || spin.pulses_sent >= self.timing.pulse_ticks
        {
            return None;
        }
        let at = spin.started + scaled(self.timing.pulse_interval, spin.pulses_sent + 1);
        (at < self.settle_at(spin)).then_some(at)
    }

    fn scroll_due(&self) -> Option<Instant> {
        let spin = self.spin.as_ref()?;
        if !matches!(self.phase, Phase::Pulsing | Phase::Scrolling) {
            return None;
        }
        let at = spin.started + scaled(self.timing.scroll_interval, spin.scrolls_sent + 1);
        (at < self.settle_at(spin)).then_some(at)
    }

    fn next_due(&self) -> Option<(Instant, Due)> {
        let spin = self.spin.as_ref()?;
        let settle_at = self.settle_at(spin);
        let reveal_at = settle_at + self.timing.reveal_pause;
        let clear_at = reveal_at + self.timing.reset_delay;
        let finish_at = clear_at + self.timing.reset_transition;

        match self.phase {
            Phase::Idle => None,
            Phase::Pulsing | Phase::Scrolling => {
                // Ties go to the pulse; both ticks are strictly before settle
                let tick = match (self.pulse_due(), self.scroll_due()) {
                    (Some(p), Some(s)) if s < p => Some((s, Due::Scroll)),
                    (Some(p), _) => Some((p, Due::Pulse)),
                    (None, Some(s)) => Some((s, Due::Scroll)),
                    (None, None) => None,
                };
                tick.or(Some((settle_at, Due::Settle)))
            }
            Phase::Settling => Some((reveal_at, Due::Reveal)),
            Phase::Revealing => Some((clear_at, Due::Clear)),
            Phase::Resetting => Some((finish_at, Due::Finish)),
        }
    }
}

fn scaled(interval: Duration, count: u32) -> Duration {
    interval.saturating_mul(count)
}
