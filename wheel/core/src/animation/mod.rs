//! Animation System - Surface-Agnostic Spin Visuals
//!
//! This module describes the wheel's motion and card emphasis without
//! knowing how any surface draws them. The sequencer uses it to compute
//! where the card track should be; surfaces translate emphasis into their
//! own styling (terminal colors, CSS transforms, ...).
//!
//! # Track Model
//!
//! ```text
//!  offset 0
//!  │
//!  ▼
//!  ┌──────┐ gap ┌──────┐ gap ┌──────┐
//!  │card 0│     │card 1│     │card 2│   ...repeats every lap
//!  └──────┘     └──────┘     └──────┘
//!  ◄─ pitch ──►
//!  ◄──────────── track_width (viewport) ─────────►
//! ```
//!
//! The track is a loop: scrolling past the last visible card wraps to the
//! first one, so a spin can run several full laps ("overshoot") before
//! landing with the winner centred in the viewport.

mod timing;

pub use timing::{progress, EasingFunction};

use serde::{Deserialize, Serialize};

/// Dimensions of the card track, in surface units (pixels, cells, ...)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackGeometry {
    /// Width of one card
    pub card_width: f32,
    /// Space between neighbouring cards
    pub gap: f32,
    /// Width of the visible viewport
    pub track_width: f32,
}

impl Default for TrackGeometry {
    fn default() -> Self {
        Self {
            card_width: 24.0,
            gap: 2.0,
            track_width: 80.0,
        }
    }
}

impl TrackGeometry {
    /// Create a geometry
    #[must_use]
    pub fn new(card_width: f32, gap: f32, track_width: f32) -> Self {
        Self {
            card_width,
            gap,
            track_width,
        }
    }

    /// Distance from one card's left edge to the next
    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.card_width + self.gap
    }

    /// Length of one full lap over `count` cards
    #[must_use]
    pub fn lap_length(&self, count: usize) -> f32 {
        self.pitch() * count as f32
    }

    /// Scroll offset that centres the card in `slot` within the viewport
    ///
    /// Negative for slots near the start of the track.
    #[must_use]
    pub fn centered_offset(&self, slot: usize) -> f32 {
        slot as f32 * self.pitch() - self.track_width / 2.0 + self.card_width / 2.0
    }
}

/// The scroll a single spin performs
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScrollPath {
    /// Extra distance covered by whole laps before landing
    pub overshoot: f32,
    /// Offset that centres the winning card
    pub target: f32,
    /// How the scroll decelerates over the spin
    pub easing: EasingFunction,
}

impl ScrollPath {
    /// Plan the scroll that lands on the card in `slot`
    ///
    /// `visible_len` is the number of cards on the track and `laps` the
    /// number of full passes made before the landing lap.
    #[must_use]
    pub fn new(
        geometry: &TrackGeometry,
        slot: usize,
        visible_len: usize,
        laps: u32,
        easing: EasingFunction,
    ) -> Self {
        Self {
            overshoot: geometry.lap_length(visible_len) * laps as f32,
            target: geometry.centered_offset(slot),
            easing,
        }
    }

    /// Final offset at the end of the spin
    #[must_use]
    pub fn total(&self) -> f32 {
        self.overshoot + self.target
    }

    /// Offset at a given spin progress (0.0 to 1.0)
    #[must_use]
    pub fn offset_at(&self, progress: f32) -> f32 {
        self.total() * self.easing.apply(progress)
    }
}

/// Visual emphasis of one card at a point in the choreography
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardEmphasis {
    /// Resting state
    #[default]
    Normal,
    /// Highlighted by a pulse tick
    Hot,
    /// Passed over by a pulse tick
    Cool,
    /// The settled winner
    Winner,
    /// A settled loser
    Dimmed,
}

/// Style hints for a card, in CSS-like terms
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardStyle {
    /// Scale factor (1.0 = natural size)
    pub scale: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque)
    pub opacity: f32,
    /// Blur radius (0 = sharp)
    pub blur: f32,
    /// Glow strength (0.0 = flat shadow, 1.0 = full glow)
    pub glow: f32,
}

impl CardEmphasis {
    /// Style hints for this emphasis
    #[must_use]
    pub fn style(self) -> CardStyle {
        match self {
            Self::Normal => CardStyle {
                scale: 1.0,
                opacity: 1.0,
                blur: 0.0,
                glow: 0.0,
            },
            Self::Hot => CardStyle {
                scale: 1.08,
                opacity: 1.0,
                blur: 0.0,
                glow: 0.5,
            },
            Self::Cool => CardStyle {
                scale: 0.95,
                opacity: 1.0,
                blur: 0.0,
                glow: 0.0,
            },
            Self::Winner => CardStyle {
                scale: 1.15,
                opacity: 1.0,
                blur: 0.0,
                glow: 0.8,
            },
            Self::Dimmed => CardStyle {
                scale: 0.85,
                opacity: 0.3,
                blur: 3.0,
                glow: 0.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> TrackGeometry {
        TrackGeometry::new(200.0, 24.0, 800.0)
    }

    #[test]
    fn test_centered_offset() {
        let g = geometry();
        // Slot 2: 2 * 224 - 400 + 100
        assert!((g.centered_offset(2) - 148.0).abs() < f32::EPSILON);
        // First card sits left of centre, so the offset is negative
        assert!(g.centered_offset(0) < 0.0);
    }

    #[test]
    fn test_scroll_path_overshoot() {
        let g = geometry();
        let path = ScrollPath::new(&g, 1, 5, 3, EasingFunction::Linear);

        assert!((path.overshoot - 224.0 * 5.0 * 3.0).abs() < 0.01);
        assert!((path.total() - (path.overshoot + g.centered_offset(1))).abs() < 0.01);
        assert!(path.offset_at(0.0).abs() < f32::EPSILON);
        assert!((path.offset_at(1.0) - path.total()).abs() < 0.01);
    }

    #[test]
    fn test_scroll_path_lands_on_target_modulo_lap() {
        let g = geometry();
        let path = ScrollPath::new(&g, 3, 4, 3, EasingFunction::SpinDecelerate);
        let lap = g.lap_length(4);

        let landed = path.offset_at(1.0).rem_euclid(lap);
        let target = g.centered_offset(3).rem_euclid(lap);
        assert!((landed - target).abs() < 0.5);
    }

    #[test]
    fn test_emphasis_styles() {
        assert!(CardEmphasis::Winner.style().scale > CardEmphasis::Hot.style().scale);
        assert!(CardEmphasis::Dimmed.style().opacity < 0.5);
        assert!((CardEmphasis::Normal.style().scale - 1.0).abs() < f32::EPSILON);
    }
}
