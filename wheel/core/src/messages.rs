//! Wheel Messages
//!
//! Directives sent from the wheel to UI surfaces. A surface is a pure
//! renderer: it shows what these messages tell it and keeps no selection
//! or timing logic of its own.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::catalog::{BreakfastItem, ItemId};
use crate::mood::Mood;
use crate::presenter::{ResultCard, ViewTransition};
use crate::sequencer::Phase;
use crate::share::ExportOutcome;

/// Label on the spin control while idle
pub const SPIN_LABEL: &str = "Spin";

/// Label on the spin control while a spin is in flight
pub const SPINNING_LABEL: &str = "Spinning...";

/// Messages from the wheel to a UI surface
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum WheelMessage {
    // ============================================
    // Catalog & Filter
    // ============================================
    /// The full card list, in track order
    CatalogLoaded {
        /// Every card in the catalog
        cards: Vec<BreakfastItem>,
    },

    /// Which cards the track should show
    CardsFiltered {
        /// Mood the filter was applied for
        mood: Mood,
        /// Ids of the cards to show, in catalog order
        visible: Vec<ItemId>,
        /// True when nothing matched and every card is shown instead
        fallback: bool,
    },

    // ============================================
    // Spin Choreography
    // ============================================
    /// Enable or disable the spin control
    SpinControl {
        /// Whether the control accepts input
        enabled: bool,
        /// Label to show on it
        label: String,
    },

    /// The sequencer entered a new phase
    PhaseChanged {
        /// The new phase
        phase: Phase,
    },

    /// Pulse highlight: these cards glow, every other card dims
    PulseTick {
        /// Cards that are "hot" on this tick
        hot: Vec<ItemId>,
    },

    /// Move the card track
    ScrollTo {
        /// Offset from the track origin
        offset: f32,
    },

    /// The track stopped; emphasize the winner and dim the rest
    Settle {
        /// The winning card
        winner: ItemId,
    },

    /// Remove per-card emphasis and return the track to its origin
    ClearStage,

    // ============================================
    // Result View
    // ============================================
    /// Swap to the result view
    ShowResult {
        /// What to show
        card: ResultCard,
        /// Swap timing
        transition: ViewTransition,
    },

    /// Swap back to the selection view
    ShowSelection {
        /// Swap timing
        transition: ViewTransition,
    },

    // ============================================
    // Share
    // ============================================
    /// The result was copied
    ShareCopied {
        /// Which clipboard accepted it
        method: ExportOutcome,
        /// How long to show the confirmation
        feedback: Duration,
    },

    /// Blocking alert the user must dismiss
    Alert {
        /// Alert text
        message: String,
    },

    // ============================================
    // System Messages
    // ============================================
    /// Non-blocking notification
    Notify {
        /// Notification level
        level: NotifyLevel,
        /// Message content
        message: String,
    },

    /// Request surface to quit
    Quit {
        /// Optional goodbye message
        message: Option<String>,
    },
}

/// Notification levels
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotifyLevel {
    /// Informational
    Info,
    /// Warning
    Warning,
    /// Error
    Error,
    /// Success
    Success,
}
