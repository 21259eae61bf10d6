//! Surface Events
//!
//! Events sent from UI surfaces to the wheel. Surfaces only report what the
//! user did; the wheel decides what happens next.

use serde::{Deserialize, Serialize};

use crate::animation::TrackGeometry;
use crate::mood::Mood;

/// Events from a UI surface to the wheel session
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum WheelEvent {
    /// Surface is ready to render; the wheel replies with the catalog and
    /// the current card filter
    Connected,

    /// The mood selector changed
    MoodChanged {
        /// Newly selected mood
        mood: Mood,
    },

    /// The spin control was activated
    SpinRequested,

    /// The "spin again" control was activated
    ResetRequested,

    /// The share control was activated
    ShareRequested,

    /// The card track was laid out again (terminal resize, window resize)
    Resized {
        /// New track dimensions
        geometry: TrackGeometry,
    },

    /// User wants to leave
    QuitRequested,
}
