//! Display State
//!
//! What the terminal shows, derived purely from [`WheelMessage`]s. The TUI
//! is a thin client: it never decides which card wins or when a phase ends,
//! it only mirrors what the wheel tells it and runs the cosmetic timers
//! (view swaps, the "Copied!" confirmation, notifications).
//!
//! - [`DisplayCard`]: one card on the track with its current emphasis
//! - [`ViewSwap`]: an in-progress selection ↔ result swap
//! - [`DisplayState`]: everything the renderer needs

use std::time::Duration;

use tokio::time::Instant;
use wheel_core::animation::progress;
use wheel_core::{
    BreakfastItem, CardEmphasis, ExportOutcome, ItemId, Mood, NotifyLevel, Phase, ResultCard,
    ViewTransition, WheelMessage, SPIN_LABEL,
};

/// How long a notification stays up
const NOTIFICATION_TTL: Duration = Duration::from_secs(4);

/// A card on the track
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayCard {
    /// Catalog id
    pub id: ItemId,
    /// Card heading
    pub name: String,
    /// Calorie / category line
    pub meta: String,
    /// Image alternative text, shown in place of the picture
    pub image_alt: String,
    /// Whether the current mood filter shows this card
    pub visible: bool,
    /// Pulse / settle emphasis
    pub emphasis: CardEmphasis,
}

impl From<BreakfastItem> for DisplayCard {
    fn from(item: BreakfastItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            meta: item.meta,
            image_alt: item.image.alt,
            visible: true,
            emphasis: CardEmphasis::Normal,
        }
    }
}

/// The two views of the app
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum View {
    /// Card track with mood bar and spin control
    #[default]
    Selection,
    /// The winning card
    Result,
}

/// Where a view swap currently is
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SwapStage {
    /// The outgoing view is fading (linear progress 0..1)
    Exiting(f32),
    /// The incoming view is entering (eased progress, may overshoot 1)
    Entering(f32),
    /// Swap finished
    Done,
}

/// An in-progress view swap
///
/// A terminal cannot draw two views in the same cells, so the outgoing view
/// is shown until its fade ends and the incoming one takes over from there.
/// The entrance keeps its own clock (`enter_delay` then `enter`, measured
/// from the start of the swap), so it may already be part-way in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewSwap {
    /// View being swapped out
    pub from: View,
    /// View being swapped in
    pub to: View,
    /// When the swap began
    pub started: Instant,
    /// Swap timing
    pub transition: ViewTransition,
}

impl ViewSwap {
    /// Stage of the swap at `now`
    pub fn stage(&self, now: Instant) -> SwapStage {
        let elapsed = now.saturating_duration_since(self.started);
        let t = self.transition;

        if elapsed < t.exit {
            return SwapStage::Exiting(progress(elapsed, t.exit));
        }
        if elapsed >= t.total() {
            return SwapStage::Done;
        }

        let entering = elapsed.saturating_sub(t.enter_delay);
        SwapStage::Entering(t.enter_easing.apply(progress(entering, t.enter)))
    }

    /// The view that should be drawn at `now`
    pub fn showing(&self, now: Instant) -> View {
        match self.stage(now) {
            SwapStage::Exiting(_) => self.from,
            SwapStage::Entering(_) | SwapStage::Done => self.to,
        }
    }
}

/// A notification to display
#[derive(Clone, Debug)]
pub struct DisplayNotification {
    /// Notification level
    pub level: NotifyLevel,
    /// Message content
    pub message: String,
    /// When it disappears
    pub expires: Instant,
}

/// Everything the renderer needs
#[derive(Clone, Debug)]
pub struct DisplayState {
    /// Every card, in catalog order
    pub cards: Vec<DisplayCard>,
    /// Mood the track is filtered for
    pub mood: Mood,
    /// Nothing matched the mood, so every card is shown
    pub fallback: bool,
    /// Whether the spin control accepts input
    pub spin_enabled: bool,
    /// Label on the spin control
    pub spin_label: String,
    /// Current sequencer phase
    pub phase: Phase,
    /// Track scroll offset in cells
    pub offset: f32,
    /// The view that is (or is becoming) active
    pub view: View,
    /// Running view swap
    pub swap: Option<ViewSwap>,
    /// Result being shown (kept while it fades out)
    pub result: Option<ResultCard>,
    /// "✓ Copied!" is shown until this instant
    pub copied_until: Option<Instant>,
    /// Which clipboard took the last copy
    pub copied_method: Option<ExportOutcome>,
    /// Blocking alert
    pub alert: Option<String>,
    /// Pending notification (if any)
    pub notification: Option<DisplayNotification>,
    /// Goodbye line from a `Quit` directive
    pub goodbye: Option<String>,
    /// The wheel asked the surface to quit
    pub quit: bool,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            cards: Vec::new(),
            mood: Mood::any(),
            fallback: false,
            spin_enabled: true,
            spin_label: SPIN_LABEL.to_string(),
            phase: Phase::Idle,
            offset: 0.0,
            view: View::Selection,
            swap: None,
            result: None,
            copied_until: None,
            copied_method: None,
            alert: None,
            notification: None,
            goodbye: None,
            quit: false,
        }
    }
}

impl DisplayState {
    /// Create an empty display state
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a message as of now
    pub fn apply_message(&mut self, msg: WheelMessage) {
        self.apply_message_at(msg, Instant::now());
    }

    /// Apply a message that arrived at `now`
    pub fn apply_message_at(&mut self, msg: WheelMessage, now: Instant) {
        match msg {
            // Catalog & filter
            WheelMessage::CatalogLoaded { cards } => {
                self.cards = cards.into_iter().map(DisplayCard::from).collect();
            }
            WheelMessage::CardsFiltered {
                mood,
                visible,
                fallback,
            } => {
                for card in &mut self.cards {
                    card.visible = visible.contains(&card.id);
                }
                self.mood = mood;
                self.fallback = fallback;
            }

            // Spin choreography
            WheelMessage::SpinControl { enabled, label } => {
                self.spin_enabled = enabled;
                self.spin_label = label;
            }
            WheelMessage::PhaseChanged { phase } => {
                if phase == Phase::Pulsing {
                    self.set_all_emphasis(CardEmphasis::Normal);
                }
                self.phase = phase;
            }
            WheelMessage::PulseTick { hot } => {
                for card in &mut self.cards {
                    card.emphasis = if hot.contains(&card.id) {
                        CardEmphasis::Hot
                    } else {
                        CardEmphasis::Cool
                    };
                }
            }
            WheelMessage::ScrollTo { offset } => {
                self.offset = offset;
            }
            WheelMessage::Settle { winner } => {
                for card in &mut self.cards {
                    card.emphasis = if card.id == winner {
                        CardEmphasis::Winner
                    } else {
                        CardEmphasis::Dimmed
                    };
                }
            }
            WheelMessage::ClearStage => {
                self.set_all_emphasis(CardEmphasis::Normal);
                self.offset = 0.0;
            }

            // Result view
            WheelMessage::ShowResult { card, transition } => {
                self.result = Some(card);
                self.copied_until = None;
                self.begin_swap(View::Result, transition, now);
            }
            WheelMessage::ShowSelection { transition } => {
                self.begin_swap(View::Selection, transition, now);
            }

            // Share
            WheelMessage::ShareCopied { method, feedback } => {
                self.copied_until = Some(now + feedback);
                self.copied_method = Some(method);
            }
            WheelMessage::Alert { message } => {
                self.alert = Some(message);
            }

            // System
            WheelMessage::Notify { level, message } => {
                self.notification = Some(DisplayNotification {
                    level,
                    message,
                    expires: now + NOTIFICATION_TTL,
                });
            }
            WheelMessage::Quit { message } => {
                self.goodbye = message;
                self.quit = true;
            }
        }
    }

    /// Expire timers that ran out by `now`
    pub fn update(&mut self, now: Instant) {
        if let Some(swap) = self.swap {
            if swap.stage(now) == SwapStage::Done {
                self.swap = None;
            }
        }
        if self.swap.is_none() && self.view == View::Selection {
            self.result = None;
        }
        if self.copied_until.is_some_and(|until| now >= until) {
            self.copied_until = None;
        }
        if self
            .notification
            .as_ref()
            .is_some_and(|n| now >= n.expires)
        {
            self.notification = None;
        }
    }

    /// The view to draw at `now`
    pub fn showing(&self, now: Instant) -> View {
        self.swap.map_or(self.view, |swap| swap.showing(now))
    }

    /// Whether "✓ Copied!" should be on screen
    pub fn copied(&self) -> bool {
        self.copied_until.is_some()
    }

    /// Cards the current filter shows, in catalog order
    pub fn visible_cards(&self) -> impl Iterator<Item = &DisplayCard> {
        self.cards.iter().filter(|c| c.visible)
    }

    /// Dismiss the alert
    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// Clear the notification
    pub fn clear_notification(&mut self) {
        self.notification = None;
    }

    fn begin_swap(&mut self, to: View, transition: ViewTransition, now: Instant) {
        let from = self.showing(now);
        self.view = to;
        self.swap = Some(ViewSwap {
            from,
            to,
            started: now,
            transition,
        });
    }

    fn set_all_emphasis(&mut self, emphasis: CardEmphasis) {
        for card in &mut self.cards {
            card.emphasis = emphasis;
        }
    }
}
