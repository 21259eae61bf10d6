//! Result Presenter
//!
//! Turns the winning item into the fields of the result view, adds a
//! flavor line, and describes the swap between the selection view and the
//! result view. Surfaces do the drawing; this module only decides what to
//! show and how long each half of the swap takes.

use std::time::Duration;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::animation::EasingFunction;
use crate::catalog::{BreakfastItem, ImageRef, ItemId};
use crate::mood::Mood;

const COMFORT: &[&str] = &[
    "Sometimes you just need a warm hug in food form! 🤗",
    "Comfort food that wraps you in deliciousness!",
    "The perfect choice for a cozy morning!",
    "Because comfort should always be on the menu!",
];

const HEALTHY: &[&str] = &[
    "Fuel your body, fuel your day! 💪",
    "A nutritious start to your morning adventure!",
    "Health and happiness in every bite!",
    "Your body will thank you for this choice!",
];

const RUSHED: &[&str] = &[
    "Quick, delicious, and ready when you are! ⚡",
    "No time to waste, just time to taste!",
    "Fast food that doesn't compromise on flavor!",
    "On-the-go goodness at its finest!",
];

const RELAXED: &[&str] = &[
    "Take your time and savor every moment! ☕",
    "Because mornings are meant to be enjoyed!",
    "Slow down and treat yourself right!",
    "The art of a leisurely breakfast!",
];

const ANY: &[&str] = &[
    "A delicious choice to start your day! 🌅",
    "Breakfast done right!",
    "The wheel has spoken, and it's delicious!",
    "Your perfect morning match!",
];

/// Flavor lines for a mood, falling back to the generic table
#[must_use]
pub fn flavor_table(mood: &Mood) -> &'static [&'static str] {
    match mood.as_str() {
        "comfort" => COMFORT,
        "healthy" => HEALTHY,
        "rushed" => RUSHED,
        "relaxed" => RELAXED,
        _ => ANY,
    }
}

/// Pick a flavor line for an item, keyed by its primary mood
pub fn flavor_line<R: Rng + ?Sized>(item: &BreakfastItem, rng: &mut R) -> &'static str {
    flavor_table(item.moods.primary())
        .choose(rng)
        .copied()
        .unwrap_or_default()
}

/// Everything the result view shows
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultCard {
    /// Which item won
    pub id: ItemId,
    /// Heading
    pub name: String,
    /// Picture of the dish
    pub image: ImageRef,
    /// Calorie / category line
    pub meta: String,
    /// Flavor line
    pub quote: String,
}

/// Timing of a view swap: fade the old view out, then bring the new one in
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewTransition {
    /// Fade-out of the outgoing view
    pub exit: Duration,
    /// Delay before the incoming view starts its entrance
    pub enter_delay: Duration,
    /// Entrance of the incoming view
    pub enter: Duration,
    /// Entrance curve
    pub enter_easing: EasingFunction,
}

impl ViewTransition {
    /// Selection view out, result view in
    #[must_use]
    pub fn to_result() -> Self {
        Self {
            exit: Duration::from_millis(400),
            enter_delay: Duration::from_millis(50),
            enter: Duration::from_millis(600),
            enter_easing: EasingFunction::EaseOutBack,
        }
    }

    /// Result view out, selection view in
    #[must_use]
    pub fn to_selection() -> Self {
        Self {
            exit: Duration::from_millis(300),
            enter_delay: Duration::from_millis(50),
            enter: Duration::from_millis(400),
            enter_easing: EasingFunction::EaseInOut,
        }
    }

    /// Time until the incoming view is fully in
    #[must_use]
    pub fn total(&self) -> Duration {
        self.enter_delay + self.enter
    }
}

/// Tracks whether the result view is up
#[derive(Debug, Default)]
pub struct ResultPresenter {
    shown: Option<ResultCard>,
}

impl ResultPresenter {
    /// Create a presenter showing the selection view
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill the result view for `item`
    pub fn present<R: Rng + ?Sized>(
        &mut self,
        item: &BreakfastItem,
        rng: &mut R,
    ) -> (ResultCard, ViewTransition) {
        let card = ResultCard {
            id: item.id,
            name: item.name.clone(),
            image: item.image.clone(),
            meta: item.meta.clone(),
            quote: flavor_line(item, rng).to_string(),
        };
        tracing::info!(item = %card.name, quote = %card.quote, "Showing result");
        self.shown = Some(card.clone());
        (card, ViewTransition::to_result())
    }

    /// Return to the selection view
    ///
    /// Returns `None` when no result is showing; calling it again is harmless.
    pub fn reset(&mut self) -> Option<ViewTransition> {
        match self.shown.take() {
            Some(card) => {
                tracing::debug!(item = %card.name, "Returning to selection");
                Some(ViewTransition::to_selection())
            }
            None => {
                tracing::debug!("Reset with no result showing");
                None
            }
        }
    }

    /// The result currently on screen
    #[must_use]
    pub fn current(&self) -> Option<&ResultCard> {
        self.shown.as_ref()
    }
}
