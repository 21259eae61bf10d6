//! Mood Filter
//!
//! Pure functions from `(catalog, mood)` to the cards that mood offers.

use crate::catalog::{BreakfastItem, Catalog, ItemId};
use crate::mood::Mood;

/// Every item whose tags contain `mood`, in catalog order
///
/// The wildcard returns the whole catalog. The result may be empty.
#[must_use]
pub fn filter<'a>(catalog: &'a Catalog, mood: &Mood) -> Vec<&'a BreakfastItem> {
    catalog.iter().filter(|item| item.matches(mood)).collect()
}

/// The cards a spin may land on
#[derive(Debug)]
pub struct Candidates<'a> {
    /// Candidate items in catalog order, never empty
    pub items: Vec<&'a BreakfastItem>,
    /// True when nothing matched and the full catalog was substituted
    pub fallback: bool,
}

impl Candidates<'_> {
    /// Ids of the candidates in order
    #[must_use]
    pub fn ids(&self) -> Vec<ItemId> {
        self.items.iter().map(|item| item.id).collect()
    }

    /// Position of an item within the candidate list
    #[must_use]
    pub fn position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Number of candidates
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Never true for candidates built from a non-empty catalog
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// [`filter`] with the empty-result fallback applied
///
/// An empty filter result becomes the whole catalog, so a spin never runs
/// over zero cards.
#[must_use]
pub fn candidates<'a>(catalog: &'a Catalog, mood: &Mood) -> Candidates<'a> {
    let items = filter(catalog, mood);
    if items.is_empty() {
        tracing::debug!(mood = %mood, "No cards match mood, using full catalog");
        Candidates {
            items: catalog.iter().collect(),
            fallback: true,
        }
    } else {
        Candidates {
            items,
            fallback: false,
        }
    }
}
