//! Breakfast Catalog
//!
//! The catalog is the ordered list of breakfast cards on the wheel. It is
//! built once from card markup (a TOML card file) and never changes for the
//! rest of the session.
//!
//! # Card Markup
//!
//! ```toml
//! [[card]]
//! title = "Overnight Oats"
//! image = "images/oats.jpg"
//! alt = "Jar of overnight oats"
//! meta = "Healthy • 310 kcal"
//! mood = "healthy,rushed"
//! ```
//!
//! The `mood` attribute is parsed into a [`MoodSet`] here and nowhere else.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::mood::{Mood, MoodSet};

/// Card file compiled into the binary, used when no catalog path is configured
const BUILTIN_CARDS: &str = include_str!("../assets/breakfasts.toml");

/// Errors that can occur when building a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Failed to read the card file
    #[error("Failed to read card file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse the card file
    #[error("Failed to parse card file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// The markup contained no cards
    #[error("Card markup contains no cards")]
    Empty,
}

/// Position of an item in the catalog, stable for the session
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub usize);

impl ItemId {
    /// Index into the catalog
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "card_{}", self.0)
    }
}

/// Image reference for a card
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Image location (URL or path)
    pub url: String,
    /// Alternative text
    pub alt: String,
}

/// One breakfast card as declared in the markup
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardMarkup {
    /// Card heading
    pub title: String,
    /// Image location
    pub image: String,
    /// Image alternative text
    pub alt: String,
    /// Calorie / category line
    pub meta: String,
    /// Comma-separated mood attribute (absent = tagged `any`, shown only under `any`)
    pub mood: Option<String>,
}

impl CardMarkup {
    /// Convenience constructor used by tests and embedders
    pub fn new(title: impl Into<String>, mood: Option<&str>) -> Self {
        Self {
            title: title.into(),
            mood: mood.map(str::to_string),
            ..Default::default()
        }
    }

    /// Set the meta line
    #[must_use]
    pub fn with_meta(mut self, meta: impl Into<String>) -> Self {
        self.meta = meta.into();
        self
    }

    /// Set the image reference
    #[must_use]
    pub fn with_image(mut self, url: impl Into<String>, alt: impl Into<String>) -> Self {
        self.image = url.into();
        self.alt = alt.into();
        self
    }
}

/// Top-level layout of a card file
#[derive(Debug, Default, Deserialize)]
struct CardFile {
    #[serde(default)]
    card: Vec<CardMarkup>,
}

/// A breakfast suggestion on the wheel
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakfastItem {
    /// Catalog position
    pub id: ItemId,
    /// Display name
    pub name: String,
    /// Card image
    pub image: ImageRef,
    /// Descriptive metadata ("Comfort • 520 kcal")
    pub meta: String,
    /// Mood tags, never empty
    pub moods: MoodSet,
}

impl BreakfastItem {
    /// Whether this item is offered for the given mood
    #[must_use]
    pub fn matches(&self, mood: &Mood) -> bool {
        mood.is_wildcard() || self.moods.contains(mood)
    }
}

/// The ordered, read-only list of breakfast items
#[derive(Clone, Debug)]
pub struct Catalog {
    items: Vec<BreakfastItem>,
}

impl Catalog {
    /// Build a catalog from card markup
    ///
    /// Field values are taken as-is: empty names or images are not an error
    /// and simply render as blank cards.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Empty`] when there are no cards.
    pub fn from_markup(cards: Vec<CardMarkup>) -> Result<Self, CatalogError> {
        if cards.is_empty() {
            return Err(CatalogError::Empty);
        }

        let items = cards
            .into_iter()
            .enumerate()
            .map(|(index, card)| BreakfastItem {
                id: ItemId(index),
                name: card.title,
                image: ImageRef {
                    url: card.image,
                    alt: card.alt,
                },
                meta: card.meta,
                moods: MoodSet::parse(card.mood.as_deref()),
            })
            .collect::<Vec<_>>();

        tracing::debug!(count = items.len(), "Breakfast catalog built");
        Ok(Self { items })
    }

    /// Parse a card file
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or declares no cards.
    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        let file: CardFile = toml::from_str(content)?;
        Self::from_markup(file.card)
    }

    /// Load a card file from disk
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        let catalog = Self::from_toml_str(&content)?;
        tracing::info!(path = %path.display(), count = catalog.len(), "Loaded card file");
        Ok(catalog)
    }

    /// The built-in card set
    ///
    /// # Errors
    ///
    /// Only fails if the embedded card file is malformed.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_toml_str(BUILTIN_CARDS)
    }

    /// Load from `path` when given, otherwise use the built-in cards
    ///
    /// # Errors
    ///
    /// Returns an error if the given file cannot be read or parsed.
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(p) => Self::load(p),
            None => Self::builtin(),
        }
    }

    /// Look up an item by id
    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&BreakfastItem> {
        self.items.get(id.index())
    }

    /// All items in catalog order
    #[must_use]
    pub fn items(&self) -> &[BreakfastItem] {
        &self.items
    }

    /// Iterate items in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &BreakfastItem> {
        self.items.iter()
    }

    /// All item ids in catalog order
    #[must_use]
    pub fn ids(&self) -> Vec<ItemId> {
        self.items.iter().map(|item| item.id).collect()
    }

    /// Number of items
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false for a constructed catalog
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.len(), 8);
        assert_eq!(catalog.items()[0].name, "Pancakes & Syrup");

        // Ids follow catalog order
        for (index, item) in catalog.iter().enumerate() {
            assert_eq!(item.id, ItemId(index));
        }
    }

    #[test]
    fn test_card_without_mood_gets_wildcard() {
        let catalog = Catalog::builtin().unwrap();
        let french_toast = catalog.iter().find(|i| i.name == "French Toast").unwrap();
        assert_eq!(french_toast.moods.primary(), &Mood::any());
    }

    #[test]
    fn test_empty_markup_is_rejected() {
        assert!(matches!(
            Catalog::from_markup(Vec::new()),
            Err(CatalogError::Empty)
        ));
        assert!(matches!(
            Catalog::from_toml_str("# nothing here"),
            Err(CatalogError::Empty)
        ));
    }

    #[test]
    fn test_missing_fields_are_not_validated() {
        let catalog = Catalog::from_toml_str("[[card]]\nmood = \"rushed\"\n").unwrap();
        let item = &catalog.items()[0];
        assert_eq!(item.name, "");
        assert_eq!(item.image, ImageRef::default());
        assert_eq!(item.moods.primary().as_str(), "rushed");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[[card]]
title = "Shakshuka"
image = "shakshuka.jpg"
alt = "Eggs poached in tomato sauce"
meta = "Relaxed • 420 kcal"
mood = "relaxed"
"#
        )
        .unwrap();

        let catalog = Catalog::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.items()[0].image.alt, "Eggs poached in tomato sauce");
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let err = Catalog::load(Path::new("/nonexistent/cards.toml")).unwrap_err();
        assert!(matches!(err, CatalogError::ReadError { .. }));
        assert!(err.to_string().contains("/nonexistent/cards.toml"));
    }

    #[test]
    fn test_item_matches() {
        let catalog = Catalog::from_markup(vec![CardMarkup::new("Oats", Some("healthy"))]).unwrap();
        let oats = &catalog.items()[0];
        assert!(oats.matches(&Mood::new("healthy")));
        assert!(oats.matches(&Mood::any()));
        assert!(!oats.matches(&Mood::new("comfort")));
    }
}
