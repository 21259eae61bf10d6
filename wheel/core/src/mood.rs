//! Mood Tags
//!
//! Typed mood tags parsed once from the card markup. A card's tags keep
//! their declared order: the first tag is the card's *primary* mood and
//! picks the flavor line shown with the result.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Tag value that matches every card
pub const WILDCARD: &str = "any";

/// A normalized mood tag (trimmed, lowercase)
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String")]
pub struct Mood(String);

impl Mood {
    /// Moods offered by the mood selector, wildcard first
    pub const CHOICES: [&'static str; 5] = [WILDCARD, "comfort", "healthy", "rushed", "relaxed"];

    /// Create a mood from raw text, normalizing case and whitespace
    ///
    /// Blank input normalizes to the wildcard.
    pub fn new(raw: impl AsRef<str>) -> Self {
        let normalized = raw.as_ref().trim().to_lowercase();
        if normalized.is_empty() {
            Self::any()
        } else {
            Self(normalized)
        }
    }

    /// The wildcard mood
    #[must_use]
    pub fn any() -> Self {
        Self(WILDCARD.to_string())
    }

    /// Whether this mood matches every card
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.0 == WILDCARD
    }

    /// The tag text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human-readable label for selectors ("Any mood", "Comfort", ...)
    #[must_use]
    pub fn label(&self) -> String {
        if self.is_wildcard() {
            return "Any mood".to_string();
        }
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// The next entry in [`Mood::CHOICES`], wrapping around
    ///
    /// Custom tags that are not in the list step to the wildcard.
    #[must_use]
    pub fn next_choice(&self) -> Self {
        let idx = Self::CHOICES.iter().position(|c| *c == self.0);
        match idx {
            Some(i) => Self::new(Self::CHOICES[(i + 1) % Self::CHOICES.len()]),
            None => Self::any(),
        }
    }

    /// The previous entry in [`Mood::CHOICES`], wrapping around
    #[must_use]
    pub fn prev_choice(&self) -> Self {
        let len = Self::CHOICES.len();
        let idx = Self::CHOICES.iter().position(|c| *c == self.0);
        match idx {
            Some(i) => Self::new(Self::CHOICES[(i + len - 1) % len]),
            None => Self::any(),
        }
    }
}

impl Default for Mood {
    fn default() -> Self {
        Self::any()
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Mood {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<String> for Mood {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for Mood {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// The non-empty, ordered set of tags declared on one card
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Mood>")]
pub struct MoodSet(Vec<Mood>);

impl MoodSet {
    /// Parse a comma-separated mood attribute
    ///
    /// A missing or blank attribute yields the wildcard tag alone. Empty
    /// entries and duplicates are dropped.
    pub fn parse(attr: Option<&str>) -> Self {
        attr.unwrap_or_default()
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(Mood::new)
            .collect::<Vec<_>>()
            .into()
    }

    /// Whether this set declares the given tag
    #[must_use]
    pub fn contains(&self, mood: &Mood) -> bool {
        self.0.contains(mood)
    }

    /// The first declared tag
    #[must_use]
    pub fn primary(&self) -> &Mood {
        // parse() never produces an empty set
        &self.0[0]
    }

    /// Iterate the tags in declared order
    pub fn iter(&self) -> impl Iterator<Item = &Mood> {
        self.0.iter()
    }

    /// Number of tags
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for clippy's `len_without_is_empty`
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Mood>> for MoodSet {
    fn from(moods: Vec<Mood>) -> Self {
        let mut tags: Vec<Mood> = Vec::with_capacity(moods.len());
        for mood in moods {
            if !tags.contains(&mood) {
                tags.push(mood);
            }
        }
        if tags.is_empty() {
            tags.push(Mood::any());
        }
        Self(tags)
    }
}
