//! Share / Export
//!
//! Serializes the current result to plain text and copies it, trying the
//! primary clipboard first and one fallback after that. There are no
//! retries beyond the fallback.
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use wheel_core::share::{MemoryClipboard, NoClipboard, ShareExporter};
//!
//! let exporter = ShareExporter::new(Arc::new(NoClipboard), Arc::new(MemoryClipboard::new()));
//! let outcome = exporter.export(&text).await?;
//! ```

mod traits;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use traits::{ClipboardBackend, ClipboardError, MemoryClipboard, NoClipboard};

use crate::presenter::ResultCard;

/// Message shown when neither clipboard worked
pub const COPY_FAILED_MESSAGE: &str = "Could not copy. Please try again!";

/// Text copied for a result
#[must_use]
pub fn export_text(card: &ResultCard, call_to_action: &str) -> String {
    format!(
        "🍳 My Breakfast Choice: {}\n{}\n\n{}",
        card.name, card.meta, call_to_action
    )
}

/// Which clipboard accepted the text
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportOutcome {
    /// The primary (system) clipboard
    Primary,
    /// The fallback technique
    Fallback,
}

/// Share failures
#[derive(Debug, Error)]
pub enum ShareError {
    /// Both the primary and the fallback clipboard failed
    #[error("clipboard unavailable (primary: {primary}; fallback: {fallback})")]
    Unavailable {
        /// Why the primary clipboard failed
        primary: ClipboardError,
        /// Why the fallback failed
        fallback: ClipboardError,
    },
}

/// Copies text with one fallback
#[derive(Clone)]
pub struct ShareExporter {
    primary: Arc<dyn ClipboardBackend>,
    fallback: Arc<dyn ClipboardBackend>,
}

impl std::fmt::Debug for ShareExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShareExporter")
            .field("primary", &self.primary.name())
            .field("fallback", &self.fallback.name())
            .finish()
    }
}

impl ShareExporter {
    /// Create an exporter from a primary and a fallback backend
    pub fn new(primary: Arc<dyn ClipboardBackend>, fallback: Arc<dyn ClipboardBackend>) -> Self {
        Self { primary, fallback }
    }

    /// An exporter that can never copy anything
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(Arc::new(NoClipboard), Arc::new(NoClipboard))
    }

    /// Copy `text`, primary first
    ///
    /// # Errors
    ///
    /// Returns [`ShareError::Unavailable`] when both backends fail.
    pub async fn export(&self, text: &str) -> Result<ExportOutcome, ShareError> {
        let primary = match self.primary.write_text(text).await {
            Ok(()) => {
                tracing::info!(backend = self.primary.name(), "Copied result");
                return Ok(ExportOutcome::Primary);
            }
            Err(e) => e,
        };

        tracing::warn!(
            backend = self.primary.name(),
            error = %primary,
            fallback = self.fallback.name(),
            "Primary clipboard failed, trying fallback"
        );

        match self.fallback.write_text(text).await {
            Ok(()) => {
                tracing::info!(backend = self.fallback.name(), "Copied result");
                Ok(ExportOutcome::Fallback)
            }
            Err(fallback) => {
                tracing::warn!(error = %fallback, "Fallback clipboard failed");
                Err(ShareError::Unavailable { primary, fallback })
            }
        }
    }
}
