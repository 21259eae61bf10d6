//! Clipboard Backend Traits
//!
//! A clipboard backend is anything that can take a piece of text and put it
//! where the user can paste it: the system clipboard, a terminal escape
//! sequence, or an in-memory buffer in tests.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::Mutex;

/// Errors a single clipboard backend can report
#[derive(Debug, Error)]
pub enum ClipboardError {
    /// The backend cannot work in this environment
    #[error("clipboard not available: {0}")]
    Unavailable(String),

    /// The backend was tried and failed
    #[error("clipboard write failed: {0}")]
    WriteFailed(String),

    /// IO error while talking to the backend
    #[error("clipboard IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Clipboard backend trait
///
/// Implement this trait to add another way of copying text.
#[async_trait]
pub trait ClipboardBackend: Send + Sync {
    /// Backend name for logs (e.g., "wl-copy", "osc52")
    fn name(&self) -> &str;

    /// Write `text` to the clipboard
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Clipboard that keeps everything it is given in memory
///
/// Handy for headless sessions and tests.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    writes: Mutex<Vec<String>>,
}

impl MemoryClipboard {
    /// Create an empty clipboard
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent write
    pub async fn last(&self) -> Option<String> {
        self.writes.lock().await.last().cloned()
    }

    /// Number of writes so far
    pub async fn write_count(&self) -> usize {
        self.writes.lock().await.len()
    }
}

#[async_trait]
impl ClipboardBackend for MemoryClipboard {
    fn name(&self) -> &str {
        "memory"
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.writes.lock().await.push(text.to_string());
        Ok(())
    }
}

/// Clipboard that always fails
#[derive(Clone, Debug, Default)]
pub struct NoClipboard;

#[async_trait]
impl ClipboardBackend for NoClipboard {
    fn name(&self) -> &str {
        "none"
    }

    async fn write_text(&self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable("no clipboard configured".into()))
    }
}
