//! Clipboard sinks.
//!
//! The actual OS clipboard belongs to the host. The dispatcher only needs
//! somewhere to put text and to learn whether that worked.

use std::fmt;
use std::sync::Mutex;

/// Errors raised by a clipboard sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    /// No clipboard is available (headless session, missing permission).
    Unavailable(String),

    /// The clipboard exists but rejected the write.
    WriteFailed(String),
}

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipboardError::Unavailable(msg) => write!(f, "Clipboard unavailable: {}", msg),
            ClipboardError::WriteFailed(msg) => write!(f, "Clipboard write failed: {}", msg),
        }
    }
}

impl std::error::Error for ClipboardError {}

/// Destination for copied text.
pub trait ClipboardSink: Send + Sync {
    /// Replaces the clipboard contents with `text`.
    fn set_contents(&self, text: &str) -> Result<(), ClipboardError>;
}

/// In-process clipboard holding the last copied text.
///
/// Used by hosts without a system clipboard and by tests.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last text written, if any.
    pub fn contents(&self) -> Option<String> {
        self.contents.lock().ok().and_then(|c| c.clone())
    }
}

impl ClipboardSink for MemoryClipboard {
    fn set_contents(&self, text: &str) -> Result<(), ClipboardError> {
        let mut contents = self
            .contents
            .lock()
            .map_err(|_| ClipboardError::WriteFailed("clipboard lock poisoned".to_string()))?;
        *contents = Some(text.to_string());
        Ok(())
    }
}
