use std::sync::Mutex;

use crate::error::CopyError;

/// Where `copy` puts text.
pub trait ClipboardWriter: Send + Sync {
    fn write_text(&self, text: &str) -> Result<(), CopyError>;
}

/// The OS clipboard, via arboard.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ClipboardWriter for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<(), CopyError> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| CopyError::Unavailable(e.to_string()))?;
        clipboard
            .set_text(text)
            .map_err(|e| CopyError::Write(e.to_string()))
    }
}

/// Process-local clipboard for headless runs.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().ok().and_then(|c| c.clone())
    }
}

impl ClipboardWriter for MemoryClipboard {
    fn write_text(&self, text: &str) -> Result<(), CopyError> {
        let mut contents = self
            .contents
            .lock()
            .map_err(|e| CopyError::Write(e.to_string()))?;
        *contents = Some(text.to_string());
        Ok(())
    }
}
