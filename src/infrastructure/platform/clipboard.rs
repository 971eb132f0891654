use super::Clipboard;
use crate::domain::error::{AppError, Result};

/// System clipboard through `arboard`. A fresh handle is opened per call so
/// the adapter can be shared freely between threads.
#[derive(Debug, Default)]
pub struct ArboardClipboard;

impl ArboardClipboard {
    pub fn new() -> Self {
        Self
    }

    fn open() -> Result<arboard::Clipboard> {
        arboard::Clipboard::new()
            .map_err(|e| AppError::ClipboardError(format!("Failed to open clipboard: {}", e)))
    }
}

impl Clipboard for ArboardClipboard {
    fn read(&self) -> Option<String> {
        Self::open().ok()?.get_text().ok()
    }

    fn write(&self, text: &str) -> Result<()> {
        Self::open()?
            .set_text(text.to_string())
            .map_err(|e| AppError::ClipboardError(format!("Failed to write clipboard: {}", e)))
    }

    fn clear(&self) -> Result<()> {
        Self::open()?
            .clear()
            .map_err(|e| AppError::ClipboardError(format!("Failed to clear clipboard: {}", e)))
    }
}
