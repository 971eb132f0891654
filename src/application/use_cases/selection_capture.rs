use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::domain::gesture::Chord;
use crate::infrastructure::config::CaptureSettings;
use crate::infrastructure::platform::{Accessibility, Clipboard, KeystrokeInjector};

/// Source of the text the user currently has selected.
#[async_trait]
pub trait SelectionSource: Send + Sync {
    /// Waits out the settle delay; never call from the key-event thread.
    async fn capture(&self) -> Option<String>;
}

/// Extracts the current selection, preferring the accessibility query and
/// falling back to a synthesized copy that leaves the clipboard as it found it.
///
/// Captures are serialized: a capture waits for the previous capture's
/// clipboard restore before reading the clipboard itself.
pub struct SelectionCapture {
    accessibility: Arc<dyn Accessibility>,
    clipboard: Arc<dyn Clipboard>,
    keystrokes: Arc<dyn KeystrokeInjector>,
    copy_chord: Chord,
    settle_delay: Duration,
    restore_delay: Duration,
    pending_restore: Mutex<Option<JoinHandle<()>>>,
}

impl SelectionCapture {
    pub fn new(
        accessibility: Arc<dyn Accessibility>,
        clipboard: Arc<dyn Clipboard>,
        keystrokes: Arc<dyn KeystrokeInjector>,
        copy_chord: Chord,
        settings: &CaptureSettings,
    ) -> Self {
        Self {
            accessibility,
            clipboard,
            keystrokes,
            copy_chord,
            settle_delay: Duration::from_millis(settings.settle_delay_ms),
            restore_delay: Duration::from_millis(settings.restore_delay_ms),
            pending_restore: Mutex::new(None),
        }
    }

    /// Resolves once the clipboard restore of the last capture, if any, has run.
    pub async fn wait_for_restore(&self) {
        let mut pending = self.pending_restore.lock().await;
        Self::finish_restore(&mut pending).await;
    }

    async fn finish_restore(pending: &mut Option<JoinHandle<()>>) {
        if let Some(handle) = pending.take() {
            if let Err(err) = handle.await {
                warn!(error = %err, "Clipboard restore task failed");
            }
        }
    }

    async fn capture_via_clipboard(&self) -> (Option<String>, Option<JoinHandle<()>>) {
        let original = self.clipboard.read();

        if let Err(err) = self.clipboard.clear() {
            warn!(error = %err, "Failed to clear clipboard before copy");
        }
        self.press_copy();

        tokio::time::sleep(self.settle_delay).await;

        let copied = self
            .clipboard
            .read()
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());

        if copied.is_none() {
            warn!("No text captured from clipboard");
        }

        let restore = original.map(|original| self.schedule_restore(original));
        (copied, restore)
    }

    fn press_copy(&self) {
        for down in [true, false] {
            if let Err(err) = self.keystrokes.synthesize_key_chord(&self.copy_chord, down) {
                warn!(error = %err, down, "Failed to synthesize copy keystroke");
            }
        }
    }

    fn schedule_restore(&self, original: String) -> JoinHandle<()> {
        let clipboard = self.clipboard.clone();
        let delay = self.restore_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(err) = clipboard.write(&original) {
                warn!(error = %err, "Failed to restore clipboard");
            }
        })
    }
}

#[async_trait]
impl SelectionSource for SelectionCapture {
    async fn capture(&self) -> Option<String> {
        let mut pending = self.pending_restore.lock().await;
        Self::finish_restore(&mut pending).await;

        if let Some(text) = self
            .accessibility
            .query_selected_text()
            .filter(|t| !t.is_empty())
        {
            debug!("Selection read through accessibility");
            return Some(text);
        }

        let (copied, restore) = self.capture_via_clipboard().await;
        *pending = restore;
        copied
    }
}
