use std::sync::atomic::{AtomicBool, Ordering};

use super::Accessibility;

/// Accessibility adapter for platforms without a selected-text query.
///
/// Selection capture always takes the clipboard path. Input monitoring is
/// reported as granted unless the shell says otherwise via [`set_granted`].
///
/// [`set_granted`]: ClipboardOnlyAccessibility::set_granted
#[derive(Debug)]
pub struct ClipboardOnlyAccessibility {
    granted: AtomicBool,
}

impl ClipboardOnlyAccessibility {
    pub fn new() -> Self {
        Self {
            granted: AtomicBool::new(true),
        }
    }

    pub fn set_granted(&self, granted: bool) {
        self.granted.store(granted, Ordering::SeqCst);
    }
}

impl Default for ClipboardOnlyAccessibility {
    fn default() -> Self {
        Self::new()
    }
}

impl Accessibility for ClipboardOnlyAccessibility {
    fn query_selected_text(&self) -> Option<String> {
        None
    }

    fn is_input_monitoring_granted(&self) -> bool {
        self.granted.load(Ordering::SeqCst)
    }

    fn request_input_monitoring_grant(&self) {}
}
