//! Operating-system capabilities the pipeline consumes.
//!
//! Each capability is a small trait so the gesture and capture logic can be
//! exercised against fakes; the adapters here cover what can be done
//! portably, and a platform shell may swap in richer implementations.

pub mod accessibility;
pub mod clipboard;
pub mod keystroke;

#[cfg(test)]
pub(crate) mod fakes;

use crate::domain::error::Result;
use crate::domain::gesture::Chord;

pub use accessibility::ClipboardOnlyAccessibility;
pub use clipboard::ArboardClipboard;
pub use keystroke::EnigoKeystrokes;

pub trait Clipboard: Send + Sync {
    /// Current text contents, `None` when empty or not text.
    fn read(&self) -> Option<String>;
    fn write(&self, text: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

pub trait KeystrokeInjector: Send + Sync {
    /// Posts the chord's key (with its modifiers) as a key-down or key-up.
    fn synthesize_key_chord(&self, chord: &Chord, down: bool) -> Result<()>;
}

pub trait Accessibility: Send + Sync {
    /// Selected text of the focused control, if the platform can tell.
    fn query_selected_text(&self) -> Option<String>;
    fn is_input_monitoring_granted(&self) -> bool;
    fn request_input_monitoring_grant(&self);
}
