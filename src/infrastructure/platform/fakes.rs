//! In-memory capabilities for unit tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::{Accessibility, Clipboard, KeystrokeInjector};
use crate::domain::error::Result;
use crate::domain::gesture::Chord;

#[derive(Default)]
pub(crate) struct MemoryClipboard {
    pub(crate) contents: Mutex<Option<String>>,
    pub(crate) writes: AtomicUsize,
}

impl MemoryClipboard {
    pub(crate) fn with(text: &str) -> Arc<Self> {
        let clipboard = Self::default();
        *clipboard.contents.lock().unwrap() = Some(text.to_string());
        Arc::new(clipboard)
    }

    pub(crate) fn get(&self) -> Option<String> {
        self.contents.lock().unwrap().clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn read(&self) -> Option<String> {
        self.get()
    }

    fn write(&self, text: &str) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        *self.contents.lock().unwrap() = Some(text.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.contents.lock().unwrap() = None;
        Ok(())
    }
}

/// Plays the part of the focused application: on the copy key-down it puts
/// `selection` on the clipboard, if there is one. The chord of every key-down is
/// recorded in `chords`.
pub(crate) struct CopyingApp {
    pub(crate) clipboard: Arc<MemoryClipboard>,
    pub(crate) selection: Option<String>,
    pub(crate) presses: AtomicUsize,
    pub(crate) chords: Mutex<Vec<Chord>>,
}

impl CopyingApp {
    pub(crate) fn new(clipboard: Arc<MemoryClipboard>, selection: Option<&str>) -> Arc<Self> {
        Arc::new(Self {
            clipboard,
            selection: selection.map(str::to_string),
            presses: AtomicUsize::new(0),
            chords: Mutex::new(Vec::new()),
        })
    }
}

impl KeystrokeInjector for CopyingApp {
    fn synthesize_key_chord(&self, chord: &Chord, down: bool) -> Result<()> {
        if down {
            self.presses.fetch_add(1, Ordering::SeqCst);
            self.chords.lock().unwrap().push(chord.clone());
            if let Some(selection) = &self.selection {
                *self.clipboard.contents.lock().unwrap() = Some(selection.clone());
            }
        }
        Ok(())
    }
}

pub(crate) struct FakeAccessibility {
    pub(crate) selected: Option<String>,
    pub(crate) granted: AtomicBool,
    pub(crate) grant_on_request: bool,
    pub(crate) requests: AtomicUsize,
}

impl FakeAccessibility {
    pub(crate) fn new(selected: Option<&str>, granted: bool) -> Arc<Self> {
        Arc::new(Self {
            selected: selected.map(str::to_string),
            granted: AtomicBool::new(granted),
            grant_on_request: false,
            requests: AtomicUsize::new(0),
        })
    }

    pub(crate) fn granting_on_request() -> Arc<Self> {
        Arc::new(Self {
            selected: None,
            granted: AtomicBool::new(false),
            grant_on_request: true,
            requests: AtomicUsize::new(0),
        })
    }

    pub(crate) fn set_granted(&self, granted: bool) {
        self.granted.store(granted, Ordering::SeqCst);
    }
}

impl Accessibility for FakeAccessibility {
    fn query_selected_text(&self) -> Option<String> {
        self.selected.clone()
    }

    fn is_input_monitoring_granted(&self) -> bool {
        self.granted.load(Ordering::SeqCst)
    }

    fn request_input_monitoring_grant(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if self.grant_on_request {
            self.set_granted(true);
        }
    }
}
