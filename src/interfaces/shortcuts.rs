use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock, Weak};
use std::time::Duration;

use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};

use crate::application::use_cases::gesture_detector::GestureDetector;
use crate::application::use_cases::pipeline::PipelineCoordinator;
use crate::domain::error::{AppError, Result};
use crate::domain::gesture::{Chord, KeyCode, KeyEvent, Modifiers};
use crate::infrastructure::platform::Accessibility;

pub fn parse_chord(input: &str) -> Result<Chord> {
    let parts: Vec<&str> = input
        .split('+')
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect();

    let Some((key_part, modifier_parts)) = parts.split_last() else {
        return Err(AppError::ValidationError("Shortcut is empty.".to_string()));
    };

    let mut modifiers = Modifiers::NONE;
    for modifier in modifier_parts {
        match modifier.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => modifiers.control = true,
            "alt" | "option" => modifiers.alt = true,
            "shift" => modifiers.shift = true,
            "cmd" | "command" | "meta" | "win" | "super" => modifiers.meta = true,
            other => {
                return Err(AppError::ValidationError(format!(
                    "Unknown modifier: {other}"
                )))
            }
        }
    }

    Ok(Chord::new(parse_code(key_part)?, modifiers))
}

fn parse_code(key: &str) -> Result<KeyCode> {
    let unsupported = || AppError::ValidationError(format!("Unsupported key: {key}"));

    let mut chars = key.chars();
    let normalized = match (chars.next(), chars.next()) {
        (Some(ch), None) if ch.is_ascii_alphabetic() => format!("Key{}", ch.to_ascii_uppercase()),
        (Some(ch), None) if ch.is_ascii_digit() => format!("Digit{ch}"),
        (Some(ch), None) => {
            let name = match ch {
                '-' => "Minus",
                '=' => "Equal",
                ',' => "Comma",
                '.' => "Period",
                '/' => "Slash",
                ';' => "Semicolon",
                '\'' => "Quote",
                '[' => "BracketLeft",
                ']' => "BracketRight",
                '\\' => "Backslash",
                '`' => "Backquote",
                _ => return Err(unsupported()),
            };
            name.to_string()
        }
        _ => match key {
            "Esc" | "Escape" => "Escape".to_string(),
            "Space" | "Enter" | "Tab" | "Backspace" | "Delete" => key.to_string(),
            "ArrowUp" | "ArrowDown" | "ArrowLeft" | "ArrowRight" => key.to_string(),
            "PageUp" | "PageDown" | "Home" | "End" | "Insert" => key.to_string(),
            "Minus" | "Equal" | "Comma" | "Period" | "Slash" | "Semicolon" | "Quote"
            | "BracketLeft" | "BracketRight" | "Backslash" | "Backquote" => key.to_string(),
            _ if key.starts_with("Key") || key.starts_with("Digit") => {
                if KeyCode::new(key).layout_char().is_some() {
                    key.to_string()
                } else {
                    return Err(unsupported());
                }
            }
            _ if key.len() > 1
                && key.starts_with('F')
                && key[1..].chars().all(|c| c.is_ascii_digit()) =>
            {
                key.to_string()
            }
            _ => return Err(unsupported()),
        },
    };

    Ok(KeyCode::new(normalized))
}

/// Human label for a chord as users type it, e.g. `Cmd+C`.
pub fn chord_label(chord: &Chord) -> String {
    let key = key_label(&chord.key);
    if chord.modifiers.is_empty() {
        key
    } else {
        format!("{}+{}", chord.modifiers, key)
    }
}

fn key_label(key: &KeyCode) -> String {
    match key.layout_char() {
        Some(ch) => ch.to_ascii_uppercase().to_string(),
        None => key.as_str().to_string(),
    }
}

type EventSlot = Arc<RwLock<Option<mpsc::Sender<KeyEvent>>>>;

/// Feeds platform key events to a [`GestureDetector`] and hands triggers to
/// the pipeline.
///
/// Key events arrive through the closure from [`event_handler`](Self::event_handler)
/// and are queued on a bounded channel; detection runs on a Tokio task, so
/// the platform callback never blocks and never swallows the event.
/// Monitoring only runs while input-monitoring permission is granted.
pub struct ShortcutMonitor {
    accessibility: Arc<dyn Accessibility>,
    coordinator: Arc<PipelineCoordinator>,
    chord: Chord,
    window: Duration,
    capacity: usize,
    permission: AtomicBool,
    monitoring: AtomicBool,
    sender: EventSlot,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl ShortcutMonitor {
    pub fn new(
        accessibility: Arc<dyn Accessibility>,
        coordinator: Arc<PipelineCoordinator>,
        chord: Chord,
        window: Duration,
        capacity: usize,
    ) -> Self {
        let permission = accessibility.is_input_monitoring_granted();
        Self {
            accessibility,
            coordinator,
            chord,
            window,
            capacity: capacity.max(1),
            permission: AtomicBool::new(permission),
            monitoring: AtomicBool::new(false),
            sender: Arc::new(RwLock::new(None)),
            worker: Mutex::new(None),
        }
    }

    pub fn chord(&self) -> &Chord {
        &self.chord
    }

    /// Callback for the platform's key-event stream. Events that arrive while
    /// monitoring is stopped, or while the queue is full, are dropped here
    /// and still reach the focused application.
    pub fn event_handler(&self) -> impl Fn(KeyEvent) + Send + Sync + 'static {
        let slot = Arc::clone(&self.sender);
        move |event| {
            let guard = match slot.read() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            let Some(tx) = guard.as_ref() else {
                return;
            };
            match tx.try_send(event) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => trace!("Key event queue full, dropping event"),
                Err(TrySendError::Closed(_)) => {}
            }
        }
    }

    /// Re-reads the permission from the platform.
    pub fn has_permission(&self) -> bool {
        let granted = self.accessibility.is_input_monitoring_granted();
        self.permission.store(granted, Ordering::SeqCst);
        granted
    }

    pub fn is_monitoring(&self) -> bool {
        self.monitoring.load(Ordering::SeqCst)
    }

    /// Starts monitoring. Must be called inside a Tokio runtime. Returns
    /// whether monitoring is running afterwards.
    pub fn start(&self) -> bool {
        if !self.has_permission() {
            warn!("Input monitoring permission not granted, shortcut monitoring not started");
            return false;
        }
        if self.monitoring.swap(true, Ordering::SeqCst) {
            return true;
        }

        let (tx, mut rx) = mpsc::channel::<KeyEvent>(self.capacity);
        let coordinator = Arc::clone(&self.coordinator);
        let mut detector = GestureDetector::new(self.chord.clone(), self.window);

        let handle = tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                if detector.process(&event) {
                    info!("Double copy detected");
                    coordinator.on_trigger();
                }
            }
            debug!("Key event queue closed");
        });

        self.replace_sender(Some(tx));
        if let Some(previous) = self.lock_worker().replace(handle) {
            previous.abort();
        }
        info!(chord = %chord_label(&self.chord), "Shortcut monitoring started");
        true
    }

    pub fn stop(&self) {
        if !self.monitoring.swap(false, Ordering::SeqCst) {
            return;
        }
        self.replace_sender(None);
        if let Some(handle) = self.lock_worker().take() {
            handle.abort();
        }
        info!("Shortcut monitoring stopped");
    }

    /// Asks the platform for permission and starts monitoring if it was
    /// granted.
    pub fn request_permission(&self) -> bool {
        self.accessibility.request_input_monitoring_grant();
        if self.has_permission() {
            self.start()
        } else {
            false
        }
    }

    /// Polls permission every `interval`. Monitoring starts when permission
    /// appears and stops when it is revoked. The task ends once the monitor
    /// is dropped.
    pub fn spawn_permission_watch(self: &Arc<Self>, interval: Duration) -> JoinHandle<()> {
        let monitor: Weak<Self> = Arc::downgrade(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let Some(monitor) = monitor.upgrade() else {
                    break;
                };
                let was_granted = monitor.permission.load(Ordering::SeqCst);
                let granted = monitor.has_permission();
                if granted && !was_granted {
                    info!("Input monitoring permission granted");
                    monitor.start();
                } else if !granted && was_granted {
                    warn!("Input monitoring permission revoked");
                    monitor.stop();
                }
            }
        })
    }

    pub fn status_message(&self) -> String {
        if !self.permission.load(Ordering::SeqCst) {
            "Accessibility permission required".to_string()
        } else if self.is_monitoring() {
            format!(
                "Monitoring {}+{} shortcuts",
                chord_label(&self.chord),
                key_label(&self.chord.key)
            )
        } else {
            "Shortcut monitoring disabled".to_string()
        }
    }

    fn replace_sender(&self, tx: Option<mpsc::Sender<KeyEvent>>) {
        match self.sender.write() {
            Ok(mut guard) => *guard = tx,
            Err(poisoned) => *poisoned.into_inner() = tx,
        }
    }

    fn lock_worker(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        match self.worker.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Drop for ShortcutMonitor {
    fn drop(&mut self) {
        self.stop();
    }
}
