use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

/// Normalized key identifier, e.g. `KeyC`, `Digit1`, `Escape`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyCode(String);

impl KeyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The character a layout-based injector should type for this key, if any.
    pub fn layout_char(&self) -> Option<char> {
        if let Some(letter) = self.0.strip_prefix("Key") {
            let mut chars = letter.chars();
            return match (chars.next(), chars.next()) {
                (Some(c), None) => Some(c.to_ascii_lowercase()),
                _ => None,
            };
        }
        if let Some(digit) = self.0.strip_prefix("Digit") {
            let mut chars = digit.chars();
            return match (chars.next(), chars.next()) {
                (Some(c), None) => Some(c),
                _ => None,
            };
        }
        match self.0.as_str() {
            "Minus" => Some('-'),
            "Equal" => Some('='),
            "Comma" => Some(','),
            "Period" => Some('.'),
            "Slash" => Some('/'),
            "Semicolon" => Some(';'),
            "Quote" => Some('\''),
            "BracketLeft" => Some('['),
            "BracketRight" => Some(']'),
            "Backslash" => Some('\\'),
            "Backquote" => Some('`'),
            _ => None,
        }
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Modifiers {
    pub control: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        control: false,
        alt: false,
        shift: false,
        meta: false,
    };

    /// Command on macOS, Control everywhere else.
    pub fn primary() -> Self {
        if cfg!(target_os = "macos") {
            Modifiers {
                meta: true,
                ..Modifiers::NONE
            }
        } else {
            Modifiers {
                control: true,
                ..Modifiers::NONE
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Modifiers::NONE
    }

    /// True when every modifier set in `other` is also set here.
    pub fn contains(&self, other: Modifiers) -> bool {
        (!other.control || self.control)
            && (!other.alt || self.alt)
            && (!other.shift || self.shift)
            && (!other.meta || self.meta)
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.control {
            parts.push("Ctrl");
        }
        if self.alt {
            parts.push("Alt");
        }
        if self.shift {
            parts.push("Shift");
        }
        if self.meta {
            parts.push(if cfg!(target_os = "macos") { "Cmd" } else { "Meta" });
        }
        f.write_str(&parts.join("+"))
    }
}

/// A key plus the modifiers that must be held with it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Chord {
    pub key: KeyCode,
    pub modifiers: Modifiers,
}

impl Chord {
    pub fn new(key: KeyCode, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// The platform copy shortcut.
    pub fn copy() -> Self {
        Self::new(KeyCode::new("KeyC"), Modifiers::primary())
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        event.kind == KeyEventKind::Down
            && event.key == self.key
            && event.modifiers.contains(self.modifiers)
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.is_empty() {
            write!(f, "{}", self.key)
        } else {
            write!(f, "{}+{}", self.modifiers, self.key)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEventKind {
    Down,
    Up,
}

#[derive(Debug, Clone)]
pub struct KeyEvent {
    pub key: KeyCode,
    pub modifiers: Modifiers,
    pub kind: KeyEventKind,
    pub at: Instant,
}

impl KeyEvent {
    pub fn down(key: KeyCode, modifiers: Modifiers, at: Instant) -> Self {
        Self {
            key,
            modifiers,
            kind: KeyEventKind::Down,
            at,
        }
    }

    pub fn up(key: KeyCode, modifiers: Modifiers, at: Instant) -> Self {
        Self {
            key,
            modifiers,
            kind: KeyEventKind::Up,
            at,
        }
    }
}
