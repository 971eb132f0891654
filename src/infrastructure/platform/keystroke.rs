use enigo::{Enigo, Key, KeyboardControllable};

use super::KeystrokeInjector;
use crate::domain::error::{AppError, Result};
use crate::domain::gesture::{Chord, KeyCode, Modifiers};

/// Keystroke injection through `enigo`.
#[derive(Debug, Default)]
pub struct EnigoKeystrokes;

impl EnigoKeystrokes {
    pub fn new() -> Self {
        Self
    }
}

fn modifier_keys(modifiers: Modifiers) -> Vec<Key> {
    let mut keys = Vec::new();
    if modifiers.control {
        keys.push(Key::Control);
    }
    if modifiers.alt {
        #[cfg(target_os = "macos")]
        keys.push(Key::Option);
        #[cfg(not(target_os = "macos"))]
        keys.push(Key::Alt);
    }
    if modifiers.shift {
        keys.push(Key::Shift);
    }
    if modifiers.meta {
        keys.push(Key::Meta);
    }
    keys
}

fn main_key(code: &KeyCode) -> Result<Key> {
    if let Some(ch) = code.layout_char() {
        return Ok(Key::Layout(ch));
    }
    let key = match code.as_str() {
        "Escape" => Key::Escape,
        "Space" => Key::Space,
        "Enter" => Key::Return,
        "Tab" => Key::Tab,
        "Backspace" => Key::Backspace,
        "Delete" => Key::Delete,
        "ArrowUp" => Key::UpArrow,
        "ArrowDown" => Key::DownArrow,
        "ArrowLeft" => Key::LeftArrow,
        "ArrowRight" => Key::RightArrow,
        "PageUp" => Key::PageUp,
        "PageDown" => Key::PageDown,
        "Home" => Key::Home,
        "End" => Key::End,
        other => {
            return Err(AppError::InputError(format!(
                "Cannot synthesize key: {other}"
            )))
        }
    };
    Ok(key)
}

impl KeystrokeInjector for EnigoKeystrokes {
    fn synthesize_key_chord(&self, chord: &Chord, down: bool) -> Result<()> {
        let key = main_key(&chord.key)?;
        let modifiers = modifier_keys(chord.modifiers);
        let mut enigo = Enigo::new();

        if down {
            for modifier in &modifiers {
                enigo.key_down(*modifier);
            }
            enigo.key_down(key);
        } else {
            enigo.key_up(key);
            for modifier in modifiers.iter().rev() {
                enigo.key_up(*modifier);
            }
        }
        Ok(())
    }
}
