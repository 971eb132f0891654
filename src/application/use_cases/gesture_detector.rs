use std::time::{Duration, Instant};

use crate::domain::gesture::{Chord, KeyEvent};

pub const DEFAULT_WINDOW: Duration = Duration::from_millis(500);

/// Recognizes the same chord pressed twice within `window`.
///
/// Only observes events; it never decides whether an event reaches the
/// focused application. Per-event work is constant time.
#[derive(Debug, Clone)]
pub struct GestureDetector {
    chord: Chord,
    window: Duration,
    last_trigger: Option<Instant>,
}

impl GestureDetector {
    pub fn new(chord: Chord, window: Duration) -> Self {
        Self {
            chord,
            window,
            last_trigger: None,
        }
    }

    pub fn chord(&self) -> &Chord {
        &self.chord
    }

    /// Feeds one key event. Returns `true` when it completes a double press.
    pub fn process(&mut self, event: &KeyEvent) -> bool {
        if !self.chord.matches(event) {
            return false;
        }

        match self.last_trigger {
            Some(last) if event.at.saturating_duration_since(last) <= self.window => {
                // A third quick press starts over instead of firing again.
                self.last_trigger = None;
                true
            }
            _ => {
                self.last_trigger = Some(event.at);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gesture::{KeyCode, Modifiers};

    fn detector() -> GestureDetector {
        GestureDetector::new(Chord::copy(), DEFAULT_WINDOW)
    }

    fn copy_at(start: Instant, ms: u64) -> KeyEvent {
        KeyEvent::down(
            KeyCode::new("KeyC"),
            Modifiers::primary(),
            start + Duration::from_millis(ms),
        )
    }

    fn triggers(detector: &mut GestureDetector, events: &[KeyEvent]) -> usize {
        events.iter().filter(|e| detector.process(e)).count()
    }

    #[test]
    fn two_presses_inside_window_trigger_once() {
        let t0 = Instant::now();
        let mut d = detector();
        assert_eq!(triggers(&mut d, &[copy_at(t0, 0), copy_at(t0, 300)]), 1);
        assert!(!d.process(&copy_at(t0, 400)));
    }

    #[test]
    fn press_exactly_at_window_edge_triggers() {
        let t0 = Instant::now();
        let mut d = detector();
        assert_eq!(triggers(&mut d, &[copy_at(t0, 0), copy_at(t0, 500)]), 1);
    }

    #[test]
    fn presses_further_apart_do_not_trigger() {
        let t0 = Instant::now();
        let mut d = detector();
        assert_eq!(triggers(&mut d, &[copy_at(t0, 0), copy_at(t0, 501)]), 0);
        assert!(d.process(&copy_at(t0, 700)));
    }

    #[test]
    fn third_quick_press_does_not_trigger_again() {
        let t0 = Instant::now();
        let mut d = detector();
        let events = [copy_at(t0, 0), copy_at(t0, 200), copy_at(t0, 600)];
        let fired: Vec<bool> = events.iter().map(|e| d.process(e)).collect();
        assert_eq!(fired, vec![false, true, false]);
    }

    #[test]
    fn four_quick_presses_trigger_twice() {
        let t0 = Instant::now();
        let mut d = detector();
        let events = [
            copy_at(t0, 0),
            copy_at(t0, 100),
            copy_at(t0, 200),
            copy_at(t0, 300),
        ];
        assert_eq!(triggers(&mut d, &events), 2);
    }

    #[test]
    fn other_keys_and_key_ups_are_ignored() {
        let t0 = Instant::now();
        let mut d = detector();
        let events = [
            copy_at(t0, 0),
            KeyEvent::up(KeyCode::new("KeyC"), Modifiers::primary(), t0 + Duration::from_millis(50)),
            KeyEvent::down(KeyCode::new("KeyV"), Modifiers::primary(), t0 + Duration::from_millis(100)),
            KeyEvent::down(KeyCode::new("KeyC"), Modifiers::NONE, t0 + Duration::from_millis(150)),
            copy_at(t0, 200),
        ];
        let fired: Vec<bool> = events.iter().map(|e| d.process(e)).collect();
        assert_eq!(fired, vec![false, false, false, false, true]);
    }

    #[test]
    fn late_press_rearms_for_a_new_pair() {
        let t0 = Instant::now();
        let mut d = detector();
        let events = [copy_at(t0, 0), copy_at(t0, 800), copy_at(t0, 1100)];
        let fired: Vec<bool> = events.iter().map(|e| d.process(e)).collect();
        assert_eq!(fired, vec![false, false, true]);
    }
}
