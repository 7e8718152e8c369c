use std::collections::HashSet;

/// Keys the game reacts to. Everything else maps to `Unknown`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,
    Enter,
    Escape,
    P,
    Unknown,
}

/// Held keys plus the keys that went down during the current frame.
#[derive(Debug, Default)]
pub struct KeyboardState {
    down: HashSet<Key>,
    pressed: HashSet<Key>,
}

impl KeyboardState {
    pub fn press(&mut self, key: Key) {
        if self.down.insert(key) {
            self.pressed.insert(key);
        }
    }

    pub fn release(&mut self, key: Key) {
        self.down.remove(&key);
    }

    /// Clears held keys so nothing sticks when focus moves mid-press.
    pub fn focus_lost(&mut self) {
        self.down.clear();
    }

    /// Drops per-frame transitions; called by the runtime after each frame.
    pub fn end_frame(&mut self) {
        self.pressed.clear();
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.down.contains(&key)
    }

    /// True only on the frame the key went down (auto-repeat excluded).
    pub fn was_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_is_reported_once_per_hold() {
        let mut kb = KeyboardState::default();
        kb.press(Key::ArrowUp);
        assert!(kb.was_pressed(Key::ArrowUp));
        kb.end_frame();

        // OS auto-repeat delivers another press while held.
        kb.press(Key::ArrowUp);
        assert!(!kb.was_pressed(Key::ArrowUp));
        assert!(kb.is_down(Key::ArrowUp));

        kb.release(Key::ArrowUp);
        assert!(!kb.is_down(Key::ArrowUp));
    }

    #[test]
    fn focus_loss_releases_everything() {
        let mut kb = KeyboardState::default();
        kb.press(Key::ArrowLeft);
        kb.press(Key::Space);
        kb.focus_lost();
        assert!(!kb.is_down(Key::ArrowLeft));
        assert!(!kb.is_down(Key::Space));
    }
}
