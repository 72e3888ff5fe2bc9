/// Keyboard key identifier (physical key).
///
/// Only keys the runtime acts on are named; everything else is reported as
/// `Unknown` carrying the platform scan code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Q,
    Unknown(u32),
}

/// Key transition.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Platform-agnostic window input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Drawable size changed, in physical pixels.
    Resized { width: u32, height: u32 },

    /// The user asked to close the window.
    CloseRequested,

    Key {
        key: Key,
        state: KeyState,
        repeat: bool,
    },

    Focused(bool),
}

impl InputEvent {
    /// Returns `true` for a fresh (non-repeat) press of `key`.
    pub fn is_key_press(&self, key: Key) -> bool {
        matches!(
            self,
            InputEvent::Key { key: k, state: KeyState::Pressed, repeat: false } if *k == key
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_press_ignores_repeats_and_releases() {
        let press = InputEvent::Key { key: Key::Q, state: KeyState::Pressed, repeat: false };
        let repeat = InputEvent::Key { key: Key::Q, state: KeyState::Pressed, repeat: true };
        let release = InputEvent::Key { key: Key::Q, state: KeyState::Released, repeat: false };

        assert!(press.is_key_press(Key::Q));
        assert!(!press.is_key_press(Key::Escape));
        assert!(!repeat.is_key_press(Key::Q));
        assert!(!release.is_key_press(Key::Q));
        assert!(!InputEvent::CloseRequested.is_key_press(Key::Q));
    }
}
