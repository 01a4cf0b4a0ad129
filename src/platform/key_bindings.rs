//=========================================================================
// Key Bindings
//=========================================================================
//
// Keyboard → gamepad-button table used by the input processor.
//
// Bound keys reach states as semantic button presses; every other key
// is forwarded as a raw `InputEvent::Key`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::input::{GamepadButton, KeyCode};

//=== KeyBindings =========================================================

/// Maps physical keys to gamepad buttons.
///
/// # Default Table
///
/// | Keys                | Button |
/// |---------------------|--------|
/// | Arrows, W/A/S/D     | Up / Left / Down / Right |
/// | F                   | North  |
/// | Enter               | East   |
/// | Escape, Backspace   | South  |
/// | Tab                 | Start  |
/// | Q                   | Select |
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct KeyBindings {
    table: HashMap<KeyCode, GamepadButton>,
}

impl KeyBindings {
    /// Creates an empty table.
    pub(crate) fn empty() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    /// Binds `key` to `button`, replacing any earlier binding of `key`.
    pub(crate) fn bind(&mut self, key: KeyCode, button: GamepadButton) {
        if let Some(previous) = self.table.insert(key, button) {
            debug!(target: "platform::input", "Rebound {:?}: {:?} → {:?}", key, previous, button);
        }
    }

    pub(crate) fn unbind(&mut self, key: KeyCode) {
        self.table.remove(&key);
    }

    pub(crate) fn button_for(&self, key: KeyCode) -> Option<GamepadButton> {
        self.table.get(&key).copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.table.len()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = Self::empty();

        for (key, button) in [
            (KeyCode::ArrowUp, GamepadButton::Up),
            (KeyCode::ArrowDown, GamepadButton::Down),
            (KeyCode::ArrowLeft, GamepadButton::Left),
            (KeyCode::ArrowRight, GamepadButton::Right),
            (KeyCode::KeyW, GamepadButton::Up),
            (KeyCode::KeyS, GamepadButton::Down),
            (KeyCode::KeyA, GamepadButton::Left),
            (KeyCode::KeyD, GamepadButton::Right),
            (KeyCode::KeyF, GamepadButton::North),
            (KeyCode::Enter, GamepadButton::East),
            (KeyCode::Escape, GamepadButton::South),
            (KeyCode::Backspace, GamepadButton::South),
            (KeyCode::Tab, GamepadButton::Start),
            (KeyCode::KeyQ, GamepadButton::Select),
        ] {
            bindings.bind(key, button);
        }

        bindings
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table() {
        let bindings = KeyBindings::default();

        assert_eq!(bindings.len(), 14);
        assert_eq!(bindings.button_for(KeyCode::KeyW), Some(GamepadButton::Up));
        assert_eq!(bindings.button_for(KeyCode::ArrowRight), Some(GamepadButton::Right));
        assert_eq!(bindings.button_for(KeyCode::Enter), Some(GamepadButton::East));
        assert_eq!(bindings.button_for(KeyCode::Backspace), Some(GamepadButton::South));
        assert_eq!(bindings.button_for(KeyCode::Space), None);
    }

    #[test]
    fn bind_replaces_and_unbind_removes() {
        let mut bindings = KeyBindings::default();

        bindings.bind(KeyCode::Space, GamepadButton::East);
        bindings.bind(KeyCode::Enter, GamepadButton::West);
        bindings.unbind(KeyCode::Escape);

        assert_eq!(bindings.button_for(KeyCode::Space), Some(GamepadButton::East));
        assert_eq!(bindings.button_for(KeyCode::Enter), Some(GamepadButton::West));
        assert_eq!(bindings.button_for(KeyCode::Escape), None);
    }

    #[test]
    fn empty_has_no_bindings() {
        assert_eq!(KeyBindings::empty().len(), 0);
    }
}
