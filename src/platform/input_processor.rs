//=========================================================================
// Input Processor
//=========================================================================
//
// Converts Winit window events into engine InputEvents.
//
// Architecture:
//   Winit Events → InputProcessor → InputEvent → InputBuffer
//
// Stateful tracking: the last cursor position (pointer events carry it)
// and whether the primary button is down (cursor motion then becomes a
// `PrimaryHeld` drag). Keys are looked up in the binding table: bound
// keys become button events, the rest raw key events.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;
use winit::{
    event::{ElementState, KeyEvent, MouseButton as WinitMouseButton},
    keyboard::{KeyCode as WinitKeyCode, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use super::key_bindings::KeyBindings;
use crate::core::input::{ButtonPhase, InputEvent, KeyAction, KeyCode, PointerAction, ScreenPoint};

//=== InputProcessor ======================================================

/// Converts Winit events to engine InputEvents.
pub(crate) struct InputProcessor {
    bindings: KeyBindings,
    cursor: ScreenPoint,
    primary_down: bool,
}

impl InputProcessor {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            cursor: ScreenPoint::new(0.0, 0.0),
            primary_down: false,
        }
    }

    //--- Event Processing -------------------------------------------------

    /// Converts a Winit key event (filters unmapped keys).
    pub(crate) fn process_key_event(&self, key_event: &KeyEvent) -> Option<InputEvent> {
        let key = match key_event.physical_key {
            PhysicalKey::Code(code) => KeyCode::from(code),
            _ => return None,
        };

        self.process_key(key, key_event.state, key_event.repeat)
    }

    /// Converts a physical key transition.
    ///
    /// Auto-repeat of a bound key is dropped so a held key presses its
    /// button once. Unbound keys forward repeats.
    pub(crate) fn process_key(
        &self,
        key: KeyCode,
        state: ElementState,
        repeat: bool,
    ) -> Option<InputEvent> {
        if key == KeyCode::Unidentified {
            return None;
        }

        match self.bindings.button_for(key) {
            Some(_) if repeat => None,
            Some(button) => Some(InputEvent::Button {
                button,
                phase: match state {
                    ElementState::Pressed => ButtonPhase::Pressed,
                    ElementState::Released => ButtonPhase::Released,
                },
            }),
            None => Some(InputEvent::Key {
                key,
                action: match state {
                    ElementState::Pressed => KeyAction::Pressed,
                    ElementState::Released => KeyAction::Released,
                },
            }),
        }
    }

    /// Converts a mouse button transition at the last cursor position.
    ///
    /// Only left (primary) and right (secondary) buttons are forwarded.
    pub(crate) fn process_mouse_button(
        &mut self,
        button: WinitMouseButton,
        state: ElementState,
    ) -> Option<InputEvent> {
        let action = match (button, state) {
            (WinitMouseButton::Left, ElementState::Pressed) => {
                self.primary_down = true;
                PointerAction::PrimaryDown
            }
            (WinitMouseButton::Left, ElementState::Released) => {
                self.primary_down = false;
                PointerAction::PrimaryUp
            }
            (WinitMouseButton::Right, ElementState::Pressed) => PointerAction::SecondaryDown,
            (WinitMouseButton::Right, ElementState::Released) => PointerAction::SecondaryUp,
            (other, _) => {
                trace!(target: "platform::input", "Mouse button {:?} ignored", other);
                return None;
            }
        };

        Some(InputEvent::Pointer {
            action,
            position: self.cursor,
        })
    }

    /// Records the cursor position. Emits a drag while primary is held.
    pub(crate) fn process_cursor_moved(&mut self, x: f32, y: f32) -> Option<InputEvent> {
        self.cursor = ScreenPoint::new(x, y);

        self.primary_down.then_some(InputEvent::Pointer {
            action: PointerAction::PrimaryHeld,
            position: self.cursor,
        })
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Converts Winit physical key codes to engine key codes.
///
/// Unmapped keys (F-keys, numpad, media keys) become `Unidentified`.
impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            //--- Digits -------------------------------------------------------
            Digit0 => KeyCode::Digit0, Digit1 => KeyCode::Digit1,
            Digit2 => KeyCode::Digit2, Digit3 => KeyCode::Digit3,
            Digit4 => KeyCode::Digit4, Digit5 => KeyCode::Digit5,
            Digit6 => KeyCode::Digit6, Digit7 => KeyCode::Digit7,
            Digit8 => KeyCode::Digit8, Digit9 => KeyCode::Digit9,

            //--- Letters ------------------------------------------------------
            KeyA => KeyCode::KeyA, KeyB => KeyCode::KeyB, KeyC => KeyCode::KeyC,
            KeyD => KeyCode::KeyD, KeyE => KeyCode::KeyE, KeyF => KeyCode::KeyF,
            KeyG => KeyCode::KeyG, KeyH => KeyCode::KeyH, KeyI => KeyCode::KeyI,
            KeyJ => KeyCode::KeyJ, KeyK => KeyCode::KeyK, KeyL => KeyCode::KeyL,
            KeyM => KeyCode::KeyM, KeyN => KeyCode::KeyN, KeyO => KeyCode::KeyO,
            KeyP => KeyCode::KeyP, KeyQ => KeyCode::KeyQ, KeyR => KeyCode::KeyR,
            KeyS => KeyCode::KeyS, KeyT => KeyCode::KeyT, KeyU => KeyCode::KeyU,
            KeyV => KeyCode::KeyV, KeyW => KeyCode::KeyW, KeyX => KeyCode::KeyX,
            KeyY => KeyCode::KeyY, KeyZ => KeyCode::KeyZ,

            //--- Arrows -------------------------------------------------------
            ArrowUp => KeyCode::ArrowUp, ArrowDown => KeyCode::ArrowDown,
            ArrowLeft => KeyCode::ArrowLeft, ArrowRight => KeyCode::ArrowRight,

            //--- Special ------------------------------------------------------
            Space => KeyCode::Space,
            Enter | NumpadEnter => KeyCode::Enter,
            Escape => KeyCode::Escape,
            Tab => KeyCode::Tab,
            Backspace => KeyCode::Backspace,
            Delete => KeyCode::Delete,

            //--- Fallback -----------------------------------------------------
            _ => KeyCode::Unidentified,
        }
    }
}

//=========================================================================
// Tests
//=========================================================================
