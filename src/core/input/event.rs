//=========================================================================
// Input Event Types
//
// Defines the engine-level representation of player input.
//
// This module abstracts away device specifics (keyboard, mouse, gamepad
// pollers) into a small set of channels the router understands.
//
// Channels:
// - Button:   discrete gamepad-style buttons (press / release)
// - Stick:    directional stick vector
// - AltStick: single-axis value from the alternate stick
// - Pointer:  mouse/touch gesture at a screen position
// - Key:      raw keyboard key not bound to a button
//
// Event Flow:
// ```text
// Platform Layer (Winit) / external pollers
//         ↓
//    InputEvent (this module)
//         ↓
//    InputRouter (gates + translates)
//         ↓
//    State hooks (direction_pressed, clicked_on, ...)
// ```
//
//=========================================================================

//=== GamepadButton =======================================================

/// Semantic button identity.
///
/// Keyboard keys are bound onto these by the platform layer; gamepad
/// pollers send them directly. Only the first nine variants carry a
/// default meaning in the router, the rest are reserved for states that
/// override `button_released` or for future bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamepadButton {
    /// D-pad / stick up.
    Up,

    /// D-pad / stick down.
    Down,

    /// D-pad / stick left.
    Left,

    /// D-pad / stick right.
    Right,

    /// Top face button (interact).
    North,

    /// Right face button (confirm).
    East,

    /// Bottom face button (cancel).
    South,

    /// Left face button. Unmapped.
    West,

    /// Start menu button.
    Start,

    /// Select menu button.
    Select,

    /// Left shoulder. Unmapped.
    LeftShoulder,

    /// Right shoulder. Unmapped.
    RightShoulder,
}

/// Whether a button went down or up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonPhase {
    Pressed,
    Released,
}

//=== Direction ===========================================================

/// Cardinal direction delivered to `State::direction_pressed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

//=== Stick ===============================================================

/// Which analog stick produced a stick event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stick {
    Left,
    Right,
}

//=== Pointer =============================================================

/// Pointer gesture reported by the platform.
///
/// Only `PrimaryUp` resolves a click (hit-test, HUD affordances,
/// `clicked_on`). `PrimaryHeld` is emitted while the primary button is
/// held and the cursor moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerAction {
    PrimaryDown,
    PrimaryHeld,
    PrimaryUp,
    SecondaryDown,
    SecondaryUp,
}

/// Screen-space position (pixels, top-left origin).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced.
/// Keys bound in `KeyBindings` arrive as `InputEvent::Button`; every
/// other key arrives as `InputEvent::Key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------

    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Special Keys -----------------------------------------------------

    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,

    /// Fallback for keys the platform layer does not map.
    Unidentified,
}

/// Key transition delivered to `State::key_pressed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    Pressed,
    Released,
}

//=== InputEvent ==========================================================

/// One discrete input delivered to the router.
///
/// Events are small `Copy` values so they can be batched per frame and
/// moved across the platform → logic channel without allocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Semantic button pressed or released.
    Button {
        button: GamepadButton,
        phase: ButtonPhase,
    },

    /// Directional stick vector, components in [-1, 1].
    Stick { stick: Stick, x: f32, y: f32 },

    /// Alternate stick single-axis value.
    AltStick { stick: Stick, value: f32 },

    /// Pointer gesture at a screen position.
    Pointer {
        action: PointerAction,
        position: ScreenPoint,
    },

    /// Keyboard key not bound to a button.
    Key { key: KeyCode, action: KeyAction },
}

impl InputEvent {
    /// Shorthand for a button press.
    pub const fn press(button: GamepadButton) -> Self {
        Self::Button {
            button,
            phase: ButtonPhase::Pressed,
        }
    }

    /// Shorthand for a button release.
    pub const fn release(button: GamepadButton) -> Self {
        Self::Button {
            button,
            phase: ButtonPhase::Released,
        }
    }

    /// Shorthand for a completed primary click (`PrimaryUp`) at `(x, y)`.
    pub const fn click(x: f32, y: f32) -> Self {
        Self::Pointer {
            action: PointerAction::PrimaryUp,
            position: ScreenPoint::new(x, y),
        }
    }

    /// Returns `true` for events whose latest value supersedes earlier ones
    /// within a frame (stick motion, held-pointer drags).
    ///
    /// The platform buffer coalesces consecutive continuous events.
    pub fn is_continuous(&self) -> bool {
        matches!(
            self,
            Self::Stick { .. }
                | Self::AltStick { .. }
                | Self::Pointer {
                    action: PointerAction::PrimaryHeld,
                    ..
                }
        )
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release_shorthands() {
        assert_eq!(
            InputEvent::press(GamepadButton::East),
            InputEvent::Button {
                button: GamepadButton::East,
                phase: ButtonPhase::Pressed
            }
        );
        assert_eq!(
            InputEvent::release(GamepadButton::East),
            InputEvent::Button {
                button: GamepadButton::East,
                phase: ButtonPhase::Released
            }
        );
    }

    #[test]
    fn click_is_primary_up() {
        match InputEvent::click(3.0, 4.0) {
            InputEvent::Pointer { action, position } => {
                assert_eq!(action, PointerAction::PrimaryUp);
                assert_eq!(position, ScreenPoint::new(3.0, 4.0));
            }
            other => panic!("Expected pointer event, got {:?}", other),
        }
    }

    #[test]
    fn continuous_events() {
        assert!(InputEvent::Stick { stick: Stick::Left, x: 0.5, y: 0.0 }.is_continuous());
        assert!(InputEvent::AltStick { stick: Stick::Right, value: 1.0 }.is_continuous());
        assert!(InputEvent::Pointer {
            action: PointerAction::PrimaryHeld,
            position: ScreenPoint::default()
        }
        .is_continuous());
    }

    #[test]
    fn discrete_events() {
        assert!(!InputEvent::press(GamepadButton::Up).is_continuous());
        assert!(!InputEvent::click(0.0, 0.0).is_continuous());
        assert!(!InputEvent::Key { key: KeyCode::Space, action: KeyAction::Pressed }.is_continuous());
    }

    #[test]
    fn event_is_copy() {
        let event = InputEvent::press(GamepadButton::Start);
        let copied = event;
        assert_eq!(event, copied);
    }
}
