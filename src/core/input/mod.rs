//=========================================================================
// Input System
//=========================================================================
//
// Engine-level input events and the router that delivers them to the
// active state.
//
// Architecture:
//   Platform / pollers → InputEvent → InputRouter → State hooks
//
// The router holds at most one subscriber. The state manager disables
// it for the whole duration of a transition, which is the only thing
// keeping input from racing lifecycle hooks.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod event;
pub mod router;

//=== Public API ==========================================================

pub use event::{
    ButtonPhase, Direction, GamepadButton, InputEvent, KeyAction, KeyCode, PointerAction,
    ScreenPoint, Stick,
};
pub use router::{toggle_mute, Command, InputRouter, QuitDialogFactory, MUTED_LABEL, UNMUTED_LABEL};
