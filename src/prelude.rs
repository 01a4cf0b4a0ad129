//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use stagehand::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine
pub use crate::engine::{Engine, EngineBuilder, InputSender};

// Runtime
pub use crate::core::FrameTick;

// State system
pub use crate::core::state::{
    state_ref, Continuation, State, StateContext, StateManager, StateRef, TransitionPhase,
};

// Input
pub use crate::core::input::{
    Direction, GamepadButton, InputEvent, InputRouter, KeyAction, KeyCode, PointerAction,
    ScreenPoint, Stick,
};

// Fade
pub use crate::core::fade::{FadeConfig, FadeController, Overlay, OverlayFactory};

// Collaborators
pub use crate::core::services::{AudioOutput, HitTest, Hud, ObjectId, Services};
