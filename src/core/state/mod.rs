//=========================================================================
// State System
//=========================================================================
//
// Manages the active screen/mode and the transitions between them.
//
// Architecture:
//   StateManager
//     ├─ context: StateContext (services, transition queue, current)
//     ├─ router: InputRouter (single input subscription)
//     ├─ fader: FadeController (overlay for faded swaps)
//     └─ in_flight: Option<Transition>
//
// Flow:
//   handle_input() → InputRouter::route() → State hook → queue request
//   tick()         → advance in-flight transition → engage_state()
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::rc::Rc;

//=== Internal Dependencies ===============================================

use crate::core::input::{Direction, GamepadButton, KeyAction, KeyCode, Stick};
use crate::core::services::ObjectId;

//=== Module Declarations =================================================

mod context;
mod continuation;
mod state_manager;
mod transition_queue;

//=== Public API ==========================================================

pub use context::StateContext;
pub use continuation::Continuation;
pub use state_manager::{StateManager, TransitionPhase};
pub use transition_queue::{TransitionKind, TransitionQueue, TransitionRequest};

pub(crate) use continuation::PendingPrepare;

/// Shared handle to a state.
///
/// States are shared rather than owned because a state may keep a handle
/// to another one (a dialogue returning to the screen that opened it).
///
/// The manager and the router hold a mutable borrow of a state while one of
/// its hooks runs. A hook must not `borrow()` its own handle; doing so
/// panics with a `RefCell` double borrow.
pub type StateRef = Rc<RefCell<dyn State>>;

/// Wraps a concrete state into a [`StateRef`].
pub fn state_ref<T: State + 'static>(state: T) -> StateRef {
    Rc::new(RefCell::new(state))
}

//=== State Trait =========================================================

/// One screen or mode of the application.
///
/// Every method has a no-op default. Lifecycle hooks are called by the
/// [`StateManager`] in a fixed order:
///
/// ```text
/// outgoing: [input disabled] → disengage_state
/// incoming: prepare_state(continuation) → [input enabled] → engage_state
/// ```
///
/// Input hooks are called by the `InputRouter` only while this state holds
/// the input subscription.
///
/// # Minimal Implementation
///
/// ```rust
/// # use stagehand::prelude::*;
/// struct TitleScreen;
///
/// impl State for TitleScreen {
///     fn confirm_pressed(&mut self, ctx: &mut StateContext) {
///         // ctx.fade_to_state(state_ref(GameplayScreen::new()));
///     }
/// }
/// ```
pub trait State {
    /// Label used in log output.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    //--- Lifecycle --------------------------------------------------------

    /// Called on the outgoing state after its input has been disabled.
    ///
    /// Transition requests made here are discarded.
    fn disengage_state(&mut self, _ctx: &mut StateContext) {}

    /// Called on the incoming state before it becomes visible.
    ///
    /// Must resume `ready` exactly once, either before returning or later
    /// (it is `Send`, so background setup may resume it). Until it is
    /// resumed the transition waits with input disabled. Transition
    /// requests made here are discarded.
    fn prepare_state(&mut self, ready: Continuation, _ctx: &mut StateContext) {
        ready.resume();
    }

    /// Called once this state holds the input subscription.
    ///
    /// Requesting a further transition here is allowed.
    fn engage_state(&mut self, _ctx: &mut StateContext) {}

    //--- Semantic Input ---------------------------------------------------

    fn direction_pressed(&mut self, _direction: Direction, _ctx: &mut StateContext) {}

    fn confirm_pressed(&mut self, _ctx: &mut StateContext) {}

    fn interact_pressed(&mut self, _ctx: &mut StateContext) {}

    fn cancel_pressed(&mut self, _ctx: &mut StateContext) {}

    fn start_pressed(&mut self, _ctx: &mut StateContext) {}

    fn select_pressed(&mut self, _ctx: &mut StateContext) {}

    /// Releases carry no default meaning.
    fn button_released(&mut self, _button: GamepadButton, _ctx: &mut StateContext) {}

    //--- Analog Input -----------------------------------------------------

    fn stick_moved(&mut self, _stick: Stick, _vector: (f32, f32), _ctx: &mut StateContext) {}

    fn alt_stick_moved(&mut self, _stick: Stick, _value: f32, _ctx: &mut StateContext) {}

    //--- Pointer & Keys ---------------------------------------------------

    /// Primary click released over `object` (HUD controls excluded).
    fn clicked_on(&mut self, _object: ObjectId, _ctx: &mut StateContext) {}

    /// Primary button held while the cursor is over `object`.
    fn holding(&mut self, _object: ObjectId, _ctx: &mut StateContext) {}

    /// Secondary button released.
    fn unclicked(&mut self, _ctx: &mut StateContext) {}

    fn key_pressed(&mut self, _key: KeyCode, _action: KeyAction, _ctx: &mut StateContext) {}
}
