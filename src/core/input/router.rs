//=========================================================================
// Input Router
//=========================================================================
//
// Delivers input only to the subscribed state and translates raw events
// into semantic hook calls.
//
// Architecture:
//   InputEvent → route() ─┬─ Button  → Command → State::*_pressed
//                         ├─ Stick   → State::stick_moved
//                         ├─ Pointer → hit-test → mute / quit / clicked_on
//                         └─ Key     → State::key_pressed
//
// Subscription: exactly zero or one state. `disable_input` is idempotent;
// `enable_input` replaces (and reports) a subscriber left behind.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::rc::Rc;

use log::{debug, error, info, trace};

//=== Internal Dependencies ===============================================

use super::event::{ButtonPhase, Direction, GamepadButton, InputEvent, PointerAction, ScreenPoint};
use crate::core::services::Services;
use crate::core::state::{StateContext, StateRef};

//=== Constants ===========================================================

/// Mute button label while audio is audible.
pub const UNMUTED_LABEL: &str = "≠";

/// Mute button label while audio is muted.
pub const MUTED_LABEL: &str = "›";

//=== Command =============================================================

/// Semantic meaning of a button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Direction(Direction),
    Interact,
    Confirm,
    Cancel,
    Start,
    Select,
}

impl Command {
    /// Maps a pressed button to its command.
    ///
    /// Returns `None` for buttons without a default meaning.
    pub fn from_press(button: GamepadButton) -> Option<Self> {
        match button {
            GamepadButton::Up => Some(Self::Direction(Direction::Up)),
            GamepadButton::Down => Some(Self::Direction(Direction::Down)),
            GamepadButton::Left => Some(Self::Direction(Direction::Left)),
            GamepadButton::Right => Some(Self::Direction(Direction::Right)),
            GamepadButton::North => Some(Self::Interact),
            GamepadButton::East => Some(Self::Confirm),
            GamepadButton::South => Some(Self::Cancel),
            GamepadButton::Start => Some(Self::Start),
            GamepadButton::Select => Some(Self::Select),
            GamepadButton::West | GamepadButton::LeftShoulder | GamepadButton::RightShoulder => {
                None
            }
        }
    }
}

//=== QuitDialogFactory ===================================================

/// Builds the confirmation dialogue opened by the HUD quit control.
///
/// Receives the state that was active when quit was clicked.
pub type QuitDialogFactory = Box<dyn Fn(StateRef) -> StateRef>;

//=== InputRouter =========================================================

/// Gates input delivery to the single subscribed state.
pub struct InputRouter {
    subscriber: Option<StateRef>,
    quit_dialog: QuitDialogFactory,
}

impl InputRouter {
    //--- Construction -----------------------------------------------------

    /// Creates a router with no subscriber.
    ///
    /// `quit_dialog` is invoked when the HUD quit control is clicked.
    pub fn new<F>(quit_dialog: F) -> Self
    where
        F: Fn(StateRef) -> StateRef + 'static,
    {
        Self {
            subscriber: None,
            quit_dialog: Box::new(quit_dialog),
        }
    }

    //--- Subscription -----------------------------------------------------

    /// Removes the subscriber from every input channel. Idempotent.
    pub fn disable_input(&mut self) {
        match self.subscriber.take() {
            Some(state) => debug!(target: "input", "Input disabled for {}", label(&state)),
            None => trace!(target: "input", "Input already disabled"),
        }
    }

    /// Subscribes `state` to every input channel.
    ///
    /// The previous subscriber must have been removed with
    /// [`disable_input`](Self::disable_input). If it was not, the stale
    /// subscription is reported and replaced.
    pub fn enable_input(&mut self, state: &StateRef) {
        if let Some(stale) = self.subscriber.take() {
            error!(
                target: "input",
                "Enabling input for {} while {} is still subscribed; replacing",
                label(state),
                label(&stale)
            );
        }

        debug!(target: "input", "Input enabled for {}", label(state));
        self.subscriber = Some(Rc::clone(state));
    }

    /// Whether any state is subscribed.
    pub fn is_enabled(&self) -> bool {
        self.subscriber.is_some()
    }

    /// Whether `state` is the subscriber.
    pub fn is_subscribed(&self, state: &StateRef) -> bool {
        self.subscriber
            .as_ref()
            .is_some_and(|current| Rc::ptr_eq(current, state))
    }

    //--- Dispatch ---------------------------------------------------------

    /// Delivers `event` to the subscriber.
    ///
    /// Returns `false` (and drops the event) while input is disabled.
    pub fn route(&mut self, event: &InputEvent, ctx: &mut StateContext) -> bool {
        let Some(state) = self.subscriber.as_ref().map(Rc::clone) else {
            trace!(target: "input", "Input disabled, dropping {:?}", event);
            return false;
        };

        trace!(target: "input", "{:?} → {}", event, label(&state));

        match *event {
            InputEvent::Button { button, phase } => Self::dispatch_button(&state, button, phase, ctx),
            InputEvent::Stick { stick, x, y } => {
                state.borrow_mut().stick_moved(stick, (x, y), ctx);
            }
            InputEvent::AltStick { stick, value } => {
                state.borrow_mut().alt_stick_moved(stick, value, ctx);
            }
            InputEvent::Pointer { action, position } => {
                self.dispatch_pointer(&state, action, position, ctx);
            }
            InputEvent::Key { key, action } => {
                state.borrow_mut().key_pressed(key, action, ctx);
            }
        }

        true
    }

    //--- Internal Helpers -------------------------------------------------

    fn dispatch_button(
        state: &StateRef,
        button: GamepadButton,
        phase: ButtonPhase,
        ctx: &mut StateContext,
    ) {
        if phase == ButtonPhase::Released {
            state.borrow_mut().button_released(button, ctx);
            return;
        }

        let Some(command) = Command::from_press(button) else {
            debug!(target: "input", "Unmapped button press ignored: {:?}", button);
            return;
        };

        let mut state = state.borrow_mut();
        match command {
            Command::Direction(direction) => state.direction_pressed(direction, ctx),
            Command::Interact => state.interact_pressed(ctx),
            Command::Confirm => state.confirm_pressed(ctx),
            Command::Cancel => state.cancel_pressed(ctx),
            Command::Start => state.start_pressed(ctx),
            Command::Select => state.select_pressed(ctx),
        }
    }

    fn dispatch_pointer(
        &self,
        state: &StateRef,
        action: PointerAction,
        position: ScreenPoint,
        ctx: &mut StateContext,
    ) {
        match action {
            PointerAction::PrimaryUp => {
                let Some(hit) = ctx.services.hit_test.hit_test(position) else {
                    trace!(target: "input", "Click at {:?} hit nothing", position);
                    return;
                };

                if hit == ctx.services.hud.mute_control() {
                    toggle_mute(&mut ctx.services);
                    return;
                }

                if hit == ctx.services.hud.quit_control() {
                    let dialog = (self.quit_dialog)(Rc::clone(state));
                    info!(target: "input", "Quit requested from {}", label(state));
                    ctx.set_state_directly(dialog);
                    return;
                }

                state.borrow_mut().clicked_on(hit, ctx);
            }
            PointerAction::PrimaryHeld => {
                if let Some(hit) = ctx.services.hit_test.hit_test(position) {
                    state.borrow_mut().holding(hit, ctx);
                }
            }
            PointerAction::SecondaryUp => state.borrow_mut().unclicked(ctx),
            PointerAction::PrimaryDown | PointerAction::SecondaryDown => {
                trace!(target: "input", "{:?} at {:?}", action, position);
            }
        }
    }
}

//=== Mute Affordance =====================================================

/// Flips the mute button label and sets the volume to match it.
///
/// Returns `true` if audio is now muted.
pub fn toggle_mute(services: &mut Services) -> bool {
    let muted = services.hud.mute_label() != MUTED_LABEL;
    let (label, volume) = if muted {
        (MUTED_LABEL, 0.0)
    } else {
        (UNMUTED_LABEL, 1.0)
    };

    services.hud.set_mute_label(label);
    services.audio.set_volume(volume);
    info!(target: "input", "Audio {}", if muted { "muted" } else { "unmuted" });

    muted
}

fn label(state: &StateRef) -> String {
    match state.try_borrow() {
        Ok(state) => state.name().to_owned(),
        Err(_) => String::from("<busy state>"),
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
