//=========================================================================
// State Context
//=========================================================================
//
// Shared data container handed to every state hook.
//
// Contains:
// - services: injected collaborators (audio, HUD, hit-test)
// - transitions: request queue drained by the manager after each hook
// - current: handle to the active (or still outgoing) state
// - input_enabled: mirror of the router subscription
//
//=========================================================================

//=== External Dependencies ===============================================

use std::rc::Rc;

//=== Internal Dependencies ===============================================

use super::{StateRef, TransitionQueue, TransitionRequest};
use crate::core::services::Services;

//=== StateContext ========================================================

/// Context passed to state hooks.
///
/// Hooks request transitions through it instead of calling the manager,
/// so the manager never re-enters itself from inside a hook.
pub struct StateContext {
    /// Injected collaborators.
    pub services: Services,

    pub(crate) transitions: TransitionQueue,
    pub(crate) current: Option<StateRef>,
    pub(crate) input_enabled: bool,
}

impl StateContext {
    /// Creates a context with no current state and input disabled.
    pub fn new(services: Services) -> Self {
        Self {
            services,
            transitions: TransitionQueue::new(),
            current: None,
            input_enabled: false,
        }
    }

    //--- Transition Requests ----------------------------------------------

    /// Requests a direct swap to `target`.
    pub fn set_state_directly(&mut self, target: StateRef) {
        self.transitions.push(TransitionRequest::direct(target));
    }

    /// Requests a faded swap to `target`.
    pub fn fade_to_state(&mut self, target: StateRef) {
        self.transitions.push(TransitionRequest::faded(target));
    }

    /// Requests pending for the manager.
    pub fn pending_transitions(&self) -> &TransitionQueue {
        &self.transitions
    }

    //--- Queries ----------------------------------------------------------

    /// Handle to the current state.
    ///
    /// During a transition this is still the outgoing state until the
    /// incoming one is engaged. Useful for building a state that returns
    /// to its caller.
    ///
    /// # Panics
    ///
    /// Inside one of its own hooks the current state is already mutably
    /// borrowed, so calling `borrow()` or `borrow_mut()` on the returned
    /// handle panics. Store or compare it (`Rc::ptr_eq`) instead, or use
    /// `try_borrow()`.
    pub fn current_state(&self) -> Option<StateRef> {
        self.current.as_ref().map(Rc::clone)
    }

    /// Whether any state currently receives input.
    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }
}
