//=========================================================================
// State Manager
//=========================================================================
//
// Owns the current state and runs transitions between states.
//
// Transitions are tick-driven step functions: progress lives in
// `in_flight` and advances once per `tick()`. Nothing blocks, and no
// transition completes in the call frame that started it.
//
// Direct swap:
//   request → disable input → disengage(out) → prepare(in)
//   tick*   → [continuation resumed] → enable input → engage(in)
//
// Faded swap:
//   request → disable input                       (Disabling)
//   tick    → overlay created at 0                (FadingOut)
//   tick*   → opacity up until opaque → disengage (Opaque)
//   tick    → prepare(in)                         (Preparing)
//   tick*   → [resumed] → opacity down            (FadingIn)
//   tick    → release overlay → enable input → engage(in)
//
// A failed liveness check while fading stalls the transition in place.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::rc::Rc;

use log::{debug, info, trace, warn};

//=== Internal Dependencies ===============================================

use super::{Continuation, PendingPrepare, StateContext, StateRef, TransitionKind, TransitionRequest};
use crate::core::fade::{FadeController, FadeProgress};
use crate::core::input::{InputEvent, InputRouter};
use crate::core::services::Services;
use crate::core::FrameTick;

//=== TransitionPhase =====================================================

/// Observable progress of the in-flight transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
    /// No transition in flight.
    Idle,

    /// Input disabled, overlay not yet created.
    Disabling,

    /// Overlay opacity rising.
    FadingOut,

    /// Screen opaque, outgoing state disengaged.
    Opaque,

    /// Waiting for the incoming state's continuation.
    Preparing,

    /// Overlay opacity falling.
    FadingIn,

    /// Liveness check failed mid-fade. Nothing advances any more.
    Stalled,
}

//=== Internal Transition Model ===========================================

enum FadePhase {
    Disabling,
    FadingOut,
    Opaque,
    Preparing(PendingPrepare),
    FadingIn,
    Stalled,
}

enum Transition {
    Direct {
        incoming: StateRef,
        pending: PendingPrepare,
    },
    Faded {
        outgoing: Option<StateRef>,
        incoming: StateRef,
        phase: FadePhase,
    },
}

//=== StateManager ========================================================

/// Runs the active state and the transitions between states.
///
/// All methods must be called from the thread that owns the states.
///
/// # Example
///
/// ```rust,ignore
/// let mut manager = StateManager::new(services, router, fader);
/// manager.start(state_ref(TitleScreen::new()));
///
/// loop {
///     for event in events.try_iter() {
///         manager.handle_input(&event);
///     }
///     manager.tick(FrameTick::new(delta, running));
/// }
/// ```
pub struct StateManager {
    context: StateContext,
    router: InputRouter,
    fader: FadeController,
    in_flight: Option<Transition>,
    ticks: u64,
}

impl StateManager {
    //--- Construction -----------------------------------------------------

    /// Creates an idle manager with no current state.
    pub fn new(services: Services, router: InputRouter, fader: FadeController) -> Self {
        Self {
            context: StateContext::new(services),
            router,
            fader,
            in_flight: None,
            ticks: 0,
        }
    }

    /// Activates the first state through a direct swap.
    ///
    /// No state is disengaged. The initial state is prepared immediately
    /// and engaged on a later tick. On a running manager this behaves like
    /// [`set_state_directly`](Self::set_state_directly), so it is dropped
    /// while a transition is in flight.
    pub fn start(&mut self, initial: StateRef) {
        if self.in_flight.is_some() {
            warn!(target: "state", "start() during a transition, dropping {}", name(&initial));
            return;
        }

        if self.context.current.is_some() {
            warn!(target: "state", "start() on a running manager, treating {} as a direct swap", name(&initial));
        } else {
            info!(target: "state", "Starting with {}", name(&initial));
        }

        self.set_state_directly(initial);
    }

    //--- External Triggers ------------------------------------------------

    /// Starts a direct swap to `target`.
    ///
    /// Dropped with a warning while another transition is in flight.
    pub fn set_state_directly(&mut self, target: StateRef) {
        self.context.set_state_directly(target);
        self.process_requests();
    }

    /// Starts a faded swap to `target`.
    ///
    /// Dropped with a warning while another transition is in flight.
    pub fn fade_to_state(&mut self, target: StateRef) {
        self.context.fade_to_state(target);
        self.process_requests();
    }

    //--- Frame Driving ----------------------------------------------------

    /// Routes one input event to the subscribed state.
    ///
    /// A transition requested by the hook starts before this returns.
    /// Returns `false` if the event reached no state.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        let delivered = self.router.route(event, &mut self.context);
        self.process_requests();
        delivered
    }

    /// Advances the in-flight transition by one step.
    pub fn tick(&mut self, tick: FrameTick) {
        self.ticks += 1;

        if let Some(transition) = self.in_flight.take() {
            self.in_flight = self.advance(transition, tick);
        }

        self.process_requests();
    }

    //--- Queries ----------------------------------------------------------

    /// The active state, or the outgoing one while a transition is in flight.
    pub fn current_state(&self) -> Option<StateRef> {
        self.context.current_state()
    }

    pub fn phase(&self) -> TransitionPhase {
        match &self.in_flight {
            None => TransitionPhase::Idle,
            Some(Transition::Direct { .. }) => TransitionPhase::Preparing,
            Some(Transition::Faded { phase, .. }) => match phase {
                FadePhase::Disabling => TransitionPhase::Disabling,
                FadePhase::FadingOut => TransitionPhase::FadingOut,
                FadePhase::Opaque => TransitionPhase::Opaque,
                FadePhase::Preparing(_) => TransitionPhase::Preparing,
                FadePhase::FadingIn => TransitionPhase::FadingIn,
                FadePhase::Stalled => TransitionPhase::Stalled,
            },
        }
    }

    pub fn is_transitioning(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Number of ticks processed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn router(&self) -> &InputRouter {
        &self.router
    }

    pub fn fader(&self) -> &FadeController {
        &self.fader
    }

    pub fn context(&self) -> &StateContext {
        &self.context
    }

    //--- Request Handling -------------------------------------------------

    /// Starts the first queued request. Others are dropped.
    fn process_requests(&mut self) {
        let mut requests = self.context.transitions.take().into_iter();
        let Some(first) = requests.next() else {
            return;
        };

        if self.in_flight.is_some() {
            for request in std::iter::once(first).chain(requests) {
                warn!(target: "state", "Transition in flight, dropping {:?}", request);
            }
            return;
        }

        for extra in requests {
            warn!(target: "state", "Only one transition per hook, dropping {:?}", extra);
        }

        self.begin(first);
    }

    fn discard_requests(&mut self, hook: &str) {
        for request in self.context.transitions.take() {
            warn!(target: "state", "Transition requested from {}, discarding {:?}", hook, request);
        }
    }

    //--- Transition Steps -------------------------------------------------

    fn begin(&mut self, request: TransitionRequest) {
        let TransitionRequest { target, kind } = request;
        let outgoing = self.context.current_state();

        info!(
            target: "state",
            "{:?} transition {} → {}",
            kind,
            outgoing.as_ref().map_or_else(|| String::from("<none>"), name),
            name(&target)
        );

        self.disable_input();

        self.in_flight = Some(match kind {
            TransitionKind::Direct => {
                if let Some(outgoing) = outgoing {
                    self.disengage(&outgoing);
                }
                let pending = self.prepare(&target);
                Transition::Direct {
                    incoming: target,
                    pending,
                }
            }
            TransitionKind::Faded => Transition::Faded {
                outgoing,
                incoming: target,
                phase: FadePhase::Disabling,
            },
        });
    }

    fn advance(&mut self, transition: Transition, tick: FrameTick) -> Option<Transition> {
        match transition {
            Transition::Direct {
                incoming,
                mut pending,
            } => {
                if pending.is_resumed() {
                    self.complete(&incoming);
                    return None;
                }

                report_abandoned(&mut pending, &incoming);
                Some(Transition::Direct { incoming, pending })
            }
            Transition::Faded {
                outgoing,
                incoming,
                phase,
            } => {
                let phase = self.advance_fade(outgoing.as_ref(), &incoming, phase, tick)?;
                Some(Transition::Faded {
                    outgoing,
                    incoming,
                    phase,
                })
            }
        }
    }

    /// Returns the next phase, or `None` once the incoming state is engaged.
    fn advance_fade(
        &mut self,
        outgoing: Option<&StateRef>,
        incoming: &StateRef,
        phase: FadePhase,
        tick: FrameTick,
    ) -> Option<FadePhase> {
        match phase {
            FadePhase::Disabling => {
                self.fader.begin();
                Some(FadePhase::FadingOut)
            }
            FadePhase::FadingOut => {
                if !tick.running {
                    return Some(stall("fade-out"));
                }

                if self.fader.fade_out_step(tick.delta) == FadeProgress::InProgress {
                    return Some(FadePhase::FadingOut);
                }

                if let Some(outgoing) = outgoing {
                    self.disengage(outgoing);
                }
                Some(FadePhase::Opaque)
            }
            FadePhase::Opaque => {
                let pending = self.prepare(incoming);
                if pending.is_resumed() {
                    Some(FadePhase::FadingIn)
                } else {
                    Some(FadePhase::Preparing(pending))
                }
            }
            FadePhase::Preparing(mut pending) => {
                if pending.is_resumed() {
                    return Some(FadePhase::FadingIn);
                }

                report_abandoned(&mut pending, incoming);
                Some(FadePhase::Preparing(pending))
            }
            FadePhase::FadingIn => {
                if !tick.running {
                    return Some(stall("fade-in"));
                }

                if self.fader.fade_in_step(tick.delta) == FadeProgress::InProgress {
                    return Some(FadePhase::FadingIn);
                }

                self.fader.release();
                self.complete(incoming);
                None
            }
            FadePhase::Stalled => {
                trace!(target: "state", "Transition to {} stalled", name(incoming));
                Some(FadePhase::Stalled)
            }
        }
    }

    //--- Lifecycle Calls --------------------------------------------------

    fn disengage(&mut self, outgoing: &StateRef) {
        debug!(target: "state", "Disengaging {}", name(outgoing));
        outgoing.borrow_mut().disengage_state(&mut self.context);
        self.discard_requests("disengage_state");
    }

    fn prepare(&mut self, incoming: &StateRef) -> PendingPrepare {
        let (ready, pending) = Continuation::new();

        debug!(target: "state", "Preparing {}", name(incoming));
        incoming.borrow_mut().prepare_state(ready, &mut self.context);
        self.discard_requests("prepare_state");

        pending
    }

    fn complete(&mut self, incoming: &StateRef) {
        self.router.enable_input(incoming);
        self.context.input_enabled = true;
        self.context.current = Some(Rc::clone(incoming));

        info!(target: "state", "Engaging {}", name(incoming));
        incoming.borrow_mut().engage_state(&mut self.context);
    }

    fn disable_input(&mut self) {
        self.router.disable_input();
        self.context.input_enabled = false;
    }
}

//=== Helpers =============================================================

fn stall(stage: &str) -> FadePhase {
    warn!(target: "state", "Liveness check failed during {}, transition stalled", stage);
    FadePhase::Stalled
}

fn report_abandoned(pending: &mut PendingPrepare, incoming: &StateRef) {
    if pending.take_abandoned() {
        warn!(
            target: "state",
            "{} dropped its continuation without resuming it, transition stalled",
            name(incoming)
        );
    }
}

fn name(state: &StateRef) -> String {
    match state.try_borrow() {
        Ok(state) => state.name().to_owned(),
        Err(_) => String::from("<busy state>"),
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
