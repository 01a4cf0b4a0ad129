//=========================================================================
// Test Support
//=========================================================================
//
// Fakes shared by the unit tests: a journaling state, in-memory
// collaborators, and a recording overlay.
//
//=========================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::core::fade::{FadeConfig, FadeController, Overlay, OverlayFactory};
use crate::core::input::{
    Direction, GamepadButton, InputRouter, KeyAction, KeyCode, ScreenPoint, Stick, UNMUTED_LABEL,
};
use crate::core::services::{AudioOutput, HitTest, Hud, ObjectId, Services};
use crate::core::state::{
    state_ref, Continuation, State, StateContext, StateManager, StateRef, TransitionRequest,
};

pub(crate) const MUTE: ObjectId = ObjectId(1000);
pub(crate) const QUIT: ObjectId = ObjectId(1001);

//=== Journal =============================================================

/// Ordered log of hook calls shared between states.
#[derive(Clone, Default)]
pub(crate) struct Journal(Rc<RefCell<Vec<String>>>);

impl Journal {
    pub(crate) fn push(&self, entry: impl Into<String>) {
        self.0.borrow_mut().push(entry.into());
    }

    pub(crate) fn entries(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    pub(crate) fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

//=== RecordingState ======================================================

pub(crate) type ContinuationSlot = Rc<RefCell<Option<Continuation>>>;

enum PrepareMode {
    Resume,
    Hold(ContinuationSlot),
    Drop,
}

/// State that journals every hook and can be scripted to request
/// transitions or withhold its continuation.
pub(crate) struct RecordingState {
    name: String,
    journal: Journal,
    prepare: PrepareMode,
    on_prepare: Option<TransitionRequest>,
    on_disengage: Option<TransitionRequest>,
    on_engage: Option<TransitionRequest>,
    on_confirm: Vec<TransitionRequest>,
}

impl RecordingState {
    pub(crate) fn new(name: &str, journal: &Journal) -> Self {
        Self {
            name: name.to_owned(),
            journal: journal.clone(),
            prepare: PrepareMode::Resume,
            on_prepare: None,
            on_disengage: None,
            on_engage: None,
            on_confirm: Vec::new(),
        }
    }

    /// Parks the continuation in `slot` instead of resuming it.
    pub(crate) fn holding_continuation(mut self, slot: &ContinuationSlot) -> Self {
        self.prepare = PrepareMode::Hold(Rc::clone(slot));
        self
    }

    /// Drops the continuation without resuming it.
    pub(crate) fn dropping_continuation(mut self) -> Self {
        self.prepare = PrepareMode::Drop;
        self
    }

    pub(crate) fn requesting_on_prepare(mut self, request: TransitionRequest) -> Self {
        self.on_prepare = Some(request);
        self
    }

    pub(crate) fn requesting_on_disengage(mut self, request: TransitionRequest) -> Self {
        self.on_disengage = Some(request);
        self
    }

    pub(crate) fn requesting_on_engage(mut self, request: TransitionRequest) -> Self {
        self.on_engage = Some(request);
        self
    }

    /// Queues every request in `requests` the first time confirm is pressed.
    pub(crate) fn requesting_on_confirm(mut self, requests: Vec<TransitionRequest>) -> Self {
        self.on_confirm = requests;
        self
    }

    fn lifecycle(&self, hook: &str, ctx: &StateContext) {
        let input = if ctx.input_enabled() { "on" } else { "off" };
        self.journal.push(format!("{}.{} input={}", self.name, hook, input));
    }

    fn input(&self, hook: impl std::fmt::Display) {
        self.journal.push(format!("{}.{}", self.name, hook));
    }
}

fn queue(request: Option<TransitionRequest>, ctx: &mut StateContext) {
    if let Some(request) = request {
        ctx.transitions.push(request);
    }
}

impl State for RecordingState {
    fn name(&self) -> &str {
        &self.name
    }

    fn disengage_state(&mut self, ctx: &mut StateContext) {
        self.lifecycle("disengage", ctx);
        queue(self.on_disengage.take(), ctx);
    }

    fn prepare_state(&mut self, ready: Continuation, ctx: &mut StateContext) {
        self.lifecycle("prepare", ctx);
        queue(self.on_prepare.take(), ctx);

        match &self.prepare {
            PrepareMode::Resume => ready.resume(),
            PrepareMode::Hold(slot) => *slot.borrow_mut() = Some(ready),
            PrepareMode::Drop => drop(ready),
        }
    }

    fn engage_state(&mut self, ctx: &mut StateContext) {
        self.lifecycle("engage", ctx);
        queue(self.on_engage.take(), ctx);
    }

    fn direction_pressed(&mut self, direction: Direction, _ctx: &mut StateContext) {
        self.input(format!("direction({:?})", direction));
    }

    fn confirm_pressed(&mut self, ctx: &mut StateContext) {
        self.input("confirm");
        for request in self.on_confirm.drain(..) {
            ctx.transitions.push(request);
        }
    }

    fn interact_pressed(&mut self, _ctx: &mut StateContext) {
        self.input("interact");
    }

    fn cancel_pressed(&mut self, _ctx: &mut StateContext) {
        self.input("cancel");
    }

    fn start_pressed(&mut self, _ctx: &mut StateContext) {
        self.input("start");
    }

    fn select_pressed(&mut self, _ctx: &mut StateContext) {
        self.input("select");
    }

    fn button_released(&mut self, button: GamepadButton, _ctx: &mut StateContext) {
        self.input(format!("released({:?})", button));
    }

    fn stick_moved(&mut self, stick: Stick, _vector: (f32, f32), _ctx: &mut StateContext) {
        self.input(format!("stick({:?})", stick));
    }

    fn alt_stick_moved(&mut self, stick: Stick, _value: f32, _ctx: &mut StateContext) {
        self.input(format!("alt_stick({:?})", stick));
    }

    fn clicked_on(&mut self, object: ObjectId, _ctx: &mut StateContext) {
        self.input(format!("clicked_on({})", object.0));
    }

    fn holding(&mut self, object: ObjectId, _ctx: &mut StateContext) {
        self.input(format!("holding({})", object.0));
    }

    fn unclicked(&mut self, _ctx: &mut StateContext) {
        self.input("unclicked");
    }

    fn key_pressed(&mut self, key: KeyCode, action: KeyAction, _ctx: &mut StateContext) {
        self.input(format!("key({:?}, {:?})", key, action));
    }
}

//=== QuitDialog ==========================================================

/// Confirmation dialogue that returns to its origin on cancel.
pub(crate) struct QuitDialog {
    origin: StateRef,
    journal: Journal,
}

impl State for QuitDialog {
    fn name(&self) -> &str {
        "QuitDialog"
    }

    fn engage_state(&mut self, ctx: &mut StateContext) {
        let input = if ctx.input_enabled() { "on" } else { "off" };
        self.journal.push(format!("QuitDialog.engage input={}", input));
    }

    fn cancel_pressed(&mut self, ctx: &mut StateContext) {
        ctx.set_state_directly(Rc::clone(&self.origin));
    }
}

pub(crate) fn quit_dialog_factory(journal: &Journal) -> impl Fn(StateRef) -> StateRef + 'static {
    let journal = journal.clone();
    move |origin| {
        state_ref(QuitDialog {
            origin,
            journal: journal.clone(),
        })
    }
}

//=== Collaborators =======================================================

/// Test-side view of the fake collaborators.
#[derive(Clone)]
pub(crate) struct Handles {
    volume: Rc<Cell<f32>>,
    label: Rc<RefCell<String>>,
    objects: Rc<RefCell<Vec<(ObjectId, ScreenPoint)>>>,
}

impl Handles {
    pub(crate) fn volume(&self) -> f32 {
        self.volume.get()
    }

    pub(crate) fn label(&self) -> String {
        self.label.borrow().clone()
    }

    /// Makes `id` the hit at exactly `(x, y)`.
    pub(crate) fn place(&self, id: ObjectId, x: f32, y: f32) {
        self.objects.borrow_mut().push((id, ScreenPoint::new(x, y)));
    }
}

struct FakeAudio(Rc<Cell<f32>>);

impl AudioOutput for FakeAudio {
    fn volume(&self) -> f32 {
        self.0.get()
    }

    fn set_volume(&mut self, volume: f32) {
        self.0.set(volume);
    }
}

struct FakeHud {
    label: Rc<RefCell<String>>,
    cached: String,
}

impl Hud for FakeHud {
    fn mute_control(&self) -> ObjectId {
        MUTE
    }

    fn quit_control(&self) -> ObjectId {
        QUIT
    }

    fn mute_label(&self) -> &str {
        &self.cached
    }

    fn set_mute_label(&mut self, label: &str) {
        self.cached = label.to_owned();
        *self.label.borrow_mut() = label.to_owned();
    }
}

struct FakeHitTest(Rc<RefCell<Vec<(ObjectId, ScreenPoint)>>>);

impl HitTest for FakeHitTest {
    fn hit_test(&self, point: ScreenPoint) -> Option<ObjectId> {
        self.0
            .borrow()
            .iter()
            .rev()
            .find(|(_, at)| *at == point)
            .map(|(id, _)| *id)
    }
}

/// Builds a context over fresh fakes: volume 1, unmuted label, no objects.
pub(crate) fn test_context() -> (Handles, StateContext) {
    let handles = Handles {
        volume: Rc::new(Cell::new(1.0)),
        label: Rc::new(RefCell::new(UNMUTED_LABEL.to_owned())),
        objects: Rc::new(RefCell::new(Vec::new())),
    };

    let services = Services::new(
        FakeAudio(Rc::clone(&handles.volume)),
        FakeHud {
            label: Rc::clone(&handles.label),
            cached: UNMUTED_LABEL.to_owned(),
        },
        FakeHitTest(Rc::clone(&handles.objects)),
    );

    (handles, StateContext::new(services))
}

//=== Overlay =============================================================

/// Shared record of everything the fade overlays went through.
#[derive(Clone, Default)]
pub(crate) struct OverlayLog {
    pub(crate) alphas: Rc<RefCell<Vec<f32>>>,
    pub(crate) created: Rc<Cell<usize>>,
    pub(crate) destroyed: Rc<Cell<usize>>,
}

impl OverlayLog {
    pub(crate) fn live(&self) -> usize {
        self.created.get() - self.destroyed.get()
    }

    pub(crate) fn last_alpha(&self) -> Option<f32> {
        self.alphas.borrow().last().copied()
    }
}

struct RecordingOverlay(OverlayLog);

impl Overlay for RecordingOverlay {
    fn set_alpha(&mut self, alpha: f32) {
        self.0.alphas.borrow_mut().push(alpha);
    }

    fn destroy(&mut self) {
        self.0.destroyed.set(self.0.destroyed.get() + 1);
    }
}

pub(crate) struct RecordingOverlayFactory(pub(crate) OverlayLog);

impl OverlayFactory for RecordingOverlayFactory {
    fn create(&mut self, _color: [f32; 3]) -> Box<dyn Overlay> {
        self.0.created.set(self.0.created.get() + 1);
        Box::new(RecordingOverlay(self.0.clone()))
    }
}

//=== Manager =============================================================

/// Builds an idle manager over fresh fakes with default fade timing.
pub(crate) fn test_manager(journal: &Journal) -> (Handles, OverlayLog, StateManager) {
    let overlays = OverlayLog::default();
    let (handles, ctx) = test_context();

    let router = InputRouter::new(quit_dialog_factory(journal));
    let fader = FadeController::new(RecordingOverlayFactory(overlays.clone()), FadeConfig::default());

    (handles, overlays, StateManager::new(ctx.services, router, fader))
}
