//=========================================================================
// Services
//=========================================================================
//
// Collaborator interfaces consumed by the state core.
//
// The concrete audio engine, HUD widgets, and picking/raycast live outside
// this crate. They are injected once, at construction, and reached by
// states through `StateContext::services`.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::ScreenPoint;

//=== ObjectId ============================================================

/// Opaque identity of a hit-testable object (HUD control, board piece).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(pub u64);

//=== Collaborator Traits =================================================

/// Global audio output level.
///
/// The mute affordance only ever writes 0.0 or 1.0.
pub trait AudioOutput {
    fn volume(&self) -> f32;
    fn set_volume(&mut self, volume: f32);
}

/// On-screen HUD controls shared by every state.
pub trait Hud {
    /// Object behind the mute button.
    fn mute_control(&self) -> ObjectId;

    /// Object behind the quit button.
    fn quit_control(&self) -> ObjectId;

    /// Current label shown on the mute button.
    fn mute_label(&self) -> &str;

    fn set_mute_label(&mut self, label: &str);
}

/// Screen-space picking.
pub trait HitTest {
    /// Returns the topmost interactive object under `point`, if any.
    fn hit_test(&self, point: ScreenPoint) -> Option<ObjectId>;
}

//=== Services ============================================================

/// Injected collaborators available to the router and to every state hook.
pub struct Services {
    pub audio: Box<dyn AudioOutput>,
    pub hud: Box<dyn Hud>,
    pub hit_test: Box<dyn HitTest>,
}

impl Services {
    pub fn new<A, H, P>(audio: A, hud: H, hit_test: P) -> Self
    where
        A: AudioOutput + 'static,
        H: Hud + 'static,
        P: HitTest + 'static,
    {
        Self {
            audio: Box::new(audio),
            hud: Box::new(hud),
            hit_test: Box::new(hit_test),
        }
    }
}
