//=========================================================================
// Platform Bridge
//=========================================================================
//
// Contract between the platform thread (winit) and the logic thread.
//
// Components:
// - `interface`: message and error types crossing the thread boundary
// - `event_collector`: logic-side frame collection from the channel
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Internal API ========================================================

pub(crate) use event_collector::{EventCollector, TickControl};
pub(crate) use interface::PlatformEvent;

//=== Public API ==========================================================

pub use interface::PlatformError;
