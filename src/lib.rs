//=========================================================================
// Stagehand Library Root
//
// State-transition core for interactive applications: one active state
// at a time, input routed only to it, and direct or faded swaps between
// states with ordered lifecycle hooks.
//
// Responsibilities:
// - Expose the state core (`core`) for embedding in any frame loop
// - Expose the `Engine` facade that runs it behind a winit window
// - Keep the platform layer private
//
// Typical usage:
// ```no_run
// use stagehand::EngineBuilder;
//
// fn main() {
//     EngineBuilder::new().build().run(build_state_manager);
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the state manager, input router, fade controller, and the
// collaborator traits. It has no windowing dependency and can be driven
// by any loop that calls `StateManager::tick`.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains the winit integration (window, event loop, key
// bindings) and is not part of the public API surface.
//
// `engine` wires the platform to the logic thread.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder, InputSender};
