//=========================================================================
// Stagehand Engine
//
// Main entry point: wires the platform window to the logic thread that
// runs the state manager.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run(setup)──>  [Runtime]
//         │                          │
//         ├─ with_tps()              ├─ input_sender()
//         ├─ with_channel_capacity() └─ spawns logic thread
//         ├─ with_title()               runs platform
//         └─ bind_key()                 blocks until exit
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{error, info, warn};

//=== Internal Dependencies ===============================================

use crate::core::input::{GamepadButton, InputEvent, KeyCode};
use crate::core::platform_bridge::PlatformEvent;
use crate::core::state::StateManager;
use crate::core::CoreLoop;
use crate::platform::{KeyBindings, Platform};

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **TPS**: 60.0 (logic ticks per second)
/// - **Channel capacity**: 128 messages
/// - **Title**: "Stagehand"
/// - **Key bindings**: arrows/WASD, F, Enter, Escape/Backspace, Tab, Q
///
/// # Examples
///
/// ```no_run
/// use stagehand::EngineBuilder;
/// use stagehand::core::input::{GamepadButton, KeyCode};
/// # fn build_manager() -> stagehand::core::state::StateManager { unimplemented!() }
///
/// EngineBuilder::new()
///     .with_tps(120.0)
///     .with_title("Board Game")
///     .bind_key(KeyCode::Space, GamepadButton::East)
///     .build()
///     .run(build_manager);
/// ```
pub struct EngineBuilder {
    tps: f64,
    channel_capacity: usize,
    title: String,
    bindings: KeyBindings,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
            title: String::from("Stagehand"),
            bindings: KeyBindings::default(),
        }
    }

    /// Sets the target ticks per second for the logic thread.
    ///
    /// Fade speed is time-based, so this changes smoothness, not duration.
    ///
    /// Default: 60.0
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Sets the channel capacity for platform → logic communication.
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Binds a keyboard key to a gamepad button, replacing its old binding.
    pub fn bind_key(mut self, key: KeyCode, button: GamepadButton) -> Self {
        self.bindings.bind(key, button);
        self
    }

    /// Removes a key's binding so it reaches states as a raw key event.
    pub fn unbind_key(mut self, key: KeyCode) -> Self {
        self.bindings.unbind(key);
        self
    }

    /// Builds the engine and its platform → logic channel.
    pub fn build(self) -> Engine {
        info!(
            "Building engine (TPS: {}, channel: {}, {} key bindings)",
            self.tps,
            self.channel_capacity,
            self.bindings.len()
        );

        let (sender, receiver) = bounded(self.channel_capacity);

        Engine {
            tps: self.tps,
            channel_capacity: self.channel_capacity,
            title: self.title,
            bindings: self.bindings,
            sender,
            receiver,
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== InputSender =========================================================

/// Injects input from sources other than the window (gamepad pollers,
/// scripted demos).
///
/// Cloneable and `Send`. Events join the logic thread's next frame.
#[derive(Debug, Clone)]
pub struct InputSender {
    sender: Sender<PlatformEvent>,
}

impl InputSender {
    /// Sends a batch of events, preserving order.
    ///
    /// Returns `false` if the logic thread is gone.
    pub fn send(&self, events: Vec<InputEvent>) -> bool {
        if events.is_empty() {
            return true;
        }

        match self.sender.send(PlatformEvent::Inputs(events)) {
            Ok(()) => true,
            Err(_) => {
                warn!(target: "core", "Logic thread gone, injected input dropped");
                false
            }
        }
    }

    pub fn send_event(&self, event: InputEvent) -> bool {
        self.send(vec![event])
    }
}

//=== Engine ==============================================================

/// Stagehand runtime.
///
/// # Architecture
///
/// ```text
/// Engine (Main Thread)
///   ├─► CoreLoop (Logic Thread @ TPS)
///   │     └─► StateManager → InputRouter, FadeController, states
///   │
///   └─► Platform (Event Loop)
///         └─► Window, Input Polling
///
/// Communication: bounded crossbeam channel (PlatformEvent)
/// ```
pub struct Engine {
    tps: f64,
    channel_capacity: usize,
    title: String,
    bindings: KeyBindings,
    sender: Sender<PlatformEvent>,
    receiver: Receiver<PlatformEvent>,
}

impl Engine {
    /// Handle for injecting input from other threads.
    pub fn input_sender(&self) -> InputSender {
        InputSender {
            sender: self.sender.clone(),
        }
    }

    //--- Execution --------------------------------------------------------

    /// Starts the runtime and blocks until the window closes.
    ///
    /// `setup` runs on the logic thread and returns the state manager to
    /// drive. States are `Rc`-shared, so they must be created there.
    ///
    /// # Lifecycle
    ///
    /// 1. Spawns the logic thread running at the configured TPS
    /// 2. Runs the platform event loop (blocks here)
    /// 3. On window close: `WindowClosed` → final tick → logic thread exits
    /// 4. Joins the logic thread, logging a panic if it had one
    pub fn run<F>(self, setup: F)
    where
        F: FnOnce() -> StateManager + Send + 'static,
    {
        info!("Starting engine runtime (TPS: {}, channel: {})", self.tps, self.channel_capacity);

        //--- 1. Spawn the logic thread ------------------------------------
        let core_handle = CoreLoop::new(self.receiver, self.tps).spawn(setup);
        info!("Logic thread spawned");

        //--- 2. Launch the platform subsystem -----------------------------
        let shutdown = self.sender.clone();
        let platform = Platform::new(self.sender, self.bindings, self.title);
        info!("Platform initialized, entering event loop");

        if let Err(e) = platform.run() {
            error!("Platform error: {}", e);
        }

        info!("Platform event loop exited");

        //--- 3. Make sure the logic thread sees the shutdown --------------
        let _ = shutdown.send(PlatformEvent::WindowClosed);
        drop(shutdown);

        //--- 4. Wait for the logic thread ---------------------------------
        match core_handle.join() {
            Ok(()) => info!("Logic thread terminated cleanly"),
            Err(e) => error!("Logic thread panicked: {:?}", e),
        }

        info!("Engine shutdown complete");
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //=====================================================================
    // EngineBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = EngineBuilder::new();
        assert_eq!(builder.tps, 60.0);
        assert_eq!(builder.channel_capacity, 128);
        assert_eq!(builder.title, "Stagehand");
        assert_eq!(builder.bindings, KeyBindings::default());
    }

    #[test]
    fn builder_with_tps() {
        let builder = EngineBuilder::new().with_tps(120.0);
        assert_eq!(builder.tps, 120.0);
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn builder_with_tps_panics_on_zero() {
        EngineBuilder::new().with_tps(0.0);
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn builder_with_tps_panics_on_negative() {
        EngineBuilder::new().with_tps(-60.0);
    }

    #[test]
    fn builder_with_channel_capacity() {
        let builder = EngineBuilder::new().with_channel_capacity(256);
        assert_eq!(builder.channel_capacity, 256);
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn builder_with_channel_capacity_panics_on_zero() {
        EngineBuilder::new().with_channel_capacity(0);
    }

    #[test]
    fn builder_key_bindings() {
        let builder = EngineBuilder::new()
            .bind_key(KeyCode::Space, GamepadButton::East)
            .unbind_key(KeyCode::Enter);

        assert_eq!(builder.bindings.button_for(KeyCode::Space), Some(GamepadButton::East));
        assert_eq!(builder.bindings.button_for(KeyCode::Enter), None);
    }

    #[test]
    fn builder_fluent_api_chaining() {
        let engine = EngineBuilder::new()
            .with_tps(120.0)
            .with_channel_capacity(256)
            .with_title("Board Game")
            .build();

        assert_eq!(engine.tps, 120.0);
        assert_eq!(engine.channel_capacity, 256);
        assert_eq!(engine.title, "Board Game");
    }

    //=====================================================================
    // InputSender Tests
    //=====================================================================

    #[test]
    fn input_sender_feeds_logic_channel() {
        let engine = EngineBuilder::new().build();
        let sender = engine.input_sender();

        assert!(sender.send_event(InputEvent::press(GamepadButton::North)));
        assert!(sender.send(Vec::new()));

        assert_eq!(
            engine.receiver.try_recv().unwrap(),
            PlatformEvent::Inputs(vec![InputEvent::press(GamepadButton::North)])
        );
        assert!(engine.receiver.try_recv().is_err());
    }

    #[test]
    fn input_sender_reports_disconnect() {
        let engine = EngineBuilder::new().build();
        let sender = engine.input_sender();
        drop(engine);

        assert!(!sender.send_event(InputEvent::press(GamepadButton::North)));
    }
}
