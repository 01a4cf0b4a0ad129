//=========================================================================
// Core Loop
//
// Logic-thread runtime driving the state manager at a fixed rate.
//
// Responsibilities:
// - Build the StateManager on the logic thread (states are Rc-shared)
// - Receive platform input through the crossbeam channel
// - Route each event to the active state, then tick transitions
// - Report shutdown to in-flight fades through the liveness flag
//
// Notes:
// The loop runs independently from the platform layer. Communication
// with the platform occurs only through the bounded channel.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod fade;
pub mod input;
pub(crate) mod platform_bridge;
pub mod services;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;

//=== External Dependencies ===============================================

use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use log::{debug, info};

//=== Internal Dependencies ===============================================

use platform_bridge::{EventCollector, PlatformEvent, TickControl};
use state::StateManager;

//=== Public API ==========================================================

pub use platform_bridge::PlatformError;

//=== FrameTick ===========================================================

/// One scheduler step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTick {
    /// Seconds elapsed since the previous tick.
    pub delta: f32,

    /// Liveness condition. `false` once the application is shutting down;
    /// in-flight fades stall instead of advancing.
    pub running: bool,
}

impl FrameTick {
    pub const fn new(delta: f32, running: bool) -> Self {
        Self { delta, running }
    }
}

//=== CoreLoop ============================================================

/// Fixed-rate loop feeding platform input into a [`StateManager`].
pub(crate) struct CoreLoop {
    collector: EventCollector,
    frame_duration: Duration,
}

impl CoreLoop {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(receiver: Receiver<PlatformEvent>, tps: f64) -> Self {
        Self {
            collector: EventCollector::new(receiver),
            frame_duration: Duration::from_secs_f64(1.0 / tps),
        }
    }

    //--- Execution --------------------------------------------------------

    /// Spawns the logic thread.
    ///
    /// `setup` runs on the new thread and returns the manager to drive,
    /// typically after calling [`StateManager::start`].
    pub(crate) fn spawn<F>(self, setup: F) -> thread::JoinHandle<()>
    where
        F: FnOnce() -> StateManager + Send + 'static,
    {
        thread::spawn(move || {
            let mut manager = setup();
            debug!(target: "core", "State manager ready on logic thread");
            self.run(&mut manager);
        })
    }

    /// Runs until the window closes or the platform disconnects.
    ///
    /// Each frame:
    ///  1. Collects platform input (waits at most one frame)
    ///  2. Routes every event through the manager
    ///  3. Ticks the manager with the measured delta
    ///  4. Sleeps to maintain fixed pacing
    ///
    /// On exit the manager receives one last tick with `running == false`.
    pub(crate) fn run(mut self, manager: &mut StateManager) {
        let mut last_tick = Instant::now();

        loop {
            let frame_start = Instant::now();

            //--- Step 1: Gather platform events ----------------------------
            let control = self.collector.collect_frame(self.frame_duration);

            //--- Step 2: Route input ---------------------------------------
            for event in self.collector.take_events() {
                manager.handle_input(&event);
            }

            //--- Step 3: Advance transitions -------------------------------
            let now = Instant::now();
            let delta = now.duration_since(last_tick).as_secs_f32();
            last_tick = now;

            if control == TickControl::Exit {
                manager.tick(FrameTick::new(delta, false));
                info!(target: "core", "Logic thread exiting after {} ticks", manager.ticks());
                break;
            }

            manager.tick(FrameTick::new(delta, true));

            //--- Step 4: Maintain pacing -----------------------------------
            let elapsed = frame_start.elapsed();
            if elapsed < self.frame_duration {
                thread::sleep(self.frame_duration - elapsed);
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
