//=========================================================================
// Event Collector
//=========================================================================
//
// Gathers one frame's worth of platform input on the logic thread.
//
// Architecture:
//   Receiver<PlatformEvent> → collect_frame() → events → TickControl
//
// The first receive waits up to one frame, which paces the loop while
// idle. The drain after it is bounded so a flood of input cannot starve
// the tick.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, TryRecvError};
use log::warn;

//=== Internal Dependencies ===============================================

use super::PlatformEvent;
use crate::core::input::InputEvent;

//=== Constants ===========================================================

const MAX_MESSAGES_PER_FRAME: usize = 100;

//=== TickControl =========================================================

/// Update loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickControl {
    Continue,
    Exit,
}

//=== EventCollector ======================================================

/// Collects platform messages with bounded polling.
pub(crate) struct EventCollector {
    receiver: Receiver<PlatformEvent>,
    events: Vec<InputEvent>,
}

impl EventCollector {
    pub(crate) fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self {
            receiver,
            events: Vec::with_capacity(32),
        }
    }

    /// Collects this frame's input, waiting at most `wait` for the first
    /// message.
    ///
    /// Returns `Exit` on `WindowClosed` or when every sender is gone.
    /// Input received before the exit signal is kept.
    pub(crate) fn collect_frame(&mut self, wait: Duration) -> TickControl {
        self.events.clear();

        match self.receiver.recv_timeout(wait) {
            Ok(message) => {
                if self.handle_message(message) == TickControl::Exit {
                    return TickControl::Exit;
                }
            }
            Err(RecvTimeoutError::Timeout) => return TickControl::Continue,
            Err(RecvTimeoutError::Disconnected) => return TickControl::Exit,
        }

        let mut drained = 1;
        while drained < MAX_MESSAGES_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(message) => {
                    if self.handle_message(message) == TickControl::Exit {
                        return TickControl::Exit;
                    }
                    drained += 1;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => return TickControl::Exit,
            }
        }

        if drained >= MAX_MESSAGES_PER_FRAME {
            warn!(target: "core", "Event queue backlog: drained {} messages this frame", drained);
        }

        TickControl::Continue
    }

    /// Takes this frame's input, leaving the buffer empty.
    pub(crate) fn take_events(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    fn handle_message(&mut self, message: PlatformEvent) -> TickControl {
        match message {
            PlatformEvent::Inputs(batch) => {
                self.events.extend(batch);
                TickControl::Continue
            }
            PlatformEvent::WindowClosed => TickControl::Exit,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
