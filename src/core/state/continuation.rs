//=========================================================================
// Continuation
//=========================================================================
//
// Resume token handed to `State::prepare_state`.
//
// The state consumes the token to signal that preparation finished. The
// manager keeps the paired `PendingPrepare` and polls it on each tick, so
// nothing runs inside the state's call frame.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

//=== Continuation ========================================================

/// Signals that an incoming state finished preparing.
///
/// `resume` takes `self`, so a continuation can be resumed at most once.
/// Dropping it without resuming leaves the transition stalled.
#[derive(Debug)]
pub struct Continuation {
    resumed: Arc<AtomicBool>,
}

impl Continuation {
    pub(crate) fn new() -> (Self, PendingPrepare) {
        let resumed = Arc::new(AtomicBool::new(false));
        let pending = PendingPrepare {
            resumed: Arc::clone(&resumed),
            abandon_reported: false,
        };
        (Self { resumed }, pending)
    }

    /// Lets the transition continue on the next tick.
    pub fn resume(self) {
        self.resumed.store(true, Ordering::Release);
    }
}

//=== PendingPrepare ======================================================

/// Manager-side half of a [`Continuation`].
#[derive(Debug)]
pub(crate) struct PendingPrepare {
    resumed: Arc<AtomicBool>,
    abandon_reported: bool,
}

impl PendingPrepare {
    pub(crate) fn is_resumed(&self) -> bool {
        self.resumed.load(Ordering::Acquire)
    }

    /// Returns `true` exactly once if the continuation was dropped unresumed.
    pub(crate) fn take_abandoned(&mut self) -> bool {
        if self.abandon_reported || self.is_resumed() {
            return false;
        }

        if Arc::strong_count(&self.resumed) == 1 {
            self.abandon_reported = true;
            return true;
        }

        false
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
