//=========================================================================
// Transition Queue
//=========================================================================
//
// Queue for state transition requests.
//
// States queue requests here from their hooks. The state manager drains
// the queue right after the hook returns.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

//=== Internal Dependencies ===============================================

use super::StateRef;

//=== TransitionKind ======================================================

/// Strategy used to swap states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    /// Swap on the next tick, no visual.
    Direct,

    /// Fade to black, swap while opaque, fade back in.
    Faded,
}

//=== TransitionRequest ===================================================

/// Target state plus the strategy used to reach it.
#[derive(Clone)]
pub struct TransitionRequest {
    pub target: StateRef,
    pub kind: TransitionKind,
}

impl TransitionRequest {
    pub fn direct(target: StateRef) -> Self {
        Self {
            target,
            kind: TransitionKind::Direct,
        }
    }

    pub fn faded(target: StateRef) -> Self {
        Self {
            target,
            kind: TransitionKind::Faded,
        }
    }
}

impl fmt::Debug for TransitionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let target = match self.target.try_borrow() {
            Ok(state) => state.name().to_owned(),
            Err(_) => String::from("<borrowed>"),
        };

        f.debug_struct("TransitionRequest")
            .field("target", &target)
            .field("kind", &self.kind)
            .finish()
    }
}

//=== TransitionQueue =====================================================

/// FIFO of pending transition requests.
#[derive(Debug, Default)]
pub struct TransitionQueue {
    queue: Vec<TransitionRequest>,
}

impl TransitionQueue {
    /// Creates a new empty transition queue.
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    /// Queues a request to be handled once the current hook returns.
    pub fn push(&mut self, request: TransitionRequest) {
        self.queue.push(request);
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Takes all requests, leaving the queue empty.
    pub fn take(&mut self) -> Vec<TransitionRequest> {
        std::mem::take(&mut self.queue)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
