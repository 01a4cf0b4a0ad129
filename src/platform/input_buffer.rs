//=========================================================================
// Input Buffer
//
// Collects the input of one platform frame until it is flushed to the
// logic thread.
//
// Responsibilities:
// - Keep discrete events (button presses, clicks, keys) in arrival order
// - Coalesce a run of continuous events (drag, stick) into the latest one
// - Hand the whole frame over via `drain()`
//
// Notes:
// Coalescing only merges *consecutive* continuous events of the same
// source, so a drag interrupted by a click keeps both sides of it.
//=========================================================================

//=== Internal Modules ====================================================
use crate::core::input::InputEvent;

//=== InputBuffer Struct ==================================================
//
// Transient event store for one frame of input.
//
pub(crate) struct InputBuffer {
    events: Vec<InputEvent>,
}

impl InputBuffer {
    //--- Construction -----------------------------------------------------
    //
    // Preallocates for a typical frame to avoid reallocations.
    //
    pub(crate) fn new() -> Self {
        const BASE_CAPACITY: usize = 64;

        Self {
            events: Vec::with_capacity(BASE_CAPACITY),
        }
    }

    //--- Event Handling ---------------------------------------------------
    //
    // Appends an event. A continuous event replaces the previous one when
    // both come from the same source.
    //
    pub(crate) fn push(&mut self, event: InputEvent) {
        if let Some(last) = self.events.last_mut() {
            if same_continuous_source(last, &event) {
                *last = event;
                return;
            }
        }

        self.events.push(event);
    }

    //--- Drain ------------------------------------------------------------
    //
    // Returns the frame's events and empties the buffer. `None` when
    // nothing was buffered, so empty frames are never sent.
    //
    pub(crate) fn drain(&mut self) -> Option<Vec<InputEvent>> {
        if self.events.is_empty() {
            return None;
        }

        Some(self.events.drain(..).collect())
    }
}

fn same_continuous_source(previous: &InputEvent, next: &InputEvent) -> bool {
    if !previous.is_continuous() || !next.is_continuous() {
        return false;
    }

    match (previous, next) {
        (InputEvent::Stick { stick: a, .. }, InputEvent::Stick { stick: b, .. }) => a == b,
        (InputEvent::AltStick { stick: a, .. }, InputEvent::AltStick { stick: b, .. }) => a == b,
        (InputEvent::Pointer { .. }, InputEvent::Pointer { .. }) => true,
        _ => false,
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
