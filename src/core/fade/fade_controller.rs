//=========================================================================
// Fade Controller
//=========================================================================
//
// Owns the single fade overlay and steps its opacity once per tick.
//
// Lifecycle: begin() → fade_out_step()* → fade_in_step()* → release()
//
// Thresholds (0.99 / 0.01) end each ramp; the final step snaps to the
// exact boundary so accumulated float error never leaves a faint veil.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, trace, warn};

//=== Internal Dependencies ===============================================

use super::{FadeConfig, Overlay, OverlayFactory};

//=== Constants ===========================================================

/// Opacity at which fade-out is considered complete.
pub const OPAQUE_THRESHOLD: f32 = 0.99;

/// Opacity at which fade-in is considered complete.
pub const TRANSPARENT_THRESHOLD: f32 = 0.01;

//=== FadeProgress ========================================================

/// Result of one fade step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeProgress {
    InProgress,
    Complete,
}

//=== FadeController ======================================================

/// Drives the fade overlay.
pub struct FadeController {
    config: FadeConfig,
    factory: Box<dyn OverlayFactory>,
    overlay: Option<Box<dyn Overlay>>,
    opacity: f32,
}

impl FadeController {
    //--- Construction -----------------------------------------------------

    pub fn new<F>(factory: F, config: FadeConfig) -> Self
    where
        F: OverlayFactory + 'static,
    {
        Self {
            config,
            factory: Box::new(factory),
            overlay: None,
            opacity: 0.0,
        }
    }

    //--- Lifecycle --------------------------------------------------------

    /// Allocates the overlay at opacity 0.
    ///
    /// An overlay left over from an aborted fade is released first, so at
    /// most one exists.
    pub fn begin(&mut self) {
        if self.overlay.is_some() {
            warn!(target: "fade", "Overlay from a previous fade still alive; releasing it");
            self.release();
        }

        debug!(target: "fade", "Overlay created");
        self.overlay = Some(self.factory.create(self.config.color));
        self.apply(0.0);
    }

    /// Raises opacity by `fade_out_rate × delta`.
    ///
    /// Returns `Complete` once opacity reaches [`OPAQUE_THRESHOLD`], after
    /// snapping it to exactly 1.0.
    pub fn fade_out_step(&mut self, delta: f32) -> FadeProgress {
        let next = self.opacity + self.config.fade_out_rate * delta;

        if next >= OPAQUE_THRESHOLD {
            self.apply(1.0);
            debug!(target: "fade", "Screen fully opaque");
            return FadeProgress::Complete;
        }

        self.apply(next);
        FadeProgress::InProgress
    }

    /// Lowers opacity by `fade_in_rate × delta`.
    ///
    /// Returns `Complete` once opacity reaches [`TRANSPARENT_THRESHOLD`],
    /// after snapping it to exactly 0.0.
    pub fn fade_in_step(&mut self, delta: f32) -> FadeProgress {
        let next = self.opacity - self.config.fade_in_rate * delta;

        if next <= TRANSPARENT_THRESHOLD {
            self.apply(0.0);
            debug!(target: "fade", "Screen fully transparent");
            return FadeProgress::Complete;
        }

        self.apply(next);
        FadeProgress::InProgress
    }

    /// Destroys the overlay. No-op when none exists.
    pub fn release(&mut self) {
        match self.overlay.take() {
            Some(mut overlay) => {
                overlay.destroy();
                debug!(target: "fade", "Overlay released");
            }
            None => trace!(target: "fade", "No overlay to release"),
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Whether an overlay is currently allocated.
    pub fn has_overlay(&self) -> bool {
        self.overlay.is_some()
    }

    //--- Internal Helpers -------------------------------------------------

    fn apply(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);

        if let Some(overlay) = self.overlay.as_mut() {
            overlay.set_alpha(self.opacity);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::{OverlayLog, RecordingOverlayFactory};

    const FRAME: f32 = 1.0 / 60.0;

    fn controller() -> (FadeController, OverlayLog) {
        let log = OverlayLog::default();
        let fader = FadeController::new(RecordingOverlayFactory(log.clone()), FadeConfig::default());
        (fader, log)
    }

    fn steps_until_complete(mut step: impl FnMut() -> FadeProgress) -> usize {
        let mut steps = 0;
        loop {
            steps += 1;
            if step() == FadeProgress::Complete {
                return steps;
            }
            assert!(steps < 10_000, "fade never completed");
        }
    }

    #[test]
    fn begin_creates_transparent_overlay() {
        let (mut fader, log) = controller();
        assert!(!fader.has_overlay());

        fader.begin();
        assert!(fader.has_overlay());
        assert_eq!(log.created.get(), 1);
        assert_eq!(log.last_alpha(), Some(0.0));
        assert_eq!(fader.opacity(), 0.0);
    }

    #[test]
    fn fade_out_at_60hz_takes_48_steps() {
        let (mut fader, _log) = controller();
        fader.begin();

        let steps = steps_until_complete(|| fader.fade_out_step(FRAME));
        let expected = (OPAQUE_THRESHOLD / (1.25 * FRAME)).ceil() as usize;

        assert_eq!(steps, expected);
        assert_eq!(steps, 48);
        assert_eq!(fader.opacity(), 1.0);
    }

    #[test]
    fn fade_out_is_monotonic_and_snaps_to_one() {
        let (mut fader, log) = controller();
        fader.begin();
        steps_until_complete(|| fader.fade_out_step(FRAME));

        let alphas = log.alphas.borrow();
        assert!(alphas.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(*alphas.last().unwrap(), 1.0);
    }

    #[test]
    fn fade_in_is_monotonic_and_snaps_to_zero() {
        let (mut fader, log) = controller();
        fader.begin();
        steps_until_complete(|| fader.fade_out_step(FRAME));
        log.alphas.borrow_mut().clear();

        let steps = steps_until_complete(|| fader.fade_in_step(FRAME));

        // 2.0/s is faster than 1.25/s
        assert!(steps < 48);
        let alphas = log.alphas.borrow();
        assert!(alphas.windows(2).all(|pair| pair[0] >= pair[1]));
        assert_eq!(*alphas.last().unwrap(), 0.0);
        assert_eq!(fader.opacity(), 0.0);
    }

    #[test]
    fn large_delta_completes_in_one_step() {
        let (mut fader, _log) = controller();
        fader.begin();

        assert_eq!(fader.fade_out_step(5.0), FadeProgress::Complete);
        assert_eq!(fader.opacity(), 1.0);
        assert_eq!(fader.fade_in_step(5.0), FadeProgress::Complete);
        assert_eq!(fader.opacity(), 0.0);
    }

    #[test]
    fn release_is_idempotent() {
        let (mut fader, log) = controller();
        fader.begin();

        fader.release();
        fader.release();

        assert!(!fader.has_overlay());
        assert_eq!(log.destroyed.get(), 1);
    }

    #[test]
    fn begin_twice_keeps_single_overlay() {
        let (mut fader, log) = controller();
        fader.begin();
        fader.fade_out_step(FRAME);
        fader.begin();

        assert_eq!(log.created.get(), 2);
        assert_eq!(log.live(), 1);
        assert_eq!(fader.opacity(), 0.0);
    }
}
