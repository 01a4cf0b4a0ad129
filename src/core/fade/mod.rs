//=========================================================================
// Fade System
//=========================================================================
//
// Full-screen overlay driven linearly to black and back during faded
// state transitions.
//
// Architecture:
//   FadeController
//     ├─ factory: Box<dyn OverlayFactory>   (external drawing primitive)
//     ├─ overlay: Option<Box<dyn Overlay>>  (at most one alive)
//     └─ opacity: f32                       (0.0 transparent .. 1.0 opaque)
//
//=========================================================================

//=== Module Declarations =================================================

mod fade_controller;

//=== Public API ==========================================================

pub use fade_controller::{FadeController, FadeProgress, OPAQUE_THRESHOLD, TRANSPARENT_THRESHOLD};

//=== Overlay Primitive ===================================================

/// A full-screen colored surface created for one faded transition.
pub trait Overlay {
    /// Sets the alpha channel, in [0, 1].
    fn set_alpha(&mut self, alpha: f32);

    /// Removes the surface. Called once, when the overlay is released.
    fn destroy(&mut self);
}

/// Creates overlay surfaces on demand.
pub trait OverlayFactory {
    /// Creates a fully transparent overlay of `color` (linear RGB).
    fn create(&mut self, color: [f32; 3]) -> Box<dyn Overlay>;
}

//=== FadeConfig ==========================================================

/// Fade timing and appearance.
///
/// # Default Values
///
/// - **Fade-out rate**: 1.25 opacity per second
/// - **Fade-in rate**: 2.0 opacity per second
/// - **Color**: black
///
/// # Examples
///
/// ```
/// use stagehand::core::fade::FadeConfig;
///
/// let config = FadeConfig::new()
///     .with_fade_out_rate(2.5)
///     .with_fade_in_rate(4.0);
/// assert_eq!(config.fade_out_rate, 2.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeConfig {
    /// Opacity gained per second while fading out.
    pub fade_out_rate: f32,

    /// Opacity lost per second while fading in.
    pub fade_in_rate: f32,

    /// Overlay color.
    pub color: [f32; 3],
}

impl FadeConfig {
    pub fn new() -> Self {
        Self {
            fade_out_rate: 1.25,
            fade_in_rate: 2.0,
            color: [0.0, 0.0, 0.0],
        }
    }

    /// # Panics
    ///
    /// Panics if `rate <= 0.0`.
    pub fn with_fade_out_rate(mut self, rate: f32) -> Self {
        assert!(rate > 0.0, "Fade-out rate must be positive, got {}", rate);
        self.fade_out_rate = rate;
        self
    }

    /// # Panics
    ///
    /// Panics if `rate <= 0.0`.
    pub fn with_fade_in_rate(mut self, rate: f32) -> Self {
        assert!(rate > 0.0, "Fade-in rate must be positive, got {}", rate);
        self.fade_in_rate = rate;
        self
    }

    pub fn with_color(mut self, color: [f32; 3]) -> Self {
        self.color = color;
        self
    }
}

impl Default for FadeConfig {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = FadeConfig::default();
        assert_eq!(config.fade_out_rate, 1.25);
        assert_eq!(config.fade_in_rate, 2.0);
        assert_eq!(config.color, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn config_fluent_setters() {
        let config = FadeConfig::new()
            .with_fade_out_rate(3.0)
            .with_fade_in_rate(6.0)
            .with_color([1.0, 1.0, 1.0]);

        assert_eq!(config.fade_out_rate, 3.0);
        assert_eq!(config.fade_in_rate, 6.0);
        assert_eq!(config.color, [1.0, 1.0, 1.0]);
    }

    #[test]
    #[should_panic(expected = "Fade-out rate must be positive")]
    fn config_rejects_zero_fade_out() {
        FadeConfig::new().with_fade_out_rate(0.0);
    }

    #[test]
    #[should_panic(expected = "Fade-in rate must be positive")]
    fn config_rejects_negative_fade_in() {
        FadeConfig::new().with_fade_in_rate(-1.0);
    }
}
