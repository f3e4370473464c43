//! Simple one-pole low-pass filter.
//!
//! Also known as exponential moving average. It is used to smoothen the
//! jittery reading of the pedal potentiometer.

/// Weight of the newest sample used for the pedal.
pub const DEFAULT_ALPHA: f32 = 0.2;

#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OnePoleFilter {
    y_m1: f32,
    a0: f32,
    b1: f32,
}

impl Default for OnePoleFilter {
    fn default() -> Self {
        Self::new(DEFAULT_ALPHA)
    }
}

impl OnePoleFilter {
    /// Alpha is the weight of the newest sample, clamped to `0.0..=1.0`.
    ///
    /// The filter starts from zero, so the first few samples ramp up
    /// towards the input.
    #[must_use]
    pub fn new(alpha: f32) -> Self {
        let a0 = alpha.clamp(0.0, 1.0);
        let b1 = 1.0 - a0;
        Self { y_m1: 0.0, a0, b1 }
    }

    pub fn tick(&mut self, x: f32) -> f32 {
        self.y_m1 = x * self.a0 + self.y_m1 * self.b1;
        self.y_m1
    }

    #[must_use]
    pub fn value(&self) -> f32 {
        self.y_m1
    }

    pub fn reset(&mut self) {
        self.y_m1 = 0.0;
    }
}
