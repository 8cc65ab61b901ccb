//! Radian phase accumulator for amplitude modulation.
//!
//! Phase is kept in `[0, 2π)` and wrapped on every step, so it never grows
//! without bound no matter how long the stream runs.

use core::f32::consts::TAU;
use libm::{fmodf, sinf};

/// Phase accumulator producing a sine at a retunable rate.
///
/// # Example
///
/// ```rust
/// use abyssal_core::PhaseAccumulator;
///
/// let mut osc = PhaseAccumulator::new();
/// osc.set_sample_rate(48000.0);
/// osc.set_frequency(5.0);
///
/// let s = osc.next_sine();
/// assert!((-1.0..=1.0).contains(&s));
/// assert!(osc.phase() < core::f32::consts::TAU);
/// ```
#[derive(Debug, Clone)]
pub struct PhaseAccumulator {
    /// Radians in `[0, 2π)`.
    phase: f32,
    increment: f32,
    frequency: f32,
    sample_rate: f32,
}

impl Default for PhaseAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl PhaseAccumulator {
    /// Create an accumulator at zero phase and zero frequency.
    pub fn new() -> Self {
        Self {
            phase: 0.0,
            increment: 0.0,
            frequency: 0.0,
            sample_rate: 44100.0,
        }
    }

    /// Set the sample rate, keeping the current frequency.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.update_increment();
    }

    /// Set the oscillation rate in Hz.
    pub fn set_frequency(&mut self, hz: f32) {
        self.frequency = hz;
        self.update_increment();
    }

    /// Current rate in Hz.
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Current phase in radians.
    #[inline]
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Return to zero phase.
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    /// `sin(phase)` at the current phase, then advance one sample.
    #[inline]
    pub fn next_sine(&mut self) -> f32 {
        let out = sinf(self.phase);
        self.advance();
        out
    }

    /// Advance by one sample and wrap into `[0, 2π)`.
    #[inline]
    pub fn advance(&mut self) {
        self.phase += self.increment;
        if self.phase >= TAU {
            self.phase -= TAU;
            // An increment above 2π (rate above the sample rate) still wraps.
            if self.phase >= TAU {
                self.phase = fmodf(self.phase, TAU);
            }
        }
        // `x - TAU` can round to exactly TAU for x just below 2·TAU.
        if self.phase >= TAU || self.phase < 0.0 {
            self.phase = 0.0;
        }
    }

    fn update_increment(&mut self) {
        self.increment = if self.sample_rate > 0.0 {
            TAU * self.frequency / self.sample_rate
        } else {
            0.0
        };
    }
}
