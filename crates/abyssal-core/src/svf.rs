//! State Variable Filter low-pass.
//!
//! # Topology
//!
//! Topology-Preserving Transform (TPT) SVF after Zavalishin, "The Art of VA
//! Filter Design" (2012). Trapezoidal integration keeps the analog
//! prototype's response and stays stable while the cutoff is swept from block
//! to block, which is exactly how the tone stage drives it.
//!
//! # Reference
//!
//! Zavalishin, "The Art of VA Filter Design", rev. 2.1.2 (2018), Chapter 3.

use core::f32::consts::{FRAC_1_SQRT_2, PI};
use libm::tanf;

use crate::flush_denormal;

/// Two-pole (12 dB/oct) low-pass state variable filter.
///
/// ## Parameters
///
/// - `cutoff`: Hz, clamped to `20.0 ..= sample_rate × 0.49`
/// - `resonance`: Q, clamped to `0.5 ..= 20.0`, default `1/√2` (Butterworth)
///
/// # Example
///
/// ```rust
/// use abyssal_core::StateVariableFilter;
///
/// let mut svf = StateVariableFilter::new(48000.0);
/// svf.set_cutoff(1000.0);
///
/// let y = svf.process(0.5);
/// assert!(y.is_finite());
/// ```
#[derive(Debug, Clone)]
pub struct StateVariableFilter {
    ic1eq: f32,
    ic2eq: f32,

    g: f32,
    k: f32,

    sample_rate: f32,
    cutoff: f32,
    resonance: f32,
}

impl Default for StateVariableFilter {
    fn default() -> Self {
        Self::new(48000.0)
    }
}

impl StateVariableFilter {
    /// Lowest cutoff in Hz.
    pub const MIN_CUTOFF_HZ: f32 = 20.0;
    /// Highest cutoff as a fraction of the sample rate.
    pub const MAX_CUTOFF_RATIO: f32 = 0.49;
    /// Lowest sample rate whose cutoff ceiling still reaches the 20 Hz floor.
    pub const MIN_SAMPLE_RATE: f32 = Self::MIN_CUTOFF_HZ / Self::MAX_CUTOFF_RATIO;

    /// Create a filter at 1 kHz, Q = 1/√2.
    pub fn new(sample_rate: f32) -> Self {
        let mut svf = Self {
            ic1eq: 0.0,
            ic2eq: 0.0,
            g: 0.0,
            k: 0.0,
            sample_rate,
            cutoff: 1000.0,
            resonance: FRAC_1_SQRT_2,
        };
        svf.update_coefficients();
        svf
    }

    /// Set cutoff frequency in Hz. Recomputes coefficients only on change.
    pub fn set_cutoff(&mut self, freq: f32) {
        let clamped = freq.clamp(Self::MIN_CUTOFF_HZ, self.max_cutoff());
        if clamped != self.cutoff {
            self.cutoff = clamped;
            self.update_coefficients();
        }
    }

    /// Current cutoff in Hz (after clamping).
    pub fn cutoff(&self) -> f32 {
        self.cutoff
    }

    /// Set resonance (Q factor).
    pub fn set_resonance(&mut self, q: f32) {
        self.resonance = q.clamp(0.5, 20.0);
        self.update_coefficients();
    }

    /// Current resonance (Q factor).
    pub fn resonance(&self) -> f32 {
        self.resonance
    }

    /// Change sample rate. Re-clamps the cutoff against the new Nyquist.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.cutoff = self.cutoff.clamp(Self::MIN_CUTOFF_HZ, self.max_cutoff());
        self.update_coefficients();
    }

    /// Clear the integrator state.
    pub fn reset(&mut self) {
        self.ic1eq = 0.0;
        self.ic2eq = 0.0;
    }

    /// Filter one sample and return the low-pass output.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let v3 = input - self.ic2eq;
        let v1 = (self.g * v3 + self.ic1eq) / (1.0 + self.g * (self.g + self.k));
        let v2 = self.ic2eq + self.g * v1;

        self.ic1eq = flush_denormal(2.0 * v1 - self.ic1eq);
        self.ic2eq = flush_denormal(2.0 * v2 - self.ic2eq);

        v2
    }

    /// Cutoff ceiling. Never below the floor, even at very low sample rates.
    fn max_cutoff(&self) -> f32 {
        (self.sample_rate * Self::MAX_CUTOFF_RATIO).max(Self::MIN_CUTOFF_HZ)
    }

    fn update_coefficients(&mut self) {
        self.g = tanf(PI * self.cutoff / self.sample_rate);
        self.k = 1.0 / self.resonance;
    }
}
