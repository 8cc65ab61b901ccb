//! Damped feedback comb filter for Freeverb-style reverbs.
//!
//! The feedback path runs through a one-pole low-pass, so high frequencies
//! die away faster than lows the way they do in a real room.

use crate::flush_denormal;
use crate::RingDelay;

/// Feedback comb with a one-pole damping filter.
///
/// Feedback and damping are passed per sample so a reverb can glide them
/// with [`SmoothedParam`](crate::SmoothedParam) without touching every comb.
///
/// # Example
///
/// ```rust
/// use abyssal_core::CombFilter;
///
/// let mut comb = CombFilter::new(1116);
/// let out = comb.process(1.0, 0.84, 0.2);
/// assert_eq!(out, 0.0); // first output comes from the empty ring
/// ```
#[derive(Debug, Clone)]
pub struct CombFilter {
    ring: RingDelay,
    filterstore: f32,
}

impl CombFilter {
    /// Create a comb with a delay of `delay_samples`.
    pub fn new(delay_samples: usize) -> Self {
        Self {
            ring: RingDelay::new(delay_samples),
            filterstore: 0.0,
        }
    }

    /// Process one sample.
    ///
    /// `damp` in `[0, 1)` is the low-pass pole: 0 leaves the loop bright.
    #[inline]
    pub fn process(&mut self, input: f32, feedback: f32, damp: f32) -> f32 {
        let output = self.ring.front();
        self.filterstore = flush_denormal(output * (1.0 - damp) + self.filterstore * damp);
        self.ring.push(input + self.filterstore * feedback);
        output
    }

    /// Clear the ring and the damping register.
    pub fn clear(&mut self) {
        self.ring.clear();
        self.filterstore = 0.0;
    }

    /// Delay length in samples.
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    /// Always `false`; see [`RingDelay::is_empty`].
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }
}
