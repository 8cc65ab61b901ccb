//! Schroeder allpass filter for reverb diffusion.

use crate::flush_denormal;
use crate::RingDelay;

/// Freeverb allpass coefficient.
pub const DEFAULT_ALLPASS_FEEDBACK: f32 = 0.5;

/// Schroeder allpass filter.
///
/// Passes all frequencies at equal magnitude while smearing the phase, which
/// turns the comb bank's discrete echoes into a dense tail.
///
/// ```text
/// output      = delayed - input
/// ring_input  = input + delayed · feedback
/// ```
///
/// # Example
///
/// ```rust
/// use abyssal_core::AllpassFilter;
///
/// let mut allpass = AllpassFilter::new(556);
/// assert_eq!(allpass.process(1.0), -1.0);
/// ```
#[derive(Debug, Clone)]
pub struct AllpassFilter {
    ring: RingDelay,
    feedback: f32,
}

impl AllpassFilter {
    /// Create an allpass with a delay of `delay_samples` and feedback 0.5.
    pub fn new(delay_samples: usize) -> Self {
        Self {
            ring: RingDelay::new(delay_samples),
            feedback: DEFAULT_ALLPASS_FEEDBACK,
        }
    }

    /// Set the feedback coefficient, clamped to `(-1, 1)` for stability.
    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback = feedback.clamp(-0.99, 0.99);
    }

    /// Current feedback coefficient.
    pub fn feedback(&self) -> f32 {
        self.feedback
    }

    /// Process one sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let delayed = self.ring.front();
        self.ring.push(flush_denormal(input + delayed * self.feedback));
        delayed - input
    }

    /// Silence the ring.
    pub fn clear(&mut self) {
        self.ring.clear();
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impulse_response_shape() {
        let mut ap = AllpassFilter::new(4);
        assert_eq!(ap.process(1.0), -1.0);
        for _ in 0..3 {
            assert_eq!(ap.process(0.0), 0.0);
        }
        // Delayed impulse emerges unscaled.
        assert_eq!(ap.process(0.0), 1.0);
        for _ in 0..3 {
            assert_eq!(ap.process(0.0), 0.0);
        }
        assert_eq!(ap.process(0.0), 0.5);
    }

    #[test]
    fn output_stays_finite() {
        let mut ap = AllpassFilter::new(100);
        for i in 0..10_000 {
            let x = if i % 37 == 0 { 1.0 } else { -0.25 };
            assert!(ap.process(x).is_finite());
        }
    }

    #[test]
    fn feedback_is_clamped() {
        let mut ap = AllpassFilter::new(10);
        ap.set_feedback(1.5);
        assert_eq!(ap.feedback(), 0.99);
        ap.set_feedback(-3.0);
        assert_eq!(ap.feedback(), -0.99);
        assert_eq!(ap.len(), 10);
    }
}
