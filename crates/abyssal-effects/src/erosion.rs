//! Erosion: amplitude quantization.

use abyssal_core::{AudioBlock, ProcessSetup, Stage, quantize};

/// Coarsest grid, reached as erosion approaches 1.
const MIN_STEPS: f32 = 4.0;
/// Steps added back as erosion falls toward 0.
const STEP_RANGE: f32 = 60.0;

/// Bit-reduction stage.
///
/// Each sample becomes `round(x · steps) / steps` with
/// `steps = 4 + (1 - erosion) · 60`: 64 steps when barely engaged, 4 when
/// fully eroded. Zero bypasses.
#[derive(Debug, Clone, Default)]
pub struct Erosion;

impl Erosion {
    /// Create the stage. It has no state.
    pub fn new() -> Self {
        Self
    }

    /// Quantization steps for an erosion amount.
    #[inline]
    pub fn steps(amount: f32) -> f32 {
        MIN_STEPS + (1.0 - amount) * STEP_RANGE
    }
}

impl Stage for Erosion {
    fn prepare(&mut self, _setup: &ProcessSetup) {}

    fn reset(&mut self) {}

    fn process_in_place(&mut self, block: &mut AudioBlock<'_>, amount: f32) {
        if amount <= 0.0 {
            return;
        }
        let steps = Self::steps(amount);
        for channel in block.channels_mut() {
            for sample in channel.iter_mut() {
                *sample = quantize(*sample, steps);
            }
        }
    }
}
