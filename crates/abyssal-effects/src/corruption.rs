//! Corruption: `tanh` saturation.

use abyssal_core::{AudioBlock, ProcessSetup, Stage, saturate};

/// Extra drive added at full corruption.
const DRIVE_RANGE: f32 = 10.0;

/// Soft-clipping distortion stage.
///
/// `y = tanh(x · (1 + corruption · 10))`. At exactly zero the stage does
/// nothing: `tanh(x)` at unity drive would still color the signal.
#[derive(Debug, Clone, Default)]
pub struct Corruption;

impl Corruption {
    /// Create the stage. It has no state.
    pub fn new() -> Self {
        Self
    }

    /// Drive factor for a corruption amount.
    #[inline]
    pub fn drive(amount: f32) -> f32 {
        1.0 + amount * DRIVE_RANGE
    }
}

impl Stage for Corruption {
    fn prepare(&mut self, _setup: &ProcessSetup) {}

    fn reset(&mut self) {}

    fn process_in_place(&mut self, block: &mut AudioBlock<'_>, amount: f32) {
        if amount <= 0.0 {
            return;
        }
        let drive = Self::drive(amount);
        for channel in block.channels_mut() {
            for sample in channel.iter_mut() {
                *sample = saturate(*sample, drive);
            }
        }
    }
}
