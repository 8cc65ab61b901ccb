//! Tremor: sine amplitude modulation.

use abyssal_core::{AudioBlock, PhaseAccumulator, ProcessSetup, Stage};

/// Rate at the lowest non-zero setting.
const MIN_RATE_HZ: f32 = 0.5;
/// Rate added at full tremor.
const RATE_RANGE_HZ: f32 = 10.0;

/// Tremolo stage.
///
/// Gain is `0.5 + 0.5 · sin(phase)` at `0.5 + tremor · 10` Hz, shared by
/// both channels. The phase only advances while the stage runs: at zero the
/// stage is skipped and the phase holds where it stopped.
#[derive(Debug, Clone, Default)]
pub struct Tremor {
    osc: PhaseAccumulator,
}

impl Tremor {
    /// Create the stage at zero phase.
    pub fn new() -> Self {
        Self::default()
    }

    /// Modulation rate in Hz for a tremor amount.
    #[inline]
    pub fn rate_hz(amount: f32) -> f32 {
        MIN_RATE_HZ + amount * RATE_RANGE_HZ
    }

    /// Oscillator phase in radians, always in `[0, 2π)`.
    pub fn phase(&self) -> f32 {
        self.osc.phase()
    }
}

impl Stage for Tremor {
    fn prepare(&mut self, setup: &ProcessSetup) {
        self.osc.set_sample_rate(setup.sample_rate);
        self.osc.reset();
    }

    fn reset(&mut self) {
        self.osc.reset();
    }

    fn process_in_place(&mut self, block: &mut AudioBlock<'_>, amount: f32) {
        if amount <= 0.0 {
            return;
        }
        self.osc.set_frequency(Self::rate_hz(amount));

        let (left, mut right) = block.split_mut();
        for (i, sample) in left.iter_mut().enumerate() {
            let gain = 0.5 + 0.5 * self.osc.next_sine();
            *sample *= gain;
            if let Some(right) = right.as_mut() {
                right[i] *= gain;
            }
        }
    }
}
