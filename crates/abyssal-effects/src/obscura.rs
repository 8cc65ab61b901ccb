//! Obscura: the always-on tone filter.

use abyssal_core::{AudioBlock, ProcessSetup, Stage, StateVariableFilter};
use libm::powf;

/// Cutoff at obscura = 0.
const MIN_CUTOFF_HZ: f32 = 20.0;
/// Ratio between the cutoff at obscura = 1 and at obscura = 0.
const CUTOFF_SPAN: f32 = 1000.0;

/// Low-pass tone stage with an exponential cutoff map.
///
/// `cutoff = 20 · 1000^obscura` Hz: 0 is fully dark (20 Hz), 1 is open
/// (20 kHz, clamped below Nyquist). Zero means dark, not off, so the filter
/// runs on every block.
#[derive(Debug, Clone, Default)]
pub struct Obscura {
    filters: [StateVariableFilter; 2],
}

impl Obscura {
    /// Create the stage. Call [`Stage::prepare`] before processing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cutoff frequency in Hz for an obscura amount.
    #[inline]
    pub fn cutoff_hz(amount: f32) -> f32 {
        MIN_CUTOFF_HZ * powf(CUTOFF_SPAN, amount)
    }

    /// Cutoff currently applied (after clamping to the sample rate).
    pub fn current_cutoff(&self) -> f32 {
        self.filters[0].cutoff()
    }
}

impl Stage for Obscura {
    fn prepare(&mut self, setup: &ProcessSetup) {
        for filter in &mut self.filters {
            filter.set_sample_rate(setup.sample_rate);
            filter.reset();
        }
    }

    fn reset(&mut self) {
        for filter in &mut self.filters {
            filter.reset();
        }
    }

    fn process_in_place(&mut self, block: &mut AudioBlock<'_>, amount: f32) {
        let cutoff = Self::cutoff_hz(amount);
        for (filter, channel) in self.filters.iter_mut().zip(block.channels_mut()) {
            filter.set_cutoff(cutoff);
            for sample in channel.iter_mut() {
                *sample = filter.process(*sample);
            }
        }
    }
}
