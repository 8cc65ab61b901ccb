//! VOID: fully wet reverb.

use abyssal_core::{AudioBlock, ProcessSetup, Stage};

use crate::{Reverb, ReverbParams};

/// Default damping of the VOID reverb.
pub const DEFAULT_DAMPING: f32 = 0.5;
/// Default stereo width of the VOID reverb.
pub const DEFAULT_WIDTH: f32 = 1.0;

/// Reverb stage driven by room size.
///
/// The reverb runs fully wet (wet 1, dry 0) with room size equal to the
/// control value. Damping and width are fixed at construction. Zero skips the
/// stage and leaves the tail where it was.
#[derive(Debug, Clone)]
pub struct Void {
    reverb: Reverb,
}

impl Default for Void {
    fn default() -> Self {
        Self::new(DEFAULT_DAMPING, DEFAULT_WIDTH)
    }
}

impl Void {
    /// Create the stage with fixed `damping` and `width`.
    ///
    /// The reverb is sized for 44.1 kHz until [`Stage::prepare`] runs.
    pub fn new(damping: f32, width: f32) -> Self {
        let mut reverb = Reverb::new(44100.0);
        reverb.set_params(ReverbParams {
            room_size: 0.0,
            damping,
            wet_level: 1.0,
            dry_level: 0.0,
            width,
        });
        reverb.reset();
        Self { reverb }
    }

    /// The underlying reverb.
    pub fn reverb(&self) -> &Reverb {
        &self.reverb
    }
}

impl Stage for Void {
    fn prepare(&mut self, setup: &ProcessSetup) {
        self.reverb.set_sample_rate(setup.sample_rate);
    }

    fn reset(&mut self) {
        self.reverb.reset();
    }

    fn process_in_place(&mut self, block: &mut AudioBlock<'_>, amount: f32) {
        if amount <= 0.0 {
            return;
        }
        self.reverb.set_room_size(amount);
        match block.split_mut() {
            (left, Some(right)) => self.reverb.process_stereo(left, right),
            (mono, None) => self.reverb.process_mono(mono),
        }
    }
}
