//! Whispers: fixed-time feedback delay.

use abyssal_core::{AudioBlock, DelayLine, ProcessSetup, Stage};

/// Feedback at full whispers.
pub const MAX_FEEDBACK: f32 = 0.9;
/// Default buffer length in seconds.
pub const DEFAULT_MAX_DELAY_SECONDS: f32 = 2.0;
/// Default echo time in seconds.
pub const DEFAULT_DELAY_SECONDS: f32 = 0.5;

/// Delay line channels. A mono stream still feeds both.
const DELAY_CHANNELS: usize = 2;

/// Feedback delay stage.
///
/// Per frame: read the sample from a fixed delay behind the cursor, add it
/// to the output, write `input + delayed · (whispers · 0.9)` at the cursor,
/// advance. The echo time never changes with the control; only feedback
/// (and so the audible amount) does. Zero bypasses and the cursor holds.
///
/// The line always has two channels. With a mono block the second channel is
/// fed the same input, so its history stays valid if the host later prepares
/// for stereo without a reset in between.
#[derive(Debug, Clone)]
pub struct Whispers {
    line: DelayLine,
    max_delay_seconds: f32,
    delay_seconds: f32,
    delay_samples: usize,
}

impl Default for Whispers {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DELAY_SECONDS, DEFAULT_DELAY_SECONDS)
    }
}

impl Whispers {
    /// Create a stage with a `max_delay_seconds` buffer and a fixed
    /// `delay_seconds` echo. Buffers are sized in [`Stage::prepare`].
    pub fn new(max_delay_seconds: f32, delay_seconds: f32) -> Self {
        Self {
            line: DelayLine::new(),
            max_delay_seconds,
            delay_seconds,
            delay_samples: 1,
        }
    }

    /// Feedback amount for a whispers value.
    #[inline]
    pub fn feedback(amount: f32) -> f32 {
        amount * MAX_FEEDBACK
    }

    /// Echo time in samples at the prepared rate.
    pub fn delay_samples(&self) -> usize {
        self.delay_samples
    }

    /// Buffer capacity per channel in samples.
    pub fn capacity(&self) -> usize {
        self.line.capacity()
    }

    /// Write cursor of the delay line.
    pub fn cursor(&self) -> usize {
        self.line.cursor()
    }
}

impl Stage for Whispers {
    fn prepare(&mut self, setup: &ProcessSetup) {
        let capacity = (libm::ceilf(setup.sample_rate * self.max_delay_seconds) as usize).max(1);
        self.line.resize(DELAY_CHANNELS, capacity);
        self.delay_samples = ((setup.sample_rate * self.delay_seconds) as usize).clamp(1, capacity);
    }

    fn reset(&mut self) {
        self.line.clear();
    }

    fn process_in_place(&mut self, block: &mut AudioBlock<'_>, amount: f32) {
        if amount <= 0.0 {
            return;
        }
        let feedback = Self::feedback(amount);
        let delay = self.delay_samples;

        let (left, mut right) = block.split_mut();
        for (i, sample) in left.iter_mut().enumerate() {
            let in_l = *sample;
            let in_r = right.as_ref().map_or(in_l, |r| r[i]);

            let delayed_l = self.line.read(0, delay);
            let delayed_r = self.line.read(1, delay);

            *sample += delayed_l;
            if let Some(right) = right.as_mut() {
                right[i] += delayed_r;
            }

            self.line.write(0, in_l + delayed_l * feedback);
            self.line.write(1, in_r + delayed_r * feedback);
            self.line.advance();
        }
    }
}
