//! Output level metering.
//!
//! The audio thread measures each block's RMS across all channels and
//! publishes a smoothed level through a shared atomic. Rises are taken
//! immediately; falls decay with a one-pole release.

use std::sync::atomic::{AtomicU32, Ordering};

/// Shared, lock-free view of the output level.
#[derive(Debug, Default)]
pub struct LevelMeter {
    level: AtomicU32,
}

impl LevelMeter {
    /// Create a meter reading zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Smoothed RMS level, linear.
    #[inline]
    pub fn level(&self) -> f32 {
        f32::from_bits(self.level.load(Ordering::Relaxed))
    }

    /// Smoothed level in dBFS, floored at -120.
    pub fn level_db(&self) -> f32 {
        let level = self.level();
        if level <= 1e-6 {
            -120.0
        } else {
            20.0 * level.log10()
        }
    }

    fn publish(&self, level: f32) {
        self.level.store(level.to_bits(), Ordering::Relaxed);
    }
}

/// Audio-thread side of the meter: the release filter.
#[derive(Debug, Clone)]
pub(crate) struct MeterBallistics {
    release_ms: f32,
    sample_rate: f32,
    value: f32,
}

impl MeterBallistics {
    pub(crate) fn new(release_ms: f32) -> Self {
        Self {
            release_ms,
            sample_rate: 48000.0,
            value: 0.0,
        }
    }

    pub(crate) fn prepare(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.value = 0.0;
    }

    pub(crate) fn reset(&mut self, meter: &LevelMeter) {
        self.value = 0.0;
        meter.publish(0.0);
    }

    /// Measure `channels` and publish the new smoothed level.
    pub(crate) fn update<'a>(
        &mut self,
        meter: &LevelMeter,
        channels: impl IntoIterator<Item = &'a [f32]>,
    ) {
        let mut sum = 0.0_f64;
        let mut count = 0_usize;
        let mut frames = 0_usize;
        for channel in channels {
            sum += channel.iter().map(|&s| f64::from(s) * f64::from(s)).sum::<f64>();
            count += channel.len();
            frames = frames.max(channel.len());
        }
        if count == 0 {
            return;
        }

        let rms = (sum / count as f64).sqrt() as f32;
        let release_samples = self.release_ms * 0.001 * self.sample_rate;
        let coeff = (-(frames as f32) / release_samples.max(1.0)).exp();

        self.value = if rms >= self.value {
            rms
        } else {
            rms + (self.value - rms) * coeff
        };
        meter.publish(self.value);
    }
}
