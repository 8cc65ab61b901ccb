//! Freeverb-style stereo reverberator.
//!
//! Eight damped comb filters in parallel feed four allpasses in series, one
//! bank per channel. The right bank's delays are 23 samples longer than the
//! left's so the two tails decorrelate.
//!
//! Feedback, damping and the three output gains glide toward new settings
//! with a 10 ms [`SmoothedParam`], so block-rate room-size changes do not
//! click.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use abyssal_core::{AllpassFilter, CombFilter, SmoothedParam};
use alloc::vec::Vec;

/// Freeverb comb delay times at 44.1 kHz.
const COMB_TUNINGS_44K: [usize; 8] = [1116, 1188, 1277, 1356, 1422, 1491, 1557, 1617];

/// Freeverb allpass delay times at 44.1 kHz.
const ALLPASS_TUNINGS_44K: [usize; 4] = [556, 441, 341, 225];

/// Extra delay, in samples at 44.1 kHz, of the right channel bank.
const STEREO_SPREAD: usize = 23;

/// Reference rate of the tuning tables.
const REFERENCE_RATE: u64 = 44100;

const INPUT_GAIN: f32 = 0.015;
const WET_SCALE: f32 = 3.0;
const DRY_SCALE: f32 = 2.0;
const ROOM_SCALE: f32 = 0.28;
const ROOM_OFFSET: f32 = 0.7;
const DAMP_SCALE: f32 = 0.4;
const SMOOTHING_MS: f32 = 10.0;

/// Scale a 44.1 kHz tuning to `sample_rate` with integer arithmetic.
fn scale_to_rate(samples: usize, sample_rate: f32) -> usize {
    let rate = sample_rate.max(1.0) as u64;
    ((rate * samples as u64) / REFERENCE_RATE).max(1) as usize
}

/// Reverb settings, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReverbParams {
    /// Tail length: comb feedback `room_size · 0.28 + 0.7`.
    pub room_size: f32,
    /// High-frequency absorption in the comb loops.
    pub damping: f32,
    /// Reverberated signal level.
    pub wet_level: f32,
    /// Direct signal level.
    pub dry_level: f32,
    /// Stereo width: 1 keeps the banks separate, 0 sums them.
    pub width: f32,
}

impl Default for ReverbParams {
    fn default() -> Self {
        Self {
            room_size: 0.5,
            damping: 0.5,
            wet_level: 0.33,
            dry_level: 0.4,
            width: 1.0,
        }
    }
}

impl ReverbParams {
    fn clamped(self) -> Self {
        Self {
            room_size: self.room_size.clamp(0.0, 1.0),
            damping: self.damping.clamp(0.0, 1.0),
            wet_level: self.wet_level.clamp(0.0, 1.0),
            dry_level: self.dry_level.clamp(0.0, 1.0),
            width: self.width.clamp(0.0, 1.0),
        }
    }
}

/// Stereo Freeverb.
///
/// # Example
///
/// ```rust
/// use abyssal_effects::{Reverb, ReverbParams};
///
/// let mut reverb = Reverb::new(48000.0);
/// reverb.set_params(ReverbParams { room_size: 0.8, wet_level: 1.0, dry_level: 0.0, ..ReverbParams::default() });
///
/// let mut left = [0.0_f32; 256];
/// let mut right = [0.0_f32; 256];
/// left[0] = 1.0;
/// reverb.process_stereo(&mut left, &mut right);
/// ```
#[derive(Debug, Clone)]
pub struct Reverb {
    combs: [Vec<CombFilter>; 2],
    allpasses: [Vec<AllpassFilter>; 2],

    params: ReverbParams,
    feedback: SmoothedParam,
    damping: SmoothedParam,
    dry_gain: SmoothedParam,
    wet_gain_1: SmoothedParam,
    wet_gain_2: SmoothedParam,

    sample_rate: f32,
}

impl Reverb {
    /// Create a reverb sized for `sample_rate` with default settings.
    pub fn new(sample_rate: f32) -> Self {
        let mut reverb = Self {
            combs: [Vec::new(), Vec::new()],
            allpasses: [Vec::new(), Vec::new()],
            params: ReverbParams::default(),
            feedback: SmoothedParam::new(0.0),
            damping: SmoothedParam::new(0.0),
            dry_gain: SmoothedParam::new(0.0),
            wet_gain_1: SmoothedParam::new(0.0),
            wet_gain_2: SmoothedParam::new(0.0),
            sample_rate,
        };
        reverb.set_sample_rate(sample_rate);
        reverb
    }

    /// Resize every comb and allpass for a new rate and clear the tail.
    ///
    /// Allocates; call from prepare, not from the audio callback.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;

        for (channel, spread) in [0, STEREO_SPREAD].into_iter().enumerate() {
            self.combs[channel] = COMB_TUNINGS_44K
                .iter()
                .map(|&t| CombFilter::new(scale_to_rate(t + spread, sample_rate)))
                .collect();
            self.allpasses[channel] = ALLPASS_TUNINGS_44K
                .iter()
                .map(|&t| AllpassFilter::new(scale_to_rate(t + spread, sample_rate)))
                .collect();
        }

        for param in self.smoothed_mut() {
            *param = SmoothedParam::with_config(param.target(), sample_rate, SMOOTHING_MS);
        }
        self.apply_params();
        for param in self.smoothed_mut() {
            param.snap_to_target();
        }
    }

    /// Current sample rate.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Replace all settings. Values are clamped to `[0, 1]`.
    pub fn set_params(&mut self, params: ReverbParams) {
        self.params = params.clamped();
        self.apply_params();
    }

    /// Current settings.
    pub fn params(&self) -> ReverbParams {
        self.params
    }

    /// Change only the room size.
    pub fn set_room_size(&mut self, room_size: f32) {
        self.set_params(ReverbParams {
            room_size,
            ..self.params
        });
    }

    /// Clear every delay and settle the smoothed gains.
    pub fn reset(&mut self) {
        for bank in &mut self.combs {
            for comb in bank.iter_mut() {
                comb.clear();
            }
        }
        for bank in &mut self.allpasses {
            for allpass in bank.iter_mut() {
                allpass.clear();
            }
        }
        for param in self.smoothed_mut() {
            param.snap_to_target();
        }
    }

    /// Process two channels in place.
    pub fn process_stereo(&mut self, left: &mut [f32], right: &mut [f32]) {
        let [combs_l, combs_r] = &mut self.combs;
        let [allpasses_l, allpasses_r] = &mut self.allpasses;

        for (l, r) in left.iter_mut().zip(right.iter_mut()) {
            let input = (*l + *r) * INPUT_GAIN;
            let damp = self.damping.advance();
            let feedback = self.feedback.advance();

            let mut out_l = 0.0;
            let mut out_r = 0.0;
            for (comb_l, comb_r) in combs_l.iter_mut().zip(combs_r.iter_mut()) {
                out_l += comb_l.process(input, feedback, damp);
                out_r += comb_r.process(input, feedback, damp);
            }
            for (ap_l, ap_r) in allpasses_l.iter_mut().zip(allpasses_r.iter_mut()) {
                out_l = ap_l.process(out_l);
                out_r = ap_r.process(out_r);
            }

            let dry = self.dry_gain.advance();
            let wet_1 = self.wet_gain_1.advance();
            let wet_2 = self.wet_gain_2.advance();

            *l = out_l * wet_1 + out_r * wet_2 + *l * dry;
            *r = out_r * wet_1 + out_l * wet_2 + *r * dry;
        }
    }

    /// Process one channel in place using the left bank.
    pub fn process_mono(&mut self, samples: &mut [f32]) {
        for sample in samples.iter_mut() {
            let input = *sample * INPUT_GAIN;
            let damp = self.damping.advance();
            let feedback = self.feedback.advance();

            let mut out = 0.0;
            for comb in &mut self.combs[0] {
                out += comb.process(input, feedback, damp);
            }
            for allpass in &mut self.allpasses[0] {
                out = allpass.process(out);
            }

            let dry = self.dry_gain.advance();
            let wet_1 = self.wet_gain_1.advance();
            // Keeps the unused gain in step for a later stereo block.
            self.wet_gain_2.advance();

            *sample = out * wet_1 + *sample * dry;
        }
    }

    fn apply_params(&mut self) {
        let p = self.params;
        let wet = p.wet_level * WET_SCALE;
        self.dry_gain.set_target(p.dry_level * DRY_SCALE);
        self.wet_gain_1.set_target(0.5 * wet * (1.0 + p.width));
        self.wet_gain_2.set_target(0.5 * wet * (1.0 - p.width));
        self.damping.set_target(p.damping * DAMP_SCALE);
        self.feedback.set_target(p.room_size * ROOM_SCALE + ROOM_OFFSET);
    }

    fn smoothed_mut(&mut self) -> [&mut SmoothedParam; 5] {
        [
            &mut self.feedback,
            &mut self.damping,
            &mut self.dry_gain,
            &mut self.wet_gain_1,
            &mut self.wet_gain_2,
        ]
    }
}
