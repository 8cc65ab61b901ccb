//! Property-based tests for abyssal-core DSP primitives.
//!
//! Tests delay line integrity, filter stability, phase wrapping and the
//! waveshaping/quantization helpers using proptest for randomized inputs.

use abyssal_core::{
    DelayLine, PhaseAccumulator, SmoothedParam, StateVariableFilter, quantize, saturate,
};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// An impulse written at an arbitrary cursor position comes back after
    /// exactly `d` advances, and again every `d` frames scaled by `fb^n`.
    #[test]
    fn delay_impulse_round_trip(
        capacity in 2usize..2048,
        delay_frac in 0.0f32..1.0,
        offset in 0usize..4096,
        amplitude in -1.0f32..=1.0,
        feedback in 0.0f32..0.9,
    ) {
        let delay = ((capacity as f32 * delay_frac) as usize).clamp(1, capacity);
        let mut line = DelayLine::new();
        line.resize(1, capacity);
        for _ in 0..offset {
            line.advance();
        }
        let start = line.cursor();

        let mut reads = Vec::with_capacity(3 * delay + 1);
        for frame in 0..=(3 * delay) {
            let input = if frame == 0 { amplitude } else { 0.0 };
            let delayed = line.read(0, delay);
            line.write(0, input + delayed * feedback);
            line.advance();
            reads.push(delayed);
        }

        prop_assert_eq!(start, offset % capacity);
        prop_assert_eq!(reads[delay], amplitude);
        let second = amplitude * feedback;
        let third = second * feedback;
        prop_assert!((reads[2 * delay] - second).abs() < 1e-6);
        prop_assert!((reads[3 * delay] - third).abs() < 1e-6);
        for (frame, &value) in reads.iter().enumerate() {
            if frame % delay != 0 || frame == 0 {
                prop_assert_eq!(value, 0.0, "unexpected echo at frame {}", frame);
            }
        }
    }

    /// The cursor never leaves `[0, capacity)`.
    #[test]
    fn delay_cursor_in_range(capacity in 1usize..512, steps in 0usize..5000) {
        let mut line = DelayLine::new();
        line.resize(2, capacity);
        for _ in 0..steps {
            line.advance();
            prop_assert!(line.cursor() < capacity);
        }
    }

    /// For any cutoff the tone stage can request, the SVF stays finite and
    /// bounded on bounded input.
    #[test]
    fn svf_stability(
        obscura in 0.0f32..=1.0,
        sample_rate in prop::sample::select(vec![22050.0f32, 44100.0, 48000.0, 96000.0]),
        input in prop::array::uniform32(-1.0f32..=1.0f32),
    ) {
        let mut svf = StateVariableFilter::new(sample_rate);
        svf.set_cutoff(20.0 * 1000.0f32.powf(obscura));
        for _ in 0..32 {
            for &sample in &input {
                let y = svf.process(sample);
                prop_assert!(y.is_finite());
                prop_assert!(y.abs() < 4.0, "output {} out of bounds", y);
            }
        }
    }

    /// Phase stays in `[0, 2π)` for every rate the tremor stage uses.
    #[test]
    fn phase_wrap_invariant(
        rate in 0.5f32..=10.5,
        sample_rate in 8000.0f32..192000.0,
        steps in 0usize..20000,
    ) {
        let mut osc = PhaseAccumulator::new();
        osc.set_sample_rate(sample_rate);
        osc.set_frequency(rate);
        for _ in 0..steps {
            let s = osc.next_sine();
            prop_assert!((-1.0..=1.0).contains(&s));
            prop_assert!(osc.phase() >= 0.0 && osc.phase() < std::f32::consts::TAU);
        }
    }

    /// Saturation is bounded for any drive the corruption stage produces.
    #[test]
    fn saturate_bounded(x in -1.0f32..=1.0, drive in 1.0f32..=11.0) {
        let y = saturate(x, drive);
        prop_assert!((-1.0..=1.0).contains(&y));
        prop_assert!(y.abs() <= (x * drive).abs() + 1e-7);
    }

    /// Quantization is idempotent for a fixed step count.
    #[test]
    fn quantize_idempotent(x in -1.5f32..=1.5, steps in 4.0f32..=64.0) {
        let once = quantize(x, steps);
        prop_assert_eq!(quantize(once, steps), once);
    }

    /// Smoothed parameters approach the target monotonically.
    #[test]
    fn smoothing_is_monotonic(
        start in 0.0f32..=1.0,
        target in 0.0f32..=1.0,
        time_ms in 1.0f32..50.0,
    ) {
        let mut param = SmoothedParam::with_config(start, 48000.0, time_ms);
        param.set_target(target);
        let mut distance = (target - start).abs();
        for _ in 0..1000 {
            let v = param.advance();
            let d = (target - v).abs();
            prop_assert!(d <= distance + 1e-7);
            distance = d;
        }
    }
}
