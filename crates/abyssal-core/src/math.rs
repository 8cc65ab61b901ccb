//! Mathematical utility functions for DSP.
//!
//! All functions are allocation-free and suitable for `no_std`.
//!
//! # Waveshaping
//!
//! - [`saturate`] - `tanh` soft saturation with a linear drive factor
//!
//! # Quantization
//!
//! - [`quantize`] - Amplitude quantization to a fixed number of steps
//!
//! # Utilities
//!
//! - [`wet_dry_mix`] - Crossfade with exact endpoints
//! - [`flush_denormal`] - Denormal protection for feedback paths

use libm::{roundf, tanhf};

/// Soft saturation: `tanh(x · drive)`.
///
/// Output is bounded to `[-1, 1]` for any finite input.
///
/// # Example
///
/// ```rust
/// use abyssal_core::saturate;
///
/// assert!(saturate(10.0, 11.0) <= 1.0);
/// assert_eq!(saturate(0.0, 4.0), 0.0);
/// ```
#[inline]
pub fn saturate(x: f32, drive: f32) -> f32 {
    tanhf(x * drive)
}

/// Quantize to `round(x · steps) / steps`.
///
/// Idempotent for a fixed `steps`: a value already on the grid maps to itself.
///
/// # Example
///
/// ```rust
/// use abyssal_core::quantize;
///
/// assert_eq!(quantize(0.3, 4.0), 0.25);
/// assert_eq!(quantize(quantize(0.3, 4.0), 4.0), 0.25);
/// ```
#[inline]
pub fn quantize(x: f32, steps: f32) -> f32 {
    roundf(x * steps) / steps
}

/// Crossfade between dry and wet signals: `dry · (1 - mix) + wet · mix`.
///
/// Written in the two-product form so `mix = 0` returns `dry` and `mix = 1`
/// returns `wet` bit for bit.
#[inline]
pub fn wet_dry_mix(dry: f32, wet: f32, mix: f32) -> f32 {
    dry * (1.0 - mix) + wet * mix
}

/// Flush denormal (subnormal) values to zero.
///
/// Replaces values below 1e-20 with zero, well before the IEEE 754 subnormal
/// range. Use in feedback loops (combs, allpasses, filter integrators) where a
/// signal can decay toward zero indefinitely.
#[allow(clippy::inline_always)]
#[inline(always)]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}
