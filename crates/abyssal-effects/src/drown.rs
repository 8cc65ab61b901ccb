//! Drown: the final blend of the untouched input with the processed signal.
//!
//! Drown is not a [`Stage`](abyssal_core::Stage): it needs the dry copy taken
//! before the chain ran, so the chain calls [`blend`] per channel.

use abyssal_core::wet_dry_mix;

/// Blend `processed` toward `dry` in place.
///
/// `out = dry · (1 - drown) + processed · drown`. At 0 the output is the dry
/// input bit for bit, at 1 it is the processed signal bit for bit. Extra
/// samples on either side are left alone.
pub fn blend(dry: &[f32], processed: &mut [f32], drown: f32) {
    for (out, &d) in processed.iter_mut().zip(dry) {
        *out = wet_dry_mix(d, *out, drown);
    }
}
