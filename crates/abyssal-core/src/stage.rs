//! The [`Stage`] trait implemented by every step of the effects chain.
//!
//! ## Design Decisions
//!
//! - **Block processing**: stages see a whole [`AudioBlock`] because the
//!   control value is read once per block and some stages couple channels
//!   (the reverb mixes left and right).
//!
//! - **Prepare allocates, process does not**: `prepare` is the only place a
//!   stage may size buffers. `process_in_place` and `reset` are real-time safe.
//!
//! - **Object-safe**: the chain owns concrete stages, but `dyn Stage` works
//!   for tests and tools that want to drive a stage generically.

use crate::{AudioBlock, ProcessSetup};

/// One step of the effects chain.
///
/// # Example
///
/// ```rust
/// use abyssal_core::{AudioBlock, ProcessSetup, Stage};
///
/// struct Gain;
///
/// impl Stage for Gain {
///     fn prepare(&mut self, _setup: &ProcessSetup) {}
///
///     fn reset(&mut self) {}
///
///     fn process_in_place(&mut self, block: &mut AudioBlock<'_>, control: f32) {
///         for channel in block.channels_mut() {
///             channel.iter_mut().for_each(|s| *s *= control);
///         }
///     }
/// }
/// ```
pub trait Stage {
    /// Size internal buffers and coefficients for a new stream configuration.
    ///
    /// Must be called before the first block and whenever sample rate,
    /// block size or layout changes. Clears all state.
    fn prepare(&mut self, setup: &ProcessSetup);

    /// Clear state to silence and zero phase without reallocating.
    fn reset(&mut self);

    /// Process one block in place.
    ///
    /// `control` is the stage's normalized parameter in `[0, 1]`, read once
    /// for the whole block.
    fn process_in_place(&mut self, block: &mut AudioBlock<'_>, control: f32);
}
