//! Abyssal Effects - the stages of the Abyssal Gaze chain
//!
//! Each stage implements [`abyssal_core::Stage`] and is driven by one
//! normalized control value per block:
//!
//! - [`Corruption`] - `tanh` saturation, drive `1 + c·10`
//! - [`Obscura`] - always-on low-pass, cutoff `20 · 1000^o` Hz
//! - [`Erosion`] - amplitude quantization, `4 + (1-e)·60` steps
//! - [`Tremor`] - sine amplitude modulation at `0.5 + t·10` Hz
//! - [`Whispers`] - fixed 500 ms feedback delay, feedback `w · 0.9`
//! - [`Void`] - fully wet stereo [`Reverb`] with room size `v`
//! - [`drown`] - final dry/processed blend
//!
//! Every stage except [`Obscura`] is skipped entirely at a control value of
//! exactly zero.
//!
//! ## Example
//!
//! ```rust
//! use abyssal_core::{AudioBlock, ChannelLayout, ProcessSetup, Stage};
//! use abyssal_effects::{Corruption, Obscura};
//!
//! let setup = ProcessSetup::new(48000.0, 256, ChannelLayout::Mono);
//! let mut corruption = Corruption::new();
//! let mut obscura = Obscura::new();
//! corruption.prepare(&setup);
//! obscura.prepare(&setup);
//!
//! let mut samples = [0.25_f32; 256];
//! let mut block = AudioBlock::mono(&mut samples);
//! corruption.process_in_place(&mut block, 0.5);
//! obscura.process_in_place(&mut block, 0.8);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod corruption;
pub mod drown;
pub mod erosion;
pub mod obscura;
pub mod reverb;
pub mod tremor;
pub mod void;
pub mod whispers;

pub use corruption::Corruption;
pub use erosion::Erosion;
pub use obscura::Obscura;
pub use reverb::{Reverb, ReverbParams};
pub use tremor::Tremor;
pub use void::Void;
pub use whispers::Whispers;
