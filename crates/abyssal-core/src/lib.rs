//! Abyssal Core - DSP primitives for the Abyssal Gaze processor
//!
//! This crate provides the building blocks the effect stages are made of,
//! designed for real-time processing with zero allocation in the audio path.
//!
//! # Core Abstractions
//!
//! ## Blocks and Stages
//!
//! - [`AudioBlock`] - Mono or stereo channel slices processed in place
//! - [`ChannelLayout`] / [`ProcessSetup`] - Stream configuration handed to `prepare`
//! - [`Stage`] - Trait implemented by every stage of the effects chain
//!
//! ## Parameter Smoothing
//!
//! - [`SmoothedParam`] - Exponential smoothing (RC-like response)
//!
//! ## Filters
//!
//! - [`StateVariableFilter`] - TPT state-variable low-pass
//! - [`CombFilter`] - Damped feedback comb for reverb algorithms
//! - [`AllpassFilter`] - Schroeder allpass for diffusion
//!
//! ## Delay Lines
//!
//! - [`DelayLine`] - Multi-channel circular buffer with a shared write cursor
//! - [`RingDelay`] - Single-channel fixed-length ring used by combs and allpasses
//!
//! ## Modulation
//!
//! - [`PhaseAccumulator`] - Radian phase wrapped into `[0, 2π)`
//!
//! ## Parameter Metadata
//!
//! - [`ParamDescriptor`], [`ParamId`], [`ParamFlags`], [`ParamUnit`]
//!
//! ## Utilities
//!
//! - [`saturate`], [`quantize`], [`wet_dry_mix`], [`flush_denormal`]
//!
//! # no_std Support
//!
//! Disable the default `std` feature to build for embedded targets:
//!
//! ```toml
//! [dependencies]
//! abyssal-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: allocation happens in `prepare`, never in `process_in_place`
//! - **No dependencies on std**: `libm` for math
//! - **State continuity**: every primitive carries its state across blocks

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod allpass;
pub mod block;
pub mod comb;
pub mod delay;
pub mod math;
pub mod param;
pub mod param_info;
pub mod phase;
pub mod stage;
pub mod svf;

pub use allpass::AllpassFilter;
pub use block::{AudioBlock, ChannelLayout, ProcessSetup};
pub use comb::CombFilter;
pub use delay::{DelayLine, RingDelay};
pub use math::{flush_denormal, quantize, saturate, wet_dry_mix};
pub use param::SmoothedParam;
pub use param_info::{ParamDescriptor, ParamFlags, ParamId, ParamUnit};
pub use phase::PhaseAccumulator;
pub use stage::Stage;
pub use svf::StateVariableFilter;
