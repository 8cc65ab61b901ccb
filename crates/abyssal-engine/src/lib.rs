//! Abyssal Engine - the real-time host of the Abyssal Gaze chain
//!
//! Ties the stages from `abyssal-effects` into a processor a host can drive:
//!
//! - [`Engine`] - prepare, process blocks, meter, save and restore state
//! - [`ParameterStore`] - lock-free parameter values with change listeners
//! - [`PresetDispatcher`] / [`ControlRunner`] - preset selection applied off
//!   the audio thread
//! - [`EffectsChain`] - the fixed stage order
//! - [`EngineConfig`] - TOML configuration
//!
//! ## Threading
//!
//! The audio thread owns the [`Engine`] and calls
//! [`process_block`](Engine::process_block). Everything it shares with other
//! threads is an atomic: parameter values, the meter level and the preset
//! mailbox. Nothing on the audio path locks, allocates or logs.
//!
//! ## Example
//!
//! ```rust
//! use abyssal_core::ChannelLayout;
//! use abyssal_engine::{Engine, EngineConfig};
//!
//! let mut engine = Engine::new(EngineConfig::default()).unwrap();
//! engine.prepare(44100.0, 512, ChannelLayout::Mono).unwrap();
//!
//! engine.params().set_revelation(9);
//! engine.apply_pending_presets();
//!
//! let mut samples = vec![0.2_f32; 512];
//! engine.process_block(&mut [&mut samples[..]]).unwrap();
//! ```

pub mod chain;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod meter;
pub mod params;
pub mod presets;
pub mod state;
pub mod store;

pub use chain::EffectsChain;
pub use config::EngineConfig;
pub use dispatch::{ControlRunner, PresetDispatcher};
pub use engine::Engine;
pub use error::{EngineError, Result};
pub use meter::LevelMeter;
pub use params::{Param, ParameterSnapshot};
pub use presets::{PRESET_COUNT, PRESETS, Preset, find_by_name, preset_at};
pub use store::{Listener, ParameterStore, REVELATION_UNSET};
