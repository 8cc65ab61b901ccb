//! Subcommand implementations.

pub mod common;
pub mod params;
pub mod presets;
pub mod process;
