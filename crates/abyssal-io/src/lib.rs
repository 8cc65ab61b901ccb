//! Audio file I/O for the Abyssal Gaze processor.
//!
//! This crate provides:
//!
//! - **WAV file I/O**: [`read_wav`] and [`write_wav`] keep the file's channel
//!   layout (mono or stereo) intact
//! - **Offline rendering**: [`render_offline`] drives an
//!   [`Engine`](abyssal_engine::Engine) over a whole [`AudioBuffer`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use abyssal_engine::{Engine, EngineConfig};
//! use abyssal_io::{read_wav, render_offline, write_wav};
//!
//! # fn main() -> abyssal_io::Result<()> {
//! let (mut audio, spec) = read_wav("input.wav")?;
//!
//! let mut engine = Engine::new(EngineConfig::default())?;
//! engine.params().set_revelation(9);
//! render_offline(&mut engine, &mut audio, 512, |_| {})?;
//!
//! write_wav("output.wav", &audio, spec.bits_per_sample)?;
//! # Ok(())
//! # }
//! ```

mod buffer;
mod render;
mod wav;

pub use buffer::AudioBuffer;
pub use render::render_offline;
pub use wav::{WavFormat, WavInfo, WavSpec, read_wav, read_wav_info, write_wav};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// The file has a channel count the processor cannot run.
    #[error("unsupported channel count: {0} (expected 1 or 2)")]
    UnsupportedChannels(u16),

    /// The requested output bit depth is not 16, 24 or 32.
    #[error("unsupported bit depth: {0} (expected 16, 24 or 32)")]
    UnsupportedBitDepth(u16),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The engine rejected its setup or a block.
    #[error("engine error: {0}")]
    Engine(#[from] abyssal_engine::EngineError),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
