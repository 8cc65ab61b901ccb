//! Error types for engine setup, configuration and state persistence.

use std::path::PathBuf;
use thiserror::Error;

/// Errors reported by the engine.
///
/// Per-block processing never produces a recoverable error. Every variant is
/// a structural or configuration fault detected before any sample is touched.
#[derive(Debug, Error)]
pub enum EngineError {
    /// `process_block` called before a successful `prepare`
    #[error("engine is not prepared")]
    NotPrepared,

    /// Channel count other than one or two
    #[error("unsupported channel layout: {0} channels")]
    UnsupportedLayout(usize),

    /// Block channel count differs from the prepared layout
    #[error("expected {expected} channels, got {actual}")]
    ChannelCountMismatch {
        /// Channels of the prepared layout.
        expected: usize,
        /// Channels in the block.
        actual: usize,
    },

    /// Channels of one block have different lengths
    #[error("channel lengths differ: {left} and {right} frames")]
    ChannelLengthMismatch {
        /// Frames in the first channel.
        left: usize,
        /// Frames in the second channel.
        right: usize,
    },

    /// Sample rate not finite and positive
    #[error("invalid sample rate: {0}")]
    InvalidSampleRate(f32),

    /// Maximum block size of zero
    #[error("invalid maximum block size: {0}")]
    InvalidBlockSize(usize),

    /// Failed to read a configuration file
    #[error("failed to read config '{path}': {source}")]
    ReadConfig {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration values out of range
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// State blob is not valid JSON of the expected shape
    #[error("malformed state: {0}")]
    StateFormat(#[from] serde_json::Error),

    /// State blob written by an unknown format version
    #[error("unsupported state version {0}")]
    StateVersion(u32),
}

impl EngineError {
    /// Create a read config error.
    pub fn read_config(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EngineError::ReadConfig {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid config error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        EngineError::InvalidConfig(reason.into())
    }
}

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
