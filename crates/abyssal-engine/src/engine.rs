//! The processor as a host sees it: lifecycle, block processing, state.

use abyssal_core::{AudioBlock, ChannelLayout, ProcessSetup, StateVariableFilter};
use std::io;
use std::sync::Arc;

use crate::chain::EffectsChain;
use crate::config::EngineConfig;
use crate::dispatch::{ControlRunner, PresetDispatcher};
use crate::error::{EngineError, Result};
use crate::meter::{LevelMeter, MeterBallistics};
use crate::params::ParameterSnapshot;
use crate::state;
use crate::store::ParameterStore;

/// The Abyssal Gaze processor.
///
/// Owns the parameter store, the preset dispatcher, the meter and the chain.
/// The store, dispatcher and meter are shared through `Arc` so a UI or host
/// thread can hold them while the audio thread owns the engine.
///
/// # Example
///
/// ```rust
/// use abyssal_core::ChannelLayout;
/// use abyssal_engine::{Engine, EngineConfig, Param};
///
/// let mut engine = Engine::new(EngineConfig::default()).unwrap();
/// engine.prepare(48000.0, 256, ChannelLayout::Stereo).unwrap();
/// engine.params().set(Param::Corruption, 0.4);
///
/// let mut left = vec![0.1_f32; 256];
/// let mut right = vec![0.1_f32; 256];
/// engine.process_block(&mut [&mut left[..], &mut right[..]]).unwrap();
/// ```
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    store: Arc<ParameterStore>,
    dispatcher: Arc<PresetDispatcher>,
    meter: Arc<LevelMeter>,
    ballistics: MeterBallistics,
    chain: EffectsChain,
    setup: Option<ProcessSetup>,
    snapshot: ParameterSnapshot,
}

impl Engine {
    /// Create an engine after validating `config`.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let store = Arc::new(ParameterStore::new());
        let dispatcher = PresetDispatcher::attach(Arc::clone(&store));
        Ok(Self {
            ballistics: MeterBallistics::new(config.meter_release_ms),
            chain: EffectsChain::new(&config),
            snapshot: store.snapshot(),
            meter: Arc::new(LevelMeter::new()),
            setup: None,
            config,
            store,
            dispatcher,
        })
    }

    /// Whether the engine can run with these input and output channel
    /// counts: mono to mono or stereo to stereo.
    pub fn is_layout_supported(inputs: usize, outputs: usize) -> bool {
        inputs == outputs && ChannelLayout::from_channel_count(inputs).is_some()
    }

    /// Allocate for a stream and clear all processing state.
    ///
    /// Sample rates below [`StateVariableFilter::MIN_SAMPLE_RATE`] cannot
    /// hold the tone filter's 20 Hz floor and are rejected. Must not run
    /// concurrently with processing; `&mut self` enforces that.
    pub fn prepare(
        &mut self,
        sample_rate: f32,
        max_block_size: usize,
        layout: ChannelLayout,
    ) -> Result<()> {
        if !(sample_rate.is_finite() && sample_rate >= StateVariableFilter::MIN_SAMPLE_RATE) {
            return Err(EngineError::InvalidSampleRate(sample_rate));
        }
        if max_block_size == 0 {
            return Err(EngineError::InvalidBlockSize(max_block_size));
        }

        let setup = ProcessSetup::new(sample_rate, max_block_size, layout);
        self.chain.prepare(&setup);
        self.ballistics.prepare(sample_rate);
        self.ballistics.reset(&self.meter);
        self.snapshot = self.store.snapshot();
        self.setup = Some(setup);

        tracing::info!(
            sample_rate,
            max_block_size,
            layout = %layout,
            delay_capacity = self.chain.delay_capacity(),
            "prepared engine"
        );
        Ok(())
    }

    /// Release host resources. Buffers are kept for the next prepare.
    pub fn release_resources(&mut self) {
        tracing::debug!("release_resources: keeping buffers");
    }

    /// Clear tails and oscillator phase without reallocating.
    pub fn reset(&mut self) {
        self.chain.reset();
        self.ballistics.reset(&self.meter);
    }

    /// Process one block in place with the store's current values.
    ///
    /// Reads one snapshot at block start. If a preset batch is landing at
    /// that moment the previous block's snapshot is reused.
    pub fn process_block(&mut self, channels: &mut [&mut [f32]]) -> Result<()> {
        self.check_block(channels)?;
        self.store.snapshot_into(&mut self.snapshot);
        let snapshot = self.snapshot;
        self.run(channels, &snapshot)
    }

    /// Process one block in place with explicit values.
    pub fn process_block_with(
        &mut self,
        channels: &mut [&mut [f32]],
        snapshot: &ParameterSnapshot,
    ) -> Result<()> {
        self.check_block(channels)?;
        self.run(channels, snapshot)
    }

    /// The shared parameter store.
    pub fn params(&self) -> &Arc<ParameterStore> {
        &self.store
    }

    /// The shared level meter.
    pub fn meter(&self) -> Arc<LevelMeter> {
        Arc::clone(&self.meter)
    }

    /// The preset dispatcher.
    pub fn dispatcher(&self) -> &Arc<PresetDispatcher> {
        &self.dispatcher
    }

    /// Apply a pending preset selection on the calling thread.
    ///
    /// For hosts without a [`ControlRunner`], such as offline rendering.
    pub fn apply_pending_presets(&self) -> Option<usize> {
        self.dispatcher.drain()
    }

    /// Start a control thread that applies preset selections as they arrive.
    pub fn spawn_control_runner(&self) -> io::Result<ControlRunner> {
        ControlRunner::spawn(Arc::clone(&self.dispatcher))
    }

    /// The configuration the engine was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current stream setup, `None` before prepare.
    pub fn setup(&self) -> Option<&ProcessSetup> {
        self.setup.as_ref()
    }

    /// Serialize parameter state.
    pub fn export_state(&self) -> Result<Vec<u8>> {
        state::export(&self.store)
    }

    /// Restore parameter state. Does not re-apply the stored preset.
    pub fn import_state(&self, bytes: &[u8]) -> Result<()> {
        state::import(&self.store, bytes)
    }

    /// Structural checks, done before any sample is touched.
    fn check_block(&self, channels: &[&mut [f32]]) -> Result<()> {
        let setup = self.setup.ok_or(EngineError::NotPrepared)?;
        let count = channels.len();
        if ChannelLayout::from_channel_count(count).is_none() {
            return Err(EngineError::UnsupportedLayout(count));
        }
        let expected = setup.layout.channel_count();
        if count != expected {
            return Err(EngineError::ChannelCountMismatch {
                expected,
                actual: count,
            });
        }
        if let [left, right] = channels
            && left.len() != right.len()
        {
            return Err(EngineError::ChannelLengthMismatch {
                left: left.len(),
                right: right.len(),
            });
        }
        Ok(())
    }

    fn run(&mut self, channels: &mut [&mut [f32]], snapshot: &ParameterSnapshot) -> Result<()> {
        let count = channels.len();
        let mut block =
            AudioBlock::from_channels(channels).ok_or(EngineError::UnsupportedLayout(count))?;
        if block.frames() == 0 {
            return Ok(());
        }
        self.chain.process(&mut block, snapshot);
        drop(block);
        self.ballistics
            .update(&self.meter, channels.iter().map(|c| &**c));
        Ok(())
    }
}
