//! The fixed seven-stage effects chain.

use abyssal_core::{AudioBlock, ProcessSetup, Stage};
use abyssal_effects::{Corruption, Erosion, Obscura, Tremor, Void, Whispers, drown};

use crate::config::EngineConfig;
use crate::params::ParameterSnapshot;

/// Every stage in processing order, plus the dry buffers drown needs.
///
/// Order per block: dry copy, corruption, obscura, erosion, tremor, whispers,
/// VOID, drown. Blocks longer than the prepared maximum are processed in
/// consecutive chunks with the same snapshot; stage state carries across
/// chunks, so the output matches one large block.
#[derive(Debug, Clone)]
pub struct EffectsChain {
    corruption: Corruption,
    obscura: Obscura,
    erosion: Erosion,
    tremor: Tremor,
    whispers: Whispers,
    void: Void,
    dry: [Vec<f32>; 2],
    max_block_size: usize,
}

impl EffectsChain {
    /// Build the stages. Nothing is allocated until [`prepare`](Self::prepare).
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            corruption: Corruption::new(),
            obscura: Obscura::new(),
            erosion: Erosion::new(),
            tremor: Tremor::new(),
            whispers: Whispers::new(config.max_delay_seconds, config.whispers_delay_seconds()),
            void: Void::new(config.reverb_damping, config.reverb_width),
            dry: [Vec::new(), Vec::new()],
            max_block_size: 0,
        }
    }

    /// Size buffers for `setup` and clear all stage state.
    pub fn prepare(&mut self, setup: &ProcessSetup) {
        self.max_block_size = setup.max_block_size.max(1);
        for buffer in &mut self.dry {
            buffer.clear();
            buffer.resize(self.max_block_size, 0.0);
        }
        for stage in self.stages_mut() {
            stage.prepare(setup);
        }
    }

    /// Clear every stage to silence without reallocating.
    pub fn reset(&mut self) {
        for stage in self.stages_mut() {
            stage.reset();
        }
    }

    /// Whispers delay buffer capacity in samples.
    pub fn delay_capacity(&self) -> usize {
        self.whispers.capacity()
    }

    /// Run the chain over `block` in place.
    pub fn process(&mut self, block: &mut AudioBlock<'_>, params: &ParameterSnapshot) {
        let frames = block.frames();
        let chunk = self.max_block_size.max(1);
        let mut start = 0;
        while start < frames {
            let len = chunk.min(frames - start);
            self.process_chunk(&mut block.sub_block(start, len), params);
            start += len;
        }
    }

    fn process_chunk(&mut self, block: &mut AudioBlock<'_>, params: &ParameterSnapshot) {
        let frames = block.frames();
        for (dry, channel) in self.dry.iter_mut().zip(block.channels_mut()) {
            dry[..frames].copy_from_slice(channel);
        }

        self.corruption.process_in_place(block, params.corruption);
        self.obscura.process_in_place(block, params.obscura);
        self.erosion.process_in_place(block, params.erosion);
        self.tremor.process_in_place(block, params.tremor);
        self.whispers.process_in_place(block, params.whispers);
        self.void.process_in_place(block, params.void);

        for (dry, channel) in self.dry.iter().zip(block.channels_mut()) {
            drown::blend(&dry[..frames], channel, params.drown);
        }
    }

    fn stages_mut(&mut self) -> [&mut dyn Stage; 6] {
        [
            &mut self.corruption,
            &mut self.obscura,
            &mut self.erosion,
            &mut self.tremor,
            &mut self.whispers,
            &mut self.void,
        ]
    }
}
