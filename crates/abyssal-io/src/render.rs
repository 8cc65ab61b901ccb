//! Offline rendering of whole buffers through an engine.

use abyssal_engine::Engine;

use crate::{AudioBuffer, Error, Result};

/// Process `buffer` in place in blocks of `block_size` frames.
///
/// Prepares `engine` for the buffer's sample rate and layout, then feeds it
/// block by block the way a host callback would. Preset selections made
/// before or during rendering are applied between blocks, since no control
/// thread is running. `on_progress` receives the number of frames done
/// after each block.
pub fn render_offline(
    engine: &mut Engine,
    buffer: &mut AudioBuffer,
    block_size: usize,
    mut on_progress: impl FnMut(usize),
) -> Result<()> {
    let count = buffer.channel_count();
    if !Engine::is_layout_supported(count, count) {
        return Err(Error::UnsupportedChannels(count as u16));
    }

    let block_size = block_size.max(1);
    let layout = buffer.layout();
    engine.prepare(buffer.sample_rate() as f32, block_size, layout)?;
    tracing::info!(
        frames = buffer.frames(),
        sample_rate = buffer.sample_rate(),
        block_size,
        layout = %layout,
        "rendering"
    );

    let frames = buffer.frames();
    let mut start = 0;
    while start < frames {
        engine.apply_pending_presets();
        let end = (start + block_size).min(frames);
        let mut block: Vec<&mut [f32]> = buffer
            .channels_mut()
            .iter_mut()
            .map(|channel| &mut channel[start..end])
            .collect();
        engine.process_block(&mut block)?;
        start = end;
        on_progress(start);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use abyssal_engine::{EngineConfig, Param};

    fn engine() -> Engine {
        Engine::new(EngineConfig::default()).unwrap()
    }

    #[test]
    fn drown_zero_renders_input_unchanged() {
        let mut engine = engine();
        engine.params().set(Param::Corruption, 1.0);
        engine.params().set(Param::Drown, 0.0);
        let input: Vec<f32> = (0..1000).map(|i| (i as f32 * 0.01).sin()).collect();
        let mut buffer = AudioBuffer::stereo(input.clone(), input.clone(), 44100);
        render_offline(&mut engine, &mut buffer, 128, |_| {}).unwrap();
        assert_eq!(buffer.channel(0), Some(&input[..]));
        assert_eq!(buffer.channel(1), Some(&input[..]));
    }

    #[test]
    fn reports_progress_per_block() {
        let mut engine = engine();
        let mut buffer = AudioBuffer::mono(vec![0.0; 1000], 48000);
        let mut reports = Vec::new();
        render_offline(&mut engine, &mut buffer, 300, |done| reports.push(done)).unwrap();
        assert_eq!(reports, vec![300, 600, 900, 1000]);
    }

    #[test]
    fn applies_selected_preset_before_first_block() {
        let mut engine = engine();
        engine.params().set_revelation(3);
        let mut buffer = AudioBuffer::mono(vec![0.1; 64], 48000);
        render_offline(&mut engine, &mut buffer, 64, |_| {}).unwrap();
        assert_eq!(engine.params().get(Param::Void), 1.0);
    }

    #[test]
    fn empty_buffer_is_a_no_op() {
        let mut engine = engine();
        let mut buffer = AudioBuffer::mono(Vec::new(), 48000);
        let mut calls = 0;
        render_offline(&mut engine, &mut buffer, 64, |_| calls += 1).unwrap();
        assert_eq!(calls, 0);
    }
}
