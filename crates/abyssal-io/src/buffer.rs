//! Whole-file audio held in memory, one `Vec` per channel.

use abyssal_core::ChannelLayout;

/// Planar audio: one sample vector per channel, all the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    channels: Vec<Vec<f32>>,
    sample_rate: u32,
}

impl AudioBuffer {
    /// One channel.
    pub fn mono(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            channels: vec![samples],
            sample_rate,
        }
    }

    /// Two channels. The shorter one is padded with silence.
    pub fn stereo(mut left: Vec<f32>, mut right: Vec<f32>, sample_rate: u32) -> Self {
        let frames = left.len().max(right.len());
        left.resize(frames, 0.0);
        right.resize(frames, 0.0);
        Self {
            channels: vec![left, right],
            sample_rate,
        }
    }

    /// Split interleaved samples into channels. Trailing partial frames are
    /// dropped.
    pub(crate) fn from_interleaved(samples: &[f32], channel_count: usize, sample_rate: u32) -> Self {
        let count = channel_count.max(1);
        let mut channels = vec![Vec::with_capacity(samples.len() / count); count];
        for frame in samples.chunks_exact(count) {
            for (channel, &sample) in channels.iter_mut().zip(frame) {
                channel.push(sample);
            }
        }
        Self {
            channels,
            sample_rate,
        }
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Mono or stereo.
    pub fn layout(&self) -> ChannelLayout {
        if self.channels.len() == 2 {
            ChannelLayout::Stereo
        } else {
            ChannelLayout::Mono
        }
    }

    /// Number of channels.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Samples per channel.
    pub fn frames(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    /// Duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.frames() as f64 / f64::from(self.sample_rate.max(1))
    }

    /// One channel's samples.
    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    /// Mutable access to every channel.
    pub fn channels_mut(&mut self) -> &mut [Vec<f32>] {
        &mut self.channels
    }

    /// Samples interleaved frame by frame.
    pub fn interleaved(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.frames() * self.channel_count());
        for frame in 0..self.frames() {
            for channel in &self.channels {
                out.push(channel[frame]);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interleave_round_trip() {
        let buffer = AudioBuffer::from_interleaved(&[1.0, -1.0, 2.0, -2.0, 3.0], 2, 48000);
        assert_eq!(buffer.frames(), 2);
        assert_eq!(buffer.channel(0), Some(&[1.0, 2.0][..]));
        assert_eq!(buffer.channel(1), Some(&[-1.0, -2.0][..]));
        assert_eq!(buffer.interleaved(), vec![1.0, -1.0, 2.0, -2.0]);
        assert_eq!(buffer.layout(), ChannelLayout::Stereo);
    }

    #[test]
    fn stereo_pads_shorter_channel() {
        let buffer = AudioBuffer::stereo(vec![0.5; 4], vec![0.5; 2], 44100);
        assert_eq!(buffer.channel(1), Some(&[0.5, 0.5, 0.0, 0.0][..]));
    }

    #[test]
    fn mono_metadata() {
        let buffer = AudioBuffer::mono(vec![0.0; 24000], 48000);
        assert_eq!(buffer.layout(), ChannelLayout::Mono);
        assert_eq!(buffer.duration_secs(), 0.5);
    }
}
