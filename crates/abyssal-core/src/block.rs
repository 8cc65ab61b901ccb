//! Channel slices processed in place by the effects chain.
//!
//! The processor only ever sees one or two channels, so an [`AudioBlock`] is a
//! left slice plus an optional right slice rather than a general channel list.

use core::fmt;

/// Channel layout the processor can be prepared for.
///
/// Input and output layouts must match; anything other than mono or stereo
/// is rejected before audio flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChannelLayout {
    /// One channel.
    Mono,
    /// Two channels (left, right).
    #[default]
    Stereo,
}

impl ChannelLayout {
    /// Number of channels in this layout.
    pub const fn channel_count(self) -> usize {
        match self {
            ChannelLayout::Mono => 1,
            ChannelLayout::Stereo => 2,
        }
    }

    /// Layout for a channel count, or `None` for anything but 1 or 2.
    pub const fn from_channel_count(count: usize) -> Option<Self> {
        match count {
            1 => Some(ChannelLayout::Mono),
            2 => Some(ChannelLayout::Stereo),
            _ => None,
        }
    }
}

impl fmt::Display for ChannelLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelLayout::Mono => f.write_str("mono"),
            ChannelLayout::Stereo => f.write_str("stereo"),
        }
    }
}

/// Stream configuration handed to every stage at prepare time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessSetup {
    /// Sample rate in Hz.
    pub sample_rate: f32,
    /// Largest block the host will deliver in one callback.
    pub max_block_size: usize,
    /// Channel layout of both input and output.
    pub layout: ChannelLayout,
}

impl ProcessSetup {
    /// Create a new setup.
    pub const fn new(sample_rate: f32, max_block_size: usize, layout: ChannelLayout) -> Self {
        Self {
            sample_rate,
            max_block_size,
            layout,
        }
    }
}

/// Mono or stereo audio processed in place.
///
/// Both channels always have the same number of frames.
///
/// # Example
///
/// ```rust
/// use abyssal_core::{AudioBlock, ChannelLayout};
///
/// let mut left = [0.5_f32; 64];
/// let mut right = [0.25_f32; 64];
/// let block = AudioBlock::stereo(&mut left, &mut right).unwrap();
/// assert_eq!(block.frames(), 64);
/// assert_eq!(block.layout(), ChannelLayout::Stereo);
/// ```
#[derive(Debug)]
pub struct AudioBlock<'a> {
    left: &'a mut [f32],
    right: Option<&'a mut [f32]>,
}

impl<'a> AudioBlock<'a> {
    /// Wrap a single channel.
    pub fn mono(left: &'a mut [f32]) -> Self {
        Self { left, right: None }
    }

    /// Wrap two channels. Returns `None` if their lengths differ.
    pub fn stereo(left: &'a mut [f32], right: &'a mut [f32]) -> Option<Self> {
        if left.len() != right.len() {
            return None;
        }
        Some(Self {
            left,
            right: Some(right),
        })
    }

    /// Wrap a host channel list of one or two equally sized channels.
    ///
    /// Returns `None` for any other channel count or for unequal lengths.
    pub fn from_channels<'b: 'a>(channels: &'a mut [&'b mut [f32]]) -> Option<Self> {
        match channels {
            [left] => Some(Self::mono(&mut **left)),
            [left, right] => Self::stereo(&mut **left, &mut **right),
            _ => None,
        }
    }

    /// Frames per channel.
    #[inline]
    pub fn frames(&self) -> usize {
        self.left.len()
    }

    /// Layout of this block.
    #[inline]
    pub fn layout(&self) -> ChannelLayout {
        if self.right.is_some() {
            ChannelLayout::Stereo
        } else {
            ChannelLayout::Mono
        }
    }

    /// Number of channels (1 or 2).
    #[inline]
    pub fn channel_count(&self) -> usize {
        self.layout().channel_count()
    }

    /// Shared view of one channel.
    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        match index {
            0 => Some(&*self.left),
            1 => self.right.as_deref(),
            _ => None,
        }
    }

    /// Mutable view of one channel.
    pub fn channel_mut(&mut self, index: usize) -> Option<&mut [f32]> {
        match index {
            0 => Some(&mut *self.left),
            1 => self.right.as_deref_mut(),
            _ => None,
        }
    }

    /// Both channels at once, for stages that couple them.
    #[inline]
    pub fn split_mut(&mut self) -> (&mut [f32], Option<&mut [f32]>) {
        (&mut *self.left, self.right.as_deref_mut())
    }

    /// Iterate channels in order.
    pub fn channels_mut(&mut self) -> impl Iterator<Item = &mut [f32]> {
        core::iter::once(&mut *self.left).chain(self.right.as_deref_mut())
    }

    /// Reborrow `len` frames starting at `start` as a smaller block.
    ///
    /// # Panics
    ///
    /// Panics if `start + len` exceeds [`frames`](Self::frames).
    pub fn sub_block(&mut self, start: usize, len: usize) -> AudioBlock<'_> {
        let end = start + len;
        AudioBlock {
            left: &mut self.left[start..end],
            right: self.right.as_deref_mut().map(|right| &mut right[start..end]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_from_channel_count() {
        assert_eq!(ChannelLayout::from_channel_count(1), Some(ChannelLayout::Mono));
        assert_eq!(ChannelLayout::from_channel_count(2), Some(ChannelLayout::Stereo));
        assert_eq!(ChannelLayout::from_channel_count(0), None);
        assert_eq!(ChannelLayout::from_channel_count(6), None);
    }

    #[test]
    fn stereo_rejects_unequal_lengths() {
        let mut left = [0.0_f32; 4];
        let mut right = [0.0_f32; 5];
        assert!(AudioBlock::stereo(&mut left, &mut right).is_none());
    }

    #[test]
    fn from_channels_accepts_one_or_two() {
        let mut a = vec![1.0_f32; 8];
        let mut b = vec![2.0_f32; 8];
        let mut c = vec![3.0_f32; 8];

        {
            let mut channels: Vec<&mut [f32]> = vec![a.as_mut_slice()];
            let block = AudioBlock::from_channels(&mut channels).unwrap();
            assert_eq!(block.layout(), ChannelLayout::Mono);
        }
        {
            let mut channels: Vec<&mut [f32]> = vec![a.as_mut_slice(), b.as_mut_slice()];
            let block = AudioBlock::from_channels(&mut channels).unwrap();
            assert_eq!(block.layout(), ChannelLayout::Stereo);
            assert_eq!(block.channel(1).unwrap()[0], 2.0);
        }
        {
            let mut channels: Vec<&mut [f32]> =
                vec![a.as_mut_slice(), b.as_mut_slice(), c.as_mut_slice()];
            assert!(AudioBlock::from_channels(&mut channels).is_none());
        }
    }

    #[test]
    fn sub_block_writes_through() {
        let mut left = [0.0_f32; 8];
        let mut right = [0.0_f32; 8];
        let mut block = AudioBlock::stereo(&mut left, &mut right).unwrap();
        {
            let mut sub = block.sub_block(2, 3);
            assert_eq!(sub.frames(), 3);
            for channel in sub.channels_mut() {
                channel.fill(1.0);
            }
        }
        assert_eq!(left, [0.0, 0.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0]);
        assert_eq!(right, [0.0, 0.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0]);
    }
}
