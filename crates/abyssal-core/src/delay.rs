//! Circular-buffer delay lines.
//!
//! # Types
//!
//! - [`DelayLine`] - Multi-channel buffer with one write cursor shared by all
//!   channels; read-then-write in a single pass per frame
//! - [`RingDelay`] - Single-channel fixed-length ring whose output is the
//!   sample written `len` steps ago (comb and allpass building block)
//!
//! Both allocate when sized and never reallocate while processing.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec;
use alloc::vec::Vec;

/// Multi-channel circular buffer with a shared write cursor.
///
/// Capacity is fixed when the line is sized. For a delay of `d` samples the
/// read position is `(cursor - d + capacity) mod capacity`; the cursor always
/// stays in `[0, capacity)`.
///
/// # Example
///
/// ```rust
/// use abyssal_core::DelayLine;
///
/// let mut line = DelayLine::new();
/// line.resize(2, 8);
///
/// // Impulse on channel 0, then three empty frames.
/// line.write(0, 1.0);
/// line.advance();
/// for _ in 0..2 {
///     line.write(0, 0.0);
///     line.advance();
/// }
/// assert_eq!(line.read(0, 3), 1.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DelayLine {
    channels: Vec<Vec<f32>>,
    capacity: usize,
    cursor: usize,
}

impl DelayLine {
    /// Create an empty line. Call [`resize`](Self::resize) before use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Size the line for `channels × capacity` samples and clear it.
    ///
    /// Reallocates only when the shape changes. Returns `true` if it did.
    pub fn resize(&mut self, channels: usize, capacity: usize) -> bool {
        let reallocated = channels != self.channels.len() || capacity != self.capacity;
        if reallocated {
            self.channels = vec![vec![0.0; capacity]; channels];
            self.capacity = capacity;

            #[cfg(feature = "tracing")]
            tracing::debug!(channels, capacity, "delay line allocated");
        } else {
            self.clear();
        }
        self.cursor = 0;
        reallocated
    }

    /// Samples per channel.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of channels.
    #[inline]
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Current write position in `[0, capacity)`.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Read the sample written `delay` frames before the cursor.
    ///
    /// `delay` must be in `1..=capacity`; a delay equal to capacity reads the
    /// slot about to be overwritten.
    #[inline]
    pub fn read(&self, channel: usize, delay: usize) -> f32 {
        let pos = (self.cursor + self.capacity - delay) % self.capacity;
        self.channels[channel][pos]
    }

    /// Write a sample at the cursor without advancing it.
    #[inline]
    pub fn write(&mut self, channel: usize, sample: f32) {
        self.channels[channel][self.cursor] = sample;
    }

    /// Move the cursor one frame forward, wrapping at capacity.
    #[inline]
    pub fn advance(&mut self) {
        self.cursor += 1;
        if self.cursor >= self.capacity {
            self.cursor = 0;
        }
    }

    /// Silence every channel and rewind the cursor.
    pub fn clear(&mut self) {
        for channel in &mut self.channels {
            channel.fill(0.0);
        }
        self.cursor = 0;
    }
}

/// Single-channel ring with a fixed length.
///
/// [`tick`](Self::tick) returns the sample stored `len` steps ago, then
/// overwrites that slot.
///
/// # Example
///
/// ```rust
/// use abyssal_core::RingDelay;
///
/// let mut ring = RingDelay::new(3);
/// assert_eq!(ring.tick(1.0), 0.0);
/// assert_eq!(ring.tick(0.0), 0.0);
/// assert_eq!(ring.tick(0.0), 0.0);
/// assert_eq!(ring.tick(0.0), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct RingDelay {
    buffer: Vec<f32>,
    index: usize,
}

impl RingDelay {
    /// Create a ring of `len` samples (at least one).
    pub fn new(len: usize) -> Self {
        Self {
            buffer: vec![0.0; len.max(1)],
            index: 0,
        }
    }

    /// Oldest sample, not yet replaced.
    #[inline]
    pub fn front(&self) -> f32 {
        self.buffer[self.index]
    }

    /// Replace the oldest sample and step forward.
    #[inline]
    pub fn push(&mut self, sample: f32) {
        self.buffer[self.index] = sample;
        self.index += 1;
        if self.index >= self.buffer.len() {
            self.index = 0;
        }
    }

    /// Return the oldest sample and replace it with `sample`.
    #[inline]
    pub fn tick(&mut self, sample: f32) -> f32 {
        let out = self.front();
        self.push(sample);
        out
    }

    /// Ring length in samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Always `false`; a ring holds at least one sample.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Silence the ring.
    pub fn clear(&mut self) {
        self.buffer.fill(0.0);
        self.index = 0;
    }
}
