//! Sample normalization
//!
//! Maps raw interleaved samples to amplitudes around [-1.0, 1.0].
//!
//! 16-bit samples are divided by `i16::MAX` (32767), not 32768, so full
//! positive scale is exactly 1.0 and full negative scale is slightly below
//! -1.0. Existing visual output depends on this scaling.

use wavescope_core::{SampleFormat, StreamDescriptor};

/// Divisor applied to signed 16-bit samples
pub const S16_SCALE: f32 = i16::MAX as f32;

/// Normalized amplitude of one sample
///
/// `raw` holds interleaved samples in `descriptor`'s format; the sample read is
/// at `frame * channels + channel`. Returns 0.0 when that index lies outside
/// `raw`.
pub fn normalize(raw: &[u8], frame: usize, channel: usize, descriptor: &StreamDescriptor) -> f32 {
    let index = frame * descriptor.channels() as usize + channel;

    match descriptor.format() {
        SampleFormat::S16Le => {
            let offset = index * 2;
            match raw.get(offset..offset + 2) {
                Some(&[lo, hi]) => f32::from(i16::from_le_bytes([lo, hi])) / S16_SCALE,
                _ => 0.0,
            }
        }
    }
}

/// One chunk of interleaved samples together with its stream parameters
#[derive(Debug, Clone, Copy)]
pub struct Chunk<'a> {
    bytes: &'a [u8],
    descriptor: &'a StreamDescriptor,
}

impl<'a> Chunk<'a> {
    /// Wrap raw chunk bytes
    pub fn new(bytes: &'a [u8], descriptor: &'a StreamDescriptor) -> Self {
        Self { bytes, descriptor }
    }

    /// Raw bytes of the chunk
    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Stream parameters of the chunk
    pub fn descriptor(&self) -> &'a StreamDescriptor {
        self.descriptor
    }

    /// Number of complete frames held
    pub fn frames(&self) -> usize {
        self.bytes.len() / self.descriptor.frame_bytes()
    }

    /// Normalized amplitude of `channel` at `frame`
    pub fn sample(&self, frame: usize, channel: usize) -> f32 {
        normalize(self.bytes, frame, channel, self.descriptor)
    }
}
