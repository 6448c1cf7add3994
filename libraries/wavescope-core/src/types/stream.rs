//! Stream-related types
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of chunks per second of audio (one chunk = 50 ms)
pub const CHUNKS_PER_SECOND: u32 = 20;

/// Encoding of the raw samples on the input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleFormat {
    /// Signed 16-bit little-endian linear PCM
    S16Le,
}

impl SampleFormat {
    /// Size of one sample in bytes
    pub fn byte_width(self) -> usize {
        match self {
            Self::S16Le => 2,
        }
    }

    /// Size of one sample in bits
    pub fn bits_per_sample(self) -> u16 {
        match self {
            Self::S16Le => 16,
        }
    }

    /// Short name used on the command line
    pub fn name(self) -> &'static str {
        match self {
            Self::S16Le => "s16le",
        }
    }
}

impl fmt::Display for SampleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SampleFormat {
    type Err = InvalidDescriptor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "s16le" => Ok(Self::S16Le),
            other => Err(InvalidDescriptor::UnknownFormat(other.to_string())),
        }
    }
}

/// Reasons a stream descriptor cannot be built
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidDescriptor {
    /// Sample rate too low to fill one 50 ms chunk with at least one frame
    #[error("Invalid sample rate: {0} Hz (must be at least {CHUNKS_PER_SECOND} Hz)")]
    SampleRate(u32),

    /// Channel count of zero
    #[error("Invalid channel count: {0}")]
    ChannelCount(u16),

    /// Unrecognised sample format name
    #[error("Invalid audio format: {0}")]
    UnknownFormat(String),
}

/// Immutable description of the incoming PCM stream
///
/// All three parameters are known at once; there is no partially specified
/// descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamDescriptor {
    sample_rate: u32,
    channels: u16,
    format: SampleFormat,
}

impl StreamDescriptor {
    /// Create a new stream descriptor
    pub fn new(
        sample_rate: u32,
        channels: u16,
        format: SampleFormat,
    ) -> Result<Self, InvalidDescriptor> {
        if sample_rate < CHUNKS_PER_SECOND {
            return Err(InvalidDescriptor::SampleRate(sample_rate));
        }
        if channels == 0 {
            return Err(InvalidDescriptor::ChannelCount(channels));
        }

        Ok(Self {
            sample_rate,
            channels,
            format,
        })
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of interleaved channels
    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Sample encoding
    pub fn format(&self) -> SampleFormat {
        self.format
    }

    /// Bytes per sample
    pub fn sample_byte_width(&self) -> usize {
        self.format.byte_width()
    }

    /// Bytes per frame (one sample for every channel)
    pub fn frame_bytes(&self) -> usize {
        self.sample_byte_width() * self.channels as usize
    }

    /// Frames in one 50 ms chunk
    pub fn chunk_frames(&self) -> usize {
        (self.sample_rate / CHUNKS_PER_SECOND) as usize
    }

    /// Bytes in one 50 ms chunk
    pub fn chunk_bytes(&self) -> usize {
        self.chunk_frames() * self.frame_bytes()
    }
}

impl fmt::Display for StreamDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Hz, {} channel(s), {}",
            self.sample_rate, self.channels, self.format
        )
    }
}
