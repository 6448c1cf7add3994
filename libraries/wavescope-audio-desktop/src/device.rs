// wavescope-audio-desktop/src/device.rs
//
// Output configuration negotiation

use crate::error::{DeviceError, Result};
use cpal::traits::{DeviceTrait, HostTrait};
use cpal::{BufferSize, Device, StreamConfig};
use serde::{Deserialize, Serialize};
use std::fmt;
use wavescope_core::StreamDescriptor;

/// Sample types the sink can feed a device with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Native signed 16-bit, no conversion beyond gain
    I16,
    /// 32-bit float
    F32,
}

impl OutputFormat {
    /// Map a cpal sample format, if the sink can produce it
    pub fn from_cpal(format: cpal::SampleFormat) -> Option<Self> {
        match format {
            cpal::SampleFormat::I16 => Some(Self::I16),
            cpal::SampleFormat::F32 => Some(Self::F32),
            _ => None,
        }
    }

    // Lower is preferred
    fn rank(self) -> u8 {
        match self {
            Self::I16 => 0,
            Self::F32 => 1,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::I16 => f.write_str("i16"),
            Self::F32 => f.write_str("f32"),
        }
    }
}

/// One supported configuration range reported by a device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigRange {
    /// Channel count
    pub channels: u16,
    /// Lowest supported rate (Hz)
    pub min_sample_rate: u32,
    /// Highest supported rate (Hz)
    pub max_sample_rate: u32,
    /// Sample type, `None` when the sink cannot produce it
    pub format: Option<OutputFormat>,
}

impl ConfigRange {
    fn accepts(&self, descriptor: &StreamDescriptor) -> bool {
        self.channels == descriptor.channels()
            && (self.min_sample_rate..=self.max_sample_rate).contains(&descriptor.sample_rate())
    }
}

impl From<&cpal::SupportedStreamConfigRange> for ConfigRange {
    fn from(range: &cpal::SupportedStreamConfigRange) -> Self {
        Self {
            channels: range.channels(),
            min_sample_rate: range.min_sample_rate(),
            max_sample_rate: range.max_sample_rate(),
            format: OutputFormat::from_cpal(range.sample_format()),
        }
    }
}

/// Configuration the device was opened with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NegotiatedOutput {
    /// Channel count
    pub channels: u16,
    /// Sample rate (Hz)
    pub sample_rate: u32,
    /// Sample type fed to the device
    pub format: OutputFormat,
}

impl NegotiatedOutput {
    /// cpal stream configuration
    pub fn stream_config(&self) -> StreamConfig {
        StreamConfig {
            channels: self.channels,
            sample_rate: self.sample_rate,
            buffer_size: BufferSize::Default,
        }
    }
}

impl fmt::Display for NegotiatedOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Hz, {} channel(s), {}",
            self.sample_rate, self.channels, self.format
        )
    }
}

/// Pick the configuration to play `descriptor` with
///
/// The channel count must match exactly and the stream rate must lie inside
/// the range; no resampling or remixing is done. Native i16 is preferred over
/// f32. Among equally ranked ranges the first reported wins.
pub fn select_config<I>(ranges: I, descriptor: &StreamDescriptor) -> Result<NegotiatedOutput>
where
    I: IntoIterator<Item = ConfigRange>,
{
    ranges
        .into_iter()
        .filter(|range| range.accepts(descriptor))
        .filter_map(|range| range.format)
        .min_by_key(|format| format.rank())
        .map(|format| NegotiatedOutput {
            channels: descriptor.channels(),
            sample_rate: descriptor.sample_rate(),
            format,
        })
        .ok_or(DeviceError::UnsupportedConfig {
            sample_rate: descriptor.sample_rate(),
            channels: descriptor.channels(),
        })
}

/// Default output device of the default host
pub fn default_output_device() -> Result<Device> {
    cpal::default_host()
        .default_output_device()
        .ok_or(DeviceError::DeviceNotFound)
}

/// Negotiate `descriptor` against what `device` supports
pub fn negotiate(device: &Device, descriptor: &StreamDescriptor) -> Result<NegotiatedOutput> {
    let ranges: Vec<ConfigRange> = device
        .supported_output_configs()?
        .map(|range| ConfigRange::from(&range))
        .collect();

    for range in &ranges {
        tracing::debug!(
            "Device supports {} channel(s) at {}-{} Hz as {:?}",
            range.channels,
            range.min_sample_rate,
            range.max_sample_rate,
            range.format
        );
    }

    select_config(ranges, descriptor)
}
