//! Desktop audio output using cpal
//!
//! This crate provides `CpalSink`, the [`PlaybackSink`](wavescope_core::PlaybackSink)
//! implementation that plays raw PCM chunks on the default output device.
//!
//! # Features
//!
//! - Output configuration negotiation (exact channel count and rate, i16 preferred)
//! - Logarithmic volume control
//! - Blocking writes paced by a bounded chunk queue
//!
//! # Example
//!
//! ```no_run
//! use wavescope_audio_desktop::{CpalSink, Volume, DEFAULT_QUEUE_DEPTH};
//! use wavescope_core::{PlaybackSink, SampleFormat, StreamDescriptor};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let descriptor = StreamDescriptor::new(44_100, 2, SampleFormat::S16Le)?;
//! let mut sink = CpalSink::open(&descriptor, Volume::new(80), DEFAULT_QUEUE_DEPTH)?;
//!
//! // One chunk of silence
//! sink.write(&vec![0u8; descriptor.chunk_bytes()])?;
//! sink.finish()?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod device;
mod error;
mod output;
mod volume;

pub use device::{select_config, ConfigRange, NegotiatedOutput, OutputFormat};
pub use error::{DeviceError, Result};
pub use output::{CpalSink, DEFAULT_QUEUE_DEPTH};
pub use volume::{Volume, MAX_VOLUME};
