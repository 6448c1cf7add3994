//! Wavescope - Streaming Pipeline
//!
//! Platform-agnostic chunk streaming for Wavescope.
//!
//! This crate provides:
//! - The `Pipeline` state machine (Idle, Streaming, Draining, Terminated)
//! - `PipelineContext`, the resolved stream parameters, mode and layout
//! - `PipelineStats`, counters reported on termination
//!
//! # Architecture
//!
//! `wavescope-playback` is completely platform-agnostic:
//! - No dependency on cpal (desktop audio)
//! - No dependency on egui (desktop window)
//!
//! The audio device and the window are provided through the
//! [`PlaybackSink`](wavescope_core::PlaybackSink) and
//! [`Surface`](wavescope_core::Surface) traits.
//!
//! # Example: Driving a pipeline to completion
//!
//! ```rust
//! use std::io::Cursor;
//! use wavescope_core::{PlaybackSink, Result, SampleFormat, StreamDescriptor};
//! use wavescope_playback::{Pipeline, PipelineContext};
//! use wavescope_visual::{DisplayList, Layout, VisualizationMode};
//!
//! struct NullSink;
//!
//! impl PlaybackSink for NullSink {
//!     fn write(&mut self, bytes: &[u8]) -> Result<usize> {
//!         Ok(bytes.len())
//!     }
//! }
//!
//! let descriptor = StreamDescriptor::new(8_000, 1, SampleFormat::S16Le).unwrap();
//! let context = PipelineContext::new(descriptor, VisualizationMode::Waveform, Layout::default());
//!
//! // Two full chunks of silence
//! let input = Cursor::new(vec![0u8; 2 * descriptor.chunk_bytes()]);
//! let mut pipeline = Pipeline::new(context, input, NullSink, DisplayList::new());
//!
//! let stats = pipeline.run().unwrap();
//! assert_eq!(stats.chunks_played, 2);
//! assert_eq!(stats.frames_presented, 2);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod pipeline;
pub mod types;

pub use pipeline::Pipeline;
pub use types::{PipelineContext, PipelineState, PipelineStats};
